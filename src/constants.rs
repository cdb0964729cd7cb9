pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_PORT: &str = "3000";

pub const BIND_ADDRESS_ENV: &str = "BIND_ADDRESS";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

pub const USERNAME_ENV: &str = "DYNDNS_USERNAME";
pub const PASSWORD_ENV: &str = "DYNDNS_PASSWORD";

pub const REQUIRE_FQDN_ENV: &str = "DYNDNS_REQUIRE_FQDN";
pub const DEFAULT_REQUIRE_FQDN: &str = "true";

pub const TRUST_PROXY_ENV: &str = "DYNDNS_TRUST_PROXY";
pub const DEFAULT_TRUST_PROXY: &str = "false";

pub const SERVICE_NAME: &str = "dyndns";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Every path a device may use to report its address. All of them share one handler.
pub const UPDATE_ROUTES: [&str; 5] = [
    "/nic/update",
    "/v3/update",
    "/ddns/update",
    "/update",
    "/dyndns/update",
];

pub const AUTO_IP: &str = "auto";
pub const UNKNOWN_USER_AGENT: &str = "unknown";
pub const AUTH_REALM: &str = "dyndns";
