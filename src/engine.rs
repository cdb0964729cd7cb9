use std::fmt;

use chrono::Utc;
use log::{debug, info, warn};

use crate::{constants::AUTO_IP, record::Record, store::Store};

/// Outcome of one update call, rendered as DynDNS protocol text via `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    Updated(String),
    NoChange(String),
    NoFqdn,
    NoIp,
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated(ip) => write!(f, "good {}", ip),
            Self::NoChange(ip) => write!(f, "nochg {}", ip),
            Self::NoFqdn => f.write_str("notfqdn"),
            Self::NoIp => f.write_str("911"),
        }
    }
}

/// Parameters of one update call from an already authenticated caller.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest<'a> {
    pub hostname: Option<&'a str>,
    pub claimed_ip: Option<&'a str>,
    /// Address observed by the transport, used when no usable `myip` was sent.
    pub fallback_ip: Option<&'a str>,
    pub user_agent: &'a str,
    pub method: &'a str,
    pub caller: &'a str,
}

pub struct UpdateEngine {
    store: Store,
    require_fqdn: bool,
}

impl UpdateEngine {
    pub fn new(store: Store, require_fqdn: bool) -> Self {
        Self {
            store,
            require_fqdn,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn valid_hostname<'a>(&self, hostname: Option<&'a str>) -> Option<&'a str> {
        hostname
            .filter(|hostname| !hostname.is_empty())
            .filter(|hostname| !self.require_fqdn || hostname.contains('.'))
    }

    fn resolve_ip<'a>(claimed_ip: Option<&'a str>, fallback_ip: Option<&'a str>) -> Option<&'a str> {
        claimed_ip
            .filter(|ip| !ip.is_empty() && *ip != AUTO_IP)
            .or(fallback_ip)
            .filter(|ip| !ip.is_empty())
    }

    pub async fn update(&self, request: UpdateRequest<'_>) -> UpdateResult {
        let Some(hostname) = self.valid_hostname(request.hostname) else {
            warn!("Rejected update with hostname `{:?}`.", request.hostname);
            return UpdateResult::NoFqdn;
        };

        let Some(ip) = Self::resolve_ip(request.claimed_ip, request.fallback_ip) else {
            warn!("No address could be resolved for `{}`.", hostname);
            return UpdateResult::NoIp;
        };

        let mut entries = self.store.lock().await;

        if entries.get(hostname).is_some_and(|record| record.ip == ip) {
            debug!("Address of `{}` unchanged: `{}`.", hostname, ip);
            return UpdateResult::NoChange(ip.to_string());
        }

        entries.upsert(Record {
            hostname: hostname.to_string(),
            ip: ip.to_string(),
            last_update: Utc::now(),
            user_agent: request.user_agent.to_string(),
            updated_by: request.caller.to_string(),
            method: request.method.to_string(),
        });

        info!(
            "Updated `{}` to `{}` by `{}`.",
            hostname, ip, request.caller
        );

        UpdateResult::Updated(ip.to_string())
    }
}
