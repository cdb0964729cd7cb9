use std::{env::var, error, fmt, net::IpAddr, net::SocketAddr, str::FromStr};

use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::{auth::Credentials, constants::*};

fn create_error_msg(key: &str, value: &str) -> String {
    format!(
        "Failed to parse environment variable `{}` with value `{}`.",
        key, value
    )
}

fn get_parsed_env<T, L>(lookup: &L, key: &str, default_value: Option<&str>) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: fmt::Display + fmt::Debug + error::Error + Send + Sync + 'static,
    L: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => {
            debug!("Environment variable `{}` found.", key);
            value.parse::<T>().context(create_error_msg(key, &value))
        }

        None => {
            if let Some(default_value) = default_value {
                debug!(
                    "Environment variable `{}` not found. Using default value `{}`.",
                    key, default_value
                );
                default_value
                    .parse::<T>()
                    .context(create_error_msg(key, default_value))
            } else {
                Err(anyhow!("Environment variable `{}` not found.", key))
            }
        }
    }
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Env {
    pub listen: SocketAddr,
    pub credentials: Credentials,
    pub require_fqdn: bool,
    pub trust_proxy: bool,
}

impl Env {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let address: IpAddr = get_parsed_env(&lookup, BIND_ADDRESS_ENV, Some(DEFAULT_BIND_ADDRESS))?;
        let port: u16 = get_parsed_env(&lookup, PORT_ENV, Some(DEFAULT_PORT))?;

        let username: String = get_parsed_env(&lookup, USERNAME_ENV, None)?;
        let password: String = get_parsed_env(&lookup, PASSWORD_ENV, None)?;
        if username.is_empty() || password.is_empty() {
            return Err(anyhow!(
                "Environment variables `{}` and `{}` must not be empty.",
                USERNAME_ENV,
                PASSWORD_ENV
            ));
        }

        Ok(Self {
            listen: SocketAddr::new(address, port),
            credentials: Credentials::new(username, password),
            require_fqdn: get_parsed_env(&lookup, REQUIRE_FQDN_ENV, Some(DEFAULT_REQUIRE_FQDN))?,
            trust_proxy: get_parsed_env(&lookup, TRUST_PROXY_ENV, Some(DEFAULT_TRUST_PROXY))?,
        })
    }
}
