use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use rand::{thread_rng, RngCore};
use rocket::figment::Figment;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} environment variable is not set")]
    Missing { var: &'static str },
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Connections older than this are discarded and replaced.
    pub recycle_interval: Duration,
    pub acquire_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub session_secret: Option<String>,
    pub address: IpAddr,
    pub port: u16,
}

impl AppConfig {
    /// Reads the configuration from the process environment,
    /// loading a `.env` file first if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|var| dotenv::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing {
                var: "DATABASE_URL",
            })?;

        let database = DatabaseConfig {
            url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            recycle_interval: Duration::from_secs(parse_or(
                &lookup,
                "DATABASE_POOL_RECYCLE_SECS",
                300,
            )?),
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
        };

        Ok(Self {
            database,
            session_secret: lookup("SESSION_SECRET").filter(|secret| !secret.is_empty()),
            address: parse_or(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or(&lookup, "PORT", 5000)?,
        })
    }

    /// Rocket settings derived from this config, layered over Rocket's own
    /// defaults so `ROCKET_*` variables still apply to everything else.
    pub fn figment(&self) -> Figment {
        let secret_key = match &self.session_secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::warn!(
                    "SESSION_SECRET is not set, using a random key; signed cookies will not survive a restart"
                );
                generate_secret_key()
            }
        };

        rocket::Config::figment()
            .merge(("address", self.address.to_string()))
            .merge(("port", self.port))
            .merge(("secret_key", secret_key))
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

/// A hex-encoded 256-bit key in the format Rocket accepts for `secret_key`.
pub fn generate_secret_key() -> String {
    let mut bytes = [0u8; 32];
    thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}
