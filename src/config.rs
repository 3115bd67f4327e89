use chrono::NaiveDate;
use std::{env, net::IpAddr, net::SocketAddr};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid value '{value}' for {key}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Pins the service clock. Unset means the local date.
    pub today: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            today: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            bind_addr: parse_var("BIND_ADDR", |value| value.parse().ok())?
                .unwrap_or(defaults.bind_addr),
            port: parse_var("PORT", |value| value.parse().ok())?.unwrap_or(defaults.port),
            today: parse_var("TRACKER_TODAY", |value| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
            })?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_var<T>(
    key: &'static str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => parse(value.trim())
            .map(Some)
            .ok_or(ConfigError { key, value }),
        Err(_) => Ok(None),
    }
}
