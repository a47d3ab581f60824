//! Process configuration read from environment variables.
//!
//! | Variable          | Meaning                                            |
//! |-------------------|----------------------------------------------------|
//! | `TODO_BIND`       | Full socket address to listen on.                  |
//! | `PORT`            | Port on `127.0.0.1`, used when `TODO_BIND` unset.   |
//! | `TODO_PUBLIC_URL` | External base URL for links; else the Host header. |
//! | `TODO_LOG_JSON`   | `1`/`true` to emit JSON log lines.                 |
//!
//! Log filtering is left to `RUST_LOG` (see `telemetry::init_tracing`).

use std::net::SocketAddr;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TODO_BIND `{value}`: {source}")]
    InvalidBind {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid PORT `{value}`: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub public_url: Option<String>,
    pub log_json: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup("TODO_BIND") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidBind { value, source })?,
            None => {
                let port = match lookup("PORT") {
                    Some(value) => value
                        .trim()
                        .parse::<u16>()
                        .map_err(|source| ConfigError::InvalidPort { value, source })?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::from(([127, 0, 0, 1], port))
            }
        };

        let public_url = lookup("TODO_PUBLIC_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let log_json = lookup("TODO_LOG_JSON")
            .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes" | "YES"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            public_url,
            log_json,
        })
    }
}
