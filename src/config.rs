//! Environment configuration.
//!
//! Two variables, both optional:
//!
//! - `PORT` — listen port, default 3000. Unparseable values fall back to the
//!   default with a warning rather than refusing to start.
//! - `API_KEY` — when set, mutating routes require a matching `x-api-key`
//!   header. When unset the auth gate is open (local dev).

use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(%raw, "PORT is not a valid port number, using default");
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let api_key = std::env::var("API_KEY").ok().filter(|k| !k.is_empty());

        Self { port, api_key }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, api_key: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_open_gate() {
        let config = Config::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.api_key.is_none());
    }
}
