//! Environment-based server settings.
//!
//! All variables are optional and prefixed with `SEATPLAN_`; invalid values
//! fall back to defaults with a warning rather than aborting startup.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Clone)]
pub struct Settings {
    /// Bind address (`SEATPLAN_HOST`)
    pub host: IpAddr,
    /// Bind port (`SEATPLAN_PORT`)
    pub port: u16,
    /// Allowed CORS origins, comma separated (`SEATPLAN_CORS_ORIGINS`);
    /// `*` allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        if let Ok(host) = env::var("SEATPLAN_HOST") {
            match host.parse() {
                Ok(parsed) => settings.host = parsed,
                Err(_) => tracing::warn!(
                    "invalid SEATPLAN_HOST '{host}', falling back to {}",
                    settings.host
                ),
            }
        }
        if let Ok(port) = env::var("SEATPLAN_PORT") {
            match port.parse() {
                Ok(parsed) => settings.port = parsed,
                Err(_) => tracing::warn!(
                    "invalid SEATPLAN_PORT '{port}', falling back to {}",
                    settings.port
                ),
            }
        }
        if let Ok(origins) = env::var("SEATPLAN_CORS_ORIGINS") {
            let parsed: Vec<String> = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if !parsed.is_empty() {
                settings.cors_origins = parsed;
            }
        }
        settings
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_localhost() {
        let settings = Settings::default();
        assert_eq!(settings.addr().to_string(), "127.0.0.1:3000");
        assert_eq!(settings.cors_origins, vec!["*".to_string()]);
    }
}
