//! Process-level configuration.
//!
//! [`Settings`] is built once at startup and handed by reference to
//! [`crate::bootstrap::AppBuilder`]; nothing mutates it afterwards.
//! [`ServerConfig`] covers the listener address and is parsed from CLI flags
//! or the `HOST` / `PORT` environment variables.

use clap::Args;
use serde::{Deserialize, Serialize};

/// Cross-origin resource sharing policy.
///
/// Each list may contain `"*"` to allow anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsSettings {
    pub enabled: bool,
    pub allow_origins: Vec<String>,
    pub allow_credentials: bool,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
}

/// All configuration parameters of an application built on `service_kit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub cors: CorsSettings,
}

impl Settings {
    /// The fixed configuration every service starts with: CORS on, every
    /// origin, method and header allowed, credentials allowed.
    pub fn default_settings() -> Self {
        Self {
            cors: CorsSettings {
                enabled: true,
                allow_origins: vec!["*".to_string()],
                allow_credentials: true,
                allow_methods: vec!["*".to_string()],
                allow_headers: vec!["*".to_string()],
            },
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::default_settings()
    }
}

/// Where the standalone listener binds.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ServerConfig {
    /// Interface to bind to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        server: ServerConfig,
    }

    #[test]
    fn test_default_settings_are_fully_permissive() {
        let settings = Settings::default_settings();

        assert!(settings.cors.enabled);
        assert!(settings.cors.allow_credentials);
        assert_eq!(settings.cors.allow_origins, vec!["*"]);
        assert_eq!(settings.cors.allow_methods, vec!["*"]);
        assert_eq!(settings.cors.allow_headers, vec!["*"]);
        assert_eq!(Settings::default(), settings);
    }

    #[test]
    fn test_server_config_flags_override_defaults() {
        let cli = TestCli::parse_from(["test", "--host", "127.0.0.1", "--port", "8080"]);
        assert_eq!(cli.server.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_server_config_default_address() {
        assert_eq!(ServerConfig::default().address(), "0.0.0.0:3000");
    }
}
