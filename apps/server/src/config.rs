//! Server configuration module.
//!
//! Configuration is loaded from `PERLA_*` environment variables with
//! fallback to defaults suitable for a studio machine on a LAN.

use std::env;
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on.
    pub port: u16,

    /// Directory the web UI is served from.
    pub web_root: PathBuf,

    /// Directory the JSON documents live in.
    pub data_dir: PathBuf,

    /// Exact origins allowed by CORS.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Environment Variables
    /// - `PERLA_PORT`: listen port (default 8080)
    /// - `PERLA_WEB_ROOT`: static asset directory (default `./web`)
    /// - `PERLA_DATA_DIR`: document directory (default `./data`)
    /// - `PERLA_ALLOWED_ORIGINS`: comma-separated CORS allow-list
    ///   (default: localhost and 127.0.0.1 on the listen port)
    pub fn load() -> Result<Self, ConfigError> {
        let port: u16 = env::var("PERLA_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PERLA_PORT".to_string()))?;

        let web_root =
            PathBuf::from(env::var("PERLA_WEB_ROOT").unwrap_or_else(|_| "./web".to_string()));

        let data_dir =
            PathBuf::from(env::var("PERLA_DATA_DIR").unwrap_or_else(|_| "./data".to_string()));

        let allowed_origins = match env::var("PERLA_ALLOWED_ORIGINS") {
            Ok(list) => list
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            Err(_) => vec![
                format!("http://localhost:{}", port),
                format!("http://127.0.0.1:{}", port),
            ],
        };

        Ok(ServerConfig {
            port,
            web_root,
            data_dir,
            allowed_origins,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
