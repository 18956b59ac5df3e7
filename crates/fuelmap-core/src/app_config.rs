use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where the two station documents come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Remote {
        locations_url: String,
        prices_url: String,
    },
    Local {
        locations_path: PathBuf,
        prices_path: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub sources: SourceConfig,
    pub max_radius_km: f64,
    pub map_zoom: u8,
    pub geolocation_timeout_ms: u64,
    pub geolocation_high_accuracy: bool,
    pub geolocation_url: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub cache_bust: bool,
}
