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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory holding the JSON documents for each pool.
    pub data_dir: PathBuf,
    pub seed_path: PathBuf,
    /// Radius used by proximity queries when the caller gives none.
    pub default_radius_km: f64,
    /// Offset from UTC applied when computing live opening status.
    pub utc_offset_minutes: i32,
}
