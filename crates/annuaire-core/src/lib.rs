//! Shared data model and configuration for the Conakry business directory.
//!
//! Every other crate in the workspace depends on the types defined here:
//! [`Business`] records and their lifecycle [`BusinessStatus`], the
//! [`Schedule`] variants the hours engine interprets, and the coordinate
//! types the geo crate produces and consumes.

pub mod app_config;
pub mod business;
pub mod config;
pub mod geo;
pub mod schedule;
pub mod seed;
pub mod text;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use business::{Business, BusinessId, BusinessStatus, BusinessSubmission, Category};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{Coordinates, GeoPoint, Precision};
pub use schedule::{DayHours, Schedule};
pub use seed::{load_seed, SeedFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    SeedFileParse(#[source] serde_yaml::Error),

    #[error("seed validation failed: {0}")]
    Validation(String),
}
