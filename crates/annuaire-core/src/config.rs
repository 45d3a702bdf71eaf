use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Largest offset from UTC observed in practice (UTC+14:00).
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_i32 = |var: &str, default: &str| -> Result<i32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i32>().map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("ANNUAIRE_ENV", "development"))?;
    let log_level = or_default("ANNUAIRE_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("ANNUAIRE_DATA_DIR", "./data"));
    let seed_path = PathBuf::from(or_default(
        "ANNUAIRE_SEED_PATH",
        "./config/businesses.yaml",
    ));

    let default_radius_km = parse_f64("ANNUAIRE_DEFAULT_RADIUS_KM", "5")?;
    if !default_radius_km.is_finite() || default_radius_km <= 0.0 {
        return Err(invalid(
            "ANNUAIRE_DEFAULT_RADIUS_KM",
            format!("radius must be a positive number of kilometers, got {default_radius_km}"),
        ));
    }

    let utc_offset_minutes = parse_i32("ANNUAIRE_UTC_OFFSET_MINUTES", "0")?;
    if utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        return Err(invalid(
            "ANNUAIRE_UTC_OFFSET_MINUTES",
            format!("offset must be within ±{MAX_UTC_OFFSET_MINUTES} minutes"),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        seed_path,
        default_radius_km,
        utc_offset_minutes,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ANNUAIRE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
