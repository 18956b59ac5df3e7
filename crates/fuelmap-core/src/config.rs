use crate::app_config::{AppConfig, Environment, SourceConfig};
use crate::ConfigError;

pub const DEFAULT_LOCATIONS_URL: &str =
    "https://publicacionexterna.azurewebsites.net/publicaciones/places";
pub const DEFAULT_PRICES_URL: &str =
    "https://publicacionexterna.azurewebsites.net/publicaciones/prices";

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
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(invalid(var, format!("expected a boolean, got '{raw}'"))),
        }
    };

    let env = parse_environment(&or_default("FUELMAP_ENV", "development"))?;

    let bind_addr = or_default("FUELMAP_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("FUELMAP_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("FUELMAP_LOG_LEVEL", "info");

    // Local snapshot files take precedence, but only as a pair.
    let sources = match (
        lookup("FUELMAP_LOCATIONS_PATH").ok(),
        lookup("FUELMAP_PRICES_PATH").ok(),
    ) {
        (Some(locations), Some(prices)) => SourceConfig::Local {
            locations_path: PathBuf::from(locations),
            prices_path: PathBuf::from(prices),
        },
        (Some(_), None) => {
            return Err(invalid(
                "FUELMAP_PRICES_PATH",
                "must be set together with FUELMAP_LOCATIONS_PATH".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(invalid(
                "FUELMAP_LOCATIONS_PATH",
                "must be set together with FUELMAP_PRICES_PATH".to_string(),
            ))
        }
        (None, None) => SourceConfig::Remote {
            locations_url: or_default("FUELMAP_LOCATIONS_URL", DEFAULT_LOCATIONS_URL),
            prices_url: or_default("FUELMAP_PRICES_URL", DEFAULT_PRICES_URL),
        },
    };

    let max_radius_km = parse_radius(&or_default("FUELMAP_MAX_RADIUS_KM", "50"))?;

    let map_zoom = or_default("FUELMAP_MAP_ZOOM", "12")
        .parse::<u8>()
        .map_err(|e| invalid("FUELMAP_MAP_ZOOM", e.to_string()))?;
    if map_zoom > 19 {
        return Err(invalid(
            "FUELMAP_MAP_ZOOM",
            format!("zoom must be between 0 and 19, got {map_zoom}"),
        ));
    }

    let geolocation_timeout_ms = parse_u64("FUELMAP_GEOLOCATION_TIMEOUT_MS", "10000")?;
    let geolocation_high_accuracy = parse_bool("FUELMAP_GEOLOCATION_HIGH_ACCURACY", "true")?;
    let geolocation_url = lookup("FUELMAP_GEOLOCATION_URL")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let request_timeout_secs = parse_u64("FUELMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("FUELMAP_USER_AGENT", "fuelmap/0.1 (station-locator)");
    let cache_bust = parse_bool("FUELMAP_CACHE_BUST", "true")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        sources,
        max_radius_km,
        map_zoom,
        geolocation_timeout_ms,
        geolocation_high_accuracy,
        geolocation_url,
        request_timeout_secs,
        user_agent,
        cache_bust,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FUELMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Search radius must be a finite, strictly positive number of kilometers.
fn parse_radius(raw: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "FUELMAP_MAX_RADIUS_KM".to_string(),
        reason,
    };
    let value = raw.trim().parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(format!("radius must be positive, got {raw}")));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
