use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Use it in tests
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; only malformed values are rejected.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("CONSULTAVD_ENV", "development"))?;

    let api_url = or_default("CONSULTAVD_API_URL", "http://localhost:8000");
    check_api_url("CONSULTAVD_API_URL", &api_url)?;
    let api_token = lookup("CONSULTAVD_API_TOKEN")
        .ok()
        .filter(|token| !token.is_empty());
    let log_level = or_default("CONSULTAVD_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("CONSULTAVD_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CONSULTAVD_USER_AGENT", "consultavd/0.1 (command-center)");
    let store_search_debounce_ms = parse_u64("CONSULTAVD_STORE_SEARCH_DEBOUNCE_MS", "300")?;
    let store_search_min_chars = parse_usize("CONSULTAVD_STORE_SEARCH_MIN_CHARS", "2")?;

    let page_size = parse_usize("CONSULTAVD_PAGE_SIZE", "20")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CONSULTAVD_PAGE_SIZE".to_string(),
            reason: "page size must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        api_url,
        api_token,
        log_level,
        request_timeout_secs,
        user_agent,
        store_search_debounce_ms,
        store_search_min_chars,
        page_size,
    })
}

/// Rejects base URLs without an `http://` or `https://` scheme. `source`
/// names the variable or flag the value came from.
pub(crate) fn check_api_url(source: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar {
            var: source.to_string(),
            reason: format!("expected an http(s) URL, got '{url}'"),
        })
    }
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CONSULTAVD_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
