use crate::constants::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::errors::{GitoError, GitoResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key. Empty means no credential is configured and the
    /// resolver runs in fallback mode only; that is not an error.
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub log_level: String,
    /// Bootstrap credentials for the single admin account. Loaded from the
    /// environment, never written back to disk.
    #[serde(skip)]
    pub admin_email: String,
    #[serde(skip)]
    pub admin_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            log_level: "info".to_string(),
            admin_email: String::new(),
            admin_password: String::new(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> GitoResult<()> {
    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| GitoError::config_error(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&config_str)
            .map_err(|e| GitoError::config_error(format!("Failed to parse config: {}", e)))?
    } else {
        let config = Config::default();

        fs::create_dir_all(config_path.parent().unwrap_or(&config_path))
            .map_err(|e| GitoError::config_error(format!("Failed to create config directory: {}", e)))?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| GitoError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| GitoError::config_error(format!("Failed to write config file: {}", e)))?;

        config
    };

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    *CONFIG.write().unwrap() = config;

    Ok(())
}

/// The environment wins over the config file for secrets. `GEMINI_API_KEY`
/// is preferred; `API_KEY` is kept for compatibility with older deployments.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(key) = env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
        if !key.trim().is_empty() {
            config.api_key = key;
        }
    }
    if let Ok(email) = env::var("GITO_ADMIN_EMAIL") {
        config.admin_email = email;
    }
    if let Ok(password) = env::var("GITO_ADMIN_PASSWORD") {
        config.admin_password = password;
    }
    if let Ok(level) = env::var("GITO_LOG_LEVEL") {
        config.log_level = level;
    }
}

fn get_config_path() -> GitoResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| GitoError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("gito").join("config.json"))
}

fn validate_config(config: &Config) -> GitoResult<()> {
    // An empty api_key is allowed: it selects fallback mode.
    if config.model.is_empty() {
        return Err(GitoError::config_error("Model name is required"));
    }

    if config.temperature < 0.0 || config.temperature > 1.0 {
        return Err(GitoError::config_error(
            "Temperature must be between 0.0 and 1.0",
        ));
    }

    if config.max_output_tokens == 0 {
        return Err(GitoError::config_error(
            "max_output_tokens must be greater than 0",
        ));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config_default_is_valid() {
        // No credential configured must still validate: that is fallback mode.
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_empty_model() {
        let mut config = Config::default();
        config.model = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_temperature() {
        let mut config = Config::default();
        config.temperature = 1.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_zero_max_tokens() {
        let mut config = Config::default();
        config.max_output_tokens = 0;
        assert!(validate_config(&config).is_err());
    }
}
