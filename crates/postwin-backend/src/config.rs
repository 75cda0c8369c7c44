use std::path::PathBuf;

use directories::ProjectDirs;
use postwin_bridge::config::Config;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Default base URL of the detection service, matching its local
/// development port.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Environment variable that overrides the detection service base URL.
pub const API_BASE_URL_ENV: &str = "POSTWIN_API_URL";

/// Errors that can occur while loading or resolving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directories. This
    /// usually occurs when required environment variables are missing (e.g.,
    /// `$HOME` on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the configuration to TOML (e.g., when saving changes).
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

fn build_config_dir() -> Result<PathBuf, ConfigError> {
    match ProjectDirs::from("dev", "postwin", "postwin") {
        Some(path) => Ok(path.config_dir().to_path_buf()),
        None => Err(ConfigError::DirectoriesNotFound),
    }
}

/// Loads the application configuration from disk, writing the defaults on
/// first run.
pub async fn load_config() -> Result<Config, ConfigError> {
    let config_dir = build_config_dir()?;

    let config_path = config_dir.join("config.toml");
    log::info!("Loading configuration from {config_path:?}");
    if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        let config: Config = toml::from_str(&contents)?;
        return Ok(config);
    }

    let config = Config::default();
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(config_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(config)
}

/// Saves the current configuration to disk. This function serializes the
/// provided `Config` to pretty-printed TOML and writes it to `config.toml` in
/// the user's configuration directory, overwriting any existing file.
pub async fn save_config(config: &Config) -> Result<(), ConfigError> {
    let config_dir = build_config_dir()?;

    let config_path = config_dir.join("config.toml");
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(config_path)
        .await?;

    let contents = toml::to_string_pretty(config)?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(())
}

/// Resolves the detection service base URL: environment override first, then
/// the configured value, then the local default.
pub fn resolve_api_base_url(config: &Config) -> String {
    resolve_api_base_url_from(std::env::var(API_BASE_URL_ENV).ok(), config)
}

fn resolve_api_base_url_from(env_override: Option<String>, config: &Config) -> String {
    env_override
        .filter(|value| !value.is_empty())
        .or_else(|| config.detection.api_base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_prefers_env_then_config_then_default() {
        let mut config = Config::default();
        assert_eq!(
            resolve_api_base_url_from(None, &config),
            DEFAULT_API_BASE_URL
        );

        config.detection.api_base_url = Some("http://posture.lan:8000".to_string());
        assert_eq!(
            resolve_api_base_url_from(None, &config),
            "http://posture.lan:8000"
        );

        assert_eq!(
            resolve_api_base_url_from(Some("http://override:9999".to_string()), &config),
            "http://override:9999"
        );
        assert_eq!(
            resolve_api_base_url_from(Some(String::new()), &config),
            "http://posture.lan:8000"
        );
    }
}
