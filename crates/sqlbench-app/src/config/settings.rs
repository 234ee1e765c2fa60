//! Settings loading and override resolution

use std::path::{Path, PathBuf};

use sqlbench_api::Endpoints;
use sqlbench_core::prelude::*;

use super::types::Settings;

pub const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "sqlbench";

/// Practice backend override
pub const ENV_API_URL: &str = "SQLBENCH_API_URL";
/// Suggestor backend override
pub const ENV_SUGGESTOR_URL: &str = "SQLBENCH_SUGGESTOR_URL";

/// `<config_dir>/sqlbench/config.toml`, when the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `config_path`.
///
/// A missing or unreadable file falls back to defaults; the app always starts.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Apply `SQLBENCH_API_URL` / `SQLBENCH_SUGGESTOR_URL` when set and non-empty
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(
        settings,
        &ConfigOverrides {
            api_url: env_value(ENV_API_URL),
            suggestor_url: env_value(ENV_SUGGESTOR_URL),
        },
    );
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Explicit backend addresses, e.g. from the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub suggestor_url: Option<String>,
}

pub fn apply_overrides(settings: &mut Settings, overrides: &ConfigOverrides) {
    if let Some(url) = &overrides.api_url {
        debug!("Practice backend overridden: {}", url);
        settings.api.base_url = url.clone();
    }
    if let Some(url) = &overrides.suggestor_url {
        debug!("Suggestor backend overridden: {}", url);
        settings.api.suggestor_url = url.clone();
    }
}

/// Validate the configured addresses into the endpoint table
pub fn endpoints_from(settings: &Settings) -> Result<Endpoints> {
    Endpoints::new(
        &settings.api.base_url,
        &settings.api.resolved_suggestor_url(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_settings(&dir.path().join(CONFIG_FILENAME));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://127.0.0.1:9000"
request_timeout_ms = 2500

[editor]
use_starter_query = true
"#,
        )
        .unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.api.request_timeout_ms, 2500);
        assert!(settings.editor.use_starter_query);
        assert_eq!(settings.search.actor_limit, 10);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var(ENV_API_URL, "http://env-api:3001");
        std::env::set_var(ENV_SUGGESTOR_URL, "  ");

        let mut settings = Settings::default();
        apply_env_overrides(&mut settings);

        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_SUGGESTOR_URL);

        assert_eq!(settings.api.base_url, "http://env-api:3001");
        assert_eq!(
            settings.api.resolved_suggestor_url(),
            "http://env-api:3001/suggestor"
        );
    }

    #[test]
    #[serial]
    fn test_no_env_leaves_settings_alone() {
        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_SUGGESTOR_URL);
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_endpoints_from_rejects_bad_scheme() {
        let mut settings = Settings::default();
        settings.api.base_url = "ftp://example.com".to_string();
        let err = endpoints_from(&settings).unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration"));

        assert!(endpoints_from(&Settings::default()).is_ok());
    }
}
