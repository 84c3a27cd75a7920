//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.config/create-turbo-sanity/config.yaml)
//! 3. Environment variables (TURBO_SANITY_* prefix)
//! 4. CLI flags (handled by caller)

use super::ScaffoldConfig;
use crate::error::{Error, Result};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/embedded/"]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "defaults.yaml";
const USER_CONFIG_FILE: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Directory holding the user config file
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader rooted at ~/.config/create-turbo-sanity
    pub fn new() -> Result<Self> {
        let home = get_home_dir().map_err(|e| Error::invalid_config(e.to_string()))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Non UTF-8 home directory: {:?}", p)))?;

        Ok(Self {
            config_dir: home.join(".config").join("create-turbo-sanity"),
        })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Path of the user config file (may not exist)
    pub fn user_config_path(&self) -> Utf8PathBuf {
        self.config_dir.join(USER_CONFIG_FILE)
    }

    /// Load configuration with hierarchical precedence
    pub fn load(&self) -> Result<ScaffoldConfig> {
        let mut merged = Self::load_embedded_defaults()?;

        let user_path = self.user_config_path();
        if user_path.exists() {
            debug!("Merging user config from {}", user_path);
            let overlay = Self::load_yaml_file(&user_path)?;
            merge_values(&mut merged, overlay);
        }

        let config: ScaffoldConfig = serde_yaml_ng::from_value(merged)
            .map_err(|e| Error::invalid_config(format!("Failed to parse config: {}", e)))?;

        apply_env_overrides(config)
    }

    fn load_embedded_defaults() -> Result<Value> {
        let embedded_file = EmbeddedConfigs::get(DEFAULTS_FILE).ok_or_else(|| {
            Error::invalid_config(format!("Embedded config not found: {}", DEFAULTS_FILE))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", DEFAULTS_FILE))
        })?;

        Ok(serde_yaml_ng::from_str(content)?)
    }

    fn load_yaml_file(path: &Utf8Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }
}

/// Deep-merge `overlay` into `base`; mappings merge key by key, everything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        // An empty user file parses as null; keep the defaults
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}

fn apply_env_overrides(mut config: ScaffoldConfig) -> Result<ScaffoldConfig> {
    if let Ok(val) = env::var("TURBO_SANITY_API_HOST") {
        config.api.host = val;
    }

    if let Ok(val) = env::var("TURBO_SANITY_API_VERSION") {
        config.api.version = val;
    }

    if let Ok(val) = env::var("TURBO_SANITY_HTTP_TIMEOUT_SECS") {
        config.api.timeout_secs = val.parse().map_err(|_| {
            Error::invalid_config("TURBO_SANITY_HTTP_TIMEOUT_SECS must be a valid number")
        })?;
    }

    if let Ok(val) = env::var("TURBO_SANITY_AUTH_TIMEOUT_SECS") {
        config.auth.wait_timeout_secs = val.parse().map_err(|_| {
            Error::invalid_config("TURBO_SANITY_AUTH_TIMEOUT_SECS must be a valid number")
        })?;
    }

    if let Ok(val) = env::var("TURBO_SANITY_AUTH_POLL_MS") {
        config.auth.poll_interval_ms = val.parse().map_err(|_| {
            Error::invalid_config("TURBO_SANITY_AUTH_POLL_MS must be a valid number")
        })?;
    }

    if let Ok(val) = env::var("TURBO_SANITY_STRICT_PROMPTS") {
        config.prompts.strict_name_validation = val.parse().map_err(|_| {
            Error::invalid_config("TURBO_SANITY_STRICT_PROMPTS must be true or false")
        })?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_VARS: &[&str] = &[
        "TURBO_SANITY_API_HOST",
        "TURBO_SANITY_API_VERSION",
        "TURBO_SANITY_HTTP_TIMEOUT_SECS",
        "TURBO_SANITY_AUTH_TIMEOUT_SECS",
        "TURBO_SANITY_AUTH_POLL_MS",
        "TURBO_SANITY_STRICT_PROMPTS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    fn loader_in(dir: &TempDir) -> HierarchicalConfigLoader {
        HierarchicalConfigLoader::with_dir(Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap())
    }

    #[test]
    #[serial]
    fn test_embedded_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let config = loader_in(&dir).load().unwrap();

        assert_eq!(config.api.base_url(), "https://api.sanity.io/v2023-05-03");
        assert_eq!(config.auth.token_env.as_deref(), Some("SANITY_AUTH_TOKEN"));
        assert_eq!(config.auth.login_command, vec!["npx", "@sanity/cli", "login"]);
        assert_eq!(config.auth.wait_timeout_secs, 10);
        assert!(!config.prompts.strict_name_validation);
        assert_eq!(config.defaults.package_manager, "pnpm");
    }

    #[test]
    #[serial]
    fn test_user_file_merges_over_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "api:\n  host: http://localhost:9999\nprompts:\n  strict_name_validation: true\n",
        )
        .unwrap();

        let config = loader_in(&dir).load().unwrap();

        assert_eq!(config.api.host, "http://localhost:9999");
        // Untouched keys in the same section keep their defaults
        assert_eq!(config.api.version, "v2023-05-03");
        assert!(config.prompts.strict_name_validation);
    }

    #[test]
    #[serial]
    fn test_empty_user_file_keeps_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "").unwrap();

        let config = loader_in(&dir).load().unwrap();
        assert_eq!(config.api.host, "https://api.sanity.io");
    }

    #[test]
    #[serial]
    fn test_env_overrides_win() {
        clear_env();
        let dir = TempDir::new().unwrap();
        env::set_var("TURBO_SANITY_API_HOST", "http://127.0.0.1:1234");
        env::set_var("TURBO_SANITY_AUTH_TIMEOUT_SECS", "2");
        env::set_var("TURBO_SANITY_STRICT_PROMPTS", "true");

        let config = loader_in(&dir).load().unwrap();
        clear_env();

        assert_eq!(config.api.host, "http://127.0.0.1:1234");
        assert_eq!(config.auth.wait_timeout_secs, 2);
        assert!(config.prompts.strict_name_validation);
    }

    #[test]
    #[serial]
    fn test_invalid_env_number_is_config_error() {
        clear_env();
        let dir = TempDir::new().unwrap();
        env::set_var("TURBO_SANITY_AUTH_POLL_MS", "soon");

        let result = loader_in(&dir).load();
        clear_env();

        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_expanded_credential_paths() {
        let dir = TempDir::new().unwrap();
        let config = loader_in(&dir).load_embedded_for_test();
        let paths = config
            .auth
            .expanded_credential_paths(std::path::Path::new("/home/op"));

        assert_eq!(
            paths[0],
            std::path::PathBuf::from("/home/op/.config/sanity/config.json")
        );
        assert_eq!(paths.len(), 2);
    }

    impl HierarchicalConfigLoader {
        fn load_embedded_for_test(&self) -> ScaffoldConfig {
            serde_yaml_ng::from_value(Self::load_embedded_defaults().unwrap()).unwrap()
        }
    }
}
