//! fhzec Configuration
//!
//! Shared configuration crate for all fhzec components.
//!
//! Handles loading configuration from:
//! 1. FHZEC_CONFIG env var (explicit path)
//! 2. ./config.toml (current directory)
//! 3. ~/.fhzec/config.toml (user home)
//!
//! Environment variables take precedence over TOML config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::{env, fs};

/// Global config instance for convenience access
pub static GLOBAL_CONFIG: OnceLock<FhzecConfig> = OnceLock::new();

const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_DIR_NAME: &str = ".fhzec";

// ============================================================================
// Default Constants
// ============================================================================

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_REQUIRED_CONFIRMATIONS: u32 = 6;
const DEFAULT_WATCHER_SECRET: &str = "dev-secret-change-in-production";

// ============================================================================
// Config Structs
// ============================================================================

/// Root configuration structure (matches TOML layout)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FhzecConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub watcher: WatcherConfig,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.into(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_cors_origin() -> String {
    DEFAULT_CORS_ORIGIN.into()
}

/// Bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// The fixed Zcash burn address the watcher monitors
    #[serde(default)]
    pub burn_address: String,
    /// Canonical burn script hash (decimal field element, circuit public input)
    #[serde(default)]
    pub burn_script_hash: String,
    /// Confirmations required before a burn counts as finalized
    #[serde(default = "default_required_confirmations")]
    pub required_confirmations: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            burn_address: String::new(),
            burn_script_hash: String::new(),
            required_confirmations: DEFAULT_REQUIRED_CONFIRMATIONS,
        }
    }
}

fn default_required_confirmations() -> u32 {
    DEFAULT_REQUIRED_CONFIRMATIONS
}

/// Watcher authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    #[serde(default = "default_watcher_secret")]
    pub secret: String,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_WATCHER_SECRET.into(),
        }
    }
}

fn default_watcher_secret() -> String {
    DEFAULT_WATCHER_SECRET.into()
}

// ============================================================================
// Environment Variable Helpers
// ============================================================================

/// Set field from env var if present
fn env_string(key: &str, field: &mut String) {
    if let Ok(v) = env::var(key) {
        *field = v;
    }
}

/// Set field from env var if present and parseable
fn env_parse<T: std::str::FromStr>(key: &str, field: &mut T) {
    if let Ok(v) = env::var(key) {
        if let Ok(parsed) = v.parse() {
            *field = parsed;
        }
    }
}

// ============================================================================
// Implementation
// ============================================================================

impl FhzecConfig {
    /// Load configuration from config file with env var overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                log::info!("Loading config from: {}", path.display());
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            None => {
                log::info!("No config file found, using defaults and environment variables");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Find the config file path
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check FHZEC_CONFIG env var
        if let Ok(path) = env::var("FHZEC_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check ./config.toml (current directory)
        let local_path = PathBuf::from(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Some(local_path);
        }

        // 3. Check ~/.fhzec/config.toml
        dirs::home_dir()
            .map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .filter(|p| p.exists())
    }

    /// Apply environment variable overrides (the original deployment's names)
    fn apply_env_overrides(&mut self) {
        // API
        env_parse("PORT", &mut self.api.port);
        env_string("CORS_ORIGIN", &mut self.api.cors_origin);

        // Bridge
        env_string("ZEC_BURN_ADDRESS", &mut self.bridge.burn_address);
        env_string("BURN_SCRIPT_HASH", &mut self.bridge.burn_script_hash);
        env_parse(
            "REQUIRED_CONFIRMATIONS",
            &mut self.bridge.required_confirmations,
        );

        // Watcher
        env_string("WATCHER_SECRET", &mut self.watcher.secret);
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Generate a sample config file
    pub fn generate_sample() -> String {
        let mut sample = Self::default();
        sample.bridge.burn_address = "utest1...".into();
        sample.bridge.burn_script_hash = "0".into();
        toml::to_string_pretty(&sample).unwrap_or_default()
    }

    /// Get the global config instance, initializing it if necessary.
    ///
    /// This is the recommended way to access config in most code.
    /// Falls back to defaults if loading fails.
    pub fn global() -> &'static FhzecConfig {
        GLOBAL_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                log::warn!("Failed to load config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Try to get the global config instance.
    ///
    /// Returns `None` if config hasn't been initialized yet.
    pub fn try_global() -> Option<&'static FhzecConfig> {
        GLOBAL_CONFIG.get()
    }

    /// Initialize the global config with a specific instance.
    ///
    /// Returns `Err(config)` if already initialized.
    pub fn set_global(config: FhzecConfig) -> Result<(), FhzecConfig> {
        GLOBAL_CONFIG.set(config)
    }
}

/// Shorthand for `FhzecConfig::global()`.
#[inline]
pub fn global_config() -> &'static FhzecConfig {
    FhzecConfig::global()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FhzecConfig::default();
        assert_eq!(config.api.port, DEFAULT_PORT);
        assert_eq!(config.api.cors_origin, DEFAULT_CORS_ORIGIN);
        assert_eq!(
            config.bridge.required_confirmations,
            DEFAULT_REQUIRED_CONFIRMATIONS
        );
        assert!(config.bridge.burn_address.is_empty());
        assert_eq!(config.watcher.secret, DEFAULT_WATCHER_SECRET);
    }

    #[test]
    fn test_generate_sample() {
        let sample = FhzecConfig::generate_sample();
        assert!(sample.contains("[api]"));
        assert!(sample.contains("[bridge]"));
        assert!(sample.contains("[watcher]"));
    }

    #[test]
    fn test_parse_sample() {
        let sample = FhzecConfig::generate_sample();
        let parsed: FhzecConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.api.port, DEFAULT_PORT);
        assert_eq!(parsed.bridge.burn_script_hash, "0");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: FhzecConfig =
            toml::from_str("[bridge]\nrequired_confirmations = 3\n").unwrap();
        assert_eq!(parsed.bridge.required_confirmations, 3);
        assert_eq!(parsed.api.port, DEFAULT_PORT);
        assert_eq!(parsed.watcher.secret, DEFAULT_WATCHER_SECRET);
    }

    // The process environment is shared across the test binary, so all env
    // mutation stays inside this single test.
    #[test]
    fn test_env_overrides_win_over_toml() {
        let toml_src = r#"
            [api]
            port = 4000

            [bridge]
            burn_script_hash = "1"
            required_confirmations = 3

            [watcher]
            secret = "from-toml"
        "#;

        env::set_var("PORT", "5000");
        env::set_var("BURN_SCRIPT_HASH", "424242");
        env::set_var("REQUIRED_CONFIRMATIONS", "12");
        env::set_var("WATCHER_SECRET", "from-env");

        let mut config: FhzecConfig = toml::from_str(toml_src).unwrap();
        config.apply_env_overrides();

        assert_eq!(config.api.port, 5000);
        assert_eq!(config.bridge.burn_script_hash, "424242");
        assert_eq!(config.bridge.required_confirmations, 12);
        assert_eq!(config.watcher.secret, "from-env");

        // An unparseable numeric override is ignored, keeping the TOML value.
        env::set_var("REQUIRED_CONFIRMATIONS", "not-a-number");
        let mut config: FhzecConfig = toml::from_str(toml_src).unwrap();
        config.apply_env_overrides();
        assert_eq!(config.bridge.required_confirmations, 3);

        env::remove_var("PORT");
        env::remove_var("BURN_SCRIPT_HASH");
        env::remove_var("REQUIRED_CONFIRMATIONS");
        env::remove_var("WATCHER_SECRET");

        // Without the env vars the TOML values stand.
        let mut config: FhzecConfig = toml::from_str(toml_src).unwrap();
        config.apply_env_overrides();
        assert_eq!(config.api.port, 4000);
        assert_eq!(config.watcher.secret, "from-toml");
    }
}
