//! Shared configuration for the estoque CLI.
//!
//! TOML profiles, environment overrides, and translation to
//! `estoque_core::InventoryConfig`. The CLI adds `GlobalOpts`-aware
//! overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use estoque_core::config::DEFAULT_BASE_URL;
use estoque_core::{CurrencyFormat, InventoryConfig};

/// Environment variable that points at an alternate config file.
pub const CONFIG_PATH_ENV: &str = "ESTOQUE_CONFIG";

/// Name used when neither a flag nor the file picks a profile.
pub const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found in config")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named inventory API profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named inventory API profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Collection URL (e.g., "http://localhost:5000/api/produtos").
    pub api_url: String,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Currency locale: "pt-BR" or "en-US".
    pub locale: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.into(),
            timeout: None,
            locale: None,
        }
    }
}

impl Config {
    /// Name of the profile to use: the explicit one, else the configured
    /// default, else `"default"`.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
    }

    /// Look up a profile. The `"default"` profile always exists and falls
    /// back to the built-in API location when the file does not define it.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.clone()),
            None if name == DEFAULT_PROFILE => Ok(Profile::default()),
            None => Err(ConfigError::UnknownProfile {
                profile: name.into(),
            }),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$ESTOQUE_CONFIG`, else XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("br.com", "brizart", "estoque").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("estoque");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. Missing files are not an error: built-in
/// defaults and `ESTOQUE_*` variables still apply (`__` separates nested
/// keys, e.g. `ESTOQUE_DEFAULTS__TIMEOUT=10`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ESTOQUE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

/// Parse a locale tag into a currency format.
pub fn parse_locale(raw: &str) -> Result<CurrencyFormat, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: "locale".into(),
        reason: format!("expected 'pt-BR' or 'en-US', got '{raw}'"),
    })
}

/// Check that `raw` is an absolute http(s) URL.
pub fn validate_api_url(raw: &str) -> Result<(), ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(())
}

/// Build an `InventoryConfig` from a profile, falling back to `defaults`
/// for the timeout.
pub fn profile_to_inventory_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<InventoryConfig, ConfigError> {
    validate_api_url(&profile.api_url)?;

    let currency = profile
        .locale
        .as_deref()
        .map(parse_locale)
        .transpose()?
        .unwrap_or_default();

    Ok(InventoryConfig {
        base_url: profile.api_url.clone(),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        currency,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.defaults, Defaults::default());
        assert_eq!(config.profile_name(None), "default");
        assert_eq!(config.profile("default").unwrap(), Profile::default());
    }

    #[test]
    fn file_profiles_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "loja"

[defaults]
output = "json"
timeout = 12

[profiles.loja]
api_url = "http://10.0.0.5:5000/api/produtos"
locale = "en-US"
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.defaults.output, "json");
        assert_eq!(config.defaults.color, "auto");

        let name = config.profile_name(None);
        assert_eq!(name, "loja");
        let profile = config.profile(name).unwrap();
        let inventory = profile_to_inventory_config(&profile, &config.defaults).unwrap();
        assert_eq!(
            inventory,
            InventoryConfig {
                base_url: "http://10.0.0.5:5000/api/produtos".into(),
                timeout: Duration::from_secs(12),
                currency: CurrencyFormat::EnUs,
            }
        );
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let config = Config::default();
        assert!(matches!(
            config.profile("deposito"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let defaults = Defaults::default();
        let bad_locale = Profile {
            locale: Some("fr-FR".into()),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_inventory_config(&bad_locale, &defaults),
            Err(ConfigError::Validation { ref field, .. }) if field == "locale"
        ));

        let bad_scheme = Profile {
            api_url: "ftp://example.com/produtos".into(),
            ..Profile::default()
        };
        assert!(profile_to_inventory_config(&bad_scheme, &defaults).is_err());
    }

    #[test]
    fn save_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.profiles.insert(
            "default".into(),
            Profile {
                timeout: Some(5),
                ..Profile::default()
            },
        );
        save_config_to(&config, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), config);
    }
}
