//! CLI configuration: thin wrapper around `estoque_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --locale, --timeout).

use estoque_core::InventoryConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use estoque_config::{
    Config, ConfigError, Defaults, Profile, config_path, load_config, parse_locale,
    profile_to_inventory_config, save_config, validate_api_url,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Translate the active profile + global flags into an `InventoryConfig`.
///
/// Flag overrides take priority over profile values, profile values over
/// `[defaults]`. An unknown profile is only tolerated when `--api-url`
/// supplies the address outright.
pub fn resolve_inventory_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<InventoryConfig, CliError> {
    let name = active_profile_name(global, config);
    let profile = match config.profile(&name) {
        Ok(profile) => profile,
        Err(ConfigError::UnknownProfile { .. }) if global.api_url.is_some() => Profile::default(),
        Err(ConfigError::UnknownProfile { profile }) => {
            let available = config.profiles.keys().cloned().collect::<Vec<_>>();
            return Err(CliError::ProfileNotFound {
                name: profile,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        Err(other) => return Err(other.into()),
    };

    // Flags (and their env vars) win over the profile's own values.
    let merged = Profile {
        api_url: global.api_url.clone().unwrap_or(profile.api_url),
        timeout: global.timeout.or(profile.timeout),
        locale: global.locale.clone().or(profile.locale),
    };
    profile_to_inventory_config(&merged, &config.defaults).map_err(CliError::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use estoque_core::CurrencyFormat;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["estoque"];
        argv.extend_from_slice(args);
        argv.push("list");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_loja() -> Config {
        let mut config = Config::default();
        config.profiles.insert(
            "loja".into(),
            Profile {
                api_url: "http://10.0.0.5:5000/api/produtos".into(),
                timeout: Some(7),
                locale: Some("en-US".into()),
            },
        );
        config
    }

    #[test]
    fn flags_override_profile() {
        let config = config_with_loja();
        let opts = global(&[
            "--profile",
            "loja",
            "--api-url",
            "http://127.0.0.1:8080/api/produtos",
            "--timeout",
            "3",
        ]);
        let resolved = resolve_inventory_config(&opts, &config).unwrap();
        assert_eq!(resolved.base_url, "http://127.0.0.1:8080/api/produtos");
        assert_eq!(resolved.timeout, Duration::from_secs(3));
        assert_eq!(resolved.currency, CurrencyFormat::EnUs);
    }

    #[test]
    fn unknown_profile_lists_available() {
        let config = config_with_loja();
        let err = resolve_inventory_config(&global(&["--profile", "deposito"]), &config)
            .unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "deposito");
                assert_eq!(available, "loja");
            }
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn unknown_profile_with_url_flag_builds_from_flags() {
        let opts = global(&[
            "--profile",
            "deposito",
            "--api-url",
            "http://127.0.0.1:8080/api/produtos",
        ]);
        let resolved = resolve_inventory_config(&opts, &Config::default()).unwrap();
        assert_eq!(resolved.base_url, "http://127.0.0.1:8080/api/produtos");
        assert_eq!(resolved.timeout, Duration::from_secs(30));
        assert_eq!(resolved.currency, CurrencyFormat::PtBr);
    }

    #[test]
    fn bad_locale_flag_is_a_usage_error() {
        let err = resolve_inventory_config(&global(&["--locale", "fr-FR"]), &Config::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }
}
