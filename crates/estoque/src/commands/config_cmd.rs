//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::{Input, Select};
use serde::Serialize;
use tabled::Tabled;

use estoque_core::config::DEFAULT_BASE_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::{Presentation, util};

const LOCALES: [&str; 2] = ["pt-BR", "en-US"];

// ── Profiles table ──────────────────────────────────────────────────

#[derive(Serialize)]
struct ProfileEntry {
    name: String,
    api_url: String,
    locale: Option<String>,
    timeout: Option<u64>,
    default: bool,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "API URL")]
    api_url: String,
    #[tabled(rename = "Locale")]
    locale: String,
}

impl From<&ProfileEntry> for ProfileRow {
    fn from(p: &ProfileEntry) -> Self {
        Self {
            marker: if p.default { "*" } else { "" },
            name: p.name.clone(),
            api_url: p.api_url.clone(),
            locale: p.locale.clone().unwrap_or_else(|| "pt-BR".into()),
        }
    }
}

// ── Init ────────────────────────────────────────────────────────────

/// Ask for the profile name, API URL and locale.
fn prompt_profile(global: &GlobalOpts) -> Result<(String, Profile), CliError> {
    let name: String = Input::new()
        .with_prompt("Profile name")
        .default(global.profile.clone().unwrap_or_else(|| "default".into()))
        .interact_text()
        .map_err(util::prompt_err)?;

    let api_url: String = Input::new()
        .with_prompt("Inventory API URL")
        .default(
            global
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
        )
        .validate_with(|input: &String| config::validate_api_url(input).map_err(|e| e.to_string()))
        .interact_text()
        .map_err(util::prompt_err)?;

    let selection = Select::new()
        .with_prompt("Currency format")
        .items(&LOCALES)
        .default(0)
        .interact()
        .map_err(util::prompt_err)?;

    let profile = Profile {
        api_url,
        timeout: global.timeout,
        locale: LOCALES.get(selection).map(|l| (*l).to_owned()),
    };
    Ok((name, profile))
}

/// Build the profile from flags alone.
fn profile_from_flags(global: &GlobalOpts) -> Result<(String, Profile), CliError> {
    let api_url = global
        .api_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.into());
    config::validate_api_url(&api_url)?;
    if let Some(locale) = global.locale.as_deref() {
        config::parse_locale(locale)?;
    }

    let name = global.profile.clone().unwrap_or_else(|| "default".into());
    Ok((
        name,
        Profile {
            api_url,
            timeout: global.timeout,
            locale: global.locale.clone(),
        },
    ))
}

fn init(force: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path();
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.display().to_string(),
        });
    }

    let interactive = std::io::stdin().is_terminal() && !global.yes;
    let (name, profile) = if interactive {
        eprintln!("estoque configuration");
        eprintln!("   Config path: {}\n", path.display());
        prompt_profile(global)?
    } else {
        profile_from_flags(global)?
    };

    let mut cfg = Config {
        default_profile: Some(name.clone()),
        ..Config::default()
    };
    cfg.profiles.insert(name.clone(), profile);

    let written = config::save_config(&cfg)?;
    tracing::info!(path = %written.display(), profile = %name, "config written");
    if !global.quiet {
        eprintln!("Config written to {}", written.display());
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force } => init(force, global),

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let view = Presentation::resolve(global, &cfg.defaults);
            let out = output::render_single(
                &view.format,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("# unrenderable: {e}")),
                |c| c.profile_name(global.profile.as_deref()).to_owned(),
            );
            output::print_output(&out, view.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), false);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let view = Presentation::resolve(global, &cfg.defaults);
            let active = config::active_profile_name(global, &cfg);
            let entries: Vec<ProfileEntry> = cfg
                .profiles
                .iter()
                .map(|(name, p)| ProfileEntry {
                    name: name.clone(),
                    api_url: p.api_url.clone(),
                    locale: p.locale.clone(),
                    timeout: p.timeout,
                    default: *name == active,
                })
                .collect();

            let out = output::render_list(
                &view.format,
                &entries,
                |p| ProfileRow::from(p),
                |p| p.name.clone(),
            );
            output::print_output(&out, view.quiet);
            Ok(())
        }
    }
}
