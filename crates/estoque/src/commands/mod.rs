//! Command dispatch: bridges CLI args -> coordinator calls -> output formatting.

pub mod config_cmd;
pub mod items;
pub mod util;

use estoque_core::MutationCoordinator;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::config::Defaults;
use crate::error::CliError;
use crate::output;

/// Presentation settings shared by every handler, resolved once from
/// flags and the config file's `[defaults]`.
#[derive(Debug, Clone)]
pub struct Presentation {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Presentation {
    pub fn resolve(global: &GlobalOpts, defaults: &Defaults) -> Self {
        Self {
            format: global.output_format(&defaults.output),
            color: output::should_color(&global.color_mode(&defaults.color)),
            quiet: global.quiet,
            yes: global.yes,
        }
    }
}

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    coordinator: &MutationCoordinator,
    view: &Presentation,
) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => items::list(coordinator, &args, view).await,
        Command::Get { id } => items::get(coordinator, id, view).await,
        Command::Add(args) => items::add(coordinator, args, view).await,
        Command::Edit(args) => items::edit(coordinator, args, view).await,
        Command::Delete { id } => items::delete(coordinator, id, view).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
