//! Shared helpers for command handlers.

use std::io::IsTerminal;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal on stdin there is nobody to ask, so `action` fails
/// with a hint to pass `--yes`.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
