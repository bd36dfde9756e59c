//! Clap derive structures for the `estoque` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// estoque -- inventory and low-stock management from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "estoque",
    version,
    about = "Manage store inventory from the command line",
    long_about = "List stock items, spot low-stock products, and edit or delete\n\
        items through the inventory REST API (/api/produtos).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "ESTOQUE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Inventory collection URL (overrides profile)
    #[arg(long, env = "ESTOQUE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Currency locale: pt-BR or en-US (overrides profile)
    #[arg(long, env = "ESTOQUE_LOCALE", global = true)]
    pub locale: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "ESTOQUE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ESTOQUE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// The `--output` flag, else `fallback` (the config default), else table.
    pub fn output_format(&self, fallback: &str) -> OutputFormat {
        self.output
            .clone()
            .or_else(|| <OutputFormat as ValueEnum>::from_str(fallback, true).ok())
            .unwrap_or(OutputFormat::Table)
    }

    /// The `--color` flag, else `fallback` (the config default), else auto.
    pub fn color_mode(&self, fallback: &str) -> ColorMode {
        self.color
            .clone()
            .or_else(|| <ColorMode as ValueEnum>::from_str(fallback, true).ok())
            .unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List stock items
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one item
    Get {
        /// Item ID
        id: i64,
    },

    /// Create an item
    #[command(alias = "new")]
    Add(AddArgs),

    /// Change an item's name, quantity, or price
    Edit(EditArgs),

    /// Delete an item (asks for confirmation unless --yes)
    #[command(alias = "rm")]
    Delete {
        /// Item ID
        id: i64,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Item Arguments ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only items at or below the low-stock threshold
    #[arg(long, short = 'l')]
    pub low_stock: bool,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Item name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Size label (e.g. P, M, G, 42)
    #[arg(long, short = 's')]
    pub size: Option<String>,

    /// Free-text description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Units in stock; non-numeric input is stored as 0
    #[arg(long, default_value = "0")]
    pub quantity: String,

    /// Unit price, `.` as decimal separator; non-numeric input is stored as 0
    #[arg(long, default_value = "0")]
    pub price: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Item ID
    pub id: i64,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New quantity; fractions are floored, non-numeric input is stored as 0
    #[arg(long)]
    pub quantity: Option<String>,

    /// New unit price; rounded to cents, non-numeric input is stored as 0
    #[arg(long)]
    pub price: Option<String>,
}

// ── Config & Completions ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file (guided when run interactively)
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display the current configuration
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
