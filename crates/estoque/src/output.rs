//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Paint a low-stock value in bold red when color is on.
pub fn alert(text: &str, color: bool) -> String {
    if color {
        text.red().bold().to_string()
    } else {
        text.to_owned()
    }
}

/// Paint secondary text dimmed when color is on.
pub fn muted(text: &str, color: bool) -> String {
    if color {
        text.dimmed().to_string()
    } else {
        text.to_owned()
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

// Serializing plain data structs cannot fail; an error string stands in
// rather than panicking if it ever does.
fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Thing {
        id: i64,
        name: &'static str,
    }

    #[derive(Tabled)]
    struct ThingRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: &'static str,
    }

    fn row(t: &Thing) -> ThingRow {
        ThingRow {
            id: t.id,
            name: t.name,
        }
    }

    fn things() -> Vec<Thing> {
        vec![Thing { id: 1, name: "Camisa" }, Thing { id: 2, name: "Calça" }]
    }

    #[test]
    fn plain_lists_one_id_per_line() {
        let out = render_list(&OutputFormat::Plain, &things(), row, |t| t.id.to_string());
        assert_eq!(out, "1\n2");
    }

    #[test]
    fn compact_json_is_single_line() {
        let out = render_list(&OutputFormat::JsonCompact, &things(), row, |t| t.id.to_string());
        assert_eq!(out, r#"[{"id":1,"name":"Camisa"},{"id":2,"name":"Calça"}]"#);
    }

    #[test]
    fn table_has_headers_and_rows() {
        let out = render_list(&OutputFormat::Table, &things(), row, |t| t.id.to_string());
        assert!(out.contains("ID"));
        assert!(out.contains("Calça"));
    }

    #[test]
    fn colorless_helpers_pass_text_through() {
        assert_eq!(alert("2", false), "2");
        assert_eq!(muted("-", false), "-");
        assert_ne!(alert("2", true), "2");
    }
}
