//! Terminal output helpers, dual-mode: styled text for humans, structured JSON for machines.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for structured data
//! - `indicatif` for spinners

use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn envelope(level: &str, message: &str, data: Option<&JsonValue>) -> String {
    let msg = Msg {
        level,
        message,
        data,
    };
    serde_json::to_string(&msg).unwrap_or_else(|_| {
        serde_json::json!({ "level": level, "message": message }).to_string()
    })
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    println!("{}", envelope(level, message, data));
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn error(text: &str) {
    if is_json() {
        eprintln!("{}", envelope("error", text, None));
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).dim());
    }
}

/// Emit a serializable value. Text mode prints it as pretty JSON.
pub fn data<T: Serialize>(label: &str, value: &T) {
    let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
    if is_json() {
        emit_json("data", label, Some(&json_val));
    } else {
        let formatted =
            serde_json::to_string_pretty(&json_val).unwrap_or_else(|_| format!("{label}: <?>"));
        println!("{formatted}");
    }
}

/// Print a document body as-is. JSON mode wraps it as `{label: text}`.
pub fn document(label: &str, text: &str) {
    if is_json() {
        let data = serde_json::json!({ label: text });
        emit_json("data", label, Some(&data));
    } else {
        print!("{text}");
        if !text.ends_with('\n') {
            println!();
        }
    }
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if is_json() {
        let data = serde_json::json!({ key: value });
        emit_json("info", key, Some(&data));
    } else {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

// ── Tables ─────────────────────────────────────────────────────────

/// Create a styled table with a bold cyan header row.
pub fn table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            columns
                .iter()
                .map(|c| Cell::new(c).fg(Color::Cyan).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

/// Print a table (JSON mode emits the items array instead).
pub fn table_print(table: &Table, items: &[JsonValue]) {
    if is_json() {
        let data = serde_json::json!({ "items": items });
        emit_json("list", "", Some(&data));
    } else {
        println!("{table}");
    }
}

// ── Spinners ───────────────────────────────────────────────────────

/// Create a spinner for async operations. Hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Finish spinner with success message.
pub fn spinner_success(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    if is_json() {
        emit_json("success", message, None);
    } else {
        println!("{} {}", style("✓").green(), message);
    }
}

/// Finish spinner with error message.
pub fn spinner_error(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    if is_json() {
        eprintln!("{}", envelope("error", message, None));
    } else {
        eprintln!("{} {}", style("✗").red(), message);
    }
}
