//! Shared output layer for human/JSON parity across CLI commands.

use std::io::{self, Write};

use csb_core::{ErrorCode, RosterError};
use serde::Serialize;

/// Shared width for human separators.
pub const RULE_WIDTH: usize = 48;

/// Write a horizontal separator used by human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// The output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }
}

/// Render `value` as pretty JSON or through `human_fn`.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => {
            human_fn(value, &mut out)?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ErrorOutput<'a> {
    error_code: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}

/// Render a [`RosterError`] to stderr with its code and hint.
pub fn render_roster_error(mode: OutputMode, error: &RosterError) -> anyhow::Result<()> {
    render_error(mode, error.code(), &error.to_string())
}

/// Render an error to stderr as `{"error": {...}}` or `error[E####]: ...`.
pub fn render_error(mode: OutputMode, code: ErrorCode, message: &str) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(&mut out, mode, code, message)?;
    Ok(())
}

fn write_error(
    w: &mut dyn Write,
    mode: OutputMode,
    code: ErrorCode,
    message: &str,
) -> anyhow::Result<()> {
    let payload = ErrorOutput {
        error_code: code.code(),
        message,
        hint: code.hint(),
    };

    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, &serde_json::json!({ "error": payload }))?;
            writeln!(w)?;
        }
        OutputMode::Human => {
            writeln!(w, "error[{}]: {}", payload.error_code, payload.message)?;
            if let Some(hint) = payload.hint {
                writeln!(w, "  hint: {hint}")?;
            }
        }
    }
    Ok(())
}
