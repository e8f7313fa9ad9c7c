//! Usage line and help text rendering.

use crate::config::{ArgumentConfig, OptionConfig};
use crate::error::ConfigError;
use crate::schema::Schema;

fn format_option_usage(def: &OptionConfig) -> String {
    let mut out = String::new();
    if let Some(s) = def.short() {
        out.push('-');
        out.push(s);
        if def.long().is_some() {
            out.push('|');
        }
    }
    if let Some(l) = def.long() {
        out.push_str(&format!("--{l}"));
    }
    if let Some(a) = def.argument() {
        out.push_str(&format!(" {}", a.to_ascii_uppercase()));
    }
    if !def.required() {
        out = format!("[{out}]");
    }
    if def.multiple() {
        out.push_str("...");
    }
    out
}

fn format_argument_usage(def: &ArgumentConfig) -> String {
    let mut out = def
        .name()
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| "ARGUMENT".to_string());
    if !def.required() {
        out = format!("[{out}]");
    }
    if def.multiple() {
        out.push_str("...");
    }
    out
}

fn format_option_left(def: &OptionConfig) -> String {
    let mut names: Vec<String> = Vec::new();
    if let Some(s) = def.short() {
        names.push(format!("-{s}"));
    }
    if let Some(l) = def.long() {
        names.push(format!("--{l}"));
    }
    let mut out = names.join(", ");
    if let Some(a) = def.argument() {
        out.push_str(&format!("={}", a.to_ascii_uppercase()));
    }
    out
}

/// Render the usage line: `<script> [-v|--verbose] [-o|--output FILE] INPUT [REST]...`.
///
/// With `terse` set, the option list is replaced by `[OPTION]...`.
pub fn usage_string(script: &str, schema: &Schema, terse: bool) -> Result<String, ConfigError> {
    let options = schema.effective_options()?;

    let mut parts: Vec<String> = vec![script.to_string()];
    if terse {
        if !options.is_empty() {
            parts.push("[OPTION]...".to_string());
        }
    } else {
        parts.extend(options.values().map(format_option_usage));
    }
    parts.extend(schema.arguments().values().map(format_argument_usage));

    Ok(parts.join(" "))
}

/// Render one line per option (`-o, --output=FILE    description`), with
/// `extra` appended after a blank line.
pub fn help_text(schema: &Schema, extra: Option<&str>) -> Result<String, ConfigError> {
    let options = schema.effective_options()?;

    let rows: Vec<(String, &str)> = options
        .values()
        .map(|d| (format_option_left(d), d.description().unwrap_or("").trim()))
        .collect();
    let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {}\n", left));
        } else {
            out.push_str(&format!("  {:width$}    {}\n", left, help, width = width));
        }
    }

    if let Some(extra) = extra.filter(|e| !e.trim().is_empty()) {
        out.push('\n');
        out.push_str(extra.trim_end());
        out.push('\n');
    }

    Ok(out)
}
