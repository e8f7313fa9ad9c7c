use anyhow::Result;
use clap::ValueEnum;
use gnuopt::{Matches, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Pretty-printed `{ "options": ..., "arguments": ... }` object
    Json,
    /// `NAME='value'` assignments for `eval` in a POSIX shell
    Shell,
}

pub fn render(matches: &Matches, format: Format) -> Result<String> {
    match format {
        Format::Json => {
            let mut out = serde_json::to_string_pretty(matches)?;
            out.push('\n');
            Ok(out)
        }
        Format::Shell => Ok(render_shell(matches)),
    }
}

fn render_shell(matches: &Matches) -> String {
    let mut out = String::new();
    for (name, value) in matches.iter() {
        let rhs = match value {
            Value::List(items) => {
                let words: Vec<String> = items.iter().map(|s| shell_quote(s)).collect();
                if words.is_empty() {
                    "()".to_string()
                } else {
                    format!("( {} )", words.join(" "))
                }
            }
            other => shell_quote(&other.to_string()),
        };
        out.push_str(&format!("{}={rhs}\n", shell_name(name)));
    }
    out
}

/// Single-quote `s`; embedded quotes become `'\''`.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn shell_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
