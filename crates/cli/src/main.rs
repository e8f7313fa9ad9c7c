mod render;
mod schema_file;

use anyhow::{Context, Result};
use clap::Parser;
use gnuopt::{Handler, Schema};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::render::{Format, render};
use crate::schema_file::load_schema_file;

#[derive(Parser)]
#[command(name = "gnuopt")]
#[command(
    version,
    about = "Parse a command line against a JSON option schema",
    long_about = None
)]
struct Cli {
    /// JSON schema file ("-" reads stdin; default: no options or arguments)
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Program name shown in usage and help output
    #[arg(short, long, value_name = "PROG", default_value = "program")]
    name: String,

    /// Tokens to parse (pass them after `--`)
    #[arg(value_name = "TOKENS", trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let (schema, extra_help, terse_usage) = match &cli.schema {
        Some(path) => {
            let file = load_schema_file(path)?;
            let schema = file
                .to_schema()
                .with_context(|| format!("invalid schema: {}", path.display()))?;
            (schema, file.extra_help, file.terse_usage)
        }
        None => (Schema::new(), None, false),
    };

    let mut handler = Handler::new(schema);
    if let Some(text) = extra_help {
        handler = handler.extra_help(text);
    }
    if terse_usage {
        handler = handler.terse_usage();
    }

    let argv: Vec<&str> = std::iter::once(cli.name.as_str())
        .chain(cli.tokens.iter().map(String::as_str))
        .collect();
    tracing::debug!(tokens = cli.tokens.len(), "parsing command line");

    // Help and usage errors exit from inside the handler.
    let matches = handler.parse(&argv)?;

    let out = render(&matches, cli.format)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(out.as_bytes())
        .context("failed to write output")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
