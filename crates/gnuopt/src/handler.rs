//! Presentation layer around [`Schema`]: program name handling, usage error
//! reporting and help output.

use std::io::Write;

use crate::error::{Error, Result, UsageError};
use crate::matches::Matches;
use crate::parser::ParseOutcome;
use crate::schema::Schema;
use crate::usage;

const DEFAULT_SCRIPT_NAME: &str = "program";

/// Exit status used for usage errors.
pub const USAGE_EXIT_CODE: i32 = 2;

#[derive(Debug, Clone)]
pub struct Handler {
    schema: Schema,
    script_name: String,
    error_handling: bool,
    terse_usage: bool,
    extra_help: Option<String>,
}

impl Handler {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
            error_handling: true,
            terse_usage: false,
            extra_help: None,
        }
    }

    /// Return usage errors from [`Handler::parse`] instead of reporting them
    /// and exiting.
    pub fn disable_error_handling(mut self) -> Self {
        self.error_handling = false;
        self
    }

    /// Show `[OPTION]...` instead of every option in the usage line.
    pub fn terse_usage(mut self) -> Self {
        self.terse_usage = true;
        self
    }

    /// Text appended below the generated help.
    pub fn extra_help(mut self, text: impl Into<String>) -> Self {
        self.extra_help = Some(text.into());
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Program name, taken from the first token of the last parsed argv.
    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    pub fn usage(&self) -> Result<String> {
        Ok(usage::usage_string(&self.script_name, &self.schema, self.terse_usage)?)
    }

    pub fn help(&self) -> Result<String> {
        Ok(usage::help_text(&self.schema, self.extra_help.as_deref())?)
    }

    /// Full help screen: usage line followed by the option list.
    pub fn help_message(&self) -> Result<String> {
        Ok(format!("Usage: {}\n{}", self.usage()?, self.help()?))
    }

    /// Report for a usage error, as printed by [`Handler::parse`].
    pub fn usage_error_message(&self, err: &UsageError) -> Result<String> {
        let mut out = format!("{}: {err}\n", self.script_name);
        out.push_str(&format!("Usage: {}\n", self.usage()?));

        let help = self.schema.help_option()?;
        if let Some(help) = help {
            let spelling = help
                .long()
                .map(|l| format!("--{l}"))
                .or_else(|| help.short().map(|s| format!("-{s}")))
                .unwrap_or_default();
            out.push_str(&format!(
                "Try '{} {spelling}' for more information.\n",
                self.script_name
            ));
        }
        Ok(out)
    }

    /// Parse `argv`, whose first element is the program name. Never exits.
    pub fn try_parse<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<ParseOutcome> {
        let tokens = match argv.split_first() {
            Some((script, rest)) => {
                self.script_name = script.as_ref().to_string();
                rest
            }
            None => argv,
        };
        tracing::debug!(script = %self.script_name, tokens = tokens.len(), "parsing argv");
        self.schema.parse(tokens)
    }

    /// Parse `argv`, whose first element is the program name.
    ///
    /// A help request prints the help screen to stdout and exits with 0.
    /// A usage error prints a report to stderr and exits with
    /// [`USAGE_EXIT_CODE`], unless error handling was disabled. Configuration
    /// errors are always returned.
    pub fn parse<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<Matches> {
        match self.try_parse(argv) {
            Ok(ParseOutcome::Parsed(m)) => Ok(m),
            Ok(ParseOutcome::Help) => {
                let text = self.help_message()?;
                if let Err(e) = write_and_flush(&mut std::io::stdout().lock(), &text) {
                    tracing::warn!(error = %e, "failed to write help");
                }
                std::process::exit(0);
            }
            Err(Error::Usage(e)) if self.error_handling => {
                let text = self.usage_error_message(&e)?;
                report(&mut std::io::stderr().lock(), &mut std::io::stdout().lock(), &text);
                std::process::exit(USAGE_EXIT_CODE);
            }
            Err(e) => Err(e),
        }
    }

    /// Parse the process arguments.
    pub fn from_env(&mut self) -> Result<Matches> {
        let argv: Vec<String> = std::env::args().collect();
        self.parse(&argv)
    }
}

fn write_and_flush(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Write `text` to `primary`, falling back to `fallback` if that fails.
fn report(primary: &mut impl Write, fallback: &mut impl Write, text: &str) {
    if let Err(e) = write_and_flush(primary, text) {
        tracing::debug!(error = %e, "stderr unavailable, reporting on stdout");
        if let Err(e) = write_and_flush(fallback, text) {
            tracing::warn!(error = %e, "failed to report usage error");
        }
    }
}
