//! The token-by-token parsing engine.
//!
//! A [`Parser`] borrows the option and argument configs for a single run:
//! 1. the token loop classifies every token and applies option values,
//! 2. the option pass fills in defaults and runs validators,
//! 3. the argument pass assigns positional tokens to the configured
//!    arguments in registration order.

use std::collections::HashMap;
use std::ops::ControlFlow;

use indexmap::IndexMap;

use crate::config::{ArgumentConfig, OptionConfig};
use crate::cursor::TokenCursor;
use crate::error::{ConfigError, Result, UsageError};
use crate::matches::Matches;
use crate::value::Value;

/// Reserved option key of the help option.
///
/// The option registered under this key never shows up in [`Matches`];
/// matching its short or long spelling ends parsing with
/// [`ParseOutcome::Help`].
pub const HELP_OPTION_NAME: &str = "__help";

/// Successful result of a parser run.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(Matches),
    /// The help option was given; no values were produced.
    Help,
}

impl ParseOutcome {
    pub fn matches(self) -> Option<Matches> {
        match self {
            Self::Parsed(m) => Some(m),
            Self::Help => None,
        }
    }

    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State<'c> {
    Scanning,
    /// The named option consumes the next token as its value.
    AwaitingValue(&'c str),
    /// `--` was seen; every further token is positional.
    PositionalOnly,
}

/// Single-use parser over borrowed option and argument configs.
///
/// ```
/// use gnuopt::{OptionBuilder, ParseOutcome, Parser, Value};
/// use indexmap::IndexMap;
///
/// let mut options = IndexMap::new();
/// options.insert("t".to_string(), OptionBuilder::new().short('t')?.incrementable(1).build()?);
/// let arguments = IndexMap::new();
///
/// let outcome = Parser::new(&options, &arguments).parse(&["-t", "-tt"])?;
/// let ParseOutcome::Parsed(m) = outcome else { unreachable!() };
/// assert_eq!(m.option("t"), Some(&Value::Int(3)));
/// # Ok::<(), gnuopt::Error>(())
/// ```
pub struct Parser<'c> {
    options: &'c IndexMap<String, OptionConfig>,
    arguments: &'c IndexMap<String, ArgumentConfig>,
    short_names: HashMap<char, &'c str>,
    long_names: HashMap<&'c str, &'c str>,
    state: State<'c>,
    values: HashMap<&'c str, Value>,
    used_names: HashMap<&'c str, String>,
    positionals: Vec<String>,
}

impl<'c> Parser<'c> {
    pub fn new(
        options: &'c IndexMap<String, OptionConfig>,
        arguments: &'c IndexMap<String, ArgumentConfig>,
    ) -> Self {
        Self {
            options,
            arguments,
            short_names: HashMap::new(),
            long_names: HashMap::new(),
            state: State::Scanning,
            values: HashMap::new(),
            used_names: HashMap::new(),
            positionals: Vec::new(),
        }
    }

    /// Parse `tokens` (program name already stripped).
    ///
    /// The first violation is returned as an error and no partial result is
    /// exposed.
    pub fn parse<S: AsRef<str>>(mut self, tokens: &[S]) -> Result<ParseOutcome> {
        self.collect_short_long()?;

        if self.process_tokens(tokens)?.is_break() {
            tracing::debug!("help requested");
            return Ok(ParseOutcome::Help);
        }

        let options = self.resolve_options()?;
        let arguments = self.assign_arguments()?;
        tracing::debug!(
            options = options.len(),
            arguments = arguments.len(),
            "parsed command line"
        );
        Ok(ParseOutcome::Parsed(Matches::new(options, arguments)))
    }

    fn collect_short_long(&mut self) -> Result<(), ConfigError> {
        for (name, option) in self.options {
            if let Some(short) = option.short() {
                if let Some(prev) = self.short_names.insert(short, name.as_str()) {
                    return Err(ConfigError::ConflictingAlias {
                        spelling: format!("-{short}"),
                        first: prev.to_string(),
                        second: name.clone(),
                    });
                }
            }
            if let Some(long) = option.long() {
                if let Some(prev) = self.long_names.insert(long, name.as_str()) {
                    return Err(ConfigError::ConflictingAlias {
                        spelling: format!("--{long}"),
                        first: prev.to_string(),
                        second: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Run the token loop. `Break` means the help option was matched.
    fn process_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<ControlFlow<()>> {
        let mut cursor = TokenCursor::new(tokens);

        while let Some(token) = cursor.next() {
            match self.state {
                State::PositionalOnly => {
                    self.positionals.push(token);
                    continue;
                }
                State::AwaitingValue(name) => {
                    tracing::trace!(option = name, value = %token, "option value");
                    self.push_value(name, token);
                    self.state = State::Scanning;
                    continue;
                }
                State::Scanning => {}
            }

            let flow = if token == "--" {
                tracing::trace!("end of options");
                self.state = State::PositionalOnly;
                ControlFlow::Continue(())
            } else if token == "-" {
                self.positionals.push(token);
                ControlFlow::Continue(())
            } else if let Some(body) = token.strip_prefix("--") {
                self.long_option(&token, body, &mut cursor)?
            } else if let Some(bundle) = token.strip_prefix('-') {
                self.short_bundle(&token, bundle)?
            } else {
                tracing::trace!(token = %token, "positional");
                self.positionals.push(token);
                ControlFlow::Continue(())
            };

            if flow.is_break() {
                return Ok(flow);
            }
        }

        if let State::AwaitingValue(name) = self.state {
            let spelling = self
                .used_names
                .get(name)
                .cloned()
                .unwrap_or_else(|| display_name(&self.options[name]));
            return Err(UsageError::MissingOptionArgument(spelling).into());
        }

        Ok(ControlFlow::Continue(()))
    }

    fn long_option<S: AsRef<str>>(
        &mut self,
        token: &str,
        body: &str,
        cursor: &mut TokenCursor<'_, S>,
    ) -> Result<ControlFlow<()>> {
        let name = match body.split_once('=') {
            Some((name, value)) => {
                cursor.inject(value);
                name
            }
            None => body,
        };

        let (name, negated) = match name.strip_prefix("no") {
            Some(rest) if self.is_negatable(rest) => (rest, true),
            _ => (name, false),
        };

        let Some(&option) = self.long_names.get(name) else {
            return Err(UsageError::UnrecognizedOption(token.to_string()).into());
        };
        if option == HELP_OPTION_NAME {
            return Ok(ControlFlow::Break(()));
        }

        tracing::trace!(option, negated, "long option");
        let spelling = if negated {
            format!("--no{name}")
        } else {
            format!("--{name}")
        };
        self.apply(option, spelling, negated);
        Ok(ControlFlow::Continue(()))
    }

    fn short_bundle(&mut self, token: &str, bundle: &str) -> Result<ControlFlow<()>> {
        for (idx, c) in bundle.char_indices() {
            let Some(&option) = self.short_names.get(&c) else {
                return Err(UsageError::UnrecognizedOption(token.to_string()).into());
            };
            if option == HELP_OPTION_NAME {
                return Ok(ControlFlow::Break(()));
            }

            tracing::trace!(option, short = %c, "short option");
            self.apply(option, format!("-{c}"), false);

            if matches!(self.state, State::AwaitingValue(_)) {
                let rest = &bundle[idx + c.len_utf8()..];
                if !rest.is_empty() {
                    tracing::trace!(ignored = rest, "value-taking option ends the bundle");
                }
                break;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn is_negatable(&self, long: &str) -> bool {
        self.long_names
            .get(long)
            .is_some_and(|name| self.options[*name].negatable())
    }

    /// Record one occurrence of option `name`, invoked as `spelling`.
    fn apply(&mut self, name: &'c str, spelling: String, negated: bool) {
        let options = self.options;
        let option = &options[name];
        self.used_names.insert(name, spelling);

        if let Some(step) = option.incrementable() {
            if let Value::Int(count) = self.values.entry(name).or_insert(Value::Int(0)) {
                *count = count.saturating_add(step);
            }
        } else if !option.takes_value() {
            self.values.insert(name, Value::Bool(!negated));
        } else {
            self.state = State::AwaitingValue(name);
        }
    }

    fn push_value(&mut self, name: &'c str, token: String) {
        let options = self.options;
        if options[name].multiple() {
            if let Value::List(items) = self
                .values
                .entry(name)
                .or_insert_with(|| Value::List(Vec::new()))
            {
                items.push(token);
            }
        } else {
            self.values.insert(name, Value::Str(token));
        }
    }

    /// Fill in defaults for absent options and validate the present ones.
    fn resolve_options(&mut self) -> Result<IndexMap<String, Value>> {
        let mut resolved = IndexMap::with_capacity(self.options.len());

        for (name, option) in self.options {
            if name == HELP_OPTION_NAME {
                continue;
            }

            let value = match self.values.remove(name.as_str()) {
                None => {
                    if option.required() {
                        return Err(UsageError::MissingOptions(display_name(option)).into());
                    }
                    option.default_value().cloned().unwrap_or_default()
                }
                Some(value) => {
                    self.check_option(name, option, &value)?;
                    value
                }
            };
            resolved.insert(name.clone(), value);
        }

        Ok(resolved)
    }

    fn check_option(&self, name: &str, option: &OptionConfig, value: &Value) -> Result<()> {
        if option.validator().is_none() {
            return Ok(());
        }

        let invalid = |value: Value| UsageError::InvalidOption {
            option: self
                .used_names
                .get(name)
                .cloned()
                .unwrap_or_else(|| display_name(option)),
            value,
        };

        match value {
            Value::List(items) if option.multiple() => {
                for item in items {
                    let item = Value::Str(item.clone());
                    if !option.accepts(&item) {
                        return Err(invalid(item).into());
                    }
                }
            }
            single => {
                if !option.accepts(single) {
                    return Err(invalid(single.clone()).into());
                }
            }
        }
        Ok(())
    }

    /// Hand out positional tokens to the configured arguments, first in
    /// first out.
    fn assign_arguments(&mut self) -> Result<IndexMap<String, Value>> {
        let mut assigned = IndexMap::with_capacity(self.arguments.len());
        let mut remaining = std::mem::take(&mut self.positionals).into_iter();
        let mut optional_seen = false;
        let mut last: Option<(&'c str, &'c ArgumentConfig)> = None;

        for (name, argument) in self.arguments {
            if !argument.required() {
                optional_seen = true;
            } else if optional_seen {
                return Err(ConfigError::RequiredAfterOptional(name.clone()).into());
            }

            if let Some((prev_name, prev)) = last {
                if prev.multiple() {
                    return Err(ConfigError::MultipleNotLast(prev_name.to_string()).into());
                }
            }

            let value = match remaining.next() {
                None => {
                    if argument.required() {
                        return Err(UsageError::MissingArguments(name.clone()).into());
                    }
                    argument.default_value().cloned().unwrap_or_default()
                }
                Some(token) => {
                    if !argument.accepts(&Value::Str(token.clone())) {
                        return Err(UsageError::InvalidArgument(token).into());
                    }
                    if argument.multiple() {
                        Value::List(vec![token])
                    } else {
                        Value::Str(token)
                    }
                }
            };
            assigned.insert(name.clone(), value);
            last = Some((name.as_str(), argument));
        }

        let rest: Vec<String> = remaining.collect();
        if !rest.is_empty() {
            match last {
                Some((name, argument)) if argument.multiple() => {
                    if let Some(Value::List(items)) = assigned.get_mut(name) {
                        items.extend(rest);
                    }
                }
                _ => return Err(UsageError::TooManyArguments.into()),
            }
        }

        Ok(assigned)
    }
}

/// How an option is named in messages when no invocation spelling exists.
pub(crate) fn display_name(option: &OptionConfig) -> String {
    option
        .long()
        .map(|l| format!("--{l}"))
        .or_else(|| option.short().map(|s| format!("-{s}")))
        .unwrap_or_default()
}
