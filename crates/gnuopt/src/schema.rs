use indexmap::IndexMap;

use crate::config::{ArgumentConfig, OptionBuilder, OptionConfig, is_valid_long, is_valid_short};
use crate::error::{ConfigError, Result};
use crate::parser::{HELP_OPTION_NAME, ParseOutcome, Parser};

const DEFAULT_HELP_SHORT: char = 'h';
const DEFAULT_HELP_LONG: &str = "help";

/// Registry of named options and positional arguments.
///
/// Names are unique across options and arguments. Arguments are matched in
/// the order they were added. A help option (`-h`/`--help` unless changed)
/// is added at parse time; it only takes spellings no registered option
/// already uses.
#[derive(Debug, Clone)]
pub struct Schema {
    options: IndexMap<String, OptionConfig>,
    arguments: IndexMap<String, ArgumentConfig>,
    help_short: Option<char>,
    help_long: Option<String>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            options: IndexMap::new(),
            arguments: IndexMap::new(),
            help_short: Some(DEFAULT_HELP_SHORT),
            help_long: Some(DEFAULT_HELP_LONG.to_string()),
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option under `name`.
    pub fn option(
        mut self,
        name: impl Into<String>,
        option: OptionConfig,
    ) -> Result<Self, ConfigError> {
        let name = self.check_name(name.into())?;
        tracing::debug!(name = %name, "registered option");
        self.options.insert(name, option);
        Ok(self)
    }

    /// Register a positional argument under `name`.
    pub fn argument(
        mut self,
        name: impl Into<String>,
        argument: ArgumentConfig,
    ) -> Result<Self, ConfigError> {
        let name = self.check_name(name.into())?;
        tracing::debug!(name = %name, "registered argument");
        self.arguments.insert(name, argument);
        Ok(self)
    }

    /// Change the help option's short spelling; `None` disables it.
    pub fn help_short(mut self, short: Option<char>) -> Result<Self, ConfigError> {
        if let Some(c) = short {
            if !is_valid_short(c) {
                return Err(ConfigError::InvalidShort(c.to_string()));
            }
        }
        self.help_short = short;
        Ok(self)
    }

    /// Change the help option's long spelling; `None` disables it.
    pub fn help_long(mut self, long: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(l) = long {
            if !is_valid_long(l) {
                return Err(ConfigError::InvalidLong(l.to_string()));
            }
        }
        self.help_long = long.map(str::to_string);
        Ok(self)
    }

    /// Registered options, without the help option.
    pub fn options(&self) -> &IndexMap<String, OptionConfig> {
        &self.options
    }

    pub fn arguments(&self) -> &IndexMap<String, ArgumentConfig> {
        &self.arguments
    }

    /// The help option as it will be matched, or `None` when it has no
    /// spelling left.
    pub fn help_option(&self) -> Result<Option<OptionConfig>, ConfigError> {
        let short = self
            .help_short
            .filter(|c| !self.options.values().any(|o| o.short() == Some(*c)));
        let long = self
            .help_long
            .as_deref()
            .filter(|l| !self.options.values().any(|o| o.long() == Some(*l)));

        if short.is_none() && long.is_none() {
            return Ok(None);
        }

        let mut help = OptionBuilder::new().description("display this help and exit");
        if let Some(c) = short {
            help = help.short(c)?;
        }
        if let Some(l) = long {
            help = help.long(l)?;
        }
        help.build().map(Some)
    }

    /// Registered options followed by the help option, keyed by
    /// [`HELP_OPTION_NAME`].
    pub fn effective_options(&self) -> Result<IndexMap<String, OptionConfig>, ConfigError> {
        let mut options = self.options.clone();
        if let Some(help) = self.help_option()? {
            options.insert(HELP_OPTION_NAME.to_string(), help);
        }
        Ok(options)
    }

    /// Parse `tokens` (program name already stripped) against this schema.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseOutcome> {
        let options = self.effective_options()?;
        Parser::new(&options, &self.arguments).parse(tokens)
    }

    fn check_name(&self, name: String) -> Result<String, ConfigError> {
        if name == HELP_OPTION_NAME {
            return Err(ConfigError::ReservedName(name));
        }
        if self.options.contains_key(&name) || self.arguments.contains_key(&name) {
            return Err(ConfigError::Duplicate(name));
        }
        Ok(name)
    }
}
