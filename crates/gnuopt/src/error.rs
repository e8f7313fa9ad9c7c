//! Error taxonomy for configuration and parsing.
//!
//! Two categories are kept apart:
//! - [`UsageError`]: the end user passed bad input. Callers report it and exit.
//! - [`ConfigError`]: the calling program registered contradictory options or
//!   arguments. This is a programming defect and should propagate to the top.
//!
//! A help request is not an error; see [`crate::ParseOutcome::Help`].

use thiserror::Error;

use crate::value::Value;

/// Failure caused by end-user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("unrecognized option '{0}'")]
    UnrecognizedOption(String),

    #[error("option '{0}' requires an argument")]
    MissingOptionArgument(String),

    #[error("missing option '{0}'")]
    MissingOptions(String),

    #[error("missing argument '{0}'")]
    MissingArguments(String),

    #[error("too many arguments")]
    TooManyArguments,

    #[error("invalid value '{value}' for '{option}'")]
    InvalidOption { option: String, value: Value },

    #[error("invalid argument '{0}'")]
    InvalidArgument(String),
}

/// Failure caused by how options and arguments were registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("short option must be a single alphanumeric character: {0}")]
    InvalidShort(String),

    #[error("invalid long option format: {0}")]
    InvalidLong(String),

    #[error("illegal characters in name: {0}")]
    InvalidName(String),

    #[error("option/argument already set: {0}")]
    Duplicate(String),

    #[error("name is reserved for the help option: {0}")]
    ReservedName(String),

    #[error("'{spelling}' maps to both '{first}' and '{second}'")]
    ConflictingAlias {
        spelling: String,
        first: String,
        second: String,
    },

    #[error("incompatible settings in option config: {0}")]
    IncompatibleOption(&'static str),

    #[error("incompatible settings in argument config: {0}")]
    IncompatibleArgument(&'static str),

    #[error("required arguments cannot follow non-required arguments: {0}")]
    RequiredAfterOptional(String),

    #[error("only the last argument can be 'multiple': {0}")]
    MultipleNotLast(String),

    #[error("unknown config field: {0}")]
    UnknownField(String),
}

/// Any failure raised by [`crate::Parser::parse`] or [`crate::Schema`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether this error was caused by end-user input.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    pub fn as_usage(&self) -> Option<&UsageError> {
        match self {
            Self::Usage(e) => Some(e),
            Self::Config(_) => None,
        }
    }

    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Usage(_) => None,
            Self::Config(e) => Some(e),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
