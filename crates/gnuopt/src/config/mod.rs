//! Declarative option and argument configuration.
//!
//! Configs are built in two phases: a builder is mutated freely through its
//! setters, then `build()` checks the cross-field invariants once and hands
//! back an immutable config. Name-like setters reject illegal characters
//! immediately.

mod argument;
mod option;

pub use argument::{ArgumentBuilder, ArgumentConfig, ArgumentField};
pub use option::{OptionBuilder, OptionConfig, OptionField};

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Predicate deciding whether a parsed value is acceptable.
///
/// Any `Fn(&Value) -> bool` closure qualifies. For `multiple` options the
/// predicate runs once per element, each passed as [`Value::Str`].
pub trait Validator: Send + Sync {
    fn validate(&self, value: &Value) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn validate(&self, value: &Value) -> bool {
        self(value)
    }
}

/// Validator accepting only values whose text form is one of `choices`.
#[derive(Debug, Clone, Default)]
pub struct Choices {
    choices: Vec<String>,
}

impl Choices {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        self.choices.as_slice()
    }
}

impl Validator for Choices {
    fn validate(&self, value: &Value) -> bool {
        let text = value.to_string();
        self.choices.iter().any(|c| *c == text)
    }
}

/// Shared, cloneable handle to a caller-supplied [`Validator`].
#[derive(Clone)]
pub(crate) struct ValidatorRef(Arc<dyn Validator>);

impl ValidatorRef {
    pub(crate) fn new(v: impl Validator + 'static) -> Self {
        Self(Arc::new(v))
    }

    pub(crate) fn get(&self) -> &dyn Validator {
        self.0.as_ref()
    }
}

impl fmt::Debug for ValidatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<validator>")
    }
}

/// Read-only view of a single config field, for generic introspection such
/// as help rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Unset,
    Bool(bool),
    Char(char),
    Text(&'a str),
    Int(i64),
    Value(&'a Value),
    /// A validator is configured.
    Validator,
}

impl FieldValue<'_> {
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset | Self::Bool(false))
    }
}

/// Whether `c` is usable as a short option (`[A-Za-z0-9]`).
pub fn is_valid_short(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Whether `s` is usable as a long option, option argument name or
/// argument name (`[A-Za-z0-9_-]+`).
pub fn is_valid_long(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub(crate) fn is_valid_name(s: &str) -> bool {
    is_valid_long(s)
}
