use indexmap::IndexMap;
use serde::Serialize;

use crate::value::Value;

/// Parsed option and argument values.
///
/// Both maps are in registration order. Every configured option (except the
/// help option) and every configured argument has an entry: the parsed value,
/// else the configured default, else [`Value::Null`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Matches {
    options: IndexMap<String, Value>,
    arguments: IndexMap<String, Value>,
}

impl Matches {
    pub(crate) fn new(
        options: IndexMap<String, Value>,
        arguments: IndexMap<String, Value>,
    ) -> Self {
        Self { options, arguments }
    }

    pub fn options(&self) -> &IndexMap<String, Value> {
        &self.options
    }

    pub fn arguments(&self) -> &IndexMap<String, Value> {
        &self.arguments
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn has_argument(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    /// Look up `name` among the options, then among the arguments.
    ///
    /// Returns `None` only if neither defines it.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.option(name).or_else(|| self.argument(name))
    }

    /// Whether option `name` exists and equals `value`.
    pub fn is_option_value(&self, name: &str, value: &Value) -> bool {
        self.option(name).is_some_and(|v| v == value)
    }

    /// Whether argument `name` exists and equals `value`.
    pub fn is_argument_value(&self, name: &str, value: &Value) -> bool {
        self.argument(name).is_some_and(|v| v == value)
    }

    /// All entries, options first, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.options
            .iter()
            .chain(self.arguments.iter())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_parts(self) -> (IndexMap<String, Value>, IndexMap<String, Value>) {
        (self.options, self.arguments)
    }
}
