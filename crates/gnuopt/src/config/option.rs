use std::str::FromStr;

use super::{FieldValue, Validator, ValidatorRef, is_valid_long, is_valid_name, is_valid_short};
use crate::error::ConfigError;
use crate::value::Value;

/// Mutable description of one option, turned into an [`OptionConfig`] by
/// [`OptionBuilder::build`].
///
/// ```
/// use gnuopt::OptionBuilder;
///
/// let verbose = OptionBuilder::new()
///     .short('v')?
///     .long("verbose")?
///     .incrementable(1)
///     .description("more output")
///     .build()?;
/// assert_eq!(verbose.incrementable(), Some(1));
/// # Ok::<(), gnuopt::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionBuilder {
    required: bool,
    short: Option<char>,
    long: Option<String>,
    argument: Option<String>,
    multiple: bool,
    incrementable: Option<i64>,
    negatable: bool,
    description: Option<String>,
    default_value: Option<Value>,
    validator: Option<ValidatorRef>,
}

impl OptionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the short name (`-x`).
    pub fn short(mut self, short: char) -> Result<Self, ConfigError> {
        if !is_valid_short(short) {
            return Err(ConfigError::InvalidShort(short.to_string()));
        }
        self.short = Some(short);
        Ok(self)
    }

    /// Set the long name (`--name`).
    pub fn long(mut self, long: impl Into<String>) -> Result<Self, ConfigError> {
        let long = long.into();
        if !is_valid_long(&long) {
            return Err(ConfigError::InvalidLong(long));
        }
        self.long = Some(long);
        Ok(self)
    }

    /// Make the option take a value, shown as `name` in help output.
    pub fn argument(mut self, name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(ConfigError::InvalidName(name));
        }
        self.argument = Some(name);
        Ok(self)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allow the option to be given several times, collecting every value.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Accept `--no<long>` to set the flag to `false`.
    pub fn negatable(mut self) -> Self {
        self.negatable = true;
        self
    }

    /// Turn the option into a counter increased by `step` on every occurrence.
    pub fn incrementable(mut self, step: i64) -> Self {
        self.incrementable = Some(step);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(ValidatorRef::new(validator));
        self
    }

    /// Check the cross-field invariants and freeze the config.
    pub fn build(self) -> Result<OptionConfig, ConfigError> {
        if self.argument.is_some() {
            if self.incrementable.is_some() {
                return Err(ConfigError::IncompatibleOption(
                    "an option taking an argument cannot be incrementable",
                ));
            }
            if self.negatable {
                return Err(ConfigError::IncompatibleOption(
                    "an option taking an argument cannot be negatable",
                ));
            }
        } else if self.multiple {
            return Err(ConfigError::IncompatibleOption("'multiple' requires an argument"));
        }

        if self.negatable && self.long.is_none() {
            return Err(ConfigError::IncompatibleOption("negatable requires a long name"));
        }

        if self.required && self.default_value.is_some() {
            return Err(ConfigError::IncompatibleOption(
                "a required option cannot have a default value",
            ));
        }

        if self.short.is_none() && self.long.is_none() {
            return Err(ConfigError::IncompatibleOption(
                "at least one of short and long must be set",
            ));
        }

        Ok(OptionConfig { inner: self })
    }
}

/// Validated, immutable option config.
#[derive(Debug, Clone)]
pub struct OptionConfig {
    inner: OptionBuilder,
}

impl OptionConfig {
    pub fn required(&self) -> bool {
        self.inner.required
    }

    pub fn short(&self) -> Option<char> {
        self.inner.short
    }

    pub fn long(&self) -> Option<&str> {
        self.inner.long.as_deref()
    }

    /// Name of the option's value, if it takes one.
    pub fn argument(&self) -> Option<&str> {
        self.inner.argument.as_deref()
    }

    pub fn takes_value(&self) -> bool {
        self.inner.argument.is_some()
    }

    pub fn multiple(&self) -> bool {
        self.inner.multiple
    }

    pub fn incrementable(&self) -> Option<i64> {
        self.inner.incrementable
    }

    pub fn negatable(&self) -> bool {
        self.inner.negatable
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.inner.default_value.as_ref()
    }

    pub fn validator(&self) -> Option<&dyn Validator> {
        self.inner.validator.as_ref().map(ValidatorRef::get)
    }

    /// Run the validator against `value`; options without one accept anything.
    pub fn accepts(&self, value: &Value) -> bool {
        self.validator().is_none_or(|v| v.validate(value))
    }

    /// Turn the frozen config back into a builder for further changes.
    pub fn into_builder(self) -> OptionBuilder {
        self.inner
    }

    pub fn field(&self, field: OptionField) -> FieldValue<'_> {
        let o = &self.inner;
        match field {
            OptionField::Required => FieldValue::Bool(o.required),
            OptionField::Short => o.short.map_or(FieldValue::Unset, FieldValue::Char),
            OptionField::Long => o.long.as_deref().map_or(FieldValue::Unset, FieldValue::Text),
            OptionField::Argument => o
                .argument
                .as_deref()
                .map_or(FieldValue::Unset, FieldValue::Text),
            OptionField::Multiple => FieldValue::Bool(o.multiple),
            OptionField::Incrementable => {
                o.incrementable.map_or(FieldValue::Unset, FieldValue::Int)
            }
            OptionField::Negatable => FieldValue::Bool(o.negatable),
            OptionField::Description => o
                .description
                .as_deref()
                .map_or(FieldValue::Unset, FieldValue::Text),
            OptionField::DefaultValue => o
                .default_value
                .as_ref()
                .map_or(FieldValue::Unset, FieldValue::Value),
            OptionField::Validator => {
                if o.validator.is_some() {
                    FieldValue::Validator
                } else {
                    FieldValue::Unset
                }
            }
        }
    }

    /// Look up a field by its textual name.
    pub fn get(&self, field: &str) -> Result<FieldValue<'_>, ConfigError> {
        Ok(self.field(field.parse()?))
    }
}

/// The fields of an option config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionField {
    Required,
    Short,
    Long,
    Argument,
    Multiple,
    Incrementable,
    Negatable,
    Description,
    DefaultValue,
    Validator,
}

impl OptionField {
    pub const ALL: [OptionField; 10] = [
        Self::Required,
        Self::Short,
        Self::Long,
        Self::Argument,
        Self::Multiple,
        Self::Incrementable,
        Self::Negatable,
        Self::Description,
        Self::DefaultValue,
        Self::Validator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Short => "short",
            Self::Long => "long",
            Self::Argument => "argument",
            Self::Multiple => "multiple",
            Self::Incrementable => "incrementable",
            Self::Negatable => "negatable",
            Self::Description => "description",
            Self::DefaultValue => "default-value",
            Self::Validator => "validator",
        }
    }
}

impl FromStr for OptionField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownField(s.to_string()))
    }
}
