use std::str::FromStr;

use super::{FieldValue, Validator, ValidatorRef, is_valid_name};
use crate::error::ConfigError;
use crate::value::Value;

/// Mutable description of one positional argument.
#[derive(Debug, Clone, Default)]
pub struct ArgumentBuilder {
    required: bool,
    name: Option<String>,
    multiple: bool,
    default_value: Option<Value>,
    validator: Option<ValidatorRef>,
}

impl ArgumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name used in the usage line.
    pub fn name(mut self, name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(ConfigError::InvalidName(name));
        }
        self.name = Some(name);
        Ok(self)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Collect all remaining positional tokens. Only valid for the last
    /// registered argument.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
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

    pub fn build(self) -> Result<ArgumentConfig, ConfigError> {
        if self.required && self.default_value.is_some() {
            return Err(ConfigError::IncompatibleArgument(
                "a required argument cannot have a default value",
            ));
        }
        Ok(ArgumentConfig { inner: self })
    }
}

/// Validated, immutable argument config.
#[derive(Debug, Clone)]
pub struct ArgumentConfig {
    inner: ArgumentBuilder,
}

impl ArgumentConfig {
    pub fn required(&self) -> bool {
        self.inner.required
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn multiple(&self) -> bool {
        self.inner.multiple
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.inner.default_value.as_ref()
    }

    pub fn validator(&self) -> Option<&dyn Validator> {
        self.inner.validator.as_ref().map(ValidatorRef::get)
    }

    pub fn accepts(&self, value: &Value) -> bool {
        self.validator().is_none_or(|v| v.validate(value))
    }

    pub fn into_builder(self) -> ArgumentBuilder {
        self.inner
    }

    pub fn field(&self, field: ArgumentField) -> FieldValue<'_> {
        let a = &self.inner;
        match field {
            ArgumentField::Required => FieldValue::Bool(a.required),
            ArgumentField::Name => a.name.as_deref().map_or(FieldValue::Unset, FieldValue::Text),
            ArgumentField::Multiple => FieldValue::Bool(a.multiple),
            ArgumentField::DefaultValue => a
                .default_value
                .as_ref()
                .map_or(FieldValue::Unset, FieldValue::Value),
            ArgumentField::Validator => {
                if a.validator.is_some() {
                    FieldValue::Validator
                } else {
                    FieldValue::Unset
                }
            }
        }
    }

    pub fn get(&self, field: &str) -> Result<FieldValue<'_>, ConfigError> {
        Ok(self.field(field.parse()?))
    }
}

/// The fields of an argument config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentField {
    Required,
    Name,
    Multiple,
    DefaultValue,
    Validator,
}

impl ArgumentField {
    pub const ALL: [ArgumentField; 5] = [
        Self::Required,
        Self::Name,
        Self::Multiple,
        Self::DefaultValue,
        Self::Validator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Name => "name",
            Self::Multiple => "multiple",
            Self::DefaultValue => "default-value",
            Self::Validator => "validator",
        }
    }
}

impl FromStr for ArgumentField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownField(s.to_string()))
    }
}
