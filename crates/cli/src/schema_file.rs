use anyhow::{Context, Result, bail};
use gnuopt::{ArgumentBuilder, ArgumentConfig, Choices, OptionBuilder, OptionConfig, Schema, Value};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;

/// JSON description of the options and arguments to parse against.
///
/// ```json
/// {
///   "options": {
///     "verbose": { "short": "v", "long": "verbose", "incrementable": 1 },
///     "mode": { "long": "mode", "argument": "mode", "choices": ["fast", "slow"] }
///   },
///   "arguments": {
///     "input": { "required": true }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SchemaFile {
    #[serde(default)]
    pub options: IndexMap<String, OptionSpec>,

    #[serde(default)]
    pub arguments: IndexMap<String, ArgumentSpec>,

    /// Short spelling of the help option. An empty string disables it.
    #[serde(default)]
    pub help_short: Option<String>,

    /// Long spelling of the help option. An empty string disables it.
    #[serde(default)]
    pub help_long: Option<String>,

    #[serde(default)]
    pub extra_help: Option<String>,

    #[serde(default)]
    pub terse_usage: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OptionSpec {
    #[serde(default)]
    pub short: Option<char>,
    #[serde(default)]
    pub long: Option<String>,
    #[serde(default)]
    pub argument: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub incrementable: Option<i64>,
    #[serde(default)]
    pub negatable: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ArgumentSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
}

/// Read a schema from `path`, or from stdin when `path` is `-`.
pub fn load_schema_file(path: &Path) -> Result<SchemaFile> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read schema from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read schema: {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("invalid schema: {}", path.display()))
}

impl SchemaFile {
    pub fn to_schema(&self) -> Result<Schema> {
        let mut schema = Schema::new();

        if let Some(short) = &self.help_short {
            let short = match short.chars().collect::<Vec<_>>().as_slice() {
                [] => None,
                [c] => Some(*c),
                _ => bail!("help-short must be a single character: {short}"),
            };
            schema = schema.help_short(short)?;
        }
        if let Some(long) = &self.help_long {
            schema = schema.help_long(Some(long.as_str()).filter(|l| !l.is_empty()))?;
        }

        for (name, spec) in &self.options {
            let option = spec
                .to_config()
                .with_context(|| format!("invalid option '{name}'"))?;
            schema = schema.option(name.as_str(), option)?;
        }
        for (name, spec) in &self.arguments {
            let argument = spec
                .to_config()
                .with_context(|| format!("invalid argument '{name}'"))?;
            schema = schema.argument(name.as_str(), argument)?;
        }

        tracing::debug!(
            options = self.options.len(),
            arguments = self.arguments.len(),
            "loaded schema"
        );
        Ok(schema)
    }
}

impl OptionSpec {
    fn to_config(&self) -> Result<OptionConfig> {
        let mut b = OptionBuilder::new();
        if let Some(short) = self.short {
            b = b.short(short)?;
        }
        if let Some(long) = &self.long {
            b = b.long(long.as_str())?;
        }
        if let Some(argument) = &self.argument {
            b = b.argument(argument.as_str())?;
        }
        if self.required {
            b = b.required();
        }
        if self.multiple {
            b = b.multiple();
        }
        if let Some(step) = self.incrementable {
            b = b.incrementable(step);
        }
        if self.negatable {
            b = b.negatable();
        }
        if let Some(description) = &self.description {
            b = b.description(description.as_str());
        }
        if let Some(default) = &self.default {
            b = b.default_value(default.clone());
        }
        if let Some(choices) = &self.choices {
            b = b.validator(Choices::new(choices.iter().cloned()));
        }
        Ok(b.build()?)
    }
}

impl ArgumentSpec {
    fn to_config(&self) -> Result<ArgumentConfig> {
        let mut b = ArgumentBuilder::new();
        if let Some(name) = &self.name {
            b = b.name(name.as_str())?;
        }
        if self.required {
            b = b.required();
        }
        if self.multiple {
            b = b.multiple();
        }
        if let Some(default) = &self.default {
            b = b.default_value(default.clone());
        }
        if let Some(choices) = &self.choices {
            b = b.validator(Choices::new(choices.iter().cloned()));
        }
        Ok(b.build()?)
    }
}
