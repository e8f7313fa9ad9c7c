//! GNU getopt-style option and argument parsing.
//!
//! Supported token grammar:
//! - `-x`, bundled `-xyz` (a value-taking option ends the bundle and takes
//!   the next token as its value)
//! - `--name`, `--name value`, `--name=value`
//! - `--noname` for options registered as negatable
//! - `--` ends option processing, `-` is a plain positional token
//!
//! Options can be flags, incrementable counters, single- or multi-valued.
//! Positional arguments are matched in registration order and may be
//! required, optional with a default, or (last one only) multiple.
//!
//! ```
//! use gnuopt::{ArgumentBuilder, OptionBuilder, Schema, Value};
//!
//! let schema = Schema::new()
//!     .option("verbose", OptionBuilder::new().short('v')?.incrementable(1).build()?)?
//!     .option(
//!         "output",
//!         OptionBuilder::new().short('o')?.long("output")?.argument("file")?.build()?,
//!     )?
//!     .argument("input", ArgumentBuilder::new().required().build()?)?;
//!
//! let m = schema
//!     .parse(&["-vvo", "out.txt", "in.txt"])?
//!     .matches()
//!     .expect("no help requested");
//! assert_eq!(m.get("verbose"), Some(&Value::Int(2)));
//! assert_eq!(m.get("output"), Some(&Value::from("out.txt")));
//! assert_eq!(m.get("input"), Some(&Value::from("in.txt")));
//! # Ok::<(), gnuopt::Error>(())
//! ```

pub mod config;
mod cursor;
pub mod error;
mod handler;
mod matches;
mod parser;
mod schema;
pub mod usage;
mod value;

pub use config::{
    ArgumentBuilder, ArgumentConfig, ArgumentField, Choices, FieldValue, OptionBuilder,
    OptionConfig, OptionField, Validator,
};
pub use error::{ConfigError, Error, Result, UsageError};
pub use handler::{Handler, USAGE_EXIT_CODE};
pub use indexmap::IndexMap;
pub use matches::Matches;
pub use parser::{HELP_OPTION_NAME, ParseOutcome, Parser};
pub use schema::Schema;
pub use value::Value;
