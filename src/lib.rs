//! # tiny_doc
//!
//! A small document model with a JSON reader and a YAML reader/writer.
//!
//! ## What is it?
//!
//! Configuration files and fixtures rarely need a full serialization
//! framework. `tiny_doc` reads text into a self-describing tree of
//! [`Value`]s (null, boolean, number, string, array, object) and lets the
//! caller pull typed values back out on demand, with forgiving conversions
//! between strings and numbers.
//!
//! ## Key Features
//!
//! - **One tree, two readers**: [`Json`] and [`Yaml`] produce the same [`Value`] shape
//! - **Ordered objects**: keys keep their insertion order
//! - **Coercing accessors**: [`Value::value_at`] and friends convert on read
//! - **Round-trip writer**: anything [`Yaml`] writes reads back to the same tree
//! - **Pluggable front ends**: both readers share one regex tokenizer and one
//!   stack-based parse automaton
//! - **Serde interop**: [`Value`] implements `Serialize` and `Deserialize`
//!
//! ## Quick Start
//!
//! ```rust
//! use tiny_doc::{from_yaml_str, to_yaml_string, Key};
//!
//! let text = "\
//! service:
//!   name: api
//!   port: \"8080\"
//!   replicas:
//!     - zone: a
//!     - zone: b
//! ";
//! let doc = from_yaml_str(text).unwrap();
//!
//! let service = doc.child("service").unwrap();
//! assert_eq!(service.value_at::<String>("name").unwrap(), "api");
//! // Quoted numbers still coerce
//! assert_eq!(service.value_at::<u16>("port").unwrap(), 8080);
//!
//! let zone: String = doc
//!     .value_path(&[Key::from("service"), Key::from("replicas"), Key::Index(1), Key::from("zone")])
//!     .unwrap();
//! assert_eq!(zone, "b");
//!
//! let written = to_yaml_string(&doc).unwrap();
//! assert_eq!(from_yaml_str(&written).unwrap(), doc);
//! ```
//!
//! ### Reading JSON
//!
//! ```rust
//! use tiny_doc::from_json_str;
//!
//! let value = from_json_str(r#"{"ids": [1, 2, 3], "label": null}"#).unwrap();
//! assert_eq!(value.values_at::<i64>("ids").unwrap(), vec![1, 2, 3]);
//! // Bare words other than numbers and booleans read as strings
//! assert_eq!(value.value_at::<String>("label").unwrap(), "null");
//! // Missing names address null
//! assert_eq!(value.value_at::<Option<String>>("missing").unwrap(), None);
//! ```
//!
//! ### Building trees
//!
//! ```rust
//! use tiny_doc::{doc, to_yaml_string};
//!
//! let value = doc!({ "a": [1, 2.5], "b": { "c": true } });
//! assert_eq!(to_yaml_string(&value).unwrap(), "a:\n  - 1\n  - 2.5\nb:\n  c: Yes\n");
//! ```
//!
//! ## Format Notes
//!
//! - **JSON** is read-only. Unquoted words are accepted and classified, and a
//!   trailing comma before `]` or `}` is tolerated.
//! - **YAML** covers block mappings and sequences with two-space indentation,
//!   plain and double-quoted scalars. Booleans are `yes`/`no`.
//! - Characters the tokenizer does not recognise are skipped.
//! - Empty arrays and objects are written as null.
//!
//! ## Logging
//!
//! Reads and writes emit `tracing` events: `debug` on entry, `trace` for every
//! parser step. Install a subscriber to see them.

#[macro_use]
mod macros;

pub mod coerce;
pub mod error;
pub mod format;
pub mod json;
pub mod map;
pub mod options;
mod parse;
mod scalar;
pub mod tokenizer;
pub mod value;
pub mod yaml;

pub use coerce::{FromValue, Key};
pub use error::{Error, Result};
pub use format::Format;
pub use json::Json;
pub use map::Map;
pub use options::{KeyQuoting, LineEnding, WriteOptions};
pub use value::{Number, Value, ValueKind};
pub use yaml::Yaml;

/// Reads a JSON document.
///
/// # Examples
///
/// ```rust
/// use tiny_doc::{doc, from_json_str};
///
/// assert_eq!(from_json_str("[1, \"a\"]").unwrap(), doc!([1, "a"]));
/// ```
///
/// # Errors
///
/// Returns [`Error::Malformed`] for tokens the grammar does not accept and
/// [`Error::UnexpectedEof`] when an object or array is never closed.
pub fn from_json_str(text: &str) -> Result<Value> {
    Json.read(text)
}

/// Reads a YAML document.
///
/// # Examples
///
/// ```rust
/// use tiny_doc::{doc, from_yaml_str};
///
/// assert_eq!(from_yaml_str("a:\n  - 1\n").unwrap(), doc!({ "a": [1] }));
/// ```
///
/// # Errors
///
/// Returns [`Error::Malformed`] for tokens the grammar does not accept and
/// [`Error::Indentation`] for lines indented deeper than their block allows.
pub fn from_yaml_str(text: &str) -> Result<Value> {
    Yaml::new().read(text)
}

/// Writes `value` as YAML with default options.
///
/// # Examples
///
/// ```rust
/// use tiny_doc::{doc, to_yaml_string};
///
/// assert_eq!(to_yaml_string(&doc!({ "k": "v" })).unwrap(), "k: \"v\"\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedOperation`] if the tree holds a NaN or
/// infinite float.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_yaml_string(value: &Value) -> Result<String> {
    to_yaml_string_with_options(value, &WriteOptions::default())
}

/// Writes `value` as YAML with custom options.
///
/// # Errors
///
/// Returns [`Error::UnsupportedOperation`] if the tree holds a NaN or
/// infinite float.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_yaml_string_with_options(value: &Value, options: &WriteOptions) -> Result<String> {
    Yaml::with_options(options.clone()).write(value)
}
