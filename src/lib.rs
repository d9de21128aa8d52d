//! # ploon
//!
//! A codec for PLOON (Path-Addressed, Layered Object Notation), a
//! schema-once text encoding for hierarchical data.
//!
//! ## What is PLOON?
//!
//! PLOON flattens an object tree into a single schema header plus a stream
//! of path-tagged records. Field names appear exactly once, in the schema,
//! instead of being repeated per item as in JSON, and nesting is addressed
//! by depth/index paths instead of brackets:
//!
//! ```text
//! [users#2](id,name,role)
//!
//! 1:1|1|Alice|admin
//! 1:2|2|Bob|user
//! ```
//!
//! ## Key Features
//!
//! - **Schema-once**: one structural header inferred from the whole tree,
//!   never repeated per record
//! - **Path-addressed**: flat records tagged `depth:index` (array items) or
//!   `depth ` (nested objects) replace nested brackets
//! - **Two-pass encoding**: infer the schema, then render records guided by
//!   it
//! - **Strict or lenient decoding**: grammar and consistency checks on by
//!   default, best-effort reconstruction on request
//! - **Serde bridge**: any `T: Serialize` converts into the codec's
//!   [`Value`] tree via [`to_value`]
//!
//! ## Quick Start
//!
//! ```rust
//! use ploon::{ploon, stringify, parse};
//!
//! let value = ploon!({
//!     "users": [
//!         {"id": 1, "name": "Alice"},
//!         {"id": 2, "name": "Bob"}
//!     ]
//! });
//!
//! let text = stringify(&value).unwrap();
//! assert_eq!(text, "[users#2](id,name)\n\n1:1|1|Alice\n1:2|2|Bob");
//!
//! // Everything decodes back as untyped strings
//! let back = parse(&text).unwrap();
//! let users = back.as_object().unwrap().get("users").unwrap();
//! assert_eq!(users.as_array().unwrap().len(), 2);
//! ```
//!
//! ### From native types
//!
//! ```rust
//! use serde::Serialize;
//! use ploon::to_string;
//!
//! #[derive(Serialize)]
//! struct Wrapper {
//!     items: Vec<Item>,
//! }
//!
//! #[derive(Serialize)]
//! struct Item {
//!     id: u32,
//!     label: String,
//! }
//!
//! let doc = Wrapper {
//!     items: vec![Item { id: 7, label: "widget".into() }],
//! };
//! assert_eq!(to_string(&doc).unwrap(), "[items#1](id,label)\n\n1:1|7|widget");
//! ```
//!
//! ### Compact form
//!
//! ```rust
//! use ploon::{ploon, stringify_compact, minify, prettify};
//!
//! let value = ploon!({"items": [{"id": 1}]});
//! let compact = stringify_compact(&value).unwrap();
//! assert_eq!(compact, "[items#1](id);1:1|1");
//!
//! // minify/prettify are pure character substitutions and inverses of each
//! // other on text without literal delimiter collisions
//! let standard = ploon::stringify(&value).unwrap();
//! assert_eq!(prettify(&minify(&standard)), standard);
//! ```
//!
//! ## Decoding Limits
//!
//! PLOON carries no type system: every reconstructed primitive is a string.
//! Nested Object/Array lookups during reconstruction are not scoped to the
//! owning parent item; see the [`de`] module docs for the details of this
//! wire-format limitation.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - The codec is a pure synchronous transformation: no shared state, safe
//!   to call from any number of threads with separate inputs
//! - No panics in the public API: malformed input returns [`Error`]

pub mod config;
pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod schema;
pub mod ser;
pub mod spec;
pub mod value;

pub use config::{Config, Format, MultiRootPolicy};
pub use de::{DataRecord, Decoder, PathTag};
pub use error::{Error, Result};
pub use map::PloonMap;
pub use schema::{FieldKind, SchemaField, SchemaNode};
pub use ser::{Encoder, ValueSerializer};
pub use value::{Number, Value};

use serde::Serialize;
use std::io;

/// Encodes a value tree to Standard-format PLOON text.
///
/// # Examples
///
/// ```rust
/// use ploon::{ploon, stringify};
///
/// let value = ploon!({"a": 1, "b": 2});
/// assert_eq!(stringify(&value).unwrap(), "[root](a,b)\n\n1 |1|2");
/// ```
///
/// # Errors
///
/// Returns an error if the root is a bare primitive or the root dispatch is
/// ambiguous under the configured policy.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify(value: &Value) -> Result<String> {
    stringify_with_config(value, Format::Standard, &Config::standard())
}

/// Encodes a value tree to Compact-format PLOON text (`;` record
/// separators, single separator after the schema).
///
/// # Errors
///
/// Same conditions as [`stringify`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify_compact(value: &Value) -> Result<String> {
    stringify_with_config(value, Format::Compact, &Config::compact())
}

/// Encodes a value tree with a custom delimiter alphabet.
///
/// The document is `schema + separator + (separator again iff Standard) +
/// records`, using the record separator from `config`.
///
/// # Errors
///
/// Same conditions as [`stringify`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify_with_config(value: &Value, format: Format, config: &Config) -> Result<String> {
    let schema = SchemaNode::infer(value, config)?;
    let records = Encoder::new(config).encode(value, &schema)?;

    let mut out = schema.render(config);
    out.push(config.record_separator);
    if format == Format::Standard {
        out.push(config.record_separator);
    }
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push(config.record_separator);
        }
        out.push_str(record);
    }
    Ok(out)
}

/// Converts any `T: Serialize` into a [`Value`] tree.
///
/// This is the bridge from host-language objects to the codec's abstract
/// tree; the codec itself only ever reads [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use ploon::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error for values serde cannot map onto the PLOON value model
/// (non-string map keys, enum variants with payloads).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serializes any `T: Serialize` to Standard-format PLOON text.
///
/// # Errors
///
/// Combines the conditions of [`to_value`] and [`stringify`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    stringify(&to_value(value)?)
}

/// Serializes any `T: Serialize` to Compact-format PLOON text.
///
/// # Errors
///
/// Combines the conditions of [`to_value`] and [`stringify_compact`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_compact<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    stringify_compact(&to_value(value)?)
}

/// Serializes any `T: Serialize` with a custom delimiter alphabet.
///
/// # Errors
///
/// Combines the conditions of [`to_value`] and [`stringify_with_config`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_config<T>(value: &T, format: Format, config: &Config) -> Result<String>
where
    T: ?Sized + Serialize,
{
    stringify_with_config(&to_value(value)?, format, config)
}

/// Serializes any `T: Serialize` to a writer in Standard-format PLOON.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_config(writer, value, Format::Standard, &Config::standard())
}

/// Serializes any `T: Serialize` to a writer with a custom alphabet.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_config<W, T>(
    mut writer: W,
    value: &T,
    format: Format,
    config: &Config,
) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_config(value, format, config)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Decodes Standard-format PLOON text into a value tree, strictly.
///
/// # Examples
///
/// ```rust
/// use ploon::parse;
///
/// let value = parse("[root](a,b)\n\n1 |1|2").unwrap();
/// assert_eq!(value.as_object().unwrap().get("a").unwrap().as_str(), Some("1"));
/// ```
///
/// # Errors
///
/// See [`Decoder::decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str) -> Result<Value> {
    Decoder::new(Config::standard()).decode(text)
}

/// Decodes Compact-format PLOON text into a value tree, strictly.
///
/// # Errors
///
/// See [`Decoder::decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_compact(text: &str) -> Result<Value> {
    Decoder::new(Config::compact()).decode(text)
}

/// Decodes Standard-format PLOON text leniently: bad paths are dropped and
/// value counts are not checked.
///
/// # Errors
///
/// Structural schema errors remain fatal; see [`Decoder::decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_lenient(text: &str) -> Result<Value> {
    Decoder::new(Config::standard()).lenient().decode(text)
}

/// Decodes PLOON text with a custom delimiter alphabet, strictly.
///
/// # Errors
///
/// See [`Decoder::decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_config(text: &str, config: &Config) -> Result<Value> {
    Decoder::new(config.clone()).decode(text)
}

/// Decodes a value tree from an I/O stream of Standard-format PLOON.
///
/// # Errors
///
/// Returns an error if reading fails or the text does not decode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Value>
where
    R: io::Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    parse(&text)
}

/// Converts Standard-form text to Compact form by replacing every newline
/// with `;`.
///
/// This is a pure character substitution: it is lossy if the text contains
/// a literal newline inside an escaped value, and [`prettify`] is its exact
/// inverse only when the text contains no literal `;`.
#[must_use]
pub fn minify(text: &str) -> String {
    text.replace('\n', ";")
}

/// Converts Compact-form text to Standard form by replacing every `;` with
/// a newline. The same collision caveat as [`minify`] applies.
#[must_use]
pub fn prettify(text: &str) -> String {
    text.replace(';', "\n")
}

/// Cheap structural heuristic: the text starts with the schema open bracket
/// and contains the schema close immediately followed by the fields open.
///
/// This is not a grammar check: a `false` answer is definitive but `true`
/// can be a false positive.
///
/// # Examples
///
/// ```rust
/// use ploon::is_valid;
///
/// assert!(is_valid("[users#1](id)\n\n1:1|1"));
/// assert!(!is_valid("{\"plain\": \"json\"}"));
/// ```
#[must_use]
pub fn is_valid(text: &str) -> bool {
    is_valid_with_config(text, &Config::standard())
}

/// [`is_valid`] against a custom delimiter alphabet.
#[must_use]
pub fn is_valid_with_config(text: &str, config: &Config) -> bool {
    let mut hinge = String::with_capacity(2);
    hinge.push(config.schema_close);
    hinge.push(config.fields_open);
    text.starts_with(config.schema_open) && text.contains(&hinge)
}
