//! Configuration for the PLOON codec.
//!
//! This module provides the types that parameterize the wire format:
//!
//! - [`Config`]: the delimiter alphabet plus the root-dispatch policy
//! - [`Format`]: Standard (newline records) vs Compact (`;` records)
//! - [`MultiRootPolicy`]: what to do with sibling keys next to a governing
//!   root array
//!
//! Every delimiter is a single `char`; the escaping algorithm relies on
//! that, so multi-character delimiters are out of scope.
//!
//! ## Examples
//!
//! ```rust
//! use ploon::{Config, Format, stringify_with_config, ploon};
//!
//! let value = ploon!({"items": [{"id": 1}, {"id": 2}]});
//!
//! // Canonical compact form, ';' between records
//! let compact = stringify_with_config(&value, Format::Compact, &Config::compact()).unwrap();
//! assert_eq!(compact, "[items#2](id);1:1|1;1:2|2");
//!
//! // Custom field delimiter
//! let config = Config::standard().with_field_delimiter('^');
//! let custom = stringify_with_config(&value, Format::Standard, &config).unwrap();
//! assert!(custom.contains("1:1^1"));
//! ```

/// Output format selection for the stringify facade.
///
/// Standard uses newline record separators and inserts a second separator
/// between the schema and data segments for readability. Compact uses `;`
/// and a single separator.
///
/// # Examples
///
/// ```rust
/// use ploon::{Config, Format};
///
/// assert_eq!(Format::Standard.config().record_separator, '\n');
/// assert_eq!(Format::Compact.config().record_separator, ';');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Standard,
    Compact,
}

impl Format {
    /// Returns the canonical [`Config`] for this format.
    #[must_use]
    pub fn config(&self) -> Config {
        match self {
            Format::Standard => Config::standard(),
            Format::Compact => Config::compact(),
        }
    }
}

/// Policy for a root object whose first value is an array but which carries
/// further sibling keys.
///
/// The default silently considers only the first key. That loses data
/// without a diagnostic, so the strictness is surfaced as a choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MultiRootPolicy {
    /// Only the first key/value pair governs the schema; siblings are
    /// silently ignored.
    #[default]
    FirstKeyOnly,
    /// Sibling keys beyond the first make inference fail with
    /// [`crate::Error::AmbiguousRoot`].
    Error,
}

/// The delimiter alphabet of the PLOON wire format.
///
/// All delimiters are single characters. The object-path convention
/// (`depth` followed by a literal ASCII space) is fixed and deliberately not
/// configurable.
///
/// # Examples
///
/// ```rust
/// use ploon::Config;
///
/// // Default standard alphabet
/// let config = Config::standard();
/// assert_eq!(config.field_delimiter, '|');
/// assert_eq!(config.record_separator, '\n');
///
/// // Custom alphabet
/// let config = Config::standard()
///     .with_field_delimiter('^')
///     .with_escape('~');
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub field_delimiter: char,
    pub path_separator: char,
    pub array_size_marker: char,
    pub record_separator: char,
    pub escape: char,
    pub schema_open: char,
    pub schema_close: char,
    pub fields_open: char,
    pub fields_close: char,
    pub nested_object_open: char,
    pub nested_object_close: char,
    pub schema_field_separator: char,
    pub multi_root_policy: MultiRootPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            field_delimiter: '|',
            path_separator: ':',
            array_size_marker: '#',
            record_separator: '\n',
            escape: '\\',
            schema_open: '[',
            schema_close: ']',
            fields_open: '(',
            fields_close: ')',
            nested_object_open: '{',
            nested_object_close: '}',
            schema_field_separator: ',',
            multi_root_policy: MultiRootPolicy::default(),
        }
    }
}

impl Config {
    /// Creates the standard configuration: newline record separator, the
    /// default delimiter alphabet.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Creates the compact configuration: `;` record separator, otherwise
    /// the default alphabet.
    #[must_use]
    pub fn compact() -> Self {
        Config {
            record_separator: ';',
            ..Default::default()
        }
    }

    /// Sets the delimiter between values within a record. Default `|`.
    #[must_use]
    pub fn with_field_delimiter(mut self, ch: char) -> Self {
        self.field_delimiter = ch;
        self
    }

    /// Sets the separator between depth and index in an array path.
    /// Default `:`.
    #[must_use]
    pub fn with_path_separator(mut self, ch: char) -> Self {
        self.path_separator = ch;
        self
    }

    /// Sets the marker preceding array sizes in the schema segment.
    /// Default `#`.
    #[must_use]
    pub fn with_array_size_marker(mut self, ch: char) -> Self {
        self.array_size_marker = ch;
        self
    }

    /// Sets the separator between records. Default `\n` (standard) or `;`
    /// (compact).
    #[must_use]
    pub fn with_record_separator(mut self, ch: char) -> Self {
        self.record_separator = ch;
        self
    }

    /// Sets the escape character. Default `\`.
    #[must_use]
    pub fn with_escape(mut self, ch: char) -> Self {
        self.escape = ch;
        self
    }

    /// Sets the brackets around the schema root declaration. Default `[` `]`.
    #[must_use]
    pub fn with_schema_brackets(mut self, open: char, close: char) -> Self {
        self.schema_open = open;
        self.schema_close = close;
        self
    }

    /// Sets the brackets around field lists. Default `(` `)`.
    #[must_use]
    pub fn with_fields_brackets(mut self, open: char, close: char) -> Self {
        self.fields_open = open;
        self.fields_close = close;
        self
    }

    /// Sets the brackets around nested object field lists. Default `{` `}`.
    #[must_use]
    pub fn with_nested_object_brackets(mut self, open: char, close: char) -> Self {
        self.nested_object_open = open;
        self.nested_object_close = close;
        self
    }

    /// Sets the separator between field names in the schema segment.
    /// Default `,`.
    #[must_use]
    pub fn with_schema_field_separator(mut self, ch: char) -> Self {
        self.schema_field_separator = ch;
        self
    }

    /// Sets the policy for sibling keys next to a governing root array.
    #[must_use]
    pub fn with_multi_root_policy(mut self, policy: MultiRootPolicy) -> Self {
        self.multi_root_policy = policy;
        self
    }
}
