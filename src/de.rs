//! PLOON decoding.
//!
//! This module provides the [`Decoder`], a four-stage state machine that is
//! a pure function of its input text:
//!
//! 1. **Split** the document into schema and data segments
//! 2. **Parse** the schema segment into a [`SchemaNode`]
//! 3. **Tokenize** the data segment into path-tagged records with an
//!    escape-aware scanner
//! 4. **Validate** (strict mode only) and **reconstruct** the value tree
//!    depth-first, guided by the schema
//!
//! The decoder depends only on the schema grammar, never on the encoder.
//! All reconstructed primitives are untyped strings; PLOON does not carry a
//! type system for decoded data.
//!
//! ## Strict vs lenient
//!
//! Strict mode (the default) rejects records whose path fails the grammar
//! and array items whose value count disagrees with the schema. Lenient mode
//! skips both checks and reconstructs best-effort, which can bind values to
//! wrong positions if the input is truly malformed.
//!
//! ```rust
//! use ploon::{parse, parse_lenient, Error};
//!
//! let text = "[test#1](value)\n\nabc:1|test";
//! assert!(matches!(parse(text), Err(Error::InvalidPath { .. })));
//! assert!(parse_lenient(text).is_ok());
//! ```
//!
//! ## Known limitation: scope-free nested lookup
//!
//! When reconstructing an item's Object- or Array-kind fields, the decoder
//! searches the whole record set at the next depth rather than scoping to
//! the owning parent item. Documents where several sibling items carry
//! nested collections at the same depth are therefore merged under the
//! first item. This is a property of the path scheme itself; disambiguating
//! it would be a wire-format change, not a decoder fix.

use crate::schema::{primitive_count, FieldKind, SchemaField, SchemaNode};
use crate::{Config, Error, PloonMap, Result, Value};
use std::collections::BTreeMap;

/// Where a record belongs in the tree.
///
/// Array paths render as `depth:index`; object paths as the depth followed
/// by a literal ASCII space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathTag {
    Array { depth: usize, index: usize },
    Object { depth: usize },
}

/// One tokenized record: a path tag plus its unescaped values.
#[derive(Clone, Debug, PartialEq)]
pub struct DataRecord {
    pub path: PathTag,
    pub values: Vec<String>,
}

/// The PLOON decoder.
///
/// Created with a [`Config`] describing the delimiter alphabet; strict mode
/// is on by default.
///
/// # Examples
///
/// ```rust
/// use ploon::{Config, Decoder};
///
/// let decoder = Decoder::new(Config::standard());
/// let value = decoder.decode("[users#1](id,name)\n\n1:1|1|Alice").unwrap();
/// let users = value.as_object().unwrap().get("users").unwrap();
/// assert_eq!(users.as_array().unwrap().len(), 1);
/// ```
pub struct Decoder {
    config: Config,
    strict: bool,
}

impl Decoder {
    pub fn new(config: Config) -> Self {
        Decoder {
            config,
            strict: true,
        }
    }

    /// Disables strict validation: bad paths are dropped instead of fatal
    /// and value counts are not checked against the schema.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Decodes a full PLOON document into a value tree.
    ///
    /// Array-rooted documents reconstruct as `{root_name: [...]}`;
    /// object-rooted documents reconstruct as the singleton object itself.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for blank text, [`Error::MalformedSchema`] for
    /// a broken schema segment, and in strict mode [`Error::InvalidPath`] /
    /// [`Error::SchemaInconsistency`] for bad records.
    pub fn decode(&self, text: &str) -> Result<Value> {
        let text = text.trim_start();
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let (schema_segment, data_segment) = self.split_segments(text)?;
        let schema = self.parse_schema(schema_segment)?;
        let records = self.tokenize(data_segment)?;

        if self.strict {
            self.check_consistency(&schema, &records)?;
        }

        if schema.count.is_some() {
            let items = self.reconstruct_array(&schema.fields, &records, 1);
            let mut root = PloonMap::with_capacity(1);
            root.insert(schema.root_name.clone(), Value::Array(items));
            Ok(Value::Object(root))
        } else {
            let obj = self
                .reconstruct_nested_object(&schema.fields, &records, 1)
                .unwrap_or_default();
            Ok(Value::Object(obj))
        }
    }

    /// Splits at the fields-close terminating the schema's field list (the
    /// first one at nesting depth zero, so nested field groups survive).
    /// The data segment starts after it, with leading record separators and
    /// whitespace skipped.
    fn split_segments<'t>(&self, text: &'t str) -> Result<(&'t str, &'t str)> {
        if !text.starts_with(self.config.schema_open) {
            return Err(Error::malformed_schema(
                fragment(text),
                "document does not start with the schema open bracket",
            ));
        }

        let mut depth = 0usize;
        let mut entered = false;
        for (pos, ch) in text.char_indices() {
            if ch == self.config.fields_open {
                depth += 1;
                entered = true;
            } else if ch == self.config.fields_close {
                if depth == 0 {
                    return Err(Error::malformed_schema(
                        fragment(text),
                        "fields close bracket before any open bracket",
                    ));
                }
                depth -= 1;
                if depth == 0 {
                    let end = pos + ch.len_utf8();
                    let data = text[end..].trim_start_matches(|c: char| {
                        c == self.config.record_separator || c.is_whitespace()
                    });
                    return Ok((&text[..end], data));
                }
            }
        }

        let msg = if entered {
            "unterminated field list"
        } else {
            "missing field list brackets"
        };
        Err(Error::malformed_schema(fragment(text), msg))
    }

    /// Parses the schema segment: root name and optional count between the
    /// schema brackets, then the recursive field list.
    fn parse_schema(&self, segment: &str) -> Result<SchemaNode> {
        let close = segment.find(self.config.schema_close).ok_or_else(|| {
            Error::malformed_schema(fragment(segment), "missing schema close bracket")
        })?;
        let root_token = &segment[self.config.schema_open.len_utf8()..close];

        let (root_name, count) = match root_token.find(self.config.array_size_marker) {
            Some(pos) => {
                let digits = &root_token[pos + self.config.array_size_marker.len_utf8()..];
                let count = digits.parse::<usize>().map_err(|_| {
                    Error::malformed_schema(root_token, "array size is not an integer")
                })?;
                (&root_token[..pos], Some(count))
            }
            None => (root_token, None),
        };

        let after_close = &segment[close + self.config.schema_close.len_utf8()..];
        if !after_close.starts_with(self.config.fields_open)
            || !after_close.ends_with(self.config.fields_close)
        {
            return Err(Error::malformed_schema(
                fragment(segment),
                "schema close bracket is not followed by a field list",
            ));
        }
        let inner = &after_close[self.config.fields_open.len_utf8()
            ..after_close.len() - self.config.fields_close.len_utf8()];

        Ok(SchemaNode {
            root_name: root_name.to_string(),
            count,
            fields: self.parse_field_list(inner)?,
        })
    }

    /// Splits a field list on the schema field separator at nesting depth
    /// zero and classifies each token.
    fn parse_field_list(&self, text: &str) -> Result<Vec<SchemaField>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut fields = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;
        for (pos, ch) in text.char_indices() {
            if ch == self.config.fields_open || ch == self.config.nested_object_open {
                depth += 1;
            } else if ch == self.config.fields_close || ch == self.config.nested_object_close {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::malformed_schema(text, "unbalanced brackets in field list")
                })?;
            } else if ch == self.config.schema_field_separator && depth == 0 {
                fields.push(self.parse_field(&text[start..pos])?);
                start = pos + ch.len_utf8();
            }
        }
        if depth != 0 {
            return Err(Error::malformed_schema(
                text,
                "unterminated nested group in field list",
            ));
        }
        fields.push(self.parse_field(&text[start..])?);
        Ok(fields)
    }

    /// Classifies one field token: the earlier of the array marker and the
    /// nested-object open bracket decides the kind; neither means Primitive.
    fn parse_field(&self, token: &str) -> Result<SchemaField> {
        let token = token.trim();
        let marker = token.find(self.config.array_size_marker);
        let brace = token.find(self.config.nested_object_open);

        match (marker, brace) {
            (Some(m), b) if b.map_or(true, |b| m < b) => {
                let name = &token[..m];
                let rest = &token[m + self.config.array_size_marker.len_utf8()..];
                let nested = if rest.is_empty() {
                    None
                } else if rest.starts_with(self.config.fields_open)
                    && rest.ends_with(self.config.fields_close)
                {
                    let inner = &rest[self.config.fields_open.len_utf8()
                        ..rest.len() - self.config.fields_close.len_utf8()];
                    Some(self.parse_field_list(inner)?)
                } else {
                    return Err(Error::malformed_schema(
                        token,
                        "unterminated nested field group after array marker",
                    ));
                };
                Ok(SchemaField {
                    name: name.to_string(),
                    kind: FieldKind::Array,
                    nested,
                    optional: false,
                })
            }
            (_, Some(b)) => {
                let name = &token[..b];
                let rest = &token[b..];
                if !rest.ends_with(self.config.nested_object_close) {
                    return Err(Error::malformed_schema(
                        token,
                        "unterminated nested object group",
                    ));
                }
                let inner = &rest[self.config.nested_object_open.len_utf8()
                    ..rest.len() - self.config.nested_object_close.len_utf8()];
                Ok(SchemaField {
                    name: name.to_string(),
                    kind: FieldKind::Object,
                    nested: Some(self.parse_field_list(inner)?),
                    optional: false,
                })
            }
            _ => Ok(SchemaField {
                name: token.to_string(),
                kind: FieldKind::Primitive,
                nested: None,
                optional: false,
            }),
        }
    }

    /// Tokenizes the data segment into records. Records with no field
    /// delimiter are dropped silently in both modes. In strict mode an
    /// unparseable path is fatal; in lenient mode the record is dropped.
    fn tokenize(&self, data: &str) -> Result<Vec<DataRecord>> {
        let mut records = Vec::new();

        for raw in split_escaped(data, self.config.record_separator, self.config.escape) {
            if raw.trim().is_empty() {
                continue;
            }
            let Some(delim) = find_unescaped(&raw, self.config.field_delimiter, self.config.escape)
            else {
                continue;
            };
            let (path_text, values_text) = (
                &raw[..delim],
                &raw[delim + self.config.field_delimiter.len_utf8()..],
            );

            let Some(path) = self.parse_path(path_text) else {
                if self.strict {
                    return Err(Error::invalid_path(path_text));
                }
                continue;
            };

            let values = split_escaped(values_text, self.config.field_delimiter, self.config.escape)
                .into_iter()
                .map(|v| self.unescape(&v))
                .collect();

            records.push(DataRecord { path, values });
        }

        Ok(records)
    }

    /// Path grammar: `digits` (object path, trailing space tolerated) or
    /// `digits:digits` (array path).
    fn parse_path(&self, text: &str) -> Option<PathTag> {
        match text.find(self.config.path_separator) {
            Some(pos) => {
                let depth = text[..pos].trim().parse::<usize>().ok()?;
                let index = text[pos + self.config.path_separator.len_utf8()..]
                    .trim()
                    .parse::<usize>()
                    .ok()?;
                Some(PathTag::Array { depth, index })
            }
            None => {
                let depth = text.trim().parse::<usize>().ok()?;
                Some(PathTag::Object { depth })
            }
        }
    }

    /// Reverses record escaping: escape+delimiter, escape+record-separator
    /// and escape+escape become the bare character; unknown escape pairs
    /// are preserved literally.
    fn unescape(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == self.config.escape {
                match chars.peek() {
                    Some(&next)
                        if next == self.config.field_delimiter
                            || next == self.config.record_separator
                            || next == self.config.escape =>
                    {
                        out.push(next);
                        chars.next();
                    }
                    _ => out.push(ch),
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    /// Strict mode: for an array root, every depth-1 item's primitive value
    /// count must equal the schema's depth-1 primitive field count.
    fn check_consistency(&self, schema: &SchemaNode, records: &[DataRecord]) -> Result<()> {
        if schema.count.is_none() {
            return Ok(());
        }
        let expected = primitive_count(&schema.fields);

        let mut groups: BTreeMap<usize, usize> = BTreeMap::new();
        for record in records {
            if let PathTag::Array { depth: 1, index } = record.path {
                *groups.entry(index).or_insert(0) += record.values.len();
            }
        }
        for (index, found) in groups {
            if found != expected {
                return Err(Error::schema_inconsistency(index, expected, found));
            }
        }
        Ok(())
    }

    /// Items `1..=max` at this depth; indices with no record produce no
    /// entry, so malformed input can yield fewer items than the declared
    /// count. Nothing is padded.
    fn reconstruct_array(
        &self,
        fields: &[SchemaField],
        records: &[DataRecord],
        depth: usize,
    ) -> Vec<Value> {
        let max = records
            .iter()
            .filter_map(|r| match r.path {
                PathTag::Array { depth: d, index } if d == depth => Some(index),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let mut items = Vec::new();
        for i in 1..=max {
            let record = records.iter().find(|r| {
                matches!(r.path, PathTag::Array { depth: d, index } if d == depth && index == i)
            });
            if let Some(record) = record {
                items.push(Value::Object(self.build_object(
                    fields,
                    records,
                    depth,
                    &record.values,
                )));
            }
        }
        items
    }

    /// First record with an object path at this depth, if any.
    fn reconstruct_nested_object(
        &self,
        fields: &[SchemaField],
        records: &[DataRecord],
        depth: usize,
    ) -> Option<PloonMap> {
        let record = records
            .iter()
            .find(|r| matches!(r.path, PathTag::Object { depth: d } if d == depth))?;
        Some(self.build_object(fields, records, depth, &record.values))
    }

    /// Binds values to Primitive fields positionally: the Nth primitive
    /// field takes the Nth value, all as untyped strings; missing trailing
    /// values leave fields unset. Compound fields then recurse at the next
    /// depth over the whole record set (the scope-free lookup documented at
    /// module level).
    fn build_object(
        &self,
        fields: &[SchemaField],
        records: &[DataRecord],
        depth: usize,
        values: &[String],
    ) -> PloonMap {
        let mut map = PloonMap::with_capacity(fields.len());

        let mut slot = 0usize;
        for field in fields {
            if field.kind != FieldKind::Primitive {
                continue;
            }
            if let Some(value) = values.get(slot) {
                map.insert(field.name.clone(), Value::String(value.clone()));
            }
            slot += 1;
        }

        for field in fields {
            if field.kind == FieldKind::Object {
                let nested = field.nested.as_deref().unwrap_or(&[]);
                if let Some(obj) = self.reconstruct_nested_object(nested, records, depth + 1) {
                    map.insert(field.name.clone(), Value::Object(obj));
                }
            }
        }
        for field in fields {
            if field.kind == FieldKind::Array {
                let present = records.iter().any(
                    |r| matches!(r.path, PathTag::Array { depth: d, .. } if d == depth + 1),
                );
                if present {
                    let nested = field.nested.as_deref().unwrap_or(&[]);
                    let items = self.reconstruct_array(nested, records, depth + 1);
                    map.insert(field.name.clone(), Value::Array(items));
                }
            }
        }

        map
    }
}

/// Trims a fragment of offending text for error context.
fn fragment(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(40)
        .map(|(pos, _)| pos)
        .unwrap_or(text.len());
    &text[..end]
}

/// Splits `text` on `separator`, honoring `escape`: an escaped separator is
/// literal and does not split. Escape pairs pass through untouched for the
/// later unescape step. Explicit scanner rather than substring replacement
/// so nothing is ever double-unescaped.
fn split_escaped(text: &str, separator: char, escape: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for ch in text.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
        } else if ch == escape {
            current.push(ch);
            escaped = true;
        } else if ch == separator {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    parts.push(current);
    parts
}

/// Byte position of the first unescaped occurrence of `needle`.
fn find_unescaped(text: &str, needle: char, escape: char) -> Option<usize> {
    let mut escaped = false;
    for (pos, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == escape {
            escaped = true;
        } else if ch == needle {
            return Some(pos);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> Decoder {
        Decoder::new(Config::standard())
    }

    #[test]
    fn test_split_segments_nested_groups() {
        let d = decoder();
        let (schema, data) = d
            .split_segments("[products#1](id,colors#(name))\n\n1:1|1")
            .unwrap();
        assert_eq!(schema, "[products#1](id,colors#(name))");
        assert_eq!(data, "1:1|1");
    }

    #[test]
    fn test_parse_schema_roundtrip() {
        let d = decoder();
        let schema = d
            .parse_schema("[orders#2](id,customer{name},tags#,lines#(sku))")
            .unwrap();
        assert_eq!(schema.root_name, "orders");
        assert_eq!(schema.count, Some(2));
        assert_eq!(schema.fields.len(), 4);
        assert_eq!(schema.fields[1].kind, FieldKind::Object);
        assert_eq!(schema.fields[2].kind, FieldKind::Array);
        assert!(schema.fields[2].nested.is_none());
        assert_eq!(
            schema.fields[3].nested.as_ref().map(|n| n.len()),
            Some(1)
        );
        assert_eq!(schema.render(&Config::standard()),
            "[orders#2](id,customer{name},tags#,lines#(sku))");
    }

    #[test]
    fn test_object_root_schema_has_no_count() {
        let d = decoder();
        let schema = d.parse_schema("[root](a,b)").unwrap();
        assert_eq!(schema.count, None);
        assert_eq!(schema.fields.len(), 2);
    }

    #[test]
    fn test_malformed_schema_errors() {
        let d = decoder();
        assert!(matches!(
            d.decode("no brackets at all"),
            Err(Error::MalformedSchema { .. })
        ));
        assert!(matches!(
            d.decode("[test#1](a,b"),
            Err(Error::MalformedSchema { .. })
        ));
        assert!(matches!(
            d.parse_schema("[test#x](a)"),
            Err(Error::MalformedSchema { .. })
        ));
        assert!(matches!(
            d.parse_field_list("a,b{c"),
            Err(Error::MalformedSchema { .. })
        ));
    }

    #[test]
    fn test_tokenize_drops_delimiterless_records() {
        let d = decoder();
        let records = d.tokenize("1:1|a\njunk without delimiter\n1:2|b").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_tokenize_unescapes() {
        let d = decoder();
        let records = d.tokenize("1:1|a\\|b|c").unwrap();
        assert_eq!(records[0].values, vec!["a|b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_path_parsing() {
        let d = decoder();
        assert_eq!(
            d.parse_path("2:3"),
            Some(PathTag::Array { depth: 2, index: 3 })
        );
        assert_eq!(d.parse_path("2 "), Some(PathTag::Object { depth: 2 }));
        assert_eq!(d.parse_path("abc"), None);
        assert_eq!(d.parse_path("abc:1"), None);
    }

    #[test]
    fn test_strict_invalid_path() {
        let err = decoder().decode("[test#1](value)\n\nabc:1|test").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPath {
                path: "abc:1".to_string()
            }
        );
    }

    #[test]
    fn test_lenient_drops_bad_paths() {
        let d = Decoder::new(Config::standard()).lenient();
        let value = d.decode("[test#1](value)\n\nabc:1|test").unwrap();
        let arr = value.as_object().unwrap().get("test").unwrap();
        assert_eq!(arr.as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_strict_consistency_check() {
        // Schema declares two primitives, record carries one.
        let err = decoder().decode("[items#1](a,b)\n\n1:1|only").unwrap_err();
        assert_eq!(err, Error::schema_inconsistency(1, 2, 1));
    }

    #[test]
    fn test_missing_indices_leave_gaps() {
        let value = decoder().decode("[items#3](a)\n\n1:1|x\n1:3|z").unwrap();
        let items = value.as_object().unwrap().get("items").unwrap();
        // Index 2 has no record: two entries, not padded to the count.
        assert_eq!(items.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decoder().decode("   \n  ").unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_nested_reconstruction() {
        let value = decoder()
            .decode("[orders#1](id,customer{name})\n\n1:1|101\n2 |Alice")
            .unwrap();
        let orders = value.as_object().unwrap().get("orders").unwrap();
        let first = &orders.as_array().unwrap()[0];
        assert_eq!(
            first.as_object().unwrap().get("id").unwrap().as_str(),
            Some("101")
        );
        let customer = first.as_object().unwrap().get("customer").unwrap();
        assert_eq!(
            customer.as_object().unwrap().get("name").unwrap().as_str(),
            Some("Alice")
        );
    }

    #[test]
    fn test_compact_form() {
        let d = Decoder::new(Config::compact());
        let value = d.decode("[items#2](id);1:1|1;1:2|2").unwrap();
        let items = value.as_object().unwrap().get("items").unwrap();
        assert_eq!(items.as_array().unwrap().len(), 2);
    }
}
