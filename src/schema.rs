//! Schema inference and rendering.
//!
//! PLOON is a schema-once format: a single structural schema is inferred
//! from the full value tree before any record is emitted, rendered at the
//! head of the document, and never repeated per record. This module holds
//! the schema types, the inference walk, and the schema-segment renderer.
//! Parsing schema text back is the decoder's job ([`crate::de`]); the
//! decoder depends only on the schema grammar, not on inference.
//!
//! ## Root dispatch
//!
//! - Object root whose **first** value is an array: that array governs the
//!   document (`[name#count](...)`). Sibling keys are ignored or rejected
//!   per [`crate::MultiRootPolicy`].
//! - Any other object root: the whole object is a singleton root named
//!   `root`, with no count.
//! - Array root: a collection named `root`.
//!
//! ## Examples
//!
//! ```rust
//! use ploon::{ploon, Config, SchemaNode};
//!
//! let value = ploon!({"users": [{"id": 1, "name": "Alice"}, {"id": 2}]});
//! let schema = SchemaNode::infer(&value, &Config::standard()).unwrap();
//!
//! assert_eq!(schema.root_name, "users");
//! assert_eq!(schema.count, Some(2));
//! assert_eq!(schema.render(&Config::standard()), "[users#2](id,name)");
//! ```

use crate::config::MultiRootPolicy;
use crate::{Config, Error, PloonMap, Result, Value};

/// Structural kind of a schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Primitive,
    Array,
    Object,
}

/// A single field in the inferred schema.
///
/// `nested` is present only when the field's source collection was non-empty
/// and contained compound structure; arrays of bare primitives infer to a
/// field with no nested list and produce no data records.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub kind: FieldKind,
    pub nested: Option<Vec<SchemaField>>,
    /// True only for Primitive fields absent from at least one sibling item
    /// of the array that produced this field list. Not encoded on the wire;
    /// fields parsed back from schema text are never optional.
    pub optional: bool,
}

impl SchemaField {
    fn primitive(name: &str) -> Self {
        SchemaField {
            name: name.to_string(),
            kind: FieldKind::Primitive,
            nested: None,
            optional: false,
        }
    }
}

/// The inferred schema of a whole document.
///
/// `count` is present iff the root collection is an array. Field order is
/// first-seen order across the union of keys encountered while scanning the
/// governing collection.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaNode {
    pub root_name: String,
    pub count: Option<usize>,
    pub fields: Vec<SchemaField>,
}

impl SchemaNode {
    /// Infers the schema of `root` in a single walk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRoot`] for primitive roots and
    /// [`Error::AmbiguousRoot`] when a governing root array has sibling keys
    /// under [`MultiRootPolicy::Error`].
    pub fn infer(root: &Value, config: &Config) -> Result<SchemaNode> {
        match root {
            Value::Object(obj) => match obj.first() {
                Some((key, Value::Array(arr))) => {
                    if config.multi_root_policy == MultiRootPolicy::Error && obj.len() > 1 {
                        return Err(Error::AmbiguousRoot {
                            extra: obj.len() - 1,
                        });
                    }
                    Ok(SchemaNode {
                        root_name: key.clone(),
                        count: Some(arr.len()),
                        fields: analyze_array(arr),
                    })
                }
                _ => Ok(SchemaNode {
                    root_name: "root".to_string(),
                    count: None,
                    fields: analyze_object(obj),
                }),
            },
            Value::Array(arr) => Ok(SchemaNode {
                root_name: "root".to_string(),
                count: Some(arr.len()),
                fields: analyze_array(arr),
            }),
            other => Err(Error::unsupported_root(&format!(
                "expected object or array root, found {}",
                kind_name(other)
            ))),
        }
    }

    /// Renders the schema segment, e.g. `[orders#2](id,customer{name})`.
    #[must_use]
    pub fn render(&self, config: &Config) -> String {
        let mut out = String::with_capacity(32);
        out.push(config.schema_open);
        out.push_str(&self.root_name);
        if let Some(count) = self.count {
            out.push(config.array_size_marker);
            out.push_str(&count.to_string());
        }
        out.push(config.schema_close);
        out.push(config.fields_open);
        render_fields(&mut out, &self.fields, config);
        out.push(config.fields_close);
        out
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Unions the keys of every object item into a field list, then marks
/// primitives optional when any object item omits them. Non-object items
/// contribute nothing.
fn analyze_array(items: &[Value]) -> Vec<SchemaField> {
    let mut fields: Vec<SchemaField> = Vec::new();

    for item in items {
        if let Value::Object(obj) = item {
            for (key, value) in obj.iter() {
                if !fields.iter().any(|f| f.name == *key) {
                    fields.push(infer_field(key, value));
                }
            }
        }
    }

    for field in &mut fields {
        if field.kind == FieldKind::Primitive {
            field.optional = items.iter().any(|item| match item {
                Value::Object(obj) => !obj.contains_key(&field.name),
                _ => false,
            });
        }
    }

    fields
}

/// Iterates the object's own keys in order. No optionality at this level:
/// a single object has no sibling union to compare against.
fn analyze_object(obj: &PloonMap) -> Vec<SchemaField> {
    obj.iter()
        .map(|(key, value)| infer_field(key, value))
        .collect()
}

/// Infers a field's kind from its first-seen value.
fn infer_field(name: &str, value: &Value) -> SchemaField {
    match value {
        Value::Array(arr) => {
            // Nested analysis only when the first element is compound;
            // arrays of bare primitives carry no field list.
            let nested = match arr.first() {
                Some(Value::Object(_)) => {
                    let inner = analyze_array(arr);
                    if inner.is_empty() {
                        None
                    } else {
                        Some(inner)
                    }
                }
                _ => None,
            };
            SchemaField {
                name: name.to_string(),
                kind: FieldKind::Array,
                nested,
                optional: false,
            }
        }
        Value::Object(obj) => {
            let inner = analyze_object(obj);
            SchemaField {
                name: name.to_string(),
                kind: FieldKind::Object,
                nested: if inner.is_empty() { None } else { Some(inner) },
                optional: false,
            }
        }
        _ => SchemaField::primitive(name),
    }
}

fn render_fields(out: &mut String, fields: &[SchemaField], config: &Config) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(config.schema_field_separator);
        }
        match field.kind {
            FieldKind::Primitive => out.push_str(&field.name),
            FieldKind::Array => {
                out.push_str(&field.name);
                out.push(config.array_size_marker);
                if let Some(nested) = &field.nested {
                    out.push(config.fields_open);
                    render_fields(out, nested, config);
                    out.push(config.fields_close);
                }
            }
            FieldKind::Object => {
                out.push_str(&field.name);
                if let Some(nested) = &field.nested {
                    out.push(config.nested_object_open);
                    render_fields(out, nested, config);
                    out.push(config.nested_object_close);
                }
            }
        }
    }
}

/// Number of Primitive fields at one level; the decoder's strict
/// consistency check compares record value counts against this.
pub(crate) fn primitive_count(fields: &[SchemaField]) -> usize {
    fields
        .iter()
        .filter(|f| f.kind == FieldKind::Primitive)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ploon;

    fn infer(value: &Value) -> SchemaNode {
        SchemaNode::infer(value, &Config::standard()).unwrap()
    }

    #[test]
    fn test_array_root_under_key() {
        let value = ploon!({"users": [{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}]});
        let schema = infer(&value);
        assert_eq!(schema.root_name, "users");
        assert_eq!(schema.count, Some(2));
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.render(&Config::standard()), "[users#2](id,name)");
    }

    #[test]
    fn test_singleton_object_root() {
        let value = ploon!({"a": 1, "b": 2});
        let schema = infer(&value);
        assert_eq!(schema.root_name, "root");
        assert_eq!(schema.count, None);
        assert_eq!(schema.render(&Config::standard()), "[root](a,b)");
    }

    #[test]
    fn test_bare_array_root() {
        let value = ploon!([{"x": 1}]);
        let schema = infer(&value);
        assert_eq!(schema.root_name, "root");
        assert_eq!(schema.count, Some(1));
    }

    #[test]
    fn test_optional_marking() {
        let value = ploon!({"items": [{"a": 1, "b": 2}, {"a": 3}]});
        let schema = infer(&value);
        let b = schema.fields.iter().find(|f| f.name == "b").unwrap();
        assert!(b.optional);
        let a = schema.fields.iter().find(|f| f.name == "a").unwrap();
        assert!(!a.optional);
    }

    #[test]
    fn test_field_order_is_first_seen() {
        let value = ploon!({"items": [{"b": 1}, {"a": 2, "b": 3}]});
        let schema = infer(&value);
        let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_nested_kinds() {
        let value = ploon!({"orders": [
            {"id": 101, "customer": {"name": "Alice"}, "tags": ["new"], "lines": [{"sku": "A"}]}
        ]});
        let schema = infer(&value);
        assert_eq!(
            schema.render(&Config::standard()),
            "[orders#1](id,customer{name},tags#,lines#(sku))"
        );

        let tags = schema.fields.iter().find(|f| f.name == "tags").unwrap();
        assert_eq!(tags.kind, FieldKind::Array);
        assert!(tags.nested.is_none());

        let lines = schema.fields.iter().find(|f| f.name == "lines").unwrap();
        assert!(lines.nested.is_some());
    }

    #[test]
    fn test_sibling_keys_ignored_by_default() {
        let value = ploon!({"orders": [{"id": 1}], "ignored": 5});
        let schema = infer(&value);
        assert_eq!(schema.root_name, "orders");
        assert_eq!(schema.fields.len(), 1);
    }

    #[test]
    fn test_sibling_keys_rejected_under_error_policy() {
        let value = ploon!({"orders": [{"id": 1}], "extra": 5});
        let config = Config::standard().with_multi_root_policy(MultiRootPolicy::Error);
        let err = SchemaNode::infer(&value, &config).unwrap_err();
        assert_eq!(err, Error::AmbiguousRoot { extra: 1 });
    }

    #[test]
    fn test_primitive_root_rejected() {
        let err = SchemaNode::infer(&Value::from(42), &Config::standard()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedRoot(_)));
    }
}
