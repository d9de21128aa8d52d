//! Path-addressed encoding.
//!
//! This module provides the [`Encoder`], the second pass of the two-pass
//! encode pipeline: schema inference walks the tree once to produce a
//! [`SchemaNode`], then the encoder walks it again, guided by that schema,
//! emitting ordered path-tagged records.
//!
//! ## Record addressing
//!
//! - Array items: `depth:index|v1|v2|...` with 1-based indices that restart
//!   independently for every nested array.
//! - Nested objects: `depth |v1|v2|...`, the depth followed by a literal
//!   ASCII space. The space is a fixed wire convention, independent of the
//!   configured path separator.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use ploon::{ploon, stringify};
//!
//! let value = ploon!({"orders": [{"id": 101, "customer": {"name": "Alice"}}]});
//! let text = stringify(&value).unwrap();
//! assert_eq!(text, "[orders#1](id,customer{name})\n\n1:1|101\n2 |Alice");
//! ```
//!
//! This module also hosts [`ValueSerializer`], the serde bridge that turns
//! any `T: Serialize` into a [`Value`] tree for the codec to consume.

use crate::schema::{FieldKind, SchemaField, SchemaNode};
use crate::{Config, Error, PloonMap, Result, Value};
use serde::{ser, Serialize};

/// The PLOON record encoder.
///
/// Walks a [`Value`] tree guided by an already-inferred [`SchemaNode`] and
/// produces the ordered record sequence of the data segment. The schema is
/// borrowed, never copied, through the whole recursion.
pub struct Encoder<'a> {
    config: &'a Config,
    records: Vec<String>,
}

impl<'a> Encoder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Encoder {
            config,
            records: Vec::new(),
        }
    }

    /// Encodes `root` into path-tagged records.
    ///
    /// Dispatch mirrors schema inference: the same governing array/object
    /// that produced the schema is selected, and recursion starts at depth 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRoot`] when `root` is a bare primitive.
    pub fn encode(mut self, root: &Value, schema: &SchemaNode) -> Result<Vec<String>> {
        match root {
            Value::Object(obj) => match obj.first() {
                Some((_, Value::Array(arr))) => self.encode_array(arr, &schema.fields, 1),
                _ => self.encode_nested_object(obj, &schema.fields, 1),
            },
            Value::Array(arr) => self.encode_array(arr, &schema.fields, 1),
            _ => return Err(Error::unsupported_root("cannot encode a primitive root")),
        }
        Ok(self.records)
    }

    /// Emits one record per object item, 1-based. Non-object items are
    /// skipped: no record, no error.
    fn encode_array(&mut self, items: &[Value], fields: &[SchemaField], depth: usize) {
        for (i, item) in items.iter().enumerate() {
            if let Value::Object(obj) = item {
                self.encode_object_item(obj, fields, depth, i + 1);
            }
        }
    }

    fn encode_object_item(
        &mut self,
        item: &PloonMap,
        fields: &[SchemaField],
        depth: usize,
        index: usize,
    ) {
        let values = self.collect_primitives(item, fields);
        if !values.is_empty() {
            let delim = self.config.field_delimiter;
            let mut record = format!("{}{}{}", depth, self.config.path_separator, index);
            for value in &values {
                record.push(delim);
                record.push_str(value);
            }
            self.records.push(record);
        }
        self.recurse_compound(item, fields, depth);
    }

    fn encode_nested_object(&mut self, obj: &PloonMap, fields: &[SchemaField], depth: usize) {
        let values = self.collect_primitives(obj, fields);
        if !values.is_empty() {
            let delim = self.config.field_delimiter;
            // Object paths are the depth plus a literal space, always.
            let mut record = format!("{} ", depth);
            for value in &values {
                record.push(delim);
                record.push_str(value);
            }
            self.records.push(record);
        }
        self.recurse_compound(obj, fields, depth);
    }

    /// Object-kind fields recurse first, then Array-kind fields, each at
    /// depth + 1. Nested array indices restart at 1 per array.
    fn recurse_compound(&mut self, obj: &PloonMap, fields: &[SchemaField], depth: usize) {
        for field in fields {
            if field.kind == FieldKind::Object {
                if let Some(Value::Object(inner)) = obj.get(&field.name) {
                    self.encode_nested_object(
                        inner,
                        field.nested.as_deref().unwrap_or(&[]),
                        depth + 1,
                    );
                }
            }
        }
        for field in fields {
            if field.kind == FieldKind::Array {
                if let Some(Value::Array(inner)) = obj.get(&field.name) {
                    self.encode_array(inner, field.nested.as_deref().unwrap_or(&[]), depth + 1);
                }
            }
        }
    }

    /// Collects values for every Primitive field in schema order: present
    /// key formats its value, absent key on an optional field contributes
    /// empty text, absent key on a required field is omitted entirely and
    /// shifts subsequent positions (matching optionality semantics).
    fn collect_primitives(&self, obj: &PloonMap, fields: &[SchemaField]) -> Vec<String> {
        let mut values = Vec::new();
        for field in fields {
            if field.kind != FieldKind::Primitive {
                continue;
            }
            match obj.get(&field.name) {
                Some(value) => values.push(self.format_value(value)),
                None if field.optional => values.push(String::new()),
                None => {}
            }
        }
        values
    }

    fn format_value(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Value::Number(n) => n.as_str().to_string(),
            Value::String(s) => self.escape(s),
            // Compound value in a primitive slot: the schema was inferred
            // from a differently-shaped sibling. Renders as empty text.
            Value::Array(_) | Value::Object(_) => String::new(),
        }
    }

    /// Character-level escaping; assumes single-character delimiters. The
    /// escape character is prepended before any character equal to the
    /// field delimiter, the record separator, or the escape itself.
    fn escape(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            if ch == self.config.field_delimiter
                || ch == self.config.record_separator
                || ch == self.config.escape
            {
                out.push(self.config.escape);
            }
            out.push(ch);
        }
        out
    }
}

/// Serde serializer with `Ok = Value`: converts any `T: Serialize` into a
/// [`Value`] tree. This is the external-collaborator bridge between
/// host-language objects and the codec's abstract tree.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: PloonMap,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v.iter().map(|&b| Value::from(b)).collect();
        Ok(Value::Array(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::custom("newtype variants are not supported"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple(self, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::custom("tuple variants are not supported"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Err(Error::custom("struct variants are not supported"))
    }
}

impl SerializeVec {
    fn new() -> Self {
        SerializeVec { vec: Vec::new() }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: PloonMap::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ploon;

    fn encode(value: &Value) -> Vec<String> {
        let config = Config::standard();
        let schema = SchemaNode::infer(value, &config).unwrap();
        Encoder::new(&config).encode(value, &schema).unwrap()
    }

    #[test]
    fn test_depth_path_scheme() {
        let value = ploon!({"orders": [{"id": 101, "customer": {"name": "Alice"}}]});
        assert_eq!(encode(&value), vec!["1:1|101", "2 |Alice"]);
    }

    #[test]
    fn test_nested_array_indices_restart() {
        let value = ploon!({"products": [
            {"id": 1, "colors": [{"name": "Red"}, {"name": "Blue"}]}
        ]});
        assert_eq!(encode(&value), vec!["1:1|1", "2:1|Red", "2:2|Blue"]);
    }

    #[test]
    fn test_object_root_single_record() {
        let value = ploon!({"a": 1, "b": 2});
        assert_eq!(encode(&value), vec!["1 |1|2"]);
    }

    #[test]
    fn test_optional_field_empty_slot() {
        let value = ploon!({"items": [{"a": 1, "b": 2}, {"a": 3}]});
        assert_eq!(encode(&value), vec!["1:1|1|2", "1:2|3|"]);
    }

    #[test]
    fn test_escaping_field_delimiter() {
        let value = ploon!({"items": [{"note": "a|b"}]});
        assert_eq!(encode(&value), vec!["1:1|a\\|b"]);
    }

    #[test]
    fn test_non_object_items_skipped() {
        let value = ploon!({"items": [1, {"a": 2}, "x"]});
        assert_eq!(encode(&value), vec!["1:2|2"]);
    }

    #[test]
    fn test_null_renders_empty() {
        let value = ploon!({"items": [{"a": null, "b": true}]});
        assert_eq!(encode(&value), vec!["1:1||true"]);
    }
}
