//! PLOON Format Specification
//!
//! This module documents the PLOON (Path-Addressed, Layered Object Notation)
//! format as implemented by this library.
//!
//! # Overview
//!
//! PLOON is a compact text encoding for hierarchical data built on two ideas:
//! declare structure **once** in a schema header, and replace nesting
//! brackets with **path-addressed** flat records. A JSON document like
//!
//! ```json
//! {"users": [{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}]}
//! ```
//!
//! becomes
//!
//! ```text
//! [users#2](id,name)
//!
//! 1:1|1|Alice
//! 1:2|2|Bob
//! ```
//!
//! Field names appear exactly once, in the schema; each record carries only a
//! short path tag plus its values.
//!
//! ## Design Philosophy
//!
//! - **Schema-once**: structural description is hoisted into a single header,
//!   never repeated per item
//! - **Flat records**: depth/index paths replace nested brackets, so arbitrary
//!   nesting serializes to a flat record stream
//! - **Type-light wire format**: values travel as delimiter-escaped text; the
//!   decoder reconstructs shape, not types
//!
//! # Document Structure
//!
//! A document is `schema , separator , [separator] , data`:
//!
//! ```text
//! document   = schema , record-sep , [record-sep] , data ;
//! schema     = "[" , root-name , ["#" , count] , "]" , "(" , field-list , ")" ;
//! field-list = field , { "," , field } ;
//! field      = name
//!            | name , "#" , ["(" , field-list , ")"]     (* array field  *)
//!            | name , "{" , field-list , "}" ;           (* object field *)
//! data       = { record , record-sep } ;
//! record     = path-tag , { "|" , value } ;
//! path-tag   = depth , ":" , index                       (* array item   *)
//!            | depth , " " ;                             (* nested object *)
//! ```
//!
//! In Standard form the record separator is a newline and the schema is
//! followed by a doubled separator (a blank line). In Compact form the
//! separator is `;` and appears once after the schema.
//!
//! # Schema Segment
//!
//! | Marker | Meaning | Example |
//! |--------|---------|---------|
//! | `[name#N]` | root array `name` with `N` items | `[users#2]` |
//! | `[name]` | object root (no count) | `[root]` |
//! | `field` | primitive field | `id` |
//! | `field#` | array-of-primitives field | `tags#` |
//! | `field#(...)` | array-of-objects field with item fields | `lines#(sku,qty)` |
//! | `field{...}` | nested object field | `customer{name,city}` |
//!
//! Nested groups compose: `[orders#1](id,customer{name},lines#(sku,qty))`.
//!
//! ## Schema Inference
//!
//! The schema is inferred from the value tree before encoding:
//!
//! - An object root whose **first** entry is an array names that array the
//!   root; any sibling keys are silently dropped (or rejected, under the
//!   `Error` multi-root policy).
//! - Array item fields are the **union** of keys across all object items,
//!   ordered by first appearance. Structural kind (primitive, array, object)
//!   comes from the first item that carries the key.
//! - A primitive field missing from at least one sibling item is **optional**:
//!   items lacking it still emit an empty value slot, so every record for
//!   that array has the same width.
//!
//! # Data Segment
//!
//! Each record addresses one array item or one nested object:
//!
//! - `1:2|...` is item 2 (1-based) of an array at depth 1
//! - `2 |...` is a nested object at depth 2 (the tag is the depth followed by
//!   a literal space)
//!
//! Values appear in schema field order, primitives only; compound fields are
//! represented by their own deeper records, emitted immediately after their
//! parent. Records whose item has no primitive values at all are omitted.
//!
//! ## Escaping
//!
//! A backslash escapes the three characters that are structural inside a
//! value: the field delimiter, the record separator, and the backslash
//! itself. `a|b` travels as `a\|b`. Unrecognized escape pairs pass through
//! untouched.
//!
//! # Decoding
//!
//! Decoding is staged: segment split, schema parse, escape-aware record
//! tokenization, optional validation, then depth-first positional
//! reconstruction.
//!
//! - Every decoded primitive is a **string**. PLOON carries no type tags, so
//!   `1` and `true` come back as `"1"` and `"true"`.
//! - Strict mode (the default) rejects unparseable path tags
//!   ([`InvalidPath`]) and array records whose total value count disagrees
//!   with the schema's primitive field count ([`SchemaInconsistency`]).
//!   Lenient mode drops bad records and keeps going.
//! - Records without a field delimiter are dropped in both modes.
//!
//! ## Known limitation: unscoped nested lookups
//!
//! Path tags carry depth and (for arrays) index, but **not** which parent
//! item owns them. When reconstructing, a nested object at depth `d` binds to
//! the first depth-`d` object record in the document, and a nested array
//! collects every depth-`d+1` record regardless of parent. Documents where
//! multiple sibling items each carry nested compounds at the same depth
//! therefore do not round-trip faithfully. This is a property of the wire
//! format itself; see the [`de`](crate::de) module docs.
//!
//! # Comparison Example
//!
//! ```text
//! JSON:  {"orders":[{"id":101,"customer":{"name":"Alice"},"tags":["a","b"]}]}
//!
//! PLOON: [orders#1](id,customer{name},tags#)
//!
//!        1:1|101
//!        2 |Alice
//! ```
//!
//! Note that `tags` appears in the schema (`tags#`) but emits no records:
//! only object items produce records, so arrays of bare primitives declare
//! their presence and carry no data.
//!
//! [`InvalidPath`]: crate::Error::InvalidPath
//! [`SchemaInconsistency`]: crate::Error::SchemaInconsistency
