//! Declarative record schemas and the engine that moves payloads across them.
//!
//! A record kind is a `static` [`Schema`]: an ordered table of [`FieldSpec`]s.
//! [`marshal`] turns a raw JSON object into a validated [`Record`] (or fails
//! closed with a [`ModelError`]); [`serialize`] is its structural inverse.
//! Nothing here performs I/O or holds mutable state, so tables and engines are
//! freely shared across threads.

pub mod error;
pub mod field;
pub mod marshal;
pub mod record;
pub mod registry;
pub mod serialize;
pub mod validate;
pub mod variant;

pub use error::{ModelError, SchemaError, Violation};
pub use field::{Constraints, DefaultValue, FieldKind, FieldSpec, ItemKind, ItemSpec, Presence};
pub use marshal::{marshal, marshal_object};
pub use record::{Record, Value};
pub use registry::SchemaRegistry;
pub use serialize::serialize;
pub use variant::{Variant, VariantSet};

/// Field table for one record kind. Immutable for the life of the process.
#[derive(Debug)]
pub struct Schema {
    pub kind: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_wire_key(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.wire_key == key)
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Schemas referenced by nested-record and list-of-record fields.
    pub fn children(&self) -> impl Iterator<Item = &'static Schema> + '_ {
        self.fields.iter().filter_map(|f| match f.kind {
            FieldKind::Record(s) => Some(s),
            FieldKind::List(ItemSpec {
                kind: ItemKind::Record(s),
                ..
            }) => Some(s),
            _ => None,
        })
    }
}

/// Short name of a raw JSON value's shape, for diagnostics.
pub(crate) fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
