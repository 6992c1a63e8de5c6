use serde_json::{Map, Value as Json};

use crate::schema::record::{Record, Value};

/// Turn a record back into its wire mapping.
///
/// Present values are written under their wire key; unset fields are left
/// out. Fields that received a declared default during marshal are present,
/// so they are written too. Discriminators go out as their integer code.
pub fn serialize(record: &Record) -> Map<String, Json> {
    let mut out = Map::new();
    for (field, value) in record.fields() {
        if let Some(value) = value {
            out.insert(field.wire_key.to_string(), to_json(value));
        }
    }
    out
}

fn to_json(value: &Value) -> Json {
    match value {
        Value::Str(s) => Json::String(s.clone()),
        Value::Int(n) => Json::from(*n),
        Value::Bool(b) => Json::Bool(*b),
        Value::Variant(v) => Json::from(v.code),
        Value::Record(r) => Json::Object(serialize(r)),
        Value::List(xs) => Json::Array(xs.iter().map(to_json).collect()),
    }
}
