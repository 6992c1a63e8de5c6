use serde_json::{Map, Value as Json};

use crate::schema::{
    error::{ModelError, Violation},
    json_type_name,
    record::{Record, Value},
    validate, FieldKind, FieldSpec, ItemKind, ItemSpec, Presence, Schema,
};

/// Build a record of `schema`'s kind from a raw JSON value.
///
/// Fails with [`ModelError::NotAnObject`] if `raw` is not a JSON object.
pub fn marshal(raw: &Json, schema: &'static Schema) -> Result<Record, ModelError> {
    let obj = raw.as_object().ok_or_else(|| ModelError::NotAnObject {
        kind: schema.kind,
        found: json_type_name(raw),
    })?;
    marshal_object(obj, schema)
}

/// Build a record from a raw mapping, walking the table in declaration order.
///
/// Required keys are checked before any value is looked at, so a missing key
/// is reported even when other fields are invalid. After that the first
/// invalid value aborts the whole record. Absent and `null` keys are treated
/// alike: the field gets its default, or stays unset.
pub fn marshal_object(
    obj: &Map<String, Json>,
    schema: &'static Schema,
) -> Result<Record, ModelError> {
    let lookup = |field: &FieldSpec| obj.get(field.wire_key).filter(|v| !v.is_null());

    if let Some(missing) = schema
        .fields
        .iter()
        .find(|f| f.is_required() && lookup(*f).is_none())
    {
        return Err(ModelError::MissingRequiredKey {
            kind: schema.kind,
            key: missing.wire_key.to_string(),
        });
    }

    let mut slots = Vec::with_capacity(schema.fields.len());
    for field in schema.fields {
        let slot = match (lookup(field), field.presence) {
            (Some(raw), _) => Some(coerce(raw, field, schema)?),
            (None, Presence::Default(d)) => Some(d.to_value()),
            (None, _) => None,
        };
        slots.push(slot);
    }

    Ok(Record::from_slots(schema, slots))
}

fn invalid(schema: &Schema, key: impl Into<String>, violation: Violation) -> ModelError {
    ModelError::Validation {
        kind: schema.kind,
        key: key.into(),
        violation,
    }
}

fn coerce(raw: &Json, field: &FieldSpec, schema: &'static Schema) -> Result<Value, ModelError> {
    let key = field.wire_key;
    let value = match field.kind {
        FieldKind::Str => {
            let s = validate::string(raw, field.constraints.max_length)
                .map_err(|v| invalid(schema, key, v))?;
            Value::Str(s.to_string())
        }
        FieldKind::Int => Value::Int(validate::integer(raw).map_err(|v| invalid(schema, key, v))?),
        FieldKind::Bool => {
            Value::Bool(validate::boolean(raw).map_err(|v| invalid(schema, key, v))?)
        }
        FieldKind::Variant(set) => {
            let code = validate::integer(raw).map_err(|v| invalid(schema, key, v))?;
            Value::Variant(set.resolve(code).map_err(|v| invalid(schema, key, v))?)
        }
        FieldKind::Record(nested) => {
            let obj = validate::object(raw).map_err(|v| invalid(schema, key, v))?;
            Value::Record(marshal_object(obj, nested)?)
        }
        FieldKind::List(item) => {
            let items =
                validate::list(raw, &field.constraints).map_err(|v| invalid(schema, key, v))?;
            let mut out = Vec::with_capacity(items.len());
            for (idx, raw_item) in items.iter().enumerate() {
                out.push(coerce_item(raw_item, item, schema, key, idx)?);
            }
            Value::List(out)
        }
    };
    Ok(value)
}

fn coerce_item(
    raw: &Json,
    item: ItemSpec,
    schema: &'static Schema,
    key: &str,
    idx: usize,
) -> Result<Value, ModelError> {
    let at = || format!("{key}[{idx}]");
    let value = match item.kind {
        ItemKind::Str => {
            let s = validate::string(raw, item.max_length).map_err(|v| invalid(schema, at(), v))?;
            Value::Str(s.to_string())
        }
        ItemKind::Int => Value::Int(validate::integer(raw).map_err(|v| invalid(schema, at(), v))?),
        ItemKind::Bool => {
            Value::Bool(validate::boolean(raw).map_err(|v| invalid(schema, at(), v))?)
        }
        ItemKind::Record(nested) => {
            let obj = validate::object(raw).map_err(|v| invalid(schema, at(), v))?;
            Value::Record(marshal_object(obj, nested)?)
        }
    };
    Ok(value)
}
