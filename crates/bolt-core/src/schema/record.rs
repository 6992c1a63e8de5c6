use std::ptr;

use crate::schema::{variant::Variant, FieldSpec, Schema};

/// A present, already-validated field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    Variant(Variant),
    Record(Record),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Variant(v) => Some(v.code),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_variant(&self) -> Option<Variant> {
        match self {
            Value::Variant(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(xs) => Some(xs),
            _ => None,
        }
    }
}

/// One instance of a record kind: a slot per field of its table.
///
/// `None` is the unset marker; a present empty list or `false` is `Some`.
/// Only the marshal engine builds records, so every slot already satisfies
/// its field's constraints.
#[derive(Clone, Debug)]
pub struct Record {
    schema: &'static Schema,
    slots: Vec<Option<Value>>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.schema, other.schema) && self.slots == other.slots
    }
}

impl Eq for Record {}

impl Record {
    pub(crate) fn from_slots(schema: &'static Schema, slots: Vec<Option<Value>>) -> Self {
        debug_assert_eq!(schema.fields.len(), slots.len());
        Self { schema, slots }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn kind(&self) -> &'static str {
        self.schema.kind
    }

    /// Value of a field by internal name. `None` when unset or undeclared.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let idx = self.schema.index_of(name)?;
        self.slots[idx].as_ref()
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn variant(&self, name: &str) -> Option<Variant> {
        self.get(name).and_then(Value::as_variant)
    }

    pub fn record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(Value::as_record)
    }

    pub fn list(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    /// Nested records of a list-of-record field, in input order.
    pub fn records(&self, name: &str) -> impl Iterator<Item = &Record> + '_ {
        self.list(name)
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_record)
    }

    /// String elements of a list-of-string field, in input order.
    pub fn strings(&self, name: &str) -> impl Iterator<Item = &str> + '_ {
        self.list(name)
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_str)
    }

    /// Fields in declaration order, paired with their slot.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, Option<&Value>)> + '_ {
        self.schema
            .fields
            .iter()
            .zip(self.slots.iter().map(Option::as_ref))
    }
}
