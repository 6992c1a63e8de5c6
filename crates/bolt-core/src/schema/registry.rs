use std::{
    collections::{BTreeMap, HashSet},
    ptr,
};

use serde_json::Value as Json;

use crate::schema::{
    error::{ModelError, SchemaError},
    marshal, FieldKind, ItemKind, Record, Schema,
};

/// Checked index of record kinds by name.
///
/// Built once at startup; every table reachable from the registered roots is
/// checked for duplicate keys and misplaced constraints before the registry is
/// handed out. Read-only afterwards.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    kinds: BTreeMap<&'static str, &'static Schema>,
}

impl SchemaRegistry {
    pub fn new(
        roots: impl IntoIterator<Item = &'static Schema>,
    ) -> Result<Self, SchemaError> {
        let mut kinds: BTreeMap<&'static str, &'static Schema> = BTreeMap::new();
        let mut pending: Vec<&'static Schema> = roots.into_iter().collect();

        while let Some(schema) = pending.pop() {
            if let Some(existing) = kinds.get(schema.kind) {
                if ptr::eq(*existing, schema) {
                    continue;
                }
                return Err(SchemaError::DuplicateKind { kind: schema.kind });
            }
            check(schema)?;
            kinds.insert(schema.kind, schema);
            pending.extend(schema.children());
        }

        Ok(Self { kinds })
    }

    pub fn get(&self, kind: &str) -> Option<&'static Schema> {
        self.kinds.get(kind).copied()
    }

    /// Registered kind names, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Marshal `raw` as a record of the named kind. `None` if the kind is unknown.
    pub fn marshal(&self, kind: &str, raw: &Json) -> Option<Result<Record, ModelError>> {
        self.get(kind).map(|schema| marshal(raw, schema))
    }
}

fn check(schema: &'static Schema) -> Result<(), SchemaError> {
    let mut wire_keys = HashSet::new();
    let mut names = HashSet::new();

    for field in schema.fields {
        if !wire_keys.insert(field.wire_key) {
            return Err(SchemaError::DuplicateWireKey {
                kind: schema.kind,
                key: field.wire_key,
            });
        }
        if !names.insert(field.name) {
            return Err(SchemaError::DuplicateName {
                kind: schema.kind,
                name: field.name,
            });
        }

        let misplaced = |constraint| SchemaError::MisplacedConstraint {
            kind: schema.kind,
            key: field.wire_key,
            constraint,
            found: field.kind.describe(),
        };

        let is_list = matches!(field.kind, FieldKind::List(_));
        if field.constraints.max_length.is_some() && !matches!(field.kind, FieldKind::Str) {
            return Err(misplaced("maxLength"));
        }
        if field.constraints.min_items.is_some() && !is_list {
            return Err(misplaced("minItems"));
        }
        if field.constraints.max_items.is_some() && !is_list {
            return Err(misplaced("maxItems"));
        }
        if let FieldKind::List(item) = field.kind {
            if item.max_length.is_some() && !matches!(item.kind, ItemKind::Str) {
                return Err(SchemaError::MisplacedConstraint {
                    kind: schema.kind,
                    key: field.wire_key,
                    constraint: "maxLength",
                    found: item.kind.describe(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::FieldSpec;

    static LEAF: Schema = Schema {
        kind: "leaf",
        fields: &[FieldSpec::string("id").required()],
    };

    static ROOT: Schema = Schema {
        kind: "root",
        fields: &[
            FieldSpec::record("leaf", &LEAF),
            FieldSpec::records("leaves", &LEAF),
        ],
    };

    static DUP_WIRE: Schema = Schema {
        kind: "dup_wire",
        fields: &[
            FieldSpec::string("id"),
            FieldSpec::int("id").named("other"),
        ],
    };

    static DUP_NAME: Schema = Schema {
        kind: "dup_name",
        fields: &[
            FieldSpec::string("username").named("name"),
            FieldSpec::string("name"),
        ],
    };

    static BAD_LENGTH: Schema = Schema {
        kind: "bad_length",
        fields: &[FieldSpec::int("count").max_length(3)],
    };

    static BAD_ITEMS: Schema = Schema {
        kind: "bad_items",
        fields: &[FieldSpec::string("tag").max_items(3)],
    };

    static IMPOSTOR: Schema = Schema {
        kind: "leaf",
        fields: &[],
    };

    #[test]
    fn registers_nested_kinds() {
        let reg = SchemaRegistry::new([&ROOT]).expect("valid tables");
        assert_eq!(reg.kinds().collect::<Vec<_>>(), vec!["leaf", "root"]);
        assert!(ptr::eq(reg.get("leaf").expect("leaf registered"), &LEAF));
        assert!(reg.get("branch").is_none());
    }

    #[test]
    fn registering_the_same_table_twice_is_fine() {
        let reg = SchemaRegistry::new([&ROOT, &LEAF]).expect("valid tables");
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn rejects_duplicates() {
        assert!(matches!(
            SchemaRegistry::new([&DUP_WIRE]),
            Err(SchemaError::DuplicateWireKey { key: "id", .. })
        ));
        assert!(matches!(
            SchemaRegistry::new([&DUP_NAME]),
            Err(SchemaError::DuplicateName { name: "name", .. })
        ));
        assert!(matches!(
            SchemaRegistry::new([&ROOT, &IMPOSTOR]),
            Err(SchemaError::DuplicateKind { kind: "leaf" })
        ));
    }

    #[test]
    fn rejects_misplaced_constraints() {
        assert!(matches!(
            SchemaRegistry::new([&BAD_LENGTH]),
            Err(SchemaError::MisplacedConstraint {
                constraint: "maxLength",
                ..
            })
        ));
        assert!(matches!(
            SchemaRegistry::new([&BAD_ITEMS]),
            Err(SchemaError::MisplacedConstraint {
                constraint: "maxItems",
                ..
            })
        ));
    }

    #[test]
    fn marshals_by_kind_name() {
        let reg = SchemaRegistry::new([&ROOT]).expect("valid tables");
        let rec = reg
            .marshal("leaf", &json!({"id": "7"}))
            .expect("known kind")
            .expect("valid input");
        assert_eq!(rec.str("id"), Some("7"));
        assert!(reg.marshal("nope", &json!({})).is_none());
    }
}
