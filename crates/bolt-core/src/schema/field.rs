use crate::schema::{record::Value, variant::VariantSet, Schema};

/// Element kinds allowed inside a list field.
#[derive(Clone, Copy, Debug)]
pub enum ItemKind {
    Str,
    Int,
    Bool,
    Record(&'static Schema),
}

impl ItemKind {
    pub fn describe(self) -> &'static str {
        match self {
            ItemKind::Str => "string",
            ItemKind::Int => "integer",
            ItemKind::Bool => "boolean",
            ItemKind::Record(_) => "object",
        }
    }
}

/// Per-element spec of a list field.
#[derive(Clone, Copy, Debug)]
pub struct ItemSpec {
    pub kind: ItemKind,
    /// Only meaningful for string elements.
    pub max_length: Option<usize>,
}

/// Value kind of a field, fixed when the table is written.
#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    Str,
    Int,
    Bool,
    /// Integer code resolved against a closed set of named variants.
    Variant(&'static VariantSet),
    Record(&'static Schema),
    List(ItemSpec),
}

impl FieldKind {
    pub fn describe(self) -> &'static str {
        match self {
            FieldKind::Str => "string",
            FieldKind::Int | FieldKind::Variant(_) => "integer",
            FieldKind::Bool => "boolean",
            FieldKind::Record(_) => "object",
            FieldKind::List(_) => "array",
        }
    }
}

/// Value assigned to an optional field that is absent (or null) in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
    Bool(bool),
    EmptyList,
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Str(s) => Value::Str(s.to_string()),
            DefaultValue::Int(n) => Value::Int(n),
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::EmptyList => Value::List(Vec::new()),
        }
    }
}

/// Required and defaulted are mutually exclusive, so they share one enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    Default(DefaultValue),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Constraints {
    pub max_length: Option<usize>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

/// Immutable descriptor of one attribute of a record kind.
///
/// Tables are written as `static` items using the `const` builders below:
///
/// ```
/// use bolt_core::schema::FieldSpec;
///
/// const NAME: FieldSpec = FieldSpec::string("username").named("name").required();
/// assert_eq!(NAME.wire_key, "username");
/// assert_eq!(NAME.name, "name");
/// assert!(NAME.is_required());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub wire_key: &'static str,
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
    pub constraints: Constraints,
}

impl FieldSpec {
    pub const fn new(wire_key: &'static str, kind: FieldKind) -> Self {
        Self {
            wire_key,
            name: wire_key,
            kind,
            presence: Presence::Optional,
            constraints: Constraints {
                max_length: None,
                min_items: None,
                max_items: None,
            },
        }
    }

    pub const fn string(wire_key: &'static str) -> Self {
        Self::new(wire_key, FieldKind::Str)
    }

    pub const fn int(wire_key: &'static str) -> Self {
        Self::new(wire_key, FieldKind::Int)
    }

    pub const fn boolean(wire_key: &'static str) -> Self {
        Self::new(wire_key, FieldKind::Bool)
    }

    pub const fn variant(wire_key: &'static str, set: &'static VariantSet) -> Self {
        Self::new(wire_key, FieldKind::Variant(set))
    }

    pub const fn record(wire_key: &'static str, schema: &'static Schema) -> Self {
        Self::new(wire_key, FieldKind::Record(schema))
    }

    pub const fn list(wire_key: &'static str, kind: ItemKind) -> Self {
        Self::new(
            wire_key,
            FieldKind::List(ItemSpec {
                kind,
                max_length: None,
            }),
        )
    }

    pub const fn records(wire_key: &'static str, schema: &'static Schema) -> Self {
        Self::list(wire_key, ItemKind::Record(schema))
    }

    /// Internal attribute name when it differs from the wire key.
    pub const fn named(self, name: &'static str) -> Self {
        Self { name, ..self }
    }

    pub const fn required(self) -> Self {
        Self {
            presence: Presence::Required,
            ..self
        }
    }

    pub const fn default(self, value: DefaultValue) -> Self {
        Self {
            presence: Presence::Default(value),
            ..self
        }
    }

    /// For string fields caps the field; for string lists caps each element.
    pub const fn max_length(self, max: usize) -> Self {
        match self.kind {
            FieldKind::List(item) => Self {
                kind: FieldKind::List(ItemSpec {
                    kind: item.kind,
                    max_length: Some(max),
                }),
                ..self
            },
            _ => Self {
                constraints: Constraints {
                    max_length: Some(max),
                    ..self.constraints
                },
                ..self
            },
        }
    }

    pub const fn min_items(self, min: usize) -> Self {
        Self {
            constraints: Constraints {
                min_items: Some(min),
                ..self.constraints
            },
            ..self
        }
    }

    pub const fn max_items(self, max: usize) -> Self {
        Self {
            constraints: Constraints {
                max_items: Some(max),
                ..self.constraints
            },
            ..self
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn default_value(&self) -> Option<DefaultValue> {
        match self.presence {
            Presence::Default(d) => Some(d),
            _ => None,
        }
    }
}
