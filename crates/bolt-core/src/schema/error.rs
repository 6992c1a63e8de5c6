/// The constraint a present value failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("length {len} exceeds maximum of {max}")]
    TooLong { max: usize, len: usize },

    #[error("{len} items is fewer than the minimum of {min}")]
    TooFewItems { min: usize, len: usize },

    #[error("{len} items exceeds the maximum of {max}")]
    TooManyItems { max: usize, len: usize },

    #[error("unknown discriminator value {code}")]
    UnknownDiscriminator { code: i64 },

    #[error("integer {value} does not fit in 64 signed bits")]
    OutOfRange { value: u64 },
}

/// Marshal failure. Always fatal to the whole record being built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("{kind}: missing required key `{key}`")]
    MissingRequiredKey { kind: &'static str, key: String },

    #[error("{kind}: invalid value for `{key}`: {violation}")]
    Validation {
        kind: &'static str,
        key: String,
        violation: Violation,
    },

    #[error("{kind}: expected an object, found {found}")]
    NotAnObject {
        kind: &'static str,
        found: &'static str,
    },
}

impl ModelError {
    /// Wire key of the offending field, if the failure is tied to one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ModelError::MissingRequiredKey { key, .. } | ModelError::Validation { key, .. } => {
                Some(key)
            }
            ModelError::NotAnObject { .. } => None,
        }
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            ModelError::Validation { violation, .. } => Some(violation),
            _ => None,
        }
    }
}

/// Static table defects found while building a registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("{kind}: wire key `{key}` declared twice")]
    DuplicateWireKey { kind: &'static str, key: &'static str },

    #[error("{kind}: internal name `{name}` declared twice")]
    DuplicateName { kind: &'static str, name: &'static str },

    #[error("record kind `{kind}` registered twice with different tables")]
    DuplicateKind { kind: &'static str },

    #[error("{kind}: `{key}` declares {constraint} on a {found} field")]
    MisplacedConstraint {
        kind: &'static str,
        key: &'static str,
        constraint: &'static str,
        found: &'static str,
    },
}
