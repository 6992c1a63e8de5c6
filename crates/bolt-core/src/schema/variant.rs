use std::fmt;

use crate::schema::error::Violation;

/// One named discriminator constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Variant {
    /// Wire code; emitted unchanged on serialize.
    pub code: i64,
    pub name: &'static str,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Closed set of discriminator codes for one record kind.
///
/// Resolution never changes which fields a record consults: every variant of
/// a kind shares the kind's flat table.
#[derive(Debug)]
pub struct VariantSet {
    pub name: &'static str,
    pub variants: &'static [Variant],
}

impl VariantSet {
    /// Map a raw code onto its named constant. Codes outside the set are rejected.
    pub fn resolve(&self, code: i64) -> Result<Variant, Violation> {
        self.variants
            .iter()
            .copied()
            .find(|v| v.code == code)
            .ok_or(Violation::UnknownDiscriminator { code })
    }

    pub fn by_name(&self, name: &str) -> Option<Variant> {
        self.variants.iter().copied().find(|v| v.name == name)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static LIGHTS: VariantSet = VariantSet {
        name: "light",
        variants: &[
            Variant {
                code: 0,
                name: "RED",
            },
            Variant {
                code: 1,
                name: "GREEN",
            },
        ],
    };

    #[test]
    fn resolves_known_codes() {
        assert_eq!(LIGHTS.resolve(1).map(|v| v.name), Ok("GREEN"));
        assert_eq!(LIGHTS.by_name("RED").map(|v| v.code), Some(0));
    }

    #[test]
    fn rejects_unknown_code() {
        assert_eq!(
            LIGHTS.resolve(7),
            Err(Violation::UnknownDiscriminator { code: 7 })
        );
    }
}
