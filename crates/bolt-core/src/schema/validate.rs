//! Pure constraint checks. No coercion: a string is never read as a number
//! or the other way around.

use serde_json::Value as Json;

use crate::schema::{error::Violation, json_type_name, Constraints};

fn mismatch(expected: &'static str, raw: &Json) -> Violation {
    Violation::TypeMismatch {
        expected,
        found: json_type_name(raw),
    }
}

pub fn string(raw: &Json, max_length: Option<usize>) -> Result<&str, Violation> {
    let s = raw.as_str().ok_or_else(|| mismatch("string", raw))?;
    length(s, max_length)?;
    Ok(s)
}

/// Length counts characters, not bytes.
pub fn length(s: &str, max_length: Option<usize>) -> Result<(), Violation> {
    let Some(max) = max_length else {
        return Ok(());
    };
    let len = s.chars().count();
    if len > max {
        return Err(Violation::TooLong { max, len });
    }
    Ok(())
}

/// Integral numbers within `i64`; floats are rejected.
pub fn integer(raw: &Json) -> Result<i64, Violation> {
    if let Some(n) = raw.as_i64() {
        return Ok(n);
    }
    match raw.as_u64() {
        Some(value) => Err(Violation::OutOfRange { value }),
        None => Err(mismatch("integer", raw)),
    }
}

pub fn boolean(raw: &Json) -> Result<bool, Violation> {
    raw.as_bool().ok_or_else(|| mismatch("boolean", raw))
}

pub fn object(raw: &Json) -> Result<&serde_json::Map<String, Json>, Violation> {
    raw.as_object().ok_or_else(|| mismatch("object", raw))
}

/// Shape and cardinality of a list. Elements are checked by the caller.
pub fn list<'a>(raw: &'a Json, constraints: &Constraints) -> Result<&'a [Json], Violation> {
    let items = raw.as_array().ok_or_else(|| mismatch("array", raw))?;
    cardinality(items.len(), constraints)?;
    Ok(items)
}

pub fn cardinality(len: usize, constraints: &Constraints) -> Result<(), Violation> {
    if let Some(max) = constraints.max_items {
        if len > max {
            return Err(Violation::TooManyItems { max, len });
        }
    }
    if let Some(min) = constraints.min_items {
        if len < min {
            return Err(Violation::TooFewItems { min, len });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_rejects_numbers_and_numbers_reject_strings() {
        assert_eq!(
            string(&json!(1337), None),
            Err(Violation::TypeMismatch {
                expected: "string",
                found: "integer"
            })
        );
        assert_eq!(
            integer(&json!("1337")),
            Err(Violation::TypeMismatch {
                expected: "integer",
                found: "string"
            })
        );
    }

    #[test]
    fn integer_rejects_fractions() {
        assert!(matches!(
            integer(&json!(1.5)),
            Err(Violation::TypeMismatch { found: "number", .. })
        ));
        assert_eq!(integer(&json!(64000)), Ok(64000));
    }

    #[test]
    fn integer_above_i64_is_out_of_range() {
        assert_eq!(integer(&json!(i64::MAX)), Ok(i64::MAX));
        assert_eq!(
            integer(&json!(u64::MAX)),
            Err(Violation::OutOfRange { value: u64::MAX })
        );
    }

    #[test]
    fn length_counts_chars() {
        assert_eq!(length("héllo", Some(5)), Ok(()));
        assert_eq!(
            length("héllo!", Some(5)),
            Err(Violation::TooLong { max: 5, len: 6 })
        );
        assert_eq!(length(&"t".repeat(512), None), Ok(()));
    }

    #[test]
    fn list_cardinality_bounds() {
        let c = Constraints {
            min_items: Some(1),
            max_items: Some(2),
            ..Constraints::default()
        };
        assert_eq!(
            list(&json!([]), &c),
            Err(Violation::TooFewItems { min: 1, len: 0 })
        );
        assert_eq!(
            list(&json!([1, 2, 3]), &c),
            Err(Violation::TooManyItems { max: 2, len: 3 })
        );
        assert_eq!(list(&json!([1, 2]), &c).map(<[_]>::len), Ok(2));
    }

    #[test]
    fn boolean_is_strict() {
        assert_eq!(boolean(&json!(true)), Ok(true));
        assert!(boolean(&json!(1)).is_err());
    }
}
