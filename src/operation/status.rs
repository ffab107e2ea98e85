//! Status field coercion
//!
//! Servers encode `ok` as int32, int64, double or boolean depending on
//! version and command. All interpretation of that field goes through
//! [`coerce_ok`].

use bson::Bson;

/// Interpreted value of an `ok` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OkStatus {
    /// `1`, `1.0` or `true`
    Success,

    /// `0`, `0.0` or `false`
    Failure,

    /// Any other value, including NaN, other numbers, strings and null
    Unrecognized,
}

impl OkStatus {
    /// Numeric equality to one; unrecognised values are not successful
    pub fn is_success(self) -> bool {
        matches!(self, OkStatus::Success)
    }
}

/// Interpret an `ok` field value
///
/// # Arguments
/// * `value` - Raw field value
///
/// # Returns
/// * `OkStatus` - Success for {1, 1.0, true}, Failure for {0, 0.0, false}
pub fn coerce_ok(value: &Bson) -> OkStatus {
    let status = match value {
        Bson::Int32(1) | Bson::Int64(1) | Bson::Boolean(true) => OkStatus::Success,
        Bson::Int32(0) | Bson::Int64(0) | Bson::Boolean(false) => OkStatus::Failure,
        Bson::Double(f) if *f == 1.0 => OkStatus::Success,
        Bson::Double(f) if *f == 0.0 => OkStatus::Failure,
        _ => OkStatus::Unrecognized,
    };

    if status == OkStatus::Unrecognized {
        tracing::trace!("Unrecognized ok value: {}", value);
    }

    status
}

/// Interpret a counter field such as `n`
///
/// # Arguments
/// * `value` - Raw field value
///
/// # Returns
/// * `Option<u64>` - The count for non-negative integral numbers, None otherwise
pub fn count_value(value: &Bson) -> Option<u64> {
    match value {
        Bson::Int32(n) => u64::try_from(*n).ok(),
        Bson::Int64(n) => u64::try_from(*n).ok(),
        Bson::Double(f) if f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64 => {
            Some(*f as u64)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_encodings() {
        assert_eq!(coerce_ok(&Bson::Int32(1)), OkStatus::Success);
        assert_eq!(coerce_ok(&Bson::Int64(1)), OkStatus::Success);
        assert_eq!(coerce_ok(&Bson::Double(1.0)), OkStatus::Success);
        assert_eq!(coerce_ok(&Bson::Boolean(true)), OkStatus::Success);
    }

    #[test]
    fn test_failure_encodings() {
        assert_eq!(coerce_ok(&Bson::Int32(0)), OkStatus::Failure);
        assert_eq!(coerce_ok(&Bson::Int64(0)), OkStatus::Failure);
        assert_eq!(coerce_ok(&Bson::Double(0.0)), OkStatus::Failure);
        assert_eq!(coerce_ok(&Bson::Double(-0.0)), OkStatus::Failure);
        assert_eq!(coerce_ok(&Bson::Boolean(false)), OkStatus::Failure);
    }

    #[test]
    fn test_unrecognized_encodings() {
        for value in [
            Bson::Int32(2),
            Bson::Int64(-1),
            Bson::Double(0.5),
            Bson::Double(f64::NAN),
            Bson::String("1".to_string()),
            Bson::Null,
        ] {
            let status = coerce_ok(&value);
            assert_eq!(status, OkStatus::Unrecognized, "value: {value:?}");
            assert!(!status.is_success());
        }
    }

    #[test]
    fn test_count_value() {
        assert_eq!(count_value(&Bson::Int32(2)), Some(2));
        assert_eq!(count_value(&Bson::Int64(5_000_000_000)), Some(5_000_000_000));
        assert_eq!(count_value(&Bson::Double(3.0)), Some(3));
        assert_eq!(count_value(&Bson::Double(3.5)), None);
        assert_eq!(count_value(&Bson::Double(1e20)), None);
        assert_eq!(count_value(&Bson::Double(u64::MAX as f64)), None);
        assert_eq!(count_value(&Bson::Double(f64::INFINITY)), None);
        assert_eq!(count_value(&Bson::Int32(-1)), None);
        assert_eq!(count_value(&Bson::String("2".to_string())), None);
    }
}
