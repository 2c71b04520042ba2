//! Strongly-typed integer identifiers for the graph challenge domain.
//!
//! Graph identifiers and class labels are both plain integers in the
//! submitted tables. Wrapping them prevents accidentally comparing a
//! `graph_id` column against a `target` column at compile time.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

macro_rules! define_int_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an identifier from its raw integer value
            #[inline]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the underlying integer value
            #[inline]
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Parse a table cell holding an integral number.
            ///
            /// Integers are accepted directly; floats are accepted when they
            /// are finite and have no fractional part (`3.0` but not `3.5`).
            pub fn parse_cell(raw: &str) -> Option<Self> {
                parse_integral(raw).map(Self)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_int_id!(GraphId, "Identifier of one graph (one case) within a dataset split");
define_int_id!(ClassLabel, "Class id predicted for, or assigned to, a graph");

/// Largest magnitude an `f64` can hold while still converting losslessly to `i64`.
const I64_FLOAT_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn parse_integral(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }

    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < I64_FLOAT_BOUND {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_cells() {
        assert_eq!(GraphId::parse_cell("42"), Some(GraphId::new(42)));
        assert_eq!(GraphId::parse_cell(" -7 "), Some(GraphId::new(-7)));
        assert_eq!(ClassLabel::parse_cell("0"), Some(ClassLabel::new(0)));
    }

    #[test]
    fn test_parse_integral_float_cells() {
        assert_eq!(ClassLabel::parse_cell("1.0"), Some(ClassLabel::new(1)));
        assert_eq!(ClassLabel::parse_cell("2e0"), Some(ClassLabel::new(2)));
    }

    #[test]
    fn test_rejects_non_integral_cells() {
        assert_eq!(ClassLabel::parse_cell("0.5"), None);
        assert_eq!(ClassLabel::parse_cell("inf"), None);
        assert_eq!(ClassLabel::parse_cell("benign"), None);
        assert_eq!(GraphId::parse_cell(""), None);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&GraphId::new(17)).unwrap();
        assert_eq!(json, "17");

        let id: GraphId = serde_json::from_str("17").unwrap();
        assert_eq!(id.value(), 17);
    }
}
