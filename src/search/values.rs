// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Leaf values used inside field clauses
//!
//! ```text
//! mark                 - Scalar (rendered verbatim)
//! [1.0 (10.0]          - Range, exclusive upper bound
//! [-inf (42.0]         - Range, unbounded below
//! [2.35 48.85 5.0 km]  - Geo radius
//! {rust | database}    - Tag set
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::args::format_number;
use crate::error::{CodecError, Result};

/// Distance unit for geo values and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoUnit {
    Kilometers,
    Meters,
    Feet,
    Miles,
}

impl GeoUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            GeoUnit::Kilometers => "km",
            GeoUnit::Meters => "m",
            GeoUnit::Feet => "ft",
            GeoUnit::Miles => "mi",
        }
    }
}

impl fmt::Display for GeoUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric interval. Bounds are inclusive unless switched off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub from: f64,
    pub to: f64,
    pub inclusive_min: bool,
    pub inclusive_max: bool,
}

impl Range {
    pub fn inclusive_min(mut self, inclusive: bool) -> Self {
        self.inclusive_min = inclusive;
        self
    }

    pub fn inclusive_max(mut self, inclusive: bool) -> Self {
        self.inclusive_max = inclusive;
        self
    }
}

/// A value in a field clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Scalar(String),
    Range(Range),
    Geo {
        lon: f64,
        lat: f64,
        radius: f64,
        unit: GeoUnit,
    },
    Tags(Vec<String>),
}

impl Value {
    /// Whether the value may share a `@field:(a|b)` group with siblings.
    pub fn is_combinable(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// Switch the lower bound of a range; no-op for other values.
    pub fn inclusive_min(self, inclusive: bool) -> Self {
        match self {
            Value::Range(r) => Value::Range(r.inclusive_min(inclusive)),
            other => other,
        }
    }

    /// Switch the upper bound of a range; no-op for other values.
    pub fn inclusive_max(self, inclusive: bool) -> Self {
        match self {
            Value::Range(r) => Value::Range(r.inclusive_max(inclusive)),
            other => other,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<Range> for Value {
    fn from(r: Range) -> Self {
        Value::Range(r)
    }
}

// Range bounds use bare `inf`/`-inf`; numeric filters use `+inf` instead.
fn write_bound(f: &mut fmt::Formatter<'_>, n: f64, inclusive: bool) -> fmt::Result {
    if n == f64::NEG_INFINITY {
        f.write_str("-inf")
    } else if n == f64::INFINITY {
        f.write_str("inf")
    } else {
        if !inclusive {
            f.write_str("(")?;
        }
        f.write_str(&format_number(n))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => f.write_str(s),
            Value::Range(r) => {
                f.write_str("[")?;
                write_bound(f, r.from, r.inclusive_min)?;
                f.write_str(" ")?;
                write_bound(f, r.to, r.inclusive_max)?;
                f.write_str("]")
            }
            Value::Geo {
                lon,
                lat,
                radius,
                unit,
            } => write!(
                f,
                "[{} {} {} {}]",
                format_number(*lon),
                format_number(*lat),
                format_number(*radius),
                unit
            ),
            Value::Tags(tags) => write!(f, "{{{}}}", tags.join(" | ")),
        }
    }
}

/// Scalar term, rendered verbatim (no escaping).
pub fn value(s: impl Into<String>) -> Value {
    Value::Scalar(s.into())
}

pub fn between(from: impl Into<f64>, to: impl Into<f64>) -> Value {
    Value::Range(Range {
        from: from.into(),
        to: to.into(),
        inclusive_min: true,
        inclusive_max: true,
    })
}

pub fn eq(n: impl Into<f64>) -> Value {
    let n = n.into();
    between(n, n)
}

pub fn lt(n: impl Into<f64>) -> Value {
    between(f64::NEG_INFINITY, n).inclusive_max(false)
}

pub fn le(n: impl Into<f64>) -> Value {
    between(f64::NEG_INFINITY, n)
}

pub fn gt(n: impl Into<f64>) -> Value {
    between(n, f64::INFINITY).inclusive_min(false)
}

pub fn ge(n: impl Into<f64>) -> Value {
    between(n, f64::INFINITY)
}

pub fn geo(lon: f64, lat: f64, radius: f64, unit: GeoUnit) -> Value {
    Value::Geo {
        lon,
        lat,
        radius,
        unit,
    }
}

/// Tag set `{a | b}`. At least one tag is required.
pub fn tags<I, S>(tags: I) -> Result<Value>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    if tags.is_empty() {
        return Err(CodecError::invalid("tag value requires at least one tag"));
    }
    Ok(Value::Tags(tags))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between() {
        assert_eq!(between(1, 10).to_string(), "[1.0 10.0]");
        assert_eq!(between(1, 10).inclusive_max(false).to_string(), "[1.0 (10.0]");
        assert_eq!(between(1, 10).inclusive_min(false).to_string(), "[(1.0 10.0]");
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(eq(42).to_string(), "[42.0 42.0]");
        assert_eq!(lt(42).to_string(), "[-inf (42.0]");
        assert_eq!(le(42).to_string(), "[-inf 42.0]");
        assert_eq!(gt(42).to_string(), "[(42.0 inf]");
        assert_eq!(ge(42).to_string(), "[42.0 inf]");
    }

    #[test]
    fn test_exclusive_infinity_has_no_paren() {
        let v = between(f64::NEG_INFINITY, f64::INFINITY)
            .inclusive_min(false)
            .inclusive_max(false);
        assert_eq!(v.to_string(), "[-inf inf]");
    }

    #[test]
    fn test_inverted_range_renders_as_given() {
        assert_eq!(between(10, 1).to_string(), "[10.0 1.0]");
    }

    #[test]
    fn test_fractional_bounds() {
        assert_eq!(between(0.5, 2.25).to_string(), "[0.5 2.25]");
    }

    #[test]
    fn test_geo() {
        let v = geo(2.35, 48.85, 5.0, GeoUnit::Kilometers);
        assert_eq!(v.to_string(), "[2.35 48.85 5.0 km]");
        assert_eq!(geo(1.0, 2.0, 3.0, GeoUnit::Miles).to_string(), "[1.0 2.0 3.0 mi]");
    }

    #[test]
    fn test_tags() {
        let v = tags(["rust", "database"]).unwrap();
        assert_eq!(v.to_string(), "{rust | database}");
    }

    #[test]
    fn test_empty_tags_rejected() {
        let err = tags(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument(_)));
    }

    #[test]
    fn test_combinable() {
        assert!(value("mark").is_combinable());
        assert!(!between(1, 2).is_combinable());
        assert!(!geo(1.0, 2.0, 3.0, GeoUnit::Feet).is_combinable());
        assert!(!tags(["a"]).unwrap().is_combinable());
    }

    #[test]
    fn test_scalar_not_escaped() {
        assert_eq!(value("user@example").to_string(), "user@example");
    }
}
