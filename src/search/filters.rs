// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Numeric and geo filters attached to a search request.
//!
//! ```text
//! FILTER price 10.0 +inf
//! FILTER price (10.0 (20.0
//! GEOFILTER location 2.35 48.85 5.0 km
//! ```

use serde::{Deserialize, Serialize};

use super::values::GeoUnit;
use crate::args::{format_number, Args};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    Numeric {
        property: String,
        min: f64,
        max: f64,
        exclusive_min: bool,
        exclusive_max: bool,
    },
    Geo {
        property: String,
        lon: f64,
        lat: f64,
        radius: f64,
        unit: GeoUnit,
    },
}

impl Filter {
    /// Inclusive numeric filter `[min, max]`.
    pub fn numeric(property: impl Into<String>, min: f64, max: f64) -> Self {
        Self::numeric_exclusive(property, min, max, false, false)
    }

    pub fn numeric_exclusive(
        property: impl Into<String>,
        min: f64,
        max: f64,
        exclusive_min: bool,
        exclusive_max: bool,
    ) -> Self {
        Filter::Numeric {
            property: property.into(),
            min,
            max,
            exclusive_min,
            exclusive_max,
        }
    }

    pub fn geo(property: impl Into<String>, lon: f64, lat: f64, radius: f64, unit: GeoUnit) -> Self {
        Filter::Geo {
            property: property.into(),
            lon,
            lat,
            radius,
            unit,
        }
    }

    pub fn property(&self) -> &str {
        match self {
            Filter::Numeric { property, .. } | Filter::Geo { property, .. } => property,
        }
    }

    pub fn serialize_into(&self, args: &mut Args) {
        match self {
            Filter::Numeric {
                property,
                min,
                max,
                exclusive_min,
                exclusive_max,
            } => {
                args.push("FILTER")
                    .push(property)
                    .push(numeric_token(*min, *exclusive_min))
                    .push(numeric_token(*max, *exclusive_max));
            }
            Filter::Geo {
                property,
                lon,
                lat,
                radius,
                unit,
            } => {
                args.push("GEOFILTER")
                    .push(property)
                    .push(format_number(*lon))
                    .push(format_number(*lat))
                    .push(format_number(*radius))
                    .push(unit.as_str());
            }
        }
    }
}

// Filters take `+inf`, unlike the `inf` used inside query ranges.
fn numeric_token(n: f64, exclusive: bool) -> String {
    if n == f64::INFINITY {
        "+inf".to_string()
    } else if n == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if exclusive {
        format!("({}", format_number(n))
    } else {
        format_number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(filter: &Filter) -> String {
        let mut args = Args::new();
        filter.serialize_into(&mut args);
        args.to_string()
    }

    #[test]
    fn test_numeric_filter() {
        assert_eq!(render(&Filter::numeric("price", 10.0, 20.0)), "FILTER price 10.0 20.0");
    }

    #[test]
    fn test_numeric_filter_exclusive() {
        let f = Filter::numeric_exclusive("price", 10.0, 20.5, true, true);
        assert_eq!(render(&f), "FILTER price (10.0 (20.5");
    }

    #[test]
    fn test_numeric_filter_infinities() {
        let f = Filter::numeric_exclusive("price", f64::NEG_INFINITY, f64::INFINITY, true, true);
        assert_eq!(render(&f), "FILTER price -inf +inf");
    }

    #[test]
    fn test_geo_filter() {
        let f = Filter::geo("location", 2.35, 48.85, 5.0, GeoUnit::Kilometers);
        assert_eq!(render(&f), "GEOFILTER location 2.35 48.85 5.0 km");
        assert_eq!(f.property(), "location");
    }
}
