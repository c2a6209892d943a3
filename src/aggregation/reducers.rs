// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Reducers collapse each group into one derived value.
//!
//! ```text
//! REDUCE COUNT 0 AS cnt
//! REDUCE SUM 1 @price AS total
//! REDUCE QUANTILE 2 @price 0.5
//! REDUCE FIRST_VALUE 4 @name BY @age DESC
//! ```

use serde::{Deserialize, Serialize};

use super::SortedField;
use crate::args::{format_number, Args};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReducerKind {
    Count,
    CountDistinct,
    CountDistinctish,
    Sum,
    Min,
    Max,
    Avg,
    StdDev,
    Quantile(f64),
    FirstValue(Option<SortedField>),
    ToList,
    RandomSample(u32),
}

impl ReducerKind {
    pub fn name(&self) -> &'static str {
        match self {
            ReducerKind::Count => "COUNT",
            ReducerKind::CountDistinct => "COUNT_DISTINCT",
            ReducerKind::CountDistinctish => "COUNT_DISTINCTISH",
            ReducerKind::Sum => "SUM",
            ReducerKind::Min => "MIN",
            ReducerKind::Max => "MAX",
            ReducerKind::Avg => "AVG",
            ReducerKind::StdDev => "STDDEV",
            ReducerKind::Quantile(_) => "QUANTILE",
            ReducerKind::FirstValue(_) => "FIRST_VALUE",
            ReducerKind::ToList => "TOLIST",
            ReducerKind::RandomSample(_) => "RANDOM_SAMPLE",
        }
    }

    // Arguments after the field.
    fn own_args(&self) -> Vec<String> {
        match self {
            ReducerKind::Quantile(percentile) => vec![format_number(*percentile)],
            ReducerKind::FirstValue(Some(by)) => vec![
                "BY".to_string(),
                by.field.clone(),
                by.order.as_str().to_string(),
            ],
            ReducerKind::RandomSample(size) => vec![size.to_string()],
            _ => Vec::new(),
        }
    }
}

/// One REDUCE clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reducer {
    pub kind: ReducerKind,
    pub field: Option<String>,
    pub alias: Option<String>,
}

impl Reducer {
    pub fn new(kind: ReducerKind, field: Option<String>) -> Self {
        Self {
            kind,
            field,
            alias: None,
        }
    }

    /// Name the reduced value in the output rows (`AS alias`).
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn serialize_into(&self, args: &mut Args) {
        let own = self.kind.own_args();
        let argc = own.len() + usize::from(self.field.is_some());

        args.push("REDUCE").push(self.kind.name()).push_count(argc);
        if let Some(field) = &self.field {
            args.push(field);
        }
        for arg in &own {
            args.push(arg);
        }
        if let Some(alias) = self.alias.as_deref().filter(|a| !a.is_empty()) {
            args.push("AS").push(alias);
        }
    }
}

fn on_field(kind: ReducerKind, field: impl Into<String>) -> Reducer {
    Reducer::new(kind, Some(field.into()))
}

pub fn count() -> Reducer {
    Reducer::new(ReducerKind::Count, None)
}

pub fn count_distinct(field: impl Into<String>) -> Reducer {
    on_field(ReducerKind::CountDistinct, field)
}

/// Approximate distinct count.
pub fn count_distinctish(field: impl Into<String>) -> Reducer {
    on_field(ReducerKind::CountDistinctish, field)
}

pub fn sum(field: impl Into<String>) -> Reducer {
    on_field(ReducerKind::Sum, field)
}

pub fn min(field: impl Into<String>) -> Reducer {
    on_field(ReducerKind::Min, field)
}

pub fn max(field: impl Into<String>) -> Reducer {
    on_field(ReducerKind::Max, field)
}

pub fn avg(field: impl Into<String>) -> Reducer {
    on_field(ReducerKind::Avg, field)
}

pub fn stddev(field: impl Into<String>) -> Reducer {
    on_field(ReducerKind::StdDev, field)
}

/// `percentile` is in `[0, 1]`.
pub fn quantile(field: impl Into<String>, percentile: f64) -> Reducer {
    on_field(ReducerKind::Quantile(percentile), field)
}

pub fn first_value(field: impl Into<String>) -> Reducer {
    on_field(ReducerKind::FirstValue(None), field)
}

/// First value of `field` after ordering the group by `by`.
pub fn first_value_by(field: impl Into<String>, by: SortedField) -> Reducer {
    on_field(ReducerKind::FirstValue(Some(by)), field)
}

pub fn to_list(field: impl Into<String>) -> Reducer {
    on_field(ReducerKind::ToList, field)
}

pub fn random_sample(field: impl Into<String>, size: u32) -> Reducer {
    on_field(ReducerKind::RandomSample(size), field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(r: &Reducer) -> String {
        let mut args = Args::new();
        r.serialize_into(&mut args);
        args.to_string()
    }

    #[test]
    fn test_count() {
        assert_eq!(render(&count()), "REDUCE COUNT 0");
        assert_eq!(render(&count().alias("cnt")), "REDUCE COUNT 0 AS cnt");
    }

    #[test]
    fn test_field_reducers() {
        assert_eq!(render(&sum("@price").alias("total")), "REDUCE SUM 1 @price AS total");
        assert_eq!(render(&count_distinct("@user")), "REDUCE COUNT_DISTINCT 1 @user");
        assert_eq!(render(&count_distinctish("@user")), "REDUCE COUNT_DISTINCTISH 1 @user");
        assert_eq!(render(&min("@a")), "REDUCE MIN 1 @a");
        assert_eq!(render(&max("@a")), "REDUCE MAX 1 @a");
        assert_eq!(render(&avg("@a")), "REDUCE AVG 1 @a");
        assert_eq!(render(&stddev("@a")), "REDUCE STDDEV 1 @a");
        assert_eq!(render(&to_list("@a")), "REDUCE TOLIST 1 @a");
    }

    #[test]
    fn test_quantile() {
        assert_eq!(render(&quantile("@price", 0.5)), "REDUCE QUANTILE 2 @price 0.5");
        assert_eq!(render(&quantile("@price", 1.0)), "REDUCE QUANTILE 2 @price 1.0");
    }

    #[test]
    fn test_first_value() {
        assert_eq!(render(&first_value("@name")), "REDUCE FIRST_VALUE 1 @name");
        assert_eq!(
            render(&first_value_by("@name", SortedField::desc("@age")).alias("oldest")),
            "REDUCE FIRST_VALUE 4 @name BY @age DESC AS oldest"
        );
    }

    #[test]
    fn test_random_sample() {
        assert_eq!(render(&random_sample("@id", 3)), "REDUCE RANDOM_SAMPLE 2 @id 3");
    }

    #[test]
    fn test_empty_alias_skipped() {
        assert_eq!(render(&count().alias("")), "REDUCE COUNT 0");
    }
}
