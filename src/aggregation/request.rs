// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Aggregation request (FT.AGGREGATE)
//!
//! # Argument Order
//!
//! ```text
//! FT.AGGREGATE idx <query>
//!   [LOAD n f..]
//!   (GROUPBY n f.. (REDUCE name argc args.. [AS alias])* [LIMIT offset count])*
//!   (APPLY expr AS alias)*
//!   (FILTER expr)*
//!   [SORTBY 2n f1 dir1.. [MAX k]]
//!   [LIMIT offset count]
//!   [WITHCURSOR COUNT n [MAXIDLE ms]]
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::reducers::Reducer;
use super::SortedField;
use crate::args::Args;
use crate::error::{CodecError, Result};

/// Paging window. `(0, 0)` means "no limit" and is never serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    pub offset: usize,
    pub count: usize,
}

impl Limit {
    pub fn new(offset: usize, count: usize) -> Self {
        Self { offset, count }
    }

    pub fn is_unset(&self) -> bool {
        self.offset == 0 && self.count == 0
    }

    fn serialize_into(&self, args: &mut Args) {
        if !self.is_unset() {
            args.push("LIMIT").push_count(self.offset).push_count(self.count);
        }
    }
}

/// GROUPBY stage with its reducers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub fields: Vec<String>,
    pub reducers: Vec<Reducer>,
    pub limit: Limit,
}

impl Group {
    fn serialize_into(&self, args: &mut Args) {
        args.push("GROUPBY").push_counted(&self.fields);
        for reducer in &self.reducers {
            reducer.serialize_into(args);
        }
        self.limit.serialize_into(args);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Cursor {
    count: u32,
    max_idle: Option<Duration>,
}

/// FT.AGGREGATE pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationRequest {
    query: String,
    load: Vec<String>,
    groups: Vec<Group>,
    /// alias -> expression, emitted in insertion order
    projections: Vec<(String, String)>,
    filters: Vec<String>,
    sort_by: Vec<SortedField>,
    sort_by_max: Option<usize>,
    limit: Limit,
    cursor: Option<Cursor>,
}

impl Default for AggregationRequest {
    fn default() -> Self {
        Self::new("*")
    }
}

impl AggregationRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            load: Vec::new(),
            groups: Vec::new(),
            projections: Vec::new(),
            filters: Vec::new(),
            sort_by: Vec::new(),
            sort_by_max: None,
            limit: Limit::default(),
            cursor: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn load<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.load.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Start a GROUPBY stage. Limits added afterwards belong to this group.
    pub fn group_by<I, S, R>(mut self, fields: I, reducers: R) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = Reducer>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(CodecError::invalid("GROUPBY requires at least one field"));
        }
        self.groups.push(Group {
            fields,
            reducers: reducers.into_iter().collect(),
            limit: Limit::default(),
        });
        Ok(self)
    }

    /// Add a reducer to the most recent group.
    pub fn reduce(mut self, reducer: Reducer) -> Result<Self> {
        match self.groups.last_mut() {
            Some(group) => {
                group.reducers.push(reducer);
                Ok(self)
            }
            None => Err(CodecError::invalid("REDUCE requires a preceding GROUPBY")),
        }
    }

    /// Set a paging window.
    ///
    /// Once a group exists the window applies to the last group; before any
    /// GROUPBY it applies to the whole pipeline.
    pub fn limit(mut self, offset: usize, count: usize) -> Self {
        let limit = Limit::new(offset, count);
        match self.groups.last_mut() {
            Some(group) => group.limit = limit,
            None => self.limit = limit,
        }
        self
    }

    pub fn limit_count(self, count: usize) -> Self {
        self.limit(0, count)
    }

    /// `APPLY expression AS alias`. Re-applying an alias replaces its
    /// expression in place.
    pub fn apply(mut self, expression: impl Into<String>, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        let expression = expression.into();
        match self.projections.iter_mut().find(|(a, _)| *a == alias) {
            Some(existing) => existing.1 = expression,
            None => self.projections.push((alias, expression)),
        }
        self
    }

    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filters.push(expression.into());
        self
    }

    pub fn sort_by<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = SortedField>,
    {
        self.sort_by.extend(fields);
        self
    }

    /// Sort and keep only the top `max` rows.
    pub fn sort_by_max<I>(mut self, max: usize, fields: I) -> Self
    where
        I: IntoIterator<Item = SortedField>,
    {
        self.sort_by.extend(fields);
        self.sort_by_max = Some(max);
        self
    }

    /// Page through results with a server-side cursor. `max_idle` of `None`
    /// leaves the server's idle timeout in place. A `count` of zero disables
    /// the cursor.
    pub fn cursor(mut self, count: u32, max_idle: Option<Duration>) -> Self {
        self.cursor = (count > 0).then_some(Cursor { count, max_idle });
        self
    }

    pub fn is_with_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    /// Serialize into the tokens following `FT.AGGREGATE <index>`.
    pub fn serialize(&self) -> Args {
        let mut args = Args::new();
        args.push(&self.query);

        if !self.load.is_empty() {
            args.push("LOAD").push_counted(&self.load);
        }
        for group in &self.groups {
            group.serialize_into(&mut args);
        }
        for (alias, expression) in &self.projections {
            args.push("APPLY").push(expression).push("AS").push(alias);
        }
        for expression in &self.filters {
            args.push("FILTER").push(expression);
        }
        if !self.sort_by.is_empty() {
            args.push("SORTBY").push_count(self.sort_by.len() * 2);
            for field in &self.sort_by {
                args.push(&field.field).push(field.order.as_str());
            }
            if let Some(max) = self.sort_by_max.filter(|m| *m > 0) {
                args.push("MAX").push_count(max);
            }
        }
        self.limit.serialize_into(&mut args);
        if let Some(cursor) = &self.cursor {
            args.push("WITHCURSOR").push("COUNT").push(cursor.count.to_string());
            if let Some(idle) = cursor.max_idle {
                let millis = idle.as_millis();
                if millis < u128::from(u64::MAX) {
                    args.push("MAXIDLE").push(millis.to_string());
                }
            }
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::reducers::{count, quantile, sum};

    #[test]
    fn test_default_is_match_all() {
        assert_eq!(AggregationRequest::default().serialize().to_string(), "*");
    }

    #[test]
    fn test_group_count_sort() {
        let req = AggregationRequest::default()
            .group_by(["@actor"], [count().alias("cnt")])
            .unwrap()
            .sort_by([SortedField::desc("@cnt")]);
        assert_eq!(
            req.serialize().to_string(),
            "* GROUPBY 1 @actor REDUCE COUNT 0 AS cnt SORTBY 2 @cnt DESC"
        );
    }

    #[test]
    fn test_limit_without_group_is_top_level() {
        let req = AggregationRequest::new("@t:x").limit(5, 10);
        assert_eq!(req.serialize().to_string(), "@t:x LIMIT 5 10");
    }

    #[test]
    fn test_limit_after_group_attaches_to_group() {
        let req = AggregationRequest::default()
            .group_by(["@a"], [count()])
            .unwrap()
            .limit(0, 3)
            .sort_by([SortedField::asc("@a")]);
        assert_eq!(
            req.serialize().to_string(),
            "* GROUPBY 1 @a REDUCE COUNT 0 LIMIT 0 3 SORTBY 2 @a ASC"
        );
        assert_eq!(req.groups()[0].limit, Limit::new(0, 3));
    }

    #[test]
    fn test_limit_targets_last_group() {
        let req = AggregationRequest::default()
            .group_by(["@a"], [count()])
            .unwrap()
            .group_by(["@b"], [sum("@x")])
            .unwrap()
            .limit_count(2);
        assert!(req.groups()[0].limit.is_unset());
        assert_eq!(req.groups()[1].limit, Limit::new(0, 2));
    }

    #[test]
    fn test_full_pipeline_order() {
        let req = AggregationRequest::new("@t:{a}")
            .cursor(100, Some(Duration::from_millis(5000)))
            .limit(0, 50)
            .load(["@title"])
            .apply("upper(@title)", "t")
            .filter("@n > 1")
            .group_by(["@t", "@y"], [count().alias("n")])
            .unwrap()
            .reduce(quantile("@price", 0.9).alias("p90"))
            .unwrap()
            .sort_by_max(10, [SortedField::desc("@n"), SortedField::asc("@t")]);
        assert_eq!(
            req.serialize().to_string(),
            "@t:{a} LOAD 1 @title GROUPBY 2 @t @y REDUCE COUNT 0 AS n \
             REDUCE QUANTILE 2 @price 0.9 AS p90 APPLY upper(@title) AS t FILTER @n > 1 \
             SORTBY 4 @n DESC @t ASC MAX 10 LIMIT 0 50 WITHCURSOR COUNT 100 MAXIDLE 5000"
        );
    }

    #[test]
    fn test_apply_keeps_insertion_order() {
        let req = AggregationRequest::default()
            .apply("@b*2", "b2")
            .apply("@a*2", "a2")
            .apply("@b*3", "b2");
        assert_eq!(
            req.serialize().to_string(),
            "* APPLY @b*3 AS b2 APPLY @a*2 AS a2"
        );
    }

    #[test]
    fn test_cursor_without_max_idle() {
        let req = AggregationRequest::default().cursor(10, None);
        assert!(req.is_with_cursor());
        assert_eq!(req.serialize().to_string(), "* WITHCURSOR COUNT 10");
    }

    #[test]
    fn test_cursor_zero_count_disabled() {
        let req = AggregationRequest::default().cursor(0, Some(Duration::from_secs(1)));
        assert!(!req.is_with_cursor());
        assert_eq!(req.serialize().to_string(), "*");
    }

    #[test]
    fn test_sort_max_zero_not_emitted() {
        let req = AggregationRequest::default().sort_by_max(0, [SortedField::asc("@a")]);
        assert_eq!(req.serialize().to_string(), "* SORTBY 2 @a ASC");
    }

    #[test]
    fn test_group_by_requires_fields() {
        let err = AggregationRequest::default()
            .group_by(Vec::<String>::new(), [count()])
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument(_)));
    }

    #[test]
    fn test_reduce_without_group_rejected() {
        assert!(AggregationRequest::default().reduce(count()).is_err());
    }
}
