// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Aggregation pipelines
//!
//! ```rust
//! use redisearch_codec::aggregation::{reducers, AggregationRequest, SortedField};
//!
//! let request = AggregationRequest::default()
//!     .group_by(["@actor"], [reducers::count().alias("cnt")])?
//!     .sort_by([SortedField::desc("@cnt")]);
//!
//! assert_eq!(
//!     request.serialize().to_string(),
//!     "* GROUPBY 1 @actor REDUCE COUNT 0 AS cnt SORTBY 2 @cnt DESC"
//! );
//! # Ok::<(), redisearch_codec::CodecError>(())
//! ```

pub mod reducers;
mod request;

use serde::{Deserialize, Serialize};

use crate::search::SortOrder;

pub use reducers::{Reducer, ReducerKind};
pub use request::{AggregationRequest, Group, Limit};

/// Field plus direction, used by SORTBY and FIRST_VALUE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortedField {
    pub field: String,
    pub order: SortOrder,
}

impl SortedField {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}
