// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search requests
//!
//! Everything needed to describe an FT.SEARCH call and the index it runs
//! against.
//!
//! # Architecture
//!
//! ```text
//! values ──→ QueryNode (AST) ──render──→ query string
//!                                            │
//! Filter ───────────────────────────→ Query ─┴─serialize──→ Args
//!
//! Schema + IndexDefinition + IndexOptions ──to_create_args──→ Args
//! ```
//!
//! # Query Language
//!
//! | Builder              | Renders as              |
//! |----------------------|-------------------------|
//! | `intersect()`        | `(a b)`                 |
//! | `union()`            | `(a\|b)`                |
//! | `disjunct()`         | `-(a b)`                |
//! | `disjunct_union()`   | `-(a\|b)`               |
//! | `optional()`         | `~(a b)`                |
//! | `values::between`    | `@f:[lo hi]`            |
//! | `values::geo`        | `@f:[lon lat r unit]`   |
//! | `values::tags`       | `@f:{a \| b}`           |

pub mod filters;
pub mod query;
pub mod query_builder;
pub mod schema;
pub mod values;

pub use filters::Filter;
pub use query::{HighlightOptions, Query, ReturnField, SortOrder, SummarizeOptions};
pub use query_builder::{
    disjunct, disjunct_union, intersect, optional, union, Node, NodeKind, ParenMode, QueryNode,
    ValueNode,
};
pub use schema::{to_create_args, Field, FieldType, IndexDefinition, IndexOn, IndexOptions, Schema};
pub use values::{GeoUnit, Range, Value};
