// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! # RediSearch Codec
//!
//! Typed requests and replies for the RediSearch FT.* command family.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Builders                            │
//! │  • QueryNode AST → query string                            │
//! │  • Query, AggregationRequest, Schema, Suggestion           │
//! │  • Validation happens here (InvalidArgument)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                      (serialize → Args)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Client + Transport                      │
//! │  • One FT.* command per operation                          │
//! │  • ConnectionManager in production, scripted in tests      │
//! │  • tracing events, metrics per command                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                        (redis::Value)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Reply decoders                        │
//! │  • Layout derived from the request flags                   │
//! │  • Shape violations surface as ProtocolMismatch            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redisearch_codec::{Client, ClientConfig, Query, Schema, IndexOptions};
//! use redisearch_codec::search::{intersect, values::between};
//!
//! #[tokio::main]
//! async fn main() -> redisearch_codec::Result<()> {
//!     let config = ClientConfig {
//!         index_name: "idx:books".into(),
//!         ..Default::default()
//!     };
//!     let client = Client::connect(&config).await?;
//!
//!     let schema = Schema::new().text_sortable("title").numeric("year");
//!     client.create_index(&schema, None, &IndexOptions::default()).await?;
//!
//!     let node = intersect()
//!         .add("title", ["rust"])
//!         .add("year", [between(2015, 2025)]);
//!     let result = client.search(&Query::from_node(&node).with_scores()).await?;
//!     println!("{} matches", result.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`search`]: query AST, search requests, filters and index schema
//! - [`aggregation`]: FT.AGGREGATE pipelines and reducers
//! - [`suggest`]: autocomplete dictionaries
//! - [`reply`]: reply decoders
//! - [`client`]: the index-bound [`Client`]
//! - [`transport`]: the [`Transport`] seam

pub mod aggregation;
pub mod args;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod reply;
pub mod search;
pub mod suggest;
pub mod transport;

// Note: We don't expose a `tracing` module to avoid conflict with the tracing crate

pub use aggregation::{AggregationRequest, Reducer, SortedField};
pub use args::Args;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{CodecError, Result};
pub use crate::metrics::LatencyTimer;
pub use reply::{AggregationResult, Document, FieldValue, Row, SearchResult};
pub use search::{
    Filter, IndexDefinition, IndexOn, IndexOptions, Query, QueryNode, Schema, SortOrder,
};
pub use suggest::{Suggestion, SuggestionOptions, SuggestionWith};
pub use transport::{ScriptedTransport, Transport};
