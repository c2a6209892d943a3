// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Reply decoding
//!
//! Turns the flat lists returned by FT.* commands into typed results. The
//! layout of a reply is a function of the request that produced it, so each
//! decoder takes the relevant request flags alongside the raw value.
//!
//! ```text
//! FT.SEARCH     -> decode_search(reply, query.reply_shape(), decode)
//! FT.AGGREGATE  -> decode_aggregation(reply, request.is_with_cursor())
//! FT.SUGGET     -> suggest::decode_suggestions(reply, &options)
//! FT.INFO       -> decode_info(reply)
//! ```

mod aggregate;
mod info;
pub mod reader;
mod search;

pub use aggregate::{decode_aggregation, AggregationResult, Row};
pub use info::{decode_config, decode_info};
pub use reader::ReplyReader;
pub use search::{decode_search, Document, FieldValue, SearchReplyShape, SearchResult};
