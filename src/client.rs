// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index-bound search client.
//!
//! [`Client`] pairs an index name with a [`Transport`]. Each operation
//! serializes its request, sends one FT.* command and decodes the reply
//! according to the request that produced it.
//!
//! # Example
//!
//! ```rust,no_run
//! # use redisearch_codec::{Client, ClientConfig, Query};
//! # async fn example() -> redisearch_codec::Result<()> {
//! let client = Client::connect(&ClientConfig::default()).await?;
//! let result = client.search(&Query::new("@title:redis").limit(0, 5)).await?;
//! for doc in &result.documents {
//!     println!("{} -> {:?}", doc.id, doc.get_str("title"));
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use redis::aio::ConnectionManager;
use redis::Value;
use tracing::{debug, info, warn};

use crate::aggregation::AggregationRequest;
use crate::args::Args;
use crate::config::ClientConfig;
use crate::error::{CodecError, Result};
use crate::metrics::{self, LatencyTimer};
use crate::reply::reader::{value_to_i64, value_to_string};
use crate::reply::{
    decode_aggregation, decode_config, decode_info, decode_search, AggregationResult, SearchResult,
};
use crate::search::{to_create_args, IndexDefinition, IndexOptions, Query, Schema};
use crate::suggest::{decode_suggestions, Suggestion, SuggestionOptions};
use crate::transport::Transport;

pub struct Client<T: Transport> {
    transport: T,
    index: String,
    decode_content: bool,
    cursor_read_count: u32,
}

impl Client<ConnectionManager> {
    /// Open a managed connection to `config.redis_url`.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;
        info!(url = %config.redis_url, index = %config.index_name, "Connected to Redis");
        Ok(Self::with_config(connection, config))
    }
}

impl<T: Transport> Client<T> {
    /// Client for `index` with default decoding options.
    pub fn new(transport: T, index: impl Into<String>) -> Self {
        Self {
            transport,
            index: index.into(),
            decode_content: true,
            cursor_read_count: 0,
        }
    }

    pub fn with_config(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            index: config.index_name.clone(),
            decode_content: config.decode_content,
            cursor_read_count: config.cursor_read_count,
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Index management
    // ═══════════════════════════════════════════════════════════════════════

    /// FT.CREATE
    pub async fn create_index(
        &self,
        schema: &Schema,
        definition: Option<&IndexDefinition>,
        options: &IndexOptions,
    ) -> Result<()> {
        let args = to_create_args(&self.index, schema, definition, options)?;
        let reply = self.dispatch("FT.CREATE", args).await?;
        self.decoded("FT.CREATE", expect_ok(&reply))
    }

    /// FT.DROPINDEX, optionally deleting the indexed documents too.
    pub async fn drop_index(&self, delete_documents: bool) -> Result<()> {
        let mut args = self.index_args();
        if delete_documents {
            args.push("DD");
        }
        let reply = self.dispatch("FT.DROPINDEX", args).await?;
        self.decoded("FT.DROPINDEX", expect_ok(&reply))
    }

    /// FT.INFO as a name -> raw value table.
    pub async fn info(&self) -> Result<HashMap<String, Value>> {
        let reply = self.dispatch("FT.INFO", self.index_args()).await?;
        self.decoded("FT.INFO", decode_info(&reply))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════════

    pub async fn search(&self, query: &Query) -> Result<SearchResult> {
        let mut args = self.index_args();
        args.extend(query.serialize());
        let reply = self.dispatch("FT.SEARCH", args).await?;
        let result = self.decoded(
            "FT.SEARCH",
            decode_search(&reply, query.reply_shape(), self.decode_content),
        )?;
        metrics::record_results("FT.SEARCH", result.documents.len());
        Ok(result)
    }

    /// FT.EXPLAIN: the server's execution plan for `query`.
    pub async fn explain(&self, query: &Query) -> Result<String> {
        let mut args = self.index_args();
        args.extend(query.serialize());
        let reply = self.dispatch("FT.EXPLAIN", args).await?;
        self.decoded("FT.EXPLAIN", value_to_string(&reply))
    }

    pub async fn aggregate(&self, request: &AggregationRequest) -> Result<AggregationResult> {
        let mut args = self.index_args();
        args.extend(request.serialize());
        let reply = self.dispatch("FT.AGGREGATE", args).await?;
        let result = self.decoded(
            "FT.AGGREGATE",
            decode_aggregation(&reply, request.is_with_cursor()),
        )?;
        metrics::record_results("FT.AGGREGATE", result.rows.len());
        Ok(result)
    }

    /// Fetch the next page of a cursor opened by [`aggregate`](Self::aggregate).
    ///
    /// `count` of `None` uses the configured `cursor_read_count`; zero leaves
    /// the page size the cursor was opened with.
    pub async fn cursor_read(&self, cursor_id: u64, count: Option<u32>) -> Result<AggregationResult> {
        let count = count.unwrap_or(self.cursor_read_count);
        let mut args = Args::new();
        args.push("READ").push(&self.index).push(cursor_id.to_string());
        if count > 0 {
            args.push("COUNT").push(count.to_string());
        }
        let reply = self.dispatch("FT.CURSOR", args).await?;
        let result = self.decoded("FT.CURSOR", decode_aggregation(&reply, true))?;
        metrics::record_results("FT.CURSOR", result.rows.len());
        Ok(result)
    }

    /// Release a cursor before it is exhausted.
    pub async fn cursor_delete(&self, cursor_id: u64) -> Result<()> {
        let mut args = Args::new();
        args.push("DEL").push(&self.index).push(cursor_id.to_string());
        let reply = self.dispatch("FT.CURSOR", args).await?;
        self.decoded("FT.CURSOR", expect_ok(&reply))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Suggestions
    // ═══════════════════════════════════════════════════════════════════════

    /// FT.SUGADD; returns the dictionary size afterwards.
    pub async fn add_suggestion(&self, key: &str, suggestion: &Suggestion, increment: bool) -> Result<i64> {
        let reply = self
            .dispatch("FT.SUGADD", suggestion.to_add_args(key, increment))
            .await?;
        self.decoded("FT.SUGADD", value_to_i64(&reply))
    }

    pub async fn get_suggestions(
        &self,
        key: &str,
        prefix: &str,
        options: &SuggestionOptions,
    ) -> Result<Vec<Suggestion>> {
        let reply = self
            .dispatch("FT.SUGGET", options.to_get_args(key, prefix))
            .await?;
        let suggestions = self.decoded("FT.SUGGET", decode_suggestions(&reply, options))?;
        metrics::record_results("FT.SUGGET", suggestions.len());
        Ok(suggestions)
    }

    /// FT.SUGDEL; `true` if the string was present.
    pub async fn delete_suggestion(&self, key: &str, string: &str) -> Result<bool> {
        let mut args = Args::new();
        args.push(key).push(string);
        let reply = self.dispatch("FT.SUGDEL", args).await?;
        self.decoded("FT.SUGDEL", value_to_i64(&reply).map(|n| n == 1))
    }

    pub async fn suggestion_length(&self, key: &str) -> Result<i64> {
        let mut args = Args::new();
        args.push(key);
        let reply = self.dispatch("FT.SUGLEN", args).await?;
        self.decoded("FT.SUGLEN", value_to_i64(&reply))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Aliases and server configuration
    // ═══════════════════════════════════════════════════════════════════════

    /// Point `alias` at this index. Fails if the alias already exists.
    pub async fn add_alias(&self, alias: &str) -> Result<()> {
        let mut args = Args::new();
        args.push(alias).push(&self.index);
        let reply = self.dispatch("FT.ALIASADD", args).await?;
        self.decoded("FT.ALIASADD", expect_ok(&reply))
    }

    /// Point `alias` at this index, moving it from any other index.
    pub async fn update_alias(&self, alias: &str) -> Result<()> {
        let mut args = Args::new();
        args.push(alias).push(&self.index);
        let reply = self.dispatch("FT.ALIASUPDATE", args).await?;
        self.decoded("FT.ALIASUPDATE", expect_ok(&reply))
    }

    pub async fn delete_alias(&self, alias: &str) -> Result<()> {
        let mut args = Args::new();
        args.push(alias);
        let reply = self.dispatch("FT.ALIASDEL", args).await?;
        self.decoded("FT.ALIASDEL", expect_ok(&reply))
    }

    pub async fn set_config(&self, option: &str, value: &str) -> Result<()> {
        let mut args = Args::new();
        args.push("SET").push(option).push(value);
        let reply = self.dispatch("FT.CONFIG", args).await?;
        self.decoded("FT.CONFIG", expect_ok(&reply))
    }

    /// FT.CONFIG GET; `option` may be `*` for every option.
    pub async fn get_config(&self, option: &str) -> Result<HashMap<String, Option<String>>> {
        let mut args = Args::new();
        args.push("GET").push(option);
        let reply = self.dispatch("FT.CONFIG", args).await?;
        self.decoded("FT.CONFIG", decode_config(&reply))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Plumbing
    // ═══════════════════════════════════════════════════════════════════════

    fn index_args(&self) -> Args {
        let mut args = Args::new();
        args.push(&self.index);
        args
    }

    async fn dispatch(&self, command: &'static str, args: Args) -> Result<Value> {
        let _timer = LatencyTimer::new(command);
        debug!(index = %self.index, command, args = args.len(), "Dispatching command");

        match self.transport.execute(command, &args).await {
            Ok(reply) => {
                metrics::record_command(command, "success");
                Ok(reply)
            }
            Err(e) => {
                metrics::record_command(command, "error");
                warn!(index = %self.index, command, error = %e, "Command failed");
                Err(e)
            }
        }
    }

    fn decoded<R>(&self, command: &'static str, result: Result<R>) -> Result<R> {
        if let Err(e) = &result {
            metrics::record_command(command, "decode_error");
            warn!(index = %self.index, command, error = %e, "Reply did not match request");
        }
        result
    }
}

fn expect_ok(reply: &Value) -> Result<()> {
    match reply {
        Value::Okay => Ok(()),
        Value::SimpleString(s) if s == "OK" => Ok(()),
        other => Err(CodecError::mismatch(format!("expected OK, got {:?}", other))),
    }
}
