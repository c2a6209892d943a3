// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search request (FT.SEARCH) parameters
//!
//! # Argument Order
//!
//! ```text
//! FT.SEARCH idx <query>
//!   [VERBATIM] [NOCONTENT] [NOSTOPWORDS] [WITHSCORES] [WITHPAYLOADS]
//!   [LANGUAGE lang] [SCORER name] [INFIELDS n f..]
//!   [SORTBY field ASC|DESC] [PAYLOAD bytes] [LIMIT offset count]
//!   [FILTER ..]* [GEOFILTER ..]*
//!   [HIGHLIGHT [FIELDS n f..] [TAGS open close]]
//!   [SUMMARIZE [FIELDS n f..] [FRAGS n] [LEN n] [SEPARATOR s]]
//!   [INKEYS n k..] [RETURN n field [AS alias]..]
//! ```
//!
//! Clauses left at their defaults are omitted entirely, including the
//! default `LIMIT 0 10`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::filters::Filter;
use super::query_builder::QueryNode;
use crate::args::Args;
use crate::reply::SearchReplyShape;

pub const DEFAULT_OFFSET: usize = 0;
pub const DEFAULT_COUNT: usize = 10;

/// Sort direction shared by search and aggregation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field projected into the reply, optionally renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnField {
    pub name: String,
    pub alias: Option<String>,
}

/// HIGHLIGHT clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightOptions {
    pub fields: Vec<String>,
    pub tags: Option<(String, String)>,
}

impl HighlightOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn tags(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.tags = Some((open.into(), close.into()));
        self
    }

    fn serialize_into(&self, args: &mut Args) {
        args.push("HIGHLIGHT");
        if !self.fields.is_empty() {
            args.push("FIELDS").push_counted(&self.fields);
        }
        if let Some((open, close)) = &self.tags {
            args.push("TAGS").push(open).push(close);
        }
    }
}

/// SUMMARIZE clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeOptions {
    pub fields: Vec<String>,
    pub fragment_count: Option<u32>,
    pub fragment_len: Option<u32>,
    pub separator: Option<String>,
}

impl SummarizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn fragment_count(mut self, count: u32) -> Self {
        self.fragment_count = Some(count);
        self
    }

    pub fn fragment_len(mut self, len: u32) -> Self {
        self.fragment_len = Some(len);
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    fn serialize_into(&self, args: &mut Args) {
        args.push("SUMMARIZE");
        if !self.fields.is_empty() {
            args.push("FIELDS").push_counted(&self.fields);
        }
        if let Some(frags) = self.fragment_count {
            args.push("FRAGS").push(frags.to_string());
        }
        if let Some(len) = self.fragment_len {
            args.push("LEN").push(len.to_string());
        }
        if let Some(separator) = &self.separator {
            args.push("SEPARATOR").push(separator);
        }
    }
}

/// FT.SEARCH request.
///
/// Built with chained setters and serialized right before dispatch.
/// Serialization never mutates the request, so the same query can be sent
/// any number of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    query_string: String,
    offset: usize,
    count: usize,
    verbatim: bool,
    no_content: bool,
    no_stopwords: bool,
    with_scores: bool,
    with_payloads: bool,
    language: Option<String>,
    scorer: Option<String>,
    in_fields: Vec<String>,
    in_keys: Vec<String>,
    return_fields: Vec<ReturnField>,
    sort_by: Option<(String, SortOrder)>,
    payload: Option<Vec<u8>>,
    highlight: Option<HighlightOptions>,
    summarize: Option<SummarizeOptions>,
    filters: Vec<Filter>,
}

impl Query {
    pub fn new(query_string: impl Into<String>) -> Self {
        Self {
            query_string: query_string.into(),
            offset: DEFAULT_OFFSET,
            count: DEFAULT_COUNT,
            verbatim: false,
            no_content: false,
            no_stopwords: false,
            with_scores: false,
            with_payloads: false,
            language: None,
            scorer: None,
            in_fields: Vec::new(),
            in_keys: Vec::new(),
            return_fields: Vec::new(),
            sort_by: None,
            payload: None,
            highlight: None,
            summarize: None,
            filters: Vec::new(),
        }
    }

    /// Query whose string is rendered from a builder tree.
    pub fn from_node(node: &QueryNode) -> Self {
        Self::new(node.to_string())
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    pub fn limit(mut self, offset: usize, count: usize) -> Self {
        self.offset = offset;
        self.count = count;
        self
    }

    pub fn verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }

    pub fn no_content(mut self) -> Self {
        self.no_content = true;
        self
    }

    pub fn no_stopwords(mut self) -> Self {
        self.no_stopwords = true;
        self
    }

    pub fn with_scores(mut self) -> Self {
        self.with_scores = true;
        self
    }

    pub fn with_payloads(mut self) -> Self {
        self.with_payloads = true;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn scorer(mut self, scorer: impl Into<String>) -> Self {
        self.scorer = Some(scorer.into());
        self
    }

    /// Restrict matching to the given fields (INFIELDS).
    pub fn limit_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict matching to the given document keys (INKEYS).
    pub fn limit_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Project only these fields into the reply.
    pub fn return_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.return_fields.extend(fields.into_iter().map(|name| ReturnField {
            name: name.into(),
            alias: None,
        }));
        self
    }

    /// Project a field under another name (`field AS alias`).
    pub fn return_field_as(mut self, field: impl Into<String>, alias: impl Into<String>) -> Self {
        self.return_fields.push(ReturnField {
            name: field.into(),
            alias: Some(alias.into()),
        });
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some((field.into(), order));
        self
    }

    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn highlight(mut self, options: HighlightOptions) -> Self {
        self.highlight = Some(options);
        self
    }

    pub fn summarize(mut self, options: SummarizeOptions) -> Self {
        self.summarize = Some(options);
        self
    }

    pub fn add_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Shape of the reply this request produces, used to decode it.
    pub fn reply_shape(&self) -> SearchReplyShape {
        SearchReplyShape {
            has_content: !self.no_content,
            has_scores: self.with_scores,
            has_payloads: self.with_payloads,
        }
    }

    /// Serialize into the tokens following `FT.SEARCH <index>`.
    pub fn serialize(&self) -> Args {
        let mut args = Args::new();
        args.push(&self.query_string);

        if self.verbatim {
            args.push("VERBATIM");
        }
        if self.no_content {
            args.push("NOCONTENT");
        }
        if self.no_stopwords {
            args.push("NOSTOPWORDS");
        }
        if self.with_scores {
            args.push("WITHSCORES");
        }
        if self.with_payloads {
            args.push("WITHPAYLOADS");
        }
        if let Some(language) = &self.language {
            args.push("LANGUAGE").push(language);
        }
        if let Some(scorer) = &self.scorer {
            args.push("SCORER").push(scorer);
        }
        if !self.in_fields.is_empty() {
            args.push("INFIELDS").push_counted(&self.in_fields);
        }
        if let Some((field, order)) = &self.sort_by {
            args.push("SORTBY").push(field).push(order.as_str());
        }
        if let Some(payload) = &self.payload {
            args.push("PAYLOAD").push_bytes(payload.clone());
        }
        if self.offset != DEFAULT_OFFSET || self.count != DEFAULT_COUNT {
            args.push("LIMIT").push_count(self.offset).push_count(self.count);
        }
        for filter in &self.filters {
            filter.serialize_into(&mut args);
        }
        if let Some(highlight) = &self.highlight {
            highlight.serialize_into(&mut args);
        }
        if let Some(summarize) = &self.summarize {
            summarize.serialize_into(&mut args);
        }
        if !self.in_keys.is_empty() {
            args.push("INKEYS").push_counted(&self.in_keys);
        }
        if !self.return_fields.is_empty() {
            // The count covers tokens, so an aliased field counts as three.
            let tokens: usize = self
                .return_fields
                .iter()
                .map(|f| if f.alias.is_some() { 3 } else { 1 })
                .sum();
            args.push("RETURN").push_count(tokens);
            for field in &self.return_fields {
                args.push(&field.name);
                if let Some(alias) = &field.alias {
                    args.push("AS").push(alias);
                }
            }
        }

        args
    }
}
