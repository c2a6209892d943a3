// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Autocomplete suggestions (FT.SUGADD / FT.SUGGET)
//!
//! ```text
//! FT.SUGADD key string score [INCR] [PAYLOAD p]
//! FT.SUGGET key prefix [FUZZY] MAX n [WITHSCORES] [WITHPAYLOADS]
//!   -> [string, [score], [payload], string, ...]
//! ```

use redis::Value;

use crate::args::{format_number, Args};
use crate::error::{CodecError, Result};
use crate::reply::reader::{value_to_string, ReplyReader};

pub const DEFAULT_MAX: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    string: String,
    score: f64,
    payload: Option<String>,
}

impl Suggestion {
    pub fn builder() -> SuggestionBuilder {
        SuggestionBuilder::default()
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Arguments following `FT.SUGADD`.
    pub fn to_add_args(&self, key: &str, increment: bool) -> Args {
        let mut args = Args::new();
        args.push(key).push(&self.string).push(format_number(self.score));
        if increment {
            args.push("INCR");
        }
        if let Some(payload) = &self.payload {
            args.push("PAYLOAD").push(payload);
        }
        args
    }
}

#[derive(Debug, Clone)]
pub struct SuggestionBuilder {
    string: Option<String>,
    score: f64,
    payload: Option<String>,
}

impl Default for SuggestionBuilder {
    fn default() -> Self {
        Self {
            string: None,
            score: 1.0,
            payload: None,
        }
    }
}

impl SuggestionBuilder {
    pub fn string(mut self, string: impl Into<String>) -> Self {
        self.string = Some(string.into());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn build(self) -> Result<Suggestion> {
        let string = self
            .string
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CodecError::invalid("suggestion string is required"))?;
        if !(0.0..=1.0).contains(&self.score) {
            return Err(CodecError::invalid(format!(
                "suggestion score {} outside [0, 1]",
                self.score
            )));
        }
        Ok(Suggestion {
            string,
            score: self.score,
            payload: self.payload,
        })
    }
}

/// Extra data requested with each suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionWith {
    #[default]
    Nothing,
    Scores,
    Payloads,
    ScoresAndPayloads,
}

impl SuggestionWith {
    fn scores(self) -> bool {
        matches!(self, SuggestionWith::Scores | SuggestionWith::ScoresAndPayloads)
    }

    fn payloads(self) -> bool {
        matches!(self, SuggestionWith::Payloads | SuggestionWith::ScoresAndPayloads)
    }

    pub fn stride(self) -> usize {
        1 + usize::from(self.scores()) + usize::from(self.payloads())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionOptions {
    pub fuzzy: bool,
    pub max: u32,
    pub with: SuggestionWith,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            fuzzy: false,
            max: DEFAULT_MAX,
            with: SuggestionWith::Nothing,
        }
    }
}

impl SuggestionOptions {
    /// Arguments following `FT.SUGGET`.
    pub fn to_get_args(&self, key: &str, prefix: &str) -> Args {
        let mut args = Args::new();
        args.push(key).push(prefix);
        if self.fuzzy {
            args.push("FUZZY");
        }
        args.push("MAX").push(self.max.to_string());
        if self.with.scores() {
            args.push("WITHSCORES");
        }
        if self.with.payloads() {
            args.push("WITHPAYLOADS");
        }
        args
    }
}

/// Decode FT.SUGGET output for the given options.
pub fn decode_suggestions(reply: &Value, options: &SuggestionOptions) -> Result<Vec<Suggestion>> {
    if matches!(reply, Value::Nil) {
        return Ok(Vec::new());
    }

    let mut reader = ReplyReader::from_value(reply)?;
    let count = reader.expect_stride(options.with.stride())?;
    let mut suggestions = Vec::with_capacity(count);

    for _ in 0..count {
        let string = reader.next_string()?;
        let score = if options.with.scores() { reader.next_f64()? } else { 1.0 };
        let payload = if options.with.payloads() {
            match reader.next()? {
                Value::Nil => None,
                other => Some(value_to_string(other)?),
            }
        } else {
            None
        };
        // Server-side scores are unbounded.
        suggestions.push(Suggestion {
            string,
            score,
            payload,
        });
    }

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(s: &str) -> Value {
        Value::BulkString(s.as_bytes().to_vec())
    }

    #[test]
    fn test_builder_defaults() {
        let s = Suggestion::builder().string("hello").build().unwrap();
        assert_eq!(s.string(), "hello");
        assert_eq!(s.score(), 1.0);
        assert_eq!(s.payload(), None);
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        assert!(Suggestion::builder().build().is_err());
        assert!(Suggestion::builder().string("").build().is_err());
        let err = Suggestion::builder().string("a").score(1.5).build().unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument(_)));
        assert!(Suggestion::builder().string("a").score(-0.1).build().is_err());
        assert!(Suggestion::builder().string("a").score(f64::NAN).build().is_err());
    }

    #[test]
    fn test_add_args() {
        let s = Suggestion::builder()
            .string("redis")
            .score(0.5)
            .payload("db")
            .build()
            .unwrap();
        assert_eq!(s.to_add_args("ac", true).to_string(), "ac redis 0.5 INCR PAYLOAD db");
        assert_eq!(
            Suggestion::builder().string("x").build().unwrap().to_add_args("ac", false).to_string(),
            "ac x 1.0"
        );
    }

    #[test]
    fn test_get_args() {
        let options = SuggestionOptions {
            fuzzy: true,
            max: 10,
            with: SuggestionWith::ScoresAndPayloads,
        };
        assert_eq!(
            options.to_get_args("ac", "re").to_string(),
            "ac re FUZZY MAX 10 WITHSCORES WITHPAYLOADS"
        );
        assert_eq!(SuggestionOptions::default().to_get_args("ac", "re").to_string(), "ac re MAX 5");
    }

    #[test]
    fn test_decode_plain() {
        let reply = Value::Array(vec![bulk("redis"), bulk("redisearch")]);
        let out = decode_suggestions(&reply, &SuggestionOptions::default()).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].string(), "redisearch");
    }

    #[test]
    fn test_decode_scores_and_payloads() {
        let options = SuggestionOptions {
            with: SuggestionWith::ScoresAndPayloads,
            ..Default::default()
        };
        let reply = Value::Array(vec![bulk("redis"), bulk("2.5"), bulk("db"), bulk("rust"), bulk("1"), Value::Nil]);
        let out = decode_suggestions(&reply, &options).unwrap();
        assert_eq!(out[0].score(), 2.5);
        assert_eq!(out[0].payload(), Some("db"));
        assert_eq!(out[1].payload(), None);
    }

    #[test]
    fn test_decode_payloads_only() {
        let options = SuggestionOptions {
            with: SuggestionWith::Payloads,
            ..Default::default()
        };
        let reply = Value::Array(vec![bulk("redis"), bulk("db")]);
        let out = decode_suggestions(&reply, &options).unwrap();
        assert_eq!(out[0].score(), 1.0);
        assert_eq!(out[0].payload(), Some("db"));
    }

    #[test]
    fn test_decode_stride_mismatch() {
        let options = SuggestionOptions {
            with: SuggestionWith::Scores,
            ..Default::default()
        };
        let reply = Value::Array(vec![bulk("redis"), bulk("1.0"), bulk("orphan")]);
        assert!(matches!(
            decode_suggestions(&reply, &options),
            Err(CodecError::ProtocolMismatch(_))
        ));
    }

    #[test]
    fn test_decode_nil_is_empty() {
        assert!(decode_suggestions(&Value::Nil, &SuggestionOptions::default())
            .unwrap()
            .is_empty());
    }
}
