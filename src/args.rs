// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Positional argument lists
//!
//! Every request in this crate serializes into an [`Args`] list: the ordered
//! tokens that follow the command name (`FT.SEARCH`, `FT.AGGREGATE`, ...).
//! Tokens are raw bytes because payloads are opaque binary blobs.
//!
//! ```text
//! FT.SEARCH idx  "@name:alice"  WITHSCORES  LIMIT 0 20
//!                └───────────── Args ──────────────┘
//! ```

use std::fmt;

use redis::{RedisWrite, ToRedisArgs};

/// Ordered token list handed to the transport as one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    tokens: Vec<Vec<u8>>,
}

impl Args {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Append a textual token.
    pub fn push(&mut self, token: impl AsRef<str>) -> &mut Self {
        self.tokens.push(token.as_ref().as_bytes().to_vec());
        self
    }

    /// Append a binary token.
    pub fn push_bytes(&mut self, token: impl Into<Vec<u8>>) -> &mut Self {
        self.tokens.push(token.into());
        self
    }

    /// Append a decimal count.
    pub fn push_count(&mut self, count: usize) -> &mut Self {
        self.push(count.to_string())
    }

    /// Append `count` followed by every item: the `n a1..an` shape used by
    /// LOAD, INFIELDS, INKEYS, GROUPBY and friends.
    pub fn push_counted<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items: Vec<S> = items.into_iter().collect();
        self.push_count(items.len());
        for item in items {
            self.push(item);
        }
        self
    }

    pub fn extend(&mut self, other: Args) -> &mut Self {
        self.tokens.extend(other.tokens);
        self
    }

    pub fn tokens(&self) -> &[Vec<u8>] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Lossy textual view, mostly useful for logging and assertions.
    pub fn to_strings(&self) -> Vec<String> {
        self.tokens
            .iter()
            .map(|t| String::from_utf8_lossy(t).into_owned())
            .collect()
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strings().join(" "))
    }
}

impl ToRedisArgs for Args {
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        for token in &self.tokens {
            out.write_arg(token);
        }
    }
}

/// Canonical numeric wire form.
///
/// Integral values keep one decimal place (`42.0`), everything else uses the
/// shortest round-trip decimal. Never emits exponent notation. Infinities are
/// not handled here: each caller has its own sentinel tokens.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_counted() {
        let mut args = Args::new();
        args.push("LOAD").push_counted(["@a", "@b"]);
        assert_eq!(args.to_strings(), vec!["LOAD", "2", "@a", "@b"]);
    }

    #[test]
    fn test_display_joins_with_space() {
        let mut args = Args::new();
        args.push("*").push("LIMIT").push_count(0).push_count(5);
        assert_eq!(args.to_string(), "* LIMIT 0 5");
    }

    #[test]
    fn test_binary_tokens_preserved() {
        let mut args = Args::new();
        args.push_bytes(vec![0u8, 159, 146, 150]);
        assert_eq!(args.tokens()[0], vec![0u8, 159, 146, 150]);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42.0), "42.0");
        assert_eq!(format_number(-3.0), "-3.0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.25), "1.25");
        assert_eq!(format_number(1e20), "100000000000000000000.0");
        assert_eq!(format_number(0.000001), "0.000001");
    }
}
