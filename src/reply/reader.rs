// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Bounded cursor over a flat reply.
//!
//! Replies are positional lists whose meaning depends on the request flags.
//! Decoders walk them through [`ReplyReader`] so that every read is
//! bounds-checked: a short reply is a [`CodecError::ProtocolMismatch`],
//! never a panic or a silently truncated result.

use redis::Value;

use crate::error::{CodecError, Result};

pub struct ReplyReader<'a> {
    items: &'a [Value],
    pos: usize,
}

impl<'a> ReplyReader<'a> {
    pub fn new(items: &'a [Value]) -> Self {
        Self { items, pos: 0 }
    }

    /// Reader over a list reply.
    pub fn from_value(value: &'a Value) -> Result<Self> {
        as_array(value).map(Self::new)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.items.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn peek(&self) -> Option<&'a Value> {
        self.items.get(self.pos)
    }

    pub fn next(&mut self) -> Result<&'a Value> {
        let value = self.items.get(self.pos).ok_or_else(|| {
            CodecError::mismatch(format!(
                "reply too short: wanted element {} of {}",
                self.pos,
                self.items.len()
            ))
        })?;
        self.pos += 1;
        Ok(value)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(CodecError::mismatch(format!(
                "reply too short: cannot skip {} of {} remaining",
                n,
                self.remaining()
            )));
        }
        self.pos += n;
        Ok(())
    }

    pub fn next_string(&mut self) -> Result<String> {
        self.next().and_then(value_to_string)
    }

    pub fn next_bytes(&mut self) -> Result<Vec<u8>> {
        self.next().and_then(value_to_bytes)
    }

    pub fn next_int(&mut self) -> Result<i64> {
        self.next().and_then(value_to_i64)
    }

    pub fn next_f64(&mut self) -> Result<f64> {
        self.next().and_then(value_to_f64)
    }

    pub fn next_array(&mut self) -> Result<&'a [Value]> {
        self.next().and_then(as_array)
    }

    /// Fail unless the rest of the reply splits evenly into `stride`-sized records.
    pub fn expect_stride(&self, stride: usize) -> Result<usize> {
        let remaining = self.remaining();
        if stride == 0 || remaining % stride != 0 {
            return Err(CodecError::mismatch(format!(
                "{} reply elements do not divide into records of {}",
                remaining, stride
            )));
        }
        Ok(remaining / stride)
    }
}

pub fn as_array(value: &Value) -> Result<&[Value]> {
    match value {
        Value::Array(items) | Value::Set(items) => Ok(items),
        other => Err(CodecError::mismatch(format!("expected a list, got {:?}", other))),
    }
}

pub fn value_to_bytes(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::BulkString(bytes) => Ok(bytes.clone()),
        Value::SimpleString(s) => Ok(s.as_bytes().to_vec()),
        Value::VerbatimString { text, .. } => Ok(text.as_bytes().to_vec()),
        Value::Okay => Ok(b"OK".to_vec()),
        Value::Int(n) => Ok(n.to_string().into_bytes()),
        Value::Double(n) => Ok(n.to_string().into_bytes()),
        other => Err(CodecError::mismatch(format!("expected a string, got {:?}", other))),
    }
}

pub fn value_to_string(value: &Value) -> Result<String> {
    let bytes = value_to_bytes(value)?;
    String::from_utf8(bytes)
        .map_err(|e| CodecError::mismatch(format!("invalid UTF-8 in reply: {}", e)))
}

pub fn value_to_i64(value: &Value) -> Result<i64> {
    match value {
        Value::Int(n) => Ok(*n),
        other => {
            let s = value_to_string(other)?;
            s.trim()
                .parse::<i64>()
                .map_err(|_| CodecError::mismatch(format!("expected an integer, got {:?}", s)))
        }
    }
}

pub fn value_to_f64(value: &Value) -> Result<f64> {
    match value {
        Value::Double(n) => Ok(*n),
        Value::Int(n) => Ok(*n as f64),
        other => {
            let s = value_to_string(other)?;
            parse_f64(&s)
        }
    }
}

// Accepts the server's infinity spellings alongside plain decimals.
pub(crate) fn parse_f64(s: &str) -> Result<f64> {
    match s.trim() {
        "inf" | "+inf" => Ok(f64::INFINITY),
        "-inf" => Ok(f64::NEG_INFINITY),
        t => t
            .parse::<f64>()
            .map_err(|_| CodecError::mismatch(format!("expected a number, got {:?}", s))),
    }
}
