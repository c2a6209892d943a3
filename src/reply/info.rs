// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Key/value replies (FT.INFO, FT.CONFIG GET).

use std::collections::HashMap;

use redis::Value;

use super::reader::{value_to_string, ReplyReader};
use crate::error::Result;

/// Decode a flat `[k, v, k, v..]` list, or a RESP3 map, into a lookup table.
pub fn decode_info(reply: &Value) -> Result<HashMap<String, Value>> {
    if let Value::Map(pairs) = reply {
        return pairs
            .iter()
            .map(|(k, v)| Ok((value_to_string(k)?, v.clone())))
            .collect();
    }

    let mut reader = ReplyReader::from_value(reply)?;
    let count = reader.expect_stride(2)?;
    let mut info = HashMap::with_capacity(count);
    for _ in 0..count {
        let key = reader.next_string()?;
        info.insert(key, reader.next()?.clone());
    }
    Ok(info)
}

/// Decode FT.CONFIG GET output: a list of `[name, value]` pairs.
pub fn decode_config(reply: &Value) -> Result<HashMap<String, Option<String>>> {
    let mut reader = ReplyReader::from_value(reply)?;
    let mut config = HashMap::with_capacity(reader.remaining());
    while !reader.is_empty() {
        let mut pair = ReplyReader::new(reader.next_array()?);
        let name = pair.next_string()?;
        let value = match pair.next()? {
            Value::Nil => None,
            other => Some(value_to_string(other)?),
        };
        config.insert(name, value);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(s: &str) -> Value {
        Value::BulkString(s.as_bytes().to_vec())
    }

    #[test]
    fn test_decode_info() {
        let reply = Value::Array(vec![
            bulk("index_name"),
            bulk("idx"),
            bulk("num_docs"),
            bulk("42"),
        ]);
        let info = decode_info(&reply).unwrap();
        assert_eq!(info.get("index_name"), Some(&bulk("idx")));
        assert_eq!(info.len(), 2);
    }

    #[test]
    fn test_decode_info_resp3_map() {
        let reply = Value::Map(vec![(bulk("num_docs"), Value::Int(3))]);
        let info = decode_info(&reply).unwrap();
        assert_eq!(info.get("num_docs"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_decode_info_odd_length() {
        let reply = Value::Array(vec![bulk("index_name")]);
        assert!(decode_info(&reply).is_err());
    }

    #[test]
    fn test_decode_config() {
        let reply = Value::Array(vec![
            Value::Array(vec![bulk("TIMEOUT"), bulk("500")]),
            Value::Array(vec![bulk("EXTLOAD"), Value::Nil]),
        ]);
        let config = decode_config(&reply).unwrap();
        assert_eq!(config.get("TIMEOUT"), Some(&Some("500".to_string())));
        assert_eq!(config.get("EXTLOAD"), Some(&None));
    }
}
