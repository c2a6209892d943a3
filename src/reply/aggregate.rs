// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! FT.AGGREGATE / FT.CURSOR READ reply decoding
//!
//! ```text
//! [ total, [k, v, k, v..], [k, v..], .. ]                 plain
//! [ [ total, [k, v..], .. ], cursor_id ]                  WITHCURSOR
//! ```

use std::collections::HashMap;

use redis::Value;

use super::reader::{as_array, parse_f64, value_to_i64, value_to_string, ReplyReader};
use crate::error::{CodecError, Result};

/// One output row of the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, Value>,
}

impl Row {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Empty string when the key is absent.
    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.fields.get(key) {
            None | Some(Value::Nil) => Ok(String::new()),
            Some(v) => value_to_string(v),
        }
    }

    /// Zero when the key is absent.
    pub fn get_long(&self, key: &str) -> Result<i64> {
        match self.fields.get(key) {
            None | Some(Value::Nil) => Ok(0),
            Some(v) => value_to_i64(v),
        }
    }

    /// Zero when the key is absent.
    pub fn get_double(&self, key: &str) -> Result<f64> {
        match self.fields.get(key) {
            None | Some(Value::Nil) => Ok(0.0),
            Some(Value::Double(n)) => Ok(*n),
            Some(Value::Int(n)) => Ok(*n as f64),
            Some(v) => parse_f64(&value_to_string(v)?),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationResult {
    pub total: u64,
    pub rows: Vec<Row>,
    /// Cursor to read the next page from; `None` once the pipeline is drained.
    pub cursor_id: Option<u64>,
}

impl AggregationResult {
    pub fn has_more(&self) -> bool {
        self.cursor_id.is_some()
    }
}

/// Decode an aggregation reply. `with_cursor` must match whether the request
/// asked for a cursor, which wraps the rows and appends a cursor id.
pub fn decode_aggregation(reply: &Value, with_cursor: bool) -> Result<AggregationResult> {
    if !with_cursor {
        return decode_rows(reply);
    }

    let mut reader = ReplyReader::from_value(reply)?;
    let mut result = decode_rows(reader.next()?)?;
    result.cursor_id = match reader.peek() {
        None => None,
        Some(value) => {
            let id = value_to_i64(value)?;
            // The server answers 0 when no further pages exist.
            (id != 0)
                .then(|| u64::try_from(id))
                .transpose()
                .map_err(|_| CodecError::mismatch(format!("negative cursor id {}", id)))?
        }
    };
    Ok(result)
}

fn decode_rows(value: &Value) -> Result<AggregationResult> {
    let mut reader = ReplyReader::from_value(value)?;
    let total = reader.next_int()?;
    let total = u64::try_from(total)
        .map_err(|_| CodecError::mismatch(format!("negative result count {}", total)))?;

    let mut rows = Vec::with_capacity(reader.remaining());
    while !reader.is_empty() {
        rows.push(decode_row(reader.next()?)?);
    }

    Ok(AggregationResult {
        total,
        rows,
        cursor_id: None,
    })
}

fn decode_row(value: &Value) -> Result<Row> {
    let items = as_array(value)?;
    if items.len() % 2 != 0 {
        return Err(CodecError::mismatch(format!(
            "aggregation row has odd length {}",
            items.len()
        )));
    }

    let mut fields = HashMap::with_capacity(items.len() / 2);
    for pair in items.chunks_exact(2) {
        fields.insert(value_to_string(&pair[0])?, pair[1].clone());
    }
    Ok(Row { fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(s: &str) -> Value {
        Value::BulkString(s.as_bytes().to_vec())
    }

    fn row(pairs: &[(&str, &str)]) -> Value {
        Value::Array(pairs.iter().flat_map(|(k, v)| [bulk(k), bulk(v)]).collect())
    }

    #[test]
    fn test_decode_rows() {
        let reply = Value::Array(vec![
            Value::Int(2),
            row(&[("@actor", "mark"), ("cnt", "12")]),
            row(&[("@actor", "dvir"), ("cnt", "7")]),
        ]);
        let result = decode_aggregation(&reply, false).unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].get_string("@actor").unwrap(), "mark");
        assert_eq!(result.rows[1].get_long("cnt").unwrap(), 7);
        assert!(!result.has_more());
    }

    #[test]
    fn test_absent_keys_default() {
        let r = decode_row(&row(&[("a", "1.5")])).unwrap();
        assert_eq!(r.get_double("a").unwrap(), 1.5);
        assert_eq!(r.get_long("missing").unwrap(), 0);
        assert_eq!(r.get_double("missing").unwrap(), 0.0);
        assert_eq!(r.get_string("missing").unwrap(), "");
    }

    #[test]
    fn test_unparsable_number_is_mismatch() {
        let r = decode_row(&row(&[("a", "abc")])).unwrap();
        assert!(matches!(r.get_long("a"), Err(CodecError::ProtocolMismatch(_))));
        assert!(r.get_double("a").is_err());
    }

    #[test]
    fn test_cursor_reply() {
        let reply = Value::Array(vec![
            Value::Array(vec![Value::Int(10), row(&[("n", "1")])]),
            Value::Int(987),
        ]);
        let result = decode_aggregation(&reply, true).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.cursor_id, Some(987));
        assert!(result.has_more());
    }

    #[test]
    fn test_cursor_exhausted() {
        let reply = Value::Array(vec![Value::Array(vec![Value::Int(0)]), Value::Int(0)]);
        let result = decode_aggregation(&reply, true).unwrap();
        assert_eq!(result.cursor_id, None);

        let reply = Value::Array(vec![Value::Array(vec![Value::Int(0)])]);
        assert_eq!(decode_aggregation(&reply, true).unwrap().cursor_id, None);
    }

    #[test]
    fn test_nested_values_kept() {
        let list = Value::Array(vec![bulk("a"), bulk("b")]);
        let reply = Value::Array(vec![Value::Int(1), Value::Array(vec![bulk("tags"), list.clone()])]);
        let result = decode_aggregation(&reply, false).unwrap();
        assert_eq!(result.rows[0].get("tags"), Some(&list));
    }

    #[test]
    fn test_malformed_rows() {
        let odd = Value::Array(vec![Value::Int(1), Value::Array(vec![bulk("k")])]);
        assert!(decode_aggregation(&odd, false).is_err());

        let not_list = Value::Array(vec![Value::Int(1), bulk("k")]);
        assert!(decode_aggregation(&not_list, false).is_err());

        assert!(decode_aggregation(&Value::Array(vec![]), false).is_err());
    }
}
