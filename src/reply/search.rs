// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! FT.SEARCH reply decoding
//!
//! ```text
//! [ total,
//!   id, [score], [payload], [[field, value, ...]],   <- one record (stride)
//!   id, [score], [payload], [[field, value, ...]],
//!   ... ]
//! ```
//!
//! Which bracketed elements are present depends on the request flags, see
//! [`SearchReplyShape`].

use std::collections::HashMap;

use redis::Value;

use super::reader::{as_array, value_to_bytes, value_to_string, ReplyReader};
use crate::error::{CodecError, Result};

/// Reply layout implied by the request flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReplyShape {
    pub has_content: bool,
    pub has_scores: bool,
    pub has_payloads: bool,
}

impl SearchReplyShape {
    // Payloads are only laid out alongside content.
    fn payload_in_record(&self) -> bool {
        self.has_content && self.has_payloads
    }

    /// Elements per document record.
    pub fn stride(&self) -> usize {
        1 + usize::from(self.has_scores)
            + usize::from(self.has_content)
            + usize::from(self.payload_in_record())
    }

    pub fn score_offset(&self) -> Option<usize> {
        self.has_scores.then_some(1)
    }

    pub fn payload_offset(&self) -> Option<usize> {
        self.payload_in_record()
            .then(|| self.score_offset().unwrap_or(0) + 1)
    }

    pub fn content_offset(&self) -> Option<usize> {
        self.has_content.then(|| {
            1 + usize::from(self.has_scores) + usize::from(self.payload_in_record())
        })
    }
}

/// Stored field value, decoded to text on request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Bytes(b) => std::str::from_utf8(b).ok(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FieldValue::Text(s) => s.as_bytes(),
            FieldValue::Bytes(b) => b,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    /// 1.0 unless scores were requested
    pub score: f64,
    pub payload: Option<Vec<u8>>,
    pub properties: HashMap<String, FieldValue>,
}

impl Document {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.properties.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub total: u64,
    pub documents: Vec<Document>,
}

/// Decode an FT.SEARCH reply.
///
/// `decode` turns field values into text where they are valid UTF-8;
/// otherwise values stay raw bytes.
pub fn decode_search(reply: &Value, shape: SearchReplyShape, decode: bool) -> Result<SearchResult> {
    let mut reader = ReplyReader::from_value(reply)?;
    let total = reader.next_int()?;
    let total = u64::try_from(total)
        .map_err(|_| CodecError::mismatch(format!("negative result count {}", total)))?;

    let count = reader.expect_stride(shape.stride())?;
    let mut documents = Vec::with_capacity(count);

    for _ in 0..count {
        let id = reader.next_string()?;
        let score = if shape.has_scores { reader.next_f64()? } else { 1.0 };
        let payload = if shape.payload_in_record() {
            match reader.next()? {
                Value::Nil => None,
                other => Some(value_to_bytes(other)?),
            }
        } else {
            None
        };
        let properties = if shape.has_content {
            decode_fields(reader.next()?, decode)?
        } else {
            HashMap::new()
        };

        documents.push(Document {
            id,
            score,
            payload,
            properties,
        });
    }

    Ok(SearchResult { total, documents })
}

fn decode_fields(value: &Value, decode: bool) -> Result<HashMap<String, FieldValue>> {
    // Missing documents come back with a nil field list.
    if matches!(value, Value::Nil) {
        return Ok(HashMap::new());
    }

    let items = as_array(value)?;
    if items.len() % 2 != 0 {
        return Err(CodecError::mismatch(format!(
            "document field list has odd length {}",
            items.len()
        )));
    }

    let mut fields = HashMap::with_capacity(items.len() / 2);
    for pair in items.chunks_exact(2) {
        let name = value_to_string(&pair[0])?;
        let raw = match &pair[1] {
            Value::Nil => Vec::new(),
            other => value_to_bytes(other)?,
        };
        let value = if decode {
            match String::from_utf8(raw) {
                Ok(text) => FieldValue::Text(text),
                Err(e) => FieldValue::Bytes(e.into_bytes()),
            }
        } else {
            FieldValue::Bytes(raw)
        };
        fields.insert(name, value);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(s: &str) -> Value {
        Value::BulkString(s.as_bytes().to_vec())
    }

    fn fields(pairs: &[(&str, &str)]) -> Value {
        Value::Array(
            pairs
                .iter()
                .flat_map(|(k, v)| [bulk(k), bulk(v)])
                .collect(),
        )
    }

    fn shape(has_content: bool, has_scores: bool, has_payloads: bool) -> SearchReplyShape {
        SearchReplyShape {
            has_content,
            has_scores,
            has_payloads,
        }
    }

    #[test]
    fn test_stride_and_offsets() {
        let s = shape(true, true, false);
        assert_eq!(s.stride(), 3);
        assert_eq!(s.score_offset(), Some(1));
        assert_eq!(s.payload_offset(), None);
        assert_eq!(s.content_offset(), Some(2));

        let s = shape(true, true, true);
        assert_eq!(s.stride(), 4);
        assert_eq!(s.payload_offset(), Some(2));
        assert_eq!(s.content_offset(), Some(3));

        let s = shape(true, false, true);
        assert_eq!(s.stride(), 3);
        assert_eq!(s.payload_offset(), Some(1));
        assert_eq!(s.content_offset(), Some(2));

        let s = shape(false, false, true);
        assert_eq!(s.stride(), 1);
        assert_eq!(s.payload_offset(), None);
        assert_eq!(s.content_offset(), None);

        let s = shape(false, true, false);
        assert_eq!(s.stride(), 2);
    }

    #[test]
    fn test_decode_with_content() {
        let reply = Value::Array(vec![
            Value::Int(2),
            bulk("doc1"),
            fields(&[("name", "mark")]),
            bulk("doc2"),
            fields(&[("name", "dvir"), ("age", "30")]),
        ]);
        let result = decode_search(&reply, shape(true, false, false), true).unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.documents.len(), 2);
        assert_eq!(result.documents[0].id, "doc1");
        assert_eq!(result.documents[0].score, 1.0);
        assert_eq!(result.documents[0].payload, None);
        assert_eq!(result.documents[1].get_str("age"), Some("30"));
    }

    #[test]
    fn test_decode_scores_and_payloads() {
        let reply = Value::Array(vec![
            Value::Int(1),
            bulk("doc1"),
            bulk("0.75"),
            bulk("meta"),
            fields(&[("title", "hello")]),
        ]);
        let result = decode_search(&reply, shape(true, true, true), true).unwrap();
        let doc = &result.documents[0];
        assert_eq!(doc.score, 0.75);
        assert_eq!(doc.payload.as_deref(), Some(&b"meta"[..]));
        assert_eq!(doc.get("title"), Some(&FieldValue::Text("hello".into())));
    }

    #[test]
    fn test_decode_nil_payload_and_content() {
        let reply = Value::Array(vec![Value::Int(1), bulk("gone"), Value::Nil, Value::Nil]);
        let result = decode_search(&reply, shape(true, false, true), true).unwrap();
        let doc = &result.documents[0];
        assert_eq!(doc.payload, None);
        assert!(doc.properties.is_empty());
    }

    #[test]
    fn test_decode_no_content() {
        let reply = Value::Array(vec![Value::Int(3), bulk("a"), bulk("b"), bulk("c")]);
        let result = decode_search(&reply, shape(false, false, false), true).unwrap();
        let ids: Vec<_> = result.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_raw_bytes_kept_without_decode() {
        let reply = Value::Array(vec![
            Value::Int(1),
            bulk("doc"),
            Value::Array(vec![bulk("blob"), Value::BulkString(vec![0xff, 0xfe])]),
        ]);
        let result = decode_search(&reply, shape(true, false, false), false).unwrap();
        assert_eq!(
            result.documents[0].get("blob"),
            Some(&FieldValue::Bytes(vec![0xff, 0xfe]))
        );

        let result = decode_search(&reply, shape(true, false, false), true).unwrap();
        assert_eq!(
            result.documents[0].get("blob"),
            Some(&FieldValue::Bytes(vec![0xff, 0xfe]))
        );
    }

    #[test]
    fn test_short_reply_is_mismatch() {
        let reply = Value::Array(vec![Value::Int(1), bulk("doc1"), bulk("1.0")]);
        let err = decode_search(&reply, shape(true, true, false), true).unwrap_err();
        assert!(matches!(err, CodecError::ProtocolMismatch(_)));
    }

    #[test]
    fn test_empty_reply_is_mismatch() {
        let err = decode_search(&Value::Array(vec![]), shape(true, false, false), true).unwrap_err();
        assert!(matches!(err, CodecError::ProtocolMismatch(_)));
        assert!(decode_search(&bulk("OK"), shape(true, false, false), true).is_err());
    }

    #[test]
    fn test_zero_results() {
        let result =
            decode_search(&Value::Array(vec![Value::Int(0)]), shape(true, true, true), true).unwrap();
        assert_eq!(result.total, 0);
        assert!(result.documents.is_empty());
    }

    #[test]
    fn test_odd_field_list_rejected() {
        let reply = Value::Array(vec![
            Value::Int(1),
            bulk("doc"),
            Value::Array(vec![bulk("lonely")]),
        ]);
        assert!(decode_search(&reply, shape(true, false, false), true).is_err());
    }
}
