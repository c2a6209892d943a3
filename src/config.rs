// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Configuration for the search client.
//!
//! # Example
//!
//! ```
//! use redisearch_codec::ClientConfig;
//!
//! // Minimal config (uses defaults)
//! let config = ClientConfig::default();
//! assert_eq!(config.index_name, "idx");
//! assert!(config.decode_content);
//!
//! // Full config
//! let config = ClientConfig {
//!     redis_url: "redis://search.internal:6379".into(),
//!     index_name: "idx:products".into(),
//!     decode_content: false,
//!     ..Default::default()
//! };
//! ```

use serde::Deserialize;

/// Configuration for [`Client`](crate::Client).
///
/// All fields have defaults, so a config can be deserialized from a partial
/// document.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Redis connection string (e.g., "redis://localhost:6379")
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Index every command targets
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Decode document field values to UTF-8 text when possible
    #[serde(default = "default_decode_content")]
    pub decode_content: bool,

    /// Rows per FT.CURSOR READ (0 = the cursor's own COUNT)
    #[serde(default)]
    pub cursor_read_count: u32,
}

fn default_redis_url() -> String { "redis://127.0.0.1:6379".to_string() }
fn default_index_name() -> String { "idx".to_string() }
fn default_decode_content() -> bool { true }

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            redis_url: default_redis_url(),
            index_name: default_index_name(),
            decode_content: default_decode_content(),
            cursor_read_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"index_name": "idx:users"}"#).unwrap();
        assert_eq!(config.index_name, "idx:users");
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert!(config.decode_content);
        assert_eq!(config.cursor_read_count, 0);
    }
}
