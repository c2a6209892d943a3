// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Error types shared by the builders, the codec and the client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// Rejected while building a request, before anything is serialized.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The reply does not have the shape the request implies.
    #[error("Protocol mismatch: {0}")]
    ProtocolMismatch(String),
    /// Error raised by the underlying connection, passed through untouched.
    #[error("Transport error: {0}")]
    Transport(#[from] redis::RedisError),
}

impl CodecError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CodecError::InvalidArgument(message.into())
    }

    pub(crate) fn mismatch(message: impl Into<String>) -> Self {
        CodecError::ProtocolMismatch(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
