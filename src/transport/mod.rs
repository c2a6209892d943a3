// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Command transports.
//!
//! The codec never talks to the network itself: [`Client`](crate::Client)
//! hands a command name and its [`Args`] to a [`Transport`] and decodes
//! whatever comes back.
//!
//! - [`ConnectionManager`](redis::aio::ConnectionManager): the real thing
//! - [`ScriptedTransport`]: canned replies, records every command sent

mod connection;
mod memory;

use async_trait::async_trait;

use crate::args::Args;
use crate::error::Result;

pub use memory::{ScriptedTransport, SentCommand};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `command` followed by `args` and return the raw reply.
    async fn execute(&self, command: &str, args: &Args) -> Result<redis::Value>;
}
