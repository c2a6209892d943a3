// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{cmd, Value};

use super::Transport;
use crate::args::Args;
use crate::error::Result;

#[async_trait]
impl Transport for ConnectionManager {
    async fn execute(&self, command: &str, args: &Args) -> Result<Value> {
        // ConnectionManager is a cheap handle; clone to get a mutable one.
        let mut conn = self.clone();
        let mut request = cmd(command);
        request.arg(args);
        let reply: Value = request.query_async(&mut conn).await?;
        Ok(reply)
    }
}
