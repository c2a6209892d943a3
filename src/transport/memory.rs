// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use redis::Value;

use super::Transport;
use crate::args::Args;
use crate::error::{CodecError, Result};

/// A command as seen by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentCommand {
    pub command: String,
    pub args: Vec<String>,
}

impl SentCommand {
    /// Command and arguments joined with spaces, as typed in redis-cli.
    pub fn line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

/// Transport that answers from a queue of canned replies.
///
/// Replies and errors are consumed in order. Running out of replies is a
/// protocol mismatch, so a test that sends more commands than it scripted
/// fails loudly.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<Value>>>,
    sent: Mutex<Vec<SentCommand>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reply for the next command
    pub fn push_reply(&self, reply: Value) -> &Self {
        self.replies.lock().push_back(Ok(reply));
        self
    }

    /// Fail the next command with a connection-level error
    pub fn push_error(&self, error: redis::RedisError) -> &Self {
        self.replies
            .lock()
            .push_back(Err(CodecError::Transport(error)));
        self
    }

    /// Everything sent so far
    pub fn sent(&self) -> Vec<SentCommand> {
        self.sent.lock().clone()
    }

    /// Most recent command, if any
    pub fn last(&self) -> Option<SentCommand> {
        self.sent.lock().last().cloned()
    }

    /// Replies not yet consumed
    pub fn pending(&self) -> usize {
        self.replies.lock().len()
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, command: &str, args: &Args) -> Result<Value> {
        self.sent.lock().push(SentCommand {
            command: command.to_string(),
            args: args.to_strings(),
        });
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(CodecError::mismatch(format!("no scripted reply for {command}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order() {
        let transport = ScriptedTransport::new();
        transport.push_reply(Value::Int(1)).push_reply(Value::Okay);

        let mut args = Args::new();
        args.push("idx");
        assert_eq!(transport.execute("FT.INFO", &args).await.unwrap(), Value::Int(1));
        assert_eq!(transport.execute("FT.DROPINDEX", &args).await.unwrap(), Value::Okay);
        assert_eq!(transport.pending(), 0);
        assert_eq!(transport.sent().len(), 2);
        assert_eq!(transport.last().unwrap().line(), "FT.DROPINDEX idx");
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let transport = ScriptedTransport::new();
        transport
            .push_error(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "connection reset",
            )))
            .push_reply(Value::Okay);

        let err = transport.execute("FT.INFO", &Args::new()).await.unwrap_err();
        assert!(matches!(err, CodecError::Transport(_)));
        assert_eq!(transport.execute("FT.INFO", &Args::new()).await.unwrap(), Value::Okay);
    }

    #[tokio::test]
    async fn test_exhausted_script_is_an_error() {
        let transport = ScriptedTransport::new();
        let err = transport.execute("FT.SUGLEN", &Args::new()).await.unwrap_err();
        assert!(matches!(err, CodecError::ProtocolMismatch(_)));
        assert_eq!(transport.last().unwrap().line(), "FT.SUGLEN");
    }
}
