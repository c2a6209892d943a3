// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for the search client.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The embedding application is responsible for choosing the exporter.
//!
//! # Metric Naming Convention
//! - `redisearch_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `command`: FT.SEARCH, FT.AGGREGATE, ...
//! - `status`: success, error, decode_error

use metrics::{counter, histogram};
use std::time::{Duration, Instant};

/// Record a dispatched command and its outcome
pub fn record_command(command: &str, status: &str) {
    counter!(
        "redisearch_commands_total",
        "command" => command.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record round-trip latency of a command
pub fn record_latency(command: &str, duration: Duration) {
    histogram!(
        "redisearch_command_seconds",
        "command" => command.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record number of documents/rows/suggestions decoded from a reply
pub fn record_results(command: &str, count: usize) {
    histogram!(
        "redisearch_results",
        "command" => command.to_string()
    )
    .record(count as f64);
}

/// Records command latency when dropped.
pub struct LatencyTimer {
    command: &'static str,
    start: Instant,
}

impl LatencyTimer {
    /// Start a new latency timer
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_latency(self.command, self.start.elapsed());
    }
}
