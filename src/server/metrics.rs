// src/server/metrics.rs
//! Server metrics tracking
//!
//! Simple atomic counters for request/response statistics, exposed via the
//! `/metrics` endpoint.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Server metrics collector
#[derive(Default)]
pub struct ServerMetrics {
    /// Total requests
    requests_total: AtomicU64,
    /// Names normalized successfully
    names_parsed: AtomicU64,
    /// Names that normalized to nothing
    parse_rejects: AtomicU64,
    /// Entries admitted to the cookbook
    entries_admitted: AtomicU64,
    /// Entries refused at admission
    entry_rejects: AtomicU64,
    /// Summaries resolved
    summaries_served: AtomicU64,
    /// Summary requests that failed resolution
    summary_rejects: AtomicU64,
    /// Server start time
    start_time: std::sync::OnceLock<Instant>,
}

impl ServerMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        let metrics = Self::default();
        let _ = metrics.start_time.set(Instant::now());
        metrics
    }

    /// Record a successful name parse
    pub fn record_parse(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.names_parsed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected name parse
    pub fn record_parse_reject(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.parse_rejects.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an admitted entry
    pub fn record_admit(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.entries_admitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected entry
    pub fn record_entry_reject(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.entry_rejects.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a served summary
    pub fn record_summary(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.summaries_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed summary
    pub fn record_summary_reject(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.summary_rejects.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request that touches no counter of its own (lookups)
    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self, entries: usize) -> MetricsSnapshot {
        let uptime = self
            .start_time
            .get()
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO);

        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            names_parsed: self.names_parsed.load(Ordering::Relaxed),
            parse_rejects: self.parse_rejects.load(Ordering::Relaxed),
            entries_admitted: self.entries_admitted.load(Ordering::Relaxed),
            entry_rejects: self.entry_rejects.load(Ordering::Relaxed),
            summaries_served: self.summaries_served.load(Ordering::Relaxed),
            summary_rejects: self.summary_rejects.load(Ordering::Relaxed),
            entries,
            uptime_secs: uptime.as_secs(),
        }
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Total requests processed
    pub requests_total: u64,
    pub names_parsed: u64,
    pub parse_rejects: u64,
    pub entries_admitted: u64,
    pub entry_rejects: u64,
    pub summaries_served: u64,
    pub summary_rejects: u64,
    /// Entries currently in the cookbook
    pub entries: usize,
    /// Server uptime in seconds
    pub uptime_secs: u64,
}
