//! # Bridge State
//!
//! Diagnostic counters for bridged calls.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::BridgeError;

/// Counter container, shared by all calling threads
#[derive(Debug, Default)]
pub struct BridgeStats {
    /// Dispatches attempted
    dispatched: AtomicU64,

    /// Calls that reached the managed target
    delivered: AtomicU64,

    /// Dispatches with no target set
    not_initialized: AtomicU64,

    /// Dispatches whose thread could not be attached
    attach_failed: AtomicU64,

    /// Dispatches whose method could not be resolved
    resolution_failed: AtomicU64,

    /// Thread attachments performed (each one was detached again)
    attachments: AtomicU64,
}

/// Point-in-time copy of [`BridgeStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub dispatched: u64,
    pub delivered: u64,
    pub not_initialized: u64,
    pub attach_failed: u64,
    pub resolution_failed: u64,
    pub attachments: u64,
}

impl StatsSnapshot {
    /// Sum of all failure counters
    pub fn failures(&self) -> u64 {
        self.not_initialized + self.attach_failed + self.resolution_failed
    }
}

impl BridgeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dispatch(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_attachment(&self) {
        self.attachments.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a failed dispatch under its error kind
    pub fn record_failure(&self, error: &BridgeError) {
        let counter = match error {
            BridgeError::NotInitialized => &self.not_initialized,
            BridgeError::ThreadAttachFailed(_) => &self.attach_failed,
            BridgeError::MethodResolutionFailed { .. } => &self.resolution_failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            not_initialized: self.not_initialized.load(Ordering::Relaxed),
            attach_failed: self.attach_failed.load(Ordering::Relaxed),
            resolution_failed: self.resolution_failed.load(Ordering::Relaxed),
            attachments: self.attachments.load(Ordering::Relaxed),
        }
    }
}
