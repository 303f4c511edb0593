//! Locally-minted identifiers.
//!
//! Sales and cart tabs carry time-derived ids (`sale-<epoch-ms>-<seq>`),
//! readable in logs and receipts and unique within a session even when two
//! are minted in the same millisecond. Records that never leave the device
//! unlabelled (shifts, notifications, suppliers) use UUID v4 instead.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Session-wide sequence to break same-millisecond ties.
static SEQ: AtomicU64 = AtomicU64::new(0);

/// Mints a time-derived id with the given prefix.
pub(crate) fn time_derived(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{:04}", prefix, millis, seq)
}
