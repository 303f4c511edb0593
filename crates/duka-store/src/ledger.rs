//! # Sales Ledger
//!
//! Local sale history plus the sync-queue bookkeeping for sales finalized
//! offline.
//!
//! ## Pending-Sync Accounting
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  complete_sale while ONLINE:  sale.synced = true,  pending unchanged    │
//! │  complete_sale while OFFLINE: sale.synced = false, pending += 1         │
//! │                                                                         │
//! │  on reconnect (store calls reconcile()):                                │
//! │    every unsynced sale flips to synced, pending resets to 0,           │
//! │    the count of flipped sales is reported back for ONE notification    │
//! │                                                                         │
//! │  NOTE: reconcile() is bookkeeping only. Transmission happened (or      │
//! │  failed) fire-and-forget at finalize time; this pass does NOT resend.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use duka_core::{Money, Sale};
use tracing::{info, warn};

/// Sale history (newest first) and the pending-sync counter.
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    sales: Vec<Sale>,
    pending_syncs: u32,
}

impl SalesLedger {
    pub fn new() -> Self {
        SalesLedger::default()
    }

    pub fn restore(sales: Vec<Sale>, pending_syncs: u32) -> Self {
        SalesLedger {
            sales,
            pending_syncs,
        }
    }

    /// Records a finalized sale, newest first. A sale finalized offline
    /// bumps the pending-sync counter.
    pub fn record(&mut self, sale: Sale) {
        if !sale.synced {
            self.pending_syncs += 1;
            warn!(sale_id = %sale.id, pending = self.pending_syncs, "Sale recorded offline");
        }
        self.sales.insert(0, sale);
    }

    /// Flips every unsynced sale to synced and zeroes the counter.
    /// Returns how many sales were flipped.
    pub fn reconcile(&mut self) -> usize {
        let mut flipped = 0;
        for sale in self.sales.iter_mut().filter(|s| !s.synced) {
            sale.synced = true;
            flipped += 1;
        }
        self.pending_syncs = 0;

        if flipped > 0 {
            info!(count = flipped, "Marked offline sales as synced");
        }
        flipped
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// All sales, newest first. Retained indefinitely.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn pending_syncs(&self) -> u32 {
        self.pending_syncs
    }

    /// Sales whose timestamp falls on the current UTC day.
    pub fn today_sales(&self) -> Vec<&Sale> {
        let today = Utc::now().date_naive();
        self.sales
            .iter()
            .filter(|s| s.timestamp.date_naive() == today)
            .collect()
    }
}

/// Sums sale totals for reporting views.
pub fn sales_total<'a, I>(sales: I) -> Money
where
    I: IntoIterator<Item = &'a Sale>,
{
    sales.into_iter().map(|s| s.total).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
