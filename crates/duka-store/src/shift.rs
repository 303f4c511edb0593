//! # Shift Tracker
//!
//! A shift is one cashier's bounded working session. The tracker cycles
//! Closed → Open → Closed indefinitely; each shift instance ends exactly
//! once and is archived, never deleted.
//!
//! The tracker itself only manages the lifecycle. The gating rule (no
//! open shift, no checkout) is enforced where the sale is finalized, in
//! [`crate::store::PosStore::complete_sale`].

use chrono::Utc;
use duka_core::{Cashier, Shift};
use tracing::{debug, info};
use uuid::Uuid;

/// Current shift plus archived history (newest first).
#[derive(Debug, Clone, Default)]
pub struct ShiftTracker {
    current: Option<Shift>,
    history: Vec<Shift>,
}

impl ShiftTracker {
    pub fn new() -> Self {
        ShiftTracker::default()
    }

    /// Rebuilds the tracker from persisted state. A current shift survives
    /// an app reload so the cashier does not have to clock in again.
    pub fn restore(current: Option<Shift>, history: Vec<Shift>) -> Self {
        ShiftTracker { current, history }
    }

    /// Opens a shift for the given cashier. No-op (returns false) if a
    /// shift is already open; at most one shift exists at a time.
    pub fn start(&mut self, cashier: &Cashier) -> bool {
        if self.current.is_some() {
            debug!("start_shift ignored: a shift is already open");
            return false;
        }

        let shift = Shift {
            id: Uuid::new_v4().to_string(),
            cashier_id: cashier.id.clone(),
            cashier_name: cashier.name.clone(),
            start_time: Utc::now(),
            end_time: None,
        };

        info!(shift_id = %shift.id, cashier = %shift.cashier_name, "Shift started");
        self.current = Some(shift);
        true
    }

    /// Ends the open shift: stamps the end time, prepends the record to
    /// history, clears the active pointer. No-op (returns None) when no
    /// shift is open.
    pub fn end(&mut self) -> Option<Shift> {
        let mut shift = self.current.take()?;
        shift.end_time = Some(Utc::now());

        info!(shift_id = %shift.id, cashier = %shift.cashier_name, "Shift ended");
        self.history.insert(0, shift.clone());
        Some(shift)
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Shift> {
        self.current.as_ref()
    }

    /// Archived shifts, newest first.
    pub fn history(&self) -> &[Shift] {
        &self.history
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use duka_core::CashierRole;

    fn cashier() -> Cashier {
        Cashier {
            id: "cashier-001".to_string(),
            name: "Rosemary".to_string(),
            role: CashierRole::Cashier,
        }
    }

    #[test]
    fn test_start_and_end_cycle() {
        let mut tracker = ShiftTracker::new();
        assert!(!tracker.is_open());

        assert!(tracker.start(&cashier()));
        assert!(tracker.is_open());

        let ended = tracker.end().expect("open shift");
        assert!(ended.end_time.is_some());
        assert!(!tracker.is_open());
        assert_eq!(tracker.history().len(), 1);

        // The tracker cycles: a new shift can open.
        assert!(tracker.start(&cashier()));
    }

    #[test]
    fn test_double_start_is_noop() {
        let mut tracker = ShiftTracker::new();
        assert!(tracker.start(&cashier()));

        let first_id = tracker.current().unwrap().id.clone();
        assert!(!tracker.start(&cashier()));
        assert_eq!(tracker.current().unwrap().id, first_id);
    }

    #[test]
    fn test_end_without_open_shift_is_noop() {
        let mut tracker = ShiftTracker::new();
        assert!(tracker.end().is_none());
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn test_history_newest_first() {
        let mut tracker = ShiftTracker::new();

        tracker.start(&cashier());
        let first = tracker.end().unwrap();
        tracker.start(&cashier());
        let second = tracker.end().unwrap();

        assert_eq!(tracker.history()[0].id, second.id);
        assert_eq!(tracker.history()[1].id, first.id);
    }
}
