//! Cooldown ledger — per-gesture re-fire gating.
//!
//! Each time-sensitive gesture carries a fixed minimum interval between
//! firings; a held pose therefore fires once per window instead of once
//! per frame.  The clock is injected: callers pass the current offset
//! from session start, which keeps tests free of real delays.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use super::gesture::Gesture;

/// Minimum re-fire interval for a gesture, or `None` for the continuous
/// gestures that bypass the ledger entirely.
pub fn threshold(gesture: Gesture) -> Option<Duration> {
    match gesture {
        Gesture::MovePointer | Gesture::Scroll => None,
        Gesture::RightClick => Some(Duration::from_secs(3)),
        Gesture::LeftClick => Some(Duration::from_secs(3)),
        Gesture::OpenSearch => Some(Duration::from_secs(4)),
        Gesture::MinimizeToggle => Some(Duration::from_secs(5)),
        Gesture::SwitchApps => Some(Duration::from_secs(1)),
        Gesture::Screenshot => Some(Duration::from_secs(8)),
    }
}

/// Last-fired bookkeeping for all time-sensitive gestures.
///
/// Starts empty, so every gesture may fire immediately on first sight.
#[derive(Debug, Default)]
pub struct CooldownLedger {
    last_fired: HashMap<Gesture, Duration>,
}

impl CooldownLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to fire `gesture` at instant `now` (offset from session
    /// start).  Returns true and records `now` iff the gesture is
    /// continuous or its threshold has elapsed since the last firing;
    /// otherwise returns false and leaves the ledger unchanged.
    pub fn try_fire(&mut self, gesture: Gesture, now: Duration) -> bool {
        let Some(threshold) = threshold(gesture) else {
            return true;
        };

        if let Some(last) = self.last_fired.get(&gesture) {
            if now.saturating_sub(*last) <= threshold {
                return false;
            }
        }

        debug!("gesture fired: {} at {:?}", gesture.as_str(), now);
        self.last_fired.insert(gesture, now);
        true
    }

    /// Last instant a gesture fired, if it has fired at all.
    pub fn last_fired(&self, gesture: Gesture) -> Option<Duration> {
        self.last_fired.get(&gesture).copied()
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_first_fire_is_immediate() {
        let mut ledger = CooldownLedger::new();
        assert!(ledger.try_fire(Gesture::Screenshot, secs(0)));
        assert_eq!(ledger.last_fired(Gesture::Screenshot), Some(secs(0)));
    }

    #[test]
    fn test_refire_within_threshold_suppressed() {
        let mut ledger = CooldownLedger::new();
        assert!(ledger.try_fire(Gesture::RightClick, secs(0)));
        assert!(!ledger.try_fire(Gesture::RightClick, secs(2)));
        // Suppressed firing leaves the ledger unchanged.
        assert_eq!(ledger.last_fired(Gesture::RightClick), Some(secs(0)));
    }

    #[test]
    fn test_refire_after_threshold_allowed() {
        let mut ledger = CooldownLedger::new();
        assert!(ledger.try_fire(Gesture::RightClick, secs(0)));
        assert!(ledger.try_fire(Gesture::RightClick, secs(4)));
        assert_eq!(ledger.last_fired(Gesture::RightClick), Some(secs(4)));
    }

    #[test]
    fn test_boundary_is_strict() {
        // Exactly at the threshold the gesture is still suppressed.
        let mut ledger = CooldownLedger::new();
        assert!(ledger.try_fire(Gesture::SwitchApps, secs(0)));
        assert!(!ledger.try_fire(Gesture::SwitchApps, secs(1)));
        assert!(ledger.try_fire(Gesture::SwitchApps, Duration::from_millis(1001)));
    }

    #[test]
    fn test_continuous_gestures_bypass_ledger() {
        let mut ledger = CooldownLedger::new();
        for frame in 0..5 {
            assert!(ledger.try_fire(Gesture::MovePointer, Duration::from_millis(frame * 16)));
            assert!(ledger.try_fire(Gesture::Scroll, Duration::from_millis(frame * 16)));
        }
        assert_eq!(ledger.last_fired(Gesture::MovePointer), None);
        assert_eq!(ledger.last_fired(Gesture::Scroll), None);
    }

    #[test]
    fn test_gestures_are_tracked_independently() {
        let mut ledger = CooldownLedger::new();
        assert!(ledger.try_fire(Gesture::LeftClick, secs(0)));
        // A different gesture is not blocked by the left-click window.
        assert!(ledger.try_fire(Gesture::OpenSearch, secs(1)));
        assert!(!ledger.try_fire(Gesture::LeftClick, secs(1)));
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(threshold(Gesture::RightClick), Some(secs(3)));
        assert_eq!(threshold(Gesture::LeftClick), Some(secs(3)));
        assert_eq!(threshold(Gesture::OpenSearch), Some(secs(4)));
        assert_eq!(threshold(Gesture::MinimizeToggle), Some(secs(5)));
        assert_eq!(threshold(Gesture::SwitchApps), Some(secs(1)));
        assert_eq!(threshold(Gesture::Screenshot), Some(secs(8)));
        assert_eq!(threshold(Gesture::MovePointer), None);
        assert_eq!(threshold(Gesture::Scroll), None);
    }
}
