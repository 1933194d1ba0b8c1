//! Finger-state classification — raised/curled flags per finger.
//!
//! The four long fingers count as raised when the fingertip sits above
//! its pip joint in the camera projection (smaller y).  The thumb moves
//! laterally, so it is compared on x against its ip joint instead; the
//! comparison assumes the mirrored frame the provider emits.

use super::landmarks::{Finger, TrackedHand};

/// Boolean raised/curled flags for all five fingers of one hand.
/// Derived fresh each frame; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub little: bool,
}

impl FingerStates {
    /// Classify every finger of a hand.
    pub fn of(hand: &TrackedHand) -> Self {
        Self {
            thumb: raised(hand, Finger::Thumb),
            index: raised(hand, Finger::Index),
            middle: raised(hand, Finger::Middle),
            ring: raised(hand, Finger::Ring),
            little: raised(hand, Finger::Little),
        }
    }

    /// Number of raised fingers.
    pub fn raised_count(&self) -> usize {
        [self.thumb, self.index, self.middle, self.ring, self.little]
            .iter()
            .filter(|f| **f)
            .count()
    }
}

/// Whether a single finger is raised.
fn raised(hand: &TrackedHand, finger: Finger) -> bool {
    let tip = hand.point(finger.tip());
    let reference = hand.point(finger.reference());
    match finger {
        Finger::Thumb => tip.x < reference.x,
        _ => tip.y < reference.y,
    }
}

// ── Tests ──────────────────────────────────────────────────
