//! Gesture classification from finger-state vectors.
//!
//! A fixed, priority-ordered chain of predicates maps each finger-state
//! vector to at most one gesture.  The chain order is a contract: several
//! predicates leave the thumb unconstrained, so an ambiguous pose resolves
//! to the first matching entry rather than depending on evaluation order.
//! Classification is pure and stateless; cooldown gating happens in the
//! ledger, never here.

use super::fingers::FingerStates;
use super::landmarks::{LandmarkId, TrackedHand};

// ── Gesture types ──────────────────────────────────────────

/// Recognized control gestures, one per system action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Index raised alone: continuous pointer control.
    MovePointer,
    /// Index and middle raised: continuous scrolling.
    Scroll,
    /// Index, middle, and ring raised; thumb and little down.
    RightClick,
    /// Thumb and little raised alone.
    LeftClick,
    /// Open palm, all five raised.
    OpenSearch,
    /// Little raised alone.
    MinimizeToggle,
    /// Four long fingers raised, thumb down.
    SwitchApps,
    /// Thumb raised alone.
    Screenshot,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MovePointer => "move-pointer",
            Self::Scroll => "scroll",
            Self::RightClick => "right-click",
            Self::LeftClick => "left-click",
            Self::OpenSearch => "open-search",
            Self::MinimizeToggle => "minimize-toggle",
            Self::SwitchApps => "switch-apps",
            Self::Screenshot => "screenshot",
        }
    }

    /// Continuous gestures bypass the cooldown ledger.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MovePointer | Self::Scroll)
    }
}

/// Scroll direction resolved from the two raised fingertips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

// ── Classification ─────────────────────────────────────────

/// Map a finger-state vector to its gesture, or `None` for an
/// unrecognized pose.  First match in the documented priority order
/// wins; the predicates below are checked top to bottom.
pub fn classify(states: FingerStates) -> Option<Gesture> {
    let FingerStates {
        thumb,
        index,
        middle,
        ring,
        little,
    } = states;

    // 1. Pointer: index alone among the long fingers (thumb free).
    if index && !middle && !ring && !little {
        return Some(Gesture::MovePointer);
    }
    // 2. Scroll: index + middle, lower two down (thumb free).
    if index && middle && !ring && !little {
        return Some(Gesture::Scroll);
    }
    // 3. Right click: index + middle + ring, thumb and little down.
    if index && middle && ring && !thumb && !little {
        return Some(Gesture::RightClick);
    }
    // 4. Left click: thumb + little pinned out, long fingers curled.
    if thumb && little && !index && !middle && !ring {
        return Some(Gesture::LeftClick);
    }
    // 5. Open palm.
    if thumb && index && middle && ring && little {
        return Some(Gesture::OpenSearch);
    }
    // 6. Little alone.
    if little && !thumb && !index && !middle && !ring {
        return Some(Gesture::MinimizeToggle);
    }
    // 7. Four long fingers, thumb down.
    if index && middle && ring && little && !thumb {
        return Some(Gesture::SwitchApps);
    }
    // 8. Thumb alone.
    if thumb && !index && !middle && !ring && !little {
        return Some(Gesture::Screenshot);
    }

    None
}

/// Resolve scroll direction for an active Scroll gesture.  Index tip
/// above the middle tip (fingers pointing at the camera) scrolls down;
/// otherwise up.  Pixel y grows downward.
pub fn scroll_direction(hand: &TrackedHand) -> ScrollDirection {
    let index_tip = hand.point(LandmarkId::IndexTip);
    let middle_tip = hand.point(LandmarkId::MiddleTip);
    if index_tip.y < middle_tip.y {
        ScrollDirection::Down
    } else {
        ScrollDirection::Up
    }
}

// ── Tests ──────────────────────────────────────────────────
