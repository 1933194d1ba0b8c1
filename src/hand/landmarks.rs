//! Hand landmark data structures shared by the classifiers.
//!
//! Models the 21 landmarks per hand emitted by the pose-estimation
//! provider (MediaPipe hand-landmark numbering: 0 = wrist, 4 = thumb tip,
//! 8 = index tip, 20 = little tip).  Positions are pixel coordinates
//! within the provider's camera frame and live for one frame only.

// ── Landmark definitions ───────────────────────────────────

/// The 21 hand landmarks in provider order.  Only a handful are read by
/// the classifiers; the rest exist to keep indices honest.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkId {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    LittleMcp,
    LittlePip,
    LittleDip,
    LittleTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl LandmarkId {
    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

// ── Fingers ────────────────────────────────────────────────

/// The five fingers, used to index finger-state vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    /// The fingertip landmark for this finger.
    pub fn tip(&self) -> LandmarkId {
        match self {
            Self::Thumb => LandmarkId::ThumbTip,
            Self::Index => LandmarkId::IndexTip,
            Self::Middle => LandmarkId::MiddleTip,
            Self::Ring => LandmarkId::RingTip,
            Self::Little => LandmarkId::LittleTip,
        }
    }

    /// The reference joint the tip is compared against when deciding
    /// raised/curled: the pip joint (two below the tip) for the four
    /// long fingers, the ip joint for the thumb.
    pub fn reference(&self) -> LandmarkId {
        match self {
            Self::Thumb => LandmarkId::ThumbIp,
            Self::Index => LandmarkId::IndexPip,
            Self::Middle => LandmarkId::MiddlePip,
            Self::Ring => LandmarkId::RingPip,
            Self::Little => LandmarkId::LittlePip,
        }
    }
}

// ── Handedness ─────────────────────────────────────────────

/// Which hand the provider classified a detection as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parse the provider's handedness label.  Anything other than the
    /// two known labels means the hand is ignored for the frame.
    pub fn parse(s: &str) -> Option<Handedness> {
        match s {
            "Left" => Some(Self::Left),
            "Right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

// ── Per-frame hand data ────────────────────────────────────

/// A landmark position in camera-frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One detected hand for the current frame: handedness plus all 21
/// landmark positions.  Discarded when the frame is done.
#[derive(Debug, Clone)]
pub struct TrackedHand {
    pub handedness: Handedness,
    points: Vec<Point>,
}

impl TrackedHand {
    /// Build a hand from provider output.  Returns `None` unless exactly
    /// 21 landmarks are present — short or empty sets mean the hand is
    /// skipped for this frame.
    pub fn new(handedness: Handedness, points: Vec<Point>) -> Option<Self> {
        if points.len() != LANDMARK_COUNT {
            return None;
        }
        Some(Self { handedness, points })
    }

    /// Position of a landmark.
    pub fn point(&self, id: LandmarkId) -> Point {
        self.points[id.index()]
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_indices() {
        assert_eq!(LandmarkId::Wrist.index(), 0);
        assert_eq!(LandmarkId::ThumbTip.index(), 4);
        assert_eq!(LandmarkId::IndexTip.index(), 8);
        assert_eq!(LandmarkId::MiddleTip.index(), 12);
        assert_eq!(LandmarkId::RingTip.index(), 16);
        assert_eq!(LandmarkId::LittleTip.index(), 20);
        assert_eq!(LANDMARK_COUNT, 21);
    }

    #[test]
    fn test_finger_reference_joints() {
        assert_eq!(Finger::Thumb.reference(), LandmarkId::ThumbIp);
        assert_eq!(Finger::Index.reference(), LandmarkId::IndexPip);
        assert_eq!(Finger::Little.reference(), LandmarkId::LittlePip);
    }

    #[test]
    fn test_handedness_parse() {
        assert_eq!(Handedness::parse("Left"), Some(Handedness::Left));
        assert_eq!(Handedness::parse("Right"), Some(Handedness::Right));
        assert_eq!(Handedness::parse("left"), None);
        assert_eq!(Handedness::parse(""), None);
        assert_eq!(Handedness::parse("Unknown"), None);
    }

    #[test]
    fn test_tracked_hand_rejects_short_sets() {
        assert!(TrackedHand::new(Handedness::Right, Vec::new()).is_none());
        assert!(TrackedHand::new(Handedness::Right, vec![Point::default(); 20]).is_none());
        assert!(TrackedHand::new(Handedness::Right, vec![Point::default(); 21]).is_some());
    }

    #[test]
    fn test_point_lookup() {
        let mut points = vec![Point::default(); LANDMARK_COUNT];
        points[LandmarkId::IndexTip.index()] = Point::new(120.0, 80.0);
        let hand = TrackedHand::new(Handedness::Left, points).unwrap();
        assert_eq!(hand.point(LandmarkId::IndexTip), Point::new(120.0, 80.0));
        assert_eq!(hand.point(LandmarkId::Wrist), Point::default());
    }
}
