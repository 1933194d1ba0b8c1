//! Frame-synchronous processing loop.
//!
//! Owns every piece of state that outlives a frame: the cooldown
//! ledger, the virtual keyboard, and the frame statistics.  Each
//! provider frame is fully processed before the next is read; the right
//! hand drives system control, the left hand drives the keyboard, and
//! the two never interact.

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::info;

use crate::dispatch::ActionDispatcher;
use crate::executor::{ActionExecutor, Keystroke};
use crate::frame_stats::FrameStats;
use crate::hand::cooldown::CooldownLedger;
use crate::hand::fingers::FingerStates;
use crate::hand::gesture::classify;
use crate::hand::keyboard::{KeyAction, KeyboardConfig, KeyboardState};
use crate::hand::landmarks::{Handedness, LandmarkId, TrackedHand};
use crate::provider::{HandProvider, TrackingFrame};

/// How often to report frame statistics, in frames.
const STATS_INTERVAL: u64 = 120;

/// The running session: provider in, executor out, engine state in
/// between.
pub struct Session {
    provider: Box<dyn HandProvider>,
    executor: Box<dyn ActionExecutor>,
    dispatcher: ActionDispatcher,
    ledger: CooldownLedger,
    keyboard: KeyboardState,
    stats: FrameStats,
}

impl Session {
    pub fn new(
        provider: Box<dyn HandProvider>,
        executor: Box<dyn ActionExecutor>,
        dispatcher: ActionDispatcher,
        keyboard_config: KeyboardConfig,
    ) -> Self {
        Self {
            provider,
            executor,
            dispatcher,
            ledger: CooldownLedger::new(),
            keyboard: KeyboardState::new(keyboard_config),
            stats: FrameStats::default(),
        }
    }

    /// Process provider frames until the stream ends.  Executor failures
    /// propagate and end the session.
    pub fn run(&mut self) -> Result<()> {
        let start = Instant::now();
        while let Some(frame) = self.provider.next_frame()? {
            let frame_start = Instant::now();
            self.process_frame(&frame, start.elapsed())?;
            self.stats
                .record_frame(frame_start.elapsed().as_secs_f64() * 1000.0);

            if self.stats.total_frames() % STATS_INTERVAL == 0 {
                info!(
                    "processed {} frames, {:.0} fps (median {:.1} ms, p99 {:.1} ms)",
                    self.stats.total_frames(),
                    self.stats.fps(),
                    self.stats.median_ms(),
                    self.stats.p99_ms(),
                );
            }
        }
        info!("session ended after {} frames", self.stats.total_frames());
        Ok(())
    }

    /// Accumulated virtual-keyboard text, for front-end display.
    pub fn typed_text(&self) -> &str {
        self.keyboard.text()
    }

    /// Handle one frame at instant `now` (offset from session start).
    fn process_frame(&mut self, frame: &TrackingFrame, now: Duration) -> Result<()> {
        for hand in &frame.hands {
            match hand.handedness {
                Handedness::Right => self.control_hand(hand, frame.width, frame.height, now)?,
                Handedness::Left => self.keyboard_hand(hand, now)?,
            }
        }
        Ok(())
    }

    /// System-control half: classify the pose and dispatch if the
    /// ledger approves.
    fn control_hand(
        &mut self,
        hand: &TrackedHand,
        frame_width: u32,
        frame_height: u32,
        now: Duration,
    ) -> Result<()> {
        let states = FingerStates::of(hand);
        let Some(gesture) = classify(states) else {
            return Ok(());
        };
        if !self.ledger.try_fire(gesture, now) {
            return Ok(());
        }
        self.dispatcher
            .dispatch(gesture, hand, frame_width, frame_height, self.executor.as_mut())
    }

    /// Keyboard half: pinch hit-testing plus downstream keystroke
    /// injection.  Clear and Switch stay internal to the keyboard.
    fn keyboard_hand(&mut self, hand: &TrackedHand, now: Duration) -> Result<()> {
        let index_tip = hand.point(LandmarkId::IndexTip);
        let thumb_tip = hand.point(LandmarkId::ThumbTip);
        let Some(action) = self.keyboard.update(index_tip, thumb_tip, now) else {
            return Ok(());
        };
        let keystroke = match action {
            KeyAction::Char(c) => Some(Keystroke::Char(c)),
            KeyAction::Space => Some(Keystroke::Space),
            KeyAction::Backspace => Some(Keystroke::Backspace),
            KeyAction::Enter => Some(Keystroke::Enter),
            KeyAction::Clear | KeyAction::SwitchLayer => None,
        };
        if let Some(keystroke) = keystroke {
            self.executor.keystroke(keystroke)?;
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Hotkey;
    use crate::hand::landmarks::{Point, LANDMARK_COUNT};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    /// Executor that shares its call log with the test body.
    struct RecordingExecutor {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl ActionExecutor for RecordingExecutor {
        fn move_pointer(&mut self, x: i32, y: i32) -> Result<()> {
            self.calls.borrow_mut().push(format!("move {x},{y}"));
            Ok(())
        }
        fn scroll(&mut self, delta: i32) -> Result<()> {
            self.calls.borrow_mut().push(format!("scroll {delta}"));
            Ok(())
        }
        fn left_click(&mut self) -> Result<()> {
            self.calls.borrow_mut().push("left-click".into());
            Ok(())
        }
        fn right_click(&mut self) -> Result<()> {
            self.calls.borrow_mut().push("right-click".into());
            Ok(())
        }
        fn hotkey(&mut self, hotkey: Hotkey) -> Result<()> {
            self.calls.borrow_mut().push(format!("hotkey {}", hotkey.as_str()));
            Ok(())
        }
        fn keystroke(&mut self, keystroke: Keystroke) -> Result<()> {
            self.calls.borrow_mut().push(format!("keystroke {keystroke:?}"));
            Ok(())
        }
        fn screenshot(&mut self, path: &Path) -> Result<()> {
            self.calls.borrow_mut().push(format!("screenshot {}", path.display()));
            Ok(())
        }
    }

    /// Provider that never yields; sessions under test are driven
    /// through `process_frame` directly.
    struct EmptyProvider;

    impl HandProvider for EmptyProvider {
        fn next_frame(&mut self) -> Result<Option<TrackingFrame>> {
            Ok(None)
        }
    }

    fn session() -> (Session, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let executor = RecordingExecutor {
            calls: Rc::clone(&calls),
        };
        let session = Session::new(
            Box::new(EmptyProvider),
            Box::new(executor),
            ActionDispatcher::new((1920, 1080), 10, PathBuf::from("screenshots")),
            KeyboardConfig::default(),
        );
        (session, calls)
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    /// Right hand with the given raised fingers, index tip at frame
    /// center.
    fn control_hand(thumb: bool, index: bool, middle: bool, ring: bool, little: bool) -> TrackedHand {
        let mut points = vec![Point::new(100.0, 100.0); LANDMARK_COUNT];
        if thumb {
            points[LandmarkId::ThumbTip.index()] = Point::new(60.0, 100.0);
        }
        if index {
            points[LandmarkId::IndexTip.index()] = Point::new(480.0, 40.0);
        }
        if middle {
            points[LandmarkId::MiddleTip.index()] = Point::new(110.0, 50.0);
        }
        if ring {
            points[LandmarkId::RingTip.index()] = Point::new(120.0, 40.0);
        }
        if little {
            points[LandmarkId::LittleTip.index()] = Point::new(130.0, 40.0);
        }
        TrackedHand::new(Handedness::Right, points).unwrap()
    }

    /// Left hand pinching at a given position (index and thumb tips
    /// together).
    fn pinch_hand(at: Point) -> TrackedHand {
        let mut points = vec![Point::new(-10.0, -10.0); LANDMARK_COUNT];
        points[LandmarkId::IndexTip.index()] = at;
        points[LandmarkId::ThumbTip.index()] = at;
        TrackedHand::new(Handedness::Left, points).unwrap()
    }

    fn frame(hands: Vec<TrackedHand>) -> TrackingFrame {
        TrackingFrame {
            width: 960,
            height: 540,
            hands,
        }
    }

    #[test]
    fn test_pointer_moves_every_frame() {
        let (mut session, calls) = session();
        let hand = control_hand(false, true, false, false, false);
        for frame_no in 0..3 {
            session
                .process_frame(&frame(vec![hand.clone()]), Duration::from_millis(frame_no * 16))
                .unwrap();
        }
        // Continuous gesture: one move per frame, no cooldown involved.
        assert_eq!(calls.borrow().len(), 3);
        assert!(calls.borrow().iter().all(|c| c.starts_with("move ")));
    }

    #[test]
    fn test_right_click_cooldown_scenario() {
        let (mut session, calls) = session();
        let hand = control_hand(false, true, true, true, false);
        session.process_frame(&frame(vec![hand.clone()]), secs(0)).unwrap();
        session.process_frame(&frame(vec![hand.clone()]), secs(2)).unwrap();
        session.process_frame(&frame(vec![hand.clone()]), secs(4)).unwrap();
        assert_eq!(calls.borrow().as_slice(), ["right-click", "right-click"]);
    }

    #[test]
    fn test_unrecognized_pose_is_silent() {
        let (mut session, calls) = session();
        // Middle finger alone matches nothing.
        let hand = control_hand(false, false, true, false, false);
        session.process_frame(&frame(vec![hand]), secs(0)).unwrap();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_empty_frame_is_silent() {
        let (mut session, calls) = session();
        session.process_frame(&frame(Vec::new()), secs(0)).unwrap();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_keyboard_pinch_types_once_per_second() {
        let (mut session, calls) = session();
        // Key "Q" occupies (40,200)..(120,260) with the default layout.
        let q = Point::new(80.0, 230.0);
        session.process_frame(&frame(vec![pinch_hand(q)]), secs(0)).unwrap();
        session
            .process_frame(&frame(vec![pinch_hand(q)]), Duration::from_millis(400))
            .unwrap();
        session.process_frame(&frame(vec![pinch_hand(q)]), secs(2)).unwrap();
        assert_eq!(
            calls.borrow().as_slice(),
            ["keystroke Char('Q')", "keystroke Char('Q')"]
        );
        assert_eq!(session.typed_text(), "QQ");
    }

    #[test]
    fn test_clear_emits_no_keystroke() {
        let (mut session, calls) = session();
        let q = Point::new(80.0, 230.0);
        session.process_frame(&frame(vec![pinch_hand(q)]), secs(0)).unwrap();
        // "clr" sits at x 650..810, y 395..455 with the default layout.
        let clr = Point::new(700.0, 420.0);
        session.process_frame(&frame(vec![pinch_hand(clr)]), secs(2)).unwrap();
        assert_eq!(calls.borrow().as_slice(), ["keystroke Char('Q')"]);
        assert_eq!(session.typed_text(), "");
    }

    #[test]
    fn test_hands_are_independent() {
        let (mut session, calls) = session();
        let right = control_hand(false, true, false, false, false);
        let left = pinch_hand(Point::new(80.0, 230.0));
        session.process_frame(&frame(vec![right, left]), secs(0)).unwrap();
        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("move "));
        assert_eq!(calls[1], "keystroke Char('Q')");
    }

    #[test]
    fn test_left_hand_never_drives_gestures() {
        let (mut session, calls) = session();
        // A left hand holding the pointer pose: the keyboard half sees
        // no pinch, the control half never runs.
        let mut points = vec![Point::new(-10.0, -10.0); LANDMARK_COUNT];
        points[LandmarkId::IndexTip.index()] = Point::new(480.0, 40.0);
        let hand = TrackedHand::new(Handedness::Left, points).unwrap();
        session.process_frame(&frame(vec![hand]), secs(0)).unwrap();
        assert!(calls.borrow().is_empty());
    }
}
