//! Gesture → OS action translation.
//!
//! One executor call per approved gesture.  The pointer gesture maps the
//! index fingertip's position within the camera frame linearly onto the
//! full display resolution; everything else is a direct call.  Cooldown
//! gating happens before dispatch, in the session loop.

use anyhow::Result;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::executor::{ActionExecutor, Hotkey};
use crate::hand::gesture::{scroll_direction, Gesture, ScrollDirection};
use crate::hand::landmarks::{LandmarkId, TrackedHand};

/// Translates recognized gestures into executor calls.
#[derive(Debug)]
pub struct ActionDispatcher {
    screen_width: u32,
    screen_height: u32,
    scroll_step: i32,
    screenshot_dir: PathBuf,
}

impl ActionDispatcher {
    pub fn new(screen: (u32, u32), scroll_step: i32, screenshot_dir: PathBuf) -> Self {
        Self {
            screen_width: screen.0,
            screen_height: screen.1,
            scroll_step,
            screenshot_dir,
        }
    }

    /// Issue the single executor call for `gesture`.
    pub fn dispatch(
        &self,
        gesture: Gesture,
        hand: &TrackedHand,
        frame_width: u32,
        frame_height: u32,
        executor: &mut dyn ActionExecutor,
    ) -> Result<()> {
        match gesture {
            Gesture::MovePointer => {
                let tip = hand.point(LandmarkId::IndexTip);
                let (x, y) = self.map_to_screen(tip.x, tip.y, frame_width, frame_height);
                executor.move_pointer(x, y)
            }
            Gesture::Scroll => {
                let delta = match scroll_direction(hand) {
                    ScrollDirection::Up => self.scroll_step,
                    ScrollDirection::Down => -self.scroll_step,
                };
                executor.scroll(delta)
            }
            Gesture::RightClick => executor.right_click(),
            Gesture::LeftClick => executor.left_click(),
            Gesture::OpenSearch => executor.hotkey(Hotkey::Search),
            Gesture::MinimizeToggle => executor.hotkey(Hotkey::MinimizeToggle),
            Gesture::SwitchApps => executor.hotkey(Hotkey::SwitchApps),
            Gesture::Screenshot => executor.screenshot(&self.screenshot_path()),
        }
    }

    /// Map a camera-frame pixel position onto the display, clamped to
    /// its bounds.
    fn map_to_screen(&self, x: f32, y: f32, frame_width: u32, frame_height: u32) -> (i32, i32) {
        let sx = x / frame_width.max(1) as f32 * self.screen_width as f32;
        let sy = y / frame_height.max(1) as f32 * self.screen_height as f32;
        (
            (sx as i32).clamp(0, self.screen_width as i32 - 1),
            (sy as i32).clamp(0, self.screen_height as i32 - 1),
        )
    }

    /// Timestamped screenshot path inside the output directory.
    fn screenshot_path(&self) -> PathBuf {
        let unix_seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.screenshot_dir
            .join(format!("screenshot_{unix_seconds}.png"))
    }
}

// ── Tests ──────────────────────────────────────────────────
