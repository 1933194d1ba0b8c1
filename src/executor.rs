//! OS action executor boundary.
//!
//! The engine decides which action fires and when; everything that
//! actually touches the OS — pointer, buttons, scroll wheel, keystroke
//! injection, screenshots — sits behind `ActionExecutor`.  The shipped
//! implementation drives enigo, with xcap for screen capture.  Failures
//! propagate to the session loop, which terminates rather than retry.

use anyhow::{anyhow, Context, Result};
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use std::path::Path;
use tracing::{debug, info};

// ── Action vocabulary ──────────────────────────────────────

/// Hotkey combinations the dispatcher can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hotkey {
    /// OS search (Meta tap).
    Search,
    /// Minimize/restore the focused window (Meta+Down).
    MinimizeToggle,
    /// Cycle applications (Alt+Tab).
    SwitchApps,
}

impl Hotkey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::MinimizeToggle => "minimize-toggle",
            Self::SwitchApps => "switch-apps",
        }
    }
}

/// Keystrokes the virtual keyboard injects downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Space,
    Backspace,
    Enter,
}

/// Everything the engine may ask the OS to do.
pub trait ActionExecutor {
    fn move_pointer(&mut self, x: i32, y: i32) -> Result<()>;
    /// Positive delta scrolls up, negative down.
    fn scroll(&mut self, delta: i32) -> Result<()>;
    fn left_click(&mut self) -> Result<()>;
    fn right_click(&mut self) -> Result<()>;
    fn hotkey(&mut self, hotkey: Hotkey) -> Result<()>;
    fn keystroke(&mut self, keystroke: Keystroke) -> Result<()>;
    fn screenshot(&mut self, path: &Path) -> Result<()>;
}

// ── Screen query ───────────────────────────────────────────

/// Target display resolution, falling back to 1920x1080 when the query
/// is unavailable (e.g. headless test environments).
pub fn detect_screen_size() -> (u32, u32) {
    match rdev::display_size() {
        Ok((w, h)) => (w as u32, h as u32),
        Err(_) => (1920, 1080),
    }
}

// ── System executor ────────────────────────────────────────

/// Real OS executor backed by enigo.
pub struct SystemExecutor {
    enigo: Enigo,
}

impl SystemExecutor {
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow!("failed to initialize input injection: {e:?}"))?;
        Ok(Self { enigo })
    }

    fn tap(&mut self, key: Key) -> Result<()> {
        self.enigo
            .key(key, Direction::Click)
            .map_err(|e| anyhow!("key injection failed: {e:?}"))
    }

    fn combo(&mut self, held: Key, tapped: Key) -> Result<()> {
        self.enigo
            .key(held, Direction::Press)
            .map_err(|e| anyhow!("key injection failed: {e:?}"))?;
        let result = self.tap(tapped);
        // Release the modifier even if the tap failed.
        let release = self
            .enigo
            .key(held, Direction::Release)
            .map_err(|e| anyhow!("key injection failed: {e:?}"));
        result.and(release)
    }
}

impl ActionExecutor for SystemExecutor {
    fn move_pointer(&mut self, x: i32, y: i32) -> Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| anyhow!("pointer move failed: {e:?}"))
    }

    fn scroll(&mut self, delta: i32) -> Result<()> {
        // enigo's vertical axis grows downward.
        self.enigo
            .scroll(-delta, Axis::Vertical)
            .map_err(|e| anyhow!("scroll failed: {e:?}"))
    }

    fn left_click(&mut self) -> Result<()> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| anyhow!("left click failed: {e:?}"))
    }

    fn right_click(&mut self) -> Result<()> {
        self.enigo
            .button(Button::Right, Direction::Click)
            .map_err(|e| anyhow!("right click failed: {e:?}"))
    }

    fn hotkey(&mut self, hotkey: Hotkey) -> Result<()> {
        debug!("hotkey: {}", hotkey.as_str());
        match hotkey {
            Hotkey::Search => self.tap(Key::Meta),
            Hotkey::MinimizeToggle => self.combo(Key::Meta, Key::DownArrow),
            Hotkey::SwitchApps => self.combo(Key::Alt, Key::Tab),
        }
    }

    fn keystroke(&mut self, keystroke: Keystroke) -> Result<()> {
        match keystroke {
            Keystroke::Char(c) => self.tap(Key::Unicode(c)),
            Keystroke::Space => self.tap(Key::Space),
            Keystroke::Backspace => self.tap(Key::Backspace),
            Keystroke::Enter => self.tap(Key::Return),
        }
    }

    fn screenshot(&mut self, path: &Path) -> Result<()> {
        let monitors = xcap::Monitor::all().context("enumerating monitors")?;
        let monitor = monitors
            .iter()
            .find(|m| m.is_primary())
            .or_else(|| monitors.first())
            .context("no monitor available for screenshot")?;
        let image = monitor.capture_image().context("capturing screen")?;
        image
            .save(path)
            .with_context(|| format!("writing screenshot to {}", path.display()))?;
        info!("screenshot saved: {}", path.display());
        Ok(())
    }
}
