//! Point-and-pinch virtual keyboard.
//!
//! A key layout engine with two interchangeable layers (letters vs.
//! symbols, digits and control keys on both), pinch hit-testing between
//! the index and thumb fingertips, a text buffer, and a shared one-key-
//! per-second cooldown so a held pinch cannot burst characters.
//! Layouts come from a pure generator, so layer switching is idempotent.

use std::time::Duration;

use tracing::debug;

use super::landmarks::Point;

// ── Layers ─────────────────────────────────────────────────

/// The two key-set layers.  Digits and control keys appear on both;
/// only the three body rows change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardLayer {
    /// Letters.
    Primary,
    /// Symbols.
    Secondary,
}

impl KeyboardLayer {
    pub fn toggled(&self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Body characters for each layer, laid out ten per row.
const PRIMARY_BODY: &str = "QWERTYUIOPASDFGHJKLZXCVBNM";
const SECONDARY_BODY: &str = "!@#$%^&*()_+-=[]{}|;:',.<>?/\\";
const DIGITS: &str = "1234567890";

// ── Key definition ─────────────────────────────────────────

/// A single key: screen rectangle plus display text.  Immutable once
/// generated for a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
}

impl KeyDef {
    /// Whether a fingertip position falls inside this key.
    pub fn contains(&self, p: Point) -> bool {
        self.x < p.x && p.x < self.x + self.width && self.y < p.y && p.y < self.y + self.height
    }
}

// ── Config ─────────────────────────────────────────────────

/// Keyboard geometry and timing, in camera-frame pixels.
#[derive(Debug, Clone)]
pub struct KeyboardConfig {
    /// Top-left corner of the body rows.
    pub origin_x: f32,
    pub origin_y: f32,
    /// Size of a one-unit key.
    pub key_width: f32,
    pub key_height: f32,
    /// Gap between adjacent keys.
    pub gap: f32,
    /// Shared minimum interval between dispatched key presses.
    pub press_cooldown: Duration,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            origin_x: 40.0,
            origin_y: 200.0,
            key_width: 80.0,
            key_height: 60.0,
            gap: 5.0,
            press_cooldown: Duration::from_secs(1),
        }
    }
}

// ── Key actions ────────────────────────────────────────────

/// The effect of one dispatched key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Append a character to the buffer and inject it downstream.
    Char(char),
    /// Append ' ' and inject a space keystroke.
    Space,
    /// Remove the last buffered character and inject backspace.
    Backspace,
    /// Empty the buffer; nothing is injected.
    Clear,
    /// Append '\n' and inject an enter keystroke.
    Enter,
    /// Toggle the layer; nothing is buffered or injected.
    SwitchLayer,
}

fn action_for(label: &str) -> KeyAction {
    match label {
        "Space" => KeyAction::Space,
        "<--" => KeyAction::Backspace,
        "clr" => KeyAction::Clear,
        "Enter" => KeyAction::Enter,
        "Switch" => KeyAction::SwitchLayer,
        other => KeyAction::Char(other.chars().next().unwrap_or(' ')),
    }
}

// ── Layout generation ──────────────────────────────────────

/// Generate the full key set for a layer.
///
/// The digits row sits above the body; three body rows of ten follow;
/// the control row (Switch, Space, "<--", "clr", Enter) closes the
/// bottom.  Pure function of `(layer, config)`.
pub fn generate_layout(layer: KeyboardLayer, config: &KeyboardConfig) -> Vec<KeyDef> {
    let (kw, kh, gap) = (config.key_width, config.key_height, config.gap);
    let pitch_x = kw + gap;
    let mut keys = Vec::new();

    // Digits row, directly above the body.
    for (i, digit) in DIGITS.chars().enumerate() {
        keys.push(KeyDef {
            x: config.origin_x + i as f32 * pitch_x,
            y: config.origin_y - kh - gap,
            width: kw,
            height: kh,
            label: digit.to_string(),
        });
    }

    // Body rows, ten keys per row.
    let body = match layer {
        KeyboardLayer::Primary => PRIMARY_BODY,
        KeyboardLayer::Secondary => SECONDARY_BODY,
    };
    for (i, ch) in body.chars().enumerate() {
        let row = (i / 10) as f32;
        let col = (i % 10) as f32;
        keys.push(KeyDef {
            x: config.origin_x + col * pitch_x,
            y: config.origin_y + row * (kh + gap),
            width: kw,
            height: kh,
            label: ch.to_string(),
        });
    }

    // Control row below the three body rows: (label, x offset, width units).
    let control_y = config.origin_y + 3.0 * (kh + gap);
    let controls = [
        ("Switch", 0.0, 2.0),
        ("Space", 2.0 * kw + 2.0 * gap, 3.0),
        ("<--", 5.0 * kw + 6.0 * gap, 2.0),
        ("clr", 7.0 * kw + 10.0 * gap, 2.0),
        ("Enter", 9.0 * kw + 14.0 * gap, 2.0),
    ];
    for (label, offset, units) in controls {
        keys.push(KeyDef {
            x: config.origin_x + offset,
            y: control_y,
            width: units * kw,
            height: kh,
            label: label.to_string(),
        });
    }

    keys
}

// ── State ──────────────────────────────────────────────────

/// Central virtual keyboard state: active layer, generated keys, the
/// accumulated text buffer, and the shared press cooldown.
#[derive(Debug)]
pub struct KeyboardState {
    config: KeyboardConfig,
    layer: KeyboardLayer,
    keys: Vec<KeyDef>,
    text: String,
    last_press: Option<Duration>,
}

impl KeyboardState {
    /// Create a keyboard on the primary layer.
    pub fn new(config: KeyboardConfig) -> Self {
        let keys = generate_layout(KeyboardLayer::Primary, &config);
        Self {
            config,
            layer: KeyboardLayer::Primary,
            keys,
            text: String::new(),
            last_press: None,
        }
    }

    pub fn layer(&self) -> KeyboardLayer {
        self.layer
    }

    pub fn keys(&self) -> &[KeyDef] {
        &self.keys
    }

    /// Accumulated typed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The key under a single fingertip, for front-end highlighting.
    /// Hovering has no behavioral effect.
    pub fn hover(&self, p: Point) -> Option<&KeyDef> {
        self.keys.iter().find(|k| k.contains(p))
    }

    /// Process one frame of fingertip positions.  A key is engaged when
    /// both tips fall inside its rectangle; an engaged key dispatches
    /// only once the shared cooldown has elapsed.  Returns the dispatched
    /// action, already applied to the buffer and layer.
    pub fn update(&mut self, index_tip: Point, thumb_tip: Point, now: Duration) -> Option<KeyAction> {
        let engaged = self
            .keys
            .iter()
            .find(|k| k.contains(index_tip) && k.contains(thumb_tip))?;

        if let Some(last) = self.last_press {
            if now.saturating_sub(last) <= self.config.press_cooldown {
                return None;
            }
        }

        let action = action_for(&engaged.label);
        debug!("key press: {:?} ({} layer)", action, self.layer.as_str());
        self.apply(action);
        self.last_press = Some(now);
        Some(action)
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Char(c) => self.text.push(c),
            KeyAction::Space => self.text.push(' '),
            KeyAction::Backspace => {
                self.text.pop();
            }
            KeyAction::Clear => self.text.clear(),
            KeyAction::Enter => self.text.push('\n'),
            KeyAction::SwitchLayer => {
                self.layer = self.layer.toggled();
                self.keys = generate_layout(self.layer, &self.config);
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────
