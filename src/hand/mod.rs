//! Gesture & interaction engine — the stateful core of the application.
//!
//! Provides:
//! - `landmarks`: per-frame hand landmark data and typed landmark ids
//! - `fingers`: raised/curled classification per finger
//! - `gesture`: finger-state vector → gesture, fixed priority chain
//! - `cooldown`: per-gesture re-fire gating with an injected clock
//! - `keyboard`: two-layer virtual keyboard with pinch hit-testing

pub mod cooldown;
pub mod fingers;
pub mod gesture;
pub mod keyboard;
pub mod landmarks;
