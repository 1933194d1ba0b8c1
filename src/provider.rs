//! Hand-tracking provider boundary.
//!
//! The pose-estimation model runs in a helper process that owns the
//! camera, mirrors the frame, and writes one JSON object per frame to
//! stdout:
//!
//! ```text
//! {"width":960,"height":540,"hands":[
//!   {"handedness":"Right","score":0.93,"landmarks":[{"x":..,"y":..}, ... 21]}]}
//! ```
//!
//! Empty `hands` is a valid frame (nothing detected).  Hands with an
//! unknown handedness label, a low score, or a short landmark list are
//! dropped individually; a malformed line drops only that frame.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};
use tracing::{debug, info, warn};

use crate::hand::landmarks::{Handedness, Point, TrackedHand};

// ── Frame types ────────────────────────────────────────────

/// One frame of provider output: camera dimensions plus every valid
/// detected hand.
#[derive(Debug, Clone)]
pub struct TrackingFrame {
    pub width: u32,
    pub height: u32,
    pub hands: Vec<TrackedHand>,
}

/// Source of per-frame hand tracking data.  `Ok(None)` means the stream
/// ended and the session should stop.
pub trait HandProvider {
    fn next_frame(&mut self) -> Result<Option<TrackingFrame>>;
}

// ── Wire format ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    #[allow(dead_code)]
    z: f32,
}

#[derive(Debug, Deserialize)]
struct HandJson {
    handedness: String,
    #[serde(default)]
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Debug, Deserialize)]
struct FrameJson {
    width: u32,
    height: u32,
    #[serde(default)]
    hands: Vec<HandJson>,
}

fn convert_frame(frame: FrameJson, min_score: f32) -> TrackingFrame {
    let hands = frame
        .hands
        .into_iter()
        .filter_map(|hand| {
            let Some(handedness) = Handedness::parse(&hand.handedness) else {
                debug!("ignoring hand with handedness {:?}", hand.handedness);
                return None;
            };
            if hand.score < min_score {
                debug!("ignoring {} hand below score threshold: {:.2}", handedness.as_str(), hand.score);
                return None;
            }
            let points: Vec<Point> = hand
                .landmarks
                .iter()
                .map(|lm| Point::new(lm.x, lm.y))
                .collect();
            let tracked = TrackedHand::new(handedness, points);
            if tracked.is_none() {
                warn!("ignoring {} hand with {} landmarks", handedness.as_str(), hand.landmarks.len());
            }
            tracked
        })
        .collect();

    TrackingFrame {
        width: frame.width,
        height: frame.height,
        hands,
    }
}

// ── Subprocess provider ────────────────────────────────────

/// Runs the tracking helper as a child process and parses its stdout.
pub struct SubprocessProvider {
    process: Child,
    stdout: BufReader<ChildStdout>,
    min_score: f32,
}

impl SubprocessProvider {
    /// Spawn the helper and wait for its `READY` line.
    pub fn spawn(command: &str, args: &[String], min_score: f32) -> Result<Self> {
        info!("starting tracking provider: {} {}", command, args.join(" "));
        let mut process = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to start tracking provider {command:?}"))?;

        let stdout = process.stdout.take().context("provider has no stdout")?;
        let mut stdout = BufReader::new(stdout);

        let mut ready = String::new();
        stdout
            .read_line(&mut ready)
            .context("reading provider handshake")?;
        if ready.trim() != "READY" {
            anyhow::bail!("provider did not signal READY, got {:?}", ready.trim());
        }
        info!("tracking provider ready");

        Ok(Self {
            process,
            stdout,
            min_score,
        })
    }
}

impl HandProvider for SubprocessProvider {
    fn next_frame(&mut self) -> Result<Option<TrackingFrame>> {
        loop {
            let mut line = String::new();
            let n = self
                .stdout
                .read_line(&mut line)
                .context("reading provider frame")?;
            if n == 0 {
                info!("tracking provider stream ended");
                return Ok(None);
            }
            match serde_json::from_str::<FrameJson>(&line) {
                Ok(frame) => return Ok(Some(convert_frame(frame, self.min_score))),
                Err(err) => {
                    warn!("skipping malformed provider frame: {err}");
                    continue;
                }
            }
        }
    }
}

impl Drop for SubprocessProvider {
    fn drop(&mut self) {
        let _ = self.process.kill();
    }
}

// ── Tests ──────────────────────────────────────────────────
