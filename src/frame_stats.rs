//! Frame timing instrumentation for the processing loop.
//!
//! Keeps a rolling window of per-frame durations and derives percentile
//! and FPS figures for periodic log reporting.

/// Rolling frame timing statistics over a window of samples.
#[derive(Debug)]
pub struct FrameStats {
    /// Per-frame total time in milliseconds.
    frame_times: Vec<f64>,
    /// Maximum number of samples to keep.
    window_size: usize,
    /// Total frames processed.
    total_frames: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(240)
    }
}

impl FrameStats {
    pub fn new(window_size: usize) -> Self {
        Self {
            frame_times: Vec::with_capacity(window_size),
            window_size,
            total_frames: 0,
        }
    }

    /// Record one frame's processing time.
    pub fn record_frame(&mut self, frame_ms: f64) {
        self.frame_times.push(frame_ms);
        if self.frame_times.len() > self.window_size {
            self.frame_times.remove(0);
        }
        self.total_frames += 1;
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Median frame time in milliseconds over the window.
    pub fn median_ms(&self) -> f64 {
        Self::percentile(&self.sorted(), 50.0)
    }

    /// 99th-percentile frame time in milliseconds over the window.
    pub fn p99_ms(&self) -> f64 {
        Self::percentile(&self.sorted(), 99.0)
    }

    /// Frames per second implied by the median frame time.
    pub fn fps(&self) -> f64 {
        let median = self.median_ms();
        if median > 0.0 {
            1000.0 / median
        } else {
            0.0
        }
    }

    fn sorted(&self) -> Vec<f64> {
        let mut times = self.frame_times.clone();
        times.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        times
    }

    /// Compute percentile from a sorted slice.
    fn percentile(sorted: &[f64], p: f64) -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }
        let idx = ((sorted.len() as f64 - 1.0) * p / 100.0).round() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }
}
