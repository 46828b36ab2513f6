use crate::constants::{SCROLL_EASE, SCROLL_PROGRESS_DIVISOR};

/// Wheel-driven scroll with inertia.
///
/// `target` accumulates raw wheel deltas without bound; `current` chases it by
/// a fixed fraction (`ease`) once per displayed frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollState {
    pub current: f64,
    pub target: f64,
    pub ease: f64,
    pub last: f64,
    progress: f64,
}

/// Per-frame scroll outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollFrame {
    pub current: f64,
    pub delta: f64,
    pub progress: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(SCROLL_EASE)
    }
}

impl ScrollState {
    pub fn new(ease: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            ease,
            last: 0.0,
            progress: 0.0,
        }
    }

    pub fn handle_wheel(&mut self, delta_y: f64) {
        if delta_y.is_finite() {
            self.target += delta_y;
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Ease toward the target and derive delta/progress for this frame.
    pub fn step(&mut self) -> ScrollFrame {
        self.current += (self.target - self.current) * self.ease;
        let delta = self.current - self.last;
        self.last = self.current;
        self.progress = self.current / SCROLL_PROGRESS_DIVISOR;
        ScrollFrame {
            current: self.current,
            delta,
            progress: self.progress,
        }
    }
}
