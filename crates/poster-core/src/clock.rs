use instant::Instant;

/// Wall-clock source for the frame loop.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    start: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the clock was created.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// High-resolution monotonic timestamp in milliseconds (`performance.now()` on the web).
    pub fn timestamp_ms(&self) -> f64 {
        instant::now()
    }
}
