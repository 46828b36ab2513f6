use std::collections::VecDeque;

use crate::constants::{STATS_LOGS_PER_SECOND, STATS_SAMPLES_LOG};

/// Averaged frame rate as published to the overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsReport {
    pub fps: f64,
    pub frame_ms: f64,
}

/// Rolling frame-time log with a throttled report.
#[derive(Clone, Debug)]
pub struct FpsMeter {
    samples: VecDeque<f64>,
    capacity: usize,
    report_interval_ms: f64,
    last_frame_ms: Option<f64>,
    last_report_ms: f64,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(STATS_SAMPLES_LOG, STATS_LOGS_PER_SECOND)
    }
}

impl FpsMeter {
    pub fn new(capacity: usize, reports_per_second: f64) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
            report_interval_ms: 1000.0 / reports_per_second.max(f64::EPSILON),
            last_frame_ms: None,
            last_report_ms: f64::NEG_INFINITY,
        }
    }

    /// Record a frame at `now_ms`; returns a report when one is due.
    pub fn record(&mut self, now_ms: f64) -> Option<FpsReport> {
        let prev = self.last_frame_ms.replace(now_ms)?;
        let dt = now_ms - prev;
        if !(dt.is_finite() && dt > 0.0) {
            return None;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(dt);

        if now_ms - self.last_report_ms < self.report_interval_ms {
            return None;
        }
        self.last_report_ms = now_ms;
        self.average()
    }

    pub fn average(&self) -> Option<FpsReport> {
        if self.samples.is_empty() {
            return None;
        }
        let frame_ms = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        Some(FpsReport {
            fps: 1000.0 / frame_ms,
            frame_ms,
        })
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_are_throttled() {
        let mut meter = FpsMeter::default();
        let mut reports = 0;
        // One second at 60 Hz.
        for i in 0..=60 {
            if meter.record(i as f64 * 1000.0 / 60.0).is_some() {
                reports += 1;
            }
        }
        assert!((4..=5).contains(&reports), "got {reports}");
        let avg = meter.average().unwrap();
        assert!((avg.fps - 60.0).abs() < 1e-6);
    }

    #[test]
    fn log_is_bounded() {
        let mut meter = FpsMeter::new(40, 4.0);
        for i in 0..200 {
            meter.record(i as f64 * 10.0);
        }
        assert_eq!(meter.sample_count(), 40);
    }
}
