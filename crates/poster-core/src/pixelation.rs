use crate::constants::{
    PIXEL_DELTA_GAIN, PIXEL_DELTA_MAX, PIXEL_FACTOR_MAX, PIXEL_FACTOR_MIN, PIXEL_MIX_EXPONENT,
    PIXEL_RELAX_RATE,
};

/// Scroll-velocity driven pixel grid resolution.
///
/// Faster scrolling lowers the target (coarser blocks); at rest the target is
/// `PIXEL_FACTOR_MAX`. The current value relaxes toward the target with a
/// single-pole filter stepped once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelationState {
    current: f32,
}

impl Default for PixelationState {
    fn default() -> Self {
        Self {
            current: PIXEL_FACTOR_MAX,
        }
    }
}

impl PixelationState {
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn step(&mut self, scroll_delta: f32) -> f32 {
        let target = target_pixel_factor(scroll_delta);
        self.current += (target - self.current) * PIXEL_RELAX_RATE;
        self.current
    }
}

/// Target grid resolution for a per-frame scroll delta, in `[MIN, MAX]`.
pub fn target_pixel_factor(scroll_delta: f32) -> f32 {
    let normalized = if scroll_delta.is_finite() {
        ((scroll_delta * PIXEL_DELTA_GAIN).abs() / PIXEL_DELTA_MAX).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let mix = normalized.powf(PIXEL_MIX_EXPONENT);
    PIXEL_FACTOR_MAX + (PIXEL_FACTOR_MIN - PIXEL_FACTOR_MAX) * mix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_hits_both_bounds() {
        assert_eq!(target_pixel_factor(0.0), PIXEL_FACTOR_MAX);
        assert_eq!(target_pixel_factor(75.0), PIXEL_FACTOR_MIN);
        assert_eq!(target_pixel_factor(-1e6), PIXEL_FACTOR_MIN);
    }
}
