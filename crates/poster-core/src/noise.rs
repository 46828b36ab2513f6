use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{NOISE_LATTICE, NOISE_SEED, NOISE_TEXTURE_PX};
use crate::image::RgbaImage;

/// Tileable value-noise bitmap used when the noise texture asset is missing.
///
/// The lattice wraps at its edges so the result repeats seamlessly under
/// repeat addressing. Each channel holds an independent octave so the
/// background shader can read whichever it needs.
pub fn tileable_noise(size: u32, lattice: u32, seed: u64) -> RgbaImage {
    let size = size.max(1);
    let lattice = lattice.clamp(1, size);
    let mut rng = StdRng::seed_from_u64(seed);
    let grids: [Vec<f32>; 4] = std::array::from_fn(|channel| {
        let n = (lattice << channel.min(2)) as usize;
        (0..n * n).map(|_| rng.gen::<f32>()).collect()
    });

    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            for (channel, grid) in grids.iter().enumerate() {
                let n = lattice << channel.min(2);
                let v = if channel == 3 {
                    1.0
                } else {
                    sample(grid, n, x as f32 / size as f32, y as f32 / size as f32)
                };
                pixels.push((v * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }
    }
    RgbaImage {
        width: size,
        height: size,
        pixels,
    }
}

pub fn default_noise() -> RgbaImage {
    tileable_noise(NOISE_TEXTURE_PX, NOISE_LATTICE, NOISE_SEED)
}

fn sample(grid: &[f32], n: u32, u: f32, v: f32) -> f32 {
    let fx = u * n as f32;
    let fy = v * n as f32;
    let x0 = fx.floor() as u32 % n;
    let y0 = fy.floor() as u32 % n;
    let x1 = (x0 + 1) % n;
    let y1 = (y0 + 1) % n;
    let tx = smooth(fx.fract());
    let ty = smooth(fy.fract());
    let at = |x: u32, y: u32| grid[(y * n + x) as usize];
    let top = at(x0, y0) + (at(x1, y0) - at(x0, y0)) * tx;
    let bottom = at(x0, y1) + (at(x1, y1) - at(x0, y1)) * tx;
    top + (bottom - top) * ty
}

fn smooth(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_seeded_and_opaque() {
        let a = tileable_noise(32, 4, 7);
        let b = tileable_noise(32, 4, 7);
        assert_eq!(a, b);
        assert!(a.is_valid());
        assert!(a.pixels.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn noise_wraps_at_edges() {
        let img = tileable_noise(64, 8, 1);
        // Left edge continues from the right edge: neighbouring texels differ little.
        for y in 0..64 {
            let left = img.pixel(0, y).unwrap()[0] as i32;
            let right = img.pixel(63, y).unwrap()[0] as i32;
            assert!((left - right).abs() < 48, "row {y}: {left} vs {right}");
        }
    }
}
