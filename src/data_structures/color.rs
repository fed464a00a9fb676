//! RGB colors with channels in `[0, 1]`.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An RGB color, one `f32` per channel.
///
/// Serialized as a `0xRRGGBB` integer so dataset configs can write colors the
/// same way the map styles define them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_hex(&self) -> u32 {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        to_u8(self.r) << 16 | to_u8(self.g) << 8 | to_u8(self.b)
    }

    /// Per-channel `self + (other - self) * t`. `t` is not clamped.
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Moves every channel independently by a uniform offset in `[-bound/2, bound/2)`
    /// and clamps the result to `[0, 1]`.
    pub fn jitter<R: Rng + ?Sized>(&self, bound: f32, rng: &mut R) -> Color {
        let mut vary = |c: f32| {
            let offset = rng.gen_range(0.0f32..1.0) * bound - bound / 2.0;
            (c + offset).clamp(0.0, 1.0)
        };
        Color {
            r: vary(self.r),
            g: vary(self.g),
            b: vary(self.b),
        }
    }

    pub fn to_rgba(&self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Color::from_hex(hex)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn hex_channels_split_correctly() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.to_hex(), 0xff8000);
    }

    #[test]
    fn jitter_stays_clamped_even_with_huge_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for base in [Color::BLACK, Color::WHITE, Color::from_hex(0x6b8bbb)] {
            for _ in 0..200 {
                let c = base.jitter(10.0, &mut rng);
                for channel in [c.r, c.g, c.b] {
                    assert!((0.0..=1.0).contains(&channel));
                }
            }
        }
    }

    #[test]
    fn zero_bound_jitter_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let c = Color::from_hex(0x69bda9);
        assert_eq!(c.jitter(0.0, &mut rng), c);
    }
}
