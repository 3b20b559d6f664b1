//! Test-image generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::pixel::{Color, PixelBuffer};

/// Buffer filled with uniformly random channels drawn from `rng`.
pub fn random_buffer<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<PixelBuffer> {
    let pixels = (0..width.saturating_mul(height))
        .map(|_| Color::new(rng.gen(), rng.gen(), rng.gen()))
        .collect();
    PixelBuffer::from_vec(width, height, pixels)
}

/// Reproducible random buffer.
pub fn seeded_buffer(width: usize, height: usize, seed: u64) -> Result<PixelBuffer> {
    random_buffer(width, height, &mut StdRng::seed_from_u64(seed))
}

pub fn uniform_buffer(width: usize, height: usize, color: Color) -> Result<PixelBuffer> {
    PixelBuffer::filled(width, height, color)
}
