//! Work-stealing blur on a rayon pool.
//!
//! Rows are handed out one at a time via `par_chunks_mut`, so there is no
//! fixed partition and no tail imbalance. Output matches the other engines.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::blur::BlurEngine;
use crate::error::{Error, Result};
use crate::kernel::blur_row;
use crate::pixel::PixelBuffer;

#[derive(Debug, Clone, Copy, Default)]
pub struct RayonBlurEngine {
    threads: Option<usize>,
}

impl RayonBlurEngine {
    /// Run on rayon's global pool.
    pub fn new() -> Self {
        RayonBlurEngine { threads: None }
    }

    /// Run on a dedicated pool with `threads` workers.
    pub fn with_threads(threads: usize) -> Self {
        RayonBlurEngine {
            threads: Some(threads),
        }
    }

    pub fn blur(&self, input: &PixelBuffer) -> Result<PixelBuffer> {
        if !input.has_interior() {
            return Err(Error::invalid(format!(
                "buffer {}x{} is smaller than 3x3",
                input.width(),
                input.height()
            )));
        }

        match self.threads {
            None => Ok(blur_rows(input)),
            Some(0) => Err(Error::invalid("thread count must be positive")),
            Some(n) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("rayon-blur-{}", i))
                    .build()
                    .map_err(|e| Error::invalid(format!("cannot build thread pool: {}", e)))?;
                Ok(pool.install(|| blur_rows(input)))
            }
        }
    }
}

fn blur_rows(input: &PixelBuffer) -> PixelBuffer {
    let width = input.width();
    let height = input.height();
    let mut output = input.clone();

    output.pixels_mut()[width..(height - 1) * width]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(i, row)| blur_row(input, i + 1, row));

    output
}

impl BlurEngine for RayonBlurEngine {
    fn name(&self) -> String {
        match self.threads {
            Some(n) => format!("rayon-{}", n),
            None => format!("rayon-{}", rayon::current_num_threads()),
        }
    }

    fn blur(&self, input: &PixelBuffer) -> Result<PixelBuffer> {
        RayonBlurEngine::blur(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blur::sequential_blur;
    use crate::generate::seeded_buffer;
    use crate::pixel::Color;

    #[test]
    fn test_global_pool_matches_sequential() {
        let input = seeded_buffer(33, 21, 5).unwrap();
        let output = RayonBlurEngine::new().blur(&input).unwrap();
        assert_eq!(output, sequential_blur(&input));
    }

    #[test]
    fn test_dedicated_pool_matches_sequential() {
        let input = seeded_buffer(20, 40, 11).unwrap();
        for threads in [1, 3] {
            let output = RayonBlurEngine::with_threads(threads).blur(&input).unwrap();
            assert_eq!(output, sequential_blur(&input));
        }
    }

    #[test]
    fn test_rejects_zero_threads() {
        let input = PixelBuffer::filled(5, 5, Color::BLACK).unwrap();
        assert!(RayonBlurEngine::with_threads(0).blur(&input).is_err());
    }

    #[test]
    fn test_rejects_buffer_without_interior() {
        let input = PixelBuffer::filled(1, 1, Color::BLACK).unwrap();
        assert!(RayonBlurEngine::new().blur(&input).is_err());
    }
}
