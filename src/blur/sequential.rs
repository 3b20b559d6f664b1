use crate::blur::BlurEngine;
use crate::error::Result;
use crate::kernel::blur_row;
use crate::pixel::PixelBuffer;

/// Single-threaded reference blur.
///
/// Buffers without an interior come back as an exact copy.
pub fn sequential_blur(input: &PixelBuffer) -> PixelBuffer {
    let mut output = input.clone();
    if !input.has_interior() {
        return output;
    }

    let width = input.width();
    let pixels = output.pixels_mut();
    for y in 1..input.height() - 1 {
        blur_row(input, y, &mut pixels[y * width..(y + 1) * width]);
    }
    output
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialBlurEngine;

impl BlurEngine for SequentialBlurEngine {
    fn name(&self) -> String {
        "sequential".to_string()
    }

    fn blur(&self, input: &PixelBuffer) -> Result<PixelBuffer> {
        Ok(sequential_blur(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Color;

    #[test]
    fn test_zero_buffer_stays_zero() {
        let input = PixelBuffer::filled(5, 5, Color::BLACK).unwrap();
        assert_eq!(sequential_blur(&input), input);
    }

    #[test]
    fn test_uniform_buffer_is_fixed_point() {
        let input = PixelBuffer::filled(17, 9, Color::new(12, 200, 77)).unwrap();
        assert_eq!(sequential_blur(&input), input);
    }

    #[test]
    fn test_single_bright_pixel_spreads() {
        // 5x5 black with one 90-valued pixel in the center
        let mut pixels = vec![Color::BLACK; 25];
        pixels[2 * 5 + 2] = Color::new(90, 90, 90);
        let input = PixelBuffer::from_vec(5, 5, pixels).unwrap();

        let output = sequential_blur(&input);

        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(output.get(x, y), Some(Color::new(10, 10, 10)));
            }
        }
        assert_eq!(output.get(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_border_copied_verbatim() {
        let pixels = (0..30u8).map(|v| Color::new(v * 8, v, 255 - v)).collect();
        let input = PixelBuffer::from_vec(6, 5, pixels).unwrap();

        let output = sequential_blur(&input);

        for y in 0..5 {
            for x in 0..6 {
                if input.is_border(x, y) {
                    assert_eq!(output.get(x, y), input.get(x, y), "border ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_degenerate_buffer_is_copied() {
        let pixels = (0..10u8).map(|v| Color::new(v, v, v)).collect();
        let input = PixelBuffer::from_vec(2, 5, pixels).unwrap();
        assert_eq!(sequential_blur(&input), input);
    }
}
