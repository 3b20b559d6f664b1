use crate::error::{Error, Result};

/// One RGB sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/// Row-major RGB image with dimensions fixed at construction.
///
/// Pixels live in one contiguous `Vec`, so a row is the slice
/// `[y * width, (y + 1) * width)`. Buffers smaller than 3x3 can be built,
/// they just have no interior to blur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Build from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(Error::invalid("buffer must have at least one row and one column"));
        }

        let mut pixels = Vec::with_capacity(width * height);
        for (row, samples) in rows.into_iter().enumerate() {
            if samples.len() != width {
                return Err(Error::MalformedBuffer {
                    row,
                    expected: width,
                    actual: samples.len(),
                });
            }
            pixels.extend(samples);
        }

        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }

    pub fn from_vec(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid(format!(
                "buffer dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| Error::invalid("buffer dimensions overflow"))?;
        if pixels.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: usize, height: usize, color: Color) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .ok_or_else(|| Error::invalid("buffer dimensions overflow"))?;
        Self::from_vec(width, height, vec![color; len])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of rows the convolution recomputes.
    pub fn interior_rows(&self) -> usize {
        self.height.saturating_sub(2)
    }

    pub fn has_interior(&self) -> bool {
        self.width >= 3 && self.height >= 3
    }

    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn row(&self, y: usize) -> &[Color] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, Color> {
        self.pixels.chunks(self.width)
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }
}
