//! 3x3 box filter.
//!
//! Only interior pixels are computed here. Callers start from a full copy of
//! the input, so border pixels keep their original value.

use crate::pixel::{Color, PixelBuffer};

pub const KERNEL_SIZE: u32 = 9;

/// Mean of the 3x3 neighborhood centered at `(x, y)`, truncated per channel.
///
/// `(x, y)` must be an interior pixel.
#[inline]
pub fn box_average(input: &PixelBuffer, x: usize, y: usize) -> Color {
    let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
    for row in &[input.row(y - 1), input.row(y), input.row(y + 1)] {
        for c in &row[x - 1..=x + 1] {
            r += c.r as u32;
            g += c.g as u32;
            b += c.b as u32;
        }
    }

    Color {
        r: (r / KERNEL_SIZE) as u8,
        g: (g / KERNEL_SIZE) as u8,
        b: (b / KERNEL_SIZE) as u8,
    }
}

/// Blur interior columns of row `y` into `out_row`.
///
/// Columns 0 and `width - 1` of `out_row` are left as they are.
pub fn blur_row(input: &PixelBuffer, y: usize, out_row: &mut [Color]) {
    debug_assert_eq!(out_row.len(), input.width());
    let width = input.width();
    for x in 1..width - 1 {
        out_row[x] = box_average(input, x, y);
    }
}
