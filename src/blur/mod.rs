//! Box-blur engines.
//!
//! Every engine allocates a fresh output that starts as a copy of the input,
//! then overwrites interior pixels only. The input is never mutated.

pub mod partition;
pub mod rayon_engine;
pub mod sequential;
pub mod threaded;

pub use partition::{partition_rows, validate_partitions, Partition};
pub use rayon_engine::RayonBlurEngine;
pub use sequential::{sequential_blur, SequentialBlurEngine};
pub use threaded::ParallelBlurEngine;

use crate::error::Result;
use crate::pixel::PixelBuffer;

/// Common surface so callers can time and compare engines uniformly.
pub trait BlurEngine {
    /// Short label used in logs and reports.
    fn name(&self) -> String;

    fn blur(&self, input: &PixelBuffer) -> Result<PixelBuffer>;
}
