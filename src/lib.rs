//! Row-partitioned parallel box blur, and an atomic vs mutex counter
//! benchmark.
//!
//! ```no_run
//! use parallel_blur::blur::{sequential_blur, ParallelBlurEngine};
//! use parallel_blur::generate::seeded_buffer;
//!
//! let image = seeded_buffer(1920, 1080, 42)?;
//! let parallel = ParallelBlurEngine::new(4).blur(&image)?;
//! assert_eq!(parallel, sequential_blur(&image));
//! # Ok::<(), parallel_blur::Error>(())
//! ```

pub mod blur;
pub mod config;
pub mod counter;
pub mod error;
pub mod generate;
pub mod kernel;
pub mod pixel;
pub mod report;

pub use error::{Error, Result};
pub use pixel::{Color, PixelBuffer};
