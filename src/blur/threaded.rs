//! Thread-per-partition blur.
//!
//! The output buffer is cut into disjoint `&mut` row slices with
//! `split_at_mut`, one per partition, so workers write without locks while
//! sharing the input by plain reference. All workers run inside
//! `thread::scope` and are joined explicitly before the output is returned.

use std::thread;

use tracing::debug;

use crate::blur::partition::{partition_rows, Partition};
use crate::blur::BlurEngine;
use crate::error::{Error, Result};
use crate::kernel::blur_row;
use crate::pixel::{Color, PixelBuffer};

#[derive(Debug, Clone, Copy)]
pub struct ParallelBlurEngine {
    workers: usize,
}

impl ParallelBlurEngine {
    pub fn new(workers: usize) -> Self {
        ParallelBlurEngine { workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Blur `input` with one OS thread per row partition.
    ///
    /// Fails with `InvalidConfiguration` for a zero worker count or a buffer
    /// without interior pixels, and with `WorkerPanicked` if any worker dies.
    /// On failure no output is returned.
    pub fn blur(&self, input: &PixelBuffer) -> Result<PixelBuffer> {
        if !input.has_interior() {
            return Err(Error::invalid(format!(
                "buffer {}x{} is smaller than 3x3",
                input.width(),
                input.height()
            )));
        }
        let partitions = partition_rows(input.height(), self.workers)?;

        let mut output = input.clone();
        run_partitions(input, &partitions, &mut output, blur_partition)?;
        Ok(output)
    }
}

impl BlurEngine for ParallelBlurEngine {
    fn name(&self) -> String {
        format!("threads-{}", self.workers)
    }

    fn blur(&self, input: &PixelBuffer) -> Result<PixelBuffer> {
        ParallelBlurEngine::blur(self, input)
    }
}

fn blur_partition(input: &PixelBuffer, partition: Partition, rows: &mut [Color]) {
    for (y, out_row) in partition.rows().zip(rows.chunks_mut(input.width())) {
        blur_row(input, y, out_row);
    }
}

/// Hand each partition's output rows to its own worker and join them all.
///
/// `partitions` must already be validated. `work` receives the partition and
/// exactly the output rows it covers.
fn run_partitions<F>(
    input: &PixelBuffer,
    partitions: &[Partition],
    output: &mut PixelBuffer,
    work: F,
) -> Result<()>
where
    F: Fn(&PixelBuffer, Partition, &mut [Color]) + Sync,
{
    let width = input.width();

    // skip border row 0, then peel off one slice per partition
    let (_, mut rest) = output.pixels_mut().split_at_mut(width);
    let mut slices = Vec::with_capacity(partitions.len());
    for &partition in partitions {
        let (rows, tail) = std::mem::take(&mut rest).split_at_mut(partition.len() * width);
        slices.push((partition, rows));
        rest = tail;
    }

    let work = &work;
    thread::scope(|s| {
        let mut handles = Vec::with_capacity(slices.len());
        let mut first_error = None;

        for (worker, (partition, rows)) in slices.into_iter().enumerate() {
            let spawned = thread::Builder::new()
                .name(format!("blur-{}", worker))
                .spawn_scoped(s, move || {
                    debug!(
                        worker,
                        start_row = partition.start_row,
                        end_row = partition.end_row,
                        "blurring partition"
                    );
                    work(input, partition, rows);
                });
            match spawned {
                Ok(handle) => handles.push((worker, handle)),
                Err(source) => {
                    first_error = Some(Error::SpawnFailed { worker, source });
                    break;
                }
            }
        }

        for (worker, handle) in handles {
            if handle.join().is_err() && first_error.is_none() {
                first_error = Some(Error::WorkerPanicked { worker });
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    })
}
