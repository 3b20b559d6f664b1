//! Row partitioning for the threaded blur.
//!
//! Interior rows `[1, height - 1)` are cut into contiguous half-open ranges,
//! one per worker. Rows 0 and `height - 1` belong to no partition: they are
//! border rows, copied into the output before any worker starts.

use std::ops::Range;

use itertools::Itertools;
use tracing::warn;

use crate::error::{Error, Result};

/// Half-open row range `[start_row, end_row)` owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start_row: usize,
    pub end_row: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end_row - self.start_row
    }

    pub fn is_empty(&self) -> bool {
        self.start_row >= self.end_row
    }

    pub fn rows(&self) -> Range<usize> {
        self.start_row..self.end_row
    }

    pub fn overlaps(&self, other: &Partition) -> bool {
        self.start_row < other.end_row && other.start_row < self.end_row
    }
}

/// Split the interior rows of a `height`-row buffer across `workers`.
///
/// Each worker gets `interior / workers` rows and the last one also takes the
/// remainder. A worker count above the number of interior rows is clamped so
/// that no partition is empty.
pub fn partition_rows(height: usize, workers: usize) -> Result<Vec<Partition>> {
    if workers == 0 {
        return Err(Error::invalid("worker count must be positive"));
    }
    if height < 3 {
        return Err(Error::invalid(format!(
            "buffer height {} has no interior rows",
            height
        )));
    }

    let interior = height - 2;
    let workers = if workers > interior {
        warn!(
            requested = workers,
            clamped = interior,
            "more workers than interior rows, clamping"
        );
        interior
    } else {
        workers
    };

    let rows_per_worker = interior / workers;
    let partitions: Vec<Partition> = (0..workers)
        .map(|i| {
            let start_row = 1 + i * rows_per_worker;
            let end_row = if i + 1 == workers {
                height - 1
            } else {
                start_row + rows_per_worker
            };
            Partition { start_row, end_row }
        })
        .collect();

    validate_partitions(&partitions, height)?;
    Ok(partitions)
}

/// Check that `partitions` are non-empty, in order, back to back, and cover
/// exactly `[1, height - 1)`.
pub fn validate_partitions(partitions: &[Partition], height: usize) -> Result<()> {
    let (first, last) = match (partitions.first(), partitions.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::invalid("no partitions")),
    };

    if first.start_row != 1 {
        return Err(Error::invalid(format!(
            "first partition starts at row {}, expected 1",
            first.start_row
        )));
    }
    if last.end_row != height.saturating_sub(1) {
        return Err(Error::invalid(format!(
            "last partition ends at row {}, expected {}",
            last.end_row,
            height.saturating_sub(1)
        )));
    }
    if let Some(p) = partitions.iter().find(|p| p.is_empty()) {
        return Err(Error::invalid(format!(
            "empty partition [{}, {})",
            p.start_row, p.end_row
        )));
    }
    if let Some((a, b)) = partitions
        .iter()
        .tuple_windows()
        .find(|(a, b)| a.end_row != b.start_row)
    {
        return Err(Error::invalid(format!(
            "partitions [{}, {}) and [{}, {}) are not contiguous",
            a.start_row, a.end_row, b.start_row, b.end_row
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(start_row: usize, end_row: usize) -> Partition {
        Partition { start_row, end_row }
    }

    #[test]
    fn test_reference_layout() {
        // 1080 rows, 4 workers: 1078 interior rows, 269 each, last takes 2 extra
        let parts = partition_rows(1080, 4).unwrap();
        assert_eq!(
            parts,
            vec![p(1, 270), p(270, 539), p(539, 808), p(808, 1079)]
        );
        assert_eq!(parts[3].len(), 271);
    }

    #[test]
    fn test_single_worker_takes_all_interior() {
        assert_eq!(partition_rows(10, 1).unwrap(), vec![p(1, 9)]);
    }

    #[test]
    fn test_minimal_buffer() {
        assert_eq!(partition_rows(3, 1).unwrap(), vec![p(1, 2)]);
    }

    #[test]
    fn test_clamps_excess_workers() {
        let parts = partition_rows(5, 8).unwrap();
        assert_eq!(parts, vec![p(1, 2), p(2, 3), p(3, 4)]);
    }

    #[test]
    fn test_rejects_zero_workers() {
        assert!(matches!(
            partition_rows(10, 0).unwrap_err(),
            Error::InvalidConfiguration(_)
        ));
    }

    #[test]
    fn test_rejects_short_buffer() {
        assert!(partition_rows(2, 1).is_err());
        assert!(partition_rows(0, 1).is_err());
    }

    #[test]
    fn test_never_touches_border_rows() {
        for height in 3..64 {
            for workers in 1..12 {
                let parts = partition_rows(height, workers).unwrap();
                for part in &parts {
                    assert!(!part.rows().contains(&0));
                    assert!(!part.rows().contains(&(height - 1)));
                }
                for (i, a) in parts.iter().enumerate() {
                    for b in &parts[i + 1..] {
                        assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
                    }
                }
                let covered: usize = parts.iter().map(Partition::len).sum();
                assert_eq!(covered, height - 2);
            }
        }
    }

    #[test]
    fn test_validate_rejects_gap() {
        let err = validate_partitions(&[p(1, 4), p(5, 9)], 10).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_validate_rejects_overlap() {
        assert!(validate_partitions(&[p(1, 5), p(4, 9)], 10).is_err());
    }

    #[test]
    fn test_validate_rejects_border_rows() {
        assert!(validate_partitions(&[p(0, 9)], 10).is_err());
        assert!(validate_partitions(&[p(1, 10)], 10).is_err());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_partitions(&[], 10).is_err());
        assert!(validate_partitions(&[p(1, 1), p(1, 9)], 10).is_err());
    }
}
