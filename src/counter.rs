//! Atomic vs mutex increment benchmark.
//!
//! Each trial shares one counter between `workers` threads through an `Arc`
//! handed over at spawn time. Every worker performs `iterations` increments,
//! and the trial fails if the final value is not exactly
//! `workers * iterations`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const DEFAULT_WORKERS: usize = 2;
pub const DEFAULT_ITERATIONS: u64 = 100_000;

/// Integer counter that can be bumped from many threads at once.
pub trait SharedCounter: Send + Sync {
    /// Label for logs and reports.
    const STRATEGY: &'static str;

    fn increment(&self);

    fn value(&self) -> u64;
}

/// Lock-free counter backed by `fetch_add`.
#[derive(Debug, Default)]
pub struct AtomicCounter(AtomicU64);

impl AtomicCounter {
    pub fn new() -> Self {
        AtomicCounter(AtomicU64::new(0))
    }
}

impl SharedCounter for AtomicCounter {
    const STRATEGY: &'static str = "atomic";

    #[inline]
    fn increment(&self) {
        // RMW on one location never loses updates; join() orders the final load
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    fn value(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }
}

/// Plain integer behind a mutex, locked once per increment.
#[derive(Debug, Default)]
pub struct MutexCounter(Mutex<u64>);

impl MutexCounter {
    pub fn new() -> Self {
        MutexCounter(Mutex::new(0))
    }
}

impl SharedCounter for MutexCounter {
    const STRATEGY: &'static str = "mutex";

    #[inline]
    fn increment(&self) {
        // a poisoned lock still holds a valid count
        let mut count = self.0.lock().unwrap_or_else(|poisoned| {
            warn!("counter mutex poisoned, recovering");
            poisoned.into_inner()
        });
        *count += 1;
    }

    fn value(&self) -> u64 {
        *self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Outcome of one timed trial.
#[derive(Debug, Clone)]
pub struct TrialResult {
    pub strategy: &'static str,
    pub workers: usize,
    pub iterations: u64,
    pub final_value: u64,
    pub elapsed: Duration,
}

impl TrialResult {
    pub fn expected(&self) -> u64 {
        self.workers as u64 * self.iterations
    }
}

/// Spawn `workers` threads that each increment `counter` `iterations` times.
///
/// The timed window spans spawn through the last join. Returns
/// `LostUpdates` if the final count is off.
pub fn run_trial<C>(counter: Arc<C>, workers: usize, iterations: u64) -> Result<TrialResult>
where
    C: SharedCounter + 'static,
{
    if workers == 0 {
        return Err(Error::invalid("counter worker count must be positive"));
    }

    let start = Instant::now();
    let mut handles = Vec::with_capacity(workers);
    let mut first_error = None;

    for worker in 0..workers {
        let counter = Arc::clone(&counter);
        let spawned = thread::Builder::new()
            .name(format!("{}-{}", C::STRATEGY, worker))
            .spawn(move || {
                for _ in 0..iterations {
                    counter.increment();
                }
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
    let elapsed = start.elapsed();

    if let Some(err) = first_error {
        return Err(err);
    }

    let result = TrialResult {
        strategy: C::STRATEGY,
        workers,
        iterations,
        final_value: counter.value(),
        elapsed,
    };
    if result.final_value != result.expected() {
        return Err(Error::LostUpdates {
            strategy: C::STRATEGY,
            expected: result.expected(),
            actual: result.final_value,
        });
    }

    debug!(
        strategy = result.strategy,
        workers,
        iterations,
        elapsed_us = elapsed.as_micros() as u64,
        "trial finished"
    );
    Ok(result)
}

/// Both trials of one benchmark run.
#[derive(Debug, Clone)]
pub struct CounterReport {
    pub atomic: TrialResult,
    pub mutex: TrialResult,
}

#[derive(Debug, Clone, Copy)]
pub struct CounterBenchmark {
    pub workers: usize,
    pub iterations: u64,
}

impl Default for CounterBenchmark {
    fn default() -> Self {
        CounterBenchmark {
            workers: DEFAULT_WORKERS,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl CounterBenchmark {
    pub fn new(workers: usize, iterations: u64) -> Self {
        CounterBenchmark {
            workers,
            iterations,
        }
    }

    /// Atomic trial first, then mutex trial, each on a fresh counter.
    pub fn run(&self) -> Result<CounterReport> {
        let atomic = run_trial(Arc::new(AtomicCounter::new()), self.workers, self.iterations)?;
        let mutex = run_trial(Arc::new(MutexCounter::new()), self.workers, self.iterations)?;
        Ok(CounterReport { atomic, mutex })
    }
}
