//! Timing collection and rendering.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::blur::{sequential_blur, BlurEngine};
use crate::counter::{CounterReport, TrialResult};
use crate::error::Result;
use crate::pixel::PixelBuffer;

pub const REFERENCE_ENGINE: &str = "sequential";

#[derive(Debug, Clone, Serialize)]
pub struct BlurTiming {
    pub engine: String,
    pub elapsed_us: u64,
    /// Output identical to the sequential reference.
    pub matches_reference: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrialTiming {
    pub strategy: &'static str,
    pub workers: usize,
    pub iterations: u64,
    pub final_value: u64,
    pub elapsed_us: u64,
}

impl From<&TrialResult> for TrialTiming {
    fn from(trial: &TrialResult) -> Self {
        TrialTiming {
            strategy: trial.strategy,
            workers: trial.workers,
            iterations: trial.iterations,
            final_value: trial.final_value,
            elapsed_us: micros(trial.elapsed),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub width: usize,
    pub height: usize,
    pub blur: Vec<BlurTiming>,
    pub counter: Vec<TrialTiming>,
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

/// Time the sequential reference, then each engine, checking every output
/// against the reference.
pub fn time_blur_engines(input: &PixelBuffer, engines: &[&dyn BlurEngine]) -> Result<Vec<BlurTiming>> {
    let start = Instant::now();
    let reference = sequential_blur(input);
    let reference_elapsed = start.elapsed();
    info!(
        engine = REFERENCE_ENGINE,
        elapsed_ms = reference_elapsed.as_millis() as u64,
        "blur finished"
    );

    let mut timings = vec![BlurTiming {
        engine: REFERENCE_ENGINE.to_string(),
        elapsed_us: micros(reference_elapsed),
        matches_reference: true,
    }];

    for engine in engines {
        let start = Instant::now();
        let output = engine.blur(input)?;
        let elapsed = start.elapsed();
        info!(
            engine = %engine.name(),
            elapsed_ms = elapsed.as_millis() as u64,
            "blur finished"
        );
        timings.push(BlurTiming {
            engine: engine.name(),
            elapsed_us: micros(elapsed),
            matches_reference: output == reference,
        });
    }
    Ok(timings)
}

impl RunReport {
    pub fn new(width: usize, height: usize) -> Self {
        RunReport {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn record_counter(&mut self, counter: &CounterReport) {
        self.counter.push(TrialTiming::from(&counter.atomic));
        self.counter.push(TrialTiming::from(&counter.mutex));
    }

    pub fn all_outputs_match(&self) -> bool {
        self.blur.iter().all(|t| t.matches_reference)
    }

    fn reference_us(&self) -> Option<u64> {
        self.blur
            .iter()
            .find(|t| t.engine == REFERENCE_ENGINE)
            .map(|t| t.elapsed_us)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if !self.blur.is_empty() {
            let _ = writeln!(
                out,
                "{}",
                format!("Box blur {}x{}", self.width, self.height).bold()
            );
            let reference = self.reference_us();
            for timing in &self.blur {
                let speedup = match reference {
                    Some(r) if timing.elapsed_us > 0 => {
                        format!("x{:.2}", r as f64 / timing.elapsed_us as f64)
                    }
                    _ => "-".to_string(),
                };
                let verdict = if timing.matches_reference {
                    "ok".green()
                } else {
                    "MISMATCH".red().bold()
                };
                let _ = writeln!(
                    out,
                    "  {:<12} {:>10.3} ms  {:>7}  {}",
                    timing.engine,
                    timing.elapsed_us as f64 / 1000.0,
                    speedup,
                    verdict
                );
            }
        }

        if !self.counter.is_empty() {
            let _ = writeln!(out, "{}", "Shared counter".bold());
            for trial in &self.counter {
                let _ = writeln!(
                    out,
                    "  {:<12} {:>10} us  {} x {} -> {}",
                    trial.strategy,
                    trial.elapsed_us,
                    trial.workers,
                    trial.iterations,
                    trial.final_value.to_string().cyan()
                );
            }
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
