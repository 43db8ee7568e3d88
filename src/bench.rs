//! Timing harness: repeated single-shot blends on the reference fixture.

use std::time::{Duration, Instant};

use crate::blend::Strategy;
use crate::blend::parallel::{ParallelBlender, ParallelOpts};
use crate::buffer::PixelBuffer;
use crate::foundation::core::{Dimensions, Rgba8};
use crate::foundation::error::{BlendError, BlendResult};
use crate::synth::{REFERENCE_DIMS, reference_pair};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BenchConfig {
    pub dims: Dimensions,
    pub warmup: u32,
    pub repeats: u32,
    pub strategies: Vec<Strategy>,
    /// `None` runs the kernel on the calling thread.
    pub parallel: Option<ParallelOpts>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dims: REFERENCE_DIMS,
            warmup: 1,
            repeats: 100,
            strategies: Strategy::ALL.to_vec(),
            parallel: None,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> BlendResult<()> {
        if self.dims.is_empty() {
            return Err(BlendError::validation("bench width/height must be > 0"));
        }
        if self.repeats == 0 {
            return Err(BlendError::validation("bench repeats must be >= 1"));
        }
        if self.strategies.is_empty() {
            return Err(BlendError::validation("bench needs at least one strategy"));
        }
        self.dims.byte_len()?;
        Ok(())
    }
}

/// One timed invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSample {
    pub elapsed: Duration,
    /// Pixel 0 after blending; a cheap regression signal.
    pub first_pixel: Rgba8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Percentiles {
    pub min_ns: u64,
    pub p50_ns: u64,
    pub p90_ns: u64,
    pub p99_ns: u64,
    pub max_ns: u64,
    pub mean_ns: u64,
}

impl Percentiles {
    pub fn from_durations(samples: &[Duration]) -> Self {
        let mut v = samples.to_vec();
        v.sort_unstable();
        let Some((&min, &max)) = v.first().zip(v.last()) else {
            return Self::default();
        };
        let total: u128 = v.iter().map(Duration::as_nanos).sum();
        Self {
            min_ns: as_ns(min),
            p50_ns: as_ns(percentile(&v, 0.50)),
            p90_ns: as_ns(percentile(&v, 0.90)),
            p99_ns: as_ns(percentile(&v, 0.99)),
            max_ns: as_ns(max),
            mean_ns: u64::try_from(total / v.len() as u128).unwrap_or(u64::MAX),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StrategyReport {
    pub strategy: String,
    pub runs: u32,
    pub first_pixel: Rgba8,
    pub percentiles: Percentiles,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BenchReport {
    pub config: BenchConfig,
    /// Worker count when running in parallel.
    pub threads: Option<usize>,
    pub results: Vec<StrategyReport>,
}

/// Nearest-rank percentile over an ascending slice. Empty input yields zero.
pub fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let n = sorted.len();
    let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
    sorted[rank - 1]
}

fn as_ns(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// Blends a fresh copy of `dst` and times only the kernel call.
pub fn run_once(
    strategy: Strategy,
    blender: Option<&ParallelBlender>,
    dst: &PixelBuffer,
    src: &PixelBuffer,
) -> BlendResult<RunSample> {
    let mut out = dst.clone();
    let dims = out.dimensions();

    let t0 = Instant::now();
    match blender {
        Some(b) => b.blend_in_place(out.as_bytes_mut(), src.as_bytes(), dims, strategy)?,
        None => out.blend_from(src, strategy)?,
    }
    let elapsed = t0.elapsed();

    let first_pixel = out.pixel(0).unwrap_or_default();
    Ok(RunSample {
        elapsed,
        first_pixel,
    })
}

#[tracing::instrument(skip(cfg), fields(dims = %cfg.dims, repeats = cfg.repeats))]
pub fn run_bench(cfg: &BenchConfig) -> BlendResult<BenchReport> {
    cfg.validate()?;

    let (dst, src) = reference_pair(cfg.dims)?;
    let blender = cfg.parallel.map(ParallelBlender::new).transpose()?;
    let threads = blender.as_ref().map(ParallelBlender::threads);

    let mut results = Vec::with_capacity(cfg.strategies.len());
    for &strategy in &cfg.strategies {
        for _ in 0..cfg.warmup {
            run_once(strategy, blender.as_ref(), &dst, &src)?;
        }

        let mut elapsed = Vec::with_capacity(cfg.repeats as usize);
        let mut first_pixel: Rgba8 = [0; 4];
        for _ in 0..cfg.repeats {
            let sample = run_once(strategy, blender.as_ref(), &dst, &src)?;
            elapsed.push(sample.elapsed);
            first_pixel = sample.first_pixel;
        }

        let percentiles = Percentiles::from_durations(&elapsed);
        tracing::info!(
            %strategy,
            p50_ns = percentiles.p50_ns,
            ?first_pixel,
            "strategy timed"
        );
        results.push(StrategyReport {
            strategy: strategy.to_string(),
            runs: cfg.repeats,
            first_pixel,
            percentiles,
        });
    }

    Ok(BenchReport {
        config: cfg.clone(),
        threads,
        results,
    })
}

#[cfg(test)]
#[path = "../tests/unit/bench.rs"]
mod tests;
