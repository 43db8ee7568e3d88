use rayon::prelude::*;

use crate::blend::{Strategy, validate_buffers};
use crate::foundation::core::{CHANNELS, Dimensions};
use crate::foundation::error::{BlendError, BlendResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParallelOpts {
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Rows handed to one worker at a time. `0` is treated as `1`.
    pub rows_per_band: usize,
}

impl Default for ParallelOpts {
    fn default() -> Self {
        Self {
            threads: None,
            rows_per_band: 64,
        }
    }
}

/// Blends disjoint row bands on a dedicated rayon pool.
///
/// Pixels never depend on each other, so bands need no synchronization beyond the final join and
/// the output matches the sequential kernel byte for byte.
pub struct ParallelBlender {
    pool: rayon::ThreadPool,
    rows_per_band: usize,
}

impl ParallelBlender {
    pub fn new(opts: ParallelOpts) -> BlendResult<Self> {
        Ok(Self {
            pool: build_thread_pool(opts.threads)?,
            rows_per_band: opts.rows_per_band.max(1),
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn rows_per_band(&self) -> usize {
        self.rows_per_band
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, dst, src),
        fields(bytes = dst.len(), threads = self.threads())
    )]
    pub fn blend_in_place(
        &self,
        dst: &mut [u8],
        src: &[u8],
        dims: Dimensions,
        strategy: Strategy,
    ) -> BlendResult<()> {
        validate_buffers(dst.len(), src.len(), dims)?;
        if dst.is_empty() {
            return Ok(());
        }

        let band_bytes = dims.row_bytes().saturating_mul(self.rows_per_band);
        let kernel = strategy.kernel();
        self.pool.install(|| {
            dst.par_chunks_mut(band_bytes)
                .zip(src.par_chunks(band_bytes))
                .for_each(|(d, s)| {
                    let (d, _) = d.as_chunks_mut::<CHANNELS>();
                    let (s, _) = s.as_chunks::<CHANNELS>();
                    kernel.blend_pixels(d, s);
                });
        });
        Ok(())
    }
}

/// One-shot parallel blend. Builds a fresh pool; keep a [`ParallelBlender`] around for repeated
/// calls.
pub fn blend_parallel(
    dst: &mut [u8],
    src: &[u8],
    dims: Dimensions,
    strategy: Strategy,
    opts: ParallelOpts,
) -> BlendResult<()> {
    ParallelBlender::new(opts)?.blend_in_place(dst, src, dims, strategy)
}

fn build_thread_pool(threads: Option<usize>) -> BlendResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BlendError::validation(
            "parallel 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BlendError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/blend/parallel.rs"]
mod tests;
