//! The `over` kernel: source RGBA8 composited onto an opaque destination, in place.
//!
//! For every pixel and each of R, G, B:
//!
//! ```text
//! out = (src * src_a + dst * (255 - src_a)) >> 8
//! ```
//!
//! The shift divides by 256 rather than 255, so results sit at most one unit below the exact
//! 255-divisor blend (an opaque source channel of 217 lands on 216). Both strategies share this
//! approximation and produce byte-identical output. Destination alpha is neither read nor written.

pub(crate) mod batched;
pub(crate) mod parallel;
pub(crate) mod scalar;

use crate::foundation::core::{CHANNELS, Dimensions, Rgba8};
use crate::foundation::error::{BlendError, BlendResult};

pub use batched::{BatchedKernel, LaneWidth};
pub use scalar::ScalarKernel;

/// A blend implementation over whole-pixel slices.
///
/// Callers guarantee `dst.len() == src.len()`; implementations zip the two and never index past
/// the shorter one.
pub trait BlendKernel: Send + Sync {
    fn name(&self) -> &'static str;

    fn blend_pixels(&self, dst: &mut [Rgba8], src: &[Rgba8]);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Scalar,
    Batched(LaneWidth),
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Scalar,
        Strategy::Batched(LaneWidth::X4),
        Strategy::Batched(LaneWidth::X8),
        Strategy::Batched(LaneWidth::X16),
    ];

    pub fn kernel(self) -> &'static dyn BlendKernel {
        match self {
            Strategy::Scalar => &ScalarKernel,
            Strategy::Batched(LaneWidth::X4) => &BatchedKernel::<4>,
            Strategy::Batched(LaneWidth::X8) => &BatchedKernel::<8>,
            Strategy::Batched(LaneWidth::X16) => &BatchedKernel::<16>,
        }
    }

    pub fn name(self) -> &'static str {
        self.kernel().name()
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Batched(LaneWidth::default())
    }
}

impl std::str::FromStr for Strategy {
    type Err = BlendError;

    /// Accepts `scalar`, `batched` (default lane width) and `batched4`/`batched8`/`batched16`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Strategy::Scalar),
            "batched" => Ok(Strategy::Batched(LaneWidth::default())),
            "batched4" => Ok(Strategy::Batched(LaneWidth::X4)),
            "batched8" => Ok(Strategy::Batched(LaneWidth::X8)),
            "batched16" => Ok(Strategy::Batched(LaneWidth::X16)),
            other => Err(BlendError::validation(format!(
                "unknown strategy '{other}' (expected scalar, batched, batched4, batched8 or batched16)"
            ))),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Checks the buffer contract before any byte is written.
pub(crate) fn validate_buffers(
    dst_len: usize,
    src_len: usize,
    dims: Dimensions,
) -> BlendResult<()> {
    if dst_len != src_len {
        return Err(BlendError::validation(format!(
            "buffer length mismatch: destination has {dst_len} bytes, source has {src_len}"
        )));
    }
    if !dst_len.is_multiple_of(CHANNELS) {
        return Err(BlendError::validation(format!(
            "length not a multiple of 4: {dst_len} bytes"
        )));
    }
    let expected = dims.byte_len()?;
    if dst_len != expected {
        return Err(BlendError::validation(format!(
            "buffer length {dst_len} does not match {dims} rgba8 ({expected} bytes)"
        )));
    }
    Ok(())
}

/// Blends `src` over `dst` in place with the chosen strategy.
///
/// Fails without touching `dst` when the buffers differ in length, hold a partial pixel, or do
/// not match `dims`.
#[tracing::instrument(level = "debug", skip(dst, src), fields(bytes = dst.len()))]
pub fn blend_in_place(
    dst: &mut [u8],
    src: &[u8],
    dims: Dimensions,
    strategy: Strategy,
) -> BlendResult<()> {
    validate_buffers(dst.len(), src.len(), dims)?;
    let (dst_px, _) = dst.as_chunks_mut::<CHANNELS>();
    let (src_px, _) = src.as_chunks::<CHANNELS>();
    strategy.kernel().blend_pixels(dst_px, src_px);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/blend/mod.rs"]
mod tests;
