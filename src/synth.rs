//! Synthetic inputs for the driver, benchmarks and equivalence checks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::buffer::PixelBuffer;
use crate::foundation::core::{Dimensions, Rgba8};
use crate::foundation::error::BlendResult;

/// Destination color of the reference fixture.
pub const REFERENCE_DST: Rgba8 = [101, 102, 103, 255];
/// Source color of the reference fixture.
pub const REFERENCE_SRC: Rgba8 = [10, 217, 100, 123];
/// [`REFERENCE_SRC`] over [`REFERENCE_DST`].
pub const REFERENCE_OUT: Rgba8 = [56, 156, 101, 255];

/// Default fixture size.
pub const REFERENCE_DIMS: Dimensions = Dimensions {
    width: 1920,
    height: 1200,
};

/// Solid `(destination, source)` buffers filled with the reference colors.
pub fn reference_pair(dims: Dimensions) -> BlendResult<(PixelBuffer, PixelBuffer)> {
    Ok((
        PixelBuffer::filled(dims, REFERENCE_DST)?,
        PixelBuffer::filled(dims, REFERENCE_SRC)?,
    ))
}

/// Every byte drawn uniformly from `rng`, alpha included.
pub fn random_buffer(dims: Dimensions, rng: &mut impl Rng) -> BlendResult<PixelBuffer> {
    let mut buf = PixelBuffer::new(dims)?;
    rng.fill(buf.as_bytes_mut());
    Ok(buf)
}

/// Deterministic random `(destination, source)` buffers for `seed`.
pub fn random_pair(dims: Dimensions, seed: u64) -> BlendResult<(PixelBuffer, PixelBuffer)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dst = random_buffer(dims, &mut rng)?;
    let src = random_buffer(dims, &mut rng)?;
    Ok((dst, src))
}

/// Source with random color and every alpha forced to `alpha`.
pub fn random_with_alpha(dims: Dimensions, alpha: u8, seed: u64) -> BlendResult<PixelBuffer> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buf = random_buffer(dims, &mut rng)?;
    for px in buf.as_pixels_mut() {
        px[3] = alpha;
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../tests/unit/synth.rs"]
mod tests;
