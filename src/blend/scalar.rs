use crate::blend::BlendKernel;
use crate::foundation::core::{A, B, G, R, Rgba8};
use crate::foundation::math::over_channel;

/// One pixel, one channel at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarKernel;

impl BlendKernel for ScalarKernel {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn blend_pixels(&self, dst: &mut [Rgba8], src: &[Rgba8]) {
        for (d, s) in dst.iter_mut().zip(src) {
            blend_pixel(d, s);
        }
    }
}

#[inline(always)]
pub(crate) fn blend_pixel(dst: &mut Rgba8, src: &Rgba8) {
    let a = src[A];
    for c in [R, G, B] {
        dst[c] = over_channel(src[c], dst[c], a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/scalar.rs"]
mod tests;
