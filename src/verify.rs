//! Cross-checks every strategy against the scalar kernel on random buffers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::blend::Strategy;
use crate::blend::parallel::ParallelBlender;
use crate::buffer::PixelBuffer;
use crate::foundation::core::{Dimensions, Rgba8};
use crate::foundation::error::BlendResult;
use crate::foundation::math::max_div255_deviation;
use crate::synth::random_pair;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Mismatch {
    pub case: usize,
    pub dims: Dimensions,
    /// Strategy name, suffixed with `+parallel` for the rayon path.
    pub strategy: String,
    pub pixel: usize,
    pub expected: Rgba8,
    pub actual: Rgba8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VerifyReport {
    pub cases: usize,
    pub pixels: u64,
    /// Cases where destination alpha changed under the scalar kernel.
    pub alpha_mutations: usize,
    /// Largest gap between the scalar output and exact 255-divisor blending. Expected <= 1.
    pub max_div255_deviation: u8,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty() && self.alpha_mutations == 0 && self.max_div255_deviation <= 1
    }
}

/// Runs `cases` random cases with sizes chosen so that most pixel counts are not a multiple of
/// any lane width.
#[tracing::instrument(skip(parallel))]
pub fn verify_strategies(
    seed: u64,
    cases: usize,
    parallel: Option<&ParallelBlender>,
) -> BlendResult<VerifyReport> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = VerifyReport {
        cases,
        ..VerifyReport::default()
    };

    for case in 0..cases {
        let dims = Dimensions::new(rng.random_range(1..=67), rng.random_range(1..=9));
        let (dst, src) = random_pair(dims, rng.random())?;

        let mut expected = dst.clone();
        expected.blend_from(&src, Strategy::Scalar)?;

        if !dst.alpha_channel().eq(expected.alpha_channel()) {
            report.alpha_mutations += 1;
        }
        report.max_div255_deviation = report.max_div255_deviation.max(max_div255_deviation(
            dst.as_bytes(),
            src.as_bytes(),
            expected.as_bytes(),
        ));
        report.pixels += expected.pixel_count() as u64;

        for strategy in Strategy::ALL {
            if strategy != Strategy::Scalar {
                let mut actual = dst.clone();
                actual.blend_from(&src, strategy)?;
                record_mismatch(&mut report, case, strategy.name(), &expected, &actual);
            }

            if let Some(blender) = parallel {
                let mut actual = dst.clone();
                blender.blend_in_place(actual.as_bytes_mut(), src.as_bytes(), dims, strategy)?;
                let label = format!("{strategy}+parallel");
                record_mismatch(&mut report, case, &label, &expected, &actual);
            }
        }
    }

    if !report.is_ok() {
        tracing::warn!(
            mismatches = report.mismatches.len(),
            alpha_mutations = report.alpha_mutations,
            max_div255_deviation = report.max_div255_deviation,
            "strategy verification failed"
        );
    }
    Ok(report)
}

fn record_mismatch(
    report: &mut VerifyReport,
    case: usize,
    strategy: &str,
    expected: &PixelBuffer,
    actual: &PixelBuffer,
) {
    let diff = expected
        .as_pixels()
        .iter()
        .zip(actual.as_pixels())
        .position(|(e, a)| e != a);
    if let Some(pixel) = diff {
        report.mismatches.push(Mismatch {
            case,
            dims: expected.dimensions(),
            strategy: strategy.to_string(),
            pixel,
            expected: expected.as_pixels()[pixel],
            actual: actual.as_pixels()[pixel],
        });
    }
}

#[cfg(test)]
#[path = "../tests/unit/verify.rs"]
mod tests;
