//! Lane-batched `over`.
//!
//! Each iteration takes a group of `N` pixels, gathers one channel from all of them into an
//! `N`-lane `u16` vector (stride 4 bytes in the packed buffer), does the multiply-add lane-wise,
//! then scatters the high byte of every 16-bit lane back into the destination. Taking the high
//! byte is the `>> 8` of the scalar formula, so output is bit-identical to [`ScalarKernel`].
//!
//! Lanes are plain arrays with element-wise loops; there are no target intrinsics and rustc/llvm
//! auto-vectorizes the fixed-size loops.
//!
//! Pixels left over after the last whole group (fewer than `N`) go through [`ScalarKernel`], so
//! every pixel of any buffer size is blended.

use std::ops::{Add, Mul, Sub};

use crate::blend::{BlendKernel, ScalarKernel};
use crate::foundation::core::{A, B, G, R, Rgba8};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneWidth {
    /// 4 x u16, one 64-bit register.
    X4,
    /// 8 x u16, one 128-bit register.
    #[default]
    X8,
    /// 16 x u16, one 256-bit register.
    X16,
}

impl LaneWidth {
    pub const ALL: [LaneWidth; 3] = [LaneWidth::X4, LaneWidth::X8, LaneWidth::X16];

    pub const fn lanes(self) -> usize {
        match self {
            LaneWidth::X4 => 4,
            LaneWidth::X8 => 8,
            LaneWidth::X16 => 16,
        }
    }

    pub fn from_lanes(lanes: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.lanes() == lanes)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct U16Lanes<const N: usize>(pub(crate) [u16; N]);

impl<const N: usize> U16Lanes<N> {
    #[inline(always)]
    pub(crate) fn splat(v: u16) -> Self {
        Self([v; N])
    }

    /// Widens `channel` of every pixel in the group into one lane each.
    #[inline(always)]
    pub(crate) fn gather(px: &[Rgba8; N], channel: usize) -> Self {
        Self(std::array::from_fn(|i| u16::from(px[i][channel])))
    }

    /// Writes the high byte of every lane into `channel` of the matching pixel.
    #[inline(always)]
    pub(crate) fn scatter_high_bytes(self, px: &mut [Rgba8; N], channel: usize) {
        for (p, lane) in px.iter_mut().zip(self.0) {
            let [hi, _lo] = lane.to_be_bytes();
            p[channel] = hi;
        }
    }
}

impl<const N: usize> Add for U16Lanes<N> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<const N: usize> Sub for U16Lanes<N> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<const N: usize> Mul for U16Lanes<N> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] * rhs.0[i]))
    }
}

/// `N` pixels per iteration. Only 4, 8 and 16 are exposed through [`LaneWidth`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BatchedKernel<const N: usize>;

impl<const N: usize> BatchedKernel<N> {
    pub const LANES: usize = N;

    #[inline(always)]
    fn blend_group(dst: &mut [Rgba8; N], src: &[Rgba8; N]) {
        let a = U16Lanes::gather(src, A);
        let a_not = U16Lanes::splat(255) - a;
        for c in [R, G, B] {
            // Peaks at 255 * 255, no lane overflows.
            let sum = U16Lanes::gather(src, c) * a + U16Lanes::gather(dst, c) * a_not;
            sum.scatter_high_bytes(dst, c);
        }
    }
}

impl<const N: usize> BlendKernel for BatchedKernel<N> {
    fn name(&self) -> &'static str {
        match N {
            4 => "batched4",
            8 => "batched8",
            16 => "batched16",
            _ => "batched",
        }
    }

    fn blend_pixels(&self, dst: &mut [Rgba8], src: &[Rgba8]) {
        let (dst_groups, dst_tail) = dst.as_chunks_mut::<N>();
        let (src_groups, src_tail) = src.as_chunks::<N>();
        for (d, s) in dst_groups.iter_mut().zip(src_groups) {
            Self::blend_group(d, s);
        }
        ScalarKernel.blend_pixels(dst_tail, src_tail);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/batched.rs"]
mod tests;
