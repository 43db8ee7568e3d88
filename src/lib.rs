//! blendbench compares two implementations of one operation: compositing an RGBA8 source over an
//! opaque RGBA8 destination in place.
//!
//! - [`Strategy::Scalar`] walks pixels one channel at a time.
//! - [`Strategy::Batched`] gathers one channel of 4, 8 or 16 pixels into `u16` lanes, does the
//!   multiply-add lane-wise, and keeps the high byte of each lane.
//!
//! Both use `(src * a + dst * (255 - a)) >> 8` for R, G and B, leave destination alpha untouched,
//! and produce byte-identical output for every input size. The batched kernel hands any trailing
//! partial group to the scalar kernel.
//!
//! Around the kernel sit an owned [`PixelBuffer`], a rayon-backed [`ParallelBlender`], synthetic
//! fixtures ([`synth`]), a timing harness ([`bench`]) and a strategy cross-check ([`verify`]).
//!
//! ```
//! use blendbench::{Dimensions, PixelBuffer, Strategy};
//!
//! let dims = Dimensions::new(4, 1);
//! let mut dst = PixelBuffer::filled(dims, [101, 102, 103, 255]).unwrap();
//! let src = PixelBuffer::filled(dims, [10, 217, 100, 123]).unwrap();
//! dst.blend_from(&src, Strategy::default()).unwrap();
//! assert_eq!(dst.pixel(0), Some([56, 156, 101, 255]));
//! ```
#![forbid(unsafe_code)]

mod blend;
mod buffer;
mod foundation;

pub mod bench;
pub mod synth;
pub mod verify;

pub use blend::parallel::{ParallelBlender, ParallelOpts, blend_parallel};
pub use blend::{BatchedKernel, BlendKernel, LaneWidth, ScalarKernel, Strategy, blend_in_place};
pub use buffer::PixelBuffer;
pub use foundation::core::{CHANNELS, Dimensions, Rgba8};
pub use foundation::error::{BlendError, BlendResult};
pub use foundation::math::{max_div255_deviation, over_channel, over_channel_div255};
