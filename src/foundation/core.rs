use crate::foundation::error::{BlendError, BlendResult};

/// One RGBA8 pixel, straight (non-premultiplied) alpha.
pub type Rgba8 = [u8; 4];

/// Bytes per tightly packed RGBA8 pixel.
pub const CHANNELS: usize = 4;

pub(crate) const R: usize = 0;
pub(crate) const G: usize = 1;
pub(crate) const B: usize = 2;
pub(crate) const A: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(self) -> BlendResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| {
                BlendError::validation(format!(
                    "dimensions {}x{} overflow the pixel count",
                    self.width, self.height
                ))
            })
    }

    pub fn byte_len(self) -> BlendResult<usize> {
        self.pixel_count()?.checked_mul(CHANNELS).ok_or_else(|| {
            BlendError::validation(format!(
                "dimensions {}x{} overflow the buffer length",
                self.width, self.height
            ))
        })
    }

    /// Bytes in one tightly packed row.
    pub fn row_bytes(self) -> usize {
        self.width as usize * CHANNELS
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
