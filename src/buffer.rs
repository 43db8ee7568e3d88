use std::path::Path;

use crate::blend::{Strategy, blend_in_place};
use crate::foundation::core::{CHANNELS, Dimensions, Rgba8};
use crate::foundation::error::{BlendError, BlendResult};

/// Owned, tightly packed RGBA8 image: `width * height` pixels, row-major, no stride padding.
///
/// The byte length is fixed at construction and always equals `width * height * 4`. Pixel access
/// goes through bounds-checked accessors rather than raw byte offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    dims: Dimensions,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// All-zero buffer.
    pub fn new(dims: Dimensions) -> BlendResult<Self> {
        Ok(Self {
            dims,
            data: vec![0; dims.byte_len()?],
        })
    }

    /// Every pixel set to `px`.
    pub fn filled(dims: Dimensions, px: Rgba8) -> BlendResult<Self> {
        let mut buf = Self::new(dims)?;
        buf.as_pixels_mut().fill(px);
        Ok(buf)
    }

    pub fn from_raw(dims: Dimensions, data: Vec<u8>) -> BlendResult<Self> {
        let expected = dims.byte_len()?;
        if data.len() != expected {
            return Err(BlendError::validation(format!(
                "pixel buffer for {dims} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self { dims, data })
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            dims: Dimensions::new(width, height),
            data: img.into_raw(),
        }
    }

    pub fn into_rgba_image(self) -> BlendResult<image::RgbaImage> {
        let Dimensions { width, height } = self.dims;
        image::RgbaImage::from_raw(width, height, self.data)
            .ok_or_else(|| BlendError::image(format!("buffer does not fit a {width}x{height} image")))
    }

    /// Decodes any supported image file and converts it to RGBA8.
    pub fn open(path: &Path) -> BlendResult<Self> {
        let img = image::open(path)
            .map_err(|e| BlendError::image(format!("decode '{}': {e}", path.display())))?;
        Ok(Self::from_rgba_image(img.to_rgba8()))
    }

    pub fn save_png(&self, path: &Path) -> BlendResult<()> {
        let Dimensions { width, height } = self.dims;
        image::save_buffer_with_format(
            path,
            &self.data,
            width,
            height,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| BlendError::image(format!("write '{}': {e}", path.display())))
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> u32 {
        self.dims.width
    }

    pub fn height(&self) -> u32 {
        self.dims.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn as_pixels(&self) -> &[Rgba8] {
        self.data.as_chunks::<CHANNELS>().0
    }

    pub fn as_pixels_mut(&mut self) -> &mut [Rgba8] {
        self.data.as_chunks_mut::<CHANNELS>().0
    }

    /// Pixel at linear index `idx` (row-major).
    pub fn pixel(&self, idx: usize) -> Option<Rgba8> {
        self.as_pixels().get(idx).copied()
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.dims.width || y >= self.dims.height {
            return None;
        }
        self.pixel(y as usize * self.dims.width as usize + x as usize)
    }

    pub fn set_pixel(&mut self, idx: usize, px: Rgba8) -> BlendResult<()> {
        let count = self.pixel_count();
        let slot = self.as_pixels_mut().get_mut(idx).ok_or_else(|| {
            BlendError::validation(format!("pixel index {idx} out of range (len {count})"))
        })?;
        *slot = px;
        Ok(())
    }

    pub fn alpha_channel(&self) -> impl Iterator<Item = u8> + '_ {
        self.as_pixels().iter().map(|px| px[3])
    }

    /// Composites `src` over `self` in place, treating `self` as opaque.
    pub fn blend_from(&mut self, src: &PixelBuffer, strategy: Strategy) -> BlendResult<()> {
        if src.dims != self.dims {
            return Err(BlendError::validation(format!(
                "dimension mismatch: destination {} vs source {}",
                self.dims, src.dims
            )));
        }
        let dims = self.dims;
        blend_in_place(&mut self.data, &src.data, dims, strategy)
    }
}

#[cfg(test)]
#[path = "../tests/unit/buffer.rs"]
mod tests;
