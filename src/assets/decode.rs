use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Size;
use crate::foundation::error::{CrossfadeError, CrossfadeResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster image with known intrinsic size, held as a premultiplied pixmap.
///
/// Only constructible through [`from_premul_rgba8`](Self::from_premul_rgba8), [`solid`](Self::solid)
/// or [`decode_image`], so the size is never zero and always matches the pixel buffer.
/// Clones share the pixmap.
#[derive(Clone)]
pub struct ImageResource {
    width: u32,
    height: u32,
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl ImageResource {
    /// Wrap premultiplied pixels, checking the size and buffer length.
    pub fn from_premul_rgba8(
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> CrossfadeResult<Self> {
        if width == 0 || height == 0 {
            return Err(CrossfadeError::invalid_dimension(format!(
                "image must have non-zero size, got {width}x{height}"
            )));
        }
        let pixmap = pixmap_from_premul_bytes(&rgba8_premul, width, height)?;
        Ok(Self {
            width,
            height,
            pixmap: Arc::new(pixmap),
        })
    }

    /// Single-color image, `rgba` given in straight alpha.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> CrossfadeResult<Self> {
        let count = (width as usize).saturating_mul(height as usize);
        let mut px = rgba.repeat(count);
        premultiply_rgba8_in_place(&mut px);
        Self::from_premul_rgba8(width, height, px)
    }

    /// Intrinsic width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intrinsic size.
    pub fn size(&self) -> Size {
        Size::from_pixels(self.width, self.height)
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn premul_bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.premul_bytes()[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Image paint sampling this resource; shares the pixmap.
    pub(crate) fn paint(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&self.pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        }
    }
}

impl PartialEq for ImageResource {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && (Arc::ptr_eq(&self.pixmap, &other.pixmap)
                || self.premul_bytes() == other.premul_bytes())
    }
}

impl std::fmt::Debug for ImageResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageResource")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> CrossfadeResult<ImageResource> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    ImageResource::from_premul_rgba8(width, height, rgba8_premul)
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> CrossfadeResult<vello_cpu::Pixmap> {
    let w: u16 = width.try_into().map_err(|_| {
        CrossfadeError::invalid_dimension(format!("image width {width} exceeds {}", u16::MAX))
    })?;
    let h: u16 = height.try_into().map_err(|_| {
        CrossfadeError::invalid_dimension(format!("image height {height} exceeds {}", u16::MAX))
    })?;
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if bytes.len() != expected {
        return Err(CrossfadeError::invalid_dimension(format!(
            "image buffer holds {} bytes, expected {expected}",
            bytes.len()
        )));
    }
    // Pixmap stores PremulRgba8; the bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
