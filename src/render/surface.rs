use kurbo::Affine;

use crate::assets::decode::ImageResource;
use crate::foundation::core::Size;
use crate::foundation::error::{CrossfadeError, CrossfadeResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::geometry::cover::DrawRect;

/// Read-back of a surface, row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied.
    pub premultiplied: bool,
}

/// Drawing surface owned by one widget, with canvas-2D style global alpha.
///
/// Draws are recorded into a `vello_cpu` render context and land in the backing pixmap on
/// [`present`](Self::present).
pub struct Surface {
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    global_alpha: f32,
    needs_resize: bool,
}

impl Surface {
    /// Transparent surface of `width x height` (each clamped to at least 1).
    pub fn new(width: u32, height: u32) -> CrossfadeResult<Self> {
        let (w, h) = surface_dims(width, height)?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            global_alpha: 1.0,
            needs_resize: false,
        })
    }

    /// Width of the backing store.
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    /// Height of the backing store.
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    /// Premultiplied RGBA8 backing store as of the last [`present`](Self::present).
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Opacity applied to subsequent draws.
    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    /// Set the opacity for subsequent draws, clamped to `[0, 1]`.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
    }

    /// Flag the backing store for reallocation before the next paint.
    pub fn mark_needs_resize(&mut self) {
        self.needs_resize = true;
    }

    /// Whether a resize is pending.
    pub fn needs_resize(&self) -> bool {
        self.needs_resize
    }

    /// Resize the backing store to `size` if flagged. Returns `true` when it reallocated.
    pub fn apply_pending_resize(&mut self, size: Size) -> CrossfadeResult<bool> {
        if !self.needs_resize {
            return Ok(false);
        }
        self.needs_resize = false;
        let (width, height) = size.to_pixel_grid();
        if (width, height) == (self.width(), self.height()) {
            return Ok(false);
        }
        let (w, h) = surface_dims(width, height)?;
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        Ok(true)
    }

    /// Drop recorded draws and reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.ctx.reset();
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    /// Record `image` scaled into `rect` using the current global alpha.
    pub fn draw_image(&mut self, image: &ImageResource, rect: DrawRect) -> CrossfadeResult<()> {
        if !(rect.width.is_finite() && rect.height.is_finite())
            || rect.width <= 0.0
            || rect.height <= 0.0
        {
            return Err(CrossfadeError::invalid_dimension(format!(
                "draw rect must have positive finite size, got {}x{}",
                rect.width, rect.height
            )));
        }
        let opacity = self.global_alpha;
        if opacity <= 0.0 {
            return Ok(());
        }

        let iw = f64::from(image.width());
        let ih = f64::from(image.height());
        let tr = Affine::translate((rect.offset_x, rect.offset_y))
            * Affine::scale_non_uniform(rect.width / iw, rect.height / ih);

        let ctx = &mut self.ctx;
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(image.paint());
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    /// Rasterize the recorded draws into the backing store.
    pub fn present(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Copy the pixels out, optionally converting to straight alpha.
    pub fn to_frame(&self, premultiplied: bool) -> FrameRGBA {
        let mut data = self.data().to_vec();
        if !premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data,
            premultiplied,
        }
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("global_alpha", &self.global_alpha)
            .field("needs_resize", &self.needs_resize)
            .finish_non_exhaustive()
    }
}

fn surface_dims(width: u32, height: u32) -> CrossfadeResult<(u16, u16)> {
    let w: u16 = width.max(1).try_into().map_err(|_| {
        CrossfadeError::invalid_dimension(format!("surface width {width} exceeds {}", u16::MAX))
    })?;
    let h: u16 = height.max(1).try_into().map_err(|_| {
        CrossfadeError::invalid_dimension(format!("surface height {height} exceeds {}", u16::MAX))
    })?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
