use crate::assets::decode::ImageResource;
use crate::foundation::core::Size;
use crate::foundation::error::CrossfadeResult;
use crate::geometry::cover::DrawRect;
use crate::render::surface::Surface;
use crate::scroll::visibility::BlendState;

/// Everything one paint pass reads. Borrowed, never cached across frames.
#[derive(Clone, Copy, Debug)]
pub struct PaintInput<'a> {
    /// Current container size; the backing store follows it on resize.
    pub container: Size,
    /// Where both images land.
    pub rect: DrawRect,
    /// Image shown at blend 0.
    pub start: &'a ImageResource,
    /// Image shown at blend 1.
    pub end: &'a ImageResource,
    /// Crossfade ratio.
    pub blend: BlendState,
}

/// Paint the crossfade into `surface`.
///
/// 1. apply a pending resize,
/// 2. draw `start` opaque,
/// 3. draw `end` over it inside an opacity layer of `blend`,
/// 4. restore full global alpha and rasterize.
///
/// Equal inputs always produce identical pixels.
pub fn paint(surface: &mut Surface, input: &PaintInput<'_>) -> CrossfadeResult<()> {
    if surface.apply_pending_resize(input.container)? {
        tracing::trace!(
            width = surface.width(),
            height = surface.height(),
            "surface resized"
        );
    }

    surface.clear();
    surface.set_global_alpha(1.0);
    let drawn = surface
        .draw_image(input.start, input.rect)
        .and_then(|()| {
            surface.set_global_alpha(input.blend.opacity());
            surface.draw_image(input.end, input.rect)
        });
    surface.set_global_alpha(1.0);
    drawn?;
    surface.present();
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
