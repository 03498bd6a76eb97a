use crate::foundation::core::{Rect, Size, Vec2};
use crate::foundation::error::CrossfadeResult;
use crate::geometry::anchor::PositionalAnchor;

/// Scaled image size plus its offset from the container's top-left corner.
///
/// Recomputed for every paint; never cached across frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawRect {
    /// Scaled image width.
    pub width: f64,
    /// Scaled image height.
    pub height: f64,
    /// Horizontal offset, `<= 0`.
    pub offset_x: f64,
    /// Vertical offset, `<= 0`.
    pub offset_y: f64,
}

impl DrawRect {
    /// Scaled size.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Offset as a vector.
    pub fn offset(self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    /// Destination rectangle in container space.
    pub fn to_kurbo_rect(self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.offset_x + self.width,
            self.offset_y + self.height,
        )
    }
}

/// Emulate `background-size: cover` plus `background-position` for one image.
///
/// The image is scaled so it covers `container` on both axes; the axis that does not match
/// overflows and is positioned by `anchor`. Fails with `InvalidDimension` when any side is
/// zero, negative or non-finite.
#[tracing::instrument(level = "trace")]
pub fn compute_draw_rect(
    image: Size,
    container: Size,
    anchor: PositionalAnchor,
) -> CrossfadeResult<DrawRect> {
    let image = image.ensure_positive("image")?;
    let container = container.ensure_positive("container")?;

    let image_ratio = image.height / image.width;
    let container_ratio = container.height / container.width;

    let (width, height) = if container_ratio > image_ratio {
        (container.height / image_ratio, container.height)
    } else {
        (container.width, container.width * image_ratio)
    };
    // Division can land one ulp short of the container; cover never shrinks below it.
    let width = width.max(container.width);
    let height = height.max(container.height);

    Ok(DrawRect {
        width,
        height,
        offset_x: anchor.x.offset_for_overflow(width - container.width),
        offset_y: anchor.y.offset_for_overflow(height - container.height),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/cover.rs"]
mod tests;
