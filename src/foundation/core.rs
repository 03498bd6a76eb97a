use crate::foundation::error::{CrossfadeError, CrossfadeResult};

pub use kurbo::{Rect, Vec2};

/// Width/height pair in a single unit system (CSS or device pixels).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a size without validation.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size of an intrinsic pixel grid.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Return `true` when both axes are finite and strictly positive.
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Validate that both axes are usable as divisors.
    ///
    /// `what` names the size in the error message ("image", "container", ...).
    pub fn ensure_positive(self, what: &str) -> CrossfadeResult<Self> {
        if self.is_positive() {
            Ok(self)
        } else {
            Err(CrossfadeError::invalid_dimension(format!(
                "{what} size must be positive and finite, got {}x{}",
                self.width, self.height
            )))
        }
    }

    /// Round to a whole pixel grid, never smaller than 1x1.
    pub fn to_pixel_grid(self) -> (u32, u32) {
        fn axis(v: f64) -> u32 {
            if !v.is_finite() || v < 1.0 {
                return 1;
            }
            v.round().min(f64::from(u32::MAX)) as u32
        }
        (axis(self.width), axis(self.height))
    }
}

/// Host visual area the widget paints into.
///
/// `top` is the offset of the top edge from the document origin, in the same unit as the
/// viewport scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Top edge relative to the document origin.
    pub top: f64,
    /// Width of the region.
    pub width: f64,
    /// Height of the region.
    pub height: f64,
}

impl Region {
    /// Create a region.
    pub fn new(top: f64, width: f64, height: f64) -> Self {
        Self { top, width, height }
    }

    /// Width/height of the region.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
