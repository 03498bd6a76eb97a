use crate::foundation::error::{CrossfadeError, CrossfadeResult};

/// Crossfade ratio in `[0, 1]`: 0 shows only the start image, 1 only the end image.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
pub struct BlendState(f64);

impl BlendState {
    /// Fully the start image.
    pub const START: Self = Self(0.0);
    /// Fully the end image.
    pub const END: Self = Self(1.0);

    /// Clamp `ratio` into `[0, 1]`. NaN maps to 0.
    pub fn new(ratio: f64) -> Self {
        if ratio.is_nan() {
            return Self::START;
        }
        Self(ratio.clamp(0.0, 1.0))
    }

    /// Ratio value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Ratio as compositing opacity.
    pub fn opacity(self) -> f32 {
        self.0 as f32
    }
}

/// Unclamped linear progress of the scroll line through the element.
///
/// At or before the element top: `0`. At or past its bottom edge: `1`. In between:
/// `(scroll_offset - element_top) / (element_height * distance)`, which can exceed 1 when
/// `distance < 1`.
pub fn raw_progress(
    scroll_offset: f64,
    element_top: f64,
    element_height: f64,
    distance: f64,
) -> CrossfadeResult<f64> {
    if !(distance.is_finite() && distance > 0.0) {
        return Err(CrossfadeError::invalid_configuration(format!(
            "distance must be a positive number, got {distance}"
        )));
    }

    let travelled = scroll_offset - element_top;
    if travelled <= 0.0 {
        // Also covers zero-height elements sitting exactly on the scroll line.
        return Ok(0.0);
    }
    if scroll_offset >= element_top + element_height {
        return Ok(1.0);
    }
    Ok(travelled / (element_height * distance))
}

/// Map the current scroll offset to a crossfade ratio.
///
/// `distance` is the fraction of the element's height the transition spans. Fails with
/// `InvalidConfiguration` when `distance <= 0`.
#[tracing::instrument(level = "trace")]
pub fn visibility_ratio(
    scroll_offset: f64,
    element_top: f64,
    element_height: f64,
    distance: f64,
) -> CrossfadeResult<BlendState> {
    raw_progress(scroll_offset, element_top, element_height, distance).map(BlendState::new)
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/visibility.rs"]
mod tests;
