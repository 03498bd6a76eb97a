/// Scroll position to blend ratio.
pub mod visibility;
