//! CSS `background-size: cover` placement.

/// Position keywords and per-axis offsets.
pub mod anchor;
/// The cover rectangle computation.
pub mod cover;
