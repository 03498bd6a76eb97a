/// Geometry primitives shared by every layer.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
