//! Widget lifecycle: options, host bindings and the attach/teardown handle.

/// Entry point and live handle.
pub mod attach;
/// Options, data attributes and defaults.
pub mod config;
/// Host element and viewport bindings.
pub mod host;
