//! CPU crossfade rendering.
//!
//! Frames are coalesced by [`scheduler::RenderScheduler`] and delivered by a host
//! [`frame::FrameClock`]; [`painter::paint`] rasterizes both images into a [`surface::Surface`].

/// Frame clocks.
pub mod frame;
/// Paint pass.
pub mod painter;
/// Idle/Pending frame coalescing.
pub mod scheduler;
/// `vello_cpu` backed drawing surface.
pub mod surface;
