//! Crossfade is a scroll-driven image crossfade renderer.
//!
//! A widget attached to an element paints two images into a private surface: the start image
//! opaque, the end image on top with an opacity that follows how far the viewport has scrolled
//! through the element. Both images are placed like CSS `background-size: cover` with a
//! `background-position` anchor.
//!
//! - Resolve a [`CrossfadeConfig`] (JSON options, markup data attributes, defaults)
//! - [`attach`] it to an [`Element`] inside a [`Viewport`], with a [`FrameClock`] and an
//!   [`ImageFetcher`]
//! - Forward scroll and resize signals to the [`CrossfadeHandle`]; paints are coalesced to at
//!   most one per frame
//!
//! The pure pieces ([`compute_draw_rect`], [`visibility_ratio`], [`paint`]) are usable on
//! their own.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod geometry;
mod render;
mod scroll;
mod widget;

pub use crate::foundation::core::{Rect, Region, Size, Vec2};
pub use crate::foundation::error::{CrossfadeError, CrossfadeResult};

pub use crate::assets::decode::{ImageResource, decode_image};
pub use crate::assets::fetch::{
    FetchCallback, FsImageFetcher, ImageFetcher, MemoryImageFetcher, normalize_image_source,
};
pub use crate::assets::loader::{
    DEFAULT_LOAD_TIMEOUT, ImagePair, LoadStatus, PairCallback, PairLoad, load_pair,
};
pub use crate::geometry::anchor::{Anchor, PositionalAnchor};
pub use crate::geometry::cover::{DrawRect, compute_draw_rect};
pub use crate::render::frame::{
    FALLBACK_FRAME_INTERVAL, FrameCallback, FrameClock, FrameTime, IntervalFrameClock,
    ManualFrameClock,
};
pub use crate::render::painter::{PaintInput, paint};
pub use crate::render::scheduler::{
    FrameOutcome, Invalidation, RenderScheduler, SchedulerState, SchedulerStats,
};
pub use crate::render::surface::{FrameRGBA, Surface};
pub use crate::scroll::visibility::{BlendState, raw_progress, visibility_ratio};
pub use crate::widget::attach::{CrossfadeHandle, WidgetStatus, attach};
pub use crate::widget::config::{
    CrossfadeConfig, DEFAULT_BACKGROUND_POSITION, DEFAULT_DISTANCE, ResolvedConfig,
};
pub use crate::widget::host::{Element, StaticElement, StaticViewport, Viewport};
