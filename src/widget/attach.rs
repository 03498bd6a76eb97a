use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Instant,
};

use crate::assets::fetch::ImageFetcher;
use crate::assets::loader::{ImagePair, PairLoad, load_pair};
use crate::foundation::core::Region;
use crate::foundation::error::CrossfadeResult;
use crate::geometry::cover::{DrawRect, compute_draw_rect};
use crate::render::frame::{FrameClock, FrameTime};
use crate::render::painter::{PaintInput, paint};
use crate::render::scheduler::{FrameOutcome, Invalidation, RenderScheduler, SchedulerStats};
use crate::render::surface::{FrameRGBA, Surface};
use crate::scroll::visibility::{BlendState, visibility_ratio};
use crate::widget::config::{CrossfadeConfig, ResolvedConfig};
use crate::widget::host::{Element, Viewport};

/// Lifecycle of an attached widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum WidgetStatus {
    /// Waiting for both images. Scroll and resize signals are ignored.
    Loading,
    /// Listening and painting.
    Ready,
    /// An image failed to load or the load timed out.
    Failed,
    /// [`CrossfadeHandle::teardown`] ran.
    TornDown,
}

struct Widget {
    element: Rc<dyn Element>,
    viewport: Rc<dyn Viewport>,
    clock: Rc<dyn FrameClock>,
    config: ResolvedConfig,
    /// Size the surface follows; refreshed on resize only.
    region: Region,
    blend: BlendState,
    images: Option<ImagePair>,
    surface: Option<Surface>,
    scheduler: RenderScheduler,
    status: WidgetStatus,
    last_error: Option<String>,
    weak_self: Weak<RefCell<Widget>>,
}

impl Widget {
    fn listening(&self) -> bool {
        self.status == WidgetStatus::Ready
    }

    fn on_loaded(&mut self, result: CrossfadeResult<ImagePair>) {
        if self.status != WidgetStatus::Loading {
            return;
        }
        let region = self.element.bounds();
        let (w, h) = region.size().to_pixel_grid();
        let ready = result.and_then(|images| Ok((images, Surface::new(w, h)?)));
        match ready {
            Ok((images, surface)) => {
                tracing::debug!(
                    start = %self.config.start,
                    end = %self.config.end,
                    "crossfade images ready"
                );
                self.region = region;
                self.surface = Some(surface);
                self.images = Some(images);
                self.status = WidgetStatus::Ready;
                // Paint the state the page was loaded in without waiting for a scroll.
                self.update_visibility();
                self.request_frame(Invalidation::Scroll);
            }
            Err(err) => {
                tracing::warn!(error = %err, "crossfade image load failed");
                self.last_error = Some(err.to_string());
                self.status = WidgetStatus::Failed;
            }
        }
    }

    fn update_visibility(&mut self) {
        let scroll = self.viewport.scroll_offset();
        let bounds = self.element.bounds();
        match visibility_ratio(scroll, bounds.top, bounds.height, self.config.distance) {
            Ok(blend) => {
                if self.config.debug {
                    tracing::debug!(
                        target: "crossfade",
                        scroll,
                        element_top = bounds.top,
                        element_height = bounds.height,
                        ratio = blend.get(),
                        "visibility"
                    );
                }
                self.blend = blend;
            }
            Err(err) => tracing::warn!(error = %err, "visibility not updated"),
        }
    }

    fn request_frame(&mut self, reason: Invalidation) {
        if !self.scheduler.invalidate(reason) {
            return;
        }
        let weak = self.weak_self.clone();
        self.clock.request_frame(Box::new(move |time| {
            // Dropped handle: nothing left to paint.
            if let Some(widget) = weak.upgrade() {
                widget.borrow_mut().on_frame(time);
            }
        }));
    }

    fn on_frame(&mut self, time: FrameTime) {
        if !self.scheduler.begin_frame() {
            return;
        }
        let outcome = self.paint();
        tracing::trace!(frame = time.frame, ?outcome, "crossfade frame");
        self.scheduler.finish_frame(outcome);
    }

    fn draw_rect(&self) -> Option<CrossfadeResult<DrawRect>> {
        let images = self.images.as_ref()?;
        Some(compute_draw_rect(
            images.start.size(),
            self.region.size(),
            self.config.anchor,
        ))
    }

    fn paint(&mut self) -> FrameOutcome {
        let rect = match self.draw_rect() {
            Some(Ok(rect)) => rect,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "crossfade frame skipped");
                return FrameOutcome::Skipped;
            }
            None => return FrameOutcome::Skipped,
        };
        if self.config.debug {
            tracing::debug!(
                target: "crossfade",
                container_width = self.region.width,
                container_height = self.region.height,
                width = rect.width,
                height = rect.height,
                offset_x = rect.offset_x,
                offset_y = rect.offset_y,
                blend = self.blend.get(),
                "geometry"
            );
        }

        let (Some(surface), Some(images)) = (self.surface.as_mut(), self.images.as_ref()) else {
            return FrameOutcome::Skipped;
        };
        let input = PaintInput {
            container: self.region.size(),
            rect,
            start: &images.start,
            end: &images.end,
            blend: self.blend,
        };
        match paint(surface, &input) {
            Ok(()) => FrameOutcome::Painted,
            Err(err) => {
                tracing::warn!(error = %err, "crossfade frame skipped");
                FrameOutcome::Skipped
            }
        }
    }

    fn teardown(&mut self) {
        if self.status == WidgetStatus::TornDown {
            return;
        }
        tracing::debug!("crossfade torn down");
        self.status = WidgetStatus::TornDown;
        self.surface = None;
        self.images = None;
    }
}

/// Attach a crossfade to `element`.
///
/// Options are resolved first: a missing image or a bad option fails here and no widget is
/// created. Both images are then requested from `fetcher`. Once they are ready the widget
/// computes the current blend ratio and requests its first frame from `clock`; until then
/// scroll and resize signals are ignored.
pub fn attach(
    element: Rc<dyn Element>,
    viewport: Rc<dyn Viewport>,
    clock: Rc<dyn FrameClock>,
    fetcher: &dyn ImageFetcher,
    config: &CrossfadeConfig,
) -> CrossfadeResult<CrossfadeHandle> {
    let config = config.resolve()?;
    let region = element.bounds();
    let (start, end, timeout) = (config.start.clone(), config.end.clone(), config.load_timeout);

    let inner = Rc::new_cyclic(|weak_self| {
        RefCell::new(Widget {
            element,
            viewport,
            clock,
            config,
            region,
            blend: BlendState::START,
            images: None,
            surface: None,
            scheduler: RenderScheduler::new(),
            status: WidgetStatus::Loading,
            last_error: None,
            weak_self: weak_self.clone(),
        })
    });

    let weak = Rc::downgrade(&inner);
    let load = load_pair(
        fetcher,
        &start,
        &end,
        timeout,
        Box::new(move |result| {
            if let Some(widget) = weak.upgrade() {
                widget.borrow_mut().on_loaded(result);
            }
        }),
    )?;

    Ok(CrossfadeHandle { inner, load })
}

/// Live crossfade widget. Dropping the handle detaches it; pending frames become no-ops.
pub struct CrossfadeHandle {
    inner: Rc<RefCell<Widget>>,
    load: PairLoad,
}

impl std::fmt::Debug for CrossfadeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let w = self.inner.borrow();
        f.debug_struct("CrossfadeHandle")
            .field("status", &w.status)
            .field("blend", &w.blend)
            .field("scheduler", &w.scheduler.state())
            .field("load", &self.load)
            .finish()
    }
}

impl CrossfadeHandle {
    /// The viewport scrolled: recompute the blend ratio and request a frame.
    pub fn on_scroll(&self) {
        let mut w = self.inner.borrow_mut();
        if !w.listening() {
            return;
        }
        w.update_visibility();
        w.request_frame(Invalidation::Scroll);
    }

    /// The element or viewport was resized: pick up the new size and request a frame.
    pub fn on_resize(&self) {
        let mut w = self.inner.borrow_mut();
        if !w.listening() {
            return;
        }
        let bounds = w.element.bounds();
        w.region = bounds;
        if let Some(surface) = w.surface.as_mut() {
            surface.mark_needs_resize();
        }
        w.update_visibility();
        w.request_frame(Invalidation::Resize);
    }

    /// Request a repaint with the current state.
    pub fn invalidate(&self) {
        let mut w = self.inner.borrow_mut();
        if !w.listening() {
            return;
        }
        w.request_frame(Invalidation::Explicit);
    }

    /// Stop listening and release the surface and images. Idempotent.
    pub fn teardown(&self) {
        self.inner.borrow_mut().teardown();
    }

    /// Fail a load that is still pending past its deadline. Returns `true` when it expired.
    pub fn poll_load_timeout(&self, now: Instant) -> bool {
        self.load.expire_if_overdue(now)
    }

    /// Current lifecycle state.
    pub fn status(&self) -> WidgetStatus {
        self.inner.borrow().status
    }

    /// Blend ratio the next paint will use.
    pub fn blend(&self) -> BlendState {
        self.inner.borrow().blend
    }

    /// Frame counters.
    pub fn stats(&self) -> SchedulerStats {
        self.inner.borrow().scheduler.stats()
    }

    /// Why the widget failed, if it did.
    pub fn last_error(&self) -> Option<String> {
        self.inner.borrow().last_error.clone()
    }

    /// Where the images are drawn for the current size, once they are loaded.
    pub fn draw_rect(&self) -> Option<CrossfadeResult<DrawRect>> {
        self.inner.borrow().draw_rect()
    }

    /// Straight-alpha copy of the last painted surface.
    pub fn snapshot(&self) -> Option<FrameRGBA> {
        self.inner
            .borrow()
            .surface
            .as_ref()
            .map(|s| s.to_frame(false))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/attach.rs"]
mod tests;
