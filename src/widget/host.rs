use std::cell::Cell;

use crate::foundation::core::Region;

/// Element the widget is attached to.
pub trait Element {
    /// Current document-space top edge and size.
    fn bounds(&self) -> Region;
}

/// Scrolling viewport that contains the element.
pub trait Viewport {
    /// Current vertical scroll offset, in the same unit as [`Region::top`].
    fn scroll_offset(&self) -> f64;
}

/// In-process element whose bounds are set by hand.
#[derive(Debug, Default)]
pub struct StaticElement {
    bounds: Cell<Region>,
}

impl StaticElement {
    /// Element with the given bounds.
    pub fn new(bounds: Region) -> Self {
        Self {
            bounds: Cell::new(bounds),
        }
    }

    /// Move or resize the element. Call the widget's `on_resize` afterwards.
    pub fn set_bounds(&self, bounds: Region) {
        self.bounds.set(bounds);
    }
}

impl Element for StaticElement {
    fn bounds(&self) -> Region {
        self.bounds.get()
    }
}

/// In-process viewport whose scroll offset is set by hand.
#[derive(Debug, Default)]
pub struct StaticViewport {
    scroll: Cell<f64>,
}

impl StaticViewport {
    /// Viewport scrolled to `offset`.
    pub fn new(offset: f64) -> Self {
        Self {
            scroll: Cell::new(offset),
        }
    }

    /// Scroll to `offset`. Call the widget's `on_scroll` afterwards.
    pub fn scroll_to(&self, offset: f64) {
        self.scroll.set(offset);
    }
}

impl Viewport for StaticViewport {
    fn scroll_offset(&self) -> f64 {
        self.scroll.get()
    }
}
