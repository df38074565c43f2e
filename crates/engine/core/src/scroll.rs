//! Scroll tracking
//!
//! [`ScrollTracker`] is the single writer of the page's scroll state. It is
//! mounted on a [`Page`], where it listens for scroll and resize
//! notifications, and hands out read-only [`ScrollHandle`]s to per-frame
//! consumers. Consumers read the latest value once per frame; intermediate
//! values between two frames are simply overwritten.
//!
//! # Example
//!
//! ```
//! use showcase_core::page::{Page, Viewport};
//! use showcase_core::scroll::ScrollTracker;
//!
//! let mut page = Page::with_height_multiple(Viewport::new(1280, 800), 4.0);
//! let tracker = ScrollTracker::mount(&mut page);
//! let handle = tracker.handle();
//!
//! page.scroll_to(1200);
//! assert_eq!(handle.snapshot().pixel_offset, 1200);
//! assert!((handle.snapshot().progress - 0.5).abs() < 1e-6);
//!
//! tracker.unmount(&mut page);
//! assert_eq!(page.listener_count(), 0);
//! ```

use crate::page::{ListenerId, Page, PageEventKind, PageGeometry};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Latest published scroll position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    /// Scroll offset normalized by the scrollable height, in [0, 1]
    pub progress: f32,
    /// Raw vertical scroll offset in pixels
    pub pixel_offset: u32,
}

impl ScrollState {
    /// Derive the scroll state from page geometry
    pub fn from_geometry(geometry: &PageGeometry) -> Self {
        let total = geometry.scrollable_height() as f32;
        let progress = (geometry.scroll_y as f32 / total).clamp(0.0, 1.0);
        Self {
            progress,
            pixel_offset: geometry.scroll_y,
        }
    }
}

/// Read-only view of the tracker's state
///
/// Cheap to clone. Keeps returning the last published value after the
/// tracker is unmounted.
#[derive(Debug, Clone)]
pub struct ScrollHandle {
    state: Rc<Cell<ScrollState>>,
}

impl ScrollHandle {
    /// Latest published scroll state
    pub fn snapshot(&self) -> ScrollState {
        self.state.get()
    }

    /// A handle that never changes, for hosts without a page
    pub fn fixed(state: ScrollState) -> Self {
        Self {
            state: Rc::new(Cell::new(state)),
        }
    }
}

/// Owner of the scroll state and its page listeners
#[derive(Debug)]
pub struct ScrollTracker {
    state: Rc<Cell<ScrollState>>,
    scroll_listener: ListenerId,
    resize_listener: ListenerId,
}

impl ScrollTracker {
    /// Register scroll and resize listeners on the page and publish the
    /// initial state
    pub fn mount(page: &mut Page) -> Self {
        let state = Rc::new(Cell::new(ScrollState::from_geometry(&page.geometry())));

        let writer = state.clone();
        let scroll_listener = page.add_listener(PageEventKind::Scroll, move |geometry| {
            writer.set(ScrollState::from_geometry(geometry));
        });
        let writer = state.clone();
        let resize_listener = page.add_listener(PageEventKind::Resize, move |geometry| {
            writer.set(ScrollState::from_geometry(geometry));
        });

        tracing::debug!(
            ?scroll_listener,
            ?resize_listener,
            "scroll tracker mounted"
        );

        Self {
            state,
            scroll_listener,
            resize_listener,
        }
    }

    /// Create a read handle for a per-frame consumer
    pub fn handle(&self) -> ScrollHandle {
        ScrollHandle {
            state: self.state.clone(),
        }
    }

    /// Latest published scroll state
    pub fn snapshot(&self) -> ScrollState {
        self.state.get()
    }

    /// Remove this tracker's listeners from the page
    pub fn unmount(self, page: &mut Page) {
        page.remove_listener(self.scroll_listener);
        page.remove_listener(self.resize_listener);
        tracing::debug!("scroll tracker unmounted");
    }
}
