//! Headless document model
//!
//! A [`Page`] stands in for the browser document hosting the showcase: it
//! knows the document and viewport dimensions, the current vertical scroll
//! offset, and dispatches scroll/resize notifications to registered
//! listeners. Dispatch is synchronous on the caller's thread.

use serde::{Deserialize, Serialize};

/// Viewport widths at or below this are treated as mobile layouts
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Default document height as a multiple of the viewport height
pub const DEFAULT_HEIGHT_MULTIPLE: f32 = 4.0;

// ============================================================================
// Geometry
// ============================================================================

/// Visible area of the page in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Viewports at or below `breakpoint` use the mobile resting layout
    pub fn is_mobile(&self, breakpoint: u32) -> bool {
        self.width <= breakpoint
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

/// The height measures a browser exposes for a document
///
/// Different engines disagree on which of these reflects the real scrollable
/// height, so the largest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentMetrics {
    pub body_scroll_height: u32,
    pub body_offset_height: u32,
    pub client_height: u32,
    pub scroll_height: u32,
    pub offset_height: u32,
}

impl DocumentMetrics {
    /// Metrics for a document whose every measure reports `height`
    pub fn uniform(height: u32) -> Self {
        Self {
            body_scroll_height: height,
            body_offset_height: height,
            client_height: height,
            scroll_height: height,
            offset_height: height,
        }
    }

    /// Largest of all height measures
    pub fn document_height(&self) -> u32 {
        [
            self.body_scroll_height,
            self.body_offset_height,
            self.client_height,
            self.scroll_height,
            self.offset_height,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Snapshot of page geometry delivered to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub scroll_y: u32,
    pub viewport: Viewport,
    pub document_height: u32,
}

impl PageGeometry {
    /// Scrollable distance, floored at 1 so it is always a valid divisor
    pub fn scrollable_height(&self) -> u32 {
        self.document_height
            .saturating_sub(self.viewport.height)
            .max(1)
    }
}

// ============================================================================
// Listeners
// ============================================================================

/// Kinds of page notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEventKind {
    Scroll,
    Resize,
}

/// Handle identifying a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&PageGeometry)>;

// ============================================================================
// Page
// ============================================================================

/// Headless page with scroll position and listener registry
pub struct Page {
    metrics: DocumentMetrics,
    viewport: Viewport,
    scroll_y: u32,
    /// Document height expressed in viewports, kept across resizes
    height_multiple: Option<f32>,
    listeners: Vec<(ListenerId, PageEventKind, Listener)>,
    next_id: u64,
}

impl Page {
    /// Create a page with explicit document metrics
    pub fn new(viewport: Viewport, metrics: DocumentMetrics) -> Self {
        Self {
            metrics,
            viewport,
            scroll_y: 0,
            height_multiple: None,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Create a page whose document is `multiple` viewports tall
    ///
    /// The multiple is preserved on [`Page::resize`].
    pub fn with_height_multiple(viewport: Viewport, multiple: f32) -> Self {
        let mut page = Self::new(viewport, DocumentMetrics::default());
        page.height_multiple = Some(multiple);
        page.metrics = page.metrics_for_multiple();
        page
    }

    fn metrics_for_multiple(&self) -> DocumentMetrics {
        match self.height_multiple {
            Some(multiple) => {
                let height = (self.viewport.height as f32 * multiple).round() as u32;
                DocumentMetrics {
                    client_height: self.viewport.height,
                    ..DocumentMetrics::uniform(height)
                }
            }
            None => self.metrics,
        }
    }

    /// Current geometry snapshot
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            scroll_y: self.scroll_y,
            viewport: self.viewport,
            document_height: self.metrics.document_height(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Largest scroll offset the document allows
    pub fn max_scroll(&self) -> u32 {
        self.metrics
            .document_height()
            .saturating_sub(self.viewport.height)
    }

    /// Scroll to an absolute offset and notify scroll listeners
    pub fn scroll_to(&mut self, scroll_y: u32) {
        self.scroll_y = scroll_y;
        self.dispatch(PageEventKind::Scroll);
    }

    /// Resize the viewport and notify resize listeners
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.metrics = self.metrics_for_multiple();
        self.dispatch(PageEventKind::Resize);
    }

    /// Register a listener for the given event kind
    pub fn add_listener(
        &mut self,
        kind: PageEventKind,
        listener: impl FnMut(&PageGeometry) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn dispatch(&mut self, kind: PageEventKind) {
        let geometry = self.geometry();
        for (_, listener_kind, listener) in self.listeners.iter_mut() {
            if *listener_kind == kind {
                listener(&geometry);
            }
        }
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("metrics", &self.metrics)
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
