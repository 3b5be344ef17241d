//! The window the page runs in: location, color-scheme signal, new browsing
//! contexts, scrolling.

use std::sync::{Mutex, PoisonError};

use log::info;
use url::Url;

use crate::dom::{Document, NodeId};

pub trait Host: Send + Sync {
    fn location(&self) -> Url;
    /// The system-level dark-mode signal.
    fn prefers_dark(&self) -> bool;
    /// Open `url` in another browsing context (`target` as in `window.open`).
    fn open(&self, url: &str, target: &str);
    fn scroll_y(&self) -> f64;
    fn scroll_to(&self, y: f64);
    fn viewport_width(&self) -> f64;
    /// Whether `node` currently intersects the viewport.
    fn is_in_viewport(&self, _doc: &Document, _node: NodeId) -> bool {
        true
    }
}

/// A host with no screen. Everything is in view; opened URLs are recorded.
pub struct HeadlessHost {
    location: Mutex<Url>,
    prefers_dark: bool,
    viewport_width: f64,
    scroll_y: Mutex<f64>,
    opened: Mutex<Vec<(String, String)>>,
}

impl HeadlessHost {
    pub fn new(location: Url) -> Self {
        HeadlessHost {
            location: Mutex::new(location),
            prefers_dark: false,
            viewport_width: 1280.0,
            scroll_y: Mutex::new(0.0),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn with_dark_preference(mut self, dark: bool) -> Self {
        self.prefers_dark = dark;
        self
    }

    pub fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    pub fn navigate(&self, url: Url) {
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = url;
    }

    /// Record a user scroll; the page learns of it through a scroll event.
    pub fn set_scroll(&self, y: f64) {
        *self.scroll_y.lock().unwrap_or_else(PoisonError::into_inner) = y;
    }

    pub fn opened(&self) -> Vec<(String, String)> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Host for HeadlessHost {
    fn location(&self) -> Url {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn open(&self, url: &str, target: &str) {
        info!("Opening {} in {}", url, target);
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((url.to_string(), target.to_string()));
    }

    fn scroll_y(&self) -> f64 {
        *self.scroll_y.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn scroll_to(&self, y: f64) {
        self.set_scroll(y);
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }
}
