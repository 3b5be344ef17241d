use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::controllers::Context;
use crate::dom::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// A form's status message element. Each `show` bumps a generation counter;
/// delayed hide/clear timers only act if no newer message was shown since.
#[derive(Clone)]
pub struct StatusLine {
    id: String,
    generation: Arc<AtomicU64>,
}

impl StatusLine {
    pub fn new(id: &str) -> Self {
        StatusLine {
            id: id.to_string(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Show `text`; errors hide themselves after the configured delay.
    pub fn show(&self, ctx: &Context, doc: &mut Document, text: &str, kind: StatusKind) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let Some(node) = doc.get_element_by_id(&self.id) else {
            return;
        };
        doc.set_text(node, text);
        doc.remove_class(node, StatusKind::Success.as_str());
        doc.remove_class(node, StatusKind::Error.as_str());
        doc.add_class(node, "form-message");
        doc.add_class(node, kind.as_str());
        doc.set_style(node, "display", "block");

        if kind == StatusKind::Error {
            let current = self.generation.clone();
            let id = self.id.clone();
            ctx.after(ctx.config.timing.error_hide_ms, move |doc| {
                if current.load(Ordering::SeqCst) != generation {
                    return;
                }
                if let Some(node) = doc.get_element_by_id(&id) {
                    doc.set_style(node, "display", "none");
                }
            });
        }
    }

    /// Empty the message after `delay_ms` unless something newer was shown.
    pub fn clear_after(&self, ctx: &Context, delay_ms: u64) {
        let generation = self.generation.load(Ordering::SeqCst);
        let current = self.generation.clone();
        let id = self.id.clone();
        ctx.after(delay_ms, move |doc| {
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            if let Some(node) = doc.get_element_by_id(&id) {
                doc.remove_class(node, StatusKind::Success.as_str());
                doc.remove_class(node, StatusKind::Error.as_str());
                doc.set_text(node, "");
            }
        });
    }
}
