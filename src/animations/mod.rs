//! Decorative effects: particles, typed headline, scroll reveal, counters,
//! magnetic hover, scroll-to-top and parallax. None of them share state with
//! the page controllers.

pub mod counter;
pub mod magnetic;
pub mod particles;
pub mod scroll;
pub mod typing;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use crate::controllers::Context;
use crate::dom::{Document, NodeId};
use crate::events::{Action, Event, EventKind};

#[derive(Clone)]
pub struct Animations {
    ctx: Context,
    revealed: Arc<Mutex<HashSet<NodeId>>>,
    counted: Arc<Mutex<HashSet<NodeId>>>,
}

impl Animations {
    pub fn new(ctx: Context) -> Self {
        Animations {
            ctx,
            revealed: Arc::new(Mutex::new(HashSet::new())),
            counted: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    fn bind(doc: &mut Document) {
        let root = doc.root();
        for node in doc.by_class(root, "magnetic-hover") {
            doc.listen(node, EventKind::MouseMove, Action::MagneticMove);
            doc.listen(node, EventKind::MouseLeave, Action::MagneticLeave);
        }
        if let Some(button) = doc.get_element_by_id(scroll::SCROLL_TOP_ID) {
            doc.listen(button, EventKind::Click, Action::ScrollToTop);
            doc.listen(button, EventKind::KeyDown, Action::ActivateOnKey);
        }
        doc.listen(root, EventKind::Scroll, Action::PageScroll);
    }

    /// Set everything up and start the loops.
    pub fn start(&self) {
        let cfg = &self.ctx.config.animation;
        let typing_targets = {
            let mut doc = self.ctx.doc();
            let width = self.ctx.host.viewport_width();
            let added = particles::populate(&mut doc, cfg.particles, width, &mut rand::thread_rng());
            if added > 0 {
                debug!("Spawned {} particles", added);
            }
            scroll::assign_stagger(&mut doc);
            Self::bind(&mut doc);
            typing::targets(&doc)
        };
        for node in typing_targets {
            self.ctx.spawn(typing::run(
                self.ctx.doc.clone(),
                node,
                cfg.headline.clone(),
                cfg.clone(),
            ));
        }
        self.observe();
    }

    /// Reveal and count whatever is now in view, each element once.
    pub fn observe(&self) {
        let doc = self.ctx.doc();
        let host = &self.ctx.host;

        let mut revealed = self.revealed.lock().unwrap_or_else(PoisonError::into_inner);
        for node in scroll::candidates(&doc) {
            if revealed.contains(&node) || !host.is_in_viewport(&doc, node) {
                continue;
            }
            revealed.insert(node);
            self.ctx.after(scroll::delay_ms(&doc, node), move |doc| {
                doc.add_class(node, "animate");
            });
        }

        let mut counted = self.counted.lock().unwrap_or_else(PoisonError::into_inner);
        let root = doc.root();
        let cfg = &self.ctx.config.animation;
        for node in doc.by_attr(root, "data-target") {
            if counted.contains(&node) || !host.is_in_viewport(&doc, node) {
                continue;
            }
            counted.insert(node);
            self.ctx.spawn(counter::run(
                self.ctx.doc.clone(),
                node,
                cfg.counter_duration_ms,
                cfg.counter_tick_ms,
            ));
        }
    }

    pub fn on_scroll(&self) {
        let y = self.ctx.host.scroll_y();
        {
            let cfg = &self.ctx.config.animation;
            let mut doc = self.ctx.doc();
            scroll::update_scroll_top(&mut doc, y, cfg.scroll_top_threshold);
            scroll::parallax(&mut doc, y, cfg.parallax_factor);
        }
        self.observe();
    }

    pub fn scroll_to_top(&self) {
        self.ctx.host.scroll_to(0.0);
        self.on_scroll();
    }

    pub fn magnetic(&self, doc: &mut Document, event: &Event, current: NodeId) {
        match event.kind {
            EventKind::MouseMove => {
                let (x, y) = event.offset.unwrap_or((0.0, 0.0));
                magnetic::follow(doc, current, x, y);
            }
            _ => magnetic::release(doc, current),
        }
    }
}
