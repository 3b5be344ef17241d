//! Project gallery: catalog loading, category filters, the featured strip on
//! the home page and the detail overlay.

use std::sync::{Arc, Mutex, PoisonError};

use log::{info, warn};

use crate::controllers::{images, Context};
use crate::dom::{Document, NodeId};
use crate::events::{Action, Event, EventKind};
use crate::fetch::{fetch_json, FetchError};
use crate::models::portfolio::{Project, ALL_CATEGORIES};
use crate::render;

pub const GRID_ID: &str = "projectsGrid";
pub const FEATURED_ID: &str = "featuredGrid";
pub const MODAL_ID: &str = "projectModal";
const MODAL_PARTS: [&str; 6] = [
    "modalTitle",
    "modalImage",
    "modalDesc",
    "modalTech",
    "modalLink",
    "modalCode",
];

#[derive(Clone)]
pub struct Gallery {
    ctx: Context,
    items: Arc<Mutex<Vec<Project>>>,
    filter: Arc<Mutex<String>>,
}

impl Gallery {
    pub fn new(ctx: Context) -> Self {
        Gallery {
            ctx,
            items: Arc::new(Mutex::new(Vec::new())),
            filter: Arc::new(Mutex::new(ALL_CATEGORIES.to_string())),
        }
    }

    pub fn items(&self) -> Vec<Project> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_filter(&self) -> String {
        self.filter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn containers(doc: &Document) -> Vec<NodeId> {
        [GRID_ID, FEATURED_ID]
            .iter()
            .filter_map(|id| doc.get_element_by_id(id))
            .collect()
    }

    /// Fetch the catalog and render the gallery and/or featured strip. Pages
    /// without either container skip the fetch.
    pub async fn load(&self) -> Result<usize, FetchError> {
        let m = &self.ctx.config.messages;
        {
            let mut doc = self.ctx.doc();
            let containers = Self::containers(&doc);
            if containers.is_empty() {
                return Ok(0);
            }
            for node in containers {
                let _ = doc.set_inner_html(node, &render::loading(&m.projects_loading));
            }
        }

        let path = &self.ctx.config.data.projects;
        let projects: Vec<Project> = match fetch_json(self.ctx.fetcher.as_ref(), path).await {
            Ok(p) => p,
            Err(e) => {
                warn!("Error loading projects from {}: {}", path, e);
                let mut doc = self.ctx.doc();
                for node in Self::containers(&doc) {
                    let _ = doc.set_inner_html(node, &render::load_error(&m.projects_error, &m.retry));
                    for button in doc.by_class(node, "retry-btn") {
                        doc.listen(button, EventKind::Click, Action::RetryProjects);
                    }
                }
                return Err(e);
            }
        };

        let count = projects.len();
        *self.items.lock().unwrap_or_else(PoisonError::into_inner) = projects;
        let mut doc = self.ctx.doc();
        self.render_grid(&mut doc);
        self.bind_filters(&mut doc);
        self.render_featured(&mut doc);
        info!("Loaded {} projects", count);
        Ok(count)
    }

    fn render_grid(&self, doc: &mut Document) {
        let Some(grid) = doc.get_element_by_id(GRID_ID) else {
            return;
        };
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let filter = self.current_filter();
        let visible = Project::filter(&items, &filter);
        let html = render::project_grid(&visible, &self.ctx.config.data.project_placeholder, &self.ctx.config.messages);
        if let Err(e) = doc.set_inner_html(grid, &html) {
            warn!("Project grid markup rejected: {}", e);
            return;
        }
        for button in doc.by_class(grid, "project-open") {
            if let Some(index) = doc.data(button, "project").and_then(|v| v.parse().ok()) {
                doc.listen(button, EventKind::Click, Action::OpenProject(index));
            }
        }
        images::bind_fallbacks(doc, grid);
    }

    fn render_featured(&self, doc: &mut Document) {
        let Some(strip) = doc.get_element_by_id(FEATURED_ID) else {
            return;
        };
        let m = &self.ctx.config.messages;
        let placeholder = &self.ctx.config.data.project_placeholder;
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let html = if items.is_empty() {
            render::notice(&m.projects_empty)
        } else {
            Project::featured(&items, self.ctx.config.data.featured_count)
                .iter()
                .enumerate()
                .map(|(i, p)| render::featured_card(i, p, placeholder, m))
                .collect::<Vec<_>>()
                .join("\n")
        };
        if doc.set_inner_html(strip, &html).is_ok() {
            images::bind_fallbacks(doc, strip);
        }
    }

    fn bind_filters(&self, doc: &mut Document) {
        let root = doc.root();
        for button in doc.by_class(root, "filter-btn") {
            doc.listen(button, EventKind::Click, Action::FilterProjects);
        }
    }

    /// Activate `button`'s category and re-render the grid.
    pub fn filter(&self, doc: &mut Document, button: NodeId) {
        let category = doc
            .data(button, "filter")
            .unwrap_or(ALL_CATEGORIES)
            .to_string();
        let root = doc.root();
        for other in doc.by_class(root, "filter-btn") {
            doc.remove_class(other, "active");
        }
        doc.add_class(button, "active");
        *self.filter.lock().unwrap_or_else(PoisonError::into_inner) = category;
        self.render_grid(doc);
    }

    /// Bind the static overlay markup. Escape is caught at the document root.
    pub fn bind_overlay(&self, doc: &mut Document) {
        let Some(modal) = doc.get_element_by_id(MODAL_ID) else {
            return;
        };
        doc.listen(modal, EventKind::Click, Action::OverlayBackdrop);
        if let Some(close) = doc.first_by_class(modal, "close") {
            doc.listen(close, EventKind::Click, Action::CloseOverlay);
        }
        let root = doc.root();
        doc.listen(root, EventKind::KeyDown, Action::OverlayKey);
    }

    /// Show catalog item `index` in the overlay, or open its live link when
    /// the overlay markup is incomplete.
    pub fn open(&self, doc: &mut Document, index: usize) -> bool {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(project) = items.get(index) else {
            warn!("Project not found at index {}", index);
            return false;
        };
        let parts: Option<Vec<NodeId>> = MODAL_PARTS
            .iter()
            .map(|id| doc.get_element_by_id(id))
            .collect();
        let (Some(modal), Some(parts)) = (doc.get_element_by_id(MODAL_ID), parts) else {
            warn!("Overlay markup missing; opening {} directly", project.title);
            if !project.live.is_empty() {
                self.ctx.host.open(&project.live, "_blank");
            }
            return false;
        };
        let [title, image, desc, tech, link, code] = [parts[0], parts[1], parts[2], parts[3], parts[4], parts[5]];
        doc.set_text(title, &project.title);
        doc.set_attr(image, "src", &project.image);
        doc.set_attr(image, "alt", &project.title);
        doc.set_text(desc, &project.description);
        let _ = doc.set_inner_html(tech, &render::modal_tech(&project.tech));
        doc.set_attr(link, "href", &project.live);
        doc.set_attr(code, "href", &project.code);

        doc.add_class(modal, "show");
        doc.set_attr(modal, "aria-hidden", "false");
        let body = doc.body();
        doc.set_style(body, "overflow", "hidden");
        true
    }

    pub fn close(&self, doc: &mut Document) {
        let Some(modal) = doc.get_element_by_id(MODAL_ID) else {
            return;
        };
        doc.remove_class(modal, "show");
        doc.set_attr(modal, "aria-hidden", "true");
        let body = doc.body();
        doc.set_style(body, "overflow", "auto");
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.get_element_by_id(MODAL_ID)
            .is_some_and(|m| doc.has_class(m, "show"))
    }

    /// Backdrop clicks close; clicks bubbling up from the content do not.
    pub fn backdrop(&self, doc: &mut Document, event: &Event, current: NodeId) {
        if event.target == current {
            self.close(doc);
        }
    }

    pub fn key(&self, doc: &mut Document, event: &Event) {
        if event.key.as_deref() == Some("Escape") && self.is_open(doc) {
            self.close(doc);
        }
    }
}
