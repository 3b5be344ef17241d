//! The page runtime: builds the controllers once, runs the startup sequence
//! and routes dispatched events to whoever registered for them.

use std::sync::Arc;

use log::{debug, info};

use crate::animations::Animations;
use crate::config::SiteConfig;
use crate::controllers::contact::ContactForm;
use crate::controllers::i18n::{self, Localizer};
use crate::controllers::order::OrderForm;
use crate::controllers::projects::Gallery;
use crate::controllers::submission::{SimulatedSubmission, SubmissionPort};
use crate::controllers::{blog, components, cv, images, menu, theme, whatsapp, Context};
use crate::dom::{Document, NodeId, SharedDocument};
use crate::events::{Action, Event, EventKind, Outcome};
use crate::fetch::Fetch;
use crate::host::Host;
use crate::prefs::{KeyValueStore, Preferences};

pub struct Site {
    ctx: Context,
    localizer: Localizer,
    gallery: Gallery,
    contact: ContactForm,
    order: OrderForm,
    animations: Animations,
}

impl Site {
    pub fn new(
        doc: SharedDocument,
        config: SiteConfig,
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn Fetch>,
        host: Arc<dyn Host>,
    ) -> Self {
        let prefs = Preferences::new(store, &config.site.default_language);
        let port: Arc<dyn SubmissionPort> = Arc::new(SimulatedSubmission::new(&config.timing));
        let ctx = Context::new(doc, Arc::new(config), prefs, fetcher, host);
        Site {
            localizer: Localizer::new(ctx.clone()),
            gallery: Gallery::new(ctx.clone()),
            contact: ContactForm::new(ctx.clone(), port.clone()),
            order: OrderForm::new(ctx.clone(), port),
            animations: Animations::new(ctx.clone()),
            ctx,
        }
    }

    /// Replace the submission port used by both forms.
    pub fn with_submission(mut self, port: Arc<dyn SubmissionPort>) -> Self {
        self.contact = ContactForm::new(self.ctx.clone(), port.clone());
        self.order = OrderForm::new(self.ctx.clone(), port);
        self
    }

    pub fn document(&self) -> SharedDocument {
        self.ctx.doc.clone()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn order(&self) -> &OrderForm {
        &self.order
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    fn with_doc<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut doc = self.ctx.doc();
        f(&mut *doc)
    }

    /// Startup sequence for one page view.
    pub async fn boot(&self) {
        let ctx = &self.ctx;
        let initial = self.with_doc(|doc| theme::apply_initial(ctx, doc));
        info!("Booting {} ({} theme)", ctx.host.location(), initial.as_str());

        let parts = &ctx.config.components;
        let (header, footer, dictionary) = tokio::join!(
            components::load(ctx, &self.localizer, &parts.header_mount, &parts.header),
            components::load(ctx, &self.localizer, &parts.footer_mount, &parts.footer),
            self.localizer.apply(),
        );
        debug!(
            "Header ok: {}, footer ok: {}, dictionary ok: {}",
            header.is_ok(),
            footer.is_ok(),
            dictionary.is_ok()
        );

        let _ = tokio::join!(self.gallery.load(), blog::load(ctx));

        self.with_doc(|doc| {
            let root = doc.root();
            i18n::bind_switches(doc, root);
            self.gallery.bind_overlay(doc);
            self.contact.bind(doc);
            self.order.bind(doc);
            whatsapp::bind(ctx, doc);
            cv::bind(doc);
        });
        self.animations.start();
        info!("Site ready");
    }

    /// Stop every timer and loop the site started.
    pub fn shutdown(&self) {
        self.ctx.shutdown.cancel();
    }

    /// Deliver `event` to the listeners on its target and then on each
    /// ancestor. Events aimed at detached nodes reach nobody.
    pub async fn dispatch(&self, event: Event) -> Outcome {
        let mut outcome = Outcome::default();
        let (event, listeners) = {
            let doc = self.ctx.doc();
            if !doc.is_attached(event.target) {
                return outcome;
            }
            let event = if event.kind == EventKind::KeyDown
                && event.is_activation_key()
                && doc.has_listener(event.target, EventKind::KeyDown, Action::ActivateOnKey)
            {
                outcome.default_prevented = true;
                Event::click(event.target)
            } else {
                event
            };
            let listeners: Vec<(NodeId, Action)> = doc
                .path_to_root(event.target)
                .into_iter()
                .flat_map(|node| {
                    doc.listeners(node)
                        .iter()
                        .filter(|l| l.kind == event.kind)
                        .map(move |l| (node, l.action))
                        .collect::<Vec<_>>()
                })
                .collect();
            (event, listeners)
        };

        for (current, action) in listeners {
            if self.handle(action, &event, current).await {
                outcome.default_prevented = true;
            }
            outcome.handled += 1;
        }
        outcome
    }

    /// Run one listener. Returns whether the default action is suppressed.
    async fn handle(&self, action: Action, event: &Event, current: NodeId) -> bool {
        let ctx = &self.ctx;
        let site = &ctx.config.site;
        match action {
            Action::ActivateOnKey => false,
            Action::ToggleTheme => {
                self.with_doc(|doc| theme::toggle(ctx, doc));
                false
            }
            Action::ToggleMenu => {
                self.with_doc(|doc| menu::toggle(doc, site, ctx.config.timing.menu_stagger_ms));
                false
            }
            Action::CloseMenu => {
                self.with_doc(|doc| menu::close(doc, site));
                false
            }
            Action::SwitchLanguage => {
                let lang = self.with_doc(|doc| doc.data(current, "lang").map(str::to_string));
                if let Some(lang) = lang {
                    let _ = self.localizer.switch(&lang).await;
                }
                true
            }
            Action::FilterProjects => {
                self.with_doc(|doc| self.gallery.filter(doc, current));
                false
            }
            Action::OpenProject(index) => {
                self.with_doc(|doc| self.gallery.open(doc, index));
                false
            }
            Action::CloseOverlay => {
                self.with_doc(|doc| self.gallery.close(doc));
                false
            }
            Action::OverlayBackdrop => {
                self.with_doc(|doc| self.gallery.backdrop(doc, event, current));
                false
            }
            Action::OverlayKey => {
                self.with_doc(|doc| self.gallery.key(doc, event));
                false
            }
            Action::RetryProjects => {
                let _ = self.gallery.load().await;
                false
            }
            Action::RetryBlog => {
                let _ = blog::load(ctx).await;
                false
            }
            Action::ImageFallback => {
                self.with_doc(|doc| images::fallback(doc, current));
                false
            }
            Action::SelectPackage => {
                self.with_doc(|doc| self.order.select_package(doc, current));
                true
            }
            Action::RecalculateBudget => {
                self.with_doc(|doc| self.order.recalculate(doc));
                false
            }
            Action::TrackOrderProgress => {
                self.with_doc(|doc| self.order.track_progress(doc));
                false
            }
            Action::SubmitOrder => self.with_doc(|doc| self.order.submit(doc)),
            Action::SubmitContact => self.with_doc(|doc| self.contact.submit(doc)),
            Action::OpenWhatsapp => self.with_doc(|doc| whatsapp::activate(ctx, doc)),
            Action::DownloadCv => self.with_doc(|doc| cv::activate(ctx, doc)),
            Action::ScrollToTop => {
                self.animations.scroll_to_top();
                false
            }
            Action::PageScroll => {
                self.animations.on_scroll();
                false
            }
            Action::MagneticMove | Action::MagneticLeave => {
                self.with_doc(|doc| self.animations.magnetic(doc, event, current));
                false
            }
        }
    }
}
