//! Page controllers. Each one binds typed listeners onto the document and
//! handles the actions the `Site` routes back to it.

pub mod blog;
pub mod components;
pub mod contact;
pub mod cv;
pub mod i18n;
pub mod images;
pub mod menu;
pub mod nav;
pub mod order;
pub mod projects;
pub mod status;
pub mod submission;
pub mod theme;
pub mod whatsapp;

use std::future::Future;
use std::sync::{Arc, MutexGuard};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::SiteConfig;
use crate::dom::{self, Document, SharedDocument};
use crate::fetch::Fetch;
use crate::host::Host;
use crate::prefs::Preferences;

/// Everything a controller reaches for: the document, configuration and the
/// browser ports. Cheap to clone.
#[derive(Clone)]
pub struct Context {
    pub doc: SharedDocument,
    pub config: Arc<SiteConfig>,
    pub prefs: Preferences,
    pub fetcher: Arc<dyn Fetch>,
    pub host: Arc<dyn Host>,
    pub shutdown: CancellationToken,
}

impl Context {
    pub fn new(
        doc: SharedDocument,
        config: Arc<SiteConfig>,
        prefs: Preferences,
        fetcher: Arc<dyn Fetch>,
        host: Arc<dyn Host>,
    ) -> Self {
        Context {
            doc,
            config,
            prefs,
            fetcher,
            host,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn doc(&self) -> MutexGuard<'_, Document> {
        dom::lock(&self.doc)
    }

    /// Run `f` against the document after `delay_ms`, unless the site shuts
    /// down first.
    pub fn after<F>(&self, delay_ms: u64, f: F)
    where
        F: FnOnce(&mut Document) + Send + 'static,
    {
        let doc = self.doc.clone();
        self.spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            f(&mut *dom::lock(&doc));
        });
    }

    /// Spawn a task that is dropped at its next suspension point once the
    /// site shuts down.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = task => {}
            }
        });
    }
}
