//! Client-side runtime for a static portfolio and business site.
//!
//! The page scripts of the site (header/footer injection, theme and language
//! preferences, project gallery, blog list, contact and order forms, the
//! decorative animations) are modelled as controllers over an in-memory
//! document. Browser facilities sit behind small ports so the same code runs
//! headless, in tests, or behind a real host.

pub mod animations;
pub mod boot;
pub mod config;
pub mod controllers;
pub mod dom;
pub mod events;
pub mod fetch;
pub mod host;
pub mod models;
pub mod prefs;
pub mod render;
pub mod site;
pub mod validate;

pub use config::SiteConfig;
pub use dom::{Document, NodeId, SharedDocument};
pub use events::{Action, Event, EventKind, Outcome};
pub use site::Site;
