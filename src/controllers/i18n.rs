use std::sync::{Arc, Mutex, PoisonError};

use log::{info, warn};
use serde_json::{Map, Value};

use crate::controllers::Context;
use crate::dom::{Document, NodeId};
use crate::events::{Action, EventKind};
use crate::fetch::{fetch_json, FetchError};
use crate::prefs::PrefKey;

pub type Dictionary = Map<String, Value>;

/// Text for `key`; missing keys and nulls yield an empty string.
pub fn lookup(dict: &Dictionary, key: &str) -> String {
    match dict.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Fill every `data-i18n` element under `scope` and attach any language
/// switches found there. Returns how many elements were filled.
pub fn localize(doc: &mut Document, scope: NodeId, dict: &Dictionary) -> usize {
    let targets = doc.by_attr(scope, "data-i18n");
    for &node in &targets {
        let key = doc.data(node, "i18n").unwrap_or_default().to_string();
        doc.set_text(node, &lookup(dict, &key));
    }
    bind_switches(doc, scope);
    targets.len()
}

pub fn bind_switches(doc: &mut Document, scope: NodeId) {
    for node in doc.by_attr(scope, "data-lang") {
        doc.listen(node, EventKind::Click, Action::SwitchLanguage);
    }
}

/// Fetches dictionaries and keeps the last one for fragments injected later.
#[derive(Clone)]
pub struct Localizer {
    ctx: Context,
    cache: Arc<Mutex<Option<(String, Dictionary)>>>,
}

impl Localizer {
    pub fn new(ctx: Context) -> Self {
        Localizer {
            ctx,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    pub fn language(&self) -> Option<String> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(lang, _)| lang.clone())
    }

    /// Load the stored language's dictionary and apply it to the whole page.
    pub async fn apply(&self) -> Result<usize, FetchError> {
        let lang = self.ctx.prefs.language();
        let path = self.ctx.config.data.dictionary(&lang);
        let dict: Dictionary = match fetch_json(self.ctx.fetcher.as_ref(), &path).await {
            Ok(d) => d,
            Err(e) => {
                warn!("Dictionary {} unavailable: {}", path, e);
                return Err(e);
            }
        };

        let filled = {
            let mut doc = self.ctx.doc();
            let root = doc.document_element();
            doc.set_attr(root, "lang", &lang);
            localize(&mut doc, root, &dict)
        };
        info!("Applied {} dictionary to {} elements", lang, filled);
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = Some((lang, dict));
        Ok(filled)
    }

    /// Re-localize a freshly injected subtree from the cached dictionary.
    pub fn localize_subtree(&self, doc: &mut Document, scope: NodeId) -> usize {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        match cache.as_ref() {
            Some((_, dict)) => localize(doc, scope, dict),
            None => {
                bind_switches(doc, scope);
                0
            }
        }
    }

    /// Persist `lang` and re-apply in place.
    pub async fn switch(&self, lang: &str) -> Result<usize, FetchError> {
        self.ctx.prefs.set(PrefKey::Language, lang);
        self.apply().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_missing_is_empty() {
        let dict: Dictionary = serde_json::from_str(r#"{"a":"Merhaba","n":3,"z":null}"#).unwrap();
        assert_eq!(lookup(&dict, "a"), "Merhaba");
        assert_eq!(lookup(&dict, "n"), "3");
        assert_eq!(lookup(&dict, "z"), "");
        assert_eq!(lookup(&dict, "missing"), "");
    }

    #[test]
    fn test_localize_replaces_text_and_binds_switches() {
        let mut doc = Document::parse(
            r#"<h1 data-i18n="hero.title">Hello</h1><p data-i18n="gone">old</p><button data-lang="en">EN</button>"#,
        )
        .unwrap();
        let dict: Dictionary = serde_json::from_str(r#"{"hero.title":"Merhaba"}"#).unwrap();
        let root = doc.root();
        assert_eq!(localize(&mut doc, root, &dict), 2);
        let body = doc.body();
        assert_eq!(doc.text_content(doc.by_tag(body, "h1")[0]), "Merhaba");
        assert_eq!(doc.text_content(doc.by_tag(body, "p")[0]), "");
        let button = doc.by_tag(body, "button")[0];
        assert!(doc.has_listener(button, EventKind::Click, Action::SwitchLanguage));
    }
}
