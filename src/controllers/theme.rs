use log::debug;

use crate::controllers::Context;
use crate::dom::Document;
use crate::events::{Action, EventKind};
use crate::prefs::PrefKey;

pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Toggle glyph: the sun offers the way out of dark mode.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

/// Theme currently applied to the document root.
pub fn current(doc: &Document) -> Theme {
    if doc.has_class(doc.document_element(), DARK_CLASS) {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Stored preference, then the host's color-scheme signal, then light.
pub fn resolve(ctx: &Context) -> Theme {
    ctx.prefs.theme().unwrap_or_else(|| {
        if ctx.host.prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    })
}

fn apply(doc: &mut Document, theme: Theme) {
    let root = doc.document_element();
    match theme {
        Theme::Dark => doc.add_class(root, DARK_CLASS),
        Theme::Light => doc.remove_class(root, DARK_CLASS),
    }
}

/// Pre-paint application at startup. Nothing is persisted.
pub fn apply_initial(ctx: &Context, doc: &mut Document) -> Theme {
    let theme = resolve(ctx);
    apply(doc, theme);
    debug!("Initial theme: {}", theme.as_str());
    theme
}

fn sync_toggle(ctx: &Context, doc: &mut Document, theme: Theme) {
    let Some(toggle) = doc.get_element_by_id(&ctx.config.site.theme_toggle_id) else {
        return;
    };
    doc.set_text(toggle, theme.icon());
    let label = match theme {
        Theme::Dark => &ctx.config.messages.theme_to_light,
        Theme::Light => &ctx.config.messages.theme_to_dark,
    };
    doc.set_attr(toggle, "aria-label", label);
}

/// Attach to the toggle in the current header, wherever it now lives, and
/// bring its glyph in line with the applied theme.
pub fn bind(ctx: &Context, doc: &mut Document) {
    let Some(toggle) = doc.get_element_by_id(&ctx.config.site.theme_toggle_id) else {
        return;
    };
    doc.listen(toggle, EventKind::Click, Action::ToggleTheme);
    let theme = current(doc);
    sync_toggle(ctx, doc, theme);
}

/// Flip, persist, and update the toggle. Returns the new theme.
pub fn toggle(ctx: &Context, doc: &mut Document) -> Theme {
    let next = current(doc).toggled();
    apply(doc, next);
    ctx.prefs.set(PrefKey::Theme, next.as_str());
    sync_toggle(ctx, doc, next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("Dark"), None);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::Dark.icon(), "☀️");
    }

    #[test]
    fn test_current_reads_root_class() {
        let mut doc = Document::parse(r#"<html class="dark"><body></body></html>"#).unwrap();
        assert_eq!(current(&doc), Theme::Dark);
        apply(&mut doc, Theme::Light);
        assert_eq!(current(&doc), Theme::Light);
    }
}
