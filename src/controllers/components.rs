use log::{info, warn};

use crate::controllers::i18n::Localizer;
use crate::controllers::{menu, nav, theme, Context};
use crate::dom::Document;
use crate::fetch::{fetch_text, FetchError};

/// Re-attach everything that lives in injected header/footer markup. Safe to
/// run any number of times.
pub fn rebind(ctx: &Context, doc: &mut Document) {
    let site = &ctx.config.site;
    let timing = &ctx.config.timing;
    nav::sync(doc, site, &ctx.host.location());
    menu::bind(doc, site);
    theme::bind(ctx, doc);
    nav::reveal_once(doc, site, timing.nav_reveal_base_ms, timing.menu_stagger_ms);
}

/// Fetch `path` into the element with id `mount`. On failure the mount keeps
/// whatever it had.
pub async fn load(
    ctx: &Context,
    localizer: &Localizer,
    mount: &str,
    path: &str,
) -> Result<(), FetchError> {
    let html = match fetch_text(ctx.fetcher.as_ref(), path).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Component {} not loaded into #{}: {}", path, mount, e);
            return Err(e);
        }
    };

    let mut doc = ctx.doc();
    let Some(node) = doc.get_element_by_id(mount) else {
        warn!("Mount point #{} missing; {} discarded", mount, path);
        return Ok(());
    };
    if let Err(e) = doc.set_inner_html(node, &html) {
        warn!("Component {} is not valid markup: {}", path, e);
        return Err(FetchError::Parse(e));
    }
    rebind(ctx, &mut doc);
    localizer.localize_subtree(&mut doc, node);
    info!("Loaded {} into #{}", path, mount);
    Ok(())
}
