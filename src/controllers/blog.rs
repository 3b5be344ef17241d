use log::{info, warn};

use crate::controllers::{images, Context};
use crate::events::{Action, EventKind};
use crate::fetch::{fetch_json, FetchError};
use crate::models::post::Post;
use crate::render;

pub const LIST_ID: &str = "blogList";

/// Load `data/blog.json` into `#blogList`. Pages without the list skip it.
pub async fn load(ctx: &Context) -> Result<usize, FetchError> {
    let m = &ctx.config.messages;
    {
        let mut doc = ctx.doc();
        let Some(list) = doc.get_element_by_id(LIST_ID) else {
            return Ok(0);
        };
        let _ = doc.set_inner_html(list, &render::loading(&m.blog_loading));
    }

    let path = &ctx.config.data.blog;
    let result: Result<Vec<Post>, FetchError> = fetch_json(ctx.fetcher.as_ref(), path).await;

    let mut doc = ctx.doc();
    let Some(list) = doc.get_element_by_id(LIST_ID) else {
        return Ok(0);
    };
    let posts = match result {
        Ok(posts) => posts,
        Err(e) => {
            warn!("Error loading blog posts from {}: {}", path, e);
            let _ = doc.set_inner_html(list, &render::load_error(&m.blog_error, &m.retry));
            for button in doc.by_class(list, "retry-btn") {
                doc.listen(button, EventKind::Click, Action::RetryBlog);
            }
            return Err(e);
        }
    };

    let html = if posts.is_empty() {
        render::notice(&m.blog_empty)
    } else {
        posts
            .iter()
            .map(|p| render::blog_card(p, &ctx.config.data.blog_placeholder, m))
            .collect::<Vec<_>>()
            .join("\n")
    };
    if let Err(e) = doc.set_inner_html(list, &html) {
        warn!("Blog markup rejected: {}", e);
    }
    images::bind_fallbacks(&mut doc, list);
    info!("Loaded {} blog posts", posts.len());
    Ok(posts.len())
}
