//! HTML builders for the catalog cards and the transient loading, error and
//! empty states. Output is parsed back into the document by the controllers,
//! which then attach listeners to the marked nodes (`data-project`,
//! `data-fallback`, `.retry-btn`).

use crate::config::Messages;
use crate::models::portfolio::Project;
use crate::models::post::Post;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn tech_badges(tech: &[String], style: Option<&str>) -> String {
    tech.iter()
        .map(|t| match style {
            Some(s) => format!(r#"<span class="tech-badge" style="{}">{}</span>"#, s, html_escape(t)),
            None => format!(r#"<span class="tech-badge">{}</span>"#, html_escape(t)),
        })
        .collect()
}

/// Badges for the detail overlay.
pub fn modal_tech(tech: &[String]) -> String {
    tech_badges(tech, None)
}

/// An `img` that swaps to `fallback` once if it fails to load.
fn fallback_img(src: &str, alt: &str, fallback: &str, fallback_alt: &str, extra: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" data-fallback="{}" data-fallback-alt="{}"{}>"#,
        html_escape(src),
        html_escape(alt),
        html_escape(fallback),
        html_escape(fallback_alt),
        extra
    )
}

/// Gallery card. `index` is the position in the full catalog.
pub fn project_card(index: usize, p: &Project, placeholder: &str, m: &Messages) -> String {
    let img = fallback_img(
        &p.image,
        &p.title,
        placeholder,
        &m.image_missing_for(&p.title),
        r#" style="width: 100%; border-radius: 8px; margin-bottom: 16px;""#,
    );
    format!(
        r#"<div class="project-item card show">
<div class="card-body">
{img}
<h3>{title}</h3>
<p class="project-category"><strong>{label}</strong> {category}</p>
<div class="project-tech">{badges}</div>
<p>{description}</p>
<button class="btn btn-dark project-open" data-project="{index}">{details}</button>
</div>
</div>"#,
        img = img,
        title = html_escape(&p.title),
        label = html_escape(&m.category_label),
        category = html_escape(&p.category),
        badges = tech_badges(&p.tech, None),
        description = html_escape(&p.description),
        index = index,
        details = html_escape(&m.details),
    )
}

pub fn project_grid(items: &[(usize, &Project)], placeholder: &str, m: &Messages) -> String {
    items
        .iter()
        .map(|(i, p)| project_card(*i, p, placeholder, m))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Home-page card with live/code links, staggered by `position`.
pub fn featured_card(position: usize, p: &Project, placeholder: &str, m: &Messages) -> String {
    let src = if p.image.is_empty() { placeholder } else { &p.image };
    let img = fallback_img(
        src,
        &p.title,
        placeholder,
        &m.image_missing_for(&p.title),
        r#" style="width: 100%; height: 200px; object-fit: cover;" loading="lazy""#,
    );
    format!(
        r#"<div class="card fade-in" style="animation-delay: {delay}ms">
<div class="project-image-container">{img}</div>
<div class="card-body">
<h3>{title}</h3>
<div class="project-tech">{badges}</div>
<p>{description}</p>
<div class="project-links">
<a href="{live}" target="_blank" class="btn btn-dark">{live_label}</a>
<a href="{code}" target="_blank" class="btn btn-outline-dark">{code_label}</a>
</div>
</div>
</div>"#,
        delay = position * 100,
        img = img,
        title = html_escape(&p.title),
        badges = tech_badges(&p.tech, Some("font-size: 0.8rem;")),
        description = html_escape(&p.description),
        live = html_escape(&p.live),
        live_label = html_escape(&m.live_demo),
        code = html_escape(&p.code),
        code_label = html_escape(&m.view_code),
    )
}

pub fn blog_card(post: &Post, placeholder: &str, m: &Messages) -> String {
    let img = fallback_img(post.image_or(placeholder), &post.title, placeholder, &post.title, "");
    format!(
        r#"<article class="blog-card">
{img}
<div class="blog-content">
<span class="blog-date">{date}</span>
<h3>{title}</h3>
<p>{summary}</p>
<a href="{href}" class="blog-read-more">{read_more} <span>→</span></a>
</div>
</article>"#,
        img = img,
        date = html_escape(&post.date),
        title = html_escape(&post.title),
        summary = html_escape(&post.summary),
        href = html_escape(post.href()),
        read_more = html_escape(&m.read_more),
    )
}

pub fn loading(text: &str) -> String {
    format!(
        r#"<div class="loading-spinner" aria-live="polite">{}</div>"#,
        html_escape(text)
    )
}

/// Error text plus the retry control.
pub fn load_error(text: &str, retry: &str) -> String {
    format!(
        r#"<div class="error-message" role="alert"><p>{}</p><button class="btn btn-dark retry-btn">{}</button></div>"#,
        html_escape(text),
        html_escape(retry)
    )
}

pub fn notice(text: &str) -> String {
    format!(r#"<p class="text-muted">{}</p>"#, html_escape(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn project() -> Project {
        Project {
            title: "Kafe <Menü>".into(),
            category: "web".into(),
            description: "Sipariş & rezervasyon".into(),
            tech: vec!["HTML".into(), "CSS".into()],
            image: "assets/images/kafe.jpg".into(),
            live: "https://kafe.example".into(),
            code: "https://github.com/x/kafe".into(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(html_escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_project_card_parses_with_markers() {
        let m = Messages::default();
        let html = project_card(4, &project(), "assets/images/placeholder.jpg", &m);
        let mut doc = Document::new();
        let body = doc.body();
        doc.set_inner_html(body, &html).unwrap();

        let button = doc.first_by_class(body, "project-open").unwrap();
        assert_eq!(doc.data(button, "project"), Some("4"));
        let img = doc.by_tag(body, "img")[0];
        assert_eq!(doc.attr(img, "alt"), Some("Kafe <Menü>"));
        assert_eq!(doc.data(img, "fallback"), Some("assets/images/placeholder.jpg"));
        assert_eq!(doc.by_class(body, "tech-badge").len(), 2);
        assert!(doc.text_content(body).contains("Sipariş & rezervasyon"));
    }

    #[test]
    fn test_featured_card_uses_placeholder_for_empty_image() {
        let m = Messages::default();
        let mut p = project();
        p.image.clear();
        let html = featured_card(2, &p, "assets/images/placeholder.jpg", &m);
        assert!(html.contains(r#"src="assets/images/placeholder.jpg""#));
        assert!(html.contains("animation-delay: 200ms"));
    }

    #[test]
    fn test_blog_card_fallbacks() {
        let m = Messages::default();
        let post = Post {
            title: "İlk yazı".into(),
            date: "2024-01-01".into(),
            summary: "Özet".into(),
            image: None,
            link: None,
        };
        let html = blog_card(&post, "assets/images/blog-default.jpg", &m);
        assert!(html.contains(r#"src="assets/images/blog-default.jpg""#));
        assert!(html.contains(r##"href="#""##));
    }
}
