use serde::{Deserialize, Serialize};

/// One entry of `data/blog.json`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Post {
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Post {
    /// Image to show, or `fallback` when the post has none.
    pub fn image_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.image.as_deref() {
            Some(img) if !img.is_empty() => img,
            _ => fallback,
        }
    }

    /// Link target; posts without one get a non-navigating anchor.
    pub fn href(&self) -> &str {
        match self.link.as_deref() {
            Some(link) if !link.is_empty() => link,
            _ => "#",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallbacks_apply_to_missing_and_empty_fields() {
        let p: Post = serde_json::from_str(
            r#"{"title":"T","date":"2024-05-01","summary":"S","image":""}"#,
        )
        .unwrap();
        assert_eq!(p.image_or("default.jpg"), "default.jpg");
        assert_eq!(p.href(), "#");

        let p: Post = serde_json::from_str(
            r#"{"title":"T","date":"d","summary":"s","image":"a.jpg","link":"post.html"}"#,
        )
        .unwrap();
        assert_eq!(p.image_or("default.jpg"), "a.jpg");
        assert_eq!(p.href(), "post.html");
    }
}
