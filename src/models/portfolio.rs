use serde::{Deserialize, Serialize};

/// Category value that disables filtering.
pub const ALL_CATEGORIES: &str = "all";

/// One entry of `data/projects.json`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub live: String,
    #[serde(default)]
    pub code: String,
}

impl Project {
    /// Items matching `category`, paired with their index in the full list.
    /// `all` matches everything. Order is preserved.
    pub fn filter<'a>(items: &'a [Project], category: &str) -> Vec<(usize, &'a Project)> {
        items
            .iter()
            .enumerate()
            .filter(|(_, p)| category == ALL_CATEGORIES || p.category == category)
            .collect()
    }

    /// The first `count` items, for the home page strip.
    pub fn featured(items: &[Project], count: usize) -> &[Project] {
        &items[..items.len().min(count)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str, category: &str) -> Project {
        Project {
            title: title.to_string(),
            category: category.to_string(),
            description: String::new(),
            tech: vec![],
            image: String::new(),
            live: String::new(),
            code: String::new(),
        }
    }

    #[test]
    fn filter_keeps_relative_order_and_full_indices() {
        let items = vec![project("a", "web"), project("b", "print"), project("c", "web")];
        let web: Vec<_> = Project::filter(&items, "web")
            .into_iter()
            .map(|(i, p)| (i, p.title.as_str()))
            .collect();
        assert_eq!(web, vec![(0, "a"), (2, "c")]);
        assert_eq!(Project::filter(&items, ALL_CATEGORIES).len(), 3);
        assert!(Project::filter(&items, "video").is_empty());
    }

    #[test]
    fn featured_is_capped() {
        let items = vec![project("a", "web"), project("b", "web")];
        assert_eq!(Project::featured(&items, 3).len(), 2);
        assert_eq!(Project::featured(&items, 1)[0].title, "a");
    }

    #[test]
    fn missing_optional_fields_default() {
        let p: Project = serde_json::from_str(r#"{"title":"Only title"}"#).unwrap();
        assert_eq!(p.title, "Only title");
        assert!(p.tech.is_empty());
        assert_eq!(p.live, "");
    }
}
