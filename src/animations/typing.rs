use std::time::Duration;

use crate::config::AnimationSection;
use crate::dom::{self, Document, NodeId, SharedDocument};

/// Delay after typing `c`: spaces take twice as long, ampersands three times.
pub fn char_delay(c: char, base_ms: u64) -> u64 {
    match c {
        ' ' => base_ms * 2,
        '&' => base_ms * 3,
        _ => base_ms,
    }
}

/// `.typing-text` nodes of every `.typing-title` that also has a cursor.
pub fn targets(doc: &Document) -> Vec<NodeId> {
    doc.by_class(doc.root(), "typing-title")
        .into_iter()
        .filter(|&title| doc.first_by_class(title, "typing-cursor").is_some())
        .filter_map(|title| doc.first_by_class(title, "typing-text"))
        .collect()
}

async fn pause(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Type, hold, delete, rest, forever. Ends when the node leaves the
/// document; the caller cancels it on shutdown.
pub async fn run(doc: SharedDocument, node: NodeId, headline: String, timing: AnimationSection) {
    loop {
        for c in headline.chars() {
            {
                let mut d = dom::lock(&doc);
                if !d.is_attached(node) {
                    return;
                }
                d.append_text(node, &c.to_string());
            }
            pause(char_delay(c, timing.type_ms)).await;
        }
        pause(timing.hold_ms).await;
        loop {
            let removed = {
                let mut d = dom::lock(&doc);
                if !d.is_attached(node) {
                    return;
                }
                d.pop_char(node)
            };
            if !removed {
                break;
            }
            pause(timing.delete_ms).await;
        }
        pause(timing.restart_ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_delay() {
        assert_eq!(char_delay('a', 100), 100);
        assert_eq!(char_delay(' ', 100), 200);
        assert_eq!(char_delay('&', 100), 300);
    }

    #[test]
    fn test_targets_need_cursor() {
        let doc = Document::parse(
            r#"<h1 class="typing-title"><span class="typing-text"></span><span class="typing-cursor">|</span></h1>
            <h2 class="typing-title"><span class="typing-text"></span></h2>"#,
        )
        .unwrap();
        assert_eq!(targets(&doc).len(), 1);
    }
}
