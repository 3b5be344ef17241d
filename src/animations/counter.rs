use std::time::Duration;

use crate::dom::{self, NodeId, SharedDocument};

pub fn suffix(target: &str) -> &'static str {
    if target == "100" {
        "%"
    } else {
        "+"
    }
}

/// Displayed text after `tick` ticks of a count-up towards `target`.
pub fn frame(target: u64, tick: u64, ticks: u64, suffix: &str) -> String {
    let ticks = ticks.max(1);
    let value = if tick >= ticks {
        target
    } else {
        (target as f64 * tick as f64 / ticks as f64).floor() as u64
    };
    format!("{}{}", value, suffix)
}

/// Count `node` up to its `data-target` over `duration_ms`.
pub async fn run(doc: SharedDocument, node: NodeId, duration_ms: u64, tick_ms: u64) {
    let raw = {
        let d = dom::lock(&doc);
        d.data(node, "target").unwrap_or_default().trim().to_string()
    };
    let Ok(target) = raw.parse::<u64>() else {
        return;
    };
    let suffix = suffix(&raw);
    let tick_ms = tick_ms.max(1);
    let ticks = (duration_ms / tick_ms).max(1);
    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    interval.tick().await;
    for tick in 1..=ticks {
        interval.tick().await;
        let mut d = dom::lock(&doc);
        if !d.is_attached(node) {
            return;
        }
        d.set_text(node, &frame(target, tick, ticks, suffix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames() {
        assert_eq!(frame(100, 0, 125, "%"), "0%");
        assert_eq!(frame(100, 62, 125, "%"), "49%");
        assert_eq!(frame(100, 125, 125, "%"), "100%");
        assert_eq!(frame(50, 500, 125, "+"), "50+");
        assert_eq!(suffix("100"), "%");
        assert_eq!(suffix("50"), "+");
    }
}
