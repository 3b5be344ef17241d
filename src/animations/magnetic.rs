use crate::dom::{Document, NodeId};

const MAX_DISTANCE: f64 = 100.0;
const PULL: f64 = 0.3;

/// Translation for a pointer at `(x, y)` from the element's center.
pub fn offset(x: f64, y: f64) -> (f64, f64) {
    let distance = (x * x + y * y).sqrt();
    let strength = (1.0 - distance / MAX_DISTANCE).max(0.0);
    (x * strength * PULL, y * strength * PULL)
}

pub fn follow(doc: &mut Document, node: NodeId, x: f64, y: f64) {
    let (dx, dy) = offset(x, y);
    doc.set_style(node, "transform", &format!("translate({}px, {}px)", dx, dy));
}

pub fn release(doc: &mut Document, node: NodeId) {
    doc.set_style(node, "transform", "translate(0, 0)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_falls_off_with_distance() {
        assert_eq!(offset(0.0, 0.0), (0.0, 0.0));
        let (dx, dy) = offset(30.0, 40.0);
        assert!((dx - 4.5).abs() < 1e-9);
        assert!((dy - 6.0).abs() < 1e-9);
        assert_eq!(offset(80.0, 60.0), (0.0, 0.0));
        assert_eq!(offset(300.0, 0.0), (0.0, 0.0));
    }
}
