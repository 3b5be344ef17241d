use rand::Rng;

use crate::dom::Document;

pub const CONTAINER_ID: &str = "particleContainer";

/// Fill the particle container with `count` floating dots spread across a
/// viewport `width` pixels wide. Returns how many were added.
pub fn populate<R: Rng>(doc: &mut Document, count: usize, width: f64, rng: &mut R) -> usize {
    let Some(container) = doc.get_element_by_id(CONTAINER_ID) else {
        return 0;
    };
    let width = width.max(1.0);
    for _ in 0..count {
        let particle = doc.create_element("div");
        doc.add_class(particle, "particle");
        let left: f64 = rng.gen_range(0.0..width);
        let delay: f64 = rng.gen_range(0.0..5.0);
        let duration: f64 = 3.0 + rng.gen_range(0.0..2.0);
        doc.set_style(particle, "left", &format!("{:.1}px", left));
        doc.set_style(particle, "animation-delay", &format!("{:.2}s", delay));
        doc.set_style(particle, "animation-duration", &format!("{:.2}s", duration));
        doc.append_child(container, particle);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_populates_within_bounds() {
        let mut doc = Document::parse(r#"<div id="particleContainer"></div>"#).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(populate(&mut doc, 50, 800.0, &mut rng), 50);
        let container = doc.get_element_by_id(CONTAINER_ID).unwrap();
        let particles = doc.by_class(container, "particle");
        assert_eq!(particles.len(), 50);
        for p in particles {
            let left: f64 = doc.style(p, "left").unwrap().trim_end_matches("px").parse().unwrap();
            assert!((0.0..=800.0).contains(&left));
            let duration: f64 = doc
                .style(p, "animation-duration")
                .unwrap()
                .trim_end_matches('s')
                .parse()
                .unwrap();
            assert!((3.0..=5.0).contains(&duration));
        }
    }

    #[test]
    fn test_no_container_no_particles() {
        let mut doc = Document::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(populate(&mut doc, 50, 800.0, &mut rng), 0);
    }
}
