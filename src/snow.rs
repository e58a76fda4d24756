use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    constants::snow::{DURATION, OPACITY, POSITION, SCALE, SNOW_COUNT},
    page::Document,
};

/// A single falling flake. Every attribute is drawn independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecorationNode {
    pub left: f32,     // Percentage of the width, [0, 100)
    pub duration: f32, // Seconds per fall, [10, 20)
    pub opacity: f32,  // [0.4, 1.0)
    pub scale: f32,    // [0.6, 1.6)
}

impl DecorationNode {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            left: rng.gen_range(POSITION),
            duration: rng.gen_range(DURATION),
            opacity: rng.gen_range(OPACITY),
            scale: rng.gen_range(SCALE),
        }
    }

    /// Inline CSS for a `snow` element.
    pub fn style(&self) -> String {
        format!(
            "left: {}vw; animation-duration: {}s; opacity: {}; transform: scale({})",
            self.left, self.duration, self.opacity, self.scale
        )
    }
}

/// Appends exactly `count` freshly sampled nodes to `document`.
pub fn generate_snow<R, D>(count: usize, rng: &mut R, document: &mut D)
where
    R: Rng + ?Sized,
    D: Document + ?Sized,
{
    for _ in 0..count {
        document.append_child(DecorationNode::sample(rng));
    }
    debug!("generated {count} snow nodes");
}

pub fn apply_snow<R, D>(rng: &mut R, document: &mut D)
where
    R: Rng + ?Sized,
    D: Document + ?Sized,
{
    generate_snow(SNOW_COUNT, rng, document);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::mock::StepRng, rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{background::ImageRef, page::Page};

    fn assert_in_bounds(node: &DecorationNode) {
        assert!(POSITION.contains(&node.left), "left out of range: {node:?}");
        assert!(DURATION.contains(&node.duration), "duration out of range: {node:?}");
        assert!(OPACITY.contains(&node.opacity), "opacity out of range: {node:?}");
        assert!(SCALE.contains(&node.scale), "scale out of range: {node:?}");
    }

    #[test]
    fn test_generates_exactly_count() {
        let mut page = Page::new();
        apply_snow(&mut rand::thread_rng(), &mut page);

        assert_eq!(page.body.len(), 32);
        page.body.iter().for_each(assert_in_bounds);
    }

    #[test]
    fn test_bounds_over_many_loads() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let mut page = Page::new();
            apply_snow(&mut rng, &mut page);
            assert_eq!(page.body.len(), SNOW_COUNT);
            page.body.iter().for_each(assert_in_bounds);
        }
    }

    #[test]
    fn test_custom_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut page = Page::new();
        generate_snow(0, &mut rng, &mut page);
        assert!(page.body.is_empty());

        generate_snow(5, &mut rng, &mut page);
        assert_eq!(page.body.len(), 5);
    }

    #[test]
    fn test_lowest_draws_hit_lower_bounds() {
        let node = DecorationNode::sample(&mut StepRng::new(0, 0));
        assert_eq!(node, DecorationNode { left: 0.0, duration: 10.0, opacity: 0.4, scale: 0.6 });
        insta::assert_snapshot!(
            serde_json::to_string(&node).unwrap(),
            @r#"{"left":0.0,"duration":10.0,"opacity":0.4,"scale":0.6}"#
        );
    }

    #[test]
    fn test_attributes_are_independent() {
        let mut rng = StdRng::seed_from_u64(11);
        let nodes: Vec<DecorationNode> = (0..64).map(|_| DecorationNode::sample(&mut rng)).collect();

        // Each attribute varies across nodes on its own
        let distinct = |f: fn(&DecorationNode) -> f32| {
            let mut values: Vec<u32> = nodes.iter().map(|n| f(n).to_bits()).collect();
            values.sort_unstable();
            values.dedup();
            values.len()
        };
        assert!(distinct(|n| n.left) > 1);
        assert!(distinct(|n| n.duration) > 1);
        assert!(distinct(|n| n.opacity) > 1);
        assert!(distinct(|n| n.scale) > 1);
    }

    #[test]
    fn test_does_not_touch_backdrop() {
        let mut page = Page::new();
        page.set_backdrop(&ImageRef::from("a.jpg"));
        apply_snow(&mut StdRng::seed_from_u64(5), &mut page);
        assert_eq!(page.backdrop, Some(ImageRef::from("a.jpg")));
    }

    #[test]
    fn test_style() {
        let node = DecorationNode { left: 50.0, duration: 15.0, opacity: 0.75, scale: 1.5 };
        assert_eq!(node.style(), "left: 50vw; animation-duration: 15s; opacity: 0.75; transform: scale(1.5)");
    }
}
