use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Per-path weight overrides for an animation state.
///
/// Paths are `/`-separated. A path without its own entry inherits the weight
/// of its nearest listed ancestor, so masking `"body"` also masks
/// `"body/arm/position"`. Unlisted paths weigh `1.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationMask {
    weights: FxHashMap<String, f32>,
}

impl AnimationMask {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_weight(mut self, path: impl Into<String>, weight: f32) -> Self {
        self.set_weight(path, weight);
        self
    }

    pub fn set_weight(&mut self, path: impl Into<String>, weight: f32) {
        self.weights.insert(path.into(), weight.clamp(0.0, 1.0));
    }

    pub fn remove_weight(&mut self, path: &str) -> bool {
        self.weights.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.weights.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.weights.iter().map(|(path, weight)| (path.as_str(), *weight))
    }

    #[must_use]
    pub fn node_weight(&self, path: &str) -> f32 {
        if self.weights.is_empty() {
            return 1.0;
        }

        let mut current = path;
        loop {
            if let Some(weight) = self.weights.get(current) {
                return *weight;
            }
            match current.rfind('/') {
                Some(split) => current = &current[..split],
                None => return 1.0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_path_weighs_one() {
        assert_eq!(AnimationMask::new().node_weight("anything"), 1.0);
    }

    #[test]
    fn nearest_ancestor_wins() {
        let mask = AnimationMask::new()
            .with_weight("body", 0.5)
            .with_weight("body/arm", 0.25);

        assert_eq!(mask.node_weight("body/arm/position"), 0.25);
        assert_eq!(mask.node_weight("body/leg"), 0.5);
        assert_eq!(mask.node_weight("head"), 1.0);
        // Prefix match must respect separators.
        assert_eq!(mask.node_weight("bodyguard"), 1.0);
    }

    #[test]
    fn weights_are_clamped() {
        let mask = AnimationMask::new().with_weight("a", 3.0);
        assert_eq!(mask.node_weight("a"), 1.0);
    }
}
