//! Challenge registry for looking up challenges by path.

use std::collections::BTreeMap;

use crate::glitch::GlitchText;
use crate::sierpinski::SierpinskiFractal;
use crate::sphere::Sphere;
use crate::traits::Challenge;
use crate::tree::BranchingTree;

/// A registry of renderable challenges, keyed by `category/slug`.
#[derive(Default)]
pub struct ChallengeRegistry {
    /// Challenges by lowercase key
    challenges: BTreeMap<String, Box<dyn Challenge>>,
}

impl ChallengeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in challenge.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SierpinskiFractal::default()));
        registry.register(Box::new(BranchingTree::default()));
        registry.register(Box::new(Sphere::wireframe()));
        registry.register(Box::new(Sphere::sun()));
        registry.register(Box::new(GlitchText::default()));
        registry
    }

    /// Register a challenge, replacing any existing one with the same key.
    pub fn register(&mut self, challenge: Box<dyn Challenge>) {
        let key = challenge.key().to_lowercase();
        if self.challenges.insert(key.clone(), challenge).is_some() {
            tracing::warn!("Replaced challenge {}", key);
        }
    }

    /// Look up a challenge by `category/slug` (case-insensitive).
    ///
    /// A bare slug is accepted when it is unambiguous.
    pub fn get(&self, key: &str) -> Option<&dyn Challenge> {
        let key = key.trim_matches('/').to_lowercase();

        if let Some(challenge) = self.challenges.get(&key) {
            return Some(challenge.as_ref());
        }

        let mut by_slug = self
            .challenges
            .iter()
            .filter(|(k, _)| k.rsplit('/').next() == Some(key.as_str()));

        match (by_slug.next(), by_slug.next()) {
            (Some((_, challenge)), None) => Some(challenge.as_ref()),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    /// All challenges, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Challenge> {
        self.challenges.values().map(|c| c.as_ref())
    }
}
