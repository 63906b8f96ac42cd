//! Trait definitions for challenges.

use gallery_dom::Element;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Context passed to a challenge while rendering.
#[derive(Debug)]
pub struct RenderContext {
    /// Source of the pseudo-random colours and timings
    pub rng: StdRng,

    /// Overrides the recursion depth of fractal challenges
    pub depth: Option<i32>,
}

impl RenderContext {
    /// Create a context with a fixed seed, for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            depth: None,
        }
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = Some(depth);
        self
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            depth: None,
        }
    }
}

/// Errors that can occur while rendering a challenge.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid option {option}: {message}")]
    InvalidOption {
        option: &'static str,
        message: String,
    },
}

/// A self-contained visual challenge.
pub trait Challenge: Send + Sync {
    /// Category directory (e.g. "fractals")
    fn category(&self) -> &'static str;

    /// Challenge directory name (e.g. "sierpinski-fractal")
    fn slug(&self) -> &'static str;

    /// Human readable title
    fn title(&self) -> &'static str;

    /// `category/slug`, matching the challenge's path under `challenges/`.
    fn key(&self) -> String {
        format!("{}/{}", self.category(), self.slug())
    }

    /// The container element the challenge's page provides.
    fn container(&self) -> Element {
        Element::new("div").with_class(self.slug())
    }

    /// Render into `container`, returning the number of elements created.
    fn render(&self, container: &mut Element, ctx: &mut RenderContext)
        -> Result<usize, RenderError>;
}
