//! Render functions for the gallery's visual challenges.
//!
//! Each challenge renders into an explicit [`gallery_dom::Element`] container
//! rather than mutating a live document on page load. Geometry is exposed
//! separately from element construction so it can be checked directly.

pub mod color;
pub mod emoji;
pub mod glitch;
pub mod navigation;
pub mod registry;
pub mod sierpinski;
pub mod sphere;
pub mod traits;
pub mod tree;

pub use emoji::{contains_emoji, is_emoji, split_emoji, wrap_emojis, EMOJI_RANGES};
pub use glitch::{annotate_spans, GlitchText};
pub use navigation::Navigation;
pub use registry::ChallengeRegistry;
pub use sierpinski::{SierpinskiFractal, SierpinskiOptions, Triangle};
pub use sphere::{Sphere, SphereLayer, SphereOptions};
pub use traits::{Challenge, RenderContext, RenderError};
pub use tree::{BranchingTree, Segment, TreeOptions};
