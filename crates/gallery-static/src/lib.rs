//! Public directory builder for the challenge gallery.
//!
//! Copies challenge sources into `public/` and generates the project index
//! home page.

pub mod builder;
pub mod index;
pub mod templates;

pub use builder::{copy_tree, BuildConfig, BuildError, BuildResult, PublicBuilder, StaticFile};
pub use index::{IndexError, Project, ProjectIndex};
