//! In-memory element tree for gallery challenges.
//!
//! Challenges render into an [`Element`] container instead of a live browser
//! document, which keeps them testable and lets the CLI print the result as
//! an HTML fragment.

pub mod html;
pub mod node;
pub mod style;

pub use html::{escape_attr, escape_text};
pub use node::{Element, Node, NodePath};
pub use style::Style;
