//! Tab-style navigation over `.nav-link` elements.

use gallery_dom::{Element, NodePath};

/// Navigation state for a page's `.nav-link` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    links: Vec<NodePath>,
    current: String,
}

impl Navigation {
    /// Collect the `.nav-link` elements under `root`.
    pub fn from_root(root: &Element) -> Self {
        Self {
            links: root.find_all(|el| el.has_class("nav-link")),
            current: "home".to_string(),
        }
    }

    pub fn links(&self) -> &[NodePath] {
        &self.links
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Mark the link whose lower-cased text equals `section` as active,
    /// clearing every other link, and return the toast message to show.
    pub fn navigate_to(&mut self, root: &mut Element, section: &str) -> String {
        for path in &self.links {
            if let Some(link) = root.get_mut(path) {
                let matches = link.text_content().to_lowercase() == section;
                link.toggle_class("active", matches);
            }
        }

        self.current = section.to_string();
        format!("Navigated to {}", section)
    }

    /// Handle a click on the link at `index`, as the page's click listener does.
    pub fn click(&mut self, root: &mut Element, index: usize) -> Option<String> {
        let path = self.links.get(index)?;
        let section = root.get(path)?.text_content().to_lowercase();
        Some(self.navigate_to(root, &section))
    }
}
