//! Element and text nodes.

use crate::style::Style;

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Element(el) => el.text_content(),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// Location of a descendant element, as child indices from a root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

/// An element with ordered attributes, classes and inline style.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    style: Style,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            style: Style::new(),
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.set(property, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::text(text));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Add or remove a class depending on `on`.
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Append a child node.
    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Concatenated text of all descendant text nodes in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Number of element descendants (the element itself excluded).
    pub fn count_elements(&self) -> usize {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .map(|el| 1 + el.count_elements())
            .sum()
    }

    /// Paths of all descendant elements matching `pred`, depth-first pre-order.
    pub fn find_all<F>(&self, pred: F) -> Vec<NodePath>
    where
        F: Fn(&Element) -> bool,
    {
        let mut found = Vec::new();
        find_into(self, &NodePath::root(), &pred, &mut found);
        found
    }

    /// Look up a descendant element. The empty path is the element itself.
    pub fn get(&self, path: &NodePath) -> Option<&Element> {
        let mut current = self;
        for &index in &path.0 {
            current = current.children.get(index)?.as_element()?;
        }
        Some(current)
    }

    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        let mut current = self;
        for &index in &path.0 {
            current = current.children.get_mut(index)?.as_element_mut()?;
        }
        Some(current)
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => collect_text(child, out),
        }
    }
}

fn find_into<F>(el: &Element, path: &NodePath, pred: &F, found: &mut Vec<NodePath>)
where
    F: Fn(&Element) -> bool,
{
    for (index, child) in el.children.iter().enumerate() {
        if let Node::Element(child) = child {
            let child_path = path.child(index);
            if pred(child) {
                found.push(child_path.clone());
            }
            find_into(child, &child_path, pred, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("div")
            .with_child(Element::new("span").with_text("Hello"))
            .with_text(", ")
            .with_child(
                Element::new("p")
                    .with_child(Element::new("span").with_class("inner").with_text("world")),
            )
    }

    #[test]
    fn collects_text_in_document_order() {
        assert_eq!(sample().text_content(), "Hello, world");
    }

    #[test]
    fn finds_elements_depth_first() {
        let root = sample();
        let spans = root.find_all(|el| el.tag() == "span");

        assert_eq!(spans, vec![NodePath(vec![0]), NodePath(vec![2, 0])]);
        assert!(root.get(&spans[1]).unwrap().has_class("inner"));
    }

    #[test]
    fn get_rejects_text_nodes_in_path() {
        let root = sample();
        assert!(root.get(&NodePath(vec![1])).is_none());
        assert!(root.get(&NodePath(vec![9])).is_none());
    }

    #[test]
    fn mutates_through_path() {
        let mut root = sample();
        let path = NodePath(vec![2, 0]);

        root.get_mut(&path).unwrap().toggle_class("active", true);
        assert!(root.get(&path).unwrap().has_class("active"));

        root.get_mut(&path).unwrap().toggle_class("active", false);
        assert!(!root.get(&path).unwrap().has_class("active"));
    }

    #[test]
    fn counts_descendant_elements() {
        assert_eq!(sample().count_elements(), 3);
        assert_eq!(Element::new("div").count_elements(), 0);
    }

    #[test]
    fn set_attr_overwrites() {
        let mut el = Element::new("span").with_attr("data-text", "a");
        el.set_attr("data-text", "b");

        assert_eq!(el.attr("data-text"), Some("b"));
        assert_eq!(el.attributes().count(), 1);
    }

    #[test]
    fn add_class_is_idempotent() {
        let el = Element::new("div").with_class("triangle").with_class("triangle");
        assert_eq!(el.classes(), &["triangle".to_string()]);
    }
}
