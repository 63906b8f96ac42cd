//! HTML serialization.

use crate::node::{Element, Node};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Escape text content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl Element {
    /// Serialize this element and its descendants.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }

    /// Serialize only the children, as an element's inner HTML.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            write_node(child, &mut out);
        }
        out
    }
}

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag());

    if !el.classes().is_empty() {
        out.push_str(" class=\"");
        out.push_str(&escape_attr(&el.classes().join(" ")));
        out.push('"');
    }

    for (name, value) in el.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if !el.style().is_empty() {
        out.push_str(" style=\"");
        out.push_str(&escape_attr(&el.style().to_string()));
        out.push('"');
    }

    if VOID_ELEMENTS.contains(&el.tag()) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in el.children() {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(el.tag());
    out.push('>');
}
