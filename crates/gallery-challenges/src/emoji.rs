//! Emoji highlighting.
//!
//! Text nodes containing emoji are split into plain text and highlighted
//! `span.emoji` elements, one element per emoji code point. Which code points
//! count as emoji is fixed by [`EMOJI_RANGES`] rather than by a platform's
//! Unicode property tables. ASCII digits, `#` and `*` carry the Unicode
//! `Emoji` property but are absent.

use std::sync::LazyLock;

use gallery_dom::{Element, Node};
use regex::Regex;

/// Inclusive code-point ranges treated as emoji.
pub const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x00A9, 0x00A9),   // copyright
    (0x00AE, 0x00AE),   // registered
    (0x203C, 0x203C),   // double exclamation
    (0x2049, 0x2049),   // exclamation question
    (0x2122, 0x2122),   // trade mark
    (0x2139, 0x2139),   // information
    (0x2194, 0x2199),   // arrows
    (0x21A9, 0x21AA),   // hooked arrows
    (0x231A, 0x231B),   // watch, hourglass
    (0x2328, 0x2328),   // keyboard
    (0x23CF, 0x23CF),   // eject
    (0x23E9, 0x23F3),   // media controls, alarm clock
    (0x23F8, 0x23FA),   // pause, stop, record
    (0x24C2, 0x24C2),   // circled M
    (0x25AA, 0x25AB),   // small squares
    (0x25B6, 0x25B6),   // play
    (0x25C0, 0x25C0),   // reverse
    (0x25FB, 0x25FE),   // medium squares
    (0x2600, 0x27BF),   // miscellaneous symbols, dingbats
    (0x2934, 0x2935),   // curved arrows
    (0x2B05, 0x2B07),   // arrows
    (0x2B1B, 0x2B1C),   // large squares
    (0x2B50, 0x2B50),   // star
    (0x2B55, 0x2B55),   // circle
    (0x3030, 0x3030),   // wavy dash
    (0x303D, 0x303D),   // part alternation mark
    (0x3297, 0x3297),   // circled congratulation
    (0x3299, 0x3299),   // circled secret
    (0x1F000, 0x1F02F), // mahjong tiles
    (0x1F0CF, 0x1F0CF), // joker
    (0x1F170, 0x1F251), // enclosed alphanumerics and ideographs, flags
    (0x1F300, 0x1F5FF), // symbols and pictographs
    (0x1F600, 0x1F64F), // emoticons
    (0x1F680, 0x1F6FF), // transport and map
    (0x1F7E0, 0x1F7EB), // coloured circles and squares
    (0x1F900, 0x1F9FF), // supplemental symbols and pictographs
    (0x1FA70, 0x1FAFF), // symbols and pictographs extended-A
];

/// Elements whose text is never rewritten.
const SKIPPED_TAGS: &[&str] = &["script", "style"];

static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    let class: String = EMOJI_RANGES
        .iter()
        .map(|&(lo, hi)| {
            if lo == hi {
                format!(r"\x{{{:X}}}", lo)
            } else {
                format!(r"\x{{{:X}}}-\x{{{:X}}}", lo, hi)
            }
        })
        .collect();
    Regex::new(&format!("[{}]", class)).expect("Invalid emoji character class")
});

/// Whether `c` is in the emoji table.
pub fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

pub fn contains_emoji(text: &str) -> bool {
    EMOJI_RE.is_match(text)
}

/// The highlight element wrapping a single emoji.
fn highlight(emoji: &str) -> Element {
    Element::new("span")
        .with_class("emoji")
        .with_attr("aria-label", "emoji")
        .with_style("background", "yellow")
        .with_text(emoji)
}

/// Split `text` into text nodes and highlighted emoji elements.
///
/// Concatenating the text of the returned nodes yields `text`.
pub fn split_emoji(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut last = 0;

    for m in EMOJI_RE.find_iter(text) {
        if m.start() > last {
            nodes.push(Node::text(&text[last..m.start()]));
        }
        nodes.push(highlight(m.as_str()).into());
        last = m.end();
    }

    if last < text.len() {
        nodes.push(Node::text(&text[last..]));
    }

    nodes
}

/// Wrap every emoji under `root`, returning the number of highlights created.
///
/// A single pass: highlights created here are not revisited.
pub fn wrap_emojis(root: &mut Element) -> usize {
    if SKIPPED_TAGS.contains(&root.tag()) {
        return 0;
    }

    let mut created = 0;
    let children = std::mem::take(root.children_mut());
    let mut rewritten = Vec::with_capacity(children.len());

    for child in children {
        match child {
            Node::Text(text) if contains_emoji(&text) => {
                tracing::debug!("Wrapping emojis in text node: {:?}", text);
                let parts = split_emoji(&text);
                created += parts.iter().filter(|n| n.as_element().is_some()).count();
                rewritten.extend(parts);
            }
            Node::Element(mut el) => {
                created += wrap_emojis(&mut el);
                rewritten.push(Node::Element(el));
            }
            other => rewritten.push(other),
        }
    }

    *root.children_mut() = rewritten;
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn concat(nodes: &[Node]) -> String {
        nodes.iter().map(Node::text_content).collect()
    }

    #[test]
    fn table_is_sorted_and_disjoint() {
        for pair in EMOJI_RANGES.windows(2) {
            assert!(pair[0].0 <= pair[0].1);
            assert!(pair[0].1 < pair[1].0);
        }
    }

    #[test]
    fn regex_agrees_with_table() {
        for c in ['🙂', '👾', '⭐', '©', '☀', '🟡', '🦀', 'a', '1', '#', '*', 'é', ' '] {
            assert_eq!(contains_emoji(&c.to_string()), is_emoji(c), "{:?}", c);
        }
    }

    #[test]
    fn excludes_keycap_bases() {
        assert!(!contains_emoji("0123456789#*"));
    }

    #[test]
    fn single_emoji_preserves_text() {
        let text = "Bugs 👾 everywhere";
        let nodes = split_emoji(text);

        assert_eq!(nodes.len(), 3);
        assert_eq!(concat(&nodes), text);
        assert_eq!(nodes[0].as_text(), Some("Bugs "));
        assert_eq!(nodes[2].as_text(), Some(" everywhere"));

        let span = nodes[1].as_element().unwrap();
        assert!(span.has_class("emoji"));
        assert_eq!(span.attr("aria-label"), Some("emoji"));
        assert_eq!(span.style().get("background"), Some("yellow"));
    }

    #[test]
    fn each_code_point_gets_its_own_highlight() {
        let text = "🙂🙂x";
        let nodes = split_emoji(text);

        assert_eq!(nodes.len(), 3);
        assert_eq!(concat(&nodes), text);
    }

    #[test]
    fn emoji_only_text_has_no_empty_text_nodes() {
        let nodes = split_emoji("🦀");

        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].as_element().is_some());
    }

    #[test]
    fn wraps_nested_text_once() {
        let mut root = Element::new("div")
            .with_text("top 🌟")
            .with_child(Element::new("p").with_text("no emoji here"))
            .with_child(Element::new("p").with_child(Element::new("b").with_text("⭐ deep")));
        let before = root.text_content();

        let created = wrap_emojis(&mut root);

        assert_eq!(created, 2);
        assert_eq!(root.text_content(), before);
        assert_eq!(root.find_all(|el| el.has_class("emoji")).len(), 2);

        assert_eq!(
            root.to_html(),
            concat!(
                r#"<div>top <span class="emoji" aria-label="emoji" style="background: yellow;">🌟</span>"#,
                r#"<p>no emoji here</p>"#,
                r#"<p><b><span class="emoji" aria-label="emoji" style="background: yellow;">⭐</span> deep</b></p></div>"#,
            )
        );
    }

    #[test]
    fn skips_script_and_style() {
        let mut root = Element::new("div")
            .with_child(Element::new("script").with_text("let s = '🙂';"))
            .with_child(Element::new("style").with_text(".x::after { content: '🙂'; }"));

        assert_eq!(wrap_emojis(&mut root), 0);
    }
}
