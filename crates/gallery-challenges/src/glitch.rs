//! Glitching text driven by a per-span CSS custom property.

use gallery_dom::Element;
use rand::Rng;

use crate::emoji::wrap_emojis;
use crate::traits::{Challenge, RenderContext, RenderError};

/// Custom property read by the glitch keyframes.
pub const TIMING_PROPERTY: &str = "--anim-timing";

/// Annotate every `span` under `root` for the glitch animation.
///
/// Each span gets `data-text` (its text, used by the `::before`/`::after`
/// copies), a random `--anim-timing` between 1 and 4 seconds, and white text.
/// Returns the number of spans annotated.
pub fn annotate_spans<R: Rng + ?Sized>(root: &mut Element, rng: &mut R) -> usize {
    let spans = root.find_all(|el| el.tag() == "span");

    for path in &spans {
        let Some(span) = root.get_mut(path) else {
            continue;
        };

        let text = span.text_content();
        span.set_attr("data-text", text);

        let timing: f64 = rng.gen_range(1.0..4.0);
        span.style_mut()
            .set(TIMING_PROPERTY, format!("{:.2}s", timing));
        span.style_mut().set("color", "white");
    }

    spans.len()
}

/// The `bugs/glitches` challenge.
#[derive(Debug)]
pub struct GlitchText {
    lines: Vec<String>,
}

impl GlitchText {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

impl Default for GlitchText {
    fn default() -> Self {
        Self::new(vec![
            "Something went wrong 👾".to_string(),
            "It works on my machine 🤷".to_string(),
            "Have you tried turning it off and on again? 🔌".to_string(),
        ])
    }
}

impl Challenge for GlitchText {
    fn category(&self) -> &'static str {
        "bugs"
    }

    fn slug(&self) -> &'static str {
        "glitches"
    }

    fn title(&self) -> &'static str {
        "Glitches"
    }

    fn container(&self) -> Element {
        self.lines.iter().fold(
            Element::new("div").with_class("glitch-container"),
            |container, line| {
                container.with_child(Element::new("span").with_class("glitch").with_text(line))
            },
        )
    }

    /// Annotates existing spans first, then highlights emoji, so the new
    /// highlight spans carry no glitch annotation.
    fn render(
        &self,
        container: &mut Element,
        ctx: &mut RenderContext,
    ) -> Result<usize, RenderError> {
        let annotated = annotate_spans(container, &mut ctx.rng);
        let wrapped = wrap_emojis(container);
        tracing::debug!("Annotated {} spans, wrapped {} emoji", annotated, wrapped);

        Ok(wrapped)
    }
}
