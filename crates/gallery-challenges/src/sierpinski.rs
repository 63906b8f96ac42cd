//! Sierpinski triangle built from CSS border triangles.
//!
//! Every placement becomes one absolutely positioned `div.triangle` whose
//! bottom border forms the visible triangle. A placement with depth `d > 0`
//! spawns three half-size children: one sharing its apex and two on its
//! lower edge. Depth is the only termination condition, so a depth `d`
//! produces `(3^d - 1) / 2` elements.

use gallery_dom::{Element, Node};
use rand::Rng;

use crate::color::random_hex_color;
use crate::traits::{Challenge, RenderContext, RenderError};

/// Options for rendering a Sierpinski triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SierpinskiOptions {
    /// Apex x position in pixels
    pub x: f64,
    /// Apex y position in pixels
    pub y: f64,
    /// Edge length of the outermost triangle
    pub size: f64,
    /// Recursion depth
    pub depth: i32,
}

impl Default for SierpinskiOptions {
    fn default() -> Self {
        let size = 600.0;
        Self {
            x: size / 2.0,
            y: 0.0,
            size,
            depth: 6,
        }
    }
}

/// A single triangle placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub depth: i32,
}

impl Triangle {
    /// Height of an equilateral triangle with this edge length.
    pub fn height(&self) -> f64 {
        self.size * 3f64.sqrt() / 2.0
    }

    pub fn base_left(&self) -> (f64, f64) {
        (self.x - self.size / 2.0, self.y + self.height())
    }

    pub fn base_right(&self) -> (f64, f64) {
        (self.x + self.size / 2.0, self.y + self.height())
    }

    /// The three half-size placements inside this triangle: top,
    /// bottom-left, bottom-right.
    pub fn children(&self) -> [Triangle; 3] {
        let size = self.size / 2.0;
        let depth = self.depth - 1;
        let height = size * 3f64.sqrt() / 2.0;

        [
            Triangle {
                x: self.x,
                y: self.y,
                size,
                depth,
            },
            Triangle {
                x: self.x - size / 2.0,
                y: self.y + height,
                size,
                depth,
            },
            Triangle {
                x: self.x + size / 2.0,
                y: self.y + height,
                size,
                depth,
            },
        ]
    }

    /// The element drawing this triangle.
    pub fn to_element(&self, color: &str) -> Element {
        let half = self.size / 2.0;

        Element::new("div")
            .with_class("triangle")
            .with_style("left", px(self.x - half))
            .with_style("top", px(self.y))
            .with_style("border-left-width", px(half))
            .with_style("border-right-width", px(half))
            .with_style("border-bottom-width", px(self.height()))
            .with_style("border-bottom-color", color)
            .with_style("border-left-color", "transparent")
            .with_style("border-right-color", "transparent")
    }
}

/// All placements for the given options, in pre-order.
pub fn placements(options: &SierpinskiOptions) -> Vec<Triangle> {
    let mut out = Vec::new();
    let mut pending = vec![Triangle {
        x: options.x,
        y: options.y,
        size: options.size,
        depth: options.depth,
    }];

    while let Some(triangle) = pending.pop() {
        if triangle.depth <= 0 {
            continue;
        }
        out.push(triangle);

        // Reversed so the top child is visited first.
        pending.extend(triangle.children().into_iter().rev());
    }

    out
}

/// Render a Sierpinski triangle into `container`.
///
/// Returns the newly appended nodes.
pub fn render<'a, R: Rng + ?Sized>(
    container: &'a mut Element,
    options: &SierpinskiOptions,
    rng: &mut R,
) -> &'a [Node] {
    let start = container.children().len();

    for triangle in placements(options) {
        let color = random_hex_color(rng);
        container.append(triangle.to_element(&color));
    }

    &container.children()[start..]
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

/// The `fractals/sierpinski-fractal` challenge.
#[derive(Debug, Default)]
pub struct SierpinskiFractal {
    options: SierpinskiOptions,
}

impl SierpinskiFractal {
    pub fn new(options: SierpinskiOptions) -> Self {
        Self { options }
    }
}

impl Challenge for SierpinskiFractal {
    fn category(&self) -> &'static str {
        "fractals"
    }

    fn slug(&self) -> &'static str {
        "sierpinski-fractal"
    }

    fn title(&self) -> &'static str {
        "Sierpinski Fractal"
    }

    fn container(&self) -> Element {
        Element::new("div").with_attr("id", "sierpinski-container")
    }

    fn render(
        &self,
        container: &mut Element,
        ctx: &mut RenderContext,
    ) -> Result<usize, RenderError> {
        let options = SierpinskiOptions {
            depth: ctx.depth.unwrap_or(self.options.depth),
            ..self.options
        };

        let created = render(container, &options, &mut ctx.rng).len();
        tracing::debug!("Rendered {} triangles at depth {}", created, options.depth);

        Ok(created)
    }
}
