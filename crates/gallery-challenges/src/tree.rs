//! Binary branching tree drawn as SVG lines.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};

use gallery_dom::{Element, Node};

use crate::traits::{Challenge, RenderContext, RenderError};

/// Options for the branching tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeOptions {
    /// Start point of the trunk
    pub origin: (f64, f64),
    /// Trunk length
    pub size: f64,
    /// Trunk angle in radians (π/2 points straight up)
    pub angle: f64,
    /// Multiplier applied to every branch angle
    pub spread: f64,
    /// Recursion depth
    pub iterations: i32,
    /// Line colour
    pub stroke: String,
    /// Canvas edge length
    pub canvas: f64,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            origin: (450.0, 450.0),
            size: 100.0,
            angle: FRAC_PI_2,
            spread: 1.0,
            iterations: 10,
            stroke: "#f6b73c".to_string(),
            canvas: 900.0,
        }
    }
}

/// A single branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl Segment {
    pub fn length(&self) -> f64 {
        let dx = self.to.0 - self.from.0;
        let dy = self.to.1 - self.from.1;
        (dx * dx + dy * dy).sqrt()
    }
}

struct Branch {
    x: f64,
    y: f64,
    size: f64,
    angle: f64,
    iteration: i32,
}

/// All branch segments, depth-first, clockwise branch first.
pub fn segments(options: &TreeOptions) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut pending = vec![Branch {
        x: options.origin.0,
        y: options.origin.1,
        size: options.size,
        angle: options.angle,
        iteration: options.iterations,
    }];

    while let Some(branch) = pending.pop() {
        if branch.iteration <= 0 {
            continue;
        }

        let x1 = branch.x + branch.size * (branch.angle * options.spread).cos();
        let y1 = branch.y - branch.size * (branch.angle * options.spread).sin();
        out.push(Segment {
            from: (branch.x, branch.y),
            to: (x1, y1),
        });

        let size = branch.size * SQRT_2 / 2.0;
        for angle in [branch.angle + FRAC_PI_4, branch.angle - FRAC_PI_4] {
            pending.push(Branch {
                x: x1,
                y: y1,
                size,
                angle,
                iteration: branch.iteration - 1,
            });
        }
    }

    out
}

/// Render the tree as `line` elements appended to `container`.
pub fn render<'a>(container: &'a mut Element, options: &TreeOptions) -> &'a [Node] {
    let start = container.children().len();

    for segment in segments(options) {
        container.append(
            Element::new("line")
                .with_attr("x1", segment.from.0.to_string())
                .with_attr("y1", segment.from.1.to_string())
                .with_attr("x2", segment.to.0.to_string())
                .with_attr("y2", segment.to.1.to_string())
                .with_attr("stroke", options.stroke.as_str()),
        );
    }

    &container.children()[start..]
}

/// The `fractals/wild-fractals` challenge.
#[derive(Debug, Default)]
pub struct BranchingTree {
    options: TreeOptions,
}

impl BranchingTree {
    pub fn new(options: TreeOptions) -> Self {
        Self { options }
    }
}

impl Challenge for BranchingTree {
    fn category(&self) -> &'static str {
        "fractals"
    }

    fn slug(&self) -> &'static str {
        "wild-fractals"
    }

    fn title(&self) -> &'static str {
        "Wild Fractals"
    }

    fn container(&self) -> Element {
        let edge = self.options.canvas.to_string();
        Element::new("svg")
            .with_attr("id", "canvas")
            .with_attr("xmlns", "http://www.w3.org/2000/svg")
            .with_attr("width", edge.as_str())
            .with_attr("height", edge.as_str())
            .with_attr("viewBox", format!("0 0 {} {}", edge, edge))
    }

    fn render(
        &self,
        container: &mut Element,
        ctx: &mut RenderContext,
    ) -> Result<usize, RenderError> {
        let options = TreeOptions {
            iterations: ctx.depth.unwrap_or(self.options.iterations),
            ..self.options.clone()
        };
        Ok(render(container, &options).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(iterations: i32) -> TreeOptions {
        TreeOptions {
            iterations,
            ..Default::default()
        }
    }

    #[test]
    fn segment_count_doubles_per_iteration() {
        assert!(segments(&options(0)).is_empty());
        assert!(segments(&options(-3)).is_empty());

        for n in 1..=10 {
            assert_eq!(segments(&options(n)).len(), (1usize << n) - 1);
        }
    }

    #[test]
    fn trunk_points_up() {
        let trunk = segments(&options(1))[0];

        assert_eq!(trunk.from, (450.0, 450.0));
        assert!((trunk.to.0 - 450.0).abs() < 1e-9);
        assert!((trunk.to.1 - 350.0).abs() < 1e-9);
    }

    #[test]
    fn branches_shrink_by_root_half() {
        let all = segments(&options(2));

        assert_eq!(all.len(), 3);
        for branch in &all[1..] {
            assert!((branch.length() - 100.0 * SQRT_2 / 2.0).abs() < 1e-9);
            assert_eq!(branch.from, all[0].to);
        }
    }

    #[test]
    fn renders_lines_with_stroke() {
        let tree = BranchingTree::default();
        let mut container = tree.container();
        let mut ctx = RenderContext::seeded(0).with_depth(3);

        let created = tree.render(&mut container, &mut ctx).unwrap();

        assert_eq!(created, 7);
        let line = container.children()[0].as_element().unwrap();
        assert_eq!(line.tag(), "line");
        assert_eq!(line.attr("stroke"), Some("#f6b73c"));
        assert_eq!(container.attr("viewBox"), Some("0 0 900 900"));
    }
}
