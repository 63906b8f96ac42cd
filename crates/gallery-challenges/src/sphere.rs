//! Spheres built from stacked circular layers.
//!
//! Layer `i` of `n` sits at normalized height `t = i/(n-1)*2 - 1`; its
//! diameter is the sphere's cross-section at that height, `sqrt(1 - t²)`,
//! and it is pushed along Z by `t * radius`.

use gallery_dom::{Element, Node};

use crate::traits::{Challenge, RenderContext, RenderError};

/// Options for a layered sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereOptions {
    /// Number of layers, at least 2
    pub layers: usize,
    /// Z distance of the outermost layers, in pixels
    pub radius: f64,
    /// Class applied to each layer
    pub class_name: String,
    /// Transform applied before the Z translation
    pub transform_prefix: String,
    /// Give each layer a rotated conic-gradient background
    pub flares: bool,
}

impl SphereOptions {
    /// The tilted wireframe sphere from `ShapesAndLines/spheres`.
    pub fn wireframe() -> Self {
        Self {
            layers: 35,
            radius: 90.0,
            class_name: "circle".to_string(),
            transform_prefix: "rotateX(20deg) rotateZ(-25deg)".to_string(),
            flares: false,
        }
    }

    /// The flaring sun from `ShapesAndLines/rotating-sphere`.
    pub fn sun() -> Self {
        Self {
            layers: 40,
            radius: 50.0,
            class_name: "sun-layer".to_string(),
            transform_prefix: "translate(-50%, -50%) rotateX(60deg)".to_string(),
            flares: true,
        }
    }
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self::wireframe()
    }
}

/// Geometry of one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereLayer {
    /// Width and height as a percentage of the sphere
    pub size_percent: f64,
    /// Z translation in pixels
    pub depth: f64,
}

/// Layer geometry for the given options.
pub fn layers(options: &SphereOptions) -> Result<Vec<SphereLayer>, RenderError> {
    if options.layers < 2 {
        return Err(RenderError::InvalidOption {
            option: "layers",
            message: format!("need at least 2 layers, got {}", options.layers),
        });
    }

    let last = (options.layers - 1) as f64;
    Ok((0..options.layers)
        .map(|i| {
            let normalized = i as f64 / last * 2.0 - 1.0;
            SphereLayer {
                size_percent: (1.0 - normalized * normalized).max(0.0).sqrt() * 100.0,
                depth: normalized * options.radius,
            }
        })
        .collect())
}

/// Render the sphere's layers into `container`.
pub fn render<'a>(
    container: &'a mut Element,
    options: &SphereOptions,
) -> Result<&'a [Node], RenderError> {
    let geometry = layers(options)?;
    let start = container.children().len();

    for (i, layer) in geometry.iter().enumerate() {
        let size = format!("{}%", layer.size_percent);
        let mut el = Element::new("div")
            .with_class(options.class_name.as_str())
            .with_style("width", size.as_str())
            .with_style("height", size.as_str())
            .with_style(
                "transform",
                format!("{} translateZ({}px)", options.transform_prefix, layer.depth),
            );

        if options.flares {
            let angle = i as f64 / options.layers as f64 * 360.0;
            el.style_mut().set("background", flare_gradient(angle));
        }

        container.append(el);
    }

    Ok(&container.children()[start..])
}

fn flare_gradient(angle: f64) -> String {
    format!(
        "conic-gradient(from {}deg, rgba(255, 200, 0, 0.8) 0%, rgba(255, 100, 0, 0.9) 25%, \
         rgba(255, 50, 0, 0.8) 50%, rgba(255, 100, 0, 0.9) 75%, rgba(255, 200, 0, 0.8) 100%)",
        angle
    )
}

/// A layered sphere challenge.
#[derive(Debug)]
pub struct Sphere {
    slug: &'static str,
    title: &'static str,
    options: SphereOptions,
}

impl Sphere {
    pub fn wireframe() -> Self {
        Self {
            slug: "spheres",
            title: "Spheres",
            options: SphereOptions::wireframe(),
        }
    }

    pub fn sun() -> Self {
        Self {
            slug: "rotating-sphere",
            title: "Cosmic Sphere",
            options: SphereOptions::sun(),
        }
    }
}

impl Challenge for Sphere {
    fn category(&self) -> &'static str {
        "ShapesAndLines"
    }

    fn slug(&self) -> &'static str {
        self.slug
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn container(&self) -> Element {
        let class = if self.options.flares { "sun" } else { "sphere" };
        Element::new("div").with_class(class)
    }

    fn render(
        &self,
        container: &mut Element,
        _ctx: &mut RenderContext,
    ) -> Result<usize, RenderError> {
        Ok(render(container, &self.options)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_layers_are_points_and_middle_is_full() {
        let geometry = layers(&SphereOptions {
            layers: 5,
            ..SphereOptions::wireframe()
        })
        .unwrap();

        assert_eq!(geometry.len(), 5);
        assert_eq!(geometry[0].size_percent, 0.0);
        assert_eq!(geometry[4].size_percent, 0.0);
        assert_eq!(geometry[2].size_percent, 100.0);
        assert_eq!(geometry[0].depth, -90.0);
        assert_eq!(geometry[2].depth, 0.0);
        assert_eq!(geometry[4].depth, 90.0);
    }

    #[test]
    fn layers_lie_on_a_circle() {
        for layer in layers(&SphereOptions::sun()).unwrap() {
            let r = layer.size_percent / 100.0;
            let t = layer.depth / 50.0;
            assert!((r * r + t * t - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn rejects_fewer_than_two_layers() {
        for count in [0, 1] {
            let options = SphereOptions {
                layers: count,
                ..Default::default()
            };
            assert!(matches!(
                layers(&options),
                Err(RenderError::InvalidOption { option: "layers", .. })
            ));
        }
    }

    #[test]
    fn renders_transforms_and_flares() {
        let mut container = Element::new("div");
        let created = render(&mut container, &SphereOptions::sun()).unwrap();

        assert_eq!(created.len(), 40);
        let first = created[0].as_element().unwrap();
        assert!(first.has_class("sun-layer"));
        assert_eq!(
            first.style().get("transform"),
            Some("translate(-50%, -50%) rotateX(60deg) translateZ(-50px)")
        );
        assert!(first
            .style()
            .get("background")
            .unwrap()
            .starts_with("conic-gradient(from 0deg"));
    }

    #[test]
    fn wireframe_has_no_background() {
        let challenge = Sphere::wireframe();
        let mut container = challenge.container();
        let created = challenge
            .render(&mut container, &mut RenderContext::seeded(0))
            .unwrap();

        assert_eq!(created, 35);
        let layer = container.children()[17].as_element().unwrap();
        assert_eq!(layer.style().get("width"), Some("100%"));
        assert!(layer.style().get("background").is_none());
    }
}
