//! Render a challenge to an HTML fragment.

use anyhow::{anyhow, bail, Result};
use gallery_challenges::{ChallengeRegistry, RenderContext};

/// Deepest recursion accepted from the command line. Fractal element counts
/// grow as `3^depth`.
pub const MAX_DEPTH: i32 = 12;

/// Render `key` into its container and return the container's HTML.
pub fn render(key: &str, depth: Option<i32>, seed: Option<u64>) -> Result<String> {
    if let Some(depth) = depth.filter(|&d| d > MAX_DEPTH) {
        bail!("Depth {} is too deep; the maximum is {}", depth, MAX_DEPTH);
    }

    let registry = ChallengeRegistry::with_builtins();
    let challenge = registry
        .get(key)
        .ok_or_else(|| anyhow!("Unknown challenge: {}. Run 'gallery list' to see all.", key))?;

    let mut ctx = match seed {
        Some(seed) => RenderContext::seeded(seed),
        None => RenderContext::default(),
    };
    ctx.depth = depth;

    let mut container = challenge.container();
    let created = challenge.render(&mut container, &mut ctx)?;
    tracing::debug!("Rendered {} with {} elements", challenge.key(), created);

    Ok(container.to_html())
}

/// Run the render command.
pub fn run(key: &str, depth: Option<i32>, seed: Option<u64>) -> Result<()> {
    println!("{}", render(key, depth, seed)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_render_is_reproducible() {
        let a = render("sierpinski-fractal", Some(2), Some(7)).unwrap();
        let b = render("fractals/sierpinski-fractal", Some(2), Some(7)).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.matches("class=\"triangle\"").count(), 4);
    }

    #[test]
    fn zero_depth_renders_empty_container() {
        let html = render("sierpinski-fractal", Some(0), Some(1)).unwrap();
        assert!(!html.contains("triangle"));
    }

    #[test]
    fn unknown_challenge_is_an_error() {
        let err = render("nope", None, None).unwrap_err();
        assert!(err.to_string().contains("Unknown challenge"));
    }

    #[test]
    fn rejects_depth_beyond_limit() {
        let err = render("sierpinski-fractal", Some(30), Some(1)).unwrap_err();
        assert!(err.to_string().contains("maximum is 12"));

        assert!(render("wild-fractals", Some(MAX_DEPTH), Some(1)).is_ok());
    }
}
