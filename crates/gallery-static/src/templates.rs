//! Template engine for the gallery home page.

use minijinja::{context, Environment};

use crate::index::Project;

/// Projects sharing a category.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CategoryGroup {
    /// Display name
    pub name: String,
    /// Emoji shown before the name
    pub icon: String,
    /// Projects in this category, sorted by title
    pub projects: Vec<Project>,
}

/// Context for rendering the home page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IndexContext {
    pub total_projects: usize,
    pub total_categories: usize,
    pub total_technologies: usize,
    pub categories: Vec<CategoryGroup>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        Self { env }
    }

    /// Render the home page.
    pub fn render_index(&self, context: &IndexContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("index.html")?;

        tmpl.render(context! {
            total_projects => context.total_projects,
            total_categories => context.total_categories,
            total_technologies => context.total_technologies,
            categories => &context.categories,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Challenge Gallery</title>
  <link rel="stylesheet" href="/css/style.css">
  <style>
    :root {
      --primary: #3b82f6;
      --tertiary: #06b6d4;
      --surface: rgba(255, 255, 255, 0.08);
      --surface-hover: rgba(255, 255, 255, 0.12);
      --text: #ffffff;
      --text-light: rgba(255, 255, 255, 0.7);
      --glass-border: rgba(255, 255, 255, 0.2);
    }
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      font-family: system-ui, -apple-system, sans-serif;
      background: linear-gradient(135deg, #0f172a 0%, #1e293b 50%, #334155 100%);
      color: var(--text);
      line-height: 1.6;
      min-height: 100vh;
      padding: 2rem;
    }
    .container { max-width: 1400px; margin: 0 auto; }
    .header {
      text-align: center;
      margin-bottom: 3rem;
      border: 1px solid var(--glass-border);
      border-radius: 16px;
      padding: 2rem;
    }
    .title {
      font-size: 3rem;
      font-weight: 800;
      background: linear-gradient(135deg, var(--primary), var(--tertiary));
      -webkit-background-clip: text;
      background-clip: text;
      color: transparent;
    }
    .stats { display: flex; justify-content: center; gap: 2rem; margin-top: 1.5rem; }
    .stat-number { font-size: 2rem; font-weight: 700; }
    .stat-label { color: var(--text-light); }
    .category { margin-bottom: 3rem; }
    .category-title { display: flex; gap: 0.5rem; font-size: 1.5rem; margin-bottom: 1rem; }
    .projects-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
      gap: 1.5rem;
    }
    .project-card {
      background: var(--surface);
      border: 1px solid var(--glass-border);
      border-radius: 16px;
      padding: 1.5rem;
    }
    .project-card:hover { background: var(--surface-hover); }
    .project-description { color: var(--text-light); margin: 0.5rem 0 1rem; }
    .tech-tag {
      display: inline-block;
      font-size: 0.75rem;
      padding: 0.125rem 0.5rem;
      margin-right: 0.25rem;
      border-radius: 999px;
      background: rgba(59, 130, 246, 0.2);
    }
    .project-link { display: inline-flex; gap: 0.5rem; margin-top: 1rem; color: var(--primary); }
  </style>
</head>
<body>
  <div class="container">
    <header class="header">
      <h1 class="title">Challenge Gallery</h1>
      <p class="subtitle">Small visual experiments, one folder each</p>
      <div class="stats">
        <div class="stat"><div class="stat-number">{{ total_projects }}</div><div class="stat-label">Projects</div></div>
        <div class="stat"><div class="stat-number">{{ total_categories }}</div><div class="stat-label">Categories</div></div>
        <div class="stat"><div class="stat-number">{{ total_technologies }}</div><div class="stat-label">Technologies</div></div>
      </div>
    </header>
    {% for group in categories %}
    <div class="category">
      <h2 class="category-title">
        <span>{{ group.icon }}</span>
        <span>{{ group.name }}</span>
        <span>({{ group.projects | length }})</span>
      </h2>
      <div class="projects-grid">
        {% for project in group.projects %}
        <div class="project-card">
          <h3 class="project-title">{{ project.title }}</h3>
          <p class="project-description">{{ project.description }}</p>
          <div class="project-technologies">
            {% for tech in project.technologies %}<span class="tech-tag">{{ tech }}</span>{% endfor %}
          </div>
          <a href="/{{ project.path }}/" class="project-link">
            <span>View Project</span>
            <span>&rarr;</span>
          </a>
        </div>
        {% endfor %}
      </div>
    </div>
    {% else %}
    <p class="empty">No projects yet. Add one under challenges/&lt;category&gt;/&lt;name&gt;/index.html.</p>
    {% endfor %}
  </div>
</body>
</html>"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str, technologies: &[&str]) -> Project {
        Project {
            title: title.to_string(),
            description: "Interactive fractals project".to_string(),
            path: "challenges/fractals/demo".to_string(),
            category: "Fractals".to_string(),
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            hash: String::new(),
        }
    }

    #[test]
    fn renders_stats_and_cards() {
        let engine = TemplateEngine::new();
        let context = IndexContext {
            total_projects: 2,
            total_categories: 1,
            total_technologies: 1,
            categories: vec![CategoryGroup {
                name: "Fractals".to_string(),
                icon: "🚀".to_string(),
                projects: vec![project("Sierpinski", &["Canvas"]), project("Tree", &[])],
            }],
        };

        let html = engine.render_index(&context).unwrap();

        assert!(html.contains(r#"<div class="stat-number">2</div>"#));
        assert!(html.contains(r#"<h3 class="project-title">Sierpinski</h3>"#));
        assert!(html.contains(r#"<span class="tech-tag">Canvas</span>"#));
        assert!(html.contains("<span>(2)</span>"));
    }

    #[test]
    fn escapes_project_text() {
        let engine = TemplateEngine::new();
        let context = IndexContext {
            total_projects: 1,
            total_categories: 1,
            total_technologies: 0,
            categories: vec![CategoryGroup {
                name: "Fractals".to_string(),
                icon: "🚀".to_string(),
                projects: vec![project("<script>alert(1)</script>", &[])],
            }],
        };

        let html = engine.render_index(&context).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn renders_empty_state() {
        let engine = TemplateEngine::new();
        let context = IndexContext {
            total_projects: 0,
            total_categories: 0,
            total_technologies: 0,
            categories: vec![],
        };

        let html = engine.render_index(&context).unwrap();
        assert!(html.contains("No projects yet"));
    }
}
