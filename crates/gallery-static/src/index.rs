//! Project index generation.
//!
//! Scans `challenges/<category>/<project>/index.html` and
//! `other/<project>/index.html`, extracts a title, description and the
//! technologies each page mentions, and renders the gallery home page.
//! Metadata is cached by content hash in `.project_cache.json`.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::templates::{CategoryGroup, IndexContext, TemplateEngine};

/// Cache file name, relative to the project root.
pub const CACHE_FILE: &str = ".project_cache.json";

/// Category assigned to everything under `other/`.
const EXPERIMENTS: &str = "Experiments";

/// Substrings that mark a technology, checked against the lowercased page.
const TECHNOLOGIES: &[(&str, &[&str])] = &[
    ("jQuery", &["jquery", "$("]),
    ("React", &["react"]),
    ("Vue", &["vue"]),
    ("Canvas", &["canvas"]),
    ("Three.js", &["three.js", "threejs"]),
    ("GSAP", &["gsap"]),
    ("Squircle UI", &["squircle"]),
];

/// Metadata for one project page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Path relative to the project root, with forward slashes
    pub path: String,
    pub category: String,
    pub technologies: Vec<String>,
    /// SHA-256 of the page's `index.html`
    pub hash: String,
}

/// Errors that can occur while building the index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to render index template: {0}")]
    TemplateError(String),

    #[error("Failed to write {path}: {message}")]
    WriteError { path: String, message: String },
}

/// Builds the project index page.
pub struct ProjectIndex {
    root: PathBuf,
    cache: HashMap<String, Project>,
    templates: TemplateEngine,
}

impl ProjectIndex {
    /// Create an index rooted at `root`, loading the cache if present.
    ///
    /// An unreadable or malformed cache is ignored.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let cache = load_cache(&root.join(CACHE_FILE));

        Self {
            root,
            cache,
            templates: TemplateEngine::new(),
        }
    }

    /// Scan for projects, sorted by category then title.
    pub fn scan(&mut self) -> Result<Vec<Project>, IndexError> {
        let dirs = self.project_dirs();

        let results: Vec<(&PathBuf, Result<Option<Project>, IndexError>)> = dirs
            .par_iter()
            .map(|dir| (dir, extract_project(&self.root, dir, &self.cache)))
            .collect();

        let mut projects = skip_failed(results);

        // Only projects that still exist stay cached.
        self.cache = projects
            .iter()
            .map(|project| (project.path.clone(), project.clone()))
            .collect();

        projects.sort_by(|a, b| (&a.category, &a.title).cmp(&(&b.category, &b.title)));
        tracing::info!("Found {} projects", projects.len());

        Ok(projects)
    }

    /// Render the home page for `projects`.
    pub fn render(&self, projects: &[Project]) -> Result<String, IndexError> {
        let mut groups: BTreeMap<&str, Vec<Project>> = BTreeMap::new();
        let mut technologies = BTreeSet::new();

        for project in projects {
            groups
                .entry(project.category.as_str())
                .or_default()
                .push(project.clone());
            technologies.extend(project.technologies.iter().map(String::as_str));
        }

        let context = IndexContext {
            total_projects: projects.len(),
            total_categories: groups.len(),
            total_technologies: technologies.len(),
            categories: groups
                .into_iter()
                .map(|(name, projects)| CategoryGroup {
                    name: name.to_string(),
                    icon: category_icon(name).to_string(),
                    projects,
                })
                .collect(),
        };

        self.templates
            .render_index(&context)
            .map_err(|e| IndexError::TemplateError(e.to_string()))
    }

    /// Scan, render to `output`, and save the cache. Returns the project count.
    pub fn build(&mut self, output: &Path) -> Result<usize, IndexError> {
        let projects = self.scan()?;
        let html = self.render(&projects)?;

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| IndexError::WriteError {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }
        fs::write(output, html).map_err(|e| IndexError::WriteError {
            path: output.display().to_string(),
            message: e.to_string(),
        })?;

        self.save_cache()?;
        tracing::info!("Home page built: {}", output.display());

        Ok(projects.len())
    }

    /// Write the cache, sorted by path so unchanged projects produce an
    /// unchanged file.
    pub fn save_cache(&self) -> Result<(), IndexError> {
        let path = self.root.join(CACHE_FILE);
        let sorted: BTreeMap<&String, &Project> = self.cache.iter().collect();

        let json = serde_json::to_string_pretty(&sorted).map_err(|e| IndexError::WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        fs::write(&path, json).map_err(|e| IndexError::WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Candidate project directories: `challenges/*/*` and `other/*`.
    fn project_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        for (base, depth) in [("challenges", 2), ("other", 1)] {
            let base = self.root.join(base);
            if !base.exists() {
                continue;
            }

            dirs.extend(
                WalkDir::new(&base)
                    .min_depth(depth)
                    .max_depth(depth)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_dir())
                    .map(|e| e.into_path()),
            );
        }

        dirs
    }
}

/// Keep the projects that extracted cleanly, logging the rest.
fn skip_failed(results: Vec<(&PathBuf, Result<Option<Project>, IndexError>)>) -> Vec<Project> {
    results
        .into_iter()
        .filter_map(|(dir, result)| match result {
            Ok(project) => project,
            Err(e) => {
                tracing::warn!("Error processing {}: {}", dir.display(), e);
                None
            }
        })
        .collect()
}

fn load_cache(path: &Path) -> HashMap<String, Project> {
    let Ok(content) = fs::read_to_string(path) else {
        return HashMap::new();
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed cache {}: {}", path.display(), e);
        HashMap::new()
    })
}

/// Extract metadata from `dir/index.html`, if the page exists.
///
/// Cached metadata is reused when the page's hash is unchanged.
pub fn extract_project(
    root: &Path,
    dir: &Path,
    cache: &HashMap<String, Project>,
) -> Result<Option<Project>, IndexError> {
    let index_file = dir.join("index.html");
    if !index_file.is_file() {
        return Ok(None);
    }

    let bytes = fs::read(&index_file).map_err(|e| IndexError::ReadError {
        path: index_file.display().to_string(),
        message: e.to_string(),
    })?;
    let hash = format!("{:x}", Sha256::digest(&bytes));

    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let path = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    if let Some(cached) = cache.get(&path) {
        if cached.hash == hash {
            return Ok(Some(cached.clone()));
        }
    }

    let html = String::from_utf8_lossy(&bytes);
    let raw_category = raw_category(&path);
    let category = if raw_category == "experiments" {
        EXPERIMENTS.to_string()
    } else {
        title_case(&raw_category.replace('-', " "))
    };

    let dir_name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("project");

    Ok(Some(Project {
        title: extract_title(&html).unwrap_or_else(|| title_case(&dir_name.replace('-', " "))),
        description: extract_description(&html)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format!("Interactive {} project", raw_category)),
        path,
        category,
        technologies: detect_technologies(&html),
        hash,
    }))
}

/// The category a project path belongs to, before title casing.
fn raw_category(path: &str) -> String {
    let mut parts = path.split('/');
    match parts.next() {
        Some("challenges") => parts.next().unwrap_or("misc").to_string(),
        Some("other") => "experiments".to_string(),
        _ => "projects".to_string(),
    }
}

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("Invalid title regex"));

static META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("Invalid meta regex"));

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\b([a-z-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("Invalid attr regex")
});

/// The trimmed `<title>` text.
pub fn extract_title(html: &str) -> Option<String> {
    let title = TITLE_RE.captures(html)?.get(1)?.as_str().trim();
    (!title.is_empty()).then(|| decode_entities(title))
}

/// The `content` of `<meta name="description">`.
pub fn extract_description(html: &str) -> Option<String> {
    META_RE.find_iter(html).find_map(|tag| {
        let mut name = None;
        let mut content = None;

        for caps in ATTR_RE.captures_iter(tag.as_str()) {
            let value = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());
            match caps[1].to_lowercase().as_str() {
                "name" => name = value,
                "content" => content = value,
                _ => {}
            }
        }

        match name {
            Some(n) if n.eq_ignore_ascii_case("description") => {
                content.map(|c| decode_entities(c.trim()))
            }
            _ => None,
        }
    })
}

/// Technologies mentioned anywhere in the page.
pub fn detect_technologies(html: &str) -> Vec<String> {
    let lower = html.to_lowercase();

    TECHNOLOGIES
        .iter()
        .filter(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Uppercase the first letter of each word, leaving the rest untouched.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn category_icon(category: &str) -> &'static str {
    match category {
        "Experiments" => "🧪",
        "Games" => "🎮",
        "Animations" => "🎬",
        "UI Components" => "🧩",
        "Data Visualization" => "📊",
        "Art" => "🎨",
        "Tools" => "🛠️",
        "Misc" => "✨",
        _ => "🚀",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta content="Recursive triangles &amp; colour" name="description">
  <title>
    Sierpinski Fractal
  </title>
</head>
<body><canvas id="c"></canvas><script src="https://cdn.jsdelivr.net/npm/gsap"></script></body>
</html>"#;

    #[test]
    fn extracts_title_and_description() {
        assert_eq!(extract_title(PAGE), Some("Sierpinski Fractal".to_string()));
        assert_eq!(
            extract_description(PAGE),
            Some("Recursive triangles & colour".to_string())
        );
    }

    #[test]
    fn missing_metadata_is_none() {
        assert_eq!(extract_title("<html></html>"), None);
        assert_eq!(extract_title("<title>  </title>"), None);
        assert_eq!(extract_description(r#"<meta name="viewport" content="x">"#), None);
    }

    #[test]
    fn detects_technologies_in_table_order() {
        assert_eq!(detect_technologies(PAGE), vec!["Canvas", "GSAP"]);
        assert_eq!(detect_technologies("$('.x').hide()"), vec!["jQuery"]);
        assert!(detect_technologies("<p>plain</p>").is_empty());
    }

    #[test]
    fn title_cases_words_only_at_the_start() {
        assert_eq!(title_case("sierpinski fractal"), "Sierpinski Fractal");
        assert_eq!(title_case("ShapesAndLines"), "ShapesAndLines");
        assert_eq!(title_case("letItSlide"), "LetItSlide");
    }

    #[test]
    fn scans_challenges_and_other() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(&root.join("challenges/fractals/sierpinski-fractal/index.html"), PAGE);
        write(
            &root.join("challenges/food/from-the-grill/index.html"),
            "<html><body>grill</body></html>",
        );
        write(&root.join("challenges/food/no-page/script.js"), "");
        write(&root.join("other/noise-mixer/index.html"), "<title>Noise Mixer</title>");

        let projects = ProjectIndex::new(root).scan().unwrap();

        let summary: Vec<(&str, &str, &str)> = projects
            .iter()
            .map(|p| (p.category.as_str(), p.title.as_str(), p.path.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Experiments", "Noise Mixer", "other/noise-mixer"),
                ("Food", "From The Grill", "challenges/food/from-the-grill"),
                (
                    "Fractals",
                    "Sierpinski Fractal",
                    "challenges/fractals/sierpinski-fractal"
                ),
            ]
        );
        assert_eq!(projects[1].description, "Interactive food project");
        assert_eq!(projects[0].description, "Interactive experiments project");
    }

    #[test]
    fn reuses_cache_for_unchanged_pages() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        let page = root.join("other/slide/index.html");
        write(&page, "<title>Slide</title>");

        let mut index = ProjectIndex::new(root);
        index.build(&root.join("public/index.html")).unwrap();
        assert!(root.join(CACHE_FILE).exists());

        // Tamper with the cached title; an unchanged page keeps it.
        let mut cache = load_cache(&root.join(CACHE_FILE));
        cache.get_mut("other/slide").unwrap().title = "Cached".to_string();
        let projects = ProjectIndex {
            root: root.to_path_buf(),
            cache: cache.clone(),
            templates: TemplateEngine::new(),
        }
        .scan()
        .unwrap();
        assert_eq!(projects[0].title, "Cached");

        // A changed page is re-extracted.
        write(&page, "<title>Slide Show</title>");
        let projects = ProjectIndex {
            root: root.to_path_buf(),
            cache,
            templates: TemplateEngine::new(),
        }
        .scan()
        .unwrap();
        assert_eq!(projects[0].title, "Slide Show");
    }

    #[test]
    fn ignores_malformed_cache() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CACHE_FILE), "{ not json").unwrap();

        let index = ProjectIndex::new(temp.path());
        assert!(index.cache.is_empty());
    }

    #[test]
    fn renders_grouped_page() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(&root.join("challenges/fractals/sierpinski-fractal/index.html"), PAGE);
        write(&root.join("other/noise-mixer/index.html"), "<title>Noise Mixer</title>");

        let mut index = ProjectIndex::new(root);
        let projects = index.scan().unwrap();
        let html = index.render(&projects).unwrap();

        assert!(html.contains("Sierpinski Fractal"));
        assert!(html.contains("sierpinski-fractal"));
        assert!(html.contains("<span>(1)</span>"));
        assert!(html.contains("🧪"));
        assert!(html.contains(r#"<span class="tech-tag">Canvas</span>"#));
    }

    #[test]
    fn build_output_is_deterministic() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(&root.join("other/noise-mixer/index.html"), "<title>Noise Mixer</title>");
        let output = root.join("public/index.html");

        ProjectIndex::new(root).build(&output).unwrap();
        let first = fs::read_to_string(&output).unwrap();
        ProjectIndex::new(root).build(&output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), first);
    }

    #[test]
    fn unreadable_projects_are_skipped() {
        let good = PathBuf::from("other/slide");
        let bad = PathBuf::from("other/broken");
        let project = Project {
            title: "Slide".to_string(),
            description: "Interactive experiments project".to_string(),
            path: "other/slide".to_string(),
            category: EXPERIMENTS.to_string(),
            technologies: vec![],
            hash: String::new(),
        };

        let projects = skip_failed(vec![
            (
                &bad,
                Err(IndexError::ReadError {
                    path: "other/broken/index.html".to_string(),
                    message: "permission denied".to_string(),
                }),
            ),
            (&good, Ok(Some(project.clone()))),
            (&good, Ok(None)),
        ]);

        assert_eq!(projects, vec![project]);
    }

    #[test]
    fn deleted_projects_leave_the_cache() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        let output = root.join("public/index.html");
        write(&root.join("other/slide/index.html"), "<title>Slide</title>");
        write(&root.join("other/noise-mixer/index.html"), "<title>Noise Mixer</title>");

        ProjectIndex::new(root).build(&output).unwrap();
        assert_eq!(load_cache(&root.join(CACHE_FILE)).len(), 2);

        fs::remove_dir_all(root.join("other/slide")).unwrap();
        ProjectIndex::new(root).build(&output).unwrap();

        let cache = load_cache(&root.join(CACHE_FILE));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("other/noise-mixer"));
    }
}
