//! Public directory builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use crate::index::{IndexError, ProjectIndex};

/// A file copied verbatim during the build.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticFile {
    /// Source path, relative to the project root
    pub src: PathBuf,
    /// Destination path, relative to the project root
    pub dest: PathBuf,
}

impl StaticFile {
    pub fn new(src: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }
}

/// Configuration for building the public directory.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Project root; every other path is relative to it
    pub root: PathBuf,

    /// Public output directory
    pub public_dir: PathBuf,

    /// Challenge sources, copied into `public_dir/challenges`
    pub challenges_dir: PathBuf,

    /// Directories created if missing
    pub dirs: Vec<PathBuf>,

    /// Files copied after the challenge tree
    pub static_files: Vec<StaticFile>,

    /// Generate the project index page
    pub index: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            public_dir: PathBuf::from("public"),
            challenges_dir: PathBuf::from("challenges"),
            dirs: vec![
                PathBuf::from("public"),
                PathBuf::from("public/css"),
                PathBuf::from("public/js"),
                PathBuf::from("public/challenges"),
                PathBuf::from("node_modules"),
            ],
            static_files: vec![
                StaticFile::new("public/css/style.css", "public/css/style.css"),
                StaticFile::new("public/js/main.js", "public/js/main.js"),
            ],
            index: true,
        }
    }
}

impl BuildConfig {
    /// Default layout rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Directories that did not exist before the build
    pub dirs_created: usize,

    /// Files copied from the challenge tree
    pub files_copied: usize,

    /// Static files copied
    pub static_files: usize,

    /// Projects listed on the index page, if it was generated
    pub projects: Option<usize>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Public directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to create directory {path}: {message}")]
    CreateDirError { path: String, message: String },

    #[error("Failed to read {0}")]
    ReadError(String),

    #[error("Failed to copy {from} to {to}: {message}")]
    CopyError {
        from: String,
        to: String,
        message: String,
    },

    #[error("Failed to generate index: {0}")]
    IndexError(#[from] IndexError),
}

/// Builds the public directory from the challenge sources.
pub struct PublicBuilder {
    config: BuildConfig,
}

impl PublicBuilder {
    /// Create a new builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the build. The first error aborts it; nothing is rolled back.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let dirs_created = self.ensure_dirs()?;
        let files_copied = self.copy_challenges()?;
        let static_files = self.copy_static_files()?;

        let projects = if self.config.index {
            let output = self.config.resolve(&self.config.public_dir).join("index.html");
            let mut index = ProjectIndex::new(&self.config.root);
            Some(index.build(&output)?)
        } else {
            None
        };

        Ok(BuildResult {
            dirs_created,
            files_copied,
            static_files,
            projects,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.resolve(&self.config.public_dir),
        })
    }

    /// Create every configured directory that is missing.
    fn ensure_dirs(&self) -> Result<usize, BuildError> {
        let mut created = 0;

        for dir in &self.config.dirs {
            let path = self.config.resolve(dir);
            if path.exists() {
                continue;
            }

            fs::create_dir_all(&path).map_err(|e| BuildError::CreateDirError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            tracing::debug!("Created {}", path.display());
            created += 1;
        }

        Ok(created)
    }

    /// Copy the challenge tree into the public directory.
    fn copy_challenges(&self) -> Result<usize, BuildError> {
        let src = self.config.resolve(&self.config.challenges_dir);
        let dest = self
            .config
            .resolve(&self.config.public_dir)
            .join("challenges");

        if !src.exists() {
            tracing::warn!("Challenges directory not found: {}", src.display());
            return Ok(0);
        }

        let copied = copy_tree(&src, &dest)?;
        tracing::info!("Copied challenge files to {}", dest.display());

        Ok(copied)
    }

    /// Copy the configured static files whose sources exist.
    fn copy_static_files(&self) -> Result<usize, BuildError> {
        let mut copied = 0;

        for file in &self.config.static_files {
            let src = self.config.resolve(&file.src);
            let dest = self.config.resolve(&file.dest);

            if !src.exists() {
                tracing::debug!("Static file not found: {}", src.display());
                continue;
            }

            copy_file(&src, &dest)?;
            tracing::info!("Copied {} to {}", file.src.display(), file.dest.display());
            copied += 1;
        }

        Ok(copied)
    }
}

/// Recursively copy `src` into `dest`, overwriting existing files.
///
/// Files already in `dest` but absent from `src` are left alone. Returns the
/// number of files copied.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<usize, BuildError> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
        let path = entry.path();
        let relative = path.strip_prefix(src).unwrap_or(path);
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| BuildError::CreateDirError {
                path: target.display().to_string(),
                message: e.to_string(),
            })?;
        } else {
            copy_file(path, &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copy a single file, creating the destination's parent directory.
///
/// Copying a file onto itself is a no-op rather than a truncation.
pub fn copy_file(src: &Path, dest: &Path) -> Result<(), BuildError> {
    if is_same_file(src, dest) {
        return Ok(());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::CreateDirError {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }

    fs::copy(src, dest).map_err(|e| BuildError::CopyError {
        from: src.display().to_string(),
        to: dest.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
