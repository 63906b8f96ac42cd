//! Configuration file structure (gallery.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gallery_server::ServerConfig;
use gallery_static::{BuildConfig, StaticFile};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    #[serde(default = "default_challenges_dir")]
    pub challenges_dir: String,
    /// Generate the project index page
    #[serde(default = "default_index")]
    pub index: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            challenges_dir: default_challenges_dir(),
            index: default_index(),
        }
    }
}

fn default_port() -> u16 {
    3000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_public_dir() -> String {
    "public".to_string()
}
fn default_challenges_dir() -> String {
    "challenges".to_string()
}
fn default_index() -> bool {
    true
}

/// Loaded configuration plus the project root it applies to.
#[derive(Debug)]
pub struct Config {
    /// Directory containing the config file
    pub root: PathBuf,
    pub file: ConfigFile,
}

impl Config {
    /// Load configuration from `path` if it exists.
    ///
    /// The project root is the file's directory. Returns an error if the
    /// config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let file = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file: ConfigFile = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            tracing::info!("Loaded config from {}", path.display());
            file
        } else {
            ConfigFile::default()
        };

        Ok(Self { root, file })
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root.join(&self.file.build.public_dir)
    }

    /// Build settings with the public layout derived from `public_dir`.
    pub fn build_config(&self) -> BuildConfig {
        let public = PathBuf::from(&self.file.build.public_dir);

        BuildConfig {
            root: self.root.clone(),
            public_dir: public.clone(),
            challenges_dir: PathBuf::from(&self.file.build.challenges_dir),
            dirs: vec![
                public.clone(),
                public.join("css"),
                public.join("js"),
                public.join("challenges"),
                PathBuf::from("node_modules"),
            ],
            static_files: ["css/style.css", "js/main.js"]
                .iter()
                .map(|file| StaticFile::new(public.join(file), public.join(file)))
                .collect(),
            index: self.file.build.index,
        }
    }

    /// Server settings, with `port` overriding the file when given.
    pub fn server_config(&self, port: Option<u16>, open: bool) -> ServerConfig {
        ServerConfig {
            root: self.root.clone(),
            public_dir: PathBuf::from(&self.file.build.public_dir),
            port: port.unwrap_or(self.file.server.port),
            host: self.file.server.host.clone(),
            open,
        }
    }
}
