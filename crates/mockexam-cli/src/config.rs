//! mockexam configuration file handling.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mockexam_core::model::{Candidate, MarkingScheme};

/// Top-level mockexam configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockexamConfig {
    /// Directory holding paper JSON files.
    #[serde(default = "default_papers_dir")]
    pub papers_dir: PathBuf,
    /// Output directory for result artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Registration record stamped onto result cards.
    #[serde(default)]
    pub candidate: Option<Candidate>,
    /// Marking-scheme override. Absent means the standard +1 / -0.25.
    #[serde(default)]
    pub marking: Option<MarkingScheme>,
}

fn default_papers_dir() -> PathBuf {
    PathBuf::from("./papers")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./mockexam-results")
}

impl Default for MockexamConfig {
    fn default() -> Self {
        Self {
            papers_dir: default_papers_dir(),
            output_dir: default_output_dir(),
            candidate: None,
            marking: None,
        }
    }
}

impl MockexamConfig {
    /// The marking scheme to grade with.
    pub fn marking_scheme(&self) -> MarkingScheme {
        self.marking.unwrap_or_default()
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `mockexam.toml` in the current directory
/// 2. `~/.config/mockexam/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<MockexamConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mockexam.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = dirs_path() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<MockexamConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MockexamConfig::default(),
    };

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mockexam"))
}
