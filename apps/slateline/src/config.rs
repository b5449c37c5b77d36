//! # Project Configuration
//!
//! User preferences, model parameters, and agent toggles, loaded from a
//! `slateline.toml` next to the project (every field has a default, so an
//! absent file is a valid configuration).

use crate::pipeline::PipelineError;
use serde::{Deserialize, Serialize};
use slateline_core::Category;
use std::path::{Path, PathBuf};

// =============================================================================
// PERFORMANCE MAPPING
// =============================================================================

/// Named concurrency levels: how many scenes may be in flight at once.
pub const PERFORMANCE_LEVELS: [(&str, usize); 4] =
    [("eco", 1), ("power", 4), ("turbo", 6), ("max", 8)];

/// Hard ceiling on concurrent scenes; a local Ollama saturates well below this.
pub const MAX_WORKERS: usize = 8;

// =============================================================================
// PROJECT CONFIG
// =============================================================================

/// Application-wide settings and user preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    // Model runtime
    /// Ollama model tag.
    pub model: String,
    /// Ollama server base URL.
    pub base_url: String,
    /// Sampling temperature, clamped into 0.0..=1.0 on load.
    pub temperature: f32,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    // Extraction logic
    /// Only extract items explicitly named in the text.
    pub conservative_mode: bool,
    /// Allow `implied` elements (smoke for a fire, wrangler for a dog).
    pub extract_implied_elements: bool,
    /// Append Final Draft tagging data to extracted lines.
    pub import_fdx_tags: bool,

    // Performance & concurrency
    /// Named level: eco, power, turbo, max.
    pub performance_mode: String,
    /// Explicit worker override; takes precedence over the named level.
    pub workers: Option<usize>,

    // Movie Magic setup
    /// Categories the harvester is allowed to populate.
    pub categories: Vec<Category>,

    // Agentic workflow toggles
    pub use_continuity_agent: bool,
    pub use_flag_agent: bool,

    // Output
    /// Directory for checkpoints and exports.
    pub output_dir: PathBuf,
    /// Write a checkpoint after every analyzed scene.
    pub auto_save: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            model: "llama3.1:8b".to_string(),
            base_url: "http://localhost:11434".to_string(),
            temperature: 0.0,
            request_timeout_secs: 120,
            conservative_mode: true,
            extract_implied_elements: false,
            import_fdx_tags: false,
            performance_mode: "power".to_string(),
            workers: None,
            categories: default_categories(),
            use_continuity_agent: true,
            use_flag_agent: true,
            output_dir: PathBuf::from("outputs"),
            auto_save: true,
        }
    }
}

/// Every MMS category except the human-entry ones (Security, Notes).
#[must_use]
pub fn default_categories() -> Vec<Category> {
    Category::ALL
        .iter()
        .copied()
        .filter(|c| !c.is_human_entry())
        .collect()
}

impl ProjectConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults; a present-but-invalid file is an
    /// error (silent fallback would hide typos in agent toggles).
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("read {}: {e}", path.display())))?;
        let mut config: ProjectConfig = toml::from_str(&raw)
            .map_err(|e| PipelineError::Config(format!("parse {}: {e}", path.display())))?;
        config.sanitize();
        Ok(config)
    }

    /// Render the configuration as TOML (used by `slateline init`).
    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string(self).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Clamp out-of-range numeric settings and drop human-entry categories.
    fn sanitize(&mut self) {
        self.temperature = self.temperature.clamp(0.0, 1.0);
        if let Some(workers) = self.workers {
            self.workers = Some(workers.clamp(1, MAX_WORKERS));
        }
        self.categories.retain(|c| !c.is_human_entry());
        if self.categories.is_empty() {
            self.categories = default_categories();
        }
    }

    /// Resolve the effective worker count from the override or named level.
    #[must_use]
    pub fn worker_threads(&self) -> usize {
        if let Some(workers) = self.workers {
            return workers.clamp(1, MAX_WORKERS);
        }
        let mode = self.performance_mode.to_ascii_lowercase();
        PERFORMANCE_LEVELS
            .iter()
            .find(|(name, _)| *name == mode)
            .map(|(_, workers)| *workers)
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn defaults_exclude_human_entry_categories() {
        let config = ProjectConfig::default();
        assert!(!config.categories.contains(&Category::Notes));
        assert!(!config.categories.contains(&Category::Security));
        assert_eq!(config.categories.len(), 21);
    }

    #[test]
    fn performance_levels_resolve() {
        let mut config = ProjectConfig::default();
        assert_eq!(config.worker_threads(), 4); // power
        config.performance_mode = "turbo".to_string();
        assert_eq!(config.worker_threads(), 6);
        config.performance_mode = "unknown".to_string();
        assert_eq!(config.worker_threads(), 1); // safe fallback
        config.workers = Some(99);
        assert_eq!(config.worker_threads(), MAX_WORKERS);
    }

    #[test]
    fn toml_roundtrip() {
        let config = ProjectConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: ProjectConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.categories, config.categories);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: ProjectConfig =
            toml::from_str("model = \"llama3.2\"\ntemperature = 0.4\n").unwrap();
        assert_eq!(parsed.model, "llama3.2");
        assert_eq!(parsed.temperature, 0.4);
        assert!(parsed.use_flag_agent);
        assert_eq!(parsed.base_url, "http://localhost:11434");
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<ProjectConfig>("modle = \"typo\"\n").is_err());
    }
}
