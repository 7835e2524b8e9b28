//! Catalog configuration
//!
//! The whole server is driven by one YAML file: server identity plus the
//! tool and prompt catalogs. This module owns the file format and the
//! lookup order for finding the file on disk.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{GuidekitError, Result};

/// File name probed in the default locations.
pub const DEFAULT_CONFIG_FILE: &str = "guidekit.yaml";

/// Top-level catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerSection,
    #[serde(default)]
    pub tools: Vec<ToolConfig>,
    #[serde(default)]
    pub prompts: Vec<PromptConfig>,
}

/// Identity the server reports during the initialize handshake.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    pub name: String,
    pub version: String,
}

/// One tool entry: a named, schema-described document.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Advertised verbatim in `tools/list`; the server never validates
    /// call arguments against it.
    #[serde(default = "default_schema", rename = "inputSchema", alias = "input_schema")]
    pub input_schema: Value,
    pub content: ToolContent,
}

fn default_schema() -> Value {
    serde_json::json!({"type": "object", "properties": {}})
}

/// A tool's document body: either literal markdown or a structured
/// outline the server renders to markdown itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolContent {
    Markdown {
        markdown: String,
    },
    Structured {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        intro: Option<String>,
        #[serde(default)]
        rules: Vec<RuleEntry>,
        #[serde(default)]
        footer: Option<String>,
    },
}

/// One item in a structured tool's rule list.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    pub name: String,
    pub description: String,
}

/// One prompt entry: a template plus its declared arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
    pub template: String,
}

/// A declared prompt argument. `required` is advertised to clients but
/// not enforced: a missing required argument still renders, with the
/// same defaults as an optional one.
#[derive(Debug, Clone, Deserialize)]
pub struct ArgumentSpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

impl Config {
    /// Load and parse the catalog at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GuidekitError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&raw)
            .map_err(|e| GuidekitError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Resolve the catalog path.
    ///
    /// An explicit path (flag or environment) wins and must exist.
    /// Otherwise probe `./guidekit.yaml`, then the per-user config
    /// directory (`~/.config/guidekit/guidekit.yaml` on Linux).
    pub fn locate(explicit: Option<&str>) -> Result<PathBuf> {
        if let Some(raw) = explicit {
            let expanded = shellexpand::tilde(raw).to_string();
            let path = PathBuf::from(expanded);
            if path.exists() {
                return Ok(path);
            }
            return Err(GuidekitError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let mut searched = Vec::new();

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Ok(local);
        }
        searched.push(local);

        if let Some(base) = dirs::config_dir() {
            let user = base.join("guidekit").join(DEFAULT_CONFIG_FILE);
            if user.exists() {
                return Ok(user);
            }
            searched.push(user);
        }

        let listing = searched
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(GuidekitError::Config(format!(
            "no catalog found (searched: {})",
            listing
        )))
    }
}
