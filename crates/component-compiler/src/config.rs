//! Configuration loading.

use camino::{Utf8Path, Utf8PathBuf};
use component_pipeline::DEFAULT_EXTENSION;
use component_transformer::DEFAULT_BANNER;
use serde::Deserialize;
use std::fs;
use tracing::{debug, warn};

/// The config file looked up in the workspace root.
pub const CONFIG_FILE: &str = "component-compiler.json";

/// Project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// File extensions to compile.
    pub extensions: Vec<String>,

    /// Glob patterns, relative to the workspace, to skip.
    pub ignore: Vec<String>,

    /// Where compiled files go, relative to the workspace.
    pub out_dir: Utf8PathBuf,

    /// Prologue prepended to every compiled component.
    pub banner: String,

    /// File name of the merged HTML document.
    pub document: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            ignore: Vec::new(),
            out_dir: Utf8PathBuf::from("build"),
            banner: DEFAULT_BANNER.to_string(),
            document: "index.html".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Loads the configuration for `workspace`.
    ///
    /// `explicit` overrides the default location. A missing file yields the
    /// defaults; an unreadable or invalid one is reported and also yields the
    /// defaults.
    pub fn load(workspace: &Utf8Path, explicit: Option<&Utf8Path>) -> Self {
        let path = match explicit {
            Some(path) => workspace.join(path),
            None => workspace.join(CONFIG_FILE),
        };

        if !path.exists() {
            if explicit.is_some() {
                warn!("config file {} does not exist, using defaults", path);
            }
            return Self::default();
        }

        match Self::parse_config(&path) {
            Ok(config) => {
                debug!(path = %path, "loaded config");
                config
            }
            Err(e) => {
                warn!("failed to parse {}: {}", path, e);
                Self::default()
            }
        }
    }

    fn parse_config(path: &Utf8Path) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let config: Self = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        if config.extensions.iter().any(|ext| ext.is_empty()) {
            return Err("extensions must not be empty strings".to_string());
        }
        Ok(config)
    }
}
