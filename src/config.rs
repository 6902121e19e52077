//! Editor settings

use serde::Deserialize;
use std::path::Path;

use crate::error::ParseError;

/// Knobs for the tag editor's widget policy
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditorConfig {
    /// Text fields with more distinct values than this default to a "contains" widget
    #[serde(default = "default_search_widget_distinct_count")]
    pub search_widget_distinct_count: u64,
    /// Reload a mapped field's metadata on mount even when it is cached
    #[serde(default = "default_force_field_reload")]
    pub force_field_reload: bool,
}

fn default_search_widget_distinct_count() -> u64 {
    20
}

fn default_force_field_reload() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            search_widget_distinct_count: default_search_widget_distinct_count(),
            force_field_reload: default_force_field_reload(),
        }
    }
}

impl EditorConfig {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path_str = path.as_ref().display().to_string();
        let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
            path: path_str,
            source: e,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        serde_yaml::from_str(yaml).map_err(ParseError::from)
    }
}
