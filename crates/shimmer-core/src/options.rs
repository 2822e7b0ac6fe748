//! Configuration options for the UI host.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for an immediate-mode UI host.
///
/// Every field has a default, so a JSON file only needs to list the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Time step handed to the toolkit when the engine reports a non-positive one.
    pub default_time_step: f32,

    /// Number of scancodes tracked in the key state table.
    pub key_capacity: usize,

    /// Extra vertices allocated whenever the vertex buffer is resized.
    pub vertex_headroom: usize,

    /// Extra indices allocated whenever the index buffer is resized.
    pub index_headroom: usize,

    /// Whether the toolkit's debug menu bar is shown.
    pub debug_menu: bool,

    /// Report the mouse as absent (`(-1, -1)`) while the OS cursor is hidden.
    pub mouse_visible_required: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_time_step: 1.0 / 60.0,
            key_capacity: 512,
            vertex_headroom: 1000,
            index_headroom: 2000,
            debug_menu: false,
            mouse_visible_required: true,
        }
    }
}

impl Options {
    /// Parses options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&text)?;
        log::debug!("loaded ui options from {}", path.display());
        Ok(options)
    }

    /// Serializes these options as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.key_capacity, 512);
        assert_eq!(options.vertex_headroom, 1000);
        assert_eq!(options.index_headroom, 2000);
        assert!((options.default_time_step - 1.0 / 60.0).abs() < f32::EPSILON);
        assert!(!options.debug_menu);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = Options::from_json_str(r#"{ "debug_menu": true, "key_capacity": 256 }"#)
            .expect("valid json");
        assert!(options.debug_menu);
        assert_eq!(options.key_capacity, 256);
        assert_eq!(options.vertex_headroom, 1000);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Options::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, crate::ShimmerError::JsonError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "index_headroom": 64 }}"#).expect("write");

        let options = Options::load(file.path()).expect("load");
        assert_eq!(options.index_headroom, 64);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Options::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, crate::ShimmerError::IoError(_)));
    }

    #[test]
    fn test_json_string_parses_back() {
        let options = Options {
            debug_menu: true,
            ..Options::default()
        };
        let json = options.to_json_string().expect("serialize");
        assert_eq!(Options::from_json_str(&json).expect("parse"), options);
    }
}
