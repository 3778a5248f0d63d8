use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::highlight::TokenKind;

/// Shipped defaults, checked by `build.rs`.
pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub palette: PaletteConfig,
    pub code: CodeConfig,
    pub headers: HeadersConfig,
    pub inline: InlineConfig,
}

/// Token colours for highlighted code
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub text: String,
    pub comment: String,
    pub string: String,
    pub number: String,
    pub keyword: String,
    pub function: String,
    pub type_name: String,
    pub operator: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            text: "#c0caf5".to_string(),
            comment: "#565f89".to_string(),
            string: "#9ece6a".to_string(),
            number: "#ff9e64".to_string(),
            keyword: "#bb9af7".to_string(),
            function: "#7aa2f7".to_string(),
            type_name: "#2ac3de".to_string(),
            operator: "#89ddff".to_string(),
        }
    }
}

impl PaletteConfig {
    pub fn color_for(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Comment => &self.comment,
            TokenKind::String => &self.string,
            TokenKind::Number => &self.number,
            TokenKind::Keyword => &self.keyword,
            TokenKind::FunctionName => &self.function,
            TokenKind::TypeName => &self.type_name,
            TokenKind::Operator => &self.operator,
            TokenKind::Plain => &self.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CodeConfig {
    pub line_numbers: bool,
    pub language_label: bool,
    pub background: String,
    pub header_background: String,
    pub border: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            language_label: true,
            background: "#1a1b26".to_string(),
            header_background: "#16161e".to_string(),
            border: "#414868".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeadersConfig {
    pub colors: Vec<String>,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            colors: ["#bb9af7", "#7aa2f7", "#9ece6a", "#e0af68", "#f7768e", "#565f89"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl HeadersConfig {
    /// Get the colour for a heading level.
    /// Returns None if the list is shorter than the level.
    pub fn color_for_level(&self, level: u8) -> Option<&str> {
        let index = usize::from(level.clamp(1, 6)) - 1;
        self.colors.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InlineConfig {
    pub code_background: String,
    pub code_foreground: String,
    pub bold: String,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            code_background: "#292e42".to_string(),
            code_foreground: "#9ece6a".to_string(),
            bold: "#c0caf5".to_string(),
        }
    }
}

impl Config {
    /// Parse the config embedded at build time.
    pub fn compiled_default() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            warn!("embedded default config did not parse: {}", e);
            Self::default()
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return the compiled default if it is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                debug!("loaded config from {}", path.display());
                config
            }
            Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                Self::compiled_default()
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::compiled_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn compiled_default_matches_default_impl() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str("[code]\nline_numbers = false\n").unwrap();
        assert!(!config.code.line_numbers);
        assert!(config.code.language_label);
        assert_eq!(config.palette, PaletteConfig::default());
    }

    #[test]
    fn heading_colour_lookup() {
        let headers = HeadersConfig::default();
        assert_eq!(headers.color_for_level(1), Some("#bb9af7"));
        assert_eq!(headers.color_for_level(6), Some("#565f89"));
        assert_eq!(headers.color_for_level(9), Some("#565f89"));

        let short = HeadersConfig {
            colors: vec!["#000000".to_string()],
        };
        assert_eq!(short.color_for_level(2), None);
    }

    #[test]
    fn load_reports_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[palette\ntext = 1").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert_eq!(Config::load_or_default(file.path()), Config::default());
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(Config::load(&path), Err(Error::Io { .. })));
        assert_eq!(Config::load_or_default(&path), Config::default());
    }
}
