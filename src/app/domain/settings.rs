use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::style_registry::StyleRegistry;
use crate::app::infrastructure::error::AppError;

/// Syntax highlighting themes bundled with syntect, used by the code view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SyntaxTheme {
    #[default]
    InspiredGitHub,
    Base16OceanLight,
    Base16OceanDark,
    Base16EightiesDark,
    Base16MochaDark,
    SolarizedLight,
    SolarizedDark,
}

impl SyntaxTheme {
    /// Get the syntect theme key for this theme
    pub fn theme_key(&self) -> &'static str {
        match self {
            Self::InspiredGitHub => "InspiredGitHub",
            Self::Base16OceanLight => "base16-ocean.light",
            Self::Base16OceanDark => "base16-ocean.dark",
            Self::Base16EightiesDark => "base16-eighties.dark",
            Self::Base16MochaDark => "base16-mocha.dark",
            Self::SolarizedLight => "Solarized (light)",
            Self::SolarizedDark => "Solarized (dark)",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::InspiredGitHub => "Inspired GitHub",
            Self::Base16OceanLight => "Base16 Ocean Light",
            Self::Base16OceanDark => "Base16 Ocean Dark",
            Self::Base16EightiesDark => "Base16 Eighties Dark",
            Self::Base16MochaDark => "Base16 Mocha Dark",
            Self::SolarizedLight => "Solarized Light",
            Self::SolarizedDark => "Solarized Dark",
        }
    }

    pub fn all() -> &'static [SyntaxTheme] {
        &[
            Self::InspiredGitHub,
            Self::Base16OceanLight,
            Self::Base16OceanDark,
            Self::Base16EightiesDark,
            Self::Base16MochaDark,
            Self::SolarizedLight,
            Self::SolarizedDark,
        ]
    }
}

/// Toggles that change rendering semantics, independent of class styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behavior {
    #[serde(default = "default_true")]
    pub open_links_in_new_tab: bool,

    #[serde(default = "default_true")]
    pub show_line_numbers: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            open_links_in_new_tab: true,
            show_line_numbers: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(flatten)]
    pub behavior: Behavior,

    #[serde(default)]
    pub code_theme: SyntaxTheme,

    /// Delay between the last edit and the draft save, 0 saves on every edit.
    #[serde(default)]
    pub save_debounce_ms: u64,

    /// Keep the style registry across sessions.
    #[serde(default)]
    pub remember_styles: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleRegistry>,
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            behavior: Behavior::default(),
            code_theme: SyntaxTheme::default(),
            save_debounce_ms: 0,
            remember_styles: false,
            styles: None,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                tracing::warn!("Could not read settings {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                if let Err(e) = default.save_to(path) {
                    tracing::warn!("Could not write default settings: {}", e);
                }
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("taildown");
        path.push("settings.json");
        path
    }

    /// Styles to start the session with: the saved ones when remembering is on.
    pub fn initial_styles(&self) -> StyleRegistry {
        match (&self.styles, self.remember_styles) {
            (Some(styles), true) => styles.clone(),
            _ => StyleRegistry::default(),
        }
    }

    /// Record the session's styles, or drop them when remembering is off.
    pub fn capture_styles(&mut self, registry: &StyleRegistry) {
        self.styles = if self.remember_styles {
            Some(registry.snapshot())
        } else {
            None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::style_registry::ElementTag;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert!(settings.behavior.open_links_in_new_tab);
        assert!(settings.behavior.show_line_numbers);
        assert_eq!(settings.code_theme, SyntaxTheme::InspiredGitHub);
        assert_eq!(settings.save_debounce_ms, 0);
        assert!(!settings.remember_styles);
        assert!(settings.styles.is_none());
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_behavior_is_flattened() {
        let json = serde_json::to_string(&AppSettings::default()).unwrap();
        assert!(json.contains("\"open_links_in_new_tab\":true"));
        assert!(!json.contains("\"behavior\""));
        assert!(!json.contains("\"styles\""));
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"open_links_in_new_tab": false}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert!(!settings.behavior.open_links_in_new_tab);
        assert!(settings.behavior.show_line_numbers);
        assert_eq!(settings.code_theme, SyntaxTheme::InspiredGitHub);
    }

    #[test]
    fn test_styles_only_kept_when_remembered() {
        let mut registry = StyleRegistry::new();
        registry.set(ElementTag::H1, "text-6xl");

        let mut settings = AppSettings::default();
        settings.capture_styles(&registry);
        assert!(settings.styles.is_none());
        assert_eq!(settings.initial_styles(), StyleRegistry::default());

        settings.remember_styles = true;
        settings.capture_styles(&registry);
        assert_eq!(settings.initial_styles().get(ElementTag::H1), "text-6xl");
    }

    #[test]
    fn test_save_and_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = AppSettings {
            code_theme: SyntaxTheme::SolarizedDark,
            save_debounce_ms: 400,
            remember_styles: true,
            ..Default::default()
        };
        let mut registry = StyleRegistry::new();
        registry.set(ElementTag::Img, "rounded shadow");
        settings.capture_styles(&registry);
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, settings);
        assert_eq!(loaded.initial_styles().get(ElementTag::Img), "rounded shadow");
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_unreadable_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let bytes = [0xff, 0xfe, b'{', b'}'];
        fs::write(&path, bytes).unwrap();

        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }
}
