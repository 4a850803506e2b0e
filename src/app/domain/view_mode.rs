use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Edit,
    Preview,
    Code,
    Config,
}

impl ViewMode {
    pub fn all() -> &'static [ViewMode] {
        &[Self::Edit, Self::Preview, Self::Code, Self::Config]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Preview => "preview",
            Self::Code => "code",
            Self::Config => "config",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Preview => "Preview",
            Self::Code => "HTML Code",
            Self::Config => "Settings",
        }
    }

    /// Toolbar insertions are only offered while the edit surface is showing.
    pub fn allows_editing(&self) -> bool {
        matches!(self, Self::Edit)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown view mode: {}", s))
    }
}

/// Holds the active view. Every transition is allowed.
#[derive(Debug, Clone, Default)]
pub struct ViewModeController {
    mode: ViewMode,
}

impl ViewModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch views. Returns the previous mode.
    pub fn select(&mut self, mode: ViewMode) -> ViewMode {
        let previous = self.mode;
        self.mode = mode;
        if previous != mode {
            tracing::debug!("View mode {} -> {}", previous, mode);
        }
        previous
    }

    pub fn editing_enabled(&self) -> bool {
        self.mode.allows_editing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_edit() {
        let controller = ViewModeController::new();
        assert_eq!(controller.mode(), ViewMode::Edit);
        assert!(controller.editing_enabled());
    }

    #[test]
    fn test_any_transition_is_allowed() {
        let mut controller = ViewModeController::new();
        for &from in ViewMode::all() {
            for &to in ViewMode::all() {
                controller.select(from);
                assert_eq!(controller.select(to), from);
                assert_eq!(controller.mode(), to);
                assert_eq!(controller.editing_enabled(), to == ViewMode::Edit);
            }
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("code".parse::<ViewMode>(), Ok(ViewMode::Code));
        assert!("Code".parse::<ViewMode>().is_err());
        assert_eq!(serde_json::to_string(&ViewMode::Preview).unwrap(), "\"preview\"");
    }
}
