//! Syntax coloring for the generated HTML shown in the code view.

mod style_map;

use syntect::highlighting::{HighlightIterator, HighlightState, Highlighter, ThemeSet};
use syntect::parsing::{ParseState, ScopeStack, SyntaxSet};
use syntect::util::LinesWithEndings;

pub use style_map::{DEFAULT_STYLE, MAX_STYLES, StyleMap};

use crate::app::domain::settings::SyntaxTheme;

/// Style characters for a highlighted text, one per byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub style_string: String,
    pub palette: Vec<Option<(u8, u8, u8)>>,
}

pub struct HtmlHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme: SyntaxTheme,
    style_map: StyleMap,
}

impl HtmlHighlighter {
    pub fn new(theme: SyntaxTheme) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme,
            style_map: StyleMap::new(),
        }
    }

    pub fn set_theme(&mut self, theme: SyntaxTheme) {
        if self.theme != theme {
            self.theme = theme;
            self.style_map.clear();
        }
    }

    /// Highlight `html` from scratch.
    pub fn highlight(&mut self, html: &str) -> Highlighted {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("html")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let Some(theme) = self.theme_set.themes.get(self.theme.theme_key()) else {
            tracing::warn!("Theme {} not bundled, highlighting disabled", self.theme.theme_key());
            return Highlighted {
                style_string: DEFAULT_STYLE.to_string().repeat(html.len()),
                palette: self.style_map.palette().to_vec(),
            };
        };

        let highlighter = Highlighter::new(theme);
        let mut parse_state = ParseState::new(syntax);
        let mut highlight_state = HighlightState::new(&highlighter, ScopeStack::new());
        let mut style_string = String::with_capacity(html.len());

        for line in LinesWithEndings::from(html) {
            let ops = match parse_state.parse_line(line, &self.syntax_set) {
                Ok(ops) => ops,
                Err(e) => {
                    tracing::debug!("HTML highlighting stopped early: {}", e);
                    Vec::new()
                }
            };
            let iter = HighlightIterator::new(&mut highlight_state, &ops, line, &highlighter);
            for (style, piece) in iter {
                let ch = self.style_map.get_or_insert(style.foreground);
                // One style char per byte (not per char) for UTF-8 correctness
                for _ in 0..piece.len() {
                    style_string.push(ch);
                }
            }
        }

        Highlighted {
            style_string,
            palette: self.style_map.palette().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_style_char_per_byte() {
        let mut highlighter = HtmlHighlighter::new(SyntaxTheme::default());
        let html = "<h1 class=\"text-3xl\">Café ☕</h1>\n<p>x</p>\n";
        let result = highlighter.highlight(html);
        assert_eq!(result.style_string.len(), html.len());
        assert!(result.palette.len() <= MAX_STYLES);
        assert_eq!(result.palette[0], None);
    }

    #[test]
    fn test_markup_is_colored() {
        let mut highlighter = HtmlHighlighter::new(SyntaxTheme::Base16OceanDark);
        let result = highlighter.highlight("<p class=\"mb-4\">text</p>\n");
        assert!(result.palette.len() > 1);
        assert!(result.style_string.chars().any(|c| c != DEFAULT_STYLE));
        assert!(result.style_string.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_empty_input() {
        let mut highlighter = HtmlHighlighter::new(SyntaxTheme::default());
        let result = highlighter.highlight("");
        assert!(result.style_string.is_empty());
    }

    #[test]
    fn test_every_theme_is_bundled() {
        let bundled = ThemeSet::load_defaults();
        for theme in SyntaxTheme::all() {
            assert!(bundled.themes.contains_key(theme.theme_key()), "{}", theme.theme_key());
        }
    }

    #[test]
    fn test_theme_change_resets_palette() {
        let mut highlighter = HtmlHighlighter::new(SyntaxTheme::Base16OceanDark);
        let dark = highlighter.highlight("<a href=\"x\">y</a>");
        highlighter.set_theme(SyntaxTheme::InspiredGitHub);
        let light = highlighter.highlight("<a href=\"x\">y</a>");
        assert_eq!(dark.style_string.len(), light.style_string.len());
        assert_ne!(dark.palette, light.palette);
    }
}
