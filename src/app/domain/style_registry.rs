use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a name outside the fixed element set is used as a style key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown element tag: {0}")]
pub struct UnknownTagError(pub String);

/// The closed set of rendered elements that carry a configurable class string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    A,
    Img,
    Table,
    Tr,
    Td,
    Th,
    Ul,
    Ol,
    Li,
    Strong,
    Em,
}

impl ElementTag {
    pub const COUNT: usize = 18;

    pub fn all() -> &'static [ElementTag; Self::COUNT] {
        &[
            Self::H1,
            Self::H2,
            Self::H3,
            Self::H4,
            Self::H5,
            Self::H6,
            Self::P,
            Self::A,
            Self::Img,
            Self::Table,
            Self::Tr,
            Self::Td,
            Self::Th,
            Self::Ul,
            Self::Ol,
            Self::Li,
            Self::Strong,
            Self::Em,
        ]
    }

    /// HTML element name, also the key used in settings files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::P => "p",
            Self::A => "a",
            Self::Img => "img",
            Self::Table => "table",
            Self::Tr => "tr",
            Self::Td => "td",
            Self::Th => "th",
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Li => "li",
            Self::Strong => "strong",
            Self::Em => "em",
        }
    }

    /// Label shown next to the class input in the config panel.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
            Self::H5 => "H5",
            Self::H6 => "H6",
            Self::P => "Paragraph",
            Self::A => "Link",
            Self::Img => "Image",
            Self::Table => "Table",
            Self::Tr => "Table row",
            Self::Td => "Table cell",
            Self::Th => "Table header",
            Self::Ul => "Bullet list",
            Self::Ol => "Numbered list",
            Self::Li => "List item",
            Self::Strong => "Bold",
            Self::Em => "Italic",
        }
    }

    pub fn heading(level: u8) -> Option<ElementTag> {
        match level {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn default_classes(self) -> &'static str {
        match self {
            Self::H1 => "text-3xl font-bold mb-4 text-gray-800",
            Self::H2 => "text-2xl font-bold mb-4 text-gray-800",
            Self::H3 => "text-xl font-bold mb-4 text-gray-800",
            Self::H4 => "text-lg font-bold mb-4 text-gray-800",
            Self::H5 => "text-base font-bold mb-4 text-gray-800",
            Self::H6 => "text-sm font-bold mb-4 text-gray-800",
            Self::P => "mb-4",
            Self::A => "text-blue-500 hover:underline",
            Self::Img => "w-full",
            Self::Table => "table-auto",
            Self::Tr => "border-b",
            Self::Td => "px-4 py-2",
            Self::Th => "px-4 py-2 font-bold",
            Self::Ul => "list-disc list-inside mb-4",
            Self::Ol => "list-decimal list-inside mb-4",
            Self::Li => "mb-1",
            Self::Strong => "font-bold",
            Self::Em => "italic",
        }
    }
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementTag {
    type Err = UnknownTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTagError(s.to_string()))
    }
}

/// Class string per element. Every tag always has a value.
///
/// Class strings are stored verbatim: no trimming, no deduplication, no
/// reordering. The token helpers split on whitespace only when asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<String, String>", from = "BTreeMap<String, String>")]
pub struct StyleRegistry {
    classes: [String; ElementTag::COUNT],
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self {
            classes: ElementTag::all().map(|tag| tag.default_classes().to_string()),
        }
    }
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: ElementTag) -> &str {
        &self.classes[tag.index()]
    }

    pub fn get_by_name(&self, name: &str) -> Result<&str, UnknownTagError> {
        let tag: ElementTag = name.parse()?;
        Ok(self.get(tag))
    }

    pub fn set(&mut self, tag: ElementTag, classes: impl Into<String>) {
        self.classes[tag.index()] = classes.into();
    }

    pub fn set_by_name(&mut self, name: &str, classes: impl Into<String>) -> Result<(), UnknownTagError> {
        let tag: ElementTag = name.parse()?;
        self.set(tag, classes);
        Ok(())
    }

    /// Replace the class string with `tokens` joined by single spaces, in the
    /// order given.
    pub fn set_from_tokens<I, T>(&mut self, tag: ElementTag, tokens: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut joined = String::new();
        for token in tokens {
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(token.as_ref());
        }
        self.set(tag, joined);
    }

    pub fn tokens(&self, tag: ElementTag) -> impl Iterator<Item = &str> {
        self.get(tag).split_whitespace()
    }

    /// Append `token` unless it is already present. Returns whether it was added.
    pub fn add_token(&mut self, tag: ElementTag, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() || self.tokens(tag).any(|t| t == token) {
            return false;
        }
        let mut tokens: Vec<String> = self.tokens(tag).map(str::to_string).collect();
        tokens.push(token.to_string());
        self.set_from_tokens(tag, tokens);
        true
    }

    /// Remove every occurrence of `token`. Returns whether anything changed.
    pub fn remove_token(&mut self, tag: ElementTag, token: &str) -> bool {
        if !self.tokens(tag).any(|t| t == token) {
            return false;
        }
        let kept: Vec<String> = self
            .tokens(tag)
            .filter(|t| *t != token)
            .map(str::to_string)
            .collect();
        self.set_from_tokens(tag, kept);
        true
    }

    pub fn reset(&mut self, tag: ElementTag) {
        self.set(tag, tag.default_classes());
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self, tag: ElementTag) -> bool {
        self.get(tag) == tag.default_classes()
    }

    /// Immutable copy handed to the render pipeline.
    pub fn snapshot(&self) -> StyleRegistry {
        self.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementTag, &str)> {
        ElementTag::all().iter().map(move |&tag| (tag, self.get(tag)))
    }
}

impl From<StyleRegistry> for BTreeMap<String, String> {
    fn from(registry: StyleRegistry) -> Self {
        registry
            .iter()
            .map(|(tag, classes)| (tag.as_str().to_string(), classes.to_string()))
            .collect()
    }
}

/// Missing keys keep their defaults; unknown keys are dropped.
impl From<BTreeMap<String, String>> for StyleRegistry {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut registry = StyleRegistry::default();
        for (name, classes) in map {
            if let Err(e) = registry.set_by_name(&name, classes) {
                tracing::warn!("Ignoring saved style: {}", e);
            }
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_has_a_default() {
        let registry = StyleRegistry::default();
        for &tag in ElementTag::all() {
            assert!(!registry.get(tag).is_empty(), "{} has no default", tag);
            assert!(registry.is_default(tag));
        }
        assert_eq!(registry.get(ElementTag::H1), "text-3xl font-bold mb-4 text-gray-800");
    }

    #[test]
    fn test_set_then_get_for_every_tag() {
        let mut registry = StyleRegistry::new();
        for value in ["", "  spaced   out ", "text-red-500 md:text-lg", "ünïcode"] {
            for &tag in ElementTag::all() {
                registry.set(tag, value);
                assert_eq!(registry.get(tag), value);
            }
        }
    }

    #[test]
    fn test_tag_names_round_trip() {
        for &tag in ElementTag::all() {
            assert_eq!(tag.as_str().parse::<ElementTag>(), Ok(tag));
        }
    }

    #[test]
    fn test_unknown_tag_fails() {
        let mut registry = StyleRegistry::new();
        assert_eq!(registry.get_by_name("blockquote"), Err(UnknownTagError("blockquote".to_string())));
        assert!(registry.set_by_name("H1", "x").is_err());
        assert_eq!(registry.get_by_name("h1").unwrap(), "text-3xl font-bold mb-4 text-gray-800");
    }

    #[test]
    fn test_set_from_tokens_preserves_order() {
        let mut registry = StyleRegistry::new();
        registry.set_from_tokens(ElementTag::P, ["z-10", "a-1", "m-2"]);
        assert_eq!(registry.get(ElementTag::P), "z-10 a-1 m-2");

        registry.set_from_tokens(ElementTag::P, Vec::<String>::new());
        assert_eq!(registry.get(ElementTag::P), "");
    }

    #[test]
    fn test_add_and_remove_token() {
        let mut registry = StyleRegistry::new();
        assert!(registry.add_token(ElementTag::Em, "text-gray-500"));
        assert!(!registry.add_token(ElementTag::Em, "italic"));
        assert!(!registry.add_token(ElementTag::Em, "   "));
        assert_eq!(registry.get(ElementTag::Em), "italic text-gray-500");

        assert!(registry.remove_token(ElementTag::Em, "italic"));
        assert!(!registry.remove_token(ElementTag::Em, "italic"));
        assert_eq!(registry.get(ElementTag::Em), "text-gray-500");
    }

    #[test]
    fn test_reset() {
        let mut registry = StyleRegistry::new();
        registry.set(ElementTag::A, "");
        registry.set(ElementTag::Li, "x");
        registry.reset(ElementTag::A);
        assert!(registry.is_default(ElementTag::A));
        assert!(!registry.is_default(ElementTag::Li));
        registry.reset_all();
        assert_eq!(registry, StyleRegistry::default());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut registry = StyleRegistry::new();
        let snapshot = registry.snapshot();
        registry.set(ElementTag::H2, "changed");
        assert_eq!(snapshot.get(ElementTag::H2), "text-2xl font-bold mb-4 text-gray-800");
    }

    #[test]
    fn test_serialize_as_map() {
        let mut registry = StyleRegistry::new();
        registry.set(ElementTag::Td, "p-1");
        let json = serde_json::to_string(&registry).unwrap();
        assert!(json.contains("\"td\":\"p-1\""));
        let loaded: StyleRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn test_deserialize_partial_and_unknown_keys() {
        let json = r#"{"h1": "text-5xl", "marquee": "spin"}"#;
        let loaded: StyleRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(loaded.get(ElementTag::H1), "text-5xl");
        assert!(loaded.is_default(ElementTag::P));
    }
}
