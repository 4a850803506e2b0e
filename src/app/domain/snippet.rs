//! Toolbar templates inserted at the caret.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snippet {
    Heading1,
    Heading2,
    Heading3,
    Image,
    Link,
    Table,
}

impl Snippet {
    pub fn all() -> &'static [Snippet] {
        &[
            Self::Heading1,
            Self::Heading2,
            Self::Heading3,
            Self::Image,
            Self::Link,
            Self::Table,
        ]
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Heading1 => "\n# ",
            Self::Heading2 => "\n## ",
            Self::Heading3 => "\n### ",
            Self::Image => "![Alt Text](image.png)",
            Self::Link => "\n[Link Text](example.com)",
            Self::Table => "\n|   |   |   |\n|---|---|---|",
        }
    }

    /// Short button caption.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Heading1 => "H1",
            Self::Heading2 => "H2",
            Self::Heading3 => "H3",
            Self::Image => "Image",
            Self::Link => "Link",
            Self::Table => "Table",
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            Self::Heading1 => "Insert a level 1 heading",
            Self::Heading2 => "Insert a level 2 heading",
            Self::Heading3 => "Insert a level 3 heading",
            Self::Image => "Insert an image",
            Self::Link => "Insert a link",
            Self::Table => "Insert a three column table",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_snippets() {
        assert_eq!(Snippet::Heading1.text(), "\n# ");
        assert_eq!(Snippet::Heading2.text(), "\n## ");
        assert_eq!(Snippet::Heading3.text(), "\n### ");
    }

    #[test]
    fn test_table_snippet_is_a_gfm_table() {
        let lines: Vec<&str> = Snippet::Table.text().lines().collect();
        assert_eq!(lines, vec!["", "|   |   |   |", "|---|---|---|"]);
    }

    #[test]
    fn test_every_snippet_has_a_caption() {
        for snippet in Snippet::all() {
            assert!(!snippet.label().is_empty());
            assert!(!snippet.tooltip().is_empty());
        }
    }
}
