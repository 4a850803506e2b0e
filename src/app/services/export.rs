use std::fs;
use std::path::Path;

use crate::app::domain::view_mode::ViewMode;
use crate::app::infrastructure::error::Result;

pub const MARKDOWN_FILENAME: &str = "markdown.md";
pub const HTML_FILENAME: &str = "generated.html";
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// A file ready to hand to the download collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub content: String,
    pub mime_type: &'static str,
}

impl ExportFile {
    /// Save to an explicit path chosen by the user.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, &self.content)?;
        tracing::info!("Exported {} ({} bytes)", path.display(), self.content.len());
        Ok(())
    }
}

/// The edit view exports Markdown, every other view exports the generated HTML.
pub fn export_current(mode: ViewMode, text: &str, html: &str) -> ExportFile {
    match mode {
        ViewMode::Edit => ExportFile {
            filename: MARKDOWN_FILENAME,
            content: text.to_string(),
            mime_type: EXPORT_MIME_TYPE,
        },
        ViewMode::Preview | ViewMode::Code | ViewMode::Config => ExportFile {
            filename: HTML_FILENAME,
            content: html.to_string(),
            mime_type: EXPORT_MIME_TYPE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_mode_exports_markdown() {
        let file = export_current(ViewMode::Edit, "hello", "<p>hello</p>\n");
        assert_eq!(file.filename, "markdown.md");
        assert_eq!(file.content, "hello");
        assert_eq!(file.mime_type, "text/plain");
    }

    #[test]
    fn test_other_modes_export_html() {
        for mode in [ViewMode::Preview, ViewMode::Code, ViewMode::Config] {
            let file = export_current(mode, "hello", "<p>hello</p>\n");
            assert_eq!(file.filename, "generated.html");
            assert_eq!(file.content, "<p>hello</p>\n");
            assert_eq!(file.mime_type, "text/plain");
        }
    }

    #[test]
    fn test_write_to_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let file = export_current(ViewMode::Code, "", "<h1>x</h1>");
        let path = dir.path().join("out").join(file.filename);
        file.write_to(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<h1>x</h1>");
    }
}
