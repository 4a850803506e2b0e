//! Markdown to styled HTML.
//!
//! [`render`] is a pure function of its inputs: the same Markdown, style
//! snapshot and options always produce the same tree and the same HTML string.
//! The HTML string is the serialization of the tree, so the preview, the code
//! view, copy and export all show identical markup.

mod tree;
mod writer;

use pulldown_cmark::{Options, Parser};

pub use tree::{Element, Node, find_all};

use crate::app::domain::settings::Behavior;
use crate::app::domain::style_registry::StyleRegistry;
use writer::StyledWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Anchors get `target="_blank" rel="noopener noreferrer"`.
    pub open_links_in_new_tab: bool,
}

impl From<&Behavior> for RenderOptions {
    fn from(behavior: &Behavior) -> Self {
        Self {
            open_links_in_new_tab: behavior.open_links_in_new_tab,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    nodes: Vec<Node>,
    html: String,
}

impl Rendered {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        find_all(&self.nodes, name)
    }
}

/// GitHub flavoured extensions: tables, strikethrough and task lists.
pub fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

pub fn render(markdown: &str, styles: &StyleRegistry, options: RenderOptions) -> Rendered {
    let parser = Parser::new_ext(markdown, parser_options());
    let nodes = StyledWriter::new(styles, options).run(parser);

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    // Writing into a String cannot fail.
    let _ = tree::write_nodes(&nodes, &mut html);

    tracing::debug!(bytes_in = markdown.len(), bytes_out = html.len(), "Rendered markdown");
    Rendered { nodes, html }
}
