//! Rendered document tree and its HTML serialization.

use std::fmt::{self, Write};

use pulldown_cmark_escape::{FmtWriter, escape_href, escape_html, escape_html_body_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// HTML taken verbatim from the Markdown source.
    Raw(String),
}

impl Node {
    /// Concatenated text of this node and its descendants. Raw HTML is skipped.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Node::Text(text) => out.push_str(text),
            Node::Raw(_) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    pub fn is_void(&self) -> bool {
        matches!(self.name, "img" | "br" | "hr" | "input")
    }
}

/// Elements followed by a newline once closed.
fn breaks_after_close(name: &str) -> bool {
    matches!(
        name,
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "ul" | "ol" | "li" | "blockquote"
            | "pre" | "table" | "thead" | "tbody" | "tr" | "th" | "td" | "hr" | "br"
    )
}

/// Containers whose children start on their own line.
fn breaks_after_open(name: &str) -> bool {
    matches!(
        name,
        "ul" | "ol" | "blockquote" | "table" | "thead" | "tbody" | "tr"
    )
}

pub(crate) fn write_nodes(nodes: &[Node], out: &mut String) -> fmt::Result {
    for node in nodes {
        write_node(node, out)?;
    }
    Ok(())
}

fn write_node(node: &Node, out: &mut String) -> fmt::Result {
    match node {
        Node::Text(text) => escape_html_body_text(FmtWriter(&mut *out), text),
        Node::Raw(raw) => out.write_str(raw),
        Node::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) -> fmt::Result {
    out.write_char('<')?;
    out.write_str(el.name)?;
    for (key, value) in &el.attrs {
        write!(out, " {}=\"", key)?;
        if matches!(*key, "href" | "src") {
            escape_href(FmtWriter(&mut *out), value)?;
        } else {
            escape_html(FmtWriter(&mut *out), value)?;
        }
        out.write_char('"')?;
    }

    if el.is_void() {
        out.write_str(" />")?;
    } else {
        out.write_char('>')?;
        if breaks_after_open(el.name) {
            out.write_char('\n')?;
        }
        write_nodes(&el.children, out)?;
        write!(out, "</{}>", el.name)?;
    }

    if breaks_after_close(el.name) {
        out.write_char('\n')?;
    }
    Ok(())
}

/// Every element named `name`, in document order.
pub fn find_all<'a>(nodes: &'a [Node], name: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect_named(nodes, name, &mut found);
    found
}

fn collect_named<'a>(nodes: &'a [Node], name: &str, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.name == name {
                found.push(el);
            }
            collect_named(&el.children, name, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_html(nodes: &[Node]) -> String {
        let mut out = String::new();
        write_nodes(nodes, &mut out).unwrap();
        out
    }

    #[test]
    fn test_void_element() {
        let img = Element::new("img").with_attr("src", "a b.png").with_attr("alt", "x\"y");
        assert_eq!(to_html(&[Node::Element(img)]), r#"<img src="a%20b.png" alt="x&quot;y" />"#);
    }

    #[test]
    fn test_block_layout() {
        let mut ul = Element::new("ul");
        let mut li = Element::new("li");
        li.children.push(Node::Text("a < b".to_string()));
        ul.children.push(Node::Element(li));
        assert_eq!(to_html(&[Node::Element(ul)]), "<ul>\n<li>a &lt; b</li>\n</ul>\n");
    }

    #[test]
    fn test_raw_passes_through() {
        let nodes = [Node::Raw("<kbd>Ctrl</kbd>".to_string())];
        assert_eq!(to_html(&nodes), "<kbd>Ctrl</kbd>");
        assert_eq!(nodes[0].text_content(), "");
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut el = Element::new("a").with_attr("href", "x");
        el.set_attr("href", "y");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.attr("href"), Some("y"));
        assert_eq!(el.class(), None);
    }

    #[test]
    fn test_find_all_descends() {
        let mut p = Element::new("p");
        p.children.push(Node::Element(Element::new("em")));
        let mut bq = Element::new("blockquote");
        bq.children.push(Node::Element(p));
        let nodes = [Node::Element(bq), Node::Element(Element::new("em"))];
        assert_eq!(find_all(&nodes, "em").len(), 2);
        assert_eq!(find_all(&nodes, "p").len(), 1);
    }
}
