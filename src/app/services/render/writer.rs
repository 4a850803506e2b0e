//! Turns pulldown-cmark events into a styled element tree.

use pulldown_cmark::{Alignment, CodeBlockKind, Event, LinkType, Tag};

use super::RenderOptions;
use super::tree::{Element, Node};
use crate::app::domain::style_registry::{ElementTag, StyleRegistry};

const NEW_TAB_TARGET: &str = "_blank";
const NEW_TAB_REL: &str = "noopener noreferrer";

struct TableState {
    alignments: Vec<Alignment>,
    /// Index into `StyledWriter::opened` of the frame that opened the table.
    frame: usize,
    in_head: bool,
    body_open: bool,
    cell_index: usize,
}

pub(super) struct StyledWriter<'s> {
    styles: &'s StyleRegistry,
    options: RenderOptions,
    roots: Vec<Node>,
    /// Currently open elements, innermost last.
    stack: Vec<Element>,
    /// Number of elements each open Markdown tag pushed onto `stack`.
    opened: Vec<usize>,
    tables: Vec<TableState>,
}

impl<'s> StyledWriter<'s> {
    pub(super) fn new(styles: &'s StyleRegistry, options: RenderOptions) -> Self {
        Self {
            styles,
            options,
            roots: Vec::new(),
            stack: Vec::new(),
            opened: Vec::new(),
            tables: Vec::new(),
        }
    }

    pub(super) fn run<'a, I>(mut self, events: I) -> Vec<Node>
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            match event {
                Event::Start(tag) => self.start_tag(tag),
                Event::End(_) => self.end_tag(),
                Event::Text(text) => self.push_node(Node::Text(text.into_string())),
                Event::Code(code) => {
                    let mut el = Element::new("code");
                    el.children.push(Node::Text(code.into_string()));
                    self.push_node(Node::Element(el));
                }
                Event::Html(raw) | Event::InlineHtml(raw) => {
                    self.push_node(Node::Raw(raw.into_string()))
                }
                Event::SoftBreak => self.push_node(Node::Text("\n".to_string())),
                Event::HardBreak => self.push_node(Node::Element(Element::new("br"))),
                Event::Rule => self.push_node(Node::Element(Element::new("hr"))),
                Event::TaskListMarker(checked) => {
                    let mut input = Element::new("input")
                        .with_attr("disabled", "")
                        .with_attr("type", "checkbox");
                    if checked {
                        input.set_attr("checked", "");
                    }
                    self.push_node(Node::Element(input));
                }
                _ => {}
            }
        }

        // Events are balanced, but never lose content if they are not.
        while !self.stack.is_empty() {
            self.close_element();
        }
        self.roots
    }

    fn styled(&self, name: &'static str, tag: ElementTag) -> Element {
        let mut el = Element::new(name);
        self.apply_class(&mut el, tag);
        el
    }

    /// Blank class strings produce no attribute at all.
    fn apply_class(&self, el: &mut Element, tag: ElementTag) {
        let classes = self.styles.get(tag);
        if !classes.trim().is_empty() {
            el.set_attr("class", classes);
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let pushed = match tag {
            Tag::Paragraph => self.open(self.styled("p", ElementTag::P)),
            Tag::Heading { level, .. } => {
                let level = level as u8;
                match ElementTag::heading(level) {
                    Some(tag) => self.open(self.styled(tag.as_str(), tag)),
                    None => 0,
                }
            }
            Tag::BlockQuote(_) => self.open(Element::new("blockquote")),
            Tag::CodeBlock(kind) => {
                let mut code = Element::new("code");
                if let CodeBlockKind::Fenced(info) = kind {
                    if let Some(lang) = info.split_whitespace().next() {
                        code.set_attr("class", format!("language-{}", lang));
                    }
                }
                self.open(Element::new("pre")) + self.open(code)
            }
            Tag::List(Some(start)) => {
                let mut ol = self.styled("ol", ElementTag::Ol);
                if start != 1 {
                    ol.set_attr("start", start.to_string());
                }
                self.open(ol)
            }
            Tag::List(None) => self.open(self.styled("ul", ElementTag::Ul)),
            Tag::Item => self.open(self.styled("li", ElementTag::Li)),
            Tag::Table(alignments) => {
                let frame = self.opened.len();
                self.tables.push(TableState {
                    alignments,
                    frame,
                    in_head: false,
                    body_open: false,
                    cell_index: 0,
                });
                self.open(self.styled("table", ElementTag::Table))
            }
            Tag::TableHead => {
                if let Some(table) = self.tables.last_mut() {
                    table.in_head = true;
                    table.cell_index = 0;
                }
                self.open(Element::new("thead")) + self.open(self.styled("tr", ElementTag::Tr))
            }
            Tag::TableRow => {
                self.open_table_body();
                if let Some(table) = self.tables.last_mut() {
                    table.cell_index = 0;
                }
                self.open(self.styled("tr", ElementTag::Tr))
            }
            Tag::TableCell => self.open_cell(),
            Tag::Emphasis => self.open(self.styled("em", ElementTag::Em)),
            Tag::Strong => self.open(self.styled("strong", ElementTag::Strong)),
            Tag::Strikethrough => self.open(Element::new("del")),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let href = match link_type {
                    LinkType::Email => format!("mailto:{}", dest_url),
                    _ => dest_url.into_string(),
                };
                let mut a = Element::new("a").with_attr("href", href);
                if !title.is_empty() {
                    a.set_attr("title", title.into_string());
                }
                self.apply_class(&mut a, ElementTag::A);
                if self.options.open_links_in_new_tab {
                    a.set_attr("target", NEW_TAB_TARGET);
                    a.set_attr("rel", NEW_TAB_REL);
                }
                self.open(a)
            }
            Tag::Image { dest_url, title, .. } => {
                let mut img = Element::new("img")
                    .with_attr("src", dest_url.into_string())
                    .with_attr("alt", "");
                if !title.is_empty() {
                    img.set_attr("title", title.into_string());
                }
                self.apply_class(&mut img, ElementTag::Img);
                self.open(img)
            }
            // Html blocks, footnote definitions, metadata: children are spliced
            // into the parent.
            _ => 0,
        };
        self.opened.push(pushed);
    }

    fn end_tag(&mut self) {
        let count = self.opened.pop().unwrap_or(0);
        for _ in 0..count {
            self.close_element();
        }

        // Closing the table frame drops its state; closing the head leaves it.
        let frame = self.opened.len();
        if let Some(table) = self.tables.last_mut() {
            if table.frame == frame {
                self.tables.pop();
            } else if table.in_head && table.frame + 1 == frame {
                table.in_head = false;
            }
        }
    }

    fn open_table_body(&mut self) {
        let Some(table) = self.tables.last_mut() else {
            return;
        };
        if table.body_open {
            return;
        }
        table.body_open = true;
        let frame = table.frame;
        self.stack.push(Element::new("tbody"));
        // The body closes with the table.
        if let Some(count) = self.opened.get_mut(frame) {
            *count += 1;
        }
    }

    fn open_cell(&mut self) -> usize {
        let (in_head, alignment) = match self.tables.last_mut() {
            Some(table) => {
                let alignment = table.alignments.get(table.cell_index).copied();
                table.cell_index += 1;
                (table.in_head, alignment)
            }
            None => (false, None),
        };

        let mut cell = if in_head {
            self.styled("th", ElementTag::Th)
        } else {
            self.styled("td", ElementTag::Td)
        };
        let align = match alignment {
            Some(Alignment::Left) => Some("left"),
            Some(Alignment::Center) => Some("center"),
            Some(Alignment::Right) => Some("right"),
            Some(Alignment::None) | None => None,
        };
        if let Some(align) = align {
            cell.set_attr("style", format!("text-align: {}", align));
        }
        self.open(cell)
    }

    fn open(&mut self, el: Element) -> usize {
        self.stack.push(el);
        1
    }

    fn close_element(&mut self) {
        let Some(mut el) = self.stack.pop() else {
            return;
        };
        if el.name == "img" {
            let alt = el.text_content();
            el.children.clear();
            el.set_attr("alt", alt);
        }
        self.push_node(Node::Element(el));
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }
}
