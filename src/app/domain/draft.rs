//! Markdown source text plus caret/selection state.
//!
//! Offsets are UTF-8 byte offsets, the same unit FLTK's `TextBuffer` uses.
//! Every offset stored here sits on a char boundary and satisfies
//! `start <= end <= text.len()`.

use serde::{Deserialize, Serialize};

/// A caret (`start == end`) or a selected range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    text: String,
    selection: Selection,
    revision: u64,
}

impl Draft {
    /// New draft with the caret at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let selection = Selection::caret(text.len());
        Self {
            text,
            selection,
            revision: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> Selection {
        self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the selected range with `snippet` and collapse the caret after it.
    ///
    /// Returns the new caret. A collapsed caret with an empty snippet leaves the
    /// draft untouched.
    pub fn insert_at_selection(&mut self, snippet: &str) -> Selection {
        let Selection { start, end } = self.selection;
        if snippet.is_empty() && start == end {
            return self.selection;
        }

        self.text.replace_range(start..end, snippet);
        self.selection = Selection::caret(start + snippet.len());
        self.revision += 1;
        self.selection
    }

    /// Replace the whole text, as reported by the input surface after free typing.
    pub fn set_text(&mut self, raw: impl Into<String>, caret: Selection) {
        self.text = raw.into();
        self.selection = self.clamp(caret);
        self.revision += 1;
    }

    /// Move the caret without touching the text.
    pub fn set_selection(&mut self, selection: Selection) -> Selection {
        self.selection = self.clamp(selection);
        self.selection
    }

    fn clamp(&self, selection: Selection) -> Selection {
        let selection = Selection::new(selection.start, selection.end);
        Selection {
            start: floor_char_boundary(&self.text, selection.start),
            end: floor_char_boundary(&self.text, selection.end),
        }
    }
}

fn floor_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
