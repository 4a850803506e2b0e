use std::collections::HashMap;

use syntect::highlighting::Color as SyntectColor;

/// Style characters run `'A'..='Z'`.
pub const MAX_STYLES: usize = 26;

/// Plain foreground text, also the fallback once the table is full.
pub const DEFAULT_STYLE: char = 'A';

/// Maps syntect foreground colors to style characters ('A', 'B', 'C', ...).
/// Entries are added as new colors are encountered.
#[derive(Debug, Clone)]
pub struct StyleMap {
    color_to_char: HashMap<(u8, u8, u8), char>,
    /// `None` is the widget's own foreground color.
    palette: Vec<Option<(u8, u8, u8)>>,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleMap {
    pub fn new() -> Self {
        Self {
            color_to_char: HashMap::new(),
            palette: vec![None],
        }
    }

    /// Style character for a color, inserting a new entry if there is room.
    pub fn get_or_insert(&mut self, color: SyntectColor) -> char {
        let key = (color.r, color.g, color.b);
        if let Some(&ch) = self.color_to_char.get(&key) {
            return ch;
        }

        let idx = self.palette.len();
        if idx >= MAX_STYLES {
            return DEFAULT_STYLE;
        }
        let ch = (b'A' + idx as u8) as char;
        self.palette.push(Some(key));
        self.color_to_char.insert(key, ch);
        ch
    }

    /// One entry per style character, in order starting at `'A'`.
    pub fn palette(&self) -> &[Option<(u8, u8, u8)>] {
        &self.palette
    }

    pub fn len(&self) -> usize {
        self.palette.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    /// Forget every color (used on theme change).
    pub fn clear(&mut self) {
        self.color_to_char.clear();
        self.palette.truncate(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: u8, g: u8, b: u8) -> SyntectColor {
        SyntectColor { r, g, b, a: 0xff }
    }

    #[test]
    fn test_same_color_same_char() {
        let mut map = StyleMap::new();
        let red = map.get_or_insert(rgb(200, 0, 0));
        let blue = map.get_or_insert(rgb(0, 0, 200));
        assert_eq!(red, 'B');
        assert_eq!(blue, 'C');
        assert_eq!(map.get_or_insert(rgb(200, 0, 0)), 'B');
        assert_eq!(map.palette(), &[None, Some((200, 0, 0)), Some((0, 0, 200))]);
    }

    #[test]
    fn test_full_table_falls_back_to_default() {
        let mut map = StyleMap::new();
        for i in 0..40u8 {
            map.get_or_insert(rgb(i, i, i));
        }
        assert_eq!(map.len(), MAX_STYLES);
        assert_eq!(map.get_or_insert(rgb(250, 1, 2)), DEFAULT_STYLE);
    }

    #[test]
    fn test_clear_keeps_default() {
        let mut map = StyleMap::new();
        map.get_or_insert(rgb(1, 2, 3));
        map.clear();
        assert_eq!(map.palette(), &[None]);
        assert_eq!(map.get_or_insert(rgb(4, 5, 6)), 'B');
    }
}
