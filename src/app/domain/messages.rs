use super::draft::Selection;
use super::settings::SyntaxTheme;
use super::snippet::Snippet;
use super::style_registry::ElementTag;
use super::view_mode::ViewMode;

/// Revision-stamped caret position to restore on the edit surface once the
/// text change that produced it has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretSync {
    pub revision: u64,
    pub selection: Selection,
}

/// All messages that can be sent through the FLTK channel.
/// Each widget callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    Export,
    Quit,
    WindowClose,

    // Edit
    TextEdited,
    Insert(Snippet),
    InsertLink,
    SyncCaret(CaretSync),
    CopyHtml,

    // View
    SetViewMode(ViewMode),
    ToggleLineNumbers,
    ToggleLinksInNewTab,
    SetCodeTheme(SyntaxTheme),

    // Config
    ClassChanged(ElementTag),
    ResetClass(ElementTag),
    TokenTagSelected,
    AddClassToken(ElementTag, String),
    RemoveClassToken(ElementTag, String),
    ResetAllClasses,
    ToggleRememberStyles,

    // Timers
    PollSave,
}
