use std::time::{Duration, Instant};

use crate::app::domain::draft::{Draft, Selection};
use crate::app::domain::messages::CaretSync;
use crate::app::domain::sample::SAMPLE_MARKDOWN;
use crate::app::domain::settings::{AppSettings, SyntaxTheme};
use crate::app::domain::snippet::Snippet;
use crate::app::domain::style_registry::{ElementTag, StyleRegistry};
use crate::app::domain::view_mode::{ViewMode, ViewModeController};
use crate::app::infrastructure::storage::KeyValueStore;
use crate::app::services::export::{ExportFile, export_current};
use crate::app::services::persistence::DraftPersistence;
use crate::app::services::render::{RenderOptions, Rendered, render};
use crate::app::services::snippets::link_snippet;

/// One editing session: draft, styles, view mode and saved state.
///
/// Every mutation of the draft is followed by a save and invalidates the
/// cached render. Toolbar insertions return a [`CaretSync`] ticket that the
/// front end applies on the next dispatch turn.
pub struct EditorController<S: KeyValueStore> {
    draft: Draft,
    styles: StyleRegistry,
    settings: AppSettings,
    view: ViewModeController,
    persistence: DraftPersistence<S>,
    surface_attached: bool,
    rendered: Option<Rendered>,
}

impl<S: KeyValueStore> EditorController<S> {
    /// Restore the saved draft, or start from the welcome document.
    pub fn open(store: S, settings: AppSettings) -> Self {
        let debounce = Duration::from_millis(settings.save_debounce_ms);
        let persistence = DraftPersistence::with_debounce(store, debounce);
        let text = match persistence.load() {
            Some(text) => text,
            None => {
                tracing::debug!("No saved draft, starting from the sample document");
                SAMPLE_MARKDOWN.to_string()
            }
        };

        Self {
            draft: Draft::new(text),
            styles: settings.initial_styles(),
            settings,
            view: ViewModeController::new(),
            persistence,
            surface_attached: false,
            rendered: None,
        }
    }

    // --- Edit surface ---

    pub fn attach_surface(&mut self) {
        self.surface_attached = true;
    }

    /// Stop accepting insertions; tickets still queued become stale.
    pub fn detach_surface(&mut self) {
        self.surface_attached = false;
    }

    pub fn text(&self) -> &str {
        self.draft.text()
    }

    pub fn caret(&self) -> Selection {
        self.draft.caret()
    }

    pub fn revision(&self) -> u64 {
        self.draft.revision()
    }

    pub fn insert_snippet(&mut self, snippet: Snippet) -> Option<CaretSync> {
        self.insert_text(snippet.text())
    }

    pub fn insert_link(&mut self, text: &str, url: &str) -> Option<CaretSync> {
        self.insert_text(&link_snippet(text, url))
    }

    /// Replace the selection with `text`. Ignored outside the edit view or
    /// while no edit surface is attached.
    pub fn insert_text(&mut self, text: &str) -> Option<CaretSync> {
        if !self.view.editing_enabled() || !self.surface_attached {
            tracing::debug!(
                "Insertion ignored (mode {}, surface attached: {})",
                self.view.mode(),
                self.surface_attached
            );
            return None;
        }

        let before = self.draft.revision();
        let selection = self.draft.insert_at_selection(text);
        if self.draft.revision() != before {
            self.draft_changed();
        }
        Some(CaretSync {
            revision: self.draft.revision(),
            selection,
        })
    }

    /// Free typing: the surface reports its whole text and caret.
    pub fn text_edited(&mut self, raw: impl Into<String>, caret: Selection) {
        let raw = raw.into();
        if raw == self.draft.text() {
            self.draft.set_selection(caret);
            return;
        }
        self.draft.set_text(raw, caret);
        self.draft_changed();
    }

    pub fn select(&mut self, start: usize, end: usize) -> Selection {
        self.draft.set_selection(Selection::new(start, end))
    }

    /// A ticket is stale once anything else has changed the text.
    pub fn caret_sync_is_current(&self, ticket: &CaretSync) -> bool {
        self.surface_attached && ticket.revision == self.draft.revision()
    }

    fn draft_changed(&mut self) {
        self.persistence.record(self.draft.text(), Instant::now());
        self.rendered = None;
    }

    // --- Views ---

    pub fn view_mode(&self) -> ViewMode {
        self.view.mode()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> ViewMode {
        self.view.select(mode)
    }

    pub fn editing_enabled(&self) -> bool {
        self.view.editing_enabled()
    }

    // --- Styles ---

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn set_class(&mut self, tag: ElementTag, classes: impl Into<String>) {
        self.styles.set(tag, classes);
        self.rendered = None;
    }

    pub fn add_class_token(&mut self, tag: ElementTag, token: &str) -> bool {
        let added = self.styles.add_token(tag, token);
        if added {
            self.rendered = None;
        }
        added
    }

    pub fn remove_class_token(&mut self, tag: ElementTag, token: &str) -> bool {
        let removed = self.styles.remove_token(tag, token);
        if removed {
            self.rendered = None;
        }
        removed
    }

    pub fn reset_class(&mut self, tag: ElementTag) {
        self.styles.reset(tag);
        self.rendered = None;
    }

    pub fn reset_all_classes(&mut self) {
        self.styles.reset_all();
        self.rendered = None;
    }

    // --- Behavior ---

    pub fn set_open_links_in_new_tab(&mut self, enabled: bool) {
        if self.settings.behavior.open_links_in_new_tab != enabled {
            self.settings.behavior.open_links_in_new_tab = enabled;
            self.rendered = None;
        }
    }

    /// Display only: the generated HTML does not change.
    pub fn set_show_line_numbers(&mut self, enabled: bool) {
        self.settings.behavior.show_line_numbers = enabled;
    }

    pub fn set_remember_styles(&mut self, enabled: bool) {
        self.settings.remember_styles = enabled;
    }

    pub fn set_code_theme(&mut self, theme: SyntaxTheme) {
        self.settings.code_theme = theme;
    }

    /// Current settings, with the session's styles captured when remembering
    /// is on.
    pub fn settings(&self) -> AppSettings {
        let mut settings = self.settings.clone();
        settings.capture_styles(&self.styles);
        settings
    }

    // --- Output ---

    /// Rendered draft, recomputed only after the text, styles or link
    /// behavior changed.
    pub fn rendered(&mut self) -> &Rendered {
        let options = RenderOptions::from(&self.settings.behavior);
        let draft = &self.draft;
        let styles = &self.styles;
        self.rendered
            .get_or_insert_with(|| render(draft.text(), &styles.snapshot(), options))
    }

    pub fn html(&mut self) -> &str {
        self.rendered().html()
    }

    pub fn export(&mut self) -> ExportFile {
        let mode = self.view.mode();
        let html = self.rendered().html().to_string();
        export_current(mode, self.draft.text(), &html)
    }

    /// The generated HTML, also written to the log.
    pub fn copy_html(&mut self) -> String {
        let html = self.rendered().html().to_string();
        tracing::info!("Copied HTML ({} bytes):\n{}", html.len(), html);
        html
    }

    // --- Saving ---

    /// Run a debounced save that has come due. Returns whether it saved.
    pub fn poll_save(&mut self, now: Instant) -> bool {
        self.persistence.poll(now)
    }

    pub fn flush(&mut self) {
        self.persistence.flush();
    }

    pub fn save_pending(&self) -> bool {
        self.persistence.has_pending()
    }

    pub fn save_debounce(&self) -> Duration {
        self.persistence.debounce()
    }

    pub fn storage_degraded(&self) -> bool {
        self.persistence.is_degraded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::error::{AppError, Result};
    use crate::app::infrastructure::storage::MemoryStore;
    use crate::app::services::persistence::DRAFT_KEY;

    /// Reads nothing back and refuses every write.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(AppError::Storage("read-only".to_string()))
        }
    }

    fn store_with(text: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(DRAFT_KEY, text).unwrap();
        store
    }

    fn editor_with(text: &str) -> EditorController<MemoryStore> {
        let mut editor = EditorController::open(store_with(text), AppSettings::default());
        editor.attach_surface();
        editor
    }

    fn saved(editor: &EditorController<MemoryStore>) -> Option<String> {
        editor.persistence.load()
    }

    #[test]
    fn test_open_without_saved_draft_uses_sample() {
        let editor = EditorController::open(MemoryStore::new(), AppSettings::default());
        assert_eq!(editor.text(), SAMPLE_MARKDOWN);
        assert_eq!(editor.view_mode(), ViewMode::Edit);
        assert!(!editor.surface_attached);
    }

    #[test]
    fn test_open_restores_saved_draft() {
        let editor = editor_with("");
        assert_eq!(editor.text(), "");
        assert_eq!(editor.caret(), Selection::caret(0));
    }

    #[test]
    fn test_heading_insert_into_empty_document() {
        let mut editor = editor_with("");
        let ticket = editor.insert_snippet(Snippet::Heading1).unwrap();

        assert_eq!(editor.text(), "\n# ");
        assert_eq!(editor.caret(), Selection::caret(3));
        assert_eq!(ticket.selection, Selection::caret(3));
        assert!(editor.caret_sync_is_current(&ticket));
        assert_eq!(saved(&editor).as_deref(), Some("\n# "));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut editor = editor_with("Hello world");
        editor.select(6, 11);
        let ticket = editor.insert_snippet(Snippet::Image).unwrap();
        assert_eq!(editor.text(), "Hello ![Alt Text](image.png)");
        assert_eq!(ticket.selection, Selection::caret(editor.text().len()));
    }

    #[test]
    fn test_repeated_inserts_follow_the_caret() {
        let mut editor = editor_with("");
        editor.insert_snippet(Snippet::Heading2);
        editor.insert_text("Title");
        editor.insert_snippet(Snippet::Table);
        assert_eq!(editor.text(), "\n## Title\n|   |   |   |\n|---|---|---|");
        assert_eq!(editor.caret(), Selection::caret(editor.text().len()));
    }

    #[test]
    fn test_insert_ignored_outside_edit_mode() {
        let mut editor = editor_with("abc");
        for mode in [ViewMode::Preview, ViewMode::Code, ViewMode::Config] {
            editor.set_view_mode(mode);
            assert!(editor.insert_snippet(Snippet::Link).is_none());
            assert_eq!(editor.text(), "abc");
        }
        editor.set_view_mode(ViewMode::Edit);
        assert!(editor.insert_snippet(Snippet::Link).is_some());
    }

    #[test]
    fn test_insert_ignored_without_surface() {
        let mut editor = editor_with("abc");
        editor.detach_surface();
        assert!(editor.insert_snippet(Snippet::Heading1).is_none());
        assert_eq!(editor.text(), "abc");
    }

    #[test]
    fn test_stale_caret_ticket() {
        let mut editor = editor_with("");
        let first = editor.insert_snippet(Snippet::Heading1).unwrap();
        let second = editor.insert_snippet(Snippet::Heading3).unwrap();
        assert!(!editor.caret_sync_is_current(&first));
        assert!(editor.caret_sync_is_current(&second));

        editor.text_edited("typed", Selection::caret(5));
        assert!(!editor.caret_sync_is_current(&second));
    }

    #[test]
    fn test_text_edited_saves_and_rerenders() {
        let mut editor = editor_with("# Old");
        assert!(editor.html().contains(">Old</h1>"));

        editor.text_edited("# New", Selection::caret(5));
        assert_eq!(saved(&editor).as_deref(), Some("# New"));
        assert!(editor.html().contains(">New</h1>"));
    }

    #[test]
    fn test_text_edited_with_same_text_only_moves_caret() {
        let mut editor = editor_with("abc");
        let revision = editor.revision();
        editor.text_edited("abc", Selection::caret(1));
        assert_eq!(editor.revision(), revision);
        assert_eq!(editor.caret(), Selection::caret(1));
    }

    #[test]
    fn test_class_change_rerenders() {
        let mut editor = editor_with("# Title");
        assert!(editor.html().contains("text-3xl font-bold mb-4 text-gray-800"));

        editor.set_class(ElementTag::H1, "text-5xl");
        assert_eq!(editor.html(), "<h1 class=\"text-5xl\">Title</h1>\n");

        editor.set_class(ElementTag::H1, "a b");
        assert!(editor.add_class_token(ElementTag::H1, "c"));
        assert!(!editor.add_class_token(ElementTag::H1, "c"));
        assert!(editor.remove_class_token(ElementTag::H1, "a"));
        assert_eq!(editor.html(), "<h1 class=\"b c\">Title</h1>\n");

        editor.set_class(ElementTag::H1, "");
        assert_eq!(editor.html(), "<h1>Title</h1>\n");

        editor.reset_class(ElementTag::H1);
        assert!(editor.html().contains("text-3xl"));
    }

    #[test]
    fn test_token_editing() {
        let mut editor = editor_with("# Title");
        editor.set_class(ElementTag::H1, "text-xl");

        assert!(editor.add_class_token(ElementTag::H1, " font-bold "));
        assert!(editor.add_class_token(ElementTag::H1, "mb-2"));
        assert!(!editor.add_class_token(ElementTag::H1, "text-xl"));
        assert!(!editor.add_class_token(ElementTag::H1, "   "));
        assert_eq!(editor.styles().get(ElementTag::H1), "text-xl font-bold mb-2");
        assert_eq!(editor.html(), "<h1 class=\"text-xl font-bold mb-2\">Title</h1>\n");

        assert!(editor.remove_class_token(ElementTag::H1, "font-bold"));
        assert!(!editor.remove_class_token(ElementTag::H1, "font-bold"));
        assert_eq!(editor.html(), "<h1 class=\"text-xl mb-2\">Title</h1>\n");

        assert!(editor.remove_class_token(ElementTag::H1, "text-xl"));
        assert!(editor.remove_class_token(ElementTag::H1, "mb-2"));
        assert_eq!(editor.html(), "<h1>Title</h1>\n");
    }

    #[test]
    fn test_failing_storage_keeps_editing() {
        let mut editor = EditorController::open(ReadOnlyStore, AppSettings::default());
        editor.attach_surface();
        assert!(!editor.storage_degraded());

        editor.text_edited("# Kept", Selection::caret(6));
        assert!(editor.storage_degraded());
        assert_eq!(editor.text(), "# Kept");
        assert!(editor.insert_text("!").is_some());
        assert_eq!(editor.html(), "<h1 class=\"text-3xl font-bold mb-4 text-gray-800\">Kept!</h1>\n");
    }

    #[test]
    fn test_detached_surface_makes_tickets_stale() {
        let mut editor = editor_with("");
        let ticket = editor.insert_snippet(Snippet::Heading1).unwrap();
        editor.detach_surface();
        assert!(!editor.caret_sync_is_current(&ticket));
    }

    #[test]
    fn test_reset_all_classes() {
        let mut editor = editor_with("text");
        editor.set_class(ElementTag::P, "x");
        editor.set_class(ElementTag::Em, "y");
        editor.reset_all_classes();
        assert_eq!(editor.styles(), &StyleRegistry::default());
        assert_eq!(editor.html(), "<p class=\"mb-4\">text</p>\n");
    }

    #[test]
    fn test_new_tab_toggle_rerenders() {
        let mut editor = editor_with("[x](http://e.com)");
        assert!(editor.html().contains("target=\"_blank\" rel=\"noopener noreferrer\""));

        editor.set_open_links_in_new_tab(false);
        assert!(!editor.html().contains("target="));
        assert!(!editor.settings().behavior.open_links_in_new_tab);
    }

    #[test]
    fn test_export_follows_view_mode() {
        let mut editor = editor_with("# Hi");
        let file = editor.export();
        assert_eq!(file.filename, "markdown.md");
        assert_eq!(file.content, "# Hi");

        editor.set_view_mode(ViewMode::Preview);
        let file = editor.export();
        assert_eq!(file.filename, "generated.html");
        assert_eq!(file.content, editor.html());
        assert_eq!(file.mime_type, "text/plain");
    }

    #[test]
    fn test_copy_html_matches_render() {
        let mut editor = editor_with("*hi*");
        let copied = editor.copy_html();
        assert_eq!(copied, "<p class=\"mb-4\"><em class=\"italic\">hi</em></p>\n");
    }

    #[test]
    fn test_debounced_saving() {
        let settings = AppSettings {
            save_debounce_ms: 60_000,
            ..AppSettings::default()
        };
        let mut editor = EditorController::open(store_with("start"), settings);
        editor.attach_surface();
        editor.insert_text("!");
        assert!(editor.save_pending());
        assert_eq!(saved(&editor).as_deref(), Some("start"));
        assert!(!editor.poll_save(Instant::now()));

        editor.flush();
        assert!(!editor.save_pending());
        assert_eq!(saved(&editor).as_deref(), Some("start!"));
    }

    #[test]
    fn test_settings_capture_styles_only_when_remembered() {
        let mut editor = editor_with("");
        editor.set_class(ElementTag::Li, "custom");
        assert!(editor.settings().styles.is_none());

        editor.set_remember_styles(true);
        let settings = editor.settings();
        assert_eq!(settings.styles.as_ref().map(|s| s.get(ElementTag::Li)), Some("custom"));

        let reopened = EditorController::open(MemoryStore::new(), settings);
        assert_eq!(reopened.styles().get(ElementTag::Li), "custom");
    }
}
