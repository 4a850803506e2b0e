use std::time::Instant;

use fltk::{
    app::{self, Sender},
    dialog,
    enums::{Color, Font},
    group::Flex,
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    text::{StyleTableEntry, TextBuffer, TextDisplay, TextEditor},
    window::Window,
};

use super::controllers::editor::EditorController;
use super::domain::draft::Selection;
use super::domain::messages::{CaretSync, Message};
use super::domain::settings::SyntaxTheme;
use super::domain::snippet::Snippet;
use super::domain::style_registry::ElementTag;
use super::domain::view_mode::ViewMode;
use super::infrastructure::buffer::buffer_text_no_leak;
use super::infrastructure::storage::KeyValueStore;
use super::services::highlight::{Highlighted, HtmlHighlighter};
use crate::ui::config_panel::ConfigPanel;
use crate::ui::dialogs::link::show_link_dialog;
use crate::ui::file_dialogs::{filter_for, native_save_dialog};
use crate::ui::main_window::{MainWidgets, window_title};
use crate::ui::menu::{
    MENU_LINE_NUMBERS, MENU_NEW_TAB, MENU_REMEMBER_STYLES, select_mode_item, set_menu_checkbox,
};
use crate::ui::preview::wrap_html_for_helpview;
use crate::ui::toolbar::Toolbar;

const CODE_FONT: Font = Font::Courier;
const CODE_FONT_SIZE: i32 = 14;

/// Widgets plus the editor controller. Every message from the channel ends
/// up in one of these methods.
pub struct AppState<S: KeyValueStore> {
    pub editor: EditorController<S>,
    pub window: Window,
    pub menu: MenuBar,
    pub flex: Flex,
    pub toolbar: Toolbar,
    pub text_editor: TextEditor,
    pub buffer: TextBuffer,
    pub preview: HelpView,
    pub code_view: TextDisplay,
    pub code_buffer: TextBuffer,
    pub code_style_buffer: TextBuffer,
    pub config: ConfigPanel,
    pub sender: Sender<Message>,
    pub highlighter: HtmlHighlighter,
    save_timer_active: bool,
    shown_degraded: bool,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(widgets: MainWidgets, editor: EditorController<S>, sender: Sender<Message>) -> Self {
        let MainWidgets {
            wind,
            flex,
            menu,
            toolbar,
            text_editor,
            preview,
            code_view,
            config,
        } = widgets;

        let settings = editor.settings();
        let highlighter = HtmlHighlighter::new(settings.code_theme);

        let mut buffer = text_editor.buffer().unwrap_or_default();
        buffer.set_text(editor.text());

        // Registered after the initial fill so loading the draft is not an edit.
        let s = sender;
        buffer.add_modify_callback(move |_pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                s.send(Message::TextEdited);
            }
        });

        let code_buffer = code_view.buffer().unwrap_or_default();

        let mut state = Self {
            editor,
            window: wind,
            menu,
            flex,
            toolbar,
            text_editor,
            buffer,
            preview,
            code_view,
            code_buffer,
            code_style_buffer: TextBuffer::default(),
            config,
            sender,
            highlighter,
            save_timer_active: false,
            shown_degraded: false,
        };

        let caret = state.editor.caret();
        state.text_editor.set_insert_position(caret.end as i32);
        state.editor.attach_surface();
        state.config.load(state.editor.styles(), &settings);
        state.update_linenumber_width();
        state.show_view(state.editor.view_mode());
        state
    }

    // --- Edit surface ---

    /// Selection currently shown by the edit widget, in byte offsets.
    fn surface_selection(&self) -> Selection {
        match self.buffer.selection_position() {
            Some((start, end)) if self.buffer.selected() => {
                Selection::new(start.max(0) as usize, end.max(0) as usize)
            }
            _ => Selection::caret(self.text_editor.insert_position().max(0) as usize),
        }
    }

    pub fn text_edited(&mut self) {
        let raw = buffer_text_no_leak(&self.buffer);
        let caret = self.surface_selection();
        let before = self.editor.revision();
        self.editor.text_edited(raw, caret);
        if self.editor.revision() != before {
            self.schedule_save();
            self.refresh_visible_view();
        }
        self.update_title();
    }

    pub fn insert_snippet(&mut self, snippet: Snippet) {
        self.insert_with(|editor| editor.insert_snippet(snippet));
    }

    pub fn insert_link(&mut self) {
        if !self.editor.editing_enabled() {
            return;
        }
        let selection = self.surface_selection();
        let selected = self.editor.select(selection.start, selection.end);
        let initial = self.editor.text()[selected.start..selected.end].to_string();

        if let Some((text, url)) = show_link_dialog(&initial) {
            self.insert_with(|editor| editor.insert_link(&text, &url));
        }
    }

    /// Run an insertion against the controller, mirror it into the widget
    /// buffer and queue the caret restore behind the buffer update.
    fn insert_with<F>(&mut self, insert: F)
    where
        F: FnOnce(&mut EditorController<S>) -> Option<CaretSync>,
    {
        let selection = self.surface_selection();
        let replaced = self.editor.select(selection.start, selection.end);

        let Some(ticket) = insert(&mut self.editor) else {
            return;
        };

        let inserted = &self.editor.text()[replaced.start..ticket.selection.end];
        self.buffer.replace(replaced.start as i32, replaced.end as i32, inserted);
        self.sender.send(Message::SyncCaret(ticket));

        self.schedule_save();
        self.refresh_visible_view();
        self.update_title();
    }

    /// Second half of an insertion: put the caret after the inserted text,
    /// unless something else changed the draft in the meantime.
    pub fn sync_caret(&mut self, ticket: CaretSync) {
        if !self.editor.caret_sync_is_current(&ticket) {
            tracing::debug!("Dropping stale caret sync for revision {}", ticket.revision);
            return;
        }
        let Selection { start, end } = ticket.selection;
        self.buffer.unselect();
        if start != end {
            self.buffer.select(start as i32, end as i32);
        }
        self.text_editor.set_insert_position(end as i32);
        self.text_editor.show_insert_position();
        let _ = self.text_editor.take_focus();
    }

    // --- Views ---

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.editor.view_mode() == ViewMode::Edit {
            let selection = self.surface_selection();
            self.editor.select(selection.start, selection.end);
        }
        self.editor.set_view_mode(mode);
        self.show_view(mode);
    }

    fn show_view(&mut self, mode: ViewMode) {
        match mode {
            ViewMode::Edit => self.text_editor.show(),
            _ => self.text_editor.hide(),
        }
        match mode {
            ViewMode::Preview => self.preview.show(),
            _ => self.preview.hide(),
        }
        match mode {
            ViewMode::Code => self.code_view.show(),
            _ => self.code_view.hide(),
        }
        match mode {
            ViewMode::Config => self.config.widget.show(),
            _ => self.config.widget.hide(),
        }

        self.toolbar.set_mode(mode);
        select_mode_item(&self.menu, mode);
        self.refresh_visible_view();
        self.flex.layout();
        self.window.redraw();

        if mode == ViewMode::Edit {
            let _ = self.text_editor.take_focus();
        }
    }

    /// Only the view on screen is refreshed; the others catch up when shown.
    fn refresh_visible_view(&mut self) {
        match self.editor.view_mode() {
            ViewMode::Preview => self.update_preview(),
            ViewMode::Code => self.update_code_view(),
            ViewMode::Edit | ViewMode::Config => {}
        }
    }

    fn update_preview(&mut self) {
        let html = wrap_html_for_helpview(self.editor.html());
        self.preview.set_value(&html);
    }

    fn update_code_view(&mut self) {
        let html = self.editor.html().to_string();
        let Highlighted { style_string, palette } = self.highlighter.highlight(&html);
        self.code_buffer.set_text(&html);
        self.code_style_buffer.set_text(&style_string);

        let table: Vec<StyleTableEntry> = palette
            .iter()
            .map(|entry| StyleTableEntry {
                color: match entry {
                    Some((r, g, b)) => Color::from_rgb(*r, *g, *b),
                    None => Color::Foreground,
                },
                font: CODE_FONT,
                size: CODE_FONT_SIZE,
            })
            .collect();
        self.code_view.set_highlight_data(self.code_style_buffer.clone(), table);
        self.update_linenumber_width();
        self.code_view.redraw();
    }

    pub fn update_linenumber_width(&mut self) {
        if !self.editor.settings().behavior.show_line_numbers {
            self.code_view.set_linenumber_width(0);
            return;
        }
        let line_count = self.code_buffer.count_lines(0, self.code_buffer.length());
        let digits = ((line_count + 1) as f64).log10().floor() as i32 + 1;
        let width = (digits * 8 + 16).max(40);
        self.code_view.set_linenumber_width(width);
    }

    pub fn toggle_line_numbers(&mut self) {
        let show = !self.editor.settings().behavior.show_line_numbers;
        self.editor.set_show_line_numbers(show);
        self.update_linenumber_width();
        self.code_view.redraw();
        self.sync_toggles();
    }

    pub fn toggle_links_in_new_tab(&mut self) {
        let enabled = !self.editor.settings().behavior.open_links_in_new_tab;
        self.editor.set_open_links_in_new_tab(enabled);
        self.refresh_visible_view();
        self.sync_toggles();
    }

    pub fn set_code_theme(&mut self, theme: SyntaxTheme) {
        self.editor.set_code_theme(theme);
        self.highlighter.set_theme(theme);
        self.refresh_visible_view();
    }

    /// Keep menu check marks and config check buttons in agreement.
    fn sync_toggles(&mut self) {
        let settings = self.editor.settings();
        set_menu_checkbox(&self.menu, MENU_LINE_NUMBERS, settings.behavior.show_line_numbers);
        set_menu_checkbox(&self.menu, MENU_NEW_TAB, settings.behavior.open_links_in_new_tab);
        set_menu_checkbox(&self.menu, MENU_REMEMBER_STYLES, settings.remember_styles);
        self.config.load(self.editor.styles(), &settings);
    }

    // --- Styles ---

    pub fn class_changed(&mut self, tag: ElementTag) {
        if let Some(value) = self.config.class_value(tag) {
            self.editor.set_class(tag, value);
            self.config.mark_customized(tag, self.editor.styles());
            self.config.show_tokens(self.editor.styles());
        }
    }

    pub fn show_tokens(&mut self) {
        self.config.show_tokens(self.editor.styles());
    }

    pub fn add_class_token(&mut self, tag: ElementTag, token: &str) {
        if self.editor.add_class_token(tag, token) {
            self.config.clear_token_input();
            self.class_styles_changed(tag);
        }
    }

    pub fn remove_class_token(&mut self, tag: ElementTag, token: &str) {
        if self.editor.remove_class_token(tag, token) {
            self.class_styles_changed(tag);
        }
    }

    fn class_styles_changed(&mut self, tag: ElementTag) {
        self.config.show_class(tag, self.editor.styles());
        self.config.show_tokens(self.editor.styles());
        self.refresh_visible_view();
    }

    pub fn reset_class(&mut self, tag: ElementTag) {
        self.editor.reset_class(tag);
        self.class_styles_changed(tag);
    }

    pub fn reset_all_classes(&mut self) {
        self.editor.reset_all_classes();
        self.sync_toggles();
        self.refresh_visible_view();
    }

    pub fn toggle_remember_styles(&mut self) {
        let remember = !self.editor.settings().remember_styles;
        self.editor.set_remember_styles(remember);
        self.sync_toggles();
    }

    // --- Output ---

    pub fn export(&mut self) {
        let file = self.editor.export();
        let Some(path) = native_save_dialog("Export", filter_for(file.filename), file.filename) else {
            return;
        };
        if let Err(e) = file.write_to(&path) {
            tracing::warn!("Export to {} failed: {}", path.display(), e);
            dialog::alert_default(&format!("Error exporting file: {}", e));
        }
    }

    pub fn copy_html(&mut self) {
        let html = self.editor.copy_html();
        app::copy(&html);
    }

    // --- Saving ---

    /// Arm the debounce timer. Saves without a delay happen in the controller.
    fn schedule_save(&mut self) {
        if self.save_timer_active || !self.editor.save_pending() {
            return;
        }
        self.save_timer_active = true;
        let s = self.sender;
        let delay = self.editor.save_debounce().as_secs_f64();
        app::add_timeout3(delay, move |_| s.send(Message::PollSave));
    }

    pub fn poll_save(&mut self) {
        self.save_timer_active = false;
        self.editor.poll_save(Instant::now());
        // Edits since the timer was armed push the save out again.
        self.schedule_save();
        self.update_title();
    }

    fn update_title(&mut self) {
        let degraded = self.editor.storage_degraded();
        if degraded != self.shown_degraded {
            self.shown_degraded = degraded;
            self.window.set_label(&window_title(degraded));
        }
    }

    /// Flush the draft and write settings. Returns `true` when the app may exit.
    pub fn quit(&mut self) -> bool {
        self.editor.detach_surface();
        self.editor.flush();
        if let Err(e) = self.editor.settings().save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
        true
    }
}
