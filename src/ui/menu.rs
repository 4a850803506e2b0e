use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::domain::settings::AppSettings;
use crate::app::domain::snippet::Snippet;
use crate::app::domain::view_mode::ViewMode;

pub const MENU_LINE_NUMBERS: &str = "View/Show Line Numbers";
pub const MENU_NEW_TAB: &str = "View/Open Links in New Tab";
pub const MENU_REMEMBER_STYLES: &str = "Styles/Remember Styles";

fn toggle_flag(on: bool) -> MenuFlag {
    if on { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle }
}

fn mode_path(mode: ViewMode) -> String {
    format!("View/{}", mode.display_name())
}

fn snippet_path(snippet: Snippet) -> String {
    match snippet {
        Snippet::Heading1 => "Insert/Heading 1".to_string(),
        Snippet::Heading2 => "Insert/Heading 2".to_string(),
        Snippet::Heading3 => "Insert/Heading 3".to_string(),
        Snippet::Image => "Insert/Image".to_string(),
        Snippet::Link => "Insert/Link Template".to_string(),
        Snippet::Table => "Insert/Table".to_string(),
    }
}

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, settings: &AppSettings) {
    let s = sender;

    // File
    menu.add("File/Export...", Shortcut::Ctrl | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Export) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Quit) });

    // Edit
    menu.add("Edit/Copy HTML", Shortcut::Ctrl | Shortcut::Shift | 'c', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::CopyHtml) });

    // Insert
    for (i, snippet) in Snippet::all().iter().copied().enumerate() {
        let shortcut = match snippet {
            Snippet::Heading1 | Snippet::Heading2 | Snippet::Heading3 => Shortcut::Ctrl | char::from(b'1' + i as u8),
            _ => Shortcut::None,
        };
        menu.add(&snippet_path(snippet), shortcut, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Insert(snippet)) });
    }
    menu.add("Insert/Link...", Shortcut::Ctrl | 'k', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::InsertLink) });

    // View
    for (i, mode) in ViewMode::all().iter().copied().enumerate() {
        let flag = if i == ViewMode::all().len() - 1 { MenuFlag::Radio | MenuFlag::MenuDivider } else { MenuFlag::Radio };
        let flag = if mode == ViewMode::default() { flag | MenuFlag::Value } else { flag };
        let shortcut = Shortcut::Alt | char::from(b'1' + i as u8);
        menu.add(&mode_path(mode), shortcut, flag, { let s = *s; move |_| s.send(Message::SetViewMode(mode)) });
    }
    menu.add(MENU_LINE_NUMBERS, Shortcut::None, toggle_flag(settings.behavior.show_line_numbers), { let s = *s; move |_| s.send(Message::ToggleLineNumbers) });
    menu.add(MENU_NEW_TAB, Shortcut::None, toggle_flag(settings.behavior.open_links_in_new_tab), { let s = *s; move |_| s.send(Message::ToggleLinksInNewTab) });

    // Styles
    menu.add(MENU_REMEMBER_STYLES, Shortcut::None, toggle_flag(settings.remember_styles), { let s = *s; move |_| s.send(Message::ToggleRememberStyles) });
    menu.add("Styles/Reset All Classes", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ResetAllClasses) });
}

/// Check the radio item of the active view.
pub fn select_mode_item(menu: &MenuBar, mode: ViewMode) {
    let idx = menu.find_index(&mode_path(mode));
    if idx >= 0 {
        if let Some(mut item) = menu.at(idx) {
            item.setonly();
        }
    }
}

pub fn set_menu_checkbox(menu: &MenuBar, path: &str, checked: bool) {
    let idx = menu.find_index(path);
    if idx >= 0 {
        if let Some(mut item) = menu.at(idx) {
            if checked {
                item.set();
            } else {
                item.clear();
            }
        }
    }
}
