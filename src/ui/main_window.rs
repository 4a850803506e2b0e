use fltk::{
    app::Sender,
    enums::{Color, Font},
    group::{Flex, FlexType},
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    text::{TextBuffer, TextDisplay, TextEditor, WrapMode},
    window::Window,
};

use super::config_panel::ConfigPanel;
use super::toolbar::{TOOLBAR_HEIGHT, Toolbar};
use crate::app::domain::messages::Message;

pub const WINDOW_TITLE: &str = "Taildown";

/// Title bar text. Flags a draft that only lives in memory.
pub fn window_title(storage_degraded: bool) -> String {
    if storage_degraded {
        format!("{} - draft not saved", WINDOW_TITLE)
    } else {
        WINDOW_TITLE.to_string()
    }
}

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub toolbar: Toolbar,
    pub text_editor: TextEditor,
    pub preview: HelpView,
    pub code_view: TextDisplay,
    pub config: ConfigPanel,
}

/// Menu, toolbar and the four stacked views. Only the edit surface is
/// visible at first; the flex layout skips hidden children.
pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 960, 720, WINDOW_TITLE);
    wind.set_xclass("Taildown");

    let mut flex = Flex::new(0, 0, 960, 720, None);
    flex.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let toolbar = Toolbar::new(sender);
    flex.fixed(&toolbar.widget, TOOLBAR_HEIGHT);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.set_buffer(TextBuffer::default());
    text_editor.set_text_font(Font::Courier);
    text_editor.wrap_mode(WrapMode::AtBounds, 0);

    let mut preview = HelpView::new(0, 0, 0, 0, "");
    preview.set_text_size(15);
    preview.hide();

    let mut code_view = TextDisplay::new(0, 0, 0, 0, "");
    code_view.set_buffer(TextBuffer::default());
    code_view.set_text_font(Font::Courier);
    code_view.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
    code_view.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));
    code_view.wrap_mode(WrapMode::AtBounds, 0);
    code_view.hide();

    let mut config = ConfigPanel::new(sender);
    config.widget.hide();

    flex.end();
    wind.resizable(&flex);
    wind.end();

    MainWidgets {
        wind,
        flex,
        menu,
        toolbar,
        text_editor,
        preview,
        code_view,
        config,
    }
}
