use fltk::{
    app::Sender,
    button::Button,
    enums::{Color, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::domain::snippet::Snippet;
use crate::app::domain::view_mode::ViewMode;

pub const TOOLBAR_HEIGHT: i32 = 32;

const BUTTON_WIDTH: i32 = 56;
const MODE_BUTTON_WIDTH: i32 = 80;

/// Snippet buttons on the left, view switches on the right.
pub struct Toolbar {
    pub widget: Flex,
    snippet_buttons: Vec<Button>,
    mode_buttons: Vec<(ViewMode, Button)>,
}

impl Toolbar {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut widget = Flex::default();
        widget.set_type(FlexType::Row);
        widget.set_margin(2);
        widget.set_pad(4);

        let mut snippet_buttons = Vec::new();
        for snippet in Snippet::all().iter().copied() {
            let mut btn = Button::default().with_label(snippet.label());
            btn.set_tooltip(snippet.tooltip());
            btn.set_frame(FrameType::FlatBox);
            let s = *sender;
            btn.set_callback(move |_| s.send(Message::Insert(snippet)));
            widget.fixed(&btn, BUTTON_WIDTH);
            snippet_buttons.push(btn);
        }

        // Spacer
        Frame::default();

        let mut mode_buttons = Vec::new();
        for mode in ViewMode::all().iter().copied() {
            let mut btn = Button::default().with_label(mode.display_name());
            btn.set_frame(FrameType::FlatBox);
            let s = *sender;
            btn.set_callback(move |_| s.send(Message::SetViewMode(mode)));
            widget.fixed(&btn, MODE_BUTTON_WIDTH);
            mode_buttons.push((mode, btn));
        }

        widget.end();

        let mut toolbar = Self {
            widget,
            snippet_buttons,
            mode_buttons,
        };
        toolbar.set_mode(ViewMode::default());
        toolbar
    }

    /// Highlight the active view and enable snippets only while editing.
    pub fn set_mode(&mut self, active: ViewMode) {
        for (mode, btn) in &mut self.mode_buttons {
            if *mode == active {
                btn.set_color(Color::from_rgb(59, 130, 246));
                btn.set_label_color(Color::White);
            } else {
                btn.set_color(Color::BackGround);
                btn.set_label_color(Color::Foreground);
            }
            btn.redraw();
        }
        for btn in &mut self.snippet_buttons {
            if active.allows_editing() {
                btn.activate();
            } else {
                btn.deactivate();
            }
        }
    }
}
