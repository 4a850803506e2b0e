use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    button::{Button, ReturnButton},
    dialog,
    enums::{Align, CallbackTrigger},
    frame::Frame,
    input::Input,
    prelude::*,
    window::Window,
};

use super::run_modal;

/// Ask for a link text and URL. `initial_text` pre-fills the text field,
/// usually with the current selection.
pub fn show_link_dialog(initial_text: &str) -> Option<(String, String)> {
    let mut dialog_win = Window::default()
        .with_size(360, 150)
        .with_label("Insert Link")
        .center_screen();
    dialog_win.make_modal(true);

    Frame::default()
        .with_pos(15, 15)
        .with_size(60, 30)
        .with_label("Text:")
        .with_align(Align::Left | Align::Inside);
    let mut text_input = Input::default().with_pos(80, 15).with_size(265, 30);
    text_input.set_value(initial_text);

    Frame::default()
        .with_pos(15, 55)
        .with_size(60, 30)
        .with_label("URL:")
        .with_align(Align::Left | Align::Inside);
    let mut url_input = Input::default().with_pos(80, 55).with_size(265, 30);
    url_input.set_value("https://");

    let mut insert_btn = ReturnButton::default()
        .with_pos(175, 105)
        .with_size(80, 30)
        .with_label("Insert");
    let mut cancel_btn = Button::default()
        .with_pos(265, 105)
        .with_size(80, 30)
        .with_label("Cancel");

    dialog_win.end();
    dialog_win.show();
    let _ = url_input.take_focus();

    let result: Rc<RefCell<Option<(String, String)>>> = Rc::new(RefCell::new(None));

    let result_insert = result.clone();
    let dialog_insert = dialog_win.clone();
    let text_value = text_input.clone();
    let url_value = url_input.clone();
    insert_btn.set_callback(move |_| {
        let url = url_value.value();
        if url.trim().is_empty() {
            dialog::message_default("Please enter a URL");
            return;
        }
        *result_insert.borrow_mut() = Some((text_value.value(), url));
        dialog_insert.clone().hide();
    });

    let mut insert_on_enter = insert_btn.clone();
    url_input.set_trigger(CallbackTrigger::EnterKey);
    url_input.set_callback(move |_| insert_on_enter.do_callback());

    let dialog_cancel = dialog_win.clone();
    cancel_btn.set_callback(move |_| dialog_cancel.clone().hide());

    let dialog_x = dialog_win.clone();
    dialog_win.set_callback(move |_| dialog_x.clone().hide());

    run_modal(&mut dialog_win);

    let chosen = result.borrow_mut().take();
    chosen
}
