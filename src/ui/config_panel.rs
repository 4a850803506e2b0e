use fltk::{
    app::Sender,
    browser::HoldBrowser,
    button::{Button, CheckButton},
    enums::{Align, CallbackTrigger, Font},
    frame::Frame,
    group::{Flex, FlexType, Scroll, ScrollType},
    input::Input,
    menu::Choice,
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::domain::settings::{AppSettings, SyntaxTheme};
use crate::app::domain::style_registry::{ElementTag, StyleRegistry};

const ROW_HEIGHT: i32 = 28;
const LABEL_WIDTH: i32 = 110;
const RESET_WIDTH: i32 = 60;
const PANEL_WIDTH: i32 = 600;
const TOKEN_LIST_HEIGHT: i32 = 110;

/// One class input per element, a token editor for a chosen element, plus the
/// behavior switches.
pub struct ConfigPanel {
    pub widget: Scroll,
    labels: Vec<Frame>,
    inputs: Vec<(ElementTag, Input)>,
    token_tag: Choice,
    token_input: Input,
    token_list: HoldBrowser,
    new_tab: CheckButton,
    line_numbers: CheckButton,
    remember_styles: CheckButton,
    code_theme: Choice,
}

fn tag_at(index: i32) -> Option<ElementTag> {
    usize::try_from(index)
        .ok()
        .and_then(|i| ElementTag::all().get(i))
        .copied()
}

fn section_title(column: &mut Flex, title: &str) {
    let mut frame = Frame::default()
        .with_label(title)
        .with_align(Align::Left | Align::Inside);
    frame.set_label_font(Font::HelveticaBold);
    column.fixed(&frame, ROW_HEIGHT);
}

impl ConfigPanel {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut widget = Scroll::default();
        widget.set_type(ScrollType::Vertical);

        // Behavior rows, theme row, three titles, token row, one row per tag and the footer.
        let rows = 3 + 1 + 3 + 1 + ElementTag::COUNT as i32 + 1;
        let height = rows * (ROW_HEIGHT + 4) + TOKEN_LIST_HEIGHT + 24;
        let mut column = Flex::default().with_size(PANEL_WIDTH, height);
        column.set_type(FlexType::Column);
        column.set_margin(10);
        column.set_pad(4);

        section_title(&mut column, "Behavior");

        let mut new_tab = CheckButton::default().with_label("Open links in a new tab");
        new_tab.set_callback({ let s = *sender; move |_| s.send(Message::ToggleLinksInNewTab) });
        column.fixed(&new_tab, ROW_HEIGHT);

        let mut line_numbers = CheckButton::default().with_label("Show line numbers in the code view");
        line_numbers.set_callback({ let s = *sender; move |_| s.send(Message::ToggleLineNumbers) });
        column.fixed(&line_numbers, ROW_HEIGHT);

        let mut remember_styles = CheckButton::default().with_label("Remember classes between sessions");
        remember_styles.set_callback({ let s = *sender; move |_| s.send(Message::ToggleRememberStyles) });
        column.fixed(&remember_styles, ROW_HEIGHT);

        let mut theme_row = Flex::default();
        theme_row.set_type(FlexType::Row);
        let theme_label = Frame::default()
            .with_label("Code view theme:")
            .with_align(Align::Left | Align::Inside);
        theme_row.fixed(&theme_label, LABEL_WIDTH + 20);
        let mut code_theme = Choice::default();
        for theme in SyntaxTheme::all() {
            code_theme.add_choice(theme.display_name());
        }
        code_theme.set_callback({
            let s = *sender;
            move |c| {
                if let Some(theme) = usize::try_from(c.value()).ok().and_then(|i| SyntaxTheme::all().get(i)) {
                    s.send(Message::SetCodeTheme(*theme));
                }
            }
        });
        theme_row.end();
        column.fixed(&theme_row, ROW_HEIGHT);

        section_title(&mut column, "Class tokens");

        let mut token_row = Flex::default();
        token_row.set_type(FlexType::Row);
        token_row.set_pad(6);
        let mut token_tag = Choice::default();
        for tag in ElementTag::all() {
            token_tag.add_choice(tag.as_str());
        }
        token_tag.set_value(0);
        token_tag.set_callback({ let s = *sender; move |_| s.send(Message::TokenTagSelected) });
        token_row.fixed(&token_tag, LABEL_WIDTH);

        let mut token_input = Input::default();
        token_input.set_tooltip("Class to add, e.g. text-center");
        let mut add_token = Button::default().with_label("Add");
        token_row.fixed(&add_token, RESET_WIDTH);
        let mut remove_token = Button::default().with_label("Remove");
        token_row.fixed(&remove_token, RESET_WIDTH + 10);
        token_row.end();
        column.fixed(&token_row, ROW_HEIGHT);

        let mut token_list = HoldBrowser::default();
        // Tokens such as `@container` must not be read as format codes.
        token_list.set_format_char('\0');
        column.fixed(&token_list, TOKEN_LIST_HEIGHT);

        add_token.set_callback({
            let s = *sender;
            let tag_choice = token_tag.clone();
            let input = token_input.clone();
            move |_| {
                if let Some(tag) = tag_at(tag_choice.value()) {
                    s.send(Message::AddClassToken(tag, input.value()));
                }
            }
        });
        token_input.set_trigger(CallbackTrigger::EnterKey);
        token_input.set_callback({
            let mut add = add_token.clone();
            move |_| add.do_callback()
        });
        remove_token.set_callback({
            let s = *sender;
            let tag_choice = token_tag.clone();
            let list = token_list.clone();
            move |_| {
                let token = list.text(list.value());
                if let (Some(tag), Some(token)) = (tag_at(tag_choice.value()), token) {
                    s.send(Message::RemoveClassToken(tag, token));
                }
            }
        });

        section_title(&mut column, "Classes");

        let mut labels = Vec::with_capacity(ElementTag::COUNT);
        let mut inputs = Vec::with_capacity(ElementTag::COUNT);
        for tag in ElementTag::all().iter().copied() {
            let mut row = Flex::default();
            row.set_type(FlexType::Row);
            row.set_pad(6);

            let label = Frame::default()
                .with_label(tag.display_name())
                .with_align(Align::Left | Align::Inside);
            row.fixed(&label, LABEL_WIDTH);

            let mut input = Input::default();
            input.set_tooltip(&format!("Classes applied to <{}>", tag.as_str()));
            input.set_trigger(CallbackTrigger::Changed);
            input.set_callback({ let s = *sender; move |_| s.send(Message::ClassChanged(tag)) });

            let mut reset = Button::default().with_label("Reset");
            reset.set_callback({ let s = *sender; move |_| s.send(Message::ResetClass(tag)) });
            row.fixed(&reset, RESET_WIDTH);

            row.end();
            column.fixed(&row, ROW_HEIGHT);
            labels.push(label);
            inputs.push((tag, input));
        }

        let mut footer = Flex::default();
        footer.set_type(FlexType::Row);
        Frame::default();
        let mut reset_all = Button::default().with_label("Reset All");
        reset_all.set_callback({ let s = *sender; move |_| s.send(Message::ResetAllClasses) });
        footer.fixed(&reset_all, 100);
        footer.end();
        column.fixed(&footer, ROW_HEIGHT);

        column.end();
        widget.end();

        Self {
            widget,
            labels,
            inputs,
            token_tag,
            token_input,
            token_list,
            new_tab,
            line_numbers,
            remember_styles,
            code_theme,
        }
    }

    /// Refresh every control from the current styles and settings.
    pub fn load(&mut self, styles: &StyleRegistry, settings: &AppSettings) {
        for tag in ElementTag::all().iter().copied() {
            self.show_class(tag, styles);
        }
        self.show_tokens(styles);
        self.new_tab.set_checked(settings.behavior.open_links_in_new_tab);
        self.line_numbers.set_checked(settings.behavior.show_line_numbers);
        self.remember_styles.set_checked(settings.remember_styles);
        let theme_index = SyntaxTheme::all()
            .iter()
            .position(|t| *t == settings.code_theme)
            .unwrap_or(0);
        self.code_theme.set_value(theme_index as i32);
    }

    /// Put the registry value back into the input, e.g. after a reset.
    pub fn show_class(&mut self, tag: ElementTag, styles: &StyleRegistry) {
        if let Some((_, input)) = self.inputs.iter_mut().find(|(t, _)| *t == tag) {
            if input.value() != styles.get(tag) {
                input.set_value(styles.get(tag));
            }
        }
        self.mark_customized(tag, styles);
    }

    /// Bold label for classes that differ from the defaults.
    pub fn mark_customized(&mut self, tag: ElementTag, styles: &StyleRegistry) {
        let idx = ElementTag::all().iter().position(|t| *t == tag);
        if let Some(label) = idx.and_then(|i| self.labels.get_mut(i)) {
            let font = if styles.is_default(tag) { Font::Helvetica } else { Font::HelveticaBold };
            label.set_label_font(font);
            label.redraw_label();
        }
    }

    /// List the tokens of the element picked in the token editor.
    pub fn show_tokens(&mut self, styles: &StyleRegistry) {
        self.token_list.clear();
        if let Some(tag) = tag_at(self.token_tag.value()) {
            for token in styles.tokens(tag) {
                self.token_list.add(token);
            }
        }
        self.token_list.redraw();
    }

    pub fn clear_token_input(&mut self) {
        self.token_input.set_value("");
    }

    pub fn class_value(&self, tag: ElementTag) -> Option<String> {
        self.inputs
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, input)| input.value())
    }
}
