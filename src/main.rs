use fltk::{app, enums::Event, prelude::*};
use tracing_subscriber::EnvFilter;

use taildown::app::controllers::editor::EditorController;
use taildown::app::domain::messages::Message;
use taildown::app::domain::settings::AppSettings;
use taildown::app::infrastructure::storage::JsonFileStore;
use taildown::app::state::AppState;
use taildown::ui::main_window::build_main_window;
use taildown::ui::menu::build_menu;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taildown=info")),
        )
        .init();

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let store = JsonFileStore::default_location();
    tracing::info!("Draft storage at {}", store.path().display());
    let editor = EditorController::open(store, settings.clone());

    let mut widgets = build_main_window(&sender);
    build_menu(&mut widgets.menu, &sender, &settings);

    // Closing the window goes through the same path as File/Quit.
    widgets.wind.set_callback({
        let s = sender;
        move |_| {
            if app::event() == Event::Close {
                s.send(Message::WindowClose);
            }
        }
    });

    let mut state = AppState::new(widgets, editor, sender);
    state.window.show();

    while app.wait() {
        let Some(msg) = receiver.recv() else {
            continue;
        };
        match msg {
            Message::Export => state.export(),
            Message::Quit | Message::WindowClose => {
                if state.quit() {
                    app.quit();
                }
            }

            Message::TextEdited => state.text_edited(),
            Message::Insert(snippet) => state.insert_snippet(snippet),
            Message::InsertLink => state.insert_link(),
            Message::SyncCaret(ticket) => state.sync_caret(ticket),
            Message::CopyHtml => state.copy_html(),

            Message::SetViewMode(mode) => state.set_view_mode(mode),
            Message::ToggleLineNumbers => state.toggle_line_numbers(),
            Message::ToggleLinksInNewTab => state.toggle_links_in_new_tab(),
            Message::SetCodeTheme(theme) => state.set_code_theme(theme),

            Message::ClassChanged(tag) => state.class_changed(tag),
            Message::ResetClass(tag) => state.reset_class(tag),
            Message::TokenTagSelected => state.show_tokens(),
            Message::AddClassToken(tag, token) => state.add_class_token(tag, &token),
            Message::RemoveClassToken(tag, token) => state.remove_class_token(tag, &token),
            Message::ResetAllClasses => state.reset_all_classes(),
            Message::ToggleRememberStyles => state.toggle_remember_styles(),

            Message::PollSave => state.poll_save(),
        }
    }
}
