pub mod link;

use fltk::{app, prelude::*, window::Window};

/// Block until `dialog` is hidden. The dialog is closed as well when the
/// event loop has nothing left to run or the program is quitting.
pub fn run_modal(dialog: &mut Window) {
    while dialog.shown() {
        if !app::wait() || app::should_program_quit() {
            dialog.hide();
        }
    }
}
