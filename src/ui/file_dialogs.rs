use std::path::PathBuf;

use fltk::dialog::{FileDialogOptions, FileDialogType, NativeFileChooser};

/// Ask where to save an export, pre-filled with `suggested` as file name.
pub fn native_save_dialog(title: &str, filter: &str, suggested: &str) -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseSaveFile);
    nfc.set_title(title);
    nfc.set_filter(filter);
    nfc.set_option(FileDialogOptions::SaveAsConfirm);
    nfc.set_preset_file(suggested);
    nfc.show(); // blocks until close
    let filename = nfc.filename();
    if filename.as_os_str().is_empty() {
        None
    } else {
        Some(filename)
    }
}

/// Filter matching the extension of a suggested export name.
pub fn filter_for(filename: &str) -> &'static str {
    if filename.ends_with(".md") {
        "Markdown Files\t*.{md,markdown}"
    } else if filename.ends_with(".html") {
        "HTML Files\t*.{html,htm}"
    } else {
        "*"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_export_names() {
        assert_eq!(filter_for("markdown.md"), "Markdown Files\t*.{md,markdown}");
        assert_eq!(filter_for("generated.html"), "HTML Files\t*.{html,htm}");
        assert_eq!(filter_for("other"), "*");
    }
}
