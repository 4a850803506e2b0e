use std::ffi::{CStr, c_char, c_void};

use fltk::text::TextBuffer;

/// Read the whole text of an FLTK `TextBuffer`.
///
/// `TextBuffer::text()` copies FLTK's malloc'd string into a `String` but
/// never frees the C copy, leaking the buffer size on every call. The draft
/// is read back on every keystroke, so this goes through the C API and frees
/// the copy.
pub fn buffer_text_no_leak(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut c_void) -> *mut c_char;
        fn free(ptr: *mut c_void);
    }

    // SAFETY: the buffer pointer is valid while `buf` lives. FLTK returns a
    // malloc'd NUL-terminated string (or null), which is copied and then freed
    // exactly once.
    unsafe {
        let ptr = Fl_Text_Buffer_text(buf.as_ptr() as *mut c_void);
        if ptr.is_null() {
            return String::new();
        }
        let text = CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut c_void);
        text
    }
}
