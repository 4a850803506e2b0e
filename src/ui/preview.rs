/// Wrap HTML in HelpView-compatible font tags. HelpView ignores the class
/// attributes, so the preview shows structure rather than utility styling.
pub fn wrap_html_for_helpview(html: &str) -> String {
    format!("<font face=\"Helvetica\" size=\"4\">{}</font>", html)
}
