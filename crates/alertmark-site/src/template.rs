//! HTML page template for static site generation.

use std::fmt::Write;

use alertmark_renderer::escape_html;

/// All data needed to render a static page.
pub struct PageData<'a> {
    /// Page title (first H1 or URL path).
    pub title: &'a str,
    /// Site title appended to the `<title>` element.
    pub site_title: &'a str,
    /// Rendered markdown body.
    pub html_content: &'a str,
}

/// Render a complete static HTML page.
pub fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(page.html_content.len() + 512);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if page.title == page.site_title {
        let _ = writeln!(html, "<title>{}</title>", escape_html(page.title));
    } else {
        let _ = writeln!(
            html,
            "<title>{} | {}</title>",
            escape_html(page.title),
            escape_html(page.site_title)
        );
    }
    html.push_str("</head>\n<body>\n");

    html.push_str("<main>\n<article class=\"markdown-body\">\n");
    html.push_str(page.html_content);
    html.push_str("\n</article>\n</main>\n");

    html.push_str("</body>\n</html>\n");
    html
}
