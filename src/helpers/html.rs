//! HTML helper functions

/// Generate an anchor tag around already-built inner markup
///
/// # Examples
/// ```ignore
/// link_to("/hello/", "<h2>Hello</h2>") // -> <a href="/hello/"><h2>Hello</h2></a>
/// ```
pub fn link_to(href: &str, inner_html: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, esc_attr(href), inner_html)
}

/// Generate an image tag.
///
/// Without alt text the image is marked decorative.
///
/// # Examples
/// ```ignore
/// image_tag("/uploads/a.jpg", Some("A photo"), Some("card__image"))
/// ```
pub fn image_tag(src: &str, alt: Option<&str>, class: Option<&str>) -> String {
    let class_attr = class
        .map(|c| format!(r#" class="{}""#, esc_attr(c)))
        .unwrap_or_default();

    match alt.filter(|a| !a.is_empty()) {
        Some(alt) => format!(
            r#"<img{} src="{}" alt="{}">"#,
            class_attr,
            esc_attr(src),
            esc_attr(alt)
        ),
        None => format!(
            r#"<img{} src="{}" alt="" aria-hidden="true">"#,
            class_attr,
            esc_attr(src)
        ),
    }
}

/// Featured image markup for a listing entry
pub fn thumbnail_tag(src: &str) -> String {
    format!(
        r#"<img src="{}" class="attachment-post-thumbnail size-post-thumbnail wp-post-image" alt="">"#,
        esc_attr(src)
    )
}

/// Escape HTML special characters for text content
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Reverse [`html_escape`]
pub fn html_unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Escape a value for use inside a quoted attribute
pub fn esc_attr(s: &str) -> String {
    html_escape(s)
}

/// Join a class set into one escaped attribute value
pub fn class_attr<'a, I>(classes: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let joined: Vec<&str> = classes.into_iter().map(String::as_str).collect();
    esc_attr(&joined.join(" "))
}
