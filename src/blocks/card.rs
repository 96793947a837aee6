//! Card block
//!
//! A single author-composed card: image, title with an optional font size,
//! and a rich body. The markup is produced once at save time and stored in
//! the page content; nothing is queried when the page is served.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Attributes, Fragment};
use crate::helpers::{esc_attr, html_escape, html_unescape, image_tag};

/// Title style used until a font size is picked
pub const INHERIT_FONT_SIZE: &str = "font-size: inherit";

lazy_static! {
    static ref IMAGE: Regex =
        Regex::new(r#"<img class="card__image" src="([^"]*)" alt="([^"]*)""#).unwrap();
    static ref TITLE: Regex =
        Regex::new(r#"(?s)<h3 class="card__title" style="([^"]*)">(.*?)</h3>"#).unwrap();
    static ref BODY: Regex =
        Regex::new(r#"(?s)<div class="card__body">(.*)</div></div></div>\s*$"#).unwrap();
    static ref FONT_SIZE: Regex = Regex::new(r"font-size:\s*([0-9]+(?:\.[0-9]+)?)px").unwrap();
}

/// Attributes of a card block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardAttributes {
    pub title: String,
    /// Rich body markup from the editor, trusted as-is
    pub body: String,
    pub image_alt: Option<String>,
    pub image_url: Option<String>,
    pub font_size: Option<f64>,
    /// Inline style of the title, derived from `font_size`
    pub title_font_size: String,
}

impl Default for CardAttributes {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            image_alt: None,
            image_url: None,
            font_size: None,
            title_font_size: INHERIT_FONT_SIZE.to_string(),
        }
    }
}

impl CardAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read stored attributes; unknown or mistyped keys fall back to defaults
    pub fn from_attributes(attributes: &Attributes) -> Self {
        match serde_json::from_value(serde_json::Value::Object(attributes.clone())) {
            Ok(card) => card,
            Err(e) => {
                tracing::warn!("Unreadable card attributes, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_body(&mut self, body: &str) {
        self.body = body.to_string();
    }

    /// Record the picked media
    pub fn set_image(&mut self, url: &str, alt: Option<&str>) {
        self.image_url = Some(url.to_string());
        self.image_alt = alt.map(str::to_string);
    }

    /// Pick a title font size in pixels; `None` resets to inherit
    pub fn set_font_size(&mut self, size: Option<f64>) {
        self.font_size = size;
        self.title_font_size = match size {
            Some(size) => format!("font-size: {}px", size),
            None => INHERIT_FONT_SIZE.to_string(),
        };
    }

    /// Static markup stored in the page content
    pub fn save(&self) -> Fragment {
        let image = match self.image_url.as_deref().filter(|u| !u.is_empty()) {
            Some(src) => image_tag(src, self.image_alt.as_deref(), Some("card__image")),
            None => String::new(),
        };

        Fragment::new(format!(
            concat!(
                r#"<div class="card">{}<div class="card__content">"#,
                r#"<h3 class="card__title" style="{}">{}</h3>"#,
                r#"<div class="card__body">{}</div></div></div>"#
            ),
            image,
            esc_attr(&self.title_font_size),
            html_escape(&self.title),
            self.body
        ))
    }

    /// Recover attributes from markup produced by [`CardAttributes::save`]
    pub fn parse_saved(html: &str) -> Self {
        let mut card = Self::default();

        if let Some(caps) = IMAGE.captures(html) {
            card.image_url = Some(html_unescape(&caps[1]));
            let alt = html_unescape(&caps[2]);
            card.image_alt = (!alt.is_empty()).then_some(alt);
        }

        if let Some(caps) = TITLE.captures(html) {
            card.title_font_size = html_unescape(&caps[1]);
            card.title = html_unescape(&caps[2]);
            card.font_size = FONT_SIZE
                .captures(&card.title_font_size)
                .and_then(|c| c[1].parse().ok());
        }

        if let Some(caps) = BODY.captures(html) {
            card.body = caps[1].to_string();
        }

        card
    }
}
