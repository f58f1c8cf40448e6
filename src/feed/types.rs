use serde::Serialize;

use super::date::format_published_date;

/// One video from the feed, with raw trimmed text (not HTML-escaped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoEntry {
    id: String,
    title: String,
    description: String,
    published_raw: String,
    published_display: String,
}

impl VideoEntry {
    pub fn new(id: String, title: String, description: String, published_raw: String) -> Self {
        let published_display = format_published_date(&published_raw);
        Self {
            id,
            title,
            description,
            published_raw,
            published_display,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn published_raw(&self) -> &str {
        &self.published_raw
    }

    /// `dd/mm/yyyy`, empty when the raw timestamp did not parse.
    pub fn published_display(&self) -> &str {
        &self.published_display
    }
}
