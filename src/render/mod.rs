use anyhow::{anyhow, Result};
use handlebars::Handlebars;
use serde::Serialize;

use crate::config::PageConfig;
use crate::feed::VideoEntry;

const GALLERY_TEMPLATE_NAME: &str = "gallery";
const GALLERY_TEMPLATE: &str = include_str!("gallery.hbs");

#[derive(Serialize)]
struct GalleryContext<'a> {
    page: &'a PageConfig,
    videos: &'a [VideoEntry],
}

/// Renders the video gallery page. Handlebars HTML-escapes every `{{ }}`
/// interpolation, so feed text is embedded as-is.
pub struct GalleryRenderer {
    registry: Handlebars<'static>,
}

impl GalleryRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry
            .register_template_string(GALLERY_TEMPLATE_NAME, GALLERY_TEMPLATE)
            .map_err(|e| anyhow!("Failed to register gallery template: {}", e))?;

        Ok(Self { registry })
    }

    pub fn render(&self, videos: &[VideoEntry], page: &PageConfig) -> Result<String> {
        let context = GalleryContext { page, videos };
        self.registry
            .render(GALLERY_TEMPLATE_NAME, &context)
            .map_err(|e| anyhow!("Gallery template rendering failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, title: &str, description: &str, published: &str) -> VideoEntry {
        VideoEntry::new(
            id.to_string(),
            title.to_string(),
            description.to_string(),
            published.to_string(),
        )
    }

    fn render(videos: &[VideoEntry], page: &PageConfig) -> String {
        GalleryRenderer::new().unwrap().render(videos, page).unwrap()
    }

    #[test]
    fn test_empty_gallery_shows_placeholder() {
        let html = render(&[], &PageConfig::default());

        assert!(html.contains("<p class=\"media-status\">No videos available right now.</p>"));
        assert!(!html.contains("video-card"));
    }

    #[test]
    fn test_page_language_and_subtitle() {
        let page = PageConfig {
            lang: "it".to_string(),
            subtitle: "Clip della gilda".to_string(),
            ..PageConfig::default()
        };
        let html = render(&[], &page);
        assert!(html.contains("<html lang=\"it\">"));
        assert!(html.contains("<p class=\"section-subtitle\">Clip della gilda</p>"));

        let html = render(&[], &PageConfig::default());
        assert!(html.contains("<html lang=\"en\">"));
        assert!(!html.contains("section-subtitle"));
    }

    #[test]
    fn test_renders_one_card_per_video() {
        let videos = vec![
            video("aaa111", "First", "", "2024-03-05T10:00:00Z"),
            video("bbb222", "Second", "", ""),
        ];
        let html = render(&videos, &PageConfig::default());

        assert_eq!(html.matches("<article class=\"video-card\">").count(), 2);
        assert!(html.contains("src=\"https://www.youtube.com/embed/aaa111\""));
        assert!(html.find("aaa111").unwrap() < html.find("bbb222").unwrap());
        assert!(!html.contains("media-status"));
    }

    #[test]
    fn test_optional_date_and_description() {
        let page = PageConfig::default();
        let with_both = render(&[video("a", "T", "Some text", "2024-03-05T10:00:00Z")], &page);
        assert!(with_both.contains("<time datetime=\"2024-03-05T10:00:00Z\">05/03/2024</time>"));
        assert!(with_both.contains("<p>Some text</p>"));

        let without = render(&[video("a", "T", "", "garbage")], &page);
        assert!(!without.contains("<time"));
        assert!(!without.contains("<p></p>"));
    }

    #[test]
    fn test_escapes_feed_text() {
        let page = PageConfig {
            title: "Fun & games".to_string(),
            ..PageConfig::default()
        };
        let html = render(
            &[video("x\"y", "<script>alert('x')</script>", "a & b", "")],
            &page,
        );

        assert!(html.contains("<title>Fun &amp; games</title>"));
        assert!(html.contains("embed/x&quot;y\""));
        assert!(html.contains("<h3>&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;</h3>"));
        assert!(html.contains("<p>a &amp; b</p>"));
        assert!(!html.contains("<script>"));
    }
}
