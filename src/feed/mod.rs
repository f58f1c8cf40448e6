mod date;
mod error;
mod source;
mod types;
mod xml;

pub use error::FeedError;
pub use source::{FeedSource, HttpFeedSource};
pub use types::VideoEntry;
pub use xml::{XmlDocument, XmlElement};

use std::time::Duration;

use tracing::{debug, info, warn};

const YT_PREFIX: &str = "yt";
const MEDIA_PREFIX: &str = "media";

pub struct FeedVideoExtractor {
    source: Box<dyn FeedSource>,
}

impl FeedVideoExtractor {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FeedError> {
        let source = HttpFeedSource::new(timeout, user_agent)?;
        Ok(Self::with_source(Box::new(source)))
    }

    pub fn with_source(source: Box<dyn FeedSource>) -> Self {
        Self { source }
    }

    /// Fetch the feed at `url` and return the videos matching `keyword`.
    ///
    /// Never fails: any retrieval or parse error yields an empty list, so a
    /// page built from the result always renders.
    pub async fn fetch(&self, url: &str, keyword: &str) -> Vec<VideoEntry> {
        info!("Fetching videos from {} with keyword {:?}", url, keyword);

        match self.try_fetch(url, keyword).await {
            Ok(videos) => {
                info!("Found {} matching video(s)", videos.len());
                videos
            }
            Err(e) if e.is_network() => {
                warn!("{} source failed for {}: {}", self.source.name(), url, e);
                Vec::new()
            }
            Err(e) => {
                warn!("Discarding feed from {}: {}", url, e);
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, url: &str, keyword: &str) -> Result<Vec<VideoEntry>, FeedError> {
        let body = self.source.fetch(url).await?;
        extract_videos(&body, keyword)
    }
}

/// Parse a feed document and keep the entries matching `keyword`, in feed order.
pub fn extract_videos(body: &[u8], keyword: &str) -> Result<Vec<VideoEntry>, FeedError> {
    let doc = XmlDocument::parse(body)?;
    if !doc.warnings().is_empty() {
        debug!("Feed parsed with warnings: {:?}", doc.warnings());
    }

    let root = doc.root();

    let atom = root.namespace();
    let yt = doc.namespace_for_prefix(YT_PREFIX);
    let media = doc.namespace_for_prefix(MEDIA_PREFIX);

    let needle = keyword.to_lowercase();
    let mut videos = Vec::new();

    for entry in root.children(atom, "entry") {
        let video = match read_entry(entry, atom, yt, media) {
            Ok(video) => video,
            Err(e) => {
                debug!("Skipping entry: {}", e);
                continue;
            }
        };

        if !needle.is_empty() && !matches_keyword(&video, &needle) {
            continue;
        }

        videos.push(video);
    }

    Ok(videos)
}

fn read_entry(
    entry: &XmlElement,
    atom: &str,
    yt: &str,
    media: &str,
) -> Result<VideoEntry, FeedError> {
    let id = child_text(entry, yt, "videoId").ok_or(FeedError::FieldAbsent("video id"))?;

    let title = child_text(entry, atom, "title").unwrap_or_default();

    // An existing media description wins even when empty.
    let description = entry
        .lookup_child(media, "group")
        .and_then(|group| group.lookup_child(media, "description"))
        .or_else(|| entry.lookup_child(atom, "summary"))
        .map(|node| node.text().trim().to_string())
        .unwrap_or_default();

    let published = child_text(entry, atom, "published").unwrap_or_default();

    Ok(VideoEntry::new(id, title, description, published))
}

/// Trimmed text of a child element, `None` when the child is missing or blank.
fn child_text(node: &XmlElement, namespace_uri: &str, local_name: &str) -> Option<String> {
    node.lookup_child(namespace_uri, local_name)
        .map(|child| child.text().trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// `needle` must already be lowercase.
fn matches_keyword(video: &VideoEntry, needle: &str) -> bool {
    let haystack = format!("{} {}", video.title(), video.description()).to_lowercase();
    haystack.contains(needle)
}
