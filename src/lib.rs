pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod summarize;
pub mod web;
pub mod youtube;

use serde::{Deserialize, Serialize};

pub use error::{GenerationError, InvalidReference, PipelineError, TranscriptError};

/// Host marker for long-form watch URLs
const LONG_FORM_HOST: &str = "youtube.com";

/// Host marker for short links
const SHORT_LINK_HOST: &str = "youtu.be";

/// A single caption fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Ordered caption fragments for one video
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranscriptDocument {
    pub video_id: String,
    pub segments: Vec<Segment>,
}

impl TranscriptDocument {
    /// Flatten the fragments into one space-joined string
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Identifier of a video on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VideoReference(String);

impl VideoReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    pub fn thumbnail_url(&self) -> String {
        format!("http://img.youtube.com/vi/{}/0.jpg", self.0)
    }
}

impl std::fmt::Display for VideoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video identifier from a user-supplied URL.
///
/// Long-form URLs yield the second `=`-separated segment, so the video
/// parameter has to come first in the query string (`watch?t=5&v=ID` resolves
/// to `5&v`). Short links yield the last path segment. The identifier itself
/// is not validated; a bad one only fails at fetch time.
pub fn resolve_video_reference(url: &str) -> Result<VideoReference, InvalidReference> {
    if url.contains(LONG_FORM_HOST) {
        return url
            .split('=')
            .nth(1)
            .map(VideoReference::new)
            .ok_or_else(|| InvalidReference::new(url));
    }

    if url.contains(SHORT_LINK_HOST) {
        // rsplit always yields at least one item
        let id = url.rsplit('/').next().unwrap_or_default();
        return Ok(VideoReference::new(id));
    }

    Err(InvalidReference::new(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Segment {
        Segment {
            text: text.to_string(),
            start: 0.0,
            duration: 1.0,
        }
    }

    #[test]
    fn test_watch_url() {
        let video = resolve_video_reference("https://www.youtube.com/watch?v=abc123").unwrap();
        assert_eq!(video.id(), "abc123");
    }

    #[test]
    fn test_short_url() {
        let video = resolve_video_reference("https://youtu.be/xyz789").unwrap();
        assert_eq!(video.id(), "xyz789");
    }

    #[test]
    fn test_watch_url_takes_second_segment() {
        let video = resolve_video_reference("https://www.youtube.com/watch?v=abc&t=120").unwrap();
        assert_eq!(video.id(), "abc&t");
    }

    #[test]
    fn test_watch_url_with_leading_param_misparses() {
        let video = resolve_video_reference("https://www.youtube.com/watch?feature=share&v=abc").unwrap();
        assert_eq!(video.id(), "share&v");
    }

    #[test]
    fn test_short_url_keeps_query() {
        let video = resolve_video_reference("https://youtu.be/xyz789?si=tracking").unwrap();
        assert_eq!(video.id(), "xyz789?si=tracking");
    }

    #[test]
    fn test_long_form_without_equals_is_invalid() {
        let err = resolve_video_reference("https://www.youtube.com/channel/UC123").unwrap_err();
        assert_eq!(err.url, "https://www.youtube.com/channel/UC123");
    }

    #[test]
    fn test_unknown_host_is_invalid() {
        assert!(resolve_video_reference("https://vimeo.com/12345").is_err());
        assert!(resolve_video_reference("").is_err());
    }

    #[test]
    fn test_thumbnail_url() {
        let video = VideoReference::new("abc123");
        assert_eq!(video.thumbnail_url(), "http://img.youtube.com/vi/abc123/0.jpg");
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=abc123");
    }

    #[test]
    fn test_document_text_joins_with_spaces() {
        let doc = TranscriptDocument {
            video_id: "abc".to_string(),
            segments: vec![segment("Hello"), segment("world")],
        };
        assert_eq!(doc.text(), "Hello world");
    }

    #[test]
    fn test_document_text_empty() {
        let doc = TranscriptDocument::default();
        assert!(doc.is_empty());
        assert_eq!(doc.text(), "");
    }
}
