use thiserror::Error;

/// The input did not name a recognized video host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid YouTube URL")]
pub struct InvalidReference {
    pub url: String,
}

impl InvalidReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Why a caption track could not be produced
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Transcripts are disabled for this video.")]
    Disabled { video_id: String },

    #[error("No transcript found for this video.")]
    NotFound { video_id: String, languages: Vec<String> },

    #[error("An error occurred: {0}")]
    Provider(String),
}

impl TranscriptError {
    /// Disabled and not-found are the two "unavailable" kinds
    pub fn is_unavailable(&self) -> bool {
        matches!(self, TranscriptError::Disabled { .. } | TranscriptError::NotFound { .. })
    }
}

impl From<reqwest::Error> for TranscriptError {
    fn from(e: reqwest::Error) -> Self {
        TranscriptError::Provider(e.to_string())
    }
}

impl From<quick_xml::Error> for TranscriptError {
    fn from(e: quick_xml::Error) -> Self {
        TranscriptError::Provider(format!("error parsing caption XML: {e}"))
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{env_var} environment variable not set (required for {backend} summarization)")]
    MissingApiKey { backend: &'static str, env_var: &'static str },

    #[error("request to {backend} failed: {source}")]
    Transport {
        backend: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{backend} API returned {status}: {body}")]
    Api {
        backend: &'static str,
        status: u16,
        body: String,
    },

    #[error("unexpected {backend} API response format")]
    Malformed { backend: &'static str },
}

/// Terminal failure of one resolve → fetch → summarize run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidReference(#[from] InvalidReference),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("No transcript available for this video. Please try another video with captions enabled.")]
    EmptyTranscript,

    #[error("Failed to generate notes: {0}")]
    Generation(#[from] GenerationError),
}
