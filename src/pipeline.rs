use std::sync::Arc;

use log::{error, info, warn};
use serde::Serialize;

use crate::summarize::{GenerativeModel, generate_summary};
use crate::youtube::{TranscriptProvider, fetch_transcript};
use crate::{PipelineError, VideoReference, resolve_video_reference};

/// Everything one successful run produces
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub video: VideoReference,
    pub transcript: String,
    pub summary: String,
}

/// Resolve → fetch → summarize, run to completion per request
#[derive(Clone)]
pub struct Pipeline {
    provider: Arc<dyn TranscriptProvider>,
    model: Arc<dyn GenerativeModel>,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn TranscriptProvider>, model: Arc<dyn GenerativeModel>) -> Self {
        Self { provider, model }
    }

    pub async fn run(&self, url: &str, word_bound: u32) -> Result<PipelineOutcome, PipelineError> {
        let video = resolve_video_reference(url).inspect_err(|_| warn!("Could not resolve video from: {url}"))?;
        info!("Resolved {url} to video {video}");

        let document = fetch_transcript(self.provider.as_ref(), &video).await?;
        let transcript = document.text();
        if transcript.trim().is_empty() {
            warn!("Transcript for {video} has no text");
            return Err(PipelineError::EmptyTranscript);
        }

        let summary = generate_summary(self.model.as_ref(), &transcript, word_bound)
            .await
            .inspect_err(|e| error!("Summary generation failed for {video}: {e}"))?;

        Ok(PipelineOutcome {
            video,
            transcript,
            summary,
        })
    }
}
