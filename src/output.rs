use crate::pipeline::PipelineOutcome;

/// Render notes for the terminal, optionally followed by the raw transcript
pub fn render_notes(outcome: &PipelineOutcome, with_transcript: bool) -> String {
    let mut out = format!("# Notes: {}\n\n{}", outcome.video.watch_url(), outcome.summary);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    if with_transcript {
        out.push_str("\n--- Transcript ---\n");
        out.push_str(&outcome.transcript);
        out.push('\n');
    }
    out
}
