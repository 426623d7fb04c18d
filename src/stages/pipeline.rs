use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::engine::InferenceClient;
use crate::io::load_wav;
use crate::models::MergedSegment;
use crate::stages::{assign_speakers, refine_timestamps};

/// Final product of the pipeline
#[derive(Debug)]
pub struct PipelineOutput {
    /// Language code reported by the ASR service, when present
    pub language: Option<String>,
    /// Speaker-labeled transcript segments in temporal order
    pub segments: Vec<MergedSegment>,
}

/// Run the full pipeline on one audio file: decode, transcribe, refine
/// timestamps, diarize, and merge.
///
/// Failures from the hosted services propagate to the caller unchanged;
/// there is no retry or partial result.
pub async fn run_pipeline(client: &InferenceClient, audio_path: &Path) -> Result<PipelineOutput> {
    info!("Loading audio from {:?}", audio_path);
    let audio = load_wav(audio_path)?;
    info!(
        "Loaded {:.1}s of audio at {} Hz",
        audio.duration_secs(),
        audio.sample_rate
    );

    info!("Transcribing...");
    let transcription = client.transcribe(audio_path).await?;
    if let Some(language) = &transcription.language {
        info!("Detected language: {}", language);
    }
    info!("Received {} raw segments", transcription.segments.len());

    info!("Refining timestamps...");
    let transcript = refine_timestamps(&transcription.segments, audio.duration_secs());

    info!("Diarizing...");
    let diarization = client.diarize(audio_path).await?;
    info!("Received {} speaker segments", diarization.len());

    info!("Merging transcript and speaker segments...");
    let segments = assign_speakers(&transcript, &diarization)
        .context("Failed to merge transcript and diarization segments")?;

    Ok(PipelineOutput {
        language: transcription.language,
        segments,
    })
}
