use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::models::{DiarizationSegment, RawSegment, Transcription};

/// Hosted Whisper checkpoint, selected by size identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
    LargeV3,
}

impl ModelSize {
    /// Repository id of the hosted checkpoint
    pub fn repo_id(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "openai/whisper-tiny",
            ModelSize::Base => "openai/whisper-base",
            ModelSize::Small => "openai/whisper-small",
            ModelSize::Medium => "openai/whisper-medium",
            ModelSize::Large => "openai/whisper-large-v2",
            ModelSize::LargeV3 => "openai/whisper-large-v3",
        }
    }
}

impl FromStr for ModelSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tiny" => Ok(ModelSize::Tiny),
            "base" => Ok(ModelSize::Base),
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            "large" => Ok(ModelSize::Large),
            "large-v3" => Ok(ModelSize::LargeV3),
            other => anyhow::bail!(
                "Unknown model size '{}' (expected tiny, base, small, medium, large, or large-v3)",
                other
            ),
        }
    }
}

/// Configuration for the hosted inference endpoints
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Access token (from the HF_TOKEN env var)
    pub token: String,
    /// Base URL of the inference service
    pub base_url: String,
    /// Whisper checkpoint used for transcription
    pub model: ModelSize,
    /// Diarization model repository id
    pub diarization_model: String,
}

impl InferenceConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let token =
            std::env::var("HF_TOKEN").context("HF_TOKEN environment variable not set")?;

        Ok(Self {
            token,
            base_url: "https://api-inference.huggingface.co".to_string(),
            model: ModelSize::Medium,
            diarization_model: "pyannote/speaker-diarization-3.1".to_string(),
        })
    }

    /// Create with custom settings
    pub fn new(token: String, model: ModelSize) -> Self {
        Self {
            token,
            base_url: "https://api-inference.huggingface.co".to_string(),
            model,
            diarization_model: "pyannote/speaker-diarization-3.1".to_string(),
        }
    }
}

/// Client for the hosted transcription and diarization endpoints
pub struct InferenceClient {
    client: Client,
    config: InferenceConfig,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Transcribe an audio file, returning the detected language and raw
    /// timestamped segments
    pub async fn transcribe(&self, audio_path: &Path) -> Result<Transcription> {
        let audio = std::fs::read(audio_path)
            .with_context(|| format!("Failed to read audio file: {:?}", audio_path))?;

        let url = format!(
            "{}/models/{}",
            self.config.base_url,
            self.config.model.repo_id()
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .header("content-type", "audio/wav")
            .query(&[("return_timestamps", "true")])
            .body(audio)
            .send()
            .await
            .context("Failed to send transcription request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Transcription request failed: {} - {}", status, body);
        }

        let response: AsrResponse = response
            .json()
            .await
            .context("Failed to parse transcription response")?;

        Ok(response.into_transcription())
    }

    /// Run speaker diarization on an audio file
    pub async fn diarize(&self, audio_path: &Path) -> Result<Vec<DiarizationSegment>> {
        let audio = std::fs::read(audio_path)
            .with_context(|| format!("Failed to read audio file: {:?}", audio_path))?;

        let url = format!(
            "{}/models/{}",
            self.config.base_url, self.config.diarization_model
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .header("content-type", "audio/wav")
            .body(audio)
            .send()
            .await
            .context("Failed to send diarization request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Diarization request failed: {} - {}", status, body);
        }

        let chunks: Vec<DiarizationChunk> = response
            .json()
            .await
            .context("Failed to parse diarization response")?;

        Ok(chunks
            .into_iter()
            .map(|chunk| DiarizationSegment {
                start: chunk.start,
                end: chunk.end,
                speaker: chunk.speaker,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct AsrResponse {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    chunks: Vec<AsrChunk>,
}

#[derive(Debug, Deserialize)]
struct AsrChunk {
    /// Start and end in seconds; the end is null on trailing chunks
    timestamp: (f64, Option<f64>),
    text: String,
}

impl AsrResponse {
    fn into_transcription(self) -> Transcription {
        Transcription {
            language: self.language,
            segments: self
                .chunks
                .into_iter()
                .map(|chunk| RawSegment {
                    start: chunk.timestamp.0,
                    end: chunk.timestamp.1,
                    text: chunk.text,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DiarizationChunk {
    speaker: String,
    start: f64,
    end: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_asr_response() {
        let json = r#"{
            "text": " Hello there. How are you?",
            "chunks": [
                {"timestamp": [0.0, 1.8], "text": " Hello there."},
                {"timestamp": [2.1, null], "text": " How are you?"}
            ]
        }"#;

        let response: AsrResponse = serde_json::from_str(json).unwrap();
        let transcription = response.into_transcription();

        assert_eq!(transcription.language, None);
        assert_eq!(transcription.segments.len(), 2);
        assert_eq!(transcription.segments[0].end, Some(1.8));
        assert_eq!(transcription.segments[1].end, None);
        assert_eq!(transcription.segments[1].text, " How are you?");
    }

    #[test]
    fn test_parse_diarization_response() {
        let json = r#"[
            {"speaker": "SPEAKER_00", "start": 0.5, "end": 4.2},
            {"speaker": "SPEAKER_01", "start": 4.4, "end": 7.9}
        ]"#;

        let chunks: Vec<DiarizationChunk> = serde_json::from_str(json).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].speaker, "SPEAKER_00");
        assert_eq!(chunks[1].start, 4.4);
    }

    #[test]
    fn test_model_size_from_str() {
        assert_eq!("medium".parse::<ModelSize>().unwrap(), ModelSize::Medium);
        assert_eq!(
            "large-v3".parse::<ModelSize>().unwrap().repo_id(),
            "openai/whisper-large-v3"
        );
        assert!("enormous".parse::<ModelSize>().is_err());
    }
}
