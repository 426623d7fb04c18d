use serde::{Deserialize, Serialize};

/// Speaker label assigned when no diarization segment overlaps a transcript segment
pub const UNKNOWN_SPEAKER: &str = "unknown";

/// A transcribed stretch of speech with refined timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Transcribed text
    pub text: String,
}

impl TranscriptSegment {
    /// Duration of this segment in seconds
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// A speaker-attributed time interval produced by diarization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiarizationSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Speaker label (e.g. "SPEAKER_00")
    pub speaker: String,
}

impl DiarizationSegment {
    /// Duration of this segment in seconds
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// A transcript segment with its assigned speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub speaker: String,
}

impl MergedSegment {
    /// Attach a speaker label to a transcript segment
    pub fn from_transcript(segment: &TranscriptSegment, speaker: impl Into<String>) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
            text: segment.text.clone(),
            speaker: speaker.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_from_transcript() {
        let segment = TranscriptSegment {
            start: 1.5,
            end: 3.0,
            text: "hello there".to_string(),
        };

        let merged = MergedSegment::from_transcript(&segment, "SPEAKER_01");

        assert_eq!(merged.start, 1.5);
        assert_eq!(merged.end, 3.0);
        assert_eq!(merged.text, "hello there");
        assert_eq!(merged.speaker, "SPEAKER_01");
        assert_eq!(segment.duration(), 1.5);
    }
}
