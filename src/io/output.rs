use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::MergedSegment;

/// Render one merged segment as a console line
pub fn render_segment(segment: &MergedSegment) -> String {
    format!(
        "{} [{:.2} - {:.2}]: {}",
        segment.speaker, segment.start, segment.end, segment.text
    )
}

/// Print merged segments to stdout, one line each
pub fn print_segments(segments: &[MergedSegment]) {
    for segment in segments {
        println!("{}", render_segment(segment));
    }
}

/// Derive the JSON output path for an audio file:
/// `<audio-basename>_whisperx.json` in the working directory
pub fn merged_json_path(audio_path: &Path) -> PathBuf {
    let stem = audio_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");
    PathBuf::from(format!("{}_whisperx.json", stem))
}

/// Write merged segments as a pretty-printed JSON array.
///
/// serde_json indents with two spaces and leaves non-ASCII text
/// unescaped, so the file stays human-readable for any language.
pub fn write_merged_json(segments: &[MergedSegment], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, segments).context("Failed to write JSON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_segment() {
        let segment = MergedSegment {
            start: 0.0,
            end: 5.25,
            text: "hello".to_string(),
            speaker: "SPEAKER_00".to_string(),
        };

        assert_eq!(render_segment(&segment), "SPEAKER_00 [0.00 - 5.25]: hello");
    }

    #[test]
    fn test_merged_json_path() {
        assert_eq!(
            merged_json_path(Path::new("/recordings/interview.wav")),
            PathBuf::from("interview_whisperx.json")
        );
        assert_eq!(
            merged_json_path(Path::new("meeting.wav")),
            PathBuf::from("meeting_whisperx.json")
        );
    }

    #[test]
    fn test_write_merged_json_preserves_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let segments = vec![MergedSegment {
            start: 0.0,
            end: 1.0,
            text: "안녕하세요".to_string(),
            speaker: "SPEAKER_00".to_string(),
        }];

        write_merged_json(&segments, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        assert!(written.contains("안녕하세요"));
        assert!(written.contains("  \"start\""));

        let parsed: Vec<MergedSegment> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, segments);
    }
}
