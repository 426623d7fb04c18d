use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::models::{AudioBuffer, DiarizationSegment, TranscriptSegment};

/// Decode a WAV file into a mono audio buffer
pub fn load_wav(path: &Path) -> Result<AudioBuffer> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open audio file: {:?}", path))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to decode audio samples")?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|sample| sample as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to decode audio samples")?
        }
    };

    Ok(AudioBuffer {
        samples: downmix(samples, spec.channels),
        sample_rate: spec.sample_rate,
    })
}

/// Average interleaved channels down to mono
fn downmix(samples: Vec<f32>, channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples;
    }
    samples
        .chunks(channels as usize)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Parse an RTTM file into diarization segments
pub fn parse_rttm_file(path: &Path) -> Result<Vec<DiarizationSegment>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_rttm(&content)
}

/// Parse RTTM content into diarization segments.
///
/// Only SPEAKER records are kept; comments (`;;`) and blank lines are
/// skipped. Fields per record: type, file, channel, onset, duration,
/// then three placeholders around the speaker name.
pub fn parse_rttm(content: &str) -> Result<Vec<DiarizationSegment>> {
    let mut segments = Vec::new();

    for (line_number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(";;") {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields[0] != "SPEAKER" {
            continue;
        }
        if fields.len() < 8 {
            bail!(
                "Malformed RTTM record on line {}: expected at least 8 fields, found {}",
                line_number + 1,
                fields.len()
            );
        }

        let onset: f64 = fields[3]
            .parse()
            .with_context(|| format!("Invalid onset on line {}", line_number + 1))?;
        let duration: f64 = fields[4]
            .parse()
            .with_context(|| format!("Invalid duration on line {}", line_number + 1))?;

        segments.push(DiarizationSegment {
            start: onset,
            end: onset + duration,
            speaker: fields[7].to_string(),
        });
    }

    Ok(segments)
}

/// Parse an aligned-transcript file: a JSON array of {start, end, text}
pub fn parse_segments_file(path: &Path) -> Result<Vec<TranscriptSegment>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_segments_json(&content)
}

/// Parse aligned-transcript JSON into transcript segments
pub fn parse_segments_json(json: &str) -> Result<Vec<TranscriptSegment>> {
    serde_json::from_str(json).context("Failed to parse transcript segments JSON")
}
