use thiserror::Error;

use crate::models::{DiarizationSegment, MergedSegment, TranscriptSegment, UNKNOWN_SPEAKER};

/// Which input sequence a malformed segment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Transcript,
    Diarization,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentKind::Transcript => write!(f, "transcript"),
            SegmentKind::Diarization => write!(f, "diarization"),
        }
    }
}

/// Validation failure raised before any overlap computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MergeError {
    #[error("{kind} segment {index} has start {start} after end {end}")]
    InvalidBounds {
        kind: SegmentKind,
        index: usize,
        start: f64,
        end: f64,
    },
    #[error("{kind} segment {index} has a non-finite timestamp ({start}, {end})")]
    NonFiniteBounds {
        kind: SegmentKind,
        index: usize,
        start: f64,
        end: f64,
    },
}

/// Assign a speaker label to every transcript segment.
///
/// For each transcript segment, the diarization segment with the largest
/// temporal overlap wins; equal overlaps resolve to the earlier-starting
/// candidate. A segment no speaker interval touches gets the
/// [`UNKNOWN_SPEAKER`] label rather than failing, so gaps in diarization
/// coverage never abort a merge.
///
/// The output has exactly one entry per transcript segment, in input
/// order. Inputs are not mutated and need not be sorted.
pub fn assign_speakers(
    transcript: &[TranscriptSegment],
    diarization: &[DiarizationSegment],
) -> Result<Vec<MergedSegment>, MergeError> {
    for (index, segment) in transcript.iter().enumerate() {
        check_bounds(SegmentKind::Transcript, index, segment.start, segment.end)?;
    }
    for (index, segment) in diarization.iter().enumerate() {
        check_bounds(SegmentKind::Diarization, index, segment.start, segment.end)?;
    }

    Ok(transcript
        .iter()
        .map(|segment| {
            let speaker = best_speaker(segment, diarization).unwrap_or(UNKNOWN_SPEAKER);
            MergedSegment::from_transcript(segment, speaker)
        })
        .collect())
}

/// Find the diarization segment with maximal overlap, if any overlaps at all
fn best_speaker<'a>(
    segment: &TranscriptSegment,
    diarization: &'a [DiarizationSegment],
) -> Option<&'a str> {
    let mut best: Option<(&DiarizationSegment, f64)> = None;

    for candidate in diarization {
        let shared = overlap(segment, candidate);
        if shared <= 0.0 {
            continue;
        }

        let better = match best {
            None => true,
            Some((current, current_overlap)) => {
                shared > current_overlap
                    || (shared == current_overlap && candidate.start < current.start)
            }
        };
        if better {
            best = Some((candidate, shared));
        }
    }

    best.map(|(candidate, _)| candidate.speaker.as_str())
}

/// Length of the intersection of the two intervals, in seconds
fn overlap(transcript: &TranscriptSegment, diarization: &DiarizationSegment) -> f64 {
    (transcript.end.min(diarization.end) - transcript.start.max(diarization.start)).max(0.0)
}

fn check_bounds(kind: SegmentKind, index: usize, start: f64, end: f64) -> Result<(), MergeError> {
    if !start.is_finite() || !end.is_finite() {
        return Err(MergeError::NonFiniteBounds {
            kind,
            index,
            start,
            end,
        });
    }
    if start > end {
        return Err(MergeError::InvalidBounds {
            kind,
            index,
            start,
            end,
        });
    }
    Ok(())
}
