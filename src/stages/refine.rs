use tracing::warn;

use crate::models::{RawSegment, TranscriptSegment};

/// Turn raw ASR chunks into validated transcript segments.
///
/// Hosted models leave rough edges on their output: trailing chunks with
/// no end stamp, leading whitespace in the text, stamps slightly past the
/// audio duration. This stage corrects them:
/// - a missing end stamp is filled from the next chunk's start, or the
///   audio duration for the final chunk
/// - stamps are clamped to `[0, total_duration]` (when the duration is
///   known) and an end before its start collapses onto the start
/// - text is trimmed; chunks left empty are dropped
///
/// Pass `total_duration = 0.0` when the audio duration is unknown.
pub fn refine_timestamps(raw: &[RawSegment], total_duration: f64) -> Vec<TranscriptSegment> {
    let mut refined = Vec::with_capacity(raw.len());

    for (index, segment) in raw.iter().enumerate() {
        let text = segment.text.trim();
        if text.is_empty() {
            continue;
        }

        if !segment.start.is_finite() || segment.end.is_some_and(|end| !end.is_finite()) {
            warn!("Dropping segment {} with non-finite timestamps", index);
            continue;
        }

        let mut start = segment.start.max(0.0);
        if total_duration > 0.0 {
            start = start.min(total_duration);
        }

        let mut end = match segment.end {
            Some(end) => end,
            None => next_start(raw, index).unwrap_or(if total_duration > 0.0 {
                total_duration
            } else {
                start
            }),
        };
        if total_duration > 0.0 {
            end = end.min(total_duration);
        }
        if end < start {
            end = start;
        }

        refined.push(TranscriptSegment {
            start,
            end,
            text: text.to_string(),
        });
    }

    refined
}

fn next_start(raw: &[RawSegment], index: usize) -> Option<f64> {
    raw.get(index + 1).map(|segment| segment.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(start: f64, end: Option<f64>, text: &str) -> RawSegment {
        RawSegment {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_missing_end_filled_from_next_start() {
        let segments = vec![raw(0.0, None, "first"), raw(2.5, Some(4.0), "second")];

        let refined = refine_timestamps(&segments, 10.0);

        assert_eq!(refined.len(), 2);
        assert_eq!(refined[0].end, 2.5);
    }

    #[test]
    fn test_trailing_missing_end_uses_duration() {
        let segments = vec![raw(8.0, None, "tail")];

        let refined = refine_timestamps(&segments, 9.5);

        assert_eq!(refined[0].end, 9.5);
    }

    #[test]
    fn test_stamps_clamped_to_audio() {
        let segments = vec![raw(-0.3, Some(12.0), "clamped")];

        let refined = refine_timestamps(&segments, 10.0);

        assert_eq!(refined[0].start, 0.0);
        assert_eq!(refined[0].end, 10.0);
    }

    #[test]
    fn test_descending_end_collapses_onto_start() {
        let segments = vec![raw(5.0, Some(4.2), "glitch")];

        let refined = refine_timestamps(&segments, 10.0);

        assert_eq!(refined[0].start, 5.0);
        assert_eq!(refined[0].end, 5.0);
    }

    #[test]
    fn test_empty_text_dropped_and_whitespace_trimmed() {
        let segments = vec![
            raw(0.0, Some(1.0), "   "),
            raw(1.0, Some(2.0), " hello world "),
        ];

        let refined = refine_timestamps(&segments, 10.0);

        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].text, "hello world");
    }

    #[test]
    fn test_unknown_duration_keeps_stamps() {
        let segments = vec![raw(3.0, Some(30.0), "long"), raw(30.0, None, "tail")];

        let refined = refine_timestamps(&segments, 0.0);

        assert_eq!(refined[0].end, 30.0);
        // No next chunk and no known duration: the tail collapses to a point
        assert_eq!(refined[1].start, 30.0);
        assert_eq!(refined[1].end, 30.0);
    }
}
