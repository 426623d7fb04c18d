pub mod engine;
pub mod io;
pub mod models;
pub mod stages;

pub use engine::{InferenceClient, InferenceConfig, ModelSize};
pub use io::{
    load_wav, merged_json_path, parse_rttm, parse_rttm_file, parse_segments_file,
    parse_segments_json, print_segments, write_merged_json,
};
pub use models::{
    AudioBuffer, DiarizationSegment, MergedSegment, RawSegment, Transcription, TranscriptSegment,
    UNKNOWN_SPEAKER,
};
pub use stages::{
    assign_speakers, refine_timestamps, run_pipeline, MergeError, PipelineOutput, SegmentKind,
};
