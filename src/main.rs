use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crosstalk::{
    InferenceClient, InferenceConfig, assign_speakers, merged_json_path, parse_rttm_file,
    parse_segments_file, print_segments, run_pipeline, write_merged_json,
};

#[derive(Parser)]
#[command(name = "crosstalk")]
#[command(author, version, about = "Speaker-attributed transcription pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe an audio file and attribute speakers via hosted models
    Transcribe {
        /// Input audio file (WAV)
        #[arg(short, long)]
        audio: PathBuf,

        /// Whisper model size (tiny, base, small, medium, large, large-v3)
        #[arg(long, default_value = "medium")]
        model_size: String,

        /// Write the merged result to <audio-basename>_whisperx.json
        #[arg(long)]
        save_json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Merge an aligned transcript with diarization output from files
    Merge {
        /// Aligned transcript segments (JSON array of {start, end, text})
        #[arg(short, long)]
        transcript: PathBuf,

        /// Diarization segments (RTTM)
        #[arg(short, long)]
        diarization: PathBuf,

        /// Output file for the merged segments (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Transcribe {
            audio,
            model_size,
            save_json,
            verbose,
        } => {
            setup_logging(verbose);
            transcribe(audio, model_size, save_json).await
        }
        Commands::Merge {
            transcript,
            diarization,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            merge(transcript, diarization, output)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn transcribe(audio: PathBuf, model_size: String, save_json: bool) -> Result<()> {
    dotenvy::dotenv().ok();

    let mut config = InferenceConfig::from_env()?;
    config.model = model_size.parse().context("Invalid --model-size")?;
    let client = InferenceClient::new(config);

    let result = run_pipeline(&client, &audio).await?;

    print_segments(&result.segments);

    if save_json {
        let path = merged_json_path(&audio);
        write_merged_json(&result.segments, &path)?;
        info!("Merged transcript written to {:?}", path);
    }

    let speakers: HashSet<&str> = result
        .segments
        .iter()
        .map(|segment| segment.speaker.as_str())
        .collect();
    info!(
        "Complete: {} segments, {} speakers",
        result.segments.len(),
        speakers.len()
    );

    Ok(())
}

fn merge(transcript: PathBuf, diarization: PathBuf, output: Option<PathBuf>) -> Result<()> {
    info!("Loading transcript from {:?}", transcript);
    let transcript_segments =
        parse_segments_file(&transcript).context("Failed to parse transcript segments")?;

    info!("Loading diarization from {:?}", diarization);
    let diarization_segments =
        parse_rttm_file(&diarization).context("Failed to parse diarization segments")?;

    info!(
        "Merging {} transcript segments with {} speaker segments",
        transcript_segments.len(),
        diarization_segments.len()
    );
    let merged = assign_speakers(&transcript_segments, &diarization_segments)?;

    print_segments(&merged);

    if let Some(path) = output {
        write_merged_json(&merged, &path)?;
        info!("Merged transcript written to {:?}", path);
    }

    Ok(())
}
