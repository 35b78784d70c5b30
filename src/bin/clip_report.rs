use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use clipforge_rs::transcript::load_speaker_turns;
use clipforge_rs::{
    ClipSelectorBuilder, JsonManifestSink, JsonTranscriptProvider, ManifestMeta, RenderSink,
    SelectionInput, SelectorConfig, TranscriptProvider, WeightPreset, WindowStrategy,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[path = "clip_report/cli_values.rs"]
mod cli_values;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyChoice {
    BoundaryPairs,
    SlidingWindow,
    Adaptive,
}

impl StrategyChoice {
    fn strategy(self) -> WindowStrategy {
        match self {
            Self::BoundaryPairs => WindowStrategy::BoundaryPairs,
            Self::SlidingWindow => WindowStrategy::SlidingWindow,
            Self::Adaptive => WindowStrategy::Adaptive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresetChoice {
    Conversational,
    KeywordFocused,
}

impl PresetChoice {
    fn preset(self) -> WeightPreset {
        match self {
            Self::Conversational => WeightPreset::Conversational,
            Self::KeywordFocused => WeightPreset::KeywordFocused,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "clip_report")]
#[command(about = "Select highlight clips from word-timestamped transcripts")]
struct Args {
    /// Transcript JSON files (word array, `{"words": ...}` or Whisper segments).
    #[arg(required = true)]
    transcripts: Vec<PathBuf>,
    #[arg(long, env = "CLIPFORGE_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "CLIPFORGE_COUNT")]
    count: Option<usize>,
    #[arg(long, env = "CLIPFORGE_MIN_DURATION")]
    min_duration: Option<f64>,
    #[arg(long, env = "CLIPFORGE_MAX_DURATION")]
    max_duration: Option<f64>,
    #[arg(long, env = "CLIPFORGE_MIN_GAP")]
    min_gap: Option<f64>,
    #[arg(long, value_enum, env = "CLIPFORGE_STRATEGY")]
    strategy: Option<StrategyChoice>,
    #[arg(long, value_enum, env = "CLIPFORGE_PRESET")]
    preset: Option<PresetChoice>,
    /// Override one scoring weight, e.g. `--weight keywords=0.4`. Repeatable.
    #[arg(
        long = "weight",
        value_name = "NAME=VALUE",
        env = "CLIPFORGE_WEIGHTS",
        value_delimiter = ',',
        value_parser = cli_values::parse_weight_override
    )]
    weights: Vec<(String, f64)>,
    /// Comma-separated keywords that nudge scoring.
    #[arg(long, env = "CLIPFORGE_KEYWORDS")]
    keywords: Option<String>,
    /// Speaker turns JSON applied to every transcript.
    #[arg(long, env = "CLIPFORGE_SPEAKERS")]
    speakers: Option<PathBuf>,
    #[arg(long, env = "CLIPFORGE_OUT_DIR", default_value = "clips")]
    out_dir: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    init_tracing();

    let config = resolve_config(&args)?;
    let strategy = config.strategy.as_str();
    let keywords = args
        .keywords
        .as_deref()
        .map(cli_values::parse_keywords)
        .unwrap_or_default();
    let speaker_turns = match args.speakers.as_ref() {
        Some(path) => Some(load_speaker_turns(path).map_err(|err| {
            format!("Failed to load speaker turns '{}': {err}", path.display())
        })?),
        None => None,
    };
    let selector = ClipSelectorBuilder::new(config)
        .build()
        .map_err(|err| format!("Invalid selector configuration: {err}"))?;

    let progress = ProgressBar::new(args.transcripts.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let out_paths = cli_values::manifest_paths(&args.out_dir, &args.transcripts);
    let mut written = Vec::with_capacity(args.transcripts.len());
    for (transcript, out_path) in args.transcripts.iter().zip(out_paths) {
        progress.set_message(transcript.display().to_string());
        let words = JsonTranscriptProvider::new(transcript)
            .words()
            .map_err(|err| format!("Failed to load transcript '{}': {err}", transcript.display()))?;
        let word_count = words.len();

        let mut input = SelectionInput::new(words).with_keywords(keywords.clone());
        if let Some(turns) = speaker_turns.as_ref() {
            input = input.with_speaker_turns(turns.clone());
        }
        let output = selector.select(&input);

        let mut sink = JsonManifestSink::new(
            &out_path,
            ManifestMeta {
                generated_at: Utc::now().to_rfc3339(),
                source: transcript.to_string_lossy().into_owned(),
                word_count,
                candidate_count: output.candidate_count,
                strategy: strategy.to_string(),
            },
        );
        sink.render(&output.clips)
            .map_err(|err| format!("Failed to write manifest '{}': {err}", out_path.display()))?;
        written.push(out_path);
        progress.inc(1);
    }
    progress.finish_with_message("selection pass complete");

    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then the config file, then CLI flags.
fn resolve_config(args: &Args) -> Result<SelectorConfig, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => SelectorConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => SelectorConfig::default(),
    };

    if let Some(preset) = args.preset {
        config.weights = preset.preset().weights();
    }
    config
        .weights
        .apply_overrides(&args.weights)
        .map_err(|err| err.to_string())?;

    if let Some(count) = args.count {
        config.count = count;
    }
    if let Some(min_duration) = args.min_duration {
        config.min_duration_secs = min_duration;
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }
    if let Some(min_gap) = args.min_gap {
        config.min_gap_secs = min_gap;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy.strategy();
    }
    Ok(config)
}
