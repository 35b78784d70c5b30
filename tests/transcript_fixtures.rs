use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clipforge_rs::{
    find_boundaries, generate_candidates, parse_transcript, ClipSelector, ClipSelectorBuilder,
    Segment, SelectionInput, SelectorConfig, WindowParams, WindowStrategy, Word,
};
use libtest_mimic::{Arguments, Failed, Trial};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_SEED: u64 = 42;
const DEFAULT_SYNTHETIC_CASES: usize = 24;
const SUITE_NAME: &str = "clip_selection_invariants";
const STRATEGIES: [WindowStrategy; 3] = [
    WindowStrategy::BoundaryPairs,
    WindowStrategy::SlidingWindow,
    WindowStrategy::Adaptive,
];

fn main() {
    let args = Arguments::from_args();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let seed = env_u64("CLIPFORGE_IT_SEED", DEFAULT_SEED);
    let synthetic_cases = env_u64("CLIPFORGE_IT_CASES", DEFAULT_SYNTHETIC_CASES as u64) as usize;

    let fixtures = match list_fixtures(&repo_root.join("test-data/transcripts")) {
        Ok(paths) if !paths.is_empty() => paths,
        Ok(_) => {
            run_setup_failure(&args, "No fixtures under test-data/transcripts.".to_string());
            return;
        }
        Err(err) => {
            run_setup_failure(&args, err);
            return;
        }
    };

    let mut tests = Vec::with_capacity(fixtures.len() + synthetic_cases);
    for path in fixtures {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        tests.push(Trial::test(
            format!("{SUITE_NAME}::fixture::{stem}"),
            move || run_fixture_case(&path).map_err(Failed::from),
        ));
    }
    for case in 0..synthetic_cases {
        let case_seed = seed.wrapping_add(case as u64);
        tests.push(Trial::test(
            format!("{SUITE_NAME}::synthetic::{case_seed}"),
            move || run_synthetic_case(case_seed).map_err(Failed::from),
        ));
    }

    libtest_mimic::run(&args, tests).exit();
}

fn run_setup_failure(args: &Arguments, message: String) {
    let test = Trial::test(format!("{SUITE_NAME}::setup"), move || {
        Err(Failed::from(message))
    });
    libtest_mimic::run(args, vec![test]).exit();
}

fn list_fixtures(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|err| format!("Failed to read fixture dir '{}': {err}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("Failed to list '{}': {err}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn run_fixture_case(path: &Path) -> Result<(), String> {
    let data = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read fixture '{}': {err}", path.display()))?;
    let (words, diagnostics) = parse_transcript(&data)
        .map_err(|err| format!("Failed to parse fixture '{}': {err}", path.display()))?;
    if words.is_empty() {
        return Err(format!("fixture '{}' has no usable words", path.display()));
    }
    if diagnostics.kept != words.len() {
        return Err(format!(
            "diagnostics disagree with the stream: {diagnostics:?} for {} words",
            words.len()
        ));
    }
    check_stream(&words, &SelectorConfig::default())
}

fn run_synthetic_case(seed: u64) -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let words = jittered_words(&mut rng);
    let min = rng.gen_range(5.0..20.0);
    let config = SelectorConfig {
        count: rng.gen_range(1..6),
        min_duration_secs: min,
        max_duration_secs: min + rng.gen_range(0.0..40.0),
        preferred_min_secs: min,
        preferred_max_secs: min + 10.0,
        min_gap_secs: rng.gen_range(0.0..3.0),
        window_step_secs: rng.gen_range(1.0..8.0),
        max_boundaries: rng.gen_range(2..200),
        ..SelectorConfig::default()
    };
    check_stream(&words, &config)
}

/// Words with irregular lengths, sparse punctuation, occasional long pauses
/// and starts that sometimes overlap the previous word.
fn jittered_words(rng: &mut StdRng) -> Vec<Word> {
    let count = rng.gen_range(0..600);
    let mut words = Vec::with_capacity(count);
    let mut t = rng.gen_range(0.0..5.0);
    for i in 0..count {
        let duration = rng.gen_range(0.05..0.8);
        let mut text = if rng.gen_bool(0.15) {
            format!("Word{i}")
        } else {
            format!("word{i}")
        };
        match rng.gen_range(0..20) {
            0..=1 => text.push('.'),
            2 => text.push('?'),
            3 => text.push('!'),
            _ => {}
        }
        words.push(Word::new(text, t, t + duration));
        t += duration + rng.gen_range(-0.05..0.4);
        if rng.gen_bool(0.02) {
            t += rng.gen_range(2.0..6.0);
        }
        t = t.max(0.0);
    }
    words
}

fn check_stream(words: &[Word], config: &SelectorConfig) -> Result<(), String> {
    let boundaries = find_boundaries(words);
    let params = WindowParams::from_config(config);
    for strategy in STRATEGIES {
        for candidate in generate_candidates(words, &boundaries, &params, strategy) {
            check_candidate(words, &candidate, config)
                .map_err(|err| format!("{}: {err}", strategy.as_str()))?;
        }

        let engine = build_engine(config, strategy)?;
        let input = SelectionInput::new(words.to_vec()).with_keywords(vec!["word7".to_string()]);
        let first = engine.select(&input);
        check_clips(&first.clips, config)
            .map_err(|err| format!("{}: {err}", strategy.as_str()))?;
        if engine.select(&input) != first {
            return Err(format!("{}: repeated selection differs", strategy.as_str()));
        }
    }
    Ok(())
}

fn build_engine(config: &SelectorConfig, strategy: WindowStrategy) -> Result<ClipSelector, String> {
    ClipSelectorBuilder::new(SelectorConfig {
        strategy,
        ..config.clone()
    })
    .build()
    .map_err(|err| format!("Failed to build selector: {err}"))
}

fn check_candidate(
    words: &[Word],
    candidate: &Segment,
    config: &SelectorConfig,
) -> Result<(), String> {
    let duration = candidate.duration();
    if duration < config.min_duration_secs || duration > config.max_duration_secs {
        return Err(format!(
            "candidate [{:.3}, {:.3}] has duration {duration:.3} outside [{}, {}]",
            candidate.start(),
            candidate.end(),
            config.min_duration_secs,
            config.max_duration_secs
        ));
    }
    if words.get(candidate.first_index..candidate.end_index()) != Some(candidate.words()) {
        return Err(format!(
            "candidate at word {} is not a contiguous slice of the stream",
            candidate.first_index
        ));
    }
    Ok(())
}

fn check_clips(clips: &[Segment], config: &SelectorConfig) -> Result<(), String> {
    if clips.len() > config.count {
        return Err(format!(
            "selected {} clips, asked for {}",
            clips.len(),
            config.count
        ));
    }
    for (idx, clip) in clips.iter().enumerate() {
        if !(0.0..=1.0).contains(&clip.score) {
            return Err(format!("clip {} scored {} outside [0, 1]", clip.label, clip.score));
        }
        let expected = format!("clip_{:02}", idx + 1);
        if clip.label != expected {
            return Err(format!(
                "clip {idx} labelled '{}', expected '{expected}'",
                clip.label
            ));
        }
    }
    for pair in clips.windows(2) {
        if pair[0].start() > pair[1].start() {
            return Err(format!(
                "{} and {} are out of order",
                pair[0].label, pair[1].label
            ));
        }
        if pair[0].end() + config.min_gap_secs > pair[1].start() {
            return Err(format!(
                "{} ends at {:.3} and {} starts at {:.3}, closer than {:.3}s",
                pair[0].label,
                pair[0].end(),
                pair[1].label,
                pair[1].start(),
                config.min_gap_secs
            ));
        }
    }
    Ok(())
}

fn env_u64(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or_else(|err| {
            panic!(
                "Invalid value for {}='{}' (expected u64): {}",
                name, value, err
            )
        }),
        Err(_) => default,
    }
}
