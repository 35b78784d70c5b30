use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const MANIFEST_SUFFIX: &str = "clips.json";

/// Parses one `--weight name=value` argument.
pub fn parse_weight_override(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing weight name in '{raw}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|err| format!("invalid weight value in '{raw}': {err}"))?;
    Ok((name.to_string(), value))
}

pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// `<out_dir>/<transcript stem>.clips.json`
pub fn manifest_path(out_dir: &Path, transcript: &Path) -> PathBuf {
    let stem = transcript
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_string());
    out_dir.join(format!("{stem}.{MANIFEST_SUFFIX}"))
}

/// One manifest path per transcript. Transcripts sharing a stem get
/// `<stem>-2`, `<stem>-3`, ... in input order so no manifest overwrites another.
pub fn manifest_paths(out_dir: &Path, transcripts: &[PathBuf]) -> Vec<PathBuf> {
    let mut taken: HashSet<PathBuf> = HashSet::with_capacity(transcripts.len());
    transcripts
        .iter()
        .map(|transcript| {
            let mut path = manifest_path(out_dir, transcript);
            let mut n = 2;
            while taken.contains(&path) {
                let stem = transcript
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "transcript".to_string());
                path = out_dir.join(format!("{stem}-{n}.{MANIFEST_SUFFIX}"));
                n += 1;
            }
            taken.insert(path.clone());
            path
        })
        .collect()
}
