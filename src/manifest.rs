use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::SelectionError;
use crate::pipeline::traits::RenderSink;
use crate::types::Segment;

pub const MANIFEST_SCHEMA_VERSION: u32 = 1;
const TEXT_PREVIEW_CHARS: usize = 150;

/// Hand-off record for the renderer: what to cut and how to label it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipRecord {
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub score: f64,
    pub text: String,
    pub text_preview: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub speakers: Vec<String>,
}

impl ClipRecord {
    pub fn from_segment(segment: &Segment) -> Self {
        let text = segment.text();
        Self {
            label: segment.label.clone(),
            start: round_to(segment.start(), 1),
            end: round_to(segment.end(), 1),
            duration: round_to(segment.duration(), 1),
            score: round_to(segment.score, 3),
            text_preview: preview(&text),
            text,
            speakers: segment.speakers(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestMeta {
    pub generated_at: String,
    pub source: String,
    pub word_count: usize,
    pub candidate_count: usize,
    pub strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipManifest {
    pub schema_version: u32,
    pub meta: ManifestMeta,
    pub clips: Vec<ClipRecord>,
}

impl ClipManifest {
    pub fn new(meta: ManifestMeta, clips: &[Segment]) -> Self {
        Self {
            schema_version: MANIFEST_SCHEMA_VERSION,
            meta,
            clips: clips.iter().map(ClipRecord::from_segment).collect(),
        }
    }
}

pub fn write_manifest(path: &Path, manifest: &ClipManifest) -> Result<(), SelectionError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| SelectionError::io("create manifest directory", e))?;
    }
    let mut file =
        File::create(path).map_err(|e| SelectionError::io("create manifest file", e))?;
    serde_json::to_writer_pretty(&mut file, manifest)
        .map_err(|e| SelectionError::json("serialize manifest", e))?;
    file.write_all(b"\n")
        .map_err(|e| SelectionError::io("finalize manifest file", e))?;
    Ok(())
}

/// Writes the selected clips as a JSON manifest for an external renderer.
pub struct JsonManifestSink {
    path: PathBuf,
    meta: ManifestMeta,
}

impl JsonManifestSink {
    pub fn new(path: impl Into<PathBuf>, meta: ManifestMeta) -> Self {
        Self {
            path: path.into(),
            meta,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderSink for JsonManifestSink {
    fn render(&mut self, clips: &[Segment]) -> Result<(), SelectionError> {
        let manifest = ClipManifest::new(self.meta.clone(), clips);
        write_manifest(&self.path, &manifest)?;
        tracing::info!(
            path = %self.path.display(),
            clip_count = clips.len(),
            "manifest: written"
        );
        Ok(())
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn preview(text: &str) -> String {
    if text.chars().count() > TEXT_PREVIEW_CHARS {
        let head: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
