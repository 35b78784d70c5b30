use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;

/// Scoring features, each evaluated to a value in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Boundary,
    SpeechRate,
    Questions,
    Exclamations,
    LexicalDiversity,
    Duration,
    Pauses,
    Keywords,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Boundary,
        Feature::SpeechRate,
        Feature::Questions,
        Feature::Exclamations,
        Feature::LexicalDiversity,
        Feature::Duration,
        Feature::Pauses,
        Feature::Keywords,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boundary => "boundary",
            Self::SpeechRate => "speech_rate",
            Self::Questions => "questions",
            Self::Exclamations => "exclamations",
            Self::LexicalDiversity => "lexical_diversity",
            Self::Duration => "duration",
            Self::Pauses => "pauses",
            Self::Keywords => "keywords",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

/// Feature name -> weight. Unspecified fields keep their defaults when
/// deserialized, so a config file may override any subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionWeights {
    pub boundary: f64,
    pub speech_rate: f64,
    pub questions: f64,
    pub exclamations: f64,
    pub lexical_diversity: f64,
    pub duration: f64,
    pub pauses: f64,
    pub keywords: f64,
}

impl Default for SelectionWeights {
    fn default() -> Self {
        WeightPreset::Conversational.weights()
    }
}

impl SelectionWeights {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Boundary => self.boundary,
            Feature::SpeechRate => self.speech_rate,
            Feature::Questions => self.questions,
            Feature::Exclamations => self.exclamations,
            Feature::LexicalDiversity => self.lexical_diversity,
            Feature::Duration => self.duration,
            Feature::Pauses => self.pauses,
            Feature::Keywords => self.keywords,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::Boundary => &mut self.boundary,
            Feature::SpeechRate => &mut self.speech_rate,
            Feature::Questions => &mut self.questions,
            Feature::Exclamations => &mut self.exclamations,
            Feature::LexicalDiversity => &mut self.lexical_diversity,
            Feature::Duration => &mut self.duration,
            Feature::Pauses => &mut self.pauses,
            Feature::Keywords => &mut self.keywords,
        };
        *slot = value;
    }

    pub fn total(&self) -> f64 {
        Feature::ALL.iter().map(|&f| self.get(f)).sum()
    }

    /// Apply `name=value` overrides on top of the current weights. On error
    /// the weights are left unchanged.
    pub fn apply_overrides<S: AsRef<str>>(
        &mut self,
        overrides: &[(S, f64)],
    ) -> Result<(), SelectionError> {
        let mut updated = *self;
        for (name, value) in overrides {
            let name = name.as_ref();
            let feature = Feature::from_name(name).ok_or_else(|| {
                SelectionError::invalid_config(format!("unknown weight name '{name}'"))
            })?;
            updated.set(feature, *value);
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SelectionError> {
        for feature in Feature::ALL {
            let value = self.get(feature);
            if !value.is_finite() || value < 0.0 {
                return Err(SelectionError::invalid_config(format!(
                    "weight '{}' must be finite and >= 0, got {value}",
                    feature.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// Built-in weight mappings. `Conversational` favours engagement and pacing;
/// `KeywordFocused` lets caller keywords carry a quarter of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPreset {
    #[default]
    Conversational,
    KeywordFocused,
}

impl WeightPreset {
    pub fn weights(self) -> SelectionWeights {
        match self {
            Self::Conversational => SelectionWeights {
                boundary: 0.22,
                speech_rate: 0.18,
                questions: 0.10,
                exclamations: 0.06,
                lexical_diversity: 0.09,
                duration: 0.14,
                pauses: 0.14,
                keywords: 0.07,
            },
            Self::KeywordFocused => SelectionWeights {
                boundary: 0.30,
                speech_rate: 0.25,
                questions: 0.0,
                exclamations: 0.0,
                lexical_diversity: 0.0,
                duration: 0.0,
                pauses: 0.20,
                keywords: 0.25,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conversational => "conversational",
            Self::KeywordFocused => "keyword_focused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStrategy {
    /// Every sentence-boundary pair whose span fits the duration window.
    BoundaryPairs,
    /// Fixed-step windows trimmed back to the last sentence end.
    SlidingWindow,
    /// Boundary pairs, falling back to sliding windows when boundaries are
    /// too many to enumerate or yield no candidate.
    #[default]
    Adaptive,
}

impl WindowStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BoundaryPairs => "boundary_pairs",
            Self::SlidingWindow => "sliding_window",
            Self::Adaptive => "adaptive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    pub count: usize,
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub preferred_min_secs: f64,
    pub preferred_max_secs: f64,
    /// Required silence between two selected clips.
    pub min_gap_secs: f64,
    pub window_step_secs: f64,
    /// Boundary-pair enumeration is quadratic; above this many boundaries
    /// the adaptive strategy switches to sliding windows.
    pub max_boundaries: usize,
    pub strategy: WindowStrategy,
    pub weights: SelectionWeights,
}

impl SelectorConfig {
    pub const DEFAULT_COUNT: usize = 5;
    pub const DEFAULT_MIN_DURATION_SECS: f64 = 15.0;
    pub const DEFAULT_MAX_DURATION_SECS: f64 = 60.0;

    pub fn load(path: &Path) -> Result<Self, SelectionError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| SelectionError::io("read selector config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| SelectionError::json("parse selector config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SelectionError> {
        let reals = [
            ("min_duration_secs", self.min_duration_secs),
            ("max_duration_secs", self.max_duration_secs),
            ("preferred_min_secs", self.preferred_min_secs),
            ("preferred_max_secs", self.preferred_max_secs),
            ("min_gap_secs", self.min_gap_secs),
            ("window_step_secs", self.window_step_secs),
        ];
        for (name, value) in reals {
            if !value.is_finite() {
                return Err(SelectionError::invalid_config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.count == 0 {
            return Err(SelectionError::invalid_config("count must be >= 1"));
        }
        if self.min_duration_secs < 0.0 || self.max_duration_secs < self.min_duration_secs {
            return Err(SelectionError::invalid_config(format!(
                "duration window must satisfy 0 <= min <= max, got [{}, {}]",
                self.min_duration_secs, self.max_duration_secs
            )));
        }
        if self.preferred_max_secs < self.preferred_min_secs {
            return Err(SelectionError::invalid_config(format!(
                "preferred band must satisfy min <= max, got [{}, {}]",
                self.preferred_min_secs, self.preferred_max_secs
            )));
        }
        if self.window_step_secs <= 0.0 {
            return Err(SelectionError::invalid_config("window_step_secs must be > 0"));
        }
        if self.min_gap_secs < 0.0 {
            return Err(SelectionError::invalid_config("min_gap_secs must be >= 0"));
        }
        self.weights.validate()
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            count: Self::DEFAULT_COUNT,
            min_duration_secs: Self::DEFAULT_MIN_DURATION_SECS,
            max_duration_secs: Self::DEFAULT_MAX_DURATION_SECS,
            preferred_min_secs: 20.0,
            preferred_max_secs: 45.0,
            min_gap_secs: 2.0,
            window_step_secs: 5.0,
            max_boundaries: 4000,
            strategy: WindowStrategy::Adaptive,
            weights: SelectionWeights::default(),
        }
    }
}
