//! Gap analysis result types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single metric falling short of its guideline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub current: f64,
    pub recommended: f64,
    pub deficit: f64,
}

impl Gap {
    /// Build a gap against `recommended`; the deficit never goes below zero
    pub fn new(current: f64, recommended: f64) -> Self {
        Self {
            current,
            recommended,
            deficit: (recommended - current).max(0.0),
        }
    }
}

/// Metric name to gap. Only metrics that fall short appear.
pub type GapResult<K> = BTreeMap<K, Gap>;

/// Fitness metrics checked by the activity analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessMetric {
    CardioDuration,
    ExerciseVariety,
    StrengthTraining,
    Flexibility,
}

impl FitnessMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessMetric::CardioDuration => "cardio_duration",
            FitnessMetric::ExerciseVariety => "exercise_variety",
            FitnessMetric::StrengthTraining => "strength_training",
            FitnessMetric::Flexibility => "flexibility",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deficit_is_clamped() {
        assert_eq!(Gap::new(30.0, 50.0).deficit, 20.0);
        assert_eq!(Gap::new(60.0, 50.0).deficit, 0.0);
    }

    #[test]
    fn test_gap_result_serializes_with_metric_keys() {
        let mut gaps: GapResult<FitnessMetric> = GapResult::new();
        gaps.insert(FitnessMetric::StrengthTraining, Gap::new(0.0, 2.0));
        let json = serde_json::to_value(&gaps).unwrap();
        assert_eq!(json["strength_training"]["deficit"], 2.0);
    }
}
