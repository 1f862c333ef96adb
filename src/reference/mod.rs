//! Static reference data
//!
//! The exercise and food catalogs plus the recommendation tables. Built once
//! at startup and shared read-only.

mod exercises;
mod foods;
mod tables;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub use exercises::{ExerciseCatalog, ExerciseCategory, ExerciseInfo, DEFAULT_MET};
pub use foods::{FoodCatalog, FoodInfo};
pub use tables::{CulturePreferences, RecommendationTables, RestrictionGuide, ShoppingRule};

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Failed to read reference file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid reference JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid reference entry '{name}': {reason}")]
    InvalidEntry { name: String, reason: String },
}

/// Everything the analyzers look up
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub exercises: ExerciseCatalog,
    pub foods: FoodCatalog,
    pub tables: RecommendationTables,
}

/// Shape of an override file. Entries are merged by name onto the built-in data.
#[derive(Debug, Default, Deserialize)]
struct ReferenceOverride {
    #[serde(default)]
    exercises: Vec<ExerciseInfo>,
    #[serde(default)]
    foods: Vec<FoodInfo>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

impl ReferenceData {
    pub fn builtin() -> Self {
        Self {
            exercises: ExerciseCatalog::builtin(),
            foods: FoodCatalog::builtin(),
            tables: RecommendationTables::builtin(),
        }
    }

    /// Built-in data with exercise/food overrides from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceError> {
        let path_str = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|source| ReferenceError::Io {
            path: path_str.clone(),
            source,
        })?;
        let overrides: ReferenceOverride =
            serde_json::from_str(&raw).map_err(|source| ReferenceError::Json {
                path: path_str.clone(),
                source,
            })?;

        let mut data = Self::builtin();
        data.apply(overrides)?;
        Ok(data)
    }

    /// Overrides from `path` when given, otherwise the built-in data. Also
    /// returns a label naming the source.
    pub fn load(path: Option<&Path>) -> Result<(Self, String), ReferenceError> {
        match path {
            Some(p) => {
                let data = Self::from_json_file(p)?;
                Ok((data, p.display().to_string()))
            }
            None => Ok((Self::builtin(), "builtin".to_string())),
        }
    }

    fn apply(&mut self, overrides: ReferenceOverride) -> Result<(), ReferenceError> {
        for key in overrides.unknown.keys() {
            tracing::warn!("Ignoring unknown reference section '{}'", key);
        }

        let mut replaced = 0;
        let mut added = 0;

        for exercise in overrides.exercises {
            if !(exercise.met.is_finite() && exercise.met > 0.0) {
                return Err(ReferenceError::InvalidEntry {
                    name: exercise.name,
                    reason: format!("MET must be positive, got {}", exercise.met),
                });
            }
            if self.exercises.upsert(exercise) {
                replaced += 1;
            } else {
                added += 1;
            }
        }

        for food in overrides.foods {
            let n = food.per_100g;
            let values = [n.calories, n.protein, n.carbs, n.fat, n.fiber];
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(ReferenceError::InvalidEntry {
                    name: food.name,
                    reason: "nutrient values must be non-negative".to_string(),
                });
            }
            if self.foods.upsert(food) {
                replaced += 1;
            } else {
                added += 1;
            }
        }

        tracing::info!(
            "Reference overrides applied: {} added, {} replaced",
            added,
            replaced
        );
        Ok(())
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_json(json: &str) -> Result<ReferenceData, ReferenceError> {
        let overrides: ReferenceOverride = serde_json::from_str(json).unwrap();
        let mut data = ReferenceData::builtin();
        data.apply(overrides)?;
        Ok(data)
    }

    #[test]
    fn test_override_adds_and_replaces() {
        let data = apply_json(
            r#"{
                "exercises": [
                    {"name": "Padel", "met": 6.0, "category": "Sports", "intensity": "moderate", "equipment": "Racket"},
                    {"name": "Walking", "met": 3.8, "category": "Cardio", "intensity": "low", "equipment": null}
                ],
                "foods": [
                    {"name": "Paneer", "per_100g": {"calories": 265, "protein": 18.3, "carbs": 1.2, "fat": 20.8, "fiber": 0}, "category": "Dairy"}
                ],
                "colours": {}
            }"#,
        )
        .unwrap();

        assert_eq!(data.exercises.met("padel"), 6.0);
        assert_eq!(data.exercises.met("walking"), 3.8);
        assert_eq!(data.foods.category("paneer"), Some("Dairy"));
    }

    #[test]
    fn test_override_rejects_non_positive_met() {
        let result = apply_json(
            r#"{"exercises": [{"name": "Napping", "met": 0, "category": "Recreation", "intensity": "low", "equipment": null}]}"#,
        );
        assert!(matches!(result, Err(ReferenceError::InvalidEntry { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ReferenceData::from_json_file("/nonexistent/nutrifit-reference.json");
        assert!(matches!(result, Err(ReferenceError::Io { .. })));
    }
}
