//! Exercise catalog
//!
//! Exercise type to MET value, category, typical intensity and equipment.
//! Lookups are case-insensitive; unknown types fall back to [`DEFAULT_MET`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Intensity;

/// MET used for exercise types missing from the catalog
pub const DEFAULT_MET: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExerciseCategory {
    Cardio,
    Strength,
    Sports,
    Flexibility,
    Outdoor,
    Combat,
    Recreation,
}

impl ExerciseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::Cardio => "Cardio",
            ExerciseCategory::Strength => "Strength",
            ExerciseCategory::Sports => "Sports",
            ExerciseCategory::Flexibility => "Flexibility",
            ExerciseCategory::Outdoor => "Outdoor",
            ExerciseCategory::Combat => "Combat",
            ExerciseCategory::Recreation => "Recreation",
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseInfo {
    pub name: String,
    pub met: f64,
    pub category: ExerciseCategory,
    pub intensity: Intensity,
    pub equipment: Option<String>,
}

/// Indexed exercise table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ExerciseInfo>", into = "Vec<ExerciseInfo>")]
pub struct ExerciseCatalog {
    entries: Vec<ExerciseInfo>,
    index: HashMap<String, usize>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl From<Vec<ExerciseInfo>> for ExerciseCatalog {
    fn from(entries: Vec<ExerciseInfo>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            catalog.upsert(entry);
        }
        catalog
    }
}

impl From<ExerciseCatalog> for Vec<ExerciseInfo> {
    fn from(catalog: ExerciseCatalog) -> Self {
        catalog.entries
    }
}

impl ExerciseCatalog {
    /// Insert or replace by name. Returns true when an entry was replaced.
    pub fn upsert(&mut self, entry: ExerciseInfo) -> bool {
        match self.index.get(&key(&entry.name)) {
            Some(&i) => {
                self.entries[i] = entry;
                true
            }
            None => {
                self.index.insert(key(&entry.name), self.entries.len());
                self.entries.push(entry);
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ExerciseInfo> {
        self.index.get(&key(name)).map(|&i| &self.entries[i])
    }

    /// MET value for an exercise type, [`DEFAULT_MET`] when unknown
    pub fn met(&self, name: &str) -> f64 {
        self.get(name).map(|e| e.met).unwrap_or(DEFAULT_MET)
    }

    pub fn category(&self, name: &str) -> Option<ExerciseCategory> {
        self.get(name).map(|e| e.category)
    }

    pub fn in_category(&self, category: ExerciseCategory) -> Vec<&ExerciseInfo> {
        self.entries.iter().filter(|e| e.category == category).collect()
    }

    pub fn all(&self) -> &[ExerciseInfo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn builtin() -> Self {
        use ExerciseCategory::*;
        use Intensity::{High, Low, Moderate};

        let rows: &[(&str, f64, ExerciseCategory, Intensity, Option<&str>)] = &[
            ("Walking", 3.5, Cardio, Low, None),
            ("Running", 8.0, Cardio, High, None),
            ("Jogging", 6.0, Cardio, Moderate, None),
            ("Cycling", 6.8, Cardio, Moderate, Some("Bicycle")),
            ("Swimming", 6.0, Cardio, Moderate, Some("Pool")),
            ("Rowing", 8.5, Cardio, High, Some("Rowing Machine")),
            ("Elliptical", 5.0, Cardio, Moderate, Some("Elliptical Machine")),
            ("Stationary Bike", 4.0, Cardio, Low, Some("Stationary Bike")),
            ("Treadmill", 5.0, Cardio, Moderate, Some("Treadmill")),
            ("Jumping Rope", 10.0, Cardio, High, Some("Jump Rope")),
            ("Dancing", 4.8, Cardio, Moderate, None),
            ("Aerobics", 6.0, Cardio, Moderate, None),
            ("Weight Training", 6.0, Strength, High, Some("Weights")),
            ("Bodyweight Exercises", 3.8, Strength, Moderate, None),
            ("Push-ups", 3.8, Strength, Moderate, None),
            ("Pull-ups", 8.0, Strength, High, Some("Pull-up Bar")),
            ("Squats", 5.0, Strength, Moderate, None),
            ("Deadlifts", 6.0, Strength, High, Some("Barbell")),
            ("Bench Press", 6.0, Strength, High, Some("Bench")),
            ("Resistance Training", 6.0, Strength, Moderate, Some("Resistance Bands")),
            ("Kettlebell Training", 8.0, Strength, High, Some("Kettlebell")),
            ("Basketball", 6.5, Sports, Moderate, Some("Ball")),
            ("Tennis", 5.0, Sports, Moderate, Some("Racket")),
            ("Soccer", 7.0, Sports, High, Some("Ball")),
            ("Volleyball", 4.0, Sports, Moderate, Some("Ball")),
            ("Badminton", 4.5, Sports, Moderate, Some("Racket")),
            ("Table Tennis", 4.0, Sports, Moderate, Some("Paddle")),
            ("Golf", 3.5, Sports, Low, Some("Golf Clubs")),
            ("Baseball", 5.0, Sports, Moderate, Some("Bat")),
            ("Football", 8.0, Sports, High, Some("Ball")),
            ("Hockey", 8.0, Sports, High, Some("Stick")),
            ("Yoga", 2.5, Flexibility, Low, Some("Mat")),
            ("Pilates", 3.0, Flexibility, Low, Some("Mat")),
            ("Stretching", 2.3, Flexibility, Low, Some("Mat")),
            ("Tai Chi", 3.0, Flexibility, Low, None),
            ("Meditation", 1.0, Flexibility, Low, None),
            ("Hiking", 6.0, Outdoor, Moderate, None),
            ("Rock Climbing", 8.0, Outdoor, High, Some("Climbing Gear")),
            ("Mountain Biking", 8.5, Outdoor, High, Some("Mountain Bike")),
            ("Kayaking", 5.0, Outdoor, Moderate, Some("Kayak")),
            ("Surfing", 3.0, Outdoor, Low, Some("Surfboard")),
            ("Boxing", 8.0, Combat, High, Some("Gloves")),
            ("Martial Arts", 5.0, Combat, Moderate, None),
            ("Kickboxing", 8.0, Combat, High, Some("Gloves")),
            ("Wrestling", 6.0, Combat, High, None),
            ("Bowling", 3.0, Recreation, Low, Some("Bowling Ball")),
            ("Skateboarding", 5.0, Recreation, Moderate, Some("Skateboard")),
            ("Rollerblading", 7.0, Recreation, Moderate, Some("Rollerblades")),
            ("Frisbee", 3.0, Recreation, Low, Some("Frisbee")),
        ];

        rows.iter()
            .map(|&(name, met, category, intensity, equipment)| ExerciseInfo {
                name: name.to_string(),
                met,
                category,
                intensity,
                equipment: equipment.map(str::to_string),
            })
            .collect::<Vec<_>>()
            .into()
    }
}
