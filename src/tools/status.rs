//! NutriFit Status Tool
//!
//! Provides runtime status information about the NutriFit service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants
pub const USAGE_INSTRUCTIONS: &str = r#"
# NutriFit Usage Instructions

NutriFit analyzes a user's food and exercise logs, finds nutritional and
fitness gaps, and builds personalized plans and progress projections.

## 1. Create or find the user

**Tool:** `create_user`
- `username`, `age`, `gender` (Male/Female/Other), `height_cm`, `weight_kg`
- `activity_level`: Low, Moderate, High (default Moderate)
- `goals`: any of weight_loss, muscle_gain, heart_health, diabetes_management,
  energy_boost, fitness_improvement, flexibility, stress_relief, endurance, strength
- `dietary_preferences`: vegetarian, vegan, diabetic, hypertension, gluten_free
- `cultural_background`: Indian, Mediterranean, Asian, Western, Other

**Tool:** `get_user` by `id` or `username`.

## 2. Log data

Dates use ISO format: YYYY-MM-DD.

**Tool:** `log_food`
- `user_id`, `date`, `meal_type` (breakfast/lunch/dinner/snack), `food_item`, `quantity_g`
- Macros (`calories`, `protein_g`, `carbs_g`, `fat_g`, `fiber_g`) are optional.
  Known foods are filled from the catalog; anything still missing is imputed
  during analysis from other entries of the same food.

**Tool:** `log_exercise`
- `user_id`, `date`, `exercise_type`, `duration_min`, `intensity` (low/moderate/high)
- `calories_burned` is optional; it is estimated as MET × weight × hours.
  Unknown exercise types use MET 5.0.

**Tool:** `log_progress`
- `user_id`, `date`, `weight_kg`, optional body fat %, muscle mass, energy (1-10), sleep hours.
  The latest weight recorded here is used by every analysis.

List tools: `list_food_logs`, `list_exercise_logs` (date range, defaults to the
last 30 days) and `list_progress`.

## 3. Analyze

- `calculate_caloric_needs`: BMR (Harris-Benedict), activity-adjusted daily calories, BMI, water.
- `analyze_nutrition`: average daily intake over the days logged. A nutrient is
  a gap when the average is below 80% of its daily target
  (calories 2000, protein 50 g, carbs 225 g, fat 65 g, fiber 25 g).
- `analyze_activity`: sessions per week, category mix and fitness gaps
  (cardio under 150 min, fewer than 3 exercise types, fewer than 2 strength
  sessions, no flexibility sessions).

## 4. Plan

- `generate_recommendations`: nutrition, exercise and lifestyle advice, a 7-day
  meal plan, a weekly exercise plan and a shopping list. Pass `save: true` to
  store the plan; review saved plans with `list_saved_recommendations`.
  `available_days` (default 3) sets the number of training days; `seed` makes
  the exercise picks reproducible.
- `suggest_foods`: foods richest in the given nutrients (protein, fiber, calories).
- `suggest_exercises`: exercises for the given goals or the user's stored goals.

## 5. Project

**Tool:** `predict_progress`
- Projects weekly weight, BMI and energy for `weeks` (default 4) under a freshly
  generated plan, and interprets the final week against the user's goals.
- Without a trained model the projection is a conservative linear estimate;
  `nutrifit_status` reports which mode is active.
"#;

/// Runtime status of the NutriFit service
#[derive(Debug, Clone, Serialize)]
pub struct NutrifitStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Reference data and model
    pub exercise_catalog_size: usize,
    pub food_catalog_size: usize,
    pub reference_source: String,
    pub model_status: String,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Reference/model facts fixed at startup
#[derive(Debug, Clone)]
pub struct ServiceFacts {
    pub exercise_catalog_size: usize,
    pub food_catalog_size: usize,
    pub reference_source: String,
    pub model_status: String,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    facts: ServiceFacts,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf, facts: ServiceFacts) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            facts,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> NutrifitStatus {
        let build_info = BuildInfo::current();

        // Get database size if it exists
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NutrifitStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            exercise_catalog_size: self.facts.exercise_catalog_size,
            food_catalog_size: self.facts.food_catalog_size,
            reference_source: self.facts.reference_source.clone(),
            model_status: self.facts.model_status.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
