//! Data models
//!
//! Domain records shared by the analyzers, plus their SQLite storage.

mod exercise_log;
mod food_log;
mod gap;
mod nutrition;
mod profile;
mod progress;
mod recommendation;

pub use exercise_log::{ExerciseLog, ExerciseLogEntry, Intensity};
pub use food_log::{FoodLog, FoodLogEntry, MealType};
pub use gap::{FitnessMetric, Gap, GapResult};
pub use nutrition::{Nutrient, Nutrients};
pub use profile::{
    activity_multiplier, ActivityLevel, CulturalBackground, DietaryPreference, Gender,
    HealthGoal, User, UserCreate, UserProfile, UserUpdate,
};
pub use progress::{ProgressCreate, ProgressEntry};
pub use recommendation::SavedRecommendation;
