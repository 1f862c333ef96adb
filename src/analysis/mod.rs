//! Gap analysis, recommendation and projection core
//!
//! Everything here is synchronous and free of storage or I/O; callers load
//! logs and reference data and pass them in.

pub mod activity;
pub mod calories;
pub mod model;
pub mod nutrition;
pub mod projection;
pub mod recommend;

pub use activity::{
    analyze_activity_logs, create_weekly_plan, suggest_exercises_for_goals, ActivityAnalysis,
    FitnessLevel, WeeklyExercisePlan,
};
pub use calories::{calculate_bmi, calculate_bmr, calculate_caloric_needs, CaloricNeeds};
pub use model::{FittedRegression, ModelLoadError, PredictionError, ProgressModel};
pub use nutrition::{analyze_food_logs, suggest_foods_for_nutrients, NutritionAnalysis};
pub use projection::{analyze_goal_achievement, model_status, predict_progress, ProjectionEntry};
pub use recommend::{generate_recommendations, MealPlan, Recommendations};
