//! Analysis MCP Tools
//!
//! Load a user's logs for a date window and run the analysis core over them.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;

use crate::analysis::activity::{analyze_activity_logs, suggest_exercises_for_goals, ActivityAnalysis, ExerciseSuggestion};
use crate::analysis::calories::{calculate_caloric_needs, CaloricNeeds};
use crate::analysis::model::ProgressModel;
use crate::analysis::nutrition::{analyze_food_logs, suggest_foods_for_nutrients, FoodSuggestion, NutritionAnalysis};
use crate::analysis::projection::{analyze_goal_achievement, model_status, predict_progress, ProjectionEntry};
use crate::analysis::recommend::{generate_recommendations, Recommendations};
use crate::config::MAX_PROJECTION_WEEKS;
use crate::db::Database;
use crate::models::{
    ExerciseLog, ExerciseLogEntry, FoodLog, FoodLogEntry, HealthGoal, Nutrient, Nutrients,
    ProgressEntry, SavedRecommendation, User, UserProfile,
};
use crate::reference::ReferenceData;
use crate::tools::logs::{resolve_range, today};
use crate::tools::users::require_user;

/// Date window shared by the analysis tools
#[derive(Debug, Clone, Copy, Default)]
pub struct Window<'a> {
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
    pub days: u32,
}

struct UserLogs {
    user: User,
    profile: UserProfile,
    start_date: String,
    end_date: String,
    food: Vec<FoodLogEntry>,
    exercise: Vec<ExerciseLogEntry>,
}

/// Load the user and their logs. The profile weight is replaced by the latest
/// progress measurement when one exists.
fn load_user_logs(db: &Database, user_id: i64, window: Window<'_>) -> Result<UserLogs, String> {
    let (start_date, end_date) = resolve_range(window.start, window.end, window.days)?;
    let user = require_user(db, user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let food = FoodLog::list_by_date_range(&conn, user_id, &start_date, &end_date)
        .map_err(|e| format!("Failed to load food logs: {}", e))?
        .into_iter()
        .map(|l| l.entry)
        .collect();
    let exercise = ExerciseLog::list_by_date_range(&conn, user_id, &start_date, &end_date)
        .map_err(|e| format!("Failed to load exercise logs: {}", e))?
        .into_iter()
        .map(|l| l.entry)
        .collect();

    let mut profile = user.profile.clone();
    if let Some(latest) = ProgressEntry::latest(&conn, user_id)
        .map_err(|e| format!("Failed to load progress: {}", e))?
    {
        profile.weight_kg = latest.weight_kg;
    }

    Ok(UserLogs {
        user,
        profile,
        start_date,
        end_date,
        food,
        exercise,
    })
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

// ============================================================================
// Caloric needs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CaloricNeedsResponse {
    pub user_id: i64,
    pub username: String,
    pub weight_kg: f64,
    #[serde(flatten)]
    pub needs: CaloricNeeds,
    /// Reference daily intake targets
    pub daily_targets: Nutrients,
}

pub fn caloric_needs(db: &Database, user_id: i64) -> Result<CaloricNeedsResponse, String> {
    let logs = load_user_logs(
        db,
        user_id,
        Window {
            days: 1,
            ..Default::default()
        },
    )?;

    let mut daily_targets = Nutrients::zero();
    for n in Nutrient::ALL {
        daily_targets.set(n, n.daily_target());
    }

    Ok(CaloricNeedsResponse {
        user_id,
        username: logs.user.username,
        weight_kg: logs.profile.weight_kg,
        needs: calculate_caloric_needs(&logs.profile),
        daily_targets,
    })
}

// ============================================================================
// Gap analysis
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AnalysisReport<T> {
    pub user_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub entries_analyzed: usize,
    #[serde(flatten)]
    pub analysis: T,
}

pub fn analyze_nutrition(
    db: &Database,
    reference: &ReferenceData,
    user_id: i64,
    window: Window<'_>,
) -> Result<AnalysisReport<NutritionAnalysis>, String> {
    let logs = load_user_logs(db, user_id, window)?;
    Ok(AnalysisReport {
        user_id,
        entries_analyzed: logs.food.len(),
        analysis: analyze_food_logs(&logs.food, &reference.foods),
        start_date: logs.start_date,
        end_date: logs.end_date,
    })
}

pub fn analyze_activity(
    db: &Database,
    reference: &ReferenceData,
    user_id: i64,
    window: Window<'_>,
) -> Result<AnalysisReport<ActivityAnalysis>, String> {
    let logs = load_user_logs(db, user_id, window)?;
    Ok(AnalysisReport {
        user_id,
        entries_analyzed: logs.exercise.len(),
        analysis: analyze_activity_logs(&logs.exercise, logs.profile.weight_kg, &reference.exercises),
        start_date: logs.start_date,
        end_date: logs.end_date,
    })
}

// ============================================================================
// Recommendations
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RecommendationReport {
    pub user_id: i64,
    pub generated_on: String,
    pub caloric_needs: CaloricNeeds,
    #[serde(flatten)]
    pub recommendations: Recommendations,
    pub saved_id: Option<i64>,
}

fn build_recommendations(
    logs: &UserLogs,
    reference: &ReferenceData,
    available_days: usize,
    seed: Option<u64>,
) -> Recommendations {
    let nutrition = analyze_food_logs(&logs.food, &reference.foods);
    let activity = analyze_activity_logs(&logs.exercise, logs.profile.weight_kg, &reference.exercises);
    let mut rng = rng_for(seed);
    generate_recommendations(&logs.profile, &nutrition, &activity, reference, available_days, &mut rng)
}

pub fn recommendations(
    db: &Database,
    reference: &ReferenceData,
    user_id: i64,
    window: Window<'_>,
    available_days: usize,
    seed: Option<u64>,
    save: bool,
) -> Result<RecommendationReport, String> {
    let logs = load_user_logs(db, user_id, window)?;
    let recommendations = build_recommendations(&logs, reference, available_days, seed);
    let generated_on = today().format("%Y-%m-%d").to_string();

    let saved_id = if save {
        let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
        let nutrition_plan = json!({
            "recommendations": recommendations.nutrition_recommendations,
            "meal_plan": recommendations.meal_plan,
            "shopping_list": recommendations.shopping_list,
        });
        let exercise_plan = json!({
            "recommendations": recommendations.exercise_recommendations,
            "weekly_plan": recommendations.exercise_plan,
        });
        let saved = SavedRecommendation::save(
            &conn,
            user_id,
            &generated_on,
            &nutrition_plan,
            &exercise_plan,
            &logs.profile.goals,
        )
        .map_err(|e| format!("Failed to save recommendations: {}", e))?;
        tracing::info!("Saved recommendations {} for user {}", saved.id, user_id);
        Some(saved.id)
    } else {
        None
    };

    Ok(RecommendationReport {
        user_id,
        generated_on,
        caloric_needs: calculate_caloric_needs(&logs.profile),
        recommendations,
        saved_id,
    })
}

#[derive(Debug, Serialize)]
pub struct SavedRecommendationsResponse {
    pub user_id: i64,
    pub saved: Vec<SavedRecommendation>,
    pub total: usize,
}

pub fn list_saved_recommendations(
    db: &Database,
    user_id: i64,
    limit: usize,
) -> Result<SavedRecommendationsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let saved = SavedRecommendation::list_for_user(&conn, user_id, limit)
        .map_err(|e| format!("Failed to list saved recommendations: {}", e))?;
    let total = saved.len();
    Ok(SavedRecommendationsResponse {
        user_id,
        saved,
        total,
    })
}

// ============================================================================
// Projection
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ProgressForecast {
    pub user_id: i64,
    pub model_status: String,
    pub starting_weight_kg: f64,
    pub projections: Vec<ProjectionEntry>,
    pub goal_analysis: BTreeMap<HealthGoal, String>,
}

/// Project progress under a freshly generated plan
#[allow(clippy::too_many_arguments)]
pub fn forecast_progress(
    db: &Database,
    reference: &ReferenceData,
    model: Option<&dyn ProgressModel>,
    user_id: i64,
    window: Window<'_>,
    weeks: usize,
    available_days: usize,
    seed: Option<u64>,
) -> Result<ProgressForecast, String> {
    if weeks == 0 || weeks > MAX_PROJECTION_WEEKS {
        return Err(format!("weeks must be between 1 and {}", MAX_PROJECTION_WEEKS));
    }
    let logs = load_user_logs(db, user_id, window)?;
    let plan = build_recommendations(&logs, reference, available_days, seed);

    let projections = predict_progress(
        &logs.profile,
        &plan.meal_plan,
        &plan.exercise_plan,
        model,
        weeks,
        today(),
    );
    let goal_analysis = analyze_goal_achievement(&projections, logs.profile.goals.iter().copied());

    Ok(ProgressForecast {
        user_id,
        model_status: model_status(model),
        starting_weight_kg: logs.profile.weight_kg,
        projections,
        goal_analysis,
    })
}

// ============================================================================
// Suggestions
// ============================================================================

pub fn suggest_foods(
    reference: &ReferenceData,
    nutrients: &[String],
) -> Result<BTreeMap<Nutrient, Vec<FoodSuggestion>>, String> {
    let parsed = nutrients
        .iter()
        .map(|n| {
            Nutrient::from_str(n).ok_or_else(|| {
                format!(
                    "Unknown nutrient '{}'. Valid: calories, protein, carbs, fat, fiber",
                    n
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(suggest_foods_for_nutrients(&reference.foods, &parsed))
}

/// Suggestions for explicit goals, or the user's stored goals when none are given
pub fn suggest_exercises(
    db: &Database,
    reference: &ReferenceData,
    user_id: Option<i64>,
    goals: &[String],
) -> Result<BTreeMap<HealthGoal, Vec<ExerciseSuggestion>>, String> {
    let goals: Vec<HealthGoal> = if goals.is_empty() {
        let user_id = user_id.ok_or("Provide goals or a user_id")?;
        require_user(db, user_id)?.profile.goals.into_iter().collect()
    } else {
        goals
            .iter()
            .map(|g| HealthGoal::from_str(g).ok_or_else(|| format!("Unknown goal '{}'", g)))
            .collect::<Result<_, _>>()?
    };

    Ok(suggest_exercises_for_goals(&goals, &reference.exercises, &reference.tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::tests::identity_like_model;
    use crate::models::{Intensity, MealType, ProgressCreate, UserUpdate};
    use crate::tools::logs::tests::db_with_user;
    use crate::tools::logs::{log_exercise, log_food, log_progress};
    use crate::tools::users::update_user;

    fn window() -> Window<'static> {
        Window {
            start: Some("2024-03-01"),
            end: Some("2024-03-31"),
            days: 30,
        }
    }

    fn seed_logs(db: &Database, reference: &ReferenceData, user_id: i64) {
        for (item, macros) in [
            ("Oatmeal", [300.0, 10.0, 54.0, 5.0, 8.0]),
            ("Chicken Breast", [500.0, 20.0, 0.0, 7.0, 0.0]),
            ("Rice", [300.0, 5.0, 66.0, 1.0, 1.0]),
            ("Apple", [100.0, 5.0, 25.0, 0.3, 1.0]),
        ] {
            let entry = FoodLogEntry::complete("2024-03-10", MealType::Lunch, item, 100.0, macros);
            log_food(db, reference, user_id, entry, false).unwrap();
        }
        for (t, min) in [("Running", 40.0), ("Yoga", 30.0), ("Cycling", 45.0)] {
            let entry = ExerciseLogEntry::new("2024-03-11", t, min, Intensity::Moderate);
            log_exercise(db, reference, user_id, entry).unwrap();
        }
    }

    #[test]
    fn test_analyze_nutrition_over_window() {
        let (db, user_id) = db_with_user();
        let reference = ReferenceData::builtin();
        seed_logs(&db, &reference, user_id);

        let report = analyze_nutrition(&db, &reference, user_id, window()).unwrap();
        assert_eq!(report.entries_analyzed, 4);
        assert_eq!(report.analysis.days_logged, 1);
        assert!(report.analysis.has_gap(Nutrient::Calories));
        assert!(report.analysis.has_gap(Nutrient::Fiber));
    }

    #[test]
    fn test_empty_window_returns_defaults() {
        let (db, user_id) = db_with_user();
        let reference = ReferenceData::builtin();
        let empty = Window {
            start: Some("2020-01-01"),
            end: Some("2020-01-31"),
            days: 30,
        };

        let nutrition = analyze_nutrition(&db, &reference, user_id, empty).unwrap();
        assert_eq!(nutrition.analysis, NutritionAnalysis::default_for_empty());
        let activity = analyze_activity(&db, &reference, user_id, empty).unwrap();
        assert_eq!(activity.analysis, ActivityAnalysis::default_for_empty());
    }

    #[test]
    fn test_latest_progress_weight_is_used() {
        let (db, user_id) = db_with_user();
        log_progress(
            &db,
            user_id,
            ProgressCreate {
                date: "2024-03-15".to_string(),
                weight_kg: 76.0,
                body_fat_percentage: None,
                muscle_mass_kg: None,
                energy_level: None,
                sleep_hours: None,
            },
        )
        .unwrap();

        let needs = caloric_needs(&db, user_id).unwrap();
        assert_eq!(needs.weight_kg, 76.0);
        assert_eq!(needs.daily_targets.protein, 50.0);
    }

    #[test]
    fn test_recommendations_saved_and_listed() {
        let (db, user_id) = db_with_user();
        let reference = ReferenceData::builtin();
        seed_logs(&db, &reference, user_id);

        let report = recommendations(&db, &reference, user_id, window(), 3, Some(7), true).unwrap();
        assert!(report.saved_id.is_some());
        assert_eq!(report.recommendations.meal_plan.len(), 7);
        assert_eq!(report.recommendations.exercise_plan.len(), 3);

        let unsaved = recommendations(&db, &reference, user_id, window(), 3, Some(7), false).unwrap();
        assert!(unsaved.saved_id.is_none());

        let listed = list_saved_recommendations(&db, user_id, 10).unwrap();
        assert_eq!(listed.total, 1);
    }

    #[test]
    fn test_forecast_with_and_without_model() {
        let (db, user_id) = db_with_user();
        let reference = ReferenceData::builtin();
        update_user(
            &db,
            user_id,
            UserUpdate {
                goals: Some([HealthGoal::WeightLoss].into_iter().collect()),
                ..Default::default()
            },
        )
        .unwrap();

        let linear = forecast_progress(&db, &reference, None, user_id, window(), 4, 3, Some(1)).unwrap();
        assert_eq!(linear.projections.len(), 4);
        assert_eq!(
            linear.goal_analysis[&HealthGoal::WeightLoss],
            "Not on track - no weight loss predicted"
        );

        let model = identity_like_model();
        let trained =
            forecast_progress(&db, &reference, Some(&model), user_id, window(), 4, 3, Some(1)).unwrap();
        assert_eq!(trained.projections.len(), 4);
        assert_eq!(trained.projections[3].weight, 78.0);
        assert!(trained.model_status.starts_with("trained"));
    }

    #[test]
    fn test_forecast_rejects_out_of_range_weeks() {
        let (db, user_id) = db_with_user();
        let reference = ReferenceData::builtin();

        for weeks in [0, MAX_PROJECTION_WEEKS + 1, usize::MAX] {
            assert!(forecast_progress(&db, &reference, None, user_id, window(), weeks, 3, Some(1)).is_err());
        }
        let longest =
            forecast_progress(&db, &reference, None, user_id, window(), MAX_PROJECTION_WEEKS, 3, Some(1)).unwrap();
        assert_eq!(longest.projections.len(), MAX_PROJECTION_WEEKS);
    }

    #[test]
    fn test_suggestions() {
        let (db, user_id) = db_with_user();
        let reference = ReferenceData::builtin();

        let foods = suggest_foods(&reference, &["protein".to_string()]).unwrap();
        assert!(!foods[&Nutrient::Protein].is_empty());
        assert!(suggest_foods(&reference, &["vitamin_q".to_string()]).is_err());

        let exercises = suggest_exercises(&db, &reference, None, &["strength".to_string()]).unwrap();
        assert!(exercises.contains_key(&HealthGoal::Strength));
        assert!(suggest_exercises(&db, &reference, None, &[]).is_err());
        // stored goals are empty
        assert!(suggest_exercises(&db, &reference, Some(user_id), &[]).unwrap().is_empty());
    }
}
