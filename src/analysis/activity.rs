//! Activity gap analysis
//!
//! Calories from MET values, weekly frequency, duration and variety checks
//! against fixed fitness guidelines, plus the weekly exercise planner.

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{
    ActivityLevel, ExerciseLogEntry, FitnessMetric, Gap, GapResult, HealthGoal, Intensity,
};
use crate::reference::{ExerciseCatalog, ExerciseCategory, ExerciseInfo, RecommendationTables};

/// Days a log is assumed to cover when converting counts to a weekly rate
pub const ASSUMED_LOG_DAYS: f64 = 30.0;

pub const WEEKLY_CARDIO_MINUTES: f64 = 150.0;
pub const MIN_EXERCISE_VARIETY: usize = 3;
pub const MIN_STRENGTH_SESSIONS: usize = 2;
pub const MIN_FLEXIBILITY_SESSIONS: usize = 1;
/// Recommended flexibility sessions once the minimum is missed
pub const RECOMMENDED_FLEXIBILITY_SESSIONS: usize = 2;

const COMMON_EXERCISES_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCount {
    pub exercise_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPatterns {
    pub exercises_per_week: f64,
    pub common_exercises: Vec<ExerciseCount>,
    pub avg_duration_minutes: f64,
    pub total_duration_minutes: f64,
    pub intensity_distribution: BTreeMap<Intensity, f64>,
    /// Share of catalogued sessions per category; unknown types are left out
    pub category_distribution: BTreeMap<ExerciseCategory, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityAnalysis {
    pub activity_patterns: ActivityPatterns,
    pub fitness_gaps: GapResult<FitnessMetric>,
    pub recommendations: Vec<String>,
    pub total_calories_burned: f64,
}

/// MET × weight × hours. Never negative.
pub fn calculate_calories_burned(met: f64, weight_kg: f64, duration_min: f64) -> f64 {
    (met * weight_kg * duration_min / 60.0).max(0.0)
}

/// Calories for one session, using the logged value when present
pub fn session_calories(
    entry: &ExerciseLogEntry,
    weight_kg: f64,
    exercises: &ExerciseCatalog,
) -> f64 {
    entry.calories_burned.unwrap_or_else(|| {
        calculate_calories_burned(exercises.met(&entry.exercise_type), weight_kg, entry.duration_min)
    })
}

/// Weekly session rate from a log assumed to span [`ASSUMED_LOG_DAYS`]
pub fn exercises_per_week(count: usize) -> f64 {
    count as f64 / ASSUMED_LOG_DAYS * 7.0
}

pub fn analyze_activity_logs(
    logs: &[ExerciseLogEntry],
    weight_kg: f64,
    exercises: &ExerciseCatalog,
) -> ActivityAnalysis {
    if logs.is_empty() {
        return ActivityAnalysis::default_for_empty();
    }

    let total_calories_burned = logs
        .iter()
        .map(|e| session_calories(e, weight_kg, exercises))
        .sum();
    let activity_patterns = analyze_activity_patterns(logs, exercises);
    let fitness_gaps = identify_fitness_gaps(logs, exercises);
    let recommendations = exercise_recommendations(&activity_patterns, &fitness_gaps);

    tracing::debug!(
        "Activity analysis: {} sessions, {:.0} min, {} gaps",
        logs.len(),
        activity_patterns.total_duration_minutes,
        fitness_gaps.len()
    );

    ActivityAnalysis {
        activity_patterns,
        fitness_gaps,
        recommendations,
        total_calories_burned,
    }
}

fn distribution<K: Ord>(counts: BTreeMap<K, usize>) -> BTreeMap<K, f64> {
    let total: usize = counts.values().sum();
    let total = total.max(1) as f64;
    counts.into_iter().map(|(k, c)| (k, c as f64 / total)).collect()
}

pub fn analyze_activity_patterns(
    logs: &[ExerciseLogEntry],
    exercises: &ExerciseCatalog,
) -> ActivityPatterns {
    let total_duration: f64 = logs.iter().map(|e| e.duration_min).sum();

    let mut type_counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut intensity_counts: BTreeMap<Intensity, usize> = BTreeMap::new();
    let mut category_counts: BTreeMap<ExerciseCategory, usize> = BTreeMap::new();
    for entry in logs {
        *type_counts.entry(entry.exercise_type.trim()).or_default() += 1;
        *intensity_counts.entry(entry.intensity).or_default() += 1;
        if let Some(category) = exercises.category(&entry.exercise_type) {
            *category_counts.entry(category).or_default() += 1;
        }
    }

    let mut common_exercises: Vec<ExerciseCount> = type_counts
        .into_iter()
        .map(|(t, count)| ExerciseCount { exercise_type: t.to_string(), count })
        .collect();
    common_exercises.sort_by(|a, b| b.count.cmp(&a.count));
    common_exercises.truncate(COMMON_EXERCISES_LIMIT);

    ActivityPatterns {
        exercises_per_week: exercises_per_week(logs.len()),
        common_exercises,
        avg_duration_minutes: total_duration / logs.len().max(1) as f64,
        total_duration_minutes: total_duration,
        intensity_distribution: distribution(intensity_counts),
        category_distribution: distribution(category_counts),
    }
}

pub fn identify_fitness_gaps(
    logs: &[ExerciseLogEntry],
    exercises: &ExerciseCatalog,
) -> GapResult<FitnessMetric> {
    let mut gaps = GapResult::new();

    // Guideline minutes are compared against every logged session, not just cardio
    let total_duration: f64 = logs.iter().map(|e| e.duration_min).sum();
    if total_duration < WEEKLY_CARDIO_MINUTES {
        gaps.insert(
            FitnessMetric::CardioDuration,
            Gap::new(total_duration, WEEKLY_CARDIO_MINUTES),
        );
    }

    let distinct: BTreeSet<String> = logs
        .iter()
        .map(|e| e.exercise_type.trim().to_lowercase())
        .collect();
    if distinct.len() < MIN_EXERCISE_VARIETY {
        gaps.insert(
            FitnessMetric::ExerciseVariety,
            Gap::new(distinct.len() as f64, MIN_EXERCISE_VARIETY as f64),
        );
    }

    let count_in = |category: ExerciseCategory| {
        logs.iter()
            .filter(|e| exercises.category(&e.exercise_type) == Some(category))
            .count()
    };

    let strength = count_in(ExerciseCategory::Strength);
    if strength < MIN_STRENGTH_SESSIONS {
        gaps.insert(
            FitnessMetric::StrengthTraining,
            Gap::new(strength as f64, MIN_STRENGTH_SESSIONS as f64),
        );
    }

    let flexibility = count_in(ExerciseCategory::Flexibility);
    if flexibility < MIN_FLEXIBILITY_SESSIONS {
        gaps.insert(
            FitnessMetric::Flexibility,
            Gap::new(flexibility as f64, RECOMMENDED_FLEXIBILITY_SESSIONS as f64),
        );
    }

    gaps
}

pub fn exercise_recommendations(
    patterns: &ActivityPatterns,
    gaps: &GapResult<FitnessMetric>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    for (metric, gap) in gaps {
        let line = match metric {
            FitnessMetric::CardioDuration => format!(
                "Increase cardio by {} minutes per week. Try walking, cycling, or swimming.",
                gap.deficit
            ),
            FitnessMetric::StrengthTraining => format!(
                "Add {} strength training sessions per week. Focus on major muscle groups.",
                gap.deficit
            ),
            FitnessMetric::ExerciseVariety => {
                "Try new activities to increase exercise variety and prevent boredom.".to_string()
            }
            FitnessMetric::Flexibility => {
                "Include yoga or stretching sessions for flexibility and recovery.".to_string()
            }
        };
        recommendations.push(line);
    }

    if patterns.exercises_per_week < 3.0 {
        recommendations.push(
            "Aim for at least 3-4 exercise sessions per week for optimal health benefits."
                .to_string(),
        );
    }

    if patterns.avg_duration_minutes < 30.0 {
        recommendations.push(
            "Try to exercise for at least 30 minutes per session for better results.".to_string(),
        );
    }

    recommendations
}

impl ActivityAnalysis {
    /// Canned result when there is nothing logged
    pub fn default_for_empty() -> Self {
        let fitness_gaps = [
            (FitnessMetric::CardioDuration, WEEKLY_CARDIO_MINUTES),
            (FitnessMetric::StrengthTraining, MIN_STRENGTH_SESSIONS as f64),
            (FitnessMetric::Flexibility, RECOMMENDED_FLEXIBILITY_SESSIONS as f64),
        ]
        .into_iter()
        .map(|(metric, target)| (metric, Gap::new(0.0, target)))
        .collect();

        Self {
            activity_patterns: ActivityPatterns {
                exercises_per_week: 0.0,
                common_exercises: Vec::new(),
                avg_duration_minutes: 0.0,
                total_duration_minutes: 0.0,
                intensity_distribution: BTreeMap::new(),
                category_distribution: BTreeMap::new(),
            },
            fitness_gaps,
            recommendations: vec![
                "Start with 150 minutes of moderate cardio per week".to_string(),
                "Include 2 strength training sessions weekly".to_string(),
                "Add flexibility exercises like yoga or stretching".to_string(),
                "Begin with activities you enjoy to build consistency".to_string(),
            ],
            total_calories_burned: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSuggestion {
    pub exercise: String,
    pub met: f64,
    pub category: ExerciseCategory,
    pub intensity: Intensity,
}

/// Catalog exercises suited to each goal. Goals without a mapping are omitted;
/// mapped names missing from the catalog are skipped.
pub fn suggest_exercises_for_goals(
    goals: &[HealthGoal],
    exercises: &ExerciseCatalog,
    tables: &RecommendationTables,
) -> BTreeMap<HealthGoal, Vec<ExerciseSuggestion>> {
    goals
        .iter()
        .filter_map(|goal| {
            let names = tables.goal_exercise_types.get(goal)?;
            let details = names
                .iter()
                .filter_map(|name| exercises.get(name))
                .map(|info| ExerciseSuggestion {
                    exercise: info.name.clone(),
                    met: info.met,
                    category: info.category,
                    intensity: info.intensity,
                })
                .collect();
            Some((*goal, details))
        })
        .collect()
}

/// Scales session durations in the weekly plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn duration_multiplier(&self) -> f64 {
        match self {
            FitnessLevel::Beginner => 0.7,
            FitnessLevel::Intermediate => 1.0,
            FitnessLevel::Advanced => 1.3,
        }
    }
}

impl From<ActivityLevel> for FitnessLevel {
    fn from(level: ActivityLevel) -> Self {
        match level {
            ActivityLevel::Low => FitnessLevel::Beginner,
            ActivityLevel::Moderate => FitnessLevel::Intermediate,
            ActivityLevel::High => FitnessLevel::Advanced,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    Cardio,
    Strength,
    Flexibility,
    #[serde(rename = "Full Body")]
    FullBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub exercise: String,
    pub duration_min: u32,
    pub intensity: Intensity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    pub day: usize,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub exercises: Vec<PlannedExercise>,
}

pub type WeeklyExercisePlan = Vec<PlanDay>;

/// Build a weekly plan for the given number of training days.
///
/// Five or more days alternate cardio and strength and end on flexibility;
/// three or four days use cardio/strength/cardio; fewer get a single full body
/// session. Exercises are drawn at random from the matching catalog category.
pub fn create_weekly_plan<R: Rng + ?Sized>(
    exercises: &ExerciseCatalog,
    level: FitnessLevel,
    available_days: usize,
    rng: &mut R,
) -> WeeklyExercisePlan {
    use SessionType::*;

    let structure: &[SessionType] = if available_days >= 5 {
        &[Cardio, Strength, Cardio, Strength, Flexibility]
    } else if available_days >= 3 {
        &[Cardio, Strength, Cardio]
    } else {
        &[FullBody]
    };

    let multiplier = level.duration_multiplier();

    structure
        .iter()
        .take(available_days)
        .enumerate()
        .map(|(i, &session_type)| {
            let (pool, picks, base_minutes): (Vec<&ExerciseInfo>, usize, f64) = match session_type {
                Cardio => (exercises.in_category(ExerciseCategory::Cardio), 2, 30.0),
                Strength => (exercises.in_category(ExerciseCategory::Strength), 1, 45.0),
                Flexibility => (exercises.in_category(ExerciseCategory::Flexibility), 1, 30.0),
                FullBody => (exercises.all().iter().collect(), 3, 20.0),
            };
            let duration_min = (base_minutes * multiplier) as u32;

            PlanDay {
                day: i + 1,
                session_type,
                exercises: pool
                    .choose_multiple(rng, picks)
                    .map(|info| PlannedExercise {
                        exercise: info.name.clone(),
                        duration_min,
                        intensity: info.intensity,
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(t: &str, minutes: f64) -> ExerciseLogEntry {
        ExerciseLogEntry::new("2025-01-09", t, minutes, Intensity::Moderate)
    }

    #[test]
    fn test_met_fallback_calories() {
        let catalog = ExerciseCatalog::builtin();
        let running = session("Running", 30.0);
        assert!((session_calories(&running, 70.0, &catalog) - 280.0).abs() < 0.001);

        let unknown = session("Zorbing", 60.0);
        assert!((session_calories(&unknown, 70.0, &catalog) - 350.0).abs() < 0.001);

        let mut logged = session("Running", 30.0);
        logged.calories_burned = Some(123.0);
        assert_eq!(session_calories(&logged, 70.0, &catalog), 123.0);
    }

    #[test]
    fn test_exercises_per_week() {
        assert_eq!(exercises_per_week(0), 0.0);
        assert!((exercises_per_week(30) - 7.0).abs() < 0.001);
        assert!((exercises_per_week(10) - 2.333).abs() < 0.001);
    }

    #[test]
    fn test_ten_sessions_without_strength() {
        let catalog = ExerciseCatalog::builtin();
        let types = ["Running", "Cycling", "Swimming", "Yoga"];
        let logs: Vec<_> = (0..10).map(|i| session(types[i % 4], 30.0)).collect();

        let gaps = identify_fitness_gaps(&logs, &catalog);
        assert_eq!(gaps[&FitnessMetric::StrengthTraining].deficit, 2.0);
        assert!(!gaps.contains_key(&FitnessMetric::CardioDuration));
        assert!(!gaps.contains_key(&FitnessMetric::ExerciseVariety));
        assert!(!gaps.contains_key(&FitnessMetric::Flexibility));
    }

    #[test]
    fn test_flexibility_gap_targets_two() {
        let catalog = ExerciseCatalog::builtin();
        let gaps = identify_fitness_gaps(&[session("Running", 200.0)], &catalog);
        let flex = gaps[&FitnessMetric::Flexibility];
        assert_eq!(flex.recommended, 2.0);
        assert_eq!(flex.deficit, 2.0);
        assert_eq!(gaps[&FitnessMetric::ExerciseVariety].deficit, 2.0);
    }

    #[test]
    fn test_patterns_skip_unknown_categories() {
        let catalog = ExerciseCatalog::builtin();
        let mut logs = vec![session("Running", 20.0), session("Running", 40.0), session("Zorbing", 30.0)];
        logs[2].intensity = Intensity::High;

        let patterns = analyze_activity_patterns(&logs, &catalog);
        assert_eq!(patterns.common_exercises[0].exercise_type, "Running");
        assert_eq!(patterns.common_exercises[0].count, 2);
        assert!((patterns.avg_duration_minutes - 30.0).abs() < 0.001);
        assert!((patterns.total_duration_minutes - 90.0).abs() < 0.001);
        assert_eq!(patterns.category_distribution.len(), 1);
        assert!((patterns.category_distribution[&ExerciseCategory::Cardio] - 1.0).abs() < 0.001);
        assert!((patterns.intensity_distribution[&Intensity::High] - 1.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_recommendation_lines() {
        let catalog = ExerciseCatalog::builtin();
        let logs = vec![session("Running", 20.0), session("Weight Training", 25.0)];
        let analysis = analyze_activity_logs(&logs, 70.0, &catalog);

        assert_eq!(
            analysis.recommendations,
            vec![
                "Increase cardio by 105 minutes per week. Try walking, cycling, or swimming.",
                "Try new activities to increase exercise variety and prevent boredom.",
                "Add 1 strength training sessions per week. Focus on major muscle groups.",
                "Include yoga or stretching sessions for flexibility and recovery.",
                "Aim for at least 3-4 exercise sessions per week for optimal health benefits.",
                "Try to exercise for at least 30 minutes per session for better results.",
            ]
        );
        // 8.0 * 70 / 3 + 6.0 * 70 * 25 / 60
        assert!((analysis.total_calories_burned - (186.666_666 + 175.0)).abs() < 0.001);
    }

    #[test]
    fn test_empty_log_default() {
        let catalog = ExerciseCatalog::builtin();
        let a = analyze_activity_logs(&[], 70.0, &catalog);
        assert_eq!(a, ActivityAnalysis::default_for_empty());
        assert_eq!(a.fitness_gaps.len(), 3);
        assert_eq!(a.fitness_gaps[&FitnessMetric::CardioDuration].deficit, 150.0);
        assert_eq!(a.recommendations.len(), 4);
        assert_eq!(a.activity_patterns.exercises_per_week, 0.0);
    }

    #[test]
    fn test_suggest_exercises_skips_unknown() {
        let catalog = ExerciseCatalog::builtin();
        let tables = RecommendationTables::builtin();
        let suggestions = suggest_exercises_for_goals(
            &[HealthGoal::Flexibility, HealthGoal::HeartHealth],
            &catalog,
            &tables,
        );
        assert!(!suggestions.contains_key(&HealthGoal::HeartHealth));
        let names: Vec<_> = suggestions[&HealthGoal::Flexibility]
            .iter()
            .map(|s| s.exercise.as_str())
            .collect();
        assert_eq!(names, vec!["Yoga", "Pilates", "Stretching"]);
    }

    #[test]
    fn test_weekly_plan_structure() {
        let catalog = ExerciseCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(7);

        let five = create_weekly_plan(&catalog, FitnessLevel::Beginner, 5, &mut rng);
        let types: Vec<_> = five.iter().map(|d| d.session_type).collect();
        assert_eq!(
            types,
            vec![
                SessionType::Cardio,
                SessionType::Strength,
                SessionType::Cardio,
                SessionType::Strength,
                SessionType::Flexibility
            ]
        );
        assert_eq!(five[0].exercises.len(), 2);
        assert_eq!(five[0].exercises[0].duration_min, 21);
        assert_eq!(five[1].exercises[0].duration_min, 31);
        for ex in &five[1].exercises {
            assert_eq!(catalog.category(&ex.exercise), Some(ExerciseCategory::Strength));
        }

        let two = create_weekly_plan(&catalog, FitnessLevel::Advanced, 2, &mut rng);
        assert_eq!(two.len(), 1);
        assert_eq!(two[0].session_type, SessionType::FullBody);
        assert_eq!(two[0].exercises.len(), 3);
        assert_eq!(two[0].exercises[0].duration_min, 26);

        assert!(create_weekly_plan(&catalog, FitnessLevel::Intermediate, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_fitness_level_from_activity() {
        assert_eq!(FitnessLevel::from(ActivityLevel::Low), FitnessLevel::Beginner);
        assert_eq!(FitnessLevel::from(ActivityLevel::High).duration_multiplier(), 1.3);
    }
}
