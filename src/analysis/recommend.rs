//! Recommendation composer
//!
//! Pure lookup from gap results and the reference tables to advice lists,
//! a seven-day meal plan, a weekly exercise plan and a shopping list.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activity::{create_weekly_plan, ActivityAnalysis, FitnessLevel, WeeklyExercisePlan};
use super::calories::water_intake_liters;
use super::nutrition::NutritionAnalysis;
use crate::models::{ActivityLevel, MealType, Nutrient, UserProfile};
use crate::reference::{RecommendationTables, ReferenceData};

pub const MEAL_PLAN_DAYS: usize = 7;
pub const DEFAULT_AVAILABLE_DAYS: usize = 3;
const SUGGESTIONS_PER_MEAL: usize = 3;
const PROTEIN_SUFFIX: &str = " (add extra protein)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanDay {
    pub day: usize,
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub snacks: Vec<String>,
}

impl MealPlanDay {
    pub fn meals(&self) -> [&[String]; 4] {
        [
            self.breakfast.as_slice(),
            self.lunch.as_slice(),
            self.dinner.as_slice(),
            self.snacks.as_slice(),
        ]
    }
}

pub type MealPlan = Vec<MealPlanDay>;

/// Section name to items, items sorted
pub type ShoppingList = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub nutrition_recommendations: Vec<String>,
    pub exercise_recommendations: Vec<String>,
    pub lifestyle_recommendations: Vec<String>,
    pub meal_plan: MealPlan,
    pub exercise_plan: WeeklyExercisePlan,
    pub shopping_list: ShoppingList,
}

/// Drop repeated lines, keeping the first occurrence
fn dedup(lines: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

pub fn nutrition_recommendations(
    profile: &UserProfile,
    nutrition: &NutritionAnalysis,
    tables: &RecommendationTables,
) -> Vec<String> {
    let mut lines = nutrition.recommendations.clone();

    if let Some(culture) = tables.culture(profile.cultural_background) {
        let foods: Vec<&str> = culture.preferred_foods.iter().take(3).map(String::as_str).collect();
        lines.push(format!("Include culturally familiar foods: {}", foods.join(", ")));
    }

    for pref in &profile.dietary_preferences {
        if let Some(guide) = tables.restriction(*pref) {
            let emphasize: Vec<&str> = guide.emphasize.iter().take(2).map(String::as_str).collect();
            lines.push(format!("For {} diet: emphasize {}", pref.as_str(), emphasize.join(", ")));
        }
    }

    for goal in &profile.goals {
        lines.extend(tables.nutrition_for_goal(*goal).iter().cloned());
    }

    dedup(lines)
}

pub fn exercise_recommendations(
    profile: &UserProfile,
    activity: &ActivityAnalysis,
    tables: &RecommendationTables,
) -> Vec<String> {
    let mut lines = activity.recommendations.clone();

    for goal in &profile.goals {
        lines.extend(tables.exercise_for_goal(*goal).iter().cloned());
    }

    match profile.activity_level {
        ActivityLevel::Low => lines
            .push("Start with low-impact exercises and gradually increase intensity".to_string()),
        ActivityLevel::High => {
            lines.push("Challenge yourself with advanced training techniques".to_string())
        }
        ActivityLevel::Moderate => {}
    }

    if profile.age > 50 {
        lines.push("Include balance and flexibility exercises for healthy aging".to_string());
    } else if profile.age < 25 {
        lines.push("Take advantage of high recovery capacity with varied training".to_string());
    }

    dedup(lines)
}

pub fn lifestyle_recommendations(
    profile: &UserProfile,
    nutrition: &NutritionAnalysis,
    activity: &ActivityAnalysis,
) -> Vec<String> {
    let mut lines = vec![
        "Aim for 7-9 hours of quality sleep per night".to_string(),
        format!(
            "Drink at least {:.1} liters of water daily",
            water_intake_liters(profile.weight_kg)
        ),
        "Practice stress management techniques like meditation or deep breathing".to_string(),
    ];

    if nutrition.eating_patterns.avg_meals_per_day < 3.0 {
        lines.push("Establish regular meal times with at least 3 meals per day".to_string());
    }

    if activity.activity_patterns.exercises_per_week > 5.0 {
        lines.push("Include rest days for proper recovery and muscle repair".to_string());
    }

    lines.push("Monitor your progress weekly and adjust plans as needed".to_string());
    lines
}

/// Up to three suggestions for one meal slot.
///
/// Culture-specific options are dropped when they mention anything on a
/// restriction's avoid list. If nothing survives, the generic options are
/// used unfiltered. Lunch and dinner get a protein note when protein is short.
pub fn suggest_meal(
    meal: MealType,
    profile: &UserProfile,
    protein_gap: bool,
    tables: &RecommendationTables,
) -> Vec<String> {
    let avoid: Vec<String> = profile
        .dietary_preferences
        .iter()
        .filter_map(|pref| tables.restriction(*pref))
        .flat_map(|guide| guide.avoid.iter().map(|a| a.to_lowercase()))
        .collect();

    let mut suggestions: Vec<String> = tables
        .meals_for(meal, profile.cultural_background)
        .iter()
        .filter(|s| {
            let lower = s.to_lowercase();
            !avoid.iter().any(|a| lower.contains(a.as_str()))
        })
        .cloned()
        .collect();

    if suggestions.is_empty() {
        suggestions = tables.generic_meals_for(meal).to_vec();
    }
    if suggestions.is_empty() {
        suggestions.push("Healthy balanced meal".to_string());
    }

    if protein_gap && matches!(meal, MealType::Lunch | MealType::Dinner) {
        for s in suggestions.iter_mut() {
            s.push_str(PROTEIN_SUFFIX);
        }
    }

    suggestions.truncate(SUGGESTIONS_PER_MEAL);
    suggestions
}

pub fn create_meal_plan(
    profile: &UserProfile,
    nutrition: &NutritionAnalysis,
    tables: &RecommendationTables,
) -> MealPlan {
    let protein_gap = nutrition.has_gap(Nutrient::Protein);

    (1..=MEAL_PLAN_DAYS)
        .map(|day| MealPlanDay {
            day,
            breakfast: suggest_meal(MealType::Breakfast, profile, protein_gap, tables),
            lunch: suggest_meal(MealType::Lunch, profile, protein_gap, tables),
            dinner: suggest_meal(MealType::Dinner, profile, protein_gap, tables),
            snacks: suggest_meal(MealType::Snack, profile, protein_gap, tables),
        })
        .collect()
}

/// Shopping items implied by keywords in the first `days` days of a meal plan.
/// Every section is present, possibly empty.
pub fn generate_shopping_list(
    meal_plan: &MealPlan,
    days: usize,
    tables: &RecommendationTables,
) -> ShoppingList {
    let mut sections: BTreeMap<String, BTreeSet<String>> = tables
        .shopping_sections
        .iter()
        .map(|s| (s.clone(), BTreeSet::new()))
        .collect();

    for plan_day in meal_plan.iter().filter(|d| d.day <= days) {
        for suggestion in plan_day.meals().into_iter().flatten() {
            let lower = suggestion.to_lowercase();
            for rule in &tables.shopping_rules {
                if rule.keywords.iter().any(|k| lower.contains(&k.to_lowercase())) {
                    sections
                        .entry(rule.section.clone())
                        .or_default()
                        .insert(rule.item.clone());
                }
            }
        }
    }

    sections
        .into_iter()
        .map(|(section, items)| (section, items.into_iter().collect()))
        .collect()
}

/// Compose every recommendation output for one user
pub fn generate_recommendations<R: Rng + ?Sized>(
    profile: &UserProfile,
    nutrition: &NutritionAnalysis,
    activity: &ActivityAnalysis,
    reference: &ReferenceData,
    available_days: usize,
    rng: &mut R,
) -> Recommendations {
    let tables = &reference.tables;
    let meal_plan = create_meal_plan(profile, nutrition, tables);
    let shopping_list = generate_shopping_list(&meal_plan, MEAL_PLAN_DAYS, tables);
    let exercise_plan = create_weekly_plan(
        &reference.exercises,
        FitnessLevel::from(profile.activity_level),
        available_days,
        rng,
    );

    Recommendations {
        nutrition_recommendations: nutrition_recommendations(profile, nutrition, tables),
        exercise_recommendations: exercise_recommendations(profile, activity, tables),
        lifestyle_recommendations: lifestyle_recommendations(profile, nutrition, activity),
        meal_plan,
        exercise_plan,
        shopping_list,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CulturalBackground, DietaryPreference, FoodLogEntry, Gender, HealthGoal,
    };
    use crate::analysis::nutrition::analyze_food_logs;
    use crate::reference::FoodCatalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile() -> UserProfile {
        UserProfile {
            age: 40,
            gender: Gender::Male,
            height_cm: 175.0,
            weight_kg: 80.0,
            activity_level: ActivityLevel::Moderate,
            goals: BTreeSet::new(),
            dietary_preferences: BTreeSet::new(),
            cultural_background: CulturalBackground::Western,
        }
    }

    #[test]
    fn test_nutrition_lines_include_culture_restriction_and_goal() {
        let tables = RecommendationTables::builtin();
        let mut p = profile();
        p.cultural_background = CulturalBackground::Indian;
        p.dietary_preferences.insert(DietaryPreference::GlutenFree);
        p.goals.insert(HealthGoal::WeightLoss);
        p.goals.insert(HealthGoal::Strength);

        let lines = nutrition_recommendations(&p, &NutritionAnalysis::default_for_empty(), &tables);

        assert!(lines.contains(&"Include culturally familiar foods: Rice, Lentils, Vegetables".to_string()));
        assert!(lines.contains(&"For gluten_free diet: emphasize Rice, Quinoa".to_string()));
        assert!(lines.contains(&"Focus on high-fiber foods for satiety".to_string()));
        // 4 defaults + culture + restriction + 3 weight loss lines; strength has none
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let lines = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup(lines), vec!["b", "a"]);
    }

    #[test]
    fn test_exercise_lines_for_age_and_level() {
        let tables = RecommendationTables::builtin();
        let activity = ActivityAnalysis::default_for_empty();

        let mut older = profile();
        older.age = 62;
        older.activity_level = ActivityLevel::Low;
        let lines = exercise_recommendations(&older, &activity, &tables);
        assert!(lines.contains(&"Start with low-impact exercises and gradually increase intensity".to_string()));
        assert!(lines.contains(&"Include balance and flexibility exercises for healthy aging".to_string()));

        let mut younger = profile();
        younger.age = 22;
        let lines = exercise_recommendations(&younger, &activity, &tables);
        assert!(lines.contains(&"Take advantage of high recovery capacity with varied training".to_string()));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_lifestyle_lines() {
        let nutrition = NutritionAnalysis::default_for_empty();
        let mut activity = ActivityAnalysis::default_for_empty();
        activity.activity_patterns.exercises_per_week = 6.0;

        let lines = lifestyle_recommendations(&profile(), &nutrition, &activity);
        assert_eq!(lines[1], "Drink at least 2.8 liters of water daily");
        assert!(lines.contains(&"Establish regular meal times with at least 3 meals per day".to_string()));
        assert!(lines.contains(&"Include rest days for proper recovery and muscle repair".to_string()));
        assert_eq!(lines.last().unwrap(), "Monitor your progress weekly and adjust plans as needed");
    }

    #[test]
    fn test_vegetarian_lunch_filters_meat_and_fish() {
        let tables = RecommendationTables::builtin();
        let mut p = profile();
        p.cultural_background = CulturalBackground::Mediterranean;
        p.dietary_preferences.insert(DietaryPreference::Vegetarian);

        let lunch = suggest_meal(MealType::Lunch, &p, false, &tables);
        assert_eq!(lunch, vec!["Quinoa salad", "Lentil soup with bread"]);
    }

    #[test]
    fn test_generic_fallback_and_protein_suffix() {
        let tables = RecommendationTables::builtin();
        let mut p = profile();
        p.cultural_background = CulturalBackground::Other;

        let dinner = suggest_meal(MealType::Dinner, &p, true, &tables);
        assert_eq!(
            dinner,
            vec!["Grilled vegetables (add extra protein)", "Lentil curry (add extra protein)"]
        );

        let breakfast = suggest_meal(MealType::Breakfast, &p, true, &tables);
        assert_eq!(breakfast, vec!["Oatmeal with fruits", "Smoothie with vegetables"]);
    }

    #[test]
    fn test_meal_plan_has_seven_days() {
        let tables = RecommendationTables::builtin();
        let plan = create_meal_plan(&profile(), &NutritionAnalysis::default_for_empty(), &tables);
        assert_eq!(plan.len(), MEAL_PLAN_DAYS);
        assert!(plan.iter().all(|d| d.meals().iter().all(|m| !m.is_empty() && m.len() <= 3)));
        // Default analysis carries a protein gap
        assert!(plan[0].lunch[0].ends_with(PROTEIN_SUFFIX));
    }

    #[test]
    fn test_shopping_list_from_keywords() {
        let tables = RecommendationTables::builtin();
        let plan = vec![MealPlanDay {
            day: 1,
            breakfast: vec!["Oatmeal with fruits".to_string()],
            lunch: vec!["Grilled chicken salad".to_string()],
            dinner: vec!["Grilled salmon with broccoli".to_string()],
            snacks: vec!["Mixed nuts".to_string()],
        }];

        let list = generate_shopping_list(&plan, 7, &tables);
        assert_eq!(list["Proteins"], vec!["Chicken breast", "Fish/Salmon"]);
        assert_eq!(list["Fruits"], vec!["Fresh fruits/berries"]);
        assert_eq!(list["Others"], vec!["Mixed nuts"]);
        assert!(list["Dairy"].is_empty());
        // "Oatmeal" does not contain "oats"
        assert!(list["Grains"].is_empty());

        assert!(generate_shopping_list(&plan, 0, &tables)["Proteins"].is_empty());
    }

    #[test]
    fn test_generate_recommendations_end_to_end() {
        let reference = ReferenceData::builtin();
        let logs = vec![FoodLogEntry::complete(
            "2025-01-01", MealType::Lunch, "Salmon", 200.0, [416.0, 50.8, 0.0, 26.8, 0.0],
        )];
        let nutrition = analyze_food_logs(&logs, &FoodCatalog::builtin());
        let activity = ActivityAnalysis::default_for_empty();
        let mut rng = StdRng::seed_from_u64(42);

        let recs = generate_recommendations(&profile(), &nutrition, &activity, &reference, 5, &mut rng);
        assert_eq!(recs.exercise_plan.len(), 5);
        assert_eq!(recs.meal_plan.len(), 7);
        assert!(!recs.nutrition_recommendations.is_empty());
        // Protein is covered, so no protein note on lunch
        assert!(!recs.meal_plan[0].lunch[0].ends_with(PROTEIN_SUFFIX));
        assert!(recs.shopping_list["Proteins"].contains(&"Chicken breast".to_string()));
    }
}
