//! Nutrition gap analysis
//!
//! Turns a food log into average daily intake, flags nutrients below 80% of
//! the daily target, summarizes eating patterns and produces advice lines.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{FoodLogEntry, Gap, GapResult, MealType, Nutrient, Nutrients};
use crate::reference::FoodCatalog;

/// Fraction of the target below which a nutrient counts as a gap
pub const GAP_THRESHOLD: f64 = 0.8;

const COMMON_FOODS_LIMIT: usize = 10;
const SUGGESTIONS_PER_NUTRIENT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodCount {
    pub food_item: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EatingPatterns {
    pub avg_meals_per_day: f64,
    /// Most frequent foods, most frequent first
    pub common_foods: Vec<FoodCount>,
    /// Share of entries per meal type, sums to 1
    pub meal_distribution: BTreeMap<MealType, f64>,
    /// Share of entries per food category; absent when no entry has a category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_distribution: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionAnalysis {
    pub daily_intake: Nutrients,
    pub days_logged: usize,
    pub nutritional_gaps: GapResult<Nutrient>,
    pub eating_patterns: EatingPatterns,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSuggestion {
    pub food_item: String,
    pub per_100g: f64,
}

/// Analyze a food log. An empty log yields [`NutritionAnalysis::default_for_empty`].
pub fn analyze_food_logs(logs: &[FoodLogEntry], foods: &FoodCatalog) -> NutritionAnalysis {
    if logs.is_empty() {
        return NutritionAnalysis::default_for_empty();
    }

    let filled = impute_missing(logs);
    let (daily_intake, days_logged) = average_daily_intake(logs, &filled);
    let nutritional_gaps = identify_nutritional_gaps(&daily_intake);
    let eating_patterns = analyze_eating_patterns(logs, foods);
    let recommendations = nutrition_recommendations(&nutritional_gaps, &eating_patterns);

    tracing::debug!(
        "Nutrition analysis: {} entries over {} days, {} gaps",
        logs.len(),
        days_logged,
        nutritional_gaps.len()
    );

    NutritionAnalysis {
        daily_intake,
        days_logged,
        nutritional_gaps,
        eating_patterns,
        recommendations,
    }
}

fn raw_value(entry: &FoodLogEntry, nutrient: Nutrient) -> Option<f64> {
    match nutrient {
        Nutrient::Calories => entry.calories,
        Nutrient::Protein => entry.protein_g,
        Nutrient::Carbs => entry.carbs_g,
        Nutrient::Fat => entry.fat_g,
        Nutrient::Fiber => entry.fiber_g,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Fill missing macros, one nutrient column at a time.
///
/// A missing value takes the mean of the same food item's recorded values.
/// Whatever is still missing takes the mean of the column after that first
/// pass. A column with no values at all becomes zero.
pub fn impute_missing(logs: &[FoodLogEntry]) -> Vec<Nutrients> {
    let mut filled = vec![Nutrients::zero(); logs.len()];

    for nutrient in Nutrient::ALL {
        let mut per_item: HashMap<&str, Vec<f64>> = HashMap::new();
        for entry in logs {
            if let Some(v) = raw_value(entry, nutrient) {
                per_item.entry(entry.food_item.trim()).or_default().push(v);
            }
        }
        let item_means: HashMap<&str, f64> = per_item
            .into_iter()
            .filter_map(|(item, values)| mean(values.into_iter()).map(|m| (item, m)))
            .collect();

        let first_pass: Vec<Option<f64>> = logs
            .iter()
            .map(|e| {
                raw_value(e, nutrient).or_else(|| item_means.get(e.food_item.trim()).copied())
            })
            .collect();
        let column_mean = mean(first_pass.iter().flatten().copied()).unwrap_or(0.0);

        for (slot, value) in filled.iter_mut().zip(first_pass) {
            slot.set(nutrient, value.unwrap_or(column_mean));
        }
    }

    filled
}

/// Mean of per-date totals over the distinct dates present
fn average_daily_intake(logs: &[FoodLogEntry], filled: &[Nutrients]) -> (Nutrients, usize) {
    let mut per_day: BTreeMap<&str, Nutrients> = BTreeMap::new();
    for (entry, values) in logs.iter().zip(filled) {
        let day = per_day.entry(entry.date.as_str()).or_default();
        *day = *day + *values;
    }

    let days = per_day.len().max(1);
    let total: Nutrients = per_day.values().copied().sum();
    (total * (1.0 / days as f64), per_day.len())
}

/// Nutrients whose average sits strictly below 80% of the daily target
pub fn identify_nutritional_gaps(daily_intake: &Nutrients) -> GapResult<Nutrient> {
    Nutrient::ALL
        .into_iter()
        .filter_map(|nutrient| {
            let current = daily_intake.get(nutrient);
            let target = nutrient.daily_target();
            (current < target * GAP_THRESHOLD).then(|| (nutrient, Gap::new(current, target)))
        })
        .collect()
}

fn distribution<K: Ord>(counts: BTreeMap<K, usize>) -> BTreeMap<K, f64> {
    let total: usize = counts.values().sum();
    let total = total.max(1) as f64;
    counts.into_iter().map(|(k, c)| (k, c as f64 / total)).collect()
}

pub fn analyze_eating_patterns(logs: &[FoodLogEntry], foods: &FoodCatalog) -> EatingPatterns {
    let days: BTreeSet<&str> = logs.iter().map(|e| e.date.as_str()).collect();
    let avg_meals_per_day = logs.len() as f64 / days.len().max(1) as f64;

    let mut food_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in logs {
        *food_counts.entry(entry.food_item.trim()).or_default() += 1;
    }
    let mut common_foods: Vec<FoodCount> = food_counts
        .into_iter()
        .map(|(food_item, count)| FoodCount { food_item: food_item.to_string(), count })
        .collect();
    // BTreeMap order gives the alphabetical tie-break; the sort is stable
    common_foods.sort_by(|a, b| b.count.cmp(&a.count));
    common_foods.truncate(COMMON_FOODS_LIMIT);

    let mut meal_counts: BTreeMap<MealType, usize> = BTreeMap::new();
    for entry in logs {
        *meal_counts.entry(entry.meal_type).or_default() += 1;
    }

    let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in logs {
        let category = entry
            .category
            .as_deref()
            .or_else(|| foods.category(&entry.food_item));
        if let Some(c) = category {
            *category_counts.entry(c.to_string()).or_default() += 1;
        }
    }

    EatingPatterns {
        avg_meals_per_day,
        common_foods,
        meal_distribution: distribution(meal_counts),
        category_distribution: (!category_counts.is_empty()).then(|| distribution(category_counts)),
    }
}

pub fn nutrition_recommendations(
    gaps: &GapResult<Nutrient>,
    patterns: &EatingPatterns,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    for (nutrient, gap) in gaps {
        match nutrient {
            Nutrient::Protein => recommendations.push(format!(
                "Increase protein intake by {:.1}g daily. Consider adding lean meats, eggs, or legumes.",
                gap.deficit
            )),
            Nutrient::Fiber => recommendations.push(format!(
                "Add {:.1}g more fiber daily. Include more fruits, vegetables, and whole grains.",
                gap.deficit
            )),
            Nutrient::Calories if gap.deficit > 200.0 => recommendations
                .push("Consider increasing caloric intake with nutrient-dense foods.".to_string()),
            Nutrient::Calories => recommendations
                .push("Maintain current caloric intake but focus on nutrient quality.".to_string()),
            Nutrient::Carbs | Nutrient::Fat => {}
        }
    }

    if patterns.avg_meals_per_day < 3.0 {
        recommendations.push(
            "Aim for at least 3 balanced meals per day for better nutrient distribution."
                .to_string(),
        );
    }

    if patterns.common_foods.len() < 5 {
        recommendations.push("Increase food variety to ensure diverse nutrient intake.".to_string());
    }

    recommendations
}

impl NutritionAnalysis {
    /// Canned result when there is nothing logged
    pub fn default_for_empty() -> Self {
        let nutritional_gaps = [Nutrient::Calories, Nutrient::Protein, Nutrient::Fiber]
            .into_iter()
            .map(|n| (n, Gap::new(0.0, n.daily_target())))
            .collect();

        Self {
            daily_intake: Nutrients::zero(),
            days_logged: 0,
            nutritional_gaps,
            eating_patterns: EatingPatterns {
                avg_meals_per_day: 0.0,
                common_foods: Vec::new(),
                meal_distribution: BTreeMap::new(),
                category_distribution: None,
            },
            recommendations: vec![
                "Start logging your food intake to get personalized recommendations".to_string(),
                "Aim for balanced meals with protein, carbs, and healthy fats".to_string(),
                "Include plenty of fruits and vegetables for fiber and micronutrients".to_string(),
                "Aim for at least 3 balanced meals per day for better nutrient distribution."
                    .to_string(),
            ],
        }
    }

    pub fn has_gap(&self, nutrient: Nutrient) -> bool {
        self.nutritional_gaps.contains_key(&nutrient)
    }
}

/// Catalog foods rich in each requested nutrient.
///
/// Only protein (> 15 g), fiber (> 5 g) and calories (> 200 kcal) per 100 g
/// have suggestion rules; other nutrients are skipped.
pub fn suggest_foods_for_nutrients(
    foods: &FoodCatalog,
    nutrients: &[Nutrient],
) -> BTreeMap<Nutrient, Vec<FoodSuggestion>> {
    let mut suggestions = BTreeMap::new();

    for &nutrient in nutrients {
        let min = match nutrient {
            Nutrient::Protein => 15.0,
            Nutrient::Fiber => 5.0,
            Nutrient::Calories => 200.0,
            Nutrient::Carbs | Nutrient::Fat => continue,
        };
        let top = foods
            .ranked_by(nutrient, min)
            .into_iter()
            .take(SUGGESTIONS_PER_NUTRIENT)
            .map(|f| FoodSuggestion {
                food_item: f.name.clone(),
                per_100g: f.per_100g.get(nutrient),
            })
            .collect();
        suggestions.insert(nutrient, top);
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, meal: MealType, item: &str, macros: [f64; 5]) -> FoodLogEntry {
        FoodLogEntry::complete(date, meal, item, 100.0, macros)
    }

    #[test]
    fn test_single_day_example() {
        // 1200 kcal, 40 g protein, 10 g fiber over four entries
        let logs = vec![
            entry("2025-01-09", MealType::Breakfast, "Oats", [300.0, 10.0, 75.0, 15.0, 4.0]),
            entry("2025-01-09", MealType::Lunch, "Rice", [300.0, 10.0, 75.0, 20.0, 2.0]),
            entry("2025-01-09", MealType::Dinner, "Lentils", [400.0, 15.0, 75.0, 20.0, 3.0]),
            entry("2025-01-09", MealType::Snack, "Apple", [200.0, 5.0, 75.0, 15.0, 1.0]),
        ];
        let analysis = analyze_food_logs(&logs, &FoodCatalog::builtin());

        assert!((analysis.daily_intake.calories - 1200.0).abs() < 0.001);
        let cal = analysis.nutritional_gaps[&Nutrient::Calories];
        assert!((cal.deficit - 800.0).abs() < 0.001);
        let fiber = analysis.nutritional_gaps[&Nutrient::Fiber];
        assert!((fiber.deficit - 15.0).abs() < 0.001);

        // 40 g is exactly 80% of 50 g: not a gap
        assert!(!analysis.has_gap(Nutrient::Protein));
        assert!(!analysis.has_gap(Nutrient::Carbs));
        assert!(!analysis.has_gap(Nutrient::Fat));

        assert_eq!(analysis.days_logged, 1);
        assert!((analysis.eating_patterns.avg_meals_per_day - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_gap_iff_below_threshold() {
        let mut intake = Nutrients::zero();
        for n in Nutrient::ALL {
            intake.set(n, n.daily_target() * 0.8);
        }
        assert!(identify_nutritional_gaps(&intake).is_empty());

        intake.set(Nutrient::Fat, 51.9);
        let gaps = identify_nutritional_gaps(&intake);
        assert_eq!(gaps.len(), 1);
        assert!((gaps[&Nutrient::Fat].deficit - 13.1).abs() < 0.001);
    }

    #[test]
    fn test_average_is_over_distinct_dates() {
        let logs = vec![
            entry("2025-01-01", MealType::Lunch, "Rice", [1000.0, 20.0, 200.0, 30.0, 10.0]),
            entry("2025-01-01", MealType::Dinner, "Rice", [1000.0, 20.0, 200.0, 30.0, 10.0]),
            entry("2025-01-02", MealType::Lunch, "Rice", [1000.0, 20.0, 200.0, 30.0, 10.0]),
        ];
        let analysis = analyze_food_logs(&logs, &FoodCatalog::builtin());
        assert!((analysis.daily_intake.calories - 1500.0).abs() < 0.001);
        assert!((analysis.eating_patterns.avg_meals_per_day - 1.5).abs() < 0.001);
    }

    #[test]
    fn test_imputation_prefers_item_mean_then_column_mean() {
        let mut logs = vec![
            entry("2025-01-01", MealType::Lunch, "Rice", [200.0, 4.0, 40.0, 1.0, 1.0]),
            entry("2025-01-01", MealType::Dinner, "Rice", [300.0, 6.0, 60.0, 1.0, 1.0]),
            entry("2025-01-02", MealType::Lunch, "Rice", [0.0; 5]),
            entry("2025-01-02", MealType::Dinner, "Mystery stew", [0.0; 5]),
        ];
        logs[2].calories = None;
        logs[3].calories = None;
        logs[3].fiber_g = None;
        for e in logs.iter_mut() {
            e.fat_g = None;
        }

        let filled = impute_missing(&logs);
        // Rice mean of 200 and 300
        assert!((filled[2].calories - 250.0).abs() < 0.001);
        // Column mean after the item pass: (200 + 300 + 250) / 3
        assert!((filled[3].calories - 250.0).abs() < 0.001);
        // Fiber column mean of 1, 1, 0
        assert!((filled[3].fiber - 2.0 / 3.0).abs() < 0.001);
        // Fat never recorded
        assert!(filled.iter().all(|n| n.fat == 0.0));
    }

    #[test]
    fn test_patterns_common_foods_and_categories() {
        let mut logs = vec![
            entry("2025-01-01", MealType::Breakfast, "Banana", [89.0, 1.0, 23.0, 0.3, 2.6]),
            entry("2025-01-01", MealType::Snack, "Banana", [89.0, 1.0, 23.0, 0.3, 2.6]),
            entry("2025-01-01", MealType::Lunch, "Apple", [52.0, 0.3, 14.0, 0.2, 2.4]),
            entry("2025-01-01", MealType::Dinner, "Grandma's pie", [400.0, 5.0, 50.0, 20.0, 2.0]),
        ];
        logs[3].category = Some("Treat".to_string());

        let patterns = analyze_eating_patterns(&logs, &FoodCatalog::builtin());
        assert_eq!(patterns.common_foods[0], FoodCount { food_item: "Banana".to_string(), count: 2 });
        assert_eq!(patterns.common_foods[1].food_item, "Apple");
        assert!((patterns.meal_distribution[&MealType::Snack] - 0.25).abs() < 0.001);

        let categories = patterns.category_distribution.unwrap();
        assert!((categories["Fruit"] - 0.75).abs() < 0.001);
        assert!((categories["Treat"] - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_no_category_distribution_when_nothing_resolves() {
        let logs = vec![entry("2025-01-01", MealType::Lunch, "Mystery", [100.0; 5])];
        let patterns = analyze_eating_patterns(&logs, &FoodCatalog::builtin());
        assert!(patterns.category_distribution.is_none());
    }

    #[test]
    fn test_recommendation_lines() {
        let logs = vec![entry("2025-01-01", MealType::Lunch, "Rice", [1900.0, 10.0, 300.0, 70.0, 5.0])];
        let analysis = analyze_food_logs(&logs, &FoodCatalog::builtin());

        assert_eq!(
            analysis.recommendations,
            vec![
                "Increase protein intake by 40.0g daily. Consider adding lean meats, eggs, or legumes.",
                "Add 20.0g more fiber daily. Include more fruits, vegetables, and whole grains.",
                "Aim for at least 3 balanced meals per day for better nutrient distribution.",
                "Increase food variety to ensure diverse nutrient intake.",
            ]
        );
    }

    #[test]
    fn test_small_calorie_deficit_advice() {
        let mut gaps = GapResult::new();
        gaps.insert(Nutrient::Calories, Gap::new(1850.0, 2000.0));
        let patterns = EatingPatterns {
            avg_meals_per_day: 3.0,
            common_foods: (0..5)
                .map(|i| FoodCount { food_item: format!("food {}", i), count: 1 })
                .collect(),
            meal_distribution: BTreeMap::new(),
            category_distribution: None,
        };
        assert_eq!(
            nutrition_recommendations(&gaps, &patterns),
            vec!["Maintain current caloric intake but focus on nutrient quality."]
        );
    }

    #[test]
    fn test_empty_log_default_is_stable() {
        let a = analyze_food_logs(&[], &FoodCatalog::builtin());
        let b = analyze_food_logs(&[], &FoodCatalog::builtin());
        assert_eq!(a, b);
        assert_eq!(a.nutritional_gaps.len(), 3);
        assert_eq!(a.nutritional_gaps[&Nutrient::Protein].deficit, 50.0);
        assert_eq!(a.recommendations.len(), 4);
        assert_eq!(a.daily_intake, Nutrients::zero());
    }

    #[test]
    fn test_suggest_foods() {
        let foods = FoodCatalog::builtin();
        let suggestions =
            suggest_foods_for_nutrients(&foods, &[Nutrient::Protein, Nutrient::Fat, Nutrient::Calories]);

        assert!(!suggestions.contains_key(&Nutrient::Fat));
        assert_eq!(suggestions[&Nutrient::Protein].len(), 5);
        assert_eq!(suggestions[&Nutrient::Protein][0].food_item, "Chicken Breast");
        assert_eq!(suggestions[&Nutrient::Calories][0].food_item, "Olive Oil");
    }
}
