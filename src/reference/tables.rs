//! Recommendation lookup tables
//!
//! Goal, culture and dietary restriction tables plus the meal suggestion
//! grid used by the meal planner. Built once; never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{CulturalBackground, DietaryPreference, HealthGoal, MealType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturePreferences {
    pub preferred_foods: Vec<String>,
    pub cooking_methods: Vec<String>,
    pub meal_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionGuide {
    /// Case-insensitive substrings that disqualify a meal suggestion
    pub avoid: Vec<String>,
    pub emphasize: Vec<String>,
}

/// Keyword found in a meal suggestion mapped to a shopping list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingRule {
    pub keywords: Vec<String>,
    pub section: String,
    pub item: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationTables {
    pub goal_nutrition: BTreeMap<HealthGoal, Vec<String>>,
    pub goal_exercise: BTreeMap<HealthGoal, Vec<String>>,
    /// Exercise names suggested per goal, resolved against the exercise catalog
    pub goal_exercise_types: BTreeMap<HealthGoal, Vec<String>>,
    pub cultures: BTreeMap<CulturalBackground, CulturePreferences>,
    pub restrictions: BTreeMap<DietaryPreference, RestrictionGuide>,
    pub meal_suggestions: BTreeMap<MealType, BTreeMap<CulturalBackground, Vec<String>>>,
    pub generic_meals: BTreeMap<MealType, Vec<String>>,
    pub shopping_sections: Vec<String>,
    pub shopping_rules: Vec<ShoppingRule>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl RecommendationTables {
    pub fn nutrition_for_goal(&self, goal: HealthGoal) -> &[String] {
        self.goal_nutrition.get(&goal).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn exercise_for_goal(&self, goal: HealthGoal) -> &[String] {
        self.goal_exercise.get(&goal).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn culture(&self, culture: CulturalBackground) -> Option<&CulturePreferences> {
        self.cultures.get(&culture)
    }

    pub fn restriction(&self, pref: DietaryPreference) -> Option<&RestrictionGuide> {
        self.restrictions.get(&pref)
    }

    pub fn meals_for(&self, meal: MealType, culture: CulturalBackground) -> &[String] {
        self.meal_suggestions
            .get(&meal)
            .and_then(|by_culture| by_culture.get(&culture))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn generic_meals_for(&self, meal: MealType) -> &[String] {
        self.generic_meals.get(&meal).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn builtin() -> Self {
        use CulturalBackground::{Asian, Indian, Mediterranean, Western};
        use HealthGoal::*;

        let goal_nutrition = BTreeMap::from([
            (WeightLoss, strings(&[
                "Create a moderate caloric deficit through portion control",
                "Increase protein intake to preserve muscle mass",
                "Focus on high-fiber foods for satiety",
            ])),
            (MuscleGain, strings(&[
                "Increase protein intake to 1.6-2.2g per kg body weight",
                "Ensure adequate caloric intake to support muscle growth",
                "Include post-workout protein within 30 minutes",
            ])),
            (HeartHealth, strings(&[
                "Reduce sodium intake and increase potassium-rich foods",
                "Include omega-3 fatty acids from fish or plant sources",
                "Limit saturated fats and trans fats",
            ])),
            (DiabetesManagement, strings(&[
                "Focus on complex carbohydrates and fiber",
                "Monitor portion sizes and meal timing",
                "Include chromium and magnesium-rich foods",
            ])),
            (EnergyBoost, strings(&[
                "Ensure adequate iron and B-vitamin intake",
                "Include complex carbohydrates for sustained energy",
                "Stay well-hydrated throughout the day",
            ])),
        ]);

        let goal_exercise = BTreeMap::from([
            (WeightLoss, strings(&[
                "Include both cardio and strength training",
                "Try high-intensity interval training (HIIT)",
                "Aim for 150+ minutes of moderate cardio weekly",
            ])),
            (MuscleGain, strings(&[
                "Focus on progressive resistance training",
                "Include compound movements like squats and deadlifts",
                "Allow adequate rest between strength sessions",
            ])),
            (HeartHealth, strings(&[
                "Prioritize cardiovascular exercises",
                "Include activities like swimming, cycling, or walking",
                "Monitor heart rate during exercise",
            ])),
            (Flexibility, strings(&[
                "Include daily stretching or yoga",
                "Focus on major muscle groups",
                "Hold stretches for 15-30 seconds",
            ])),
            (StressRelief, strings(&[
                "Try mind-body exercises like yoga or tai chi",
                "Include outdoor activities when possible",
                "Focus on rhythmic, meditative movements",
            ])),
        ]);

        let goal_exercise_types = BTreeMap::from([
            (WeightLoss, strings(&["Running", "Cycling", "Swimming", "Jumping Rope"])),
            (MuscleGain, strings(&["Weight Training", "Push-ups", "Pull-ups", "Resistance Training"])),
            (Endurance, strings(&["Running", "Cycling", "Swimming", "Rowing"])),
            (Flexibility, strings(&["Yoga", "Pilates", "Stretching"])),
            (StressRelief, strings(&["Yoga", "Walking", "Swimming", "Tai Chi"])),
            (Strength, strings(&["Weight Training", "Rock Climbing", "Martial Arts", "Boxing"])),
        ]);

        let cultures = BTreeMap::from([
            (Indian, CulturePreferences {
                preferred_foods: strings(&["Rice", "Lentils", "Vegetables", "Yogurt", "Spices"]),
                cooking_methods: strings(&["Steaming", "Boiling", "Sautéing"]),
                meal_patterns: strings(&["3 main meals", "Evening snack"]),
            }),
            (Mediterranean, CulturePreferences {
                preferred_foods: strings(&["Olive Oil", "Fish", "Vegetables", "Whole Grains"]),
                cooking_methods: strings(&["Grilling", "Roasting", "Raw"]),
                meal_patterns: strings(&["3 main meals", "Light dinner"]),
            }),
            (Asian, CulturePreferences {
                preferred_foods: strings(&["Rice", "Fish", "Vegetables", "Tofu", "Green Tea"]),
                cooking_methods: strings(&["Stir-frying", "Steaming", "Boiling"]),
                meal_patterns: strings(&["3 main meals", "Frequent small meals"]),
            }),
            (Western, CulturePreferences {
                preferred_foods: strings(&["Meat", "Dairy", "Bread", "Vegetables"]),
                cooking_methods: strings(&["Grilling", "Baking", "Roasting"]),
                meal_patterns: strings(&["3 main meals", "Snacks"]),
            }),
        ]);

        let restrictions = BTreeMap::from([
            (DietaryPreference::Vegetarian, RestrictionGuide {
                avoid: strings(&["Chicken", "Beef", "Pork", "Fish", "Turkey"]),
                emphasize: strings(&["Legumes", "Nuts", "Seeds", "Dairy", "Eggs"]),
            }),
            (DietaryPreference::Vegan, RestrictionGuide {
                avoid: strings(&["Chicken", "Beef", "Pork", "Fish", "Dairy", "Eggs"]),
                emphasize: strings(&["Legumes", "Nuts", "Seeds", "Plant-based proteins"]),
            }),
            (DietaryPreference::Diabetic, RestrictionGuide {
                avoid: strings(&["High sugar foods", "Refined carbs", "Sugary drinks"]),
                emphasize: strings(&["Complex carbs", "Fiber-rich foods", "Lean proteins"]),
            }),
            (DietaryPreference::Hypertension, RestrictionGuide {
                avoid: strings(&["High sodium foods", "Processed foods"]),
                emphasize: strings(&["Potassium-rich foods", "Whole grains", "Lean proteins"]),
            }),
            (DietaryPreference::GlutenFree, RestrictionGuide {
                avoid: strings(&["Wheat", "Barley", "Rye", "Bread", "Pasta"]),
                emphasize: strings(&["Rice", "Quinoa", "Corn", "Naturally gluten-free foods"]),
            }),
        ]);

        let meal_suggestions = BTreeMap::from([
            (MealType::Breakfast, BTreeMap::from([
                (Indian, strings(&["Oats with nuts and fruits", "Vegetable upma", "Whole wheat paratha with yogurt"])),
                (Mediterranean, strings(&["Greek yogurt with berries", "Whole grain toast with avocado", "Oatmeal with nuts"])),
                (Asian, strings(&["Congee with vegetables", "Steamed vegetables with rice", "Miso soup with tofu"])),
                (Western, strings(&["Oatmeal with fruits", "Scrambled eggs with vegetables", "Whole grain cereal"])),
            ])),
            (MealType::Lunch, BTreeMap::from([
                (Indian, strings(&["Dal with rice and vegetables", "Quinoa pulao", "Mixed vegetable curry with roti"])),
                (Mediterranean, strings(&["Grilled fish with vegetables", "Quinoa salad", "Lentil soup with bread"])),
                (Asian, strings(&["Stir-fried vegetables with brown rice", "Miso soup with salmon", "Tofu with steamed vegetables"])),
                (Western, strings(&["Grilled chicken salad", "Quinoa bowl with vegetables", "Lean meat with sweet potato"])),
            ])),
            (MealType::Dinner, BTreeMap::from([
                (Indian, strings(&["Khichdi with vegetables", "Grilled paneer with salad", "Vegetable soup with roti"])),
                (Mediterranean, strings(&["Grilled fish with quinoa", "Vegetable stew", "Lentil salad"])),
                (Asian, strings(&["Steamed fish with vegetables", "Vegetable stir-fry", "Miso soup with tofu"])),
                (Western, strings(&["Grilled salmon with broccoli", "Chicken breast with quinoa", "Vegetable soup"])),
            ])),
            (MealType::Snack, BTreeMap::from([
                (Indian, strings(&["Mixed nuts", "Fruit salad", "Roasted chickpeas"])),
                (Mediterranean, strings(&["Hummus with vegetables", "Greek yogurt", "Mixed olives and nuts"])),
                (Asian, strings(&["Green tea with almonds", "Edamame", "Fresh fruit"])),
                (Western, strings(&["Apple with nut butter", "Greek yogurt", "Mixed berries"])),
            ])),
        ]);

        let generic_meals = BTreeMap::from([
            (MealType::Breakfast, strings(&["Oatmeal with fruits", "Smoothie with vegetables"])),
            (MealType::Lunch, strings(&["Quinoa salad", "Vegetable soup"])),
            (MealType::Dinner, strings(&["Grilled vegetables", "Lentil curry"])),
            (MealType::Snack, strings(&["Fresh fruit", "Mixed nuts"])),
        ]);

        let rule = |keywords: &[&str], section: &str, item: &str| ShoppingRule {
            keywords: strings(keywords),
            section: section.to_string(),
            item: item.to_string(),
        };
        let shopping_rules = vec![
            rule(&["chicken"], "Proteins", "Chicken breast"),
            rule(&["fish", "salmon"], "Proteins", "Fish/Salmon"),
            rule(&["eggs"], "Proteins", "Eggs"),
            rule(&["yogurt"], "Dairy", "Greek yogurt"),
            rule(&["quinoa"], "Grains", "Quinoa"),
            rule(&["rice"], "Grains", "Brown rice"),
            rule(&["vegetables"], "Vegetables", "Mixed vegetables"),
            rule(&["fruits", "berries"], "Fruits", "Fresh fruits/berries"),
            rule(&["nuts"], "Others", "Mixed nuts"),
            rule(&["oats"], "Grains", "Oats"),
        ];

        Self {
            goal_nutrition,
            goal_exercise,
            goal_exercise_types,
            cultures,
            restrictions,
            meal_suggestions,
            generic_meals,
            shopping_sections: strings(&["Proteins", "Vegetables", "Fruits", "Grains", "Dairy", "Others"]),
            shopping_rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlisted_goal_has_no_lines() {
        let tables = RecommendationTables::builtin();
        assert_eq!(tables.nutrition_for_goal(HealthGoal::WeightLoss).len(), 3);
        assert!(tables.nutrition_for_goal(HealthGoal::Strength).is_empty());
        assert!(tables.exercise_for_goal(HealthGoal::EnergyBoost).is_empty());
    }

    #[test]
    fn test_other_culture_has_no_meals() {
        let tables = RecommendationTables::builtin();
        assert!(tables.culture(CulturalBackground::Other).is_none());
        assert!(tables.meals_for(MealType::Lunch, CulturalBackground::Other).is_empty());
        assert_eq!(tables.meals_for(MealType::Lunch, CulturalBackground::Asian).len(), 3);
    }

    #[test]
    fn test_every_meal_has_generic_fallback() {
        let tables = RecommendationTables::builtin();
        for meal in [MealType::Breakfast, MealType::Lunch, MealType::Dinner, MealType::Snack] {
            assert!(!tables.generic_meals_for(meal).is_empty());
        }
    }

    #[test]
    fn test_rule_sections_are_declared() {
        let tables = RecommendationTables::builtin();
        for rule in &tables.shopping_rules {
            assert!(tables.shopping_sections.contains(&rule.section));
        }
    }
}
