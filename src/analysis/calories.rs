//! BMR and daily calorie calculations
//!
//! Revised Harris-Benedict equations. Inputs are not validated; a non-positive
//! weight or height simply produces a meaningless number.

use serde::{Deserialize, Serialize};

use crate::models::{Gender, UserProfile};

/// Basal metabolic rate in kcal/day
pub fn calculate_bmr(age: f64, weight_kg: f64, height_cm: f64, gender: Gender) -> f64 {
    match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Gender::Female | Gender::Other => {
            447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age
        }
    }
}

/// Body mass index; height in centimetres
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Recommended daily water in litres (35 ml per kg), one decimal
pub fn water_intake_liters(weight_kg: f64) -> f64 {
    round_to(weight_kg * 0.035, 1)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaloricNeeds {
    pub bmr: f64,
    pub activity_multiplier: f64,
    /// BMR × multiplier rounded to the nearest kcal
    pub daily_calories: f64,
    pub bmi: f64,
    pub water_liters: f64,
}

/// Daily energy need for a profile
pub fn calculate_caloric_needs(profile: &UserProfile) -> CaloricNeeds {
    let bmr = calculate_bmr(
        profile.age as f64,
        profile.weight_kg,
        profile.height_cm,
        profile.gender,
    );
    let multiplier = profile.activity_level.multiplier();

    CaloricNeeds {
        bmr,
        activity_multiplier: multiplier,
        daily_calories: (bmr * multiplier).round(),
        bmi: round_to(calculate_bmi(profile.weight_kg, profile.height_cm), 1),
        water_liters: water_intake_liters(profile.weight_kg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityLevel;

    fn profile(gender: Gender, activity_level: ActivityLevel) -> UserProfile {
        UserProfile {
            age: 30,
            gender,
            height_cm: 180.0,
            weight_kg: 80.0,
            activity_level,
            goals: Default::default(),
            dietary_preferences: Default::default(),
            cultural_background: Default::default(),
        }
    }

    #[test]
    fn test_bmr_male() {
        // 88.362 + 1071.76 + 863.82 - 170.31
        let bmr = calculate_bmr(30.0, 80.0, 180.0, Gender::Male);
        assert!((bmr - 1853.632).abs() < 0.001);
    }

    #[test]
    fn test_bmr_female_formula_used_for_other() {
        let female = calculate_bmr(30.0, 80.0, 180.0, Gender::Female);
        let other = calculate_bmr(30.0, 80.0, 180.0, Gender::Other);
        assert!((female - 1615.093).abs() < 0.001);
        assert_eq!(female, other);
    }

    #[test]
    fn test_daily_calories_rounded() {
        let needs = calculate_caloric_needs(&profile(Gender::Male, ActivityLevel::Moderate));
        assert_eq!(needs.activity_multiplier, 1.55);
        assert_eq!(needs.daily_calories, 2873.0);

        let low = calculate_caloric_needs(&profile(Gender::Male, ActivityLevel::Low));
        assert_eq!(low.daily_calories, 2224.0);
    }

    #[test]
    fn test_bmi_and_water() {
        let needs = calculate_caloric_needs(&profile(Gender::Male, ActivityLevel::High));
        assert!((needs.bmi - 24.7).abs() < 0.001);
        assert!((needs.water_liters - 2.8).abs() < 0.001);
    }
}
