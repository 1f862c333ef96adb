//! Shared nutrient data structure
//!
//! Used by food logs, daily intake aggregation and the food catalog.

use serde::{Deserialize, Serialize};

/// The five tracked macro nutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
}

impl Nutrient {
    pub const ALL: [Nutrient; 5] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
        Nutrient::Fiber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fat => "fat",
            Nutrient::Fiber => "fiber",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "calories" | "kcal" => Some(Nutrient::Calories),
            "protein" | "protein_g" => Some(Nutrient::Protein),
            "carbs" | "carbs_g" | "carbohydrates" => Some(Nutrient::Carbs),
            "fat" | "fat_g" => Some(Nutrient::Fat),
            "fiber" | "fiber_g" | "fibre" => Some(Nutrient::Fiber),
            _ => None,
        }
    }

    /// Fixed per-adult daily reference value (kcal for calories, grams otherwise)
    pub fn daily_target(&self) -> f64 {
        match self {
            Nutrient::Calories => 2000.0,
            Nutrient::Protein => 50.0,
            Nutrient::Carbs => 225.0,
            Nutrient::Fat => 65.0,
            Nutrient::Fiber => 25.0,
        }
    }
}

/// Macro nutrient amounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
    pub fiber: f64,   // grams
}

impl Nutrients {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
            Nutrient::Fiber => self.fiber,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        match nutrient {
            Nutrient::Calories => self.calories = value,
            Nutrient::Protein => self.protein = value,
            Nutrient::Carbs => self.carbs = value,
            Nutrient::Fat => self.fat = value,
            Nutrient::Fiber => self.fiber = value,
        }
    }

    /// Scale all values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
            fiber: self.fiber * multiplier,
        }
    }

    pub fn add(&self, other: &Nutrients) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            fiber: self.fiber + other.fiber,
        }
    }
}

impl std::ops::Add for Nutrients {
    type Output = Nutrients;

    fn add(self, other: Nutrients) -> Nutrients {
        Nutrients::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrients {
    type Output = Nutrients;

    fn mul(self, multiplier: f64) -> Nutrients {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrients {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrients::zero(), |acc, n| acc + n)
    }
}
