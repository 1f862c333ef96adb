//! Food catalog
//!
//! Per-100 g macro values and a coarse category for common foods.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Nutrient, Nutrients};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodInfo {
    pub name: String,
    /// Values per 100 g
    pub per_100g: Nutrients,
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<FoodInfo>", into = "Vec<FoodInfo>")]
pub struct FoodCatalog {
    entries: Vec<FoodInfo>,
    index: HashMap<String, usize>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl From<Vec<FoodInfo>> for FoodCatalog {
    fn from(entries: Vec<FoodInfo>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            catalog.upsert(entry);
        }
        catalog
    }
}

impl From<FoodCatalog> for Vec<FoodInfo> {
    fn from(catalog: FoodCatalog) -> Self {
        catalog.entries
    }
}

impl FoodCatalog {
    /// Insert or replace by name. Returns true when an entry was replaced.
    pub fn upsert(&mut self, entry: FoodInfo) -> bool {
        match self.index.get(&key(&entry.name)) {
            Some(&i) => {
                self.entries[i] = entry;
                true
            }
            None => {
                self.index.insert(key(&entry.name), self.entries.len());
                self.entries.push(entry);
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FoodInfo> {
        self.index.get(&key(name)).map(|&i| &self.entries[i])
    }

    pub fn category(&self, name: &str) -> Option<&str> {
        self.get(name).map(|f| f.category.as_str())
    }

    /// Foods whose per-100 g value of `nutrient` exceeds `min`, highest first.
    /// Ties keep catalog order.
    pub fn ranked_by(&self, nutrient: Nutrient, min: f64) -> Vec<&FoodInfo> {
        let mut foods: Vec<&FoodInfo> = self
            .entries
            .iter()
            .filter(|f| f.per_100g.get(nutrient) > min)
            .collect();
        foods.sort_by(|a, b| {
            b.per_100g
                .get(nutrient)
                .total_cmp(&a.per_100g.get(nutrient))
        });
        foods
    }

    pub fn all(&self) -> &[FoodInfo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn builtin() -> Self {
        // name, kcal, protein, carbs, fat, fiber, category
        let rows: &[(&str, f64, f64, f64, f64, f64, &str)] = &[
            ("Apple", 52.0, 0.3, 14.0, 0.2, 2.4, "Fruit"),
            ("Banana", 89.0, 1.1, 23.0, 0.3, 2.6, "Fruit"),
            ("Orange", 47.0, 0.9, 12.0, 0.1, 2.4, "Fruit"),
            ("Strawberries", 32.0, 0.7, 8.0, 0.3, 2.0, "Fruit"),
            ("Blueberries", 57.0, 0.7, 14.0, 0.3, 2.4, "Fruit"),
            ("Grapes", 69.0, 0.6, 17.0, 0.2, 0.9, "Fruit"),
            ("Mango", 60.0, 0.8, 15.0, 0.4, 1.6, "Fruit"),
            ("Pineapple", 50.0, 0.5, 13.0, 0.1, 1.4, "Fruit"),
            ("Watermelon", 30.0, 0.6, 8.0, 0.2, 0.4, "Fruit"),
            ("Cantaloupe", 34.0, 0.8, 8.0, 0.2, 0.9, "Fruit"),
            ("Kiwi", 61.0, 1.1, 15.0, 0.5, 3.0, "Fruit"),
            ("Papaya", 43.0, 0.5, 11.0, 0.3, 1.7, "Fruit"),
            ("Pomegranate", 83.0, 1.7, 19.0, 1.2, 4.0, "Fruit"),
            ("Avocado", 160.0, 2.0, 9.0, 15.0, 7.0, "Fruit"),
            ("Broccoli", 34.0, 2.8, 7.0, 0.4, 2.6, "Vegetable"),
            ("Spinach", 23.0, 2.9, 3.6, 0.4, 2.2, "Vegetable"),
            ("Carrots", 41.0, 0.9, 10.0, 0.2, 2.8, "Vegetable"),
            ("Tomato", 18.0, 0.9, 3.9, 0.2, 1.2, "Vegetable"),
            ("Cucumber", 15.0, 0.7, 3.6, 0.1, 0.5, "Vegetable"),
            ("Bell Pepper", 31.0, 1.0, 7.3, 0.3, 2.5, "Vegetable"),
            ("Onion", 40.0, 1.1, 9.3, 0.1, 1.7, "Vegetable"),
            ("Garlic", 149.0, 6.4, 33.1, 0.5, 2.1, "Vegetable"),
            ("Sweet Potato", 86.0, 2.0, 20.0, 0.1, 3.0, "Vegetable"),
            ("Potato", 77.0, 2.0, 17.0, 0.1, 2.2, "Vegetable"),
            ("Cauliflower", 25.0, 1.9, 5.0, 0.3, 2.0, "Vegetable"),
            ("Brussels Sprouts", 43.0, 3.4, 9.0, 0.3, 3.8, "Vegetable"),
            ("Asparagus", 20.0, 2.2, 3.9, 0.1, 2.1, "Vegetable"),
            ("Zucchini", 17.0, 1.2, 3.1, 0.3, 1.0, "Vegetable"),
            ("Chicken Breast", 165.0, 31.0, 0.0, 3.6, 0.0, "Protein"),
            ("Salmon", 208.0, 25.4, 0.0, 13.4, 0.0, "Protein"),
            ("Tuna", 144.0, 30.0, 0.0, 1.0, 0.0, "Protein"),
            ("Turkey", 104.0, 29.0, 0.0, 1.0, 0.0, "Protein"),
            ("Beef", 250.0, 26.0, 0.0, 15.0, 0.0, "Protein"),
            ("Pork", 242.0, 26.0, 0.0, 14.0, 0.0, "Protein"),
            ("Eggs", 155.0, 13.0, 1.1, 11.0, 0.0, "Protein"),
            ("Tofu", 76.0, 8.1, 1.9, 4.8, 0.6, "Protein"),
            ("Greek Yogurt", 59.0, 10.0, 3.6, 0.4, 0.0, "Dairy"),
            ("Cottage Cheese", 98.0, 11.1, 3.4, 4.3, 0.0, "Dairy"),
            ("Milk", 42.0, 3.4, 5.0, 1.0, 0.0, "Dairy"),
            ("Cheese", 113.0, 25.0, 1.3, 33.0, 0.0, "Dairy"),
            ("Beans", 127.0, 9.0, 23.0, 0.5, 6.4, "Legume"),
            ("Lentils", 116.0, 9.0, 20.0, 0.4, 7.9, "Legume"),
            ("Chickpeas", 164.0, 8.9, 27.4, 2.6, 12.2, "Legume"),
            ("Rice", 130.0, 2.7, 28.0, 0.3, 0.4, "Grain"),
            ("Quinoa", 368.0, 14.1, 64.0, 6.1, 7.0, "Grain"),
            ("Oats", 389.0, 16.9, 66.0, 6.9, 10.6, "Grain"),
            ("Bread", 265.0, 9.0, 49.0, 3.2, 2.7, "Grain"),
            ("Pasta", 131.0, 5.0, 25.0, 1.1, 1.8, "Grain"),
            ("Barley", 354.0, 12.5, 73.5, 2.3, 17.3, "Grain"),
            ("Bulgur", 342.0, 12.3, 76.0, 1.3, 18.3, "Grain"),
            ("Cornmeal", 365.0, 8.1, 74.3, 3.9, 7.3, "Grain"),
            ("Almonds", 579.0, 21.2, 22.0, 49.9, 12.5, "Nuts"),
            ("Walnuts", 654.0, 15.2, 14.0, 65.2, 6.7, "Nuts"),
            ("Cashews", 553.0, 18.2, 30.0, 44.0, 3.3, "Nuts"),
            ("Peanuts", 567.0, 26.0, 16.0, 49.2, 8.5, "Nuts"),
            ("Sunflower Seeds", 584.0, 20.8, 20.0, 51.5, 8.6, "Seeds"),
            ("Chia Seeds", 486.0, 16.5, 42.1, 30.7, 34.4, "Seeds"),
            ("Flaxseeds", 534.0, 18.3, 29.0, 42.2, 27.3, "Seeds"),
            ("Olive Oil", 884.0, 0.0, 0.0, 100.0, 0.0, "Fat"),
            ("Coconut Oil", 862.0, 0.0, 0.0, 99.1, 0.0, "Fat"),
            ("Butter", 717.0, 0.9, 0.1, 81.1, 0.0, "Fat"),
            ("Honey", 304.0, 0.3, 82.4, 0.0, 0.2, "Sweetener"),
            ("Dark Chocolate", 546.0, 7.8, 46.4, 30.0, 11.0, "Treat"),
        ];

        rows.iter()
            .map(|&(name, calories, protein, carbs, fat, fiber, category)| FoodInfo {
                name: name.to_string(),
                per_100g: Nutrients { calories, protein, carbs, fat, fiber },
                category: category.to_string(),
            })
            .collect::<Vec<_>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_size_and_lookup() {
        let catalog = FoodCatalog::builtin();
        assert_eq!(catalog.len(), 63);
        assert_eq!(catalog.category("greek yogurt"), Some("Dairy"));
        assert_eq!(catalog.category("Pizza"), None);
    }

    #[test]
    fn test_ranked_by_protein_keeps_catalog_order_on_ties() {
        let catalog = FoodCatalog::builtin();
        let names: Vec<&str> = catalog
            .ranked_by(Nutrient::Protein, 15.0)
            .into_iter()
            .take(6)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Chicken Breast", "Tuna", "Turkey", "Beef", "Pork", "Peanuts"]
        );
    }

    #[test]
    fn test_ranked_by_threshold_is_strict() {
        let catalog = FoodCatalog::builtin();
        let fiber = catalog.ranked_by(Nutrient::Fiber, 5.0);
        assert!(fiber.iter().all(|f| f.per_100g.fiber > 5.0));
        assert_eq!(fiber[0].name, "Chia Seeds");
    }
}
