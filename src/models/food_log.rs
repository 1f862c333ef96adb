//! Food log model
//!
//! One row per food item eaten. Macro values are optional; the nutrition
//! analyzer imputes anything missing.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// Meal type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Unrecognized labels are treated as snacks
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" | "supper" => MealType::Dinner,
            _ => MealType::Snack,
        }
    }
}

/// A single recorded food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub date: String,
    pub meal_type: MealType,
    pub food_item: String,
    pub quantity_g: f64,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl FoodLogEntry {
    /// Entry with every macro present
    pub fn complete(
        date: &str,
        meal_type: MealType,
        food_item: &str,
        quantity_g: f64,
        macros: [f64; 5],
    ) -> Self {
        let [calories, protein, carbs, fat, fiber] = macros;
        Self {
            date: date.to_string(),
            meal_type,
            food_item: food_item.to_string(),
            quantity_g,
            calories: Some(calories),
            protein_g: Some(protein),
            carbs_g: Some(carbs),
            fat_g: Some(fat),
            fiber_g: Some(fiber),
            category: None,
        }
    }

    /// Quantity and any present macros must be finite and non-negative
    pub fn validate(&self) -> Result<(), String> {
        if self.food_item.trim().is_empty() {
            return Err("food_item must not be empty".to_string());
        }
        let checks = [
            ("quantity_g", Some(self.quantity_g)),
            ("calories", self.calories),
            ("protein_g", self.protein_g),
            ("carbs_g", self.carbs_g),
            ("fat_g", self.fat_g),
            ("fiber_g", self.fiber_g),
        ];
        for (name, value) in checks {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(format!("{} must be a non-negative number, got {}", name, v));
                }
            }
        }
        Ok(())
    }
}

/// A stored food log row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLog {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    pub entry: FoodLogEntry,
    pub created_at: String,
}

impl FoodLog {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let meal_type: String = row.get("meal_type")?;
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            entry: FoodLogEntry {
                date: row.get("date")?,
                meal_type: MealType::from_str(&meal_type),
                food_item: row.get("food_item")?,
                quantity_g: row.get("quantity_g")?,
                calories: row.get("calories")?,
                protein_g: row.get("protein_g")?,
                carbs_g: row.get("carbs_g")?,
                fat_g: row.get("fat_g")?,
                fiber_g: row.get("fiber_g")?,
                category: row.get("category")?,
            },
            created_at: row.get("created_at")?,
        })
    }

    /// Record a food log entry for a user
    pub fn create(conn: &Connection, user_id: i64, entry: &FoodLogEntry) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO food_logs (user_id, date, meal_type, food_item, quantity_g,
                                   calories, protein_g, carbs_g, fat_g, fiber_g, category)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                user_id,
                entry.date,
                entry.meal_type.as_str(),
                entry.food_item.trim(),
                entry.quantity_g,
                entry.calories,
                entry.protein_g,
                entry.carbs_g,
                entry.fat_g,
                entry.fiber_g,
                entry.category,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::NotFound(format!("food log {}", id)))
    }

    /// Get a food log by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_logs WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's food logs in an inclusive date range, oldest first
    pub fn list_by_date_range(
        conn: &Connection,
        user_id: i64,
        start_date: &str,
        end_date: &str,
    ) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM food_logs
            WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
            ORDER BY date, id
            "#,
        )?;
        let logs = stmt
            .query_map(params![user_id, start_date, end_date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(logs)
    }

    /// Delete a food log entry
    pub fn delete(conn: &Connection, user_id: i64, id: i64) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM food_logs WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::ensure_schema;
    use crate::models::{Gender, UserCreate, UserProfile, User};

    fn setup() -> (Connection, i64) {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        let user = User::create(
            &conn,
            &UserCreate {
                username: "tester".to_string(),
                profile: UserProfile {
                    age: 30,
                    gender: Gender::Male,
                    height_cm: 180.0,
                    weight_kg: 80.0,
                    activity_level: Default::default(),
                    goals: Default::default(),
                    dietary_preferences: Default::default(),
                    cultural_background: Default::default(),
                },
            },
        )
        .unwrap();
        (conn, user.id)
    }

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!(MealType::from_str("Breakfast"), MealType::Breakfast);
        assert_eq!(MealType::from_str("supper"), MealType::Dinner);
        assert_eq!(MealType::from_str("elevenses"), MealType::Snack);
    }

    #[test]
    fn test_validate_rejects_negative_macros() {
        let mut entry = FoodLogEntry::complete(
            "2025-01-09", MealType::Lunch, "Rice", 150.0, [195.0, 4.0, 42.0, 0.5, 0.6],
        );
        assert!(entry.validate().is_ok());

        entry.protein_g = Some(-1.0);
        assert!(entry.validate().is_err());

        entry.protein_g = None;
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_missing_macros_round_trip_as_null() {
        let (conn, user_id) = setup();
        let mut entry = FoodLogEntry::complete(
            "2025-01-09", MealType::Dinner, "Salmon", 120.0, [250.0, 30.0, 0.0, 16.0, 0.0],
        );
        entry.fiber_g = None;

        let saved = FoodLog::create(&conn, user_id, &entry).unwrap();
        assert_eq!(saved.entry.fiber_g, None);
        assert_eq!(saved.entry.protein_g, Some(30.0));
    }

    #[test]
    fn test_list_by_date_range_is_inclusive() {
        let (conn, user_id) = setup();
        for date in ["2025-01-01", "2025-01-05", "2025-01-10"] {
            let entry = FoodLogEntry::complete(
                date, MealType::Breakfast, "Oats", 50.0, [190.0, 8.0, 33.0, 3.0, 5.0],
            );
            FoodLog::create(&conn, user_id, &entry).unwrap();
        }

        let logs = FoodLog::list_by_date_range(&conn, user_id, "2025-01-05", "2025-01-10").unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].entry.date, "2025-01-05");

        assert!(FoodLog::delete(&conn, user_id, logs[0].id).unwrap());
        assert!(!FoodLog::delete(&conn, user_id, logs[0].id).unwrap());
    }
}
