//! Exercise log model
//!
//! Exercise sessions as logged by the user. Calories burned may be left out
//! and are then derived from the MET table at analysis time.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// Session intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Moderate,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Moderate => "moderate",
            Intensity::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "light" => Some(Intensity::Low),
            "moderate" | "medium" => Some(Intensity::Moderate),
            "high" | "vigorous" => Some(Intensity::High),
            _ => None,
        }
    }
}

/// A single exercise session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLogEntry {
    pub date: String,
    pub exercise_type: String,
    pub duration_min: f64,
    pub intensity: Intensity,
    pub calories_burned: Option<f64>,
}

impl ExerciseLogEntry {
    pub fn new(date: &str, exercise_type: &str, duration_min: f64, intensity: Intensity) -> Self {
        Self {
            date: date.to_string(),
            exercise_type: exercise_type.to_string(),
            duration_min,
            intensity,
            calories_burned: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.exercise_type.trim().is_empty() {
            return Err("exercise_type must not be empty".to_string());
        }
        if !self.duration_min.is_finite() || self.duration_min <= 0.0 {
            return Err(format!("duration_min must be positive, got {}", self.duration_min));
        }
        if let Some(c) = self.calories_burned {
            if !c.is_finite() || c < 0.0 {
                return Err(format!("calories_burned must be non-negative, got {}", c));
            }
        }
        Ok(())
    }
}

/// A stored exercise log row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLog {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    pub entry: ExerciseLogEntry,
    pub created_at: String,
}

impl ExerciseLog {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let intensity: String = row.get("intensity")?;
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            entry: ExerciseLogEntry {
                date: row.get("date")?,
                exercise_type: row.get("exercise_type")?,
                duration_min: row.get("duration_min")?,
                intensity: Intensity::from_str(&intensity).unwrap_or_default(),
                calories_burned: row.get("calories_burned")?,
            },
            created_at: row.get("created_at")?,
        })
    }

    /// Record an exercise session for a user
    pub fn create(conn: &Connection, user_id: i64, entry: &ExerciseLogEntry) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO exercise_logs (user_id, date, exercise_type, duration_min, intensity, calories_burned)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                user_id,
                entry.date,
                entry.exercise_type.trim(),
                entry.duration_min,
                entry.intensity.as_str(),
                entry.calories_burned,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::NotFound(format!("exercise log {}", id)))
    }

    /// Get an exercise log by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM exercise_logs WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's exercise logs in an inclusive date range, oldest first
    pub fn list_by_date_range(
        conn: &Connection,
        user_id: i64,
        start_date: &str,
        end_date: &str,
    ) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM exercise_logs
            WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
            ORDER BY date, id
            "#,
        )?;
        let logs = stmt
            .query_map(params![user_id, start_date, end_date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(logs)
    }

    /// Delete an exercise log entry
    pub fn delete(conn: &Connection, user_id: i64, id: i64) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM exercise_logs WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }
}
