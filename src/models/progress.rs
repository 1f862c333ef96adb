//! Progress tracking model
//!
//! Periodic body measurements and self-reported energy/sleep.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// A stored progress measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub weight_kg: f64,
    pub body_fat_percentage: Option<f64>,
    pub muscle_mass_kg: Option<f64>,
    pub energy_level: Option<i64>, // 1-10
    pub sleep_hours: Option<f64>,
    pub created_at: String,
}

/// Data for recording a measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressCreate {
    pub date: String,
    pub weight_kg: f64,
    pub body_fat_percentage: Option<f64>,
    pub muscle_mass_kg: Option<f64>,
    pub energy_level: Option<i64>,
    pub sleep_hours: Option<f64>,
}

impl ProgressCreate {
    pub fn validate(&self) -> Result<(), String> {
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(format!("weight_kg must be positive, got {}", self.weight_kg));
        }
        if let Some(e) = self.energy_level {
            if !(1..=10).contains(&e) {
                return Err(format!("energy_level must be between 1 and 10, got {}", e));
            }
        }
        if let Some(bf) = self.body_fat_percentage {
            if !(0.0..=100.0).contains(&bf) {
                return Err(format!("body_fat_percentage must be between 0 and 100, got {}", bf));
            }
        }
        if let Some(s) = self.sleep_hours {
            if !(0.0..=24.0).contains(&s) {
                return Err(format!("sleep_hours must be between 0 and 24, got {}", s));
            }
        }
        Ok(())
    }
}

impl ProgressEntry {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            weight_kg: row.get("weight_kg")?,
            body_fat_percentage: row.get("body_fat_percentage")?,
            muscle_mass_kg: row.get("muscle_mass_kg")?,
            energy_level: row.get("energy_level")?,
            sleep_hours: row.get("sleep_hours")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(conn: &Connection, user_id: i64, data: &ProgressCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO progress_tracking (user_id, date, weight_kg, body_fat_percentage,
                                           muscle_mass_kg, energy_level, sleep_hours)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                user_id,
                data.date,
                data.weight_kg,
                data.body_fat_percentage,
                data.muscle_mass_kg,
                data.energy_level,
                data.sleep_hours,
            ],
        )?;

        let id = conn.last_insert_rowid();
        let mut stmt = conn.prepare("SELECT * FROM progress_tracking WHERE id = ?1")?;
        match stmt.query_row([id], Self::from_row) {
            Ok(entry) => Ok(entry),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(DbError::NotFound(format!("progress entry {}", id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// A user's measurements, oldest first
    pub fn list_for_user(conn: &Connection, user_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM progress_tracking WHERE user_id = ?1 ORDER BY date, id",
        )?;
        let entries = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Most recent measurement, if any
    pub fn latest(conn: &Connection, user_id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM progress_tracking WHERE user_id = ?1 ORDER BY date DESC, id DESC LIMIT 1",
        )?;

        let result = stmt.query_row([user_id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
