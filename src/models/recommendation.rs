//! Saved recommendation model
//!
//! A snapshot of a generated plan, kept so users can look back at what was
//! suggested on a given day.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::{DbError, DbResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecommendation {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub nutrition_plan: Value,
    pub exercise_plan: Value,
    pub goals: Value,
    pub created_at: String,
}

fn json_value(row: &Row, column: &str) -> rusqlite::Result<Value> {
    let raw: String = row.get(column)?;
    let idx = row.as_ref().column_index(column)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl SavedRecommendation {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            nutrition_plan: json_value(row, "nutrition_plan")?,
            exercise_plan: json_value(row, "exercise_plan")?,
            goals: json_value(row, "goals")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Serialize and store the three plan parts
    pub fn save<N, E, G>(
        conn: &Connection,
        user_id: i64,
        date: &str,
        nutrition_plan: &N,
        exercise_plan: &E,
        goals: &G,
    ) -> DbResult<Self>
    where
        N: Serialize,
        E: Serialize,
        G: Serialize,
    {
        let nutrition = serde_json::to_string(nutrition_plan)
            .map_err(|source| DbError::JsonColumn { column: "nutrition_plan", source })?;
        let exercise = serde_json::to_string(exercise_plan)
            .map_err(|source| DbError::JsonColumn { column: "exercise_plan", source })?;
        let goals = serde_json::to_string(goals)
            .map_err(|source| DbError::JsonColumn { column: "goals", source })?;

        conn.execute(
            r#"
            INSERT INTO recommendations (user_id, date, nutrition_plan, exercise_plan, goals)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![user_id, date, nutrition, exercise, goals],
        )?;

        let id = conn.last_insert_rowid();
        let mut stmt = conn.prepare("SELECT * FROM recommendations WHERE id = ?1")?;
        match stmt.query_row([id], Self::from_row) {
            Ok(saved) => Ok(saved),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(DbError::NotFound(format!("recommendation {}", id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Most recent first
    pub fn list_for_user(conn: &Connection, user_id: i64, limit: usize) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM recommendations WHERE user_id = ?1 ORDER BY date DESC, id DESC LIMIT ?2",
        )?;
        let saved = stmt
            .query_map(params![user_id, limit as i64], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(saved)
    }
}
