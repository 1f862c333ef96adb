//! Log MCP Tools
//!
//! Food, exercise and progress logging plus date-range listing.

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;

use crate::analysis::activity::session_calories;
use crate::config::MAX_LOG_WINDOW_DAYS;
use crate::db::Database;
use crate::models::{
    ExerciseLog, ExerciseLogEntry, FoodLog, FoodLogEntry, ProgressCreate, ProgressEntry,
};
use crate::reference::ReferenceData;
use crate::tools::users::require_user;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO date (YYYY-MM-DD)
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Inclusive date range. Missing `end` means today; missing `start` means
/// `window_days` back from `end`.
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    window_days: u32,
) -> Result<(String, String), String> {
    if window_days > MAX_LOG_WINDOW_DAYS {
        return Err(format!("window_days must be between 1 and {}", MAX_LOG_WINDOW_DAYS));
    }
    let end = match end {
        Some(e) => parse_date(e)?,
        None => today(),
    };
    let start = match start {
        Some(s) => parse_date(s)?,
        None => end
            .checked_sub_signed(Duration::days(i64::from(window_days.max(1)) - 1))
            .ok_or_else(|| format!("window_days {} reaches before the earliest date", window_days))?,
    };
    if start > end {
        return Err(format!("start_date {} is after end_date {}", start, end));
    }
    Ok((start.format(DATE_FORMAT).to_string(), end.format(DATE_FORMAT).to_string()))
}

/// Response for list operations
#[derive(Debug, Serialize)]
pub struct ListLogsResponse<T> {
    pub user_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub entries: Vec<T>,
    pub total: usize,
}

/// Response for delete operations
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted_id: i64,
}

// ============================================================================
// Food Logs
// ============================================================================

/// Fill macros and category the caller left out from the food catalog.
/// Returns true when anything was filled.
pub fn fill_from_catalog(entry: &mut FoodLogEntry, reference: &ReferenceData) -> bool {
    let Some(info) = reference.foods.get(&entry.food_item) else {
        return false;
    };
    let n = info.per_100g.scale(entry.quantity_g / 100.0);
    let mut filled = false;

    for (slot, value) in [
        (&mut entry.calories, n.calories),
        (&mut entry.protein_g, n.protein),
        (&mut entry.carbs_g, n.carbs),
        (&mut entry.fat_g, n.fat),
        (&mut entry.fiber_g, n.fiber),
    ] {
        if slot.is_none() {
            *slot = Some(value);
            filled = true;
        }
    }
    if entry.category.is_none() {
        entry.category = Some(info.category.clone());
        filled = true;
    }
    filled
}

/// Log a food item
pub fn log_food(
    db: &Database,
    reference: &ReferenceData,
    user_id: i64,
    mut entry: FoodLogEntry,
    use_catalog: bool,
) -> Result<FoodLog, String> {
    parse_date(&entry.date)?;
    entry.validate()?;
    require_user(db, user_id)?;

    if use_catalog && fill_from_catalog(&mut entry, reference) {
        tracing::debug!("Filled missing values for '{}' from catalog", entry.food_item);
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    FoodLog::create(&conn, user_id, &entry).map_err(|e| format!("Failed to log food: {}", e))
}

pub fn list_food_logs(
    db: &Database,
    user_id: i64,
    start: Option<&str>,
    end: Option<&str>,
    window_days: u32,
) -> Result<ListLogsResponse<FoodLog>, String> {
    let (start_date, end_date) = resolve_range(start, end, window_days)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entries = FoodLog::list_by_date_range(&conn, user_id, &start_date, &end_date)
        .map_err(|e| format!("Failed to list food logs: {}", e))?;

    let total = entries.len();
    Ok(ListLogsResponse {
        user_id,
        start_date,
        end_date,
        entries,
        total,
    })
}

pub fn delete_food_log(db: &Database, user_id: i64, id: i64) -> Result<DeleteResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let deleted = FoodLog::delete(&conn, user_id, id)
        .map_err(|e| format!("Failed to delete food log: {}", e))?;

    if !deleted {
        return Err(format!("Food log not found with id: {}", id));
    }
    Ok(DeleteResponse {
        success: true,
        deleted_id: id,
    })
}

// ============================================================================
// Exercise Logs
// ============================================================================

/// Log an exercise session. Calories default to MET × weight × hours.
pub fn log_exercise(
    db: &Database,
    reference: &ReferenceData,
    user_id: i64,
    mut entry: ExerciseLogEntry,
) -> Result<ExerciseLog, String> {
    parse_date(&entry.date)?;
    entry.validate()?;
    let user = require_user(db, user_id)?;

    if entry.calories_burned.is_none() {
        if reference.exercises.get(&entry.exercise_type).is_none() {
            tracing::warn!(
                "Unknown exercise type '{}', using default MET",
                entry.exercise_type
            );
        }
        entry.calories_burned = Some(session_calories(
            &entry,
            user.profile.weight_kg,
            &reference.exercises,
        ));
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    ExerciseLog::create(&conn, user_id, &entry)
        .map_err(|e| format!("Failed to log exercise: {}", e))
}

pub fn list_exercise_logs(
    db: &Database,
    user_id: i64,
    start: Option<&str>,
    end: Option<&str>,
    window_days: u32,
) -> Result<ListLogsResponse<ExerciseLog>, String> {
    let (start_date, end_date) = resolve_range(start, end, window_days)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entries = ExerciseLog::list_by_date_range(&conn, user_id, &start_date, &end_date)
        .map_err(|e| format!("Failed to list exercise logs: {}", e))?;

    let total = entries.len();
    Ok(ListLogsResponse {
        user_id,
        start_date,
        end_date,
        entries,
        total,
    })
}

pub fn delete_exercise_log(db: &Database, user_id: i64, id: i64) -> Result<DeleteResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let deleted = ExerciseLog::delete(&conn, user_id, id)
        .map_err(|e| format!("Failed to delete exercise log: {}", e))?;

    if !deleted {
        return Err(format!("Exercise log not found with id: {}", id));
    }
    Ok(DeleteResponse {
        success: true,
        deleted_id: id,
    })
}

// ============================================================================
// Progress
// ============================================================================

/// Response for list_progress
#[derive(Debug, Serialize)]
pub struct ProgressHistory {
    pub user_id: i64,
    pub entries: Vec<ProgressEntry>,
    pub total: usize,
    /// Latest weight minus first weight
    pub weight_change_kg: Option<f64>,
}

pub fn log_progress(db: &Database, user_id: i64, data: ProgressCreate) -> Result<ProgressEntry, String> {
    parse_date(&data.date)?;
    data.validate()?;
    require_user(db, user_id)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    ProgressEntry::create(&conn, user_id, &data)
        .map_err(|e| format!("Failed to log progress: {}", e))
}

pub fn list_progress(db: &Database, user_id: i64) -> Result<ProgressHistory, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entries = ProgressEntry::list_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to list progress: {}", e))?;

    let weight_change_kg = match (entries.first(), entries.last()) {
        (Some(first), Some(last)) if entries.len() > 1 => {
            Some(((last.weight_kg - first.weight_kg) * 10.0).round() / 10.0)
        }
        _ => None,
    };

    let total = entries.len();
    Ok(ProgressHistory {
        user_id,
        entries,
        total,
        weight_change_kg,
    })
}
