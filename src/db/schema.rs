//! Schema bootstrap
//!
//! Creates the storage tables on first open. Every statement is idempotent so
//! this runs unconditionally at startup.

use rusqlite::Connection;

use super::connection::DbResult;

/// Create all tables and indexes if they do not exist yet
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- USERS
        -- Demographics, goals and preferences
        -- ============================================
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            age INTEGER NOT NULL,
            gender TEXT NOT NULL,
            height_cm REAL NOT NULL,
            weight_kg REAL NOT NULL,
            activity_level TEXT NOT NULL DEFAULT 'moderate',
            health_goals TEXT NOT NULL DEFAULT '[]',         -- JSON array
            dietary_preferences TEXT NOT NULL DEFAULT '[]',  -- JSON array
            cultural_background TEXT NOT NULL DEFAULT 'western',
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- FOOD LOGS
        -- One row per food item eaten; macros may be missing
        -- ============================================
        CREATE TABLE IF NOT EXISTS food_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date TEXT NOT NULL,                  -- ISO date: "2025-01-09"
            meal_type TEXT NOT NULL,
            food_item TEXT NOT NULL,
            quantity_g REAL NOT NULL DEFAULT 0,
            calories REAL,
            protein_g REAL,
            carbs_g REAL,
            fat_g REAL,
            fiber_g REAL,
            category TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_food_logs_user_date ON food_logs(user_id, date);

        -- ============================================
        -- EXERCISE LOGS
        -- ============================================
        CREATE TABLE IF NOT EXISTS exercise_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date TEXT NOT NULL,
            exercise_type TEXT NOT NULL,
            duration_min REAL NOT NULL CHECK(duration_min > 0),
            intensity TEXT NOT NULL CHECK(intensity IN ('low', 'moderate', 'high')),
            calories_burned REAL,                -- NULL = derive from MET table
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_exercise_logs_user_date ON exercise_logs(user_id, date);

        -- ============================================
        -- PROGRESS TRACKING
        -- ============================================
        CREATE TABLE IF NOT EXISTS progress_tracking (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date TEXT NOT NULL,
            weight_kg REAL NOT NULL,
            body_fat_percentage REAL,
            muscle_mass_kg REAL,
            energy_level INTEGER CHECK(energy_level BETWEEN 1 AND 10),
            sleep_hours REAL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_progress_user_date ON progress_tracking(user_id, date);

        -- ============================================
        -- SAVED RECOMMENDATIONS
        -- Plans serialized as JSON at generation time
        -- ============================================
        CREATE TABLE IF NOT EXISTS recommendations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date TEXT NOT NULL,
            nutrition_plan TEXT NOT NULL,
            exercise_plan TEXT NOT NULL,
            goals TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}
