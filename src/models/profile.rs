//! User profile model
//!
//! Demographics, goals, dietary restrictions and cultural background. The
//! analyzers only ever read a [`UserProfile`]; [`User`] is the stored record.

use std::collections::BTreeSet;

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// Gender as used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "sedentary" => Some(ActivityLevel::Low),
            "moderate" | "medium" => Some(ActivityLevel::Moderate),
            "high" | "active" => Some(ActivityLevel::High),
            _ => None,
        }
    }

    /// Like `from_str`, but unrecognized labels fall back to Moderate
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            tracing::warn!("Unknown activity level '{}', using {}", s, ActivityLevel::default().as_str());
            ActivityLevel::default()
        })
    }

    /// Total energy expenditure multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Low => 1.2,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.725,
        }
    }

    /// Ordinal used as a model feature (Low=1, Moderate=2, High=3)
    pub fn ordinal(&self) -> f64 {
        match self {
            ActivityLevel::Low => 1.0,
            ActivityLevel::Moderate => 2.0,
            ActivityLevel::High => 3.0,
        }
    }
}

/// Multiplier for a free-form activity level label, 1.55 when unrecognized
pub fn activity_multiplier(level: &str) -> f64 {
    ActivityLevel::from_str(level)
        .map(|l| l.multiplier())
        .unwrap_or(ActivityLevel::Moderate.multiplier())
}

/// Health goal a user can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGoal {
    WeightLoss,
    MuscleGain,
    HeartHealth,
    DiabetesManagement,
    EnergyBoost,
    FitnessImprovement,
    Flexibility,
    StressRelief,
    Endurance,
    Strength,
}

impl HealthGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthGoal::WeightLoss => "weight_loss",
            HealthGoal::MuscleGain => "muscle_gain",
            HealthGoal::HeartHealth => "heart_health",
            HealthGoal::DiabetesManagement => "diabetes_management",
            HealthGoal::EnergyBoost => "energy_boost",
            HealthGoal::FitnessImprovement => "fitness_improvement",
            HealthGoal::Flexibility => "flexibility",
            HealthGoal::StressRelief => "stress_relief",
            HealthGoal::Endurance => "endurance",
            HealthGoal::Strength => "strength",
        }
    }

    /// Goals are keyed by lower-cased strings; spaces and dashes normalize to underscores
    pub fn from_str(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "weight_loss" => Some(HealthGoal::WeightLoss),
            "muscle_gain" => Some(HealthGoal::MuscleGain),
            "heart_health" => Some(HealthGoal::HeartHealth),
            "diabetes_management" => Some(HealthGoal::DiabetesManagement),
            "energy_boost" => Some(HealthGoal::EnergyBoost),
            "fitness_improvement" => Some(HealthGoal::FitnessImprovement),
            "flexibility" => Some(HealthGoal::Flexibility),
            "stress_relief" => Some(HealthGoal::StressRelief),
            "endurance" => Some(HealthGoal::Endurance),
            "strength" => Some(HealthGoal::Strength),
            _ => None,
        }
    }
}

/// Dietary restriction or preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    Vegetarian,
    Vegan,
    Diabetic,
    Hypertension,
    GlutenFree,
}

impl DietaryPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryPreference::Vegetarian => "vegetarian",
            DietaryPreference::Vegan => "vegan",
            DietaryPreference::Diabetic => "diabetic",
            DietaryPreference::Hypertension => "hypertension",
            DietaryPreference::GlutenFree => "gluten_free",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "vegetarian" => Some(DietaryPreference::Vegetarian),
            "vegan" => Some(DietaryPreference::Vegan),
            "diabetic" => Some(DietaryPreference::Diabetic),
            "hypertension" => Some(DietaryPreference::Hypertension),
            "gluten_free" => Some(DietaryPreference::GlutenFree),
            _ => None,
        }
    }
}

/// Cultural background used for food familiarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CulturalBackground {
    Indian,
    Mediterranean,
    Asian,
    #[default]
    Western,
    Other,
}

impl CulturalBackground {
    pub fn as_str(&self) -> &'static str {
        match self {
            CulturalBackground::Indian => "indian",
            CulturalBackground::Mediterranean => "mediterranean",
            CulturalBackground::Asian => "asian",
            CulturalBackground::Western => "western",
            CulturalBackground::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "indian" => CulturalBackground::Indian,
            "mediterranean" => CulturalBackground::Mediterranean,
            "asian" => CulturalBackground::Asian,
            "western" => CulturalBackground::Western,
            _ => CulturalBackground::Other,
        }
    }
}

/// Read-only input to the analyzers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goals: BTreeSet<HealthGoal>,
    #[serde(default)]
    pub dietary_preferences: BTreeSet<DietaryPreference>,
    #[serde(default)]
    pub cultural_background: CulturalBackground,
}

impl UserProfile {
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }

    pub fn has_goal(&self, goal: HealthGoal) -> bool {
        self.goals.contains(&goal)
    }
}

/// A stored user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(flatten)]
    pub profile: UserProfile,
    pub created_at: String,
}

/// Data for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub profile: UserProfile,
}

/// Data for updating a user; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub age: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goals: Option<BTreeSet<HealthGoal>>,
    pub dietary_preferences: Option<BTreeSet<DietaryPreference>>,
    pub cultural_background: Option<CulturalBackground>,
}

fn json_column<T: serde::de::DeserializeOwned>(row: &Row, column: &str) -> rusqlite::Result<T> {
    let raw: String = row.get(column)?;
    let idx = row.as_ref().column_index(column)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn to_json<T: Serialize>(value: &T, column: &'static str) -> DbResult<String> {
    serde_json::to_string(value).map_err(|source| DbError::JsonColumn { column, source })
}

impl User {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let gender: String = row.get("gender")?;
        let activity: String = row.get("activity_level")?;
        let culture: String = row.get("cultural_background")?;

        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            profile: UserProfile {
                age: row.get("age")?,
                gender: Gender::from_str(&gender),
                height_cm: row.get("height_cm")?,
                weight_kg: row.get("weight_kg")?,
                activity_level: ActivityLevel::from_str(&activity).unwrap_or_default(),
                goals: json_column(row, "health_goals")?,
                dietary_preferences: json_column(row, "dietary_preferences")?,
                cultural_background: CulturalBackground::from_str(&culture),
            },
            created_at: row.get("created_at")?,
        })
    }

    /// Create a new user
    pub fn create(conn: &Connection, data: &UserCreate) -> DbResult<Self> {
        let p = &data.profile;
        conn.execute(
            r#"
            INSERT INTO users (username, age, gender, height_cm, weight_kg, activity_level,
                               health_goals, dietary_preferences, cultural_background)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                data.username.trim(),
                p.age,
                p.gender.as_str(),
                p.height_cm,
                p.weight_kg,
                p.activity_level.as_str(),
                to_json(&p.goals, "health_goals")?,
                to_json(&p.dietary_preferences, "dietary_preferences")?,
                p.cultural_background.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::NotFound(format!("user {}", id)))
    }

    /// Get a user by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by username (case-sensitive)
    pub fn get_by_username(conn: &Connection, username: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users WHERE username = ?1")?;

        let result = stmt.query_row([username.trim()], Self::from_row);
        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all users
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users ORDER BY username")?;
        let users = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Update a user's profile fields
    pub fn update(conn: &Connection, id: i64, data: &UserUpdate) -> DbResult<Option<Self>> {
        let Some(existing) = Self::get_by_id(conn, id)? else {
            return Ok(None);
        };

        let mut p = existing.profile;
        if let Some(age) = data.age {
            p.age = age;
        }
        if let Some(w) = data.weight_kg {
            p.weight_kg = w;
        }
        if let Some(h) = data.height_cm {
            p.height_cm = h;
        }
        if let Some(level) = data.activity_level {
            p.activity_level = level;
        }
        if let Some(goals) = &data.goals {
            p.goals = goals.clone();
        }
        if let Some(prefs) = &data.dietary_preferences {
            p.dietary_preferences = prefs.clone();
        }
        if let Some(culture) = data.cultural_background {
            p.cultural_background = culture;
        }

        conn.execute(
            r#"
            UPDATE users SET age = ?1, height_cm = ?2, weight_kg = ?3, activity_level = ?4,
                             health_goals = ?5, dietary_preferences = ?6, cultural_background = ?7
            WHERE id = ?8
            "#,
            params![
                p.age,
                p.height_cm,
                p.weight_kg,
                p.activity_level.as_str(),
                to_json(&p.goals, "health_goals")?,
                to_json(&p.dietary_preferences, "dietary_preferences")?,
                p.cultural_background.as_str(),
                id,
            ],
        )?;

        Self::get_by_id(conn, id)
    }
}
