//! User MCP Tools
//!
//! Create, look up and update user profiles.

use serde::Serialize;

use crate::analysis::calories::{calculate_bmi, round_to};
use crate::db::Database;
use crate::models::{User, UserCreate, UserProfile, UserUpdate};

/// Response for create_user / get_user / update_user
#[derive(Debug, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub bmi: f64,
}

impl From<User> for UserDetail {
    fn from(user: User) -> Self {
        let bmi = round_to(calculate_bmi(user.profile.weight_kg, user.profile.height_cm), 1);
        Self { user, bmi }
    }
}

/// Response for list_users
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub goals: Vec<String>,
}

fn validate_profile(profile: &UserProfile) -> Result<(), String> {
    if profile.age == 0 || profile.age > 120 {
        return Err(format!("age must be between 1 and 120, got {}", profile.age));
    }
    if !profile.weight_kg.is_finite() || profile.weight_kg <= 0.0 {
        return Err(format!("weight_kg must be positive, got {}", profile.weight_kg));
    }
    if !profile.height_cm.is_finite() || profile.height_cm <= 0.0 {
        return Err(format!("height_cm must be positive, got {}", profile.height_cm));
    }
    Ok(())
}

/// Create a new user
pub fn create_user(db: &Database, data: UserCreate) -> Result<UserDetail, String> {
    if data.username.trim().is_empty() {
        return Err("username must not be empty".to_string());
    }
    validate_profile(&data.profile)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if User::get_by_username(&conn, &data.username)
        .map_err(|e| format!("Database error: {}", e))?
        .is_some()
    {
        return Err(format!("User '{}' already exists", data.username));
    }

    let user = User::create(&conn, &data).map_err(|e| format!("Failed to create user: {}", e))?;
    tracing::info!("Created user {} ({})", user.id, user.username);
    Ok(user.into())
}

/// Get a user by ID or username
pub fn get_user(
    db: &Database,
    id: Option<i64>,
    username: Option<&str>,
) -> Result<Option<UserDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let user = match (id, username) {
        (Some(id), _) => User::get_by_id(&conn, id),
        (None, Some(name)) => User::get_by_username(&conn, name),
        (None, None) => return Err("Provide either id or username".to_string()),
    }
    .map_err(|e| format!("Failed to get user: {}", e))?;

    Ok(user.map(UserDetail::from))
}

/// Resolve a user or fail with a not-found message
pub fn require_user(db: &Database, user_id: i64) -> Result<User, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| format!("User not found with id: {}", user_id))
}

/// List all users
pub fn list_users(db: &Database) -> Result<ListUsersResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let users = User::list(&conn).map_err(|e| format!("Failed to list users: {}", e))?;

    let users: Vec<UserSummary> = users
        .into_iter()
        .map(|u| UserSummary {
            id: u.id,
            username: u.username,
            goals: u.profile.goals.iter().map(|g| g.as_str().to_string()).collect(),
        })
        .collect();
    let total = users.len();
    Ok(ListUsersResponse { users, total })
}

/// Update profile fields
pub fn update_user(db: &Database, id: i64, data: UserUpdate) -> Result<Option<UserDetail>, String> {
    if let Some(w) = data.weight_kg {
        if !w.is_finite() || w <= 0.0 {
            return Err(format!("weight_kg must be positive, got {}", w));
        }
    }
    if let Some(h) = data.height_cm {
        if !h.is_finite() || h <= 0.0 {
            return Err(format!("height_cm must be positive, got {}", h));
        }
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let user = User::update(&conn, id, &data).map_err(|e| format!("Failed to update user: {}", e))?;
    Ok(user.map(UserDetail::from))
}
