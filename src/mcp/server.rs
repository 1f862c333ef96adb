//! NutriFit MCP Server Implementation
//!
//! Implements the MCP server with all NutriFit tools.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::analysis::model::ProgressModel;
use crate::analysis::projection::model_status;
use crate::config::{Config, MAX_PROJECTION_WEEKS};
use crate::db::Database;
use crate::models::{
    ActivityLevel, CulturalBackground, DietaryPreference, ExerciseLogEntry, FoodLogEntry, Gender,
    HealthGoal, Intensity, MealType, ProgressCreate, UserCreate, UserProfile, UserUpdate,
};
use crate::reference::ReferenceData;
use crate::tools::insights::{self, Window};
use crate::tools::logs;
use crate::tools::status::{ServiceFacts, StatusTracker, USAGE_INSTRUCTIONS};
use crate::tools::users;

/// NutriFit MCP Service
#[derive(Clone)]
pub struct NutrifitService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    reference: Arc<ReferenceData>,
    model: Option<Arc<dyn ProgressModel>>,
    config: Arc<Config>,
    tool_router: ToolRouter<NutrifitService>,
}

impl NutrifitService {
    pub fn new(
        config: Config,
        database: Database,
        reference: Arc<ReferenceData>,
        model: Option<Arc<dyn ProgressModel>>,
        reference_source: String,
    ) -> Self {
        let facts = ServiceFacts {
            exercise_catalog_size: reference.exercises.len(),
            food_catalog_size: reference.foods.len(),
            reference_source,
            model_status: model_status(model.as_deref()),
        };
        let database_path: PathBuf = config.database_path.clone();

        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path, facts))),
            database,
            reference,
            model,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    fn window<'a>(&self, start: Option<&'a str>, end: Option<&'a str>, days: Option<u32>) -> Window<'a> {
        Window {
            start,
            end,
            days: days.unwrap_or(self.config.log_window_days),
        }
    }
}

fn invalid(message: String) -> McpError {
    McpError::invalid_params(message, None)
}

fn parse_set<T: Ord>(
    values: &[String],
    kind: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<BTreeSet<T>, McpError> {
    values
        .iter()
        .map(|v| parse(v).ok_or_else(|| invalid(format!("Unknown {}: '{}'", kind, v))))
        .collect()
}

fn parse_activity(value: Option<&str>) -> Option<ActivityLevel> {
    value.map(ActivityLevel::from_str_or_default)
}

// ============================================================================
// User Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateUserParams {
    pub username: String,
    pub age: u32,
    /// Male, Female or Other
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Low, Moderate (default) or High
    pub activity_level: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    /// Indian, Mediterranean, Asian, Western (default) or Other
    pub cultural_background: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetUserParams {
    pub id: Option<i64>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateUserParams {
    pub id: i64,
    pub age: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<String>,
    /// Replaces the stored goals when present
    pub goals: Option<Vec<String>>,
    /// Replaces the stored preferences when present
    pub dietary_preferences: Option<Vec<String>>,
    pub cultural_background: Option<String>,
}

// ============================================================================
// Log Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogFoodParams {
    pub user_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    /// breakfast, lunch, dinner or snack
    pub meal_type: String,
    pub food_item: String,
    pub quantity_g: f64,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub category: Option<String>,
    /// Fill missing macros from the food catalog (default true)
    #[serde(default = "default_true")]
    pub use_catalog: bool,
}

fn default_true() -> bool { true }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogExerciseParams {
    pub user_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    pub exercise_type: String,
    pub duration_min: f64,
    /// low, moderate (default) or high
    pub intensity: Option<String>,
    pub calories_burned: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateRangeParams {
    pub user_id: i64,
    /// YYYY-MM-DD, defaults to window_days before end_date
    pub start_date: Option<String>,
    /// YYYY-MM-DD, defaults to today
    pub end_date: Option<String>,
    pub window_days: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteLogParams {
    pub user_id: i64,
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogProgressParams {
    pub user_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    pub weight_kg: f64,
    pub body_fat_percentage: Option<f64>,
    pub muscle_mass_kg: Option<f64>,
    /// 1-10
    pub energy_level: Option<i64>,
    pub sleep_hours: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UserIdParams {
    pub user_id: i64,
}

// ============================================================================
// Analysis Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateRecommendationsParams {
    pub user_id: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub window_days: Option<u32>,
    /// Training days per week (default 3)
    pub available_days: Option<usize>,
    /// Seed for reproducible exercise picks
    pub seed: Option<u64>,
    /// Store the generated plan
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSavedParams {
    pub user_id: i64,
    #[serde(default = "default_saved_limit")]
    pub limit: usize,
}

fn default_saved_limit() -> usize { 10 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PredictProgressParams {
    pub user_id: i64,
    /// Weeks to project (default from server config)
    pub weeks: Option<usize>,
    pub available_days: Option<usize>,
    pub seed: Option<u64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub window_days: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestFoodsParams {
    /// Nutrient names: protein, fiber, calories
    pub nutrients: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestExercisesParams {
    /// Goal names; when empty the user's stored goals are used
    #[serde(default)]
    pub goals: Vec<String>,
    pub user_id: Option<i64>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutrifitService {
    // --- Status ---

    #[tool(description = "Get the current status of the NutriFit service including build info, database status, reference data, model mode and process information")]
    async fn nutrifit_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for logging data and running analyses. Call this when starting a session or when unsure how to use the NutriFit tools.")]
    fn usage_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    // --- Users ---

    #[tool(description = "Create a user profile with demographics, activity level, goals, dietary preferences and cultural background")]
    fn create_user(&self, Parameters(p): Parameters<CreateUserParams>) -> Result<CallToolResult, McpError> {
        let data = UserCreate {
            username: p.username,
            profile: UserProfile {
                age: p.age,
                gender: Gender::from_str(&p.gender),
                height_cm: p.height_cm,
                weight_kg: p.weight_kg,
                activity_level: parse_activity(p.activity_level.as_deref()).unwrap_or_default(),
                goals: parse_set(&p.goals, "goal", HealthGoal::from_str)?,
                dietary_preferences: parse_set(&p.dietary_preferences, "dietary preference", DietaryPreference::from_str)?,
                cultural_background: p.cultural_background.as_deref().map(CulturalBackground::from_str).unwrap_or_default(),
            },
        };
        let result = users::create_user(&self.database, data).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get a user profile by id or username, including current BMI")]
    fn get_user(&self, Parameters(p): Parameters<GetUserParams>) -> Result<CallToolResult, McpError> {
        let result = users::get_user(&self.database, p.id, p.username.as_deref()).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(user) => serde_json::to_string_pretty(&user),
            None => Ok(r#"{"error": "User not found"}"#.to_string()),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List all users with their goals")]
    fn list_users(&self) -> Result<CallToolResult, McpError> {
        let result = users::list_users(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Update user profile fields. Goals and dietary preferences replace the stored sets when given.")]
    fn update_user(&self, Parameters(p): Parameters<UpdateUserParams>) -> Result<CallToolResult, McpError> {
        let data = UserUpdate {
            age: p.age,
            weight_kg: p.weight_kg,
            height_cm: p.height_cm,
            activity_level: parse_activity(p.activity_level.as_deref()),
            goals: p.goals.as_deref().map(|g| parse_set(g, "goal", HealthGoal::from_str)).transpose()?,
            dietary_preferences: p.dietary_preferences.as_deref()
                .map(|d| parse_set(d, "dietary preference", DietaryPreference::from_str)).transpose()?,
            cultural_background: p.cultural_background.as_deref().map(CulturalBackground::from_str),
        };
        let result = users::update_user(&self.database, p.id, data).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(user) => serde_json::to_string_pretty(&user),
            None => Ok(format!(r#"{{"error": "User not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Food Logs ---

    #[tool(description = "Log a food item eaten. Macros are optional; known foods are filled from the catalog unless use_catalog is false.")]
    fn log_food(&self, Parameters(p): Parameters<LogFoodParams>) -> Result<CallToolResult, McpError> {
        let entry = FoodLogEntry {
            date: p.date,
            meal_type: MealType::from_str(&p.meal_type),
            food_item: p.food_item,
            quantity_g: p.quantity_g,
            calories: p.calories,
            protein_g: p.protein_g,
            carbs_g: p.carbs_g,
            fat_g: p.fat_g,
            fiber_g: p.fiber_g,
            category: p.category,
        };
        let result = logs::log_food(&self.database, &self.reference, p.user_id, entry, p.use_catalog)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List a user's food logs in a date range (defaults to the configured window ending today)")]
    fn list_food_logs(&self, Parameters(p): Parameters<DateRangeParams>) -> Result<CallToolResult, McpError> {
        let w = self.window(p.start_date.as_deref(), p.end_date.as_deref(), p.window_days);
        let result = logs::list_food_logs(&self.database, p.user_id, w.start, w.end, w.days)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete a food log entry")]
    fn delete_food_log(&self, Parameters(p): Parameters<DeleteLogParams>) -> Result<CallToolResult, McpError> {
        let result = logs::delete_food_log(&self.database, p.user_id, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Exercise Logs ---

    #[tool(description = "Log an exercise session. Calories burned are estimated from MET × weight × duration when omitted.")]
    fn log_exercise(&self, Parameters(p): Parameters<LogExerciseParams>) -> Result<CallToolResult, McpError> {
        let intensity = match p.intensity.as_deref() {
            Some(s) => Intensity::from_str(s)
                .ok_or_else(|| invalid(format!("Invalid intensity '{}'. Valid: low, moderate, high", s)))?,
            None => Intensity::default(),
        };
        let entry = ExerciseLogEntry {
            date: p.date,
            exercise_type: p.exercise_type,
            duration_min: p.duration_min,
            intensity,
            calories_burned: p.calories_burned,
        };
        let result = logs::log_exercise(&self.database, &self.reference, p.user_id, entry)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List a user's exercise logs in a date range (defaults to the configured window ending today)")]
    fn list_exercise_logs(&self, Parameters(p): Parameters<DateRangeParams>) -> Result<CallToolResult, McpError> {
        let w = self.window(p.start_date.as_deref(), p.end_date.as_deref(), p.window_days);
        let result = logs::list_exercise_logs(&self.database, p.user_id, w.start, w.end, w.days)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete an exercise log entry")]
    fn delete_exercise_log(&self, Parameters(p): Parameters<DeleteLogParams>) -> Result<CallToolResult, McpError> {
        let result = logs::delete_exercise_log(&self.database, p.user_id, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Progress ---

    #[tool(description = "Record a body measurement (weight, optional body fat, muscle mass, energy 1-10, sleep hours)")]
    fn log_progress(&self, Parameters(p): Parameters<LogProgressParams>) -> Result<CallToolResult, McpError> {
        let data = ProgressCreate {
            date: p.date,
            weight_kg: p.weight_kg,
            body_fat_percentage: p.body_fat_percentage,
            muscle_mass_kg: p.muscle_mass_kg,
            energy_level: p.energy_level,
            sleep_hours: p.sleep_hours,
        };
        let result = logs::log_progress(&self.database, p.user_id, data).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List a user's recorded measurements, oldest first, with overall weight change")]
    fn list_progress(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let result = logs::list_progress(&self.database, p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Analysis ---

    #[tool(description = "Calculate BMR, activity-adjusted daily calories, BMI and water intake for a user")]
    fn calculate_caloric_needs(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let result = insights::caloric_needs(&self.database, p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Analyze food logs: average daily intake, nutritional gaps (below 80% of target), eating patterns and advice")]
    fn analyze_nutrition(&self, Parameters(p): Parameters<DateRangeParams>) -> Result<CallToolResult, McpError> {
        let w = self.window(p.start_date.as_deref(), p.end_date.as_deref(), p.window_days);
        let result = insights::analyze_nutrition(&self.database, &self.reference, p.user_id, w)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Analyze exercise logs: weekly frequency, category mix, fitness gaps and advice")]
    fn analyze_activity(&self, Parameters(p): Parameters<DateRangeParams>) -> Result<CallToolResult, McpError> {
        let w = self.window(p.start_date.as_deref(), p.end_date.as_deref(), p.window_days);
        let result = insights::analyze_activity(&self.database, &self.reference, p.user_id, w)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Generate personalized nutrition, exercise and lifestyle recommendations with a 7-day meal plan, weekly exercise plan and shopping list. Set save=true to store the plan.")]
    fn generate_recommendations(&self, Parameters(p): Parameters<GenerateRecommendationsParams>) -> Result<CallToolResult, McpError> {
        let w = self.window(p.start_date.as_deref(), p.end_date.as_deref(), p.window_days);
        let days = p.available_days.unwrap_or(crate::analysis::recommend::DEFAULT_AVAILABLE_DAYS);
        let result = insights::recommendations(&self.database, &self.reference, p.user_id, w, days, p.seed, p.save)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List a user's saved recommendation plans, most recent first")]
    fn list_saved_recommendations(&self, Parameters(p): Parameters<ListSavedParams>) -> Result<CallToolResult, McpError> {
        let result = insights::list_saved_recommendations(&self.database, p.user_id, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Project weekly weight, BMI and energy under a freshly generated plan and assess the user's goals")]
    fn predict_progress(&self, Parameters(p): Parameters<PredictProgressParams>) -> Result<CallToolResult, McpError> {
        let weeks = p.weeks.unwrap_or(self.config.projection_weeks);
        if weeks == 0 || weeks > MAX_PROJECTION_WEEKS {
            return Err(invalid(format!("weeks must be between 1 and {}", MAX_PROJECTION_WEEKS)));
        }
        let w = self.window(p.start_date.as_deref(), p.end_date.as_deref(), p.window_days);
        let days = p.available_days.unwrap_or(crate::analysis::recommend::DEFAULT_AVAILABLE_DAYS);
        let result = insights::forecast_progress(
            &self.database, &self.reference, self.model.as_deref(), p.user_id, w, weeks, days, p.seed,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Suggestions ---

    #[tool(description = "Suggest catalog foods richest in the given nutrients (protein, fiber, calories)")]
    fn suggest_foods(&self, Parameters(p): Parameters<SuggestFoodsParams>) -> Result<CallToolResult, McpError> {
        let result = insights::suggest_foods(&self.reference, &p.nutrients).map_err(invalid)?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Suggest exercises for health goals, or for a user's stored goals when none are given")]
    fn suggest_exercises(&self, Parameters(p): Parameters<SuggestExercisesParams>) -> Result<CallToolResult, McpError> {
        let result = insights::suggest_exercises(&self.database, &self.reference, p.user_id, &p.goals)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutrifitService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrifit".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("NutriFit Engine".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "NutriFit Engine - nutrition and exercise gap analysis. \
                 IMPORTANT: Call usage_instructions first. \
                 Users: create_user/get_user/list_users/update_user. \
                 Logs: log_food/list_food_logs/delete_food_log, log_exercise/list_exercise_logs/delete_exercise_log, \
                 log_progress/list_progress. \
                 Analysis: calculate_caloric_needs, analyze_nutrition, analyze_activity. \
                 Plans: generate_recommendations (save=true to store), list_saved_recommendations, predict_progress. \
                 Catalog: suggest_foods, suggest_exercises. \
                 Status: nutrifit_status."
                    .into(),
            ),
        }
    }
}
