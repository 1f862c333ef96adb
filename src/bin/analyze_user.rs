//! Print a full analysis for one user as JSON
//! Usage: cargo run --bin analyze_user -- <username> [end_date] [weeks]

use nutrifit::analysis::model::load_model;
use nutrifit::analysis::recommend::DEFAULT_AVAILABLE_DAYS;
use nutrifit::config::{Config, MAX_PROJECTION_WEEKS};
use nutrifit::reference::ReferenceData;
use nutrifit::tools::insights::{self, Window};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let Some(username) = args.get(1) else {
        eprintln!("Usage: analyze_user <username> [end_date YYYY-MM-DD] [weeks]");
        std::process::exit(2);
    };
    let end_date = args.get(2).map(|s| s.as_str());

    let config = Config::from_env()?;
    let weeks = match args.get(3) {
        Some(w) => match w.parse::<usize>() {
            Ok(n) if (1..=MAX_PROJECTION_WEEKS).contains(&n) => n,
            _ => {
                eprintln!("weeks must be a number between 1 and {}", MAX_PROJECTION_WEEKS);
                std::process::exit(2);
            }
        },
        None => config.projection_weeks,
    };
    eprintln!("Database: {}", config.database_path.display());

    let database = nutrifit::db::Database::new(&config.database_path)?;
    database.with_conn(nutrifit::db::schema::ensure_schema)?;

    let (reference, _) = ReferenceData::load(config.reference_path.as_deref())?;
    let model = load_model(config.model_path.as_deref());

    let user = nutrifit::tools::users::get_user(&database, None, Some(username))?
        .ok_or_else(|| format!("No user named '{}'", username))?;
    let user_id = user.user.id;

    let window = Window {
        start: None,
        end: end_date,
        days: config.log_window_days,
    };

    let report = json!({
        "user": user,
        "caloric_needs": insights::caloric_needs(&database, user_id)?,
        "nutrition": insights::analyze_nutrition(&database, &reference, user_id, window)?,
        "activity": insights::analyze_activity(&database, &reference, user_id, window)?,
        "recommendations": insights::recommendations(&database, &reference, user_id, window, DEFAULT_AVAILABLE_DAYS, None, false)?,
        "progress": insights::forecast_progress(
            &database, &reference, model.as_deref(), user_id, window, weeks, DEFAULT_AVAILABLE_DAYS, None,
        )?,
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
