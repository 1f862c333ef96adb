//! NutriFit Tools module
//!
//! Tool implementations behind the MCP server. Each takes the database and
//! returns `Result<_, String>` for the server to wrap.

pub mod insights;
pub mod logs;
pub mod status;
pub mod users;
