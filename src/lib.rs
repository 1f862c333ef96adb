//! NutriFit Engine Library
//!
//! Nutrition and exercise gap analysis, personalized plans and progress
//! projection, served over MCP.

pub mod analysis;
pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod reference;
pub mod tools;
