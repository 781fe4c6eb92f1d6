//! Diesel row types. Conversions into domain types live next to each model.

pub mod category;
pub mod config;
pub mod ingredient;
pub mod recipe;
