//! Domain entities and value objects, free of persistence concerns.

pub mod category;
pub mod filter;
pub mod ingredient;
pub mod recipe;
pub mod types;
