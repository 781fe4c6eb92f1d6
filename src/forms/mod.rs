pub mod catalog;
pub mod recipes;
