//! Helpers for integration tests.

#![allow(dead_code)]

use chrono::Utc;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_recipes::db::{DbPool, establish_connection_pool};
use pushkind_recipes::domain::recipe::{NewRecipe, NewRecipeIngredient};
use pushkind_recipes::domain::types::{
    CategoryName, DurationMinutes, IngredientName, IngredientQuantity, IngredientUnit,
    RecipeDescription, RecipeInstructions, RecipeTitle,
};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Recipe with the given scalar fields and no associations.
pub fn new_recipe(title: &str, description: Option<&str>, duration: i32) -> NewRecipe {
    let now = Utc::now().naive_utc();
    NewRecipe {
        title: RecipeTitle::new(title).expect("valid title"),
        description: description.map(|d| RecipeDescription::new(d).expect("valid description")),
        instructions: RecipeInstructions::new("Cook until done.").expect("valid instructions"),
        duration_minutes: DurationMinutes::new(duration).expect("valid duration"),
        image_url: None,
        ingredients: vec![],
        categories: vec![],
        created_at: now,
        updated_at: now,
    }
}

pub fn categories(names: &[&str]) -> Vec<CategoryName> {
    names
        .iter()
        .map(|n| CategoryName::new(*n).expect("valid category"))
        .collect()
}

pub fn ingredient(name: &str, quantity: &str, unit: &str) -> NewRecipeIngredient {
    NewRecipeIngredient {
        name: IngredientName::new(name).expect("valid ingredient"),
        quantity: Some(IngredientQuantity::new(quantity).expect("valid quantity")),
        unit: Some(IngredientUnit::new(unit).expect("valid unit")),
    }
}
