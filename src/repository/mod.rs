use diesel::QueryResult;
use diesel::sqlite::SqliteConnection;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::filter::RecipeFilter;
use crate::domain::ingredient::{Ingredient, NewIngredient};
use crate::domain::recipe::{NewRecipe, Recipe, RecipeUpdate};
use crate::domain::types::{CategoryId, IngredientId, RecipeId};

pub mod category;
pub mod errors;
pub mod ingredient;
pub mod recipe;

pub use errors::{RepositoryError, RepositoryResult};

diesel::define_sql_function! {
    /// Unicode lowercase. SQLite's own `lower()` only folds ASCII, so this is
    /// registered on every pooled connection and backed by `str::to_lowercase`.
    fn fold_case(x: diesel::sql_types::Nullable<diesel::sql_types::Text>) -> diesel::sql_types::Nullable<diesel::sql_types::Text>;
}

diesel::define_sql_function! {
    /// SQLite `instr(haystack, needle)`: 1-based position of `needle`, 0 when absent.
    fn instr(
        haystack: diesel::sql_types::Nullable<diesel::sql_types::Text>,
        needle: diesel::sql_types::Nullable<diesel::sql_types::Text>,
    ) -> diesel::sql_types::Nullable<diesel::sql_types::Integer>;
}

/// Install the Rust-backed SQL functions the queries rely on.
pub(crate) fn register_sql_functions(conn: &mut SqliteConnection) -> QueryResult<()> {
    fold_case_utils::register_impl(conn, |value: Option<String>| {
        value.map(|v| v.to_lowercase())
    })
}

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for recipe aggregates.
///
/// Every returned recipe carries its ingredient links and categories.
pub trait RecipeReader {
    /// List recipes satisfying every active predicate of `filter`.
    fn list_recipes(&self, filter: &RecipeFilter) -> RepositoryResult<Vec<Recipe>>;
    /// Identifiers of the recipes satisfying `filter`, without associations.
    fn list_recipe_ids(&self, filter: &RecipeFilter) -> RepositoryResult<Vec<RecipeId>>;
    /// Load the given recipes. Unknown ids are skipped.
    fn get_recipes_by_ids(&self, ids: &[RecipeId]) -> RepositoryResult<Vec<Recipe>>;
    /// Retrieve a recipe by its identifier.
    fn get_recipe_by_id(&self, id: RecipeId) -> RepositoryResult<Option<Recipe>>;
}

/// Write operations for recipe aggregates.
pub trait RecipeWriter {
    /// Persist a new recipe with its links, creating missing ingredients and categories.
    fn create_recipe(&self, recipe: &NewRecipe) -> RepositoryResult<Recipe>;
    /// Apply a partial update. Returns `None` when the recipe does not exist.
    fn update_recipe(&self, id: RecipeId, update: &RecipeUpdate)
    -> RepositoryResult<Option<Recipe>>;
    /// Delete a recipe; links are removed by the store. Returns affected rows.
    fn delete_recipe(&self, id: RecipeId) -> RepositoryResult<usize>;
}

/// Read-only operations for ingredient entities.
pub trait IngredientReader {
    /// List all ingredients ordered by name.
    fn list_ingredients(&self) -> RepositoryResult<Vec<Ingredient>>;
    /// Retrieve an ingredient by its identifier.
    fn get_ingredient_by_id(&self, id: IngredientId) -> RepositoryResult<Option<Ingredient>>;
}

/// Write operations for ingredient entities.
pub trait IngredientWriter {
    /// Persist a new ingredient; duplicate names are a conflict.
    fn create_ingredient(&self, ingredient: &NewIngredient) -> RepositoryResult<Ingredient>;
    /// Delete an ingredient and every recipe link to it. Returns affected rows.
    fn delete_ingredient(&self, id: IngredientId) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category; duplicate names are a conflict.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Delete a category that no recipe references. Returns affected rows.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}
