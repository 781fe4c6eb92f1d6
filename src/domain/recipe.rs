use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{
    CategoryName, DurationMinutes, ImageUrl, IngredientId, IngredientName, IngredientQuantity,
    IngredientUnit, RecipeDescription, RecipeId, RecipeIngredientId, RecipeInstructions,
    RecipeTitle,
};

/// A recipe together with its ingredient links and categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: RecipeTitle,
    pub description: Option<RecipeDescription>,
    pub instructions: RecipeInstructions,
    pub duration_minutes: DurationMinutes,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub ingredients: Vec<RecipeIngredient>,
    pub categories: Vec<Category>,
}

/// Link between a recipe and an ingredient carrying the amount used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredient {
    pub id: RecipeIngredientId,
    pub recipe_id: RecipeId,
    pub ingredient_id: IngredientId,
    /// Name of the referenced ingredient, loaded alongside the link.
    pub name: IngredientName,
    pub quantity: Option<IngredientQuantity>,
    pub unit: Option<IngredientUnit>,
}

/// Ingredient reference used when creating or replacing recipe links.
///
/// The ingredient is looked up by exact name and created when missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRecipeIngredient {
    pub name: IngredientName,
    pub quantity: Option<IngredientQuantity>,
    pub unit: Option<IngredientUnit>,
}

/// Information required to create a new [`Recipe`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRecipe {
    pub title: RecipeTitle,
    pub description: Option<RecipeDescription>,
    pub instructions: RecipeInstructions,
    pub duration_minutes: DurationMinutes,
    pub image_url: Option<ImageUrl>,
    pub ingredients: Vec<NewRecipeIngredient>,
    pub categories: Vec<CategoryName>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`Recipe`].
///
/// `None` keeps the stored value. A supplied association list replaces the
/// existing links as a whole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeUpdate {
    pub title: Option<RecipeTitle>,
    pub description: Option<RecipeDescription>,
    pub instructions: Option<RecipeInstructions>,
    pub duration_minutes: Option<DurationMinutes>,
    pub image_url: Option<ImageUrl>,
    pub ingredients: Option<Vec<NewRecipeIngredient>>,
    pub categories: Option<Vec<CategoryName>>,
    pub updated_at: NaiveDateTime,
}

impl RecipeUpdate {
    /// Merge the supplied fields into `recipe`, leaving the others untouched.
    ///
    /// Association lists are not merged here because links need ids that only
    /// the store can assign.
    pub fn apply_scalars(&self, recipe: &mut Recipe) {
        if let Some(title) = &self.title {
            recipe.title = title.clone();
        }
        if let Some(description) = &self.description {
            recipe.description = Some(description.clone());
        }
        if let Some(instructions) = &self.instructions {
            recipe.instructions = instructions.clone();
        }
        if let Some(duration) = self.duration_minutes {
            recipe.duration_minutes = duration;
        }
        if let Some(image_url) = &self.image_url {
            recipe.image_url = Some(image_url.clone());
        }
        recipe.updated_at = self.updated_at;
    }
}
