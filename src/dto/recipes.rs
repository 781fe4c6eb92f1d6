use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::ingredient::Ingredient;
use crate::domain::recipe::{Recipe, RecipeIngredient};

/// Wire shape of a recipe with its eagerly loaded associations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    pub duration_minutes: i32,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub ingredients: Vec<RecipeIngredientDto>,
    pub categories: Vec<CategoryDto>,
}

impl From<Recipe> for RecipeDto {
    fn from(value: Recipe) -> Self {
        Self {
            id: value.id.get(),
            title: value.title.into_inner(),
            description: value.description.map(|d| d.into_inner()),
            instructions: value.instructions.into_inner(),
            duration_minutes: value.duration_minutes.get(),
            image_url: value.image_url.map(|u| u.into_inner()),
            created_at: value.created_at,
            updated_at: value.updated_at,
            ingredients: value
                .ingredients
                .into_iter()
                .map(RecipeIngredientDto::from)
                .collect(),
            categories: value.categories.into_iter().map(CategoryDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientDto {
    pub id: i32,
    pub ingredient_id: i32,
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl From<RecipeIngredient> for RecipeIngredientDto {
    fn from(value: RecipeIngredient) -> Self {
        Self {
            id: value.id.get(),
            ingredient_id: value.ingredient_id.get(),
            name: value.name.into_inner(),
            quantity: value.quantity.map(|q| q.into_inner()),
            unit: value.unit.map(|u| u.into_inner()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientDto {
    pub id: i32,
    pub name: String,
}

impl From<Ingredient> for IngredientDto {
    fn from(value: Ingredient) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
        }
    }
}
