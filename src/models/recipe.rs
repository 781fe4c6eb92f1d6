use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recipe::{
    NewRecipe as DomainNewRecipe, Recipe as DomainRecipe,
    RecipeIngredient as DomainRecipeIngredient, RecipeUpdate as DomainRecipeUpdate,
};
use crate::domain::types::{
    DurationMinutes, ImageUrl, IngredientName, IngredientQuantity, IngredientUnit,
    RecipeDescription, RecipeInstructions, RecipeTitle, TypeConstraintError,
};
use crate::models::category::Category;
use crate::models::ingredient::Ingredient;

/// Diesel model representing a row in the `recipes` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Recipe {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    pub duration_minutes: i32,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Recipe`]. Associations are written separately.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub instructions: &'a str,
    pub duration_minutes: i32,
    pub image_url: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of the scalar recipe columns; `None` fields are skipped.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChangeset<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub instructions: Option<&'a str>,
    pub duration_minutes: Option<i32>,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Row of the `recipe_ingredients` association table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Recipe, foreign_key = recipe_id))]
#[diesel(table_name = crate::schema::recipe_ingredients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeIngredient {
    pub id: i32,
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewRecipeIngredient<'a> {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity: Option<&'a str>,
    pub unit: Option<&'a str>,
}

/// Row of the `recipe_categories` association table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Insertable, Associations)]
#[diesel(belongs_to(Recipe, foreign_key = recipe_id))]
#[diesel(table_name = crate::schema::recipe_categories)]
#[diesel(primary_key(recipe_id, category_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeCategory {
    pub recipe_id: i32,
    pub category_id: i32,
}

impl<'a> From<&'a DomainNewRecipe> for NewRecipe<'a> {
    fn from(recipe: &'a DomainNewRecipe) -> Self {
        Self {
            title: recipe.title.as_str(),
            description: recipe.description.as_ref().map(|d| d.as_str()),
            instructions: recipe.instructions.as_str(),
            duration_minutes: recipe.duration_minutes.get(),
            image_url: recipe.image_url.as_ref().map(|u| u.as_str()),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

impl<'a> From<&'a DomainRecipeUpdate> for RecipeChangeset<'a> {
    fn from(update: &'a DomainRecipeUpdate) -> Self {
        Self {
            title: update.title.as_ref().map(|t| t.as_str()),
            description: update.description.as_ref().map(|d| d.as_str()),
            instructions: update.instructions.as_ref().map(|i| i.as_str()),
            duration_minutes: update.duration_minutes.map(DurationMinutes::get),
            image_url: update.image_url.as_ref().map(|u| u.as_str()),
            updated_at: update.updated_at,
        }
    }
}

impl TryFrom<(RecipeIngredient, Ingredient)> for DomainRecipeIngredient {
    type Error = TypeConstraintError;

    fn try_from((link, ingredient): (RecipeIngredient, Ingredient)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: link.id.try_into()?,
            recipe_id: link.recipe_id.try_into()?,
            ingredient_id: link.ingredient_id.try_into()?,
            name: IngredientName::new(ingredient.name)?,
            quantity: link
                .quantity
                .filter(|q| !q.trim().is_empty())
                .map(IngredientQuantity::new)
                .transpose()?,
            unit: link
                .unit
                .filter(|u| !u.trim().is_empty())
                .map(IngredientUnit::new)
                .transpose()?,
        })
    }
}

impl Recipe {
    /// Assemble the domain aggregate from the row and its loaded associations.
    pub fn into_domain(
        self,
        ingredients: Vec<(RecipeIngredient, Ingredient)>,
        categories: Vec<(RecipeCategory, Category)>,
    ) -> Result<DomainRecipe, TypeConstraintError> {
        Ok(DomainRecipe {
            id: self.id.try_into()?,
            title: RecipeTitle::new(self.title)?,
            description: self
                .description
                .filter(|d| !d.trim().is_empty())
                .map(RecipeDescription::new)
                .transpose()?,
            instructions: RecipeInstructions::new(self.instructions)?,
            duration_minutes: DurationMinutes::new(self.duration_minutes)?,
            image_url: self
                .image_url
                .filter(|u| !u.trim().is_empty())
                .map(ImageUrl::new)
                .transpose()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            ingredients: ingredients
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
            categories: categories
                .into_iter()
                .map(|(_, category)| category.try_into())
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}
