use chrono::Utc;
use serde::Deserialize;
use serde::de::IgnoredAny;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::filter::{RecipeFilter, parse_number, suggestion_limit};
use crate::domain::recipe::{NewRecipe, NewRecipeIngredient, RecipeUpdate};
use crate::domain::types::{
    CategoryName, DurationMinutes, ImageUrl, IngredientName, IngredientQuantity, IngredientUnit,
    RecipeDescription, RecipeInstructions, RecipeTitle, TypeConstraintError,
};

/// Numeric input that may arrive as a JSON number, as text, or as garbage.
///
/// Anything that does not read as a finite number counts as absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl LenientNumber {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) | Self::Other(_) => None,
            Self::Text(text) => parse_number(text),
        }
    }
}

/// Text input that may arrive with the wrong JSON type. Non-strings count as absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LenientText {
    Text(String),
    Other(IgnoredAny),
}

impl LenientText {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Other(_) => None,
        }
    }
}

/// Query parameters accepted when listing recipes.
///
/// Built from the raw key/value pairs so that a repeated key keeps its first
/// value instead of failing the whole request. Unknown keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilterQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub max_duration: Option<LenientNumber>,
}

impl FromIterator<(String, String)> for RecipeFilterQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "search" if query.search.is_none() => query.search = Some(value),
                "category" if query.category.is_none() => query.category = Some(value),
                "maxDuration" if query.max_duration.is_none() => {
                    query.max_duration = Some(LenientNumber::Text(value))
                }
                _ => {}
            }
        }
        query
    }
}

impl From<RecipeFilterQuery> for RecipeFilter {
    fn from(query: RecipeFilterQuery) -> Self {
        RecipeFilter::new(
            query.search.as_deref(),
            query.category.as_deref(),
            query.max_duration.as_ref().and_then(LenientNumber::value),
        )
    }
}

/// Body of a suggestion request: the recipe criteria plus a sample size.
///
/// Each field degrades to absent on its own when it has the wrong type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionForm {
    pub search: Option<LenientText>,
    pub category: Option<LenientText>,
    pub max_duration: Option<LenientNumber>,
    pub limit: Option<LenientNumber>,
}

impl SuggestionForm {
    /// Split into the normalized filter and the resolved sample size.
    pub fn into_parts(self) -> (RecipeFilter, usize) {
        let limit = suggestion_limit(self.limit.as_ref().and_then(LenientNumber::value));
        let filter = RecipeFilter::new(
            self.search.as_ref().and_then(LenientText::value),
            self.category.as_ref().and_then(LenientText::value),
            self.max_duration.as_ref().and_then(LenientNumber::value),
        );
        (filter, limit)
    }
}

/// Ingredient line of a create or update request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeIngredientForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

fn optional_text<T>(
    value: Option<String>,
    build: impl FnOnce(String) -> Result<T, TypeConstraintError>,
) -> Result<Option<T>, TypeConstraintError> {
    match value {
        Some(value) if !value.trim().is_empty() => build(value).map(Some),
        _ => Ok(None),
    }
}

impl TryFrom<RecipeIngredientForm> for NewRecipeIngredient {
    type Error = TypeConstraintError;

    fn try_from(value: RecipeIngredientForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: IngredientName::new(value.name)?,
            quantity: optional_text(value.quantity, IngredientQuantity::new)?,
            unit: optional_text(value.unit, IngredientUnit::new)?,
        })
    }
}

fn ingredient_lines(
    forms: Vec<RecipeIngredientForm>,
) -> Result<Vec<NewRecipeIngredient>, TypeConstraintError> {
    forms.into_iter().map(TryInto::try_into).collect()
}

fn category_names(names: Vec<String>) -> Result<Vec<CategoryName>, TypeConstraintError> {
    names.into_iter().map(CategoryName::new).collect()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeForm {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub instructions: String,
    #[validate(range(min = 1))]
    pub duration_minutes: i32,
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<RecipeIngredientForm>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecipePayload {
    pub title: RecipeTitle,
    pub description: Option<RecipeDescription>,
    pub instructions: RecipeInstructions,
    pub duration_minutes: DurationMinutes,
    pub image_url: Option<ImageUrl>,
    pub ingredients: Vec<NewRecipeIngredient>,
    pub categories: Vec<CategoryName>,
}

impl CreateRecipePayload {
    pub fn into_new_recipe(self) -> NewRecipe {
        let now = Utc::now().naive_utc();
        NewRecipe {
            title: self.title,
            description: self.description,
            instructions: self.instructions,
            duration_minutes: self.duration_minutes,
            image_url: self.image_url,
            ingredients: self.ingredients,
            categories: self.categories,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateRecipeFormError {
    #[error("Create recipe form validation failed: {0}")]
    Validation(String),
    #[error("Create recipe form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateRecipeFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateRecipeFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateRecipeForm> for CreateRecipePayload {
    type Error = CreateRecipeFormError;

    fn try_from(value: CreateRecipeForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            title: RecipeTitle::new(value.title)?,
            description: optional_text(value.description, RecipeDescription::new)?,
            instructions: RecipeInstructions::new(value.instructions)?,
            duration_minutes: DurationMinutes::new(value.duration_minutes)?,
            image_url: optional_text(value.image_url, ImageUrl::new)?,
            ingredients: ingredient_lines(value.ingredients)?,
            categories: category_names(value.categories)?,
        })
    }
}

/// Partial update body. Omitted fields are left untouched; blank optional
/// text counts as omitted.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeForm {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub instructions: Option<String>,
    #[validate(range(min = 1))]
    pub duration_minutes: Option<i32>,
    pub image_url: Option<String>,
    #[validate(nested)]
    pub ingredients: Option<Vec<RecipeIngredientForm>>,
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecipePayload {
    pub title: Option<RecipeTitle>,
    pub description: Option<RecipeDescription>,
    pub instructions: Option<RecipeInstructions>,
    pub duration_minutes: Option<DurationMinutes>,
    pub image_url: Option<ImageUrl>,
    pub ingredients: Option<Vec<NewRecipeIngredient>>,
    pub categories: Option<Vec<CategoryName>>,
}

impl UpdateRecipePayload {
    pub fn into_recipe_update(self) -> RecipeUpdate {
        RecipeUpdate {
            title: self.title,
            description: self.description,
            instructions: self.instructions,
            duration_minutes: self.duration_minutes,
            image_url: self.image_url,
            ingredients: self.ingredients,
            categories: self.categories,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateRecipeFormError {
    #[error("Update recipe form validation failed: {0}")]
    Validation(String),
    #[error("Update recipe form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateRecipeFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateRecipeFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateRecipeForm> for UpdateRecipePayload {
    type Error = UpdateRecipeFormError;

    fn try_from(value: UpdateRecipeForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            title: value.title.map(RecipeTitle::new).transpose()?,
            description: optional_text(value.description, RecipeDescription::new)?,
            instructions: value.instructions.map(RecipeInstructions::new).transpose()?,
            duration_minutes: value
                .duration_minutes
                .map(DurationMinutes::new)
                .transpose()?,
            image_url: optional_text(value.image_url, ImageUrl::new)?,
            ingredients: value.ingredients.map(ingredient_lines).transpose()?,
            categories: value.categories.map(category_names).transpose()?,
        })
    }
}
