use crate::auth::AuthenticatedUser;
use crate::domain::filter::RecipeFilter;
use crate::domain::types::RecipeId;
use crate::dto::recipes::RecipeDto;
use crate::forms::recipes::{CreateRecipePayload, UpdateRecipePayload};
use crate::repository::{RecipeReader, RecipeWriter};

use super::{ServiceError, ServiceResult, repository_failure};

/// Ids that can never exist are reported the same way as ids that do not.
fn recipe_id(raw: i32) -> ServiceResult<RecipeId> {
    RecipeId::new(raw).map_err(|_| ServiceError::NotFound)
}

/// List every recipe satisfying the active predicates of `filter`.
pub fn list_recipes<R>(filter: &RecipeFilter, repo: &R) -> ServiceResult<Vec<RecipeDto>>
where
    R: RecipeReader,
{
    log::debug!("Listing recipes with {filter:?}");

    match repo.list_recipes(filter) {
        Ok(recipes) => Ok(recipes.into_iter().map(RecipeDto::from).collect()),
        Err(e) => Err(repository_failure("Failed to list recipes", e)),
    }
}

pub fn show_recipe<R>(id: i32, repo: &R) -> ServiceResult<RecipeDto>
where
    R: RecipeReader,
{
    let id = recipe_id(id)?;

    match repo.get_recipe_by_id(id) {
        Ok(Some(recipe)) => Ok(recipe.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(repository_failure("Failed to get recipe", e)),
    }
}

pub fn create_recipe<R>(
    payload: CreateRecipePayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<RecipeDto>
where
    R: RecipeWriter,
{
    let new_recipe = payload.into_new_recipe();

    match repo.create_recipe(&new_recipe) {
        Ok(recipe) => {
            log::info!("User {} created recipe {}", user.email, recipe.id);
            Ok(recipe.into())
        }
        Err(e) => Err(repository_failure("Failed to create recipe", e)),
    }
}

/// Apply a partial update. Fields absent from `payload` keep their values.
pub fn update_recipe<R>(
    id: i32,
    payload: UpdateRecipePayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<RecipeDto>
where
    R: RecipeWriter,
{
    let id = recipe_id(id)?;
    let update = payload.into_recipe_update();

    match repo.update_recipe(id, &update) {
        Ok(Some(recipe)) => {
            log::info!("User {} updated recipe {id}", user.email);
            Ok(recipe.into())
        }
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(repository_failure("Failed to update recipe", e)),
    }
}

pub fn delete_recipe<R>(id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: RecipeWriter,
{
    let id = recipe_id(id)?;

    match repo.delete_recipe(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("User {} deleted recipe {id}", user.email);
            Ok(())
        }
        Err(e) => Err(repository_failure("Failed to delete recipe", e)),
    }
}
