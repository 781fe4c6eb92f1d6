use crate::auth::AuthenticatedUser;
use crate::domain::types::{CategoryId, IngredientId};
use crate::dto::recipes::{CategoryDto, IngredientDto};
use crate::forms::catalog::{AddCategoryFormPayload, AddIngredientFormPayload};
use crate::repository::{CategoryReader, CategoryWriter, IngredientReader, IngredientWriter};

use super::{ServiceError, ServiceResult, repository_failure};

pub fn list_ingredients<R>(repo: &R) -> ServiceResult<Vec<IngredientDto>>
where
    R: IngredientReader,
{
    match repo.list_ingredients() {
        Ok(items) => Ok(items.into_iter().map(IngredientDto::from).collect()),
        Err(e) => Err(repository_failure("Failed to list ingredients", e)),
    }
}

pub fn add_ingredient<R>(
    payload: AddIngredientFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<IngredientDto>
where
    R: IngredientWriter,
{
    let ingredient = payload.into_new_ingredient();

    match repo.create_ingredient(&ingredient) {
        Ok(created) => {
            log::info!("User {} added ingredient {}", user.email, created.name);
            Ok(created.into())
        }
        Err(e) => Err(repository_failure("Failed to create ingredient", e)),
    }
}

/// Remove an ingredient together with every recipe link that uses it.
pub fn delete_ingredient<R>(id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: IngredientWriter,
{
    let id = IngredientId::new(id).map_err(|_| ServiceError::NotFound)?;

    match repo.delete_ingredient(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("User {} deleted ingredient {id}", user.email);
            Ok(())
        }
        Err(e) => Err(repository_failure("Failed to delete ingredient", e)),
    }
}

pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(items) => Ok(items.into_iter().map(CategoryDto::from).collect()),
        Err(e) => Err(repository_failure("Failed to list categories", e)),
    }
}

pub fn add_category<R>(
    payload: AddCategoryFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    let category = payload.into_new_category();

    match repo.create_category(&category) {
        Ok(created) => {
            log::info!("User {} added category {}", user.email, created.name);
            Ok(created.into())
        }
        Err(e) => Err(repository_failure("Failed to create category", e)),
    }
}

/// Remove a category. Categories still attached to a recipe are a conflict.
pub fn delete_category<R>(id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    let id = CategoryId::new(id).map_err(|_| ServiceError::NotFound)?;

    match repo.delete_category(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("User {} deleted category {id}", user.email);
            Ok(())
        }
        Err(e) => Err(repository_failure("Failed to delete category", e)),
    }
}
