//! Error conversion glue between the form, domain and service layers.

use crate::domain::types::TypeConstraintError;
use crate::forms::catalog::{AddCategoryFormError, AddIngredientFormError};
use crate::forms::recipes::{CreateRecipeFormError, UpdateRecipeFormError};
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<CreateRecipeFormError> for ServiceError {
    fn from(val: CreateRecipeFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UpdateRecipeFormError> for ServiceError {
    fn from(val: UpdateRecipeFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<AddCategoryFormError> for ServiceError {
    fn from(val: AddCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<AddIngredientFormError> for ServiceError {
    fn from(val: AddIngredientFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
