use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::ingredient::NewIngredient;
use crate::domain::types::{CategoryName, IngredientName, TypeConstraintError};

#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name: CategoryName,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory { name: self.name }
    }
}

#[derive(Debug, Error)]
pub enum AddCategoryFormError {
    #[error("Add category form validation failed: {0}")]
    Validation(String),
    #[error("Add category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = AddCategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: CategoryName::new(value.name)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddIngredientForm {
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddIngredientFormPayload {
    pub name: IngredientName,
}

impl AddIngredientFormPayload {
    pub fn into_new_ingredient(self) -> NewIngredient {
        NewIngredient { name: self.name }
    }
}

#[derive(Debug, Error)]
pub enum AddIngredientFormError {
    #[error("Add ingredient form validation failed: {0}")]
    Validation(String),
    #[error("Add ingredient form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddIngredientFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddIngredientFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddIngredientForm> for AddIngredientFormPayload {
    type Error = AddIngredientFormError;

    fn try_from(value: AddIngredientForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: IngredientName::new(value.name)?,
        })
    }
}
