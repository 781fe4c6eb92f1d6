use diesel::prelude::*;

use crate::domain::ingredient::{
    Ingredient as DomainIngredient, NewIngredient as DomainNewIngredient,
};
use crate::domain::types::{IngredientName, TypeConstraintError};

/// Diesel model representing the `ingredients` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
}

/// Insertable form of [`Ingredient`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub name: &'a str,
}

impl TryFrom<Ingredient> for DomainIngredient {
    type Error = TypeConstraintError;

    fn try_from(ingredient: Ingredient) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ingredient.id.try_into()?,
            name: IngredientName::new(ingredient.name)?,
        })
    }
}

impl<'a> From<&'a DomainNewIngredient> for NewIngredient<'a> {
    fn from(ingredient: &'a DomainNewIngredient) -> Self {
        Self {
            name: ingredient.name.as_str(),
        }
    }
}
