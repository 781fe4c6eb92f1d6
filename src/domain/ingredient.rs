use serde::{Deserialize, Serialize};

use crate::domain::types::{IngredientId, IngredientName};

/// Reusable ingredient referenced by recipe links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: IngredientName,
}

/// Data required to insert a new [`Ingredient`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewIngredient {
    pub name: IngredientName,
}
