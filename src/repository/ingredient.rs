use diesel::prelude::*;

use crate::domain::ingredient::{Ingredient, NewIngredient};
use crate::domain::types::IngredientId;
use crate::models::ingredient::{Ingredient as DbIngredient, NewIngredient as DbNewIngredient};
use crate::repository::{DieselRepository, IngredientReader, IngredientWriter, RepositoryResult};

impl IngredientReader for DieselRepository {
    fn list_ingredients(&self) -> RepositoryResult<Vec<Ingredient>> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        let items = ingredients::table
            .order(ingredients::name.asc())
            .load::<DbIngredient>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Ingredient>, _>>()?;

        Ok(items)
    }

    fn get_ingredient_by_id(&self, id: IngredientId) -> RepositoryResult<Option<Ingredient>> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        let ingredient = ingredients::table
            .find(id.get())
            .first::<DbIngredient>(&mut conn)
            .optional()?;

        let ingredient = ingredient.map(TryInto::try_into).transpose()?;
        Ok(ingredient)
    }
}

impl IngredientWriter for DieselRepository {
    fn create_ingredient(&self, ingredient: &NewIngredient) -> RepositoryResult<Ingredient> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(ingredients::table)
            .values(DbNewIngredient::from(ingredient))
            .returning(DbIngredient::as_returning())
            .get_result::<DbIngredient>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn delete_ingredient(&self, id: IngredientId) -> RepositoryResult<usize> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        let affected = diesel::delete(ingredients::table.find(id.get())).execute(&mut conn)?;

        Ok(affected)
    }
}
