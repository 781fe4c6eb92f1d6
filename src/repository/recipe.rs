use std::collections::HashSet;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::filter::RecipeFilter;
use crate::domain::recipe::{NewRecipe, NewRecipeIngredient, Recipe, RecipeUpdate};
use crate::domain::types::{CategoryName, IngredientName, RecipeId};
use crate::models::category::Category as DbCategory;
use crate::models::ingredient::Ingredient as DbIngredient;
use crate::models::recipe::{
    NewRecipe as DbNewRecipe, NewRecipeIngredient as DbNewRecipeIngredient, Recipe as DbRecipe,
    RecipeCategory as DbRecipeCategory, RecipeChangeset, RecipeIngredient as DbRecipeIngredient,
};
use crate::repository::{
    DieselRepository, RecipeReader, RecipeWriter, RepositoryError, RepositoryResult, fold_case,
    instr,
};
use crate::schema::{categories, ingredients, recipe_categories, recipe_ingredients, recipes};

/// Compose the active predicates of `filter` into one query over `recipes`.
///
/// The category predicate is a subquery on the association table rather than
/// a join, so a recipe with several categories still appears once.
fn filtered_recipes(filter: &RecipeFilter) -> recipes::BoxedQuery<'_, Sqlite> {
    let mut query = recipes::table.into_boxed::<Sqlite>();

    if let Some(search) = filter.search_term() {
        // `instr` matches literally, so `%` and `_` in the input need no escaping.
        let needle = search.to_lowercase();
        query = query.filter(
            instr(fold_case(recipes::title.nullable()), needle.clone())
                .gt(0)
                .or(instr(fold_case(recipes::description), needle).gt(0)),
        );
    }

    if let Some(category) = filter.category_name() {
        query = query.filter(
            recipes::id.eq_any(
                recipe_categories::table
                    .inner_join(categories::table)
                    .filter(fold_case(categories::name.nullable()).eq(category.to_lowercase()))
                    .select(recipe_categories::recipe_id),
            ),
        );
    }

    if let Some(max_duration) = filter.max_duration_minutes() {
        query = query.filter(recipes::duration_minutes.le(max_duration));
    }

    query
}

/// Attach ingredient links and categories to the loaded rows with one query
/// per association.
fn load_associations(
    conn: &mut SqliteConnection,
    rows: Vec<DbRecipe>,
) -> RepositoryResult<Vec<Recipe>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let links = DbRecipeIngredient::belonging_to(&rows)
        .inner_join(ingredients::table)
        .select((DbRecipeIngredient::as_select(), DbIngredient::as_select()))
        .order(recipe_ingredients::id.asc())
        .load::<(DbRecipeIngredient, DbIngredient)>(conn)?
        .grouped_by(&rows);

    let tags = DbRecipeCategory::belonging_to(&rows)
        .inner_join(categories::table)
        .select((DbRecipeCategory::as_select(), DbCategory::as_select()))
        .order(categories::name.asc())
        .load::<(DbRecipeCategory, DbCategory)>(conn)?
        .grouped_by(&rows);

    rows.into_iter()
        .zip(links)
        .zip(tags)
        .map(|((recipe, links), tags)| Ok(recipe.into_domain(links, tags)?))
        .collect()
}

fn find_recipe(conn: &mut SqliteConnection, id: i32) -> RepositoryResult<Option<Recipe>> {
    let row = recipes::table
        .find(id)
        .first::<DbRecipe>(conn)
        .optional()?;

    match row {
        Some(row) => Ok(load_associations(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

/// Return the id of the ingredient called `name`, inserting it when missing.
fn ensure_ingredient(conn: &mut SqliteConnection, name: &IngredientName) -> RepositoryResult<i32> {
    diesel::insert_into(ingredients::table)
        .values(ingredients::name.eq(name.as_str()))
        .on_conflict(ingredients::name)
        .do_nothing()
        .execute(conn)?;

    let id = ingredients::table
        .filter(ingredients::name.eq(name.as_str()))
        .select(ingredients::id)
        .first::<i32>(conn)?;
    Ok(id)
}

/// Return the id of the category called `name`, inserting it when missing.
fn ensure_category(conn: &mut SqliteConnection, name: &CategoryName) -> RepositoryResult<i32> {
    diesel::insert_into(categories::table)
        .values(categories::name.eq(name.as_str()))
        .on_conflict(categories::name)
        .do_nothing()
        .execute(conn)?;

    let id = categories::table
        .filter(categories::name.eq(name.as_str()))
        .select(categories::id)
        .first::<i32>(conn)?;
    Ok(id)
}

/// Insert ingredient links. Listing the same ingredient twice violates the
/// `(recipe_id, ingredient_id)` uniqueness and is reported as a conflict.
fn attach_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    items: &[NewRecipeIngredient],
) -> RepositoryResult<()> {
    for item in items {
        let ingredient_id = ensure_ingredient(conn, &item.name)?;
        diesel::insert_into(recipe_ingredients::table)
            .values(DbNewRecipeIngredient {
                recipe_id,
                ingredient_id,
                quantity: item.quantity.as_deref(),
                unit: item.unit.as_deref(),
            })
            .execute(conn)?;
    }
    Ok(())
}

fn attach_categories(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    names: &[CategoryName],
) -> RepositoryResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        let category_id = ensure_category(conn, name)?;
        if !seen.insert(category_id) {
            continue;
        }
        diesel::insert_into(recipe_categories::table)
            .values(DbRecipeCategory {
                recipe_id,
                category_id,
            })
            .execute(conn)?;
    }
    Ok(())
}

impl RecipeReader for DieselRepository {
    fn list_recipes(&self, filter: &RecipeFilter) -> RepositoryResult<Vec<Recipe>> {
        let mut conn = self.conn()?;

        let rows = filtered_recipes(filter)
            .order(recipes::id.asc())
            .load::<DbRecipe>(&mut conn)?;

        load_associations(&mut conn, rows)
    }

    fn list_recipe_ids(&self, filter: &RecipeFilter) -> RepositoryResult<Vec<RecipeId>> {
        let mut conn = self.conn()?;

        let ids = filtered_recipes(filter)
            .select(recipes::id)
            .order(recipes::id.asc())
            .load::<i32>(&mut conn)?;

        Ok(ids
            .into_iter()
            .map(RecipeId::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn get_recipes_by_ids(&self, ids: &[RecipeId]) -> RepositoryResult<Vec<Recipe>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let raw_ids = ids.iter().map(|id| id.get()).collect::<Vec<i32>>();

        let rows = recipes::table
            .filter(recipes::id.eq_any(raw_ids))
            .order(recipes::id.asc())
            .load::<DbRecipe>(&mut conn)?;

        load_associations(&mut conn, rows)
    }

    fn get_recipe_by_id(&self, id: RecipeId) -> RepositoryResult<Option<Recipe>> {
        let mut conn = self.conn()?;
        find_recipe(&mut conn, id.get())
    }
}

impl RecipeWriter for DieselRepository {
    fn create_recipe(&self, recipe: &NewRecipe) -> RepositoryResult<Recipe> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let recipe_id = diesel::insert_into(recipes::table)
                .values(DbNewRecipe::from(recipe))
                .returning(recipes::id)
                .get_result::<i32>(conn)?;

            attach_ingredients(conn, recipe_id, &recipe.ingredients)?;
            attach_categories(conn, recipe_id, &recipe.categories)?;

            find_recipe(conn, recipe_id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn update_recipe(
        &self,
        id: RecipeId,
        update: &RecipeUpdate,
    ) -> RepositoryResult<Option<Recipe>> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            // `updated_at` is always part of the changeset, so this never
            // degenerates into an empty UPDATE.
            let affected = diesel::update(recipes::table.find(id.get()))
                .set(RecipeChangeset::from(update))
                .execute(conn)?;

            if affected == 0 {
                return Ok(None);
            }

            if let Some(items) = &update.ingredients {
                diesel::delete(
                    recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(id.get())),
                )
                .execute(conn)?;
                attach_ingredients(conn, id.get(), items)?;
            }

            if let Some(names) = &update.categories {
                diesel::delete(
                    recipe_categories::table.filter(recipe_categories::recipe_id.eq(id.get())),
                )
                .execute(conn)?;
                attach_categories(conn, id.get(), names)?;
            }

            find_recipe(conn, id.get())
        })
    }

    fn delete_recipe(&self, id: RecipeId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(recipes::table.find(id.get())).execute(&mut conn)?;

        Ok(affected)
    }
}
