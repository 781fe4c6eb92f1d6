use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::filter::RecipeFilter;
use crate::domain::recipe::Recipe;
use crate::dto::recipes::RecipeDto;
use crate::repository::RecipeReader;

use super::{ServiceResult, repository_failure};

/// Draw `min(amount, items.len())` distinct items uniformly at random.
///
/// Every subset of that size is equally likely, and so is every order within
/// it. The input order does not influence the result.
pub fn sample<T, G>(items: &mut [T], amount: usize, rng: &mut G) -> Vec<T>
where
    T: Clone,
    G: Rng + ?Sized,
{
    let amount = amount.min(items.len());
    let (picked, _) = items.partial_shuffle(rng, amount);
    picked.to_vec()
}

/// Pick a random handful of recipes matching `filter`.
///
/// Only ids are loaded for the draw; the chosen recipes are then fetched with
/// their associations and returned in the order they were drawn.
pub fn suggest_recipes<R, G>(
    filter: &RecipeFilter,
    limit: usize,
    repo: &R,
    rng: &mut G,
) -> ServiceResult<Vec<RecipeDto>>
where
    R: RecipeReader,
    G: Rng + ?Sized,
{
    log::debug!("Suggesting {limit} recipes with {filter:?}");

    let mut ids = repo
        .list_recipe_ids(filter)
        .map_err(|e| repository_failure("Failed to list recipe ids", e))?;

    let chosen = sample(&mut ids, limit, rng);
    if chosen.is_empty() {
        return Ok(Vec::new());
    }

    let mut loaded: HashMap<_, Recipe> = repo
        .get_recipes_by_ids(&chosen)
        .map_err(|e| repository_failure("Failed to load suggested recipes", e))?
        .into_iter()
        .map(|recipe| (recipe.id, recipe))
        .collect();

    // A recipe deleted between the two reads is simply left out.
    Ok(chosen
        .iter()
        .filter_map(|id| loaded.remove(id))
        .map(RecipeDto::from)
        .collect())
}
