use std::collections::HashSet;

use chrono::Utc;
use diesel::prelude::*;
use pushkind_recipes::domain::category::NewCategory;
use pushkind_recipes::domain::filter::RecipeFilter;
use pushkind_recipes::domain::ingredient::NewIngredient;
use pushkind_recipes::domain::recipe::{Recipe, RecipeUpdate};
use pushkind_recipes::domain::types::{
    CategoryName, DurationMinutes, IngredientName, RecipeDescription, RecipeId,
};
use pushkind_recipes::repository::{
    CategoryReader, CategoryWriter, DieselRepository, IngredientReader, IngredientWriter,
    RecipeReader, RecipeWriter, RepositoryError,
};
use pushkind_recipes::schema::{recipe_categories, recipe_ingredients, recipes};
use pushkind_recipes::services::suggestions::suggest_recipes;
use rand::SeedableRng;
use rand::rngs::StdRng;

mod common;

use common::{categories, ingredient, new_recipe};

fn titles(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.title.as_str()).collect()
}

fn ids(recipes: &[Recipe]) -> HashSet<i32> {
    recipes.iter().map(|r| r.id.get()).collect()
}

fn blank_update() -> RecipeUpdate {
    RecipeUpdate {
        title: None,
        description: None,
        instructions: None,
        duration_minutes: None,
        image_url: None,
        ingredients: None,
        categories: None,
        updated_at: Utc::now().naive_utc(),
    }
}

/// Tomato Pasta (20 min, Quick) and Beef Stew (90 min, Hearty).
fn seed_pasta_and_stew(repo: &DieselRepository) -> (Recipe, Recipe) {
    let mut pasta = new_recipe("Tomato Pasta", Some("Weeknight dinner"), 20);
    pasta.categories = categories(&["Quick"]);
    pasta.ingredients = vec![
        ingredient("Tomato", "3", "pcs"),
        ingredient("Spaghetti", "200", "g"),
    ];
    let mut stew = new_recipe("Beef Stew", None, 90);
    stew.categories = categories(&["Hearty"]);
    stew.ingredients = vec![ingredient("Beef", "500", "g")];

    let pasta = repo.create_recipe(&pasta).expect("create pasta");
    let stew = repo.create_recipe(&stew).expect("create stew");
    (pasta, stew)
}

#[test]
fn filters_follow_the_catalog_example() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (pasta, stew) = seed_pasta_and_stew(&repo);

    let all = repo.list_recipes(&RecipeFilter::default()).unwrap();
    assert_eq!(titles(&all), vec!["Tomato Pasta", "Beef Stew"]);

    let by_search = repo
        .list_recipes(&RecipeFilter::default().search("pasta"))
        .unwrap();
    assert_eq!(titles(&by_search), vec!["Tomato Pasta"]);

    let by_duration = repo
        .list_recipes(&RecipeFilter::default().max_duration(30.0))
        .unwrap();
    assert_eq!(titles(&by_duration), vec!["Tomato Pasta"]);

    let by_category = repo
        .list_recipes(&RecipeFilter::default().category("hearty"))
        .unwrap();
    assert_eq!(titles(&by_category), vec!["Beef Stew"]);

    let combined = repo
        .list_recipes(&RecipeFilter::default().search("o").max_duration(30.0))
        .unwrap();
    assert_eq!(titles(&combined), vec!["Tomato Pasta"]);

    assert_eq!(repo.delete_recipe(pasta.id).unwrap(), 1);
    let remaining = repo.list_recipes(&RecipeFilter::default()).unwrap();
    assert_eq!(ids(&remaining), HashSet::from([stew.id.get()]));
}

#[test]
fn search_matches_title_or_description_case_insensitively() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_pasta_and_stew(&repo);

    let by_description = repo
        .list_recipes(&RecipeFilter::default().search("WEEKNIGHT"))
        .unwrap();
    assert_eq!(titles(&by_description), vec!["Tomato Pasta"]);

    let nothing = repo
        .list_recipes(&RecipeFilter::default().search("curry"))
        .unwrap();
    assert!(nothing.is_empty());
}

#[test]
fn search_treats_wildcards_literally() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_pasta_and_stew(&repo);
    repo.create_recipe(&new_recipe("100% Rye Bread", None, 240))
        .unwrap();

    let found = repo
        .list_recipes(&RecipeFilter::default().search("%"))
        .unwrap();
    assert_eq!(titles(&found), vec!["100% Rye Bread"]);

    let underscore = repo
        .list_recipes(&RecipeFilter::default().search("_"))
        .unwrap();
    assert!(underscore.is_empty());
}

#[test]
fn blank_and_fractional_criteria_are_normalized() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_pasta_and_stew(&repo);

    let blank = RecipeFilter::new(Some("   "), Some(""), None);
    assert_eq!(repo.list_recipes(&blank).unwrap().len(), 2);

    let fractional = RecipeFilter::new(None, None, Some(20.9));
    assert_eq!(
        titles(&repo.list_recipes(&fractional).unwrap()),
        vec!["Tomato Pasta"]
    );

    let below_everything = RecipeFilter::new(None, None, Some(19.5));
    assert!(repo.list_recipes(&below_everything).unwrap().is_empty());
}

#[test]
fn combined_filters_are_the_intersection_of_single_filters() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_pasta_and_stew(&repo);

    let mut soup = new_recipe("Tomato Soup", None, 45);
    soup.categories = categories(&["Quick", "Vegetarian"]);
    repo.create_recipe(&soup).unwrap();
    let mut salad = new_recipe("Tomato Salad", None, 10);
    salad.categories = categories(&["Vegetarian"]);
    repo.create_recipe(&salad).unwrap();

    let search = ids(&repo
        .list_recipes(&RecipeFilter::default().search("tomato"))
        .unwrap());
    let category = ids(&repo
        .list_recipes(&RecipeFilter::default().category("quick"))
        .unwrap());
    let duration = ids(&repo
        .list_recipes(&RecipeFilter::default().max_duration(30.0))
        .unwrap());

    let expected: HashSet<i32> = search
        .iter()
        .filter(|id| category.contains(id) && duration.contains(id))
        .copied()
        .collect();

    let combined = ids(&repo
        .list_recipes(
            &RecipeFilter::default()
                .search("tomato")
                .category("quick")
                .max_duration(30.0),
        )
        .unwrap());

    assert_eq!(combined, expected);
    assert_eq!(combined.len(), 1);
}

#[test]
fn recipes_with_several_categories_are_listed_once_with_associations() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut soup = new_recipe("Tomato Soup", None, 45);
    soup.categories = categories(&["Soup", "Vegetarian", "soup"]);
    soup.ingredients = vec![ingredient("Tomato", "6", "pcs"), ingredient("Salt", "1", "tsp")];
    repo.create_recipe(&soup).unwrap();

    let listed = repo.list_recipes(&RecipeFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);

    let by_category = repo
        .list_recipes(&RecipeFilter::default().category("SOUP"))
        .unwrap();
    assert_eq!(by_category.len(), 1);

    let recipe = &by_category[0];
    let category_names: Vec<&str> = recipe.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(category_names, vec!["Soup", "Vegetarian", "soup"]);

    let ingredient_names: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(ingredient_names, vec!["Tomato", "Salt"]);
    assert_eq!(
        recipe.ingredients[0].unit.as_ref().map(|u| u.as_str()),
        Some("pcs")
    );
}

#[test]
fn create_reuses_existing_ingredients_and_categories() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (pasta, _) = seed_pasta_and_stew(&repo);

    let mut sauce = new_recipe("Tomato Sauce", None, 30);
    sauce.ingredients = vec![ingredient("Tomato", "5", "pcs")];
    sauce.categories = categories(&["Quick"]);
    let sauce = repo.create_recipe(&sauce).unwrap();

    assert_eq!(
        sauce.ingredients[0].ingredient_id,
        pasta.ingredients[0].ingredient_id
    );
    assert_eq!(sauce.categories[0].id, pasta.categories[0].id);
    assert_eq!(repo.list_ingredients().unwrap().len(), 3);
    assert_eq!(repo.list_categories().unwrap().len(), 2);
}

#[test]
fn duplicate_ingredient_in_one_recipe_is_a_conflict_and_rolls_back() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut recipe = new_recipe("Double Tomato", None, 15);
    recipe.ingredients = vec![ingredient("Tomato", "1", "pcs"), ingredient("Tomato", "2", "pcs")];

    let result = repo.create_recipe(&recipe);
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    assert!(repo.list_recipes(&RecipeFilter::default()).unwrap().is_empty());
    assert!(repo.list_ingredients().unwrap().is_empty());
}

#[test]
fn partial_update_changes_only_supplied_fields() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (pasta, _) = seed_pasta_and_stew(&repo);

    let update = RecipeUpdate {
        duration_minutes: Some(DurationMinutes::new(25).unwrap()),
        ..blank_update()
    };
    let updated = repo
        .update_recipe(pasta.id, &update)
        .unwrap()
        .expect("recipe exists");

    let reread = repo.get_recipe_by_id(pasta.id).unwrap().unwrap();
    assert_eq!(updated, reread);
    assert_eq!(reread.duration_minutes.get(), 25);
    assert_eq!(reread.title, pasta.title);
    assert_eq!(reread.description, pasta.description);
    assert_eq!(reread.instructions, pasta.instructions);
    assert_eq!(reread.ingredients, pasta.ingredients);
    assert_eq!(reread.categories, pasta.categories);
    assert_eq!(reread.created_at, pasta.created_at);
}

#[test]
fn update_with_lists_replaces_associations() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (pasta, _) = seed_pasta_and_stew(&repo);

    let update = RecipeUpdate {
        description: Some(RecipeDescription::new("Sunday lunch").unwrap()),
        ingredients: Some(vec![ingredient("Basil", "1", "bunch")]),
        categories: Some(vec![CategoryName::new("Italian").unwrap()]),
        ..blank_update()
    };
    let updated = repo.update_recipe(pasta.id, &update).unwrap().unwrap();

    assert_eq!(
        updated.description.as_ref().map(|d| d.as_str()),
        Some("Sunday lunch")
    );
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.ingredients[0].name.as_str(), "Basil");
    assert_eq!(updated.categories.len(), 1);
    assert_eq!(updated.categories[0].name.as_str(), "Italian");

    // The previous shared rows survive the replacement.
    let ingredient_names: Vec<String> = repo
        .list_ingredients()
        .unwrap()
        .into_iter()
        .map(|i| i.name.into_inner())
        .collect();
    assert!(ingredient_names.contains(&"Tomato".to_string()));
    assert_eq!(repo.list_categories().unwrap().len(), 3);
}

#[test]
fn update_of_missing_recipe_returns_none() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_pasta_and_stew(&repo);

    let missing = RecipeId::new(999).unwrap();
    assert!(repo.update_recipe(missing, &blank_update()).unwrap().is_none());
}

#[test]
fn delete_cascades_to_links_but_keeps_shared_rows() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (pasta, _) = seed_pasta_and_stew(&repo);

    assert_eq!(repo.delete_recipe(pasta.id).unwrap(), 1);
    assert!(repo.get_recipe_by_id(pasta.id).unwrap().is_none());

    let mut conn = test_db.pool().get().expect("connection");
    let links: i64 = recipe_ingredients::table
        .filter(recipe_ingredients::recipe_id.eq(pasta.id.get()))
        .count()
        .get_result(&mut conn)
        .unwrap();
    let tags: i64 = recipe_categories::table
        .filter(recipe_categories::recipe_id.eq(pasta.id.get()))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(links, 0);
    assert_eq!(tags, 0);

    assert_eq!(repo.list_ingredients().unwrap().len(), 3);
    assert_eq!(repo.list_categories().unwrap().len(), 2);
}

#[test]
fn delete_of_missing_recipe_affects_nothing() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_pasta_and_stew(&repo);

    assert_eq!(repo.delete_recipe(RecipeId::new(999).unwrap()).unwrap(), 0);
    assert_eq!(repo.list_recipes(&RecipeFilter::default()).unwrap().len(), 2);
}

#[test]
fn duplicate_names_are_conflicts() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let tomato = NewIngredient {
        name: IngredientName::new("Tomato").unwrap(),
    };
    repo.create_ingredient(&tomato).unwrap();
    assert!(matches!(
        repo.create_ingredient(&tomato),
        Err(RepositoryError::Conflict(_))
    ));

    // Uniqueness is case-sensitive at the store level.
    let lower = NewIngredient {
        name: IngredientName::new("tomato").unwrap(),
    };
    assert!(repo.create_ingredient(&lower).is_ok());

    let quick = NewCategory {
        name: CategoryName::new("Quick").unwrap(),
    };
    repo.create_category(&quick).unwrap();
    assert!(matches!(
        repo.create_category(&quick),
        Err(RepositoryError::Conflict(_))
    ));
}

#[test]
fn deleting_an_ingredient_removes_its_links() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (pasta, _) = seed_pasta_and_stew(&repo);

    let tomato_id = pasta.ingredients[0].ingredient_id;
    assert_eq!(repo.delete_ingredient(tomato_id).unwrap(), 1);
    assert!(repo.get_ingredient_by_id(tomato_id).unwrap().is_none());

    let reread = repo.get_recipe_by_id(pasta.id).unwrap().unwrap();
    let names: Vec<&str> = reread.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Spaghetti"]);
}

#[test]
fn deleting_a_linked_category_is_a_conflict() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (pasta, _) = seed_pasta_and_stew(&repo);

    let quick_id = pasta.categories[0].id;
    assert!(matches!(
        repo.delete_category(quick_id),
        Err(RepositoryError::Conflict(_))
    ));

    repo.delete_recipe(pasta.id).unwrap();
    assert_eq!(repo.delete_category(quick_id).unwrap(), 1);
    assert!(repo.get_category_by_id(quick_id).unwrap().is_none());
}

#[test]
fn suggestions_are_distinct_members_of_the_filtered_set() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    for minutes in 1..=8 {
        let mut recipe = new_recipe(&format!("Snack {minutes}"), None, minutes * 5);
        recipe.categories = categories(&["Snack"]);
        repo.create_recipe(&recipe).unwrap();
    }
    let mut rng = StdRng::seed_from_u64(11);

    let default_limit = suggest_recipes(&RecipeFilter::default(), 5, &repo, &mut rng).unwrap();
    assert_eq!(default_limit.len(), 5);
    assert_eq!(
        default_limit.iter().map(|r| r.id).collect::<HashSet<_>>().len(),
        5
    );

    let filter = RecipeFilter::default().category("snack").max_duration(15.0);
    let capped = suggest_recipes(&filter, 10, &repo, &mut rng).unwrap();
    assert_eq!(capped.len(), 3);
    assert!(capped.iter().all(|r| r.duration_minutes <= 15));
    assert!(capped.iter().all(|r| !r.categories.is_empty()));

    let none = suggest_recipes(
        &RecipeFilter::default().category("dessert"),
        5,
        &repo,
        &mut rng,
    )
    .unwrap();
    assert!(none.is_empty());
}

#[test]
fn search_and_category_fold_non_ascii_case() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_pasta_and_stew(&repo);

    let mut cake = new_recipe("Äpfelkuchen", Some("Mit Öl und Zucker"), 60);
    cake.categories = categories(&["Süßes"]);
    let cake = repo.create_recipe(&cake).unwrap();

    let by_title = repo
        .list_recipes(&RecipeFilter::default().search("äpfel"))
        .unwrap();
    assert_eq!(ids(&by_title), HashSet::from([cake.id.get()]));

    let by_description = repo
        .list_recipes(&RecipeFilter::default().search("ÖL"))
        .unwrap();
    assert_eq!(ids(&by_description), HashSet::from([cake.id.get()]));

    let by_category = repo
        .list_recipes(&RecipeFilter::default().category("SÜßES"))
        .unwrap();
    assert_eq!(ids(&by_category), HashSet::from([cake.id.get()]));

    let suggested = repo
        .list_recipe_ids(&RecipeFilter::default().category("süßes"))
        .unwrap();
    assert_eq!(suggested, vec![cake.id]);
}

#[test]
fn blank_link_amounts_read_back_as_absent() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (pasta, _) = seed_pasta_and_stew(&repo);

    let mut conn = test_db.pool().get().expect("connection");
    let links = recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(pasta.id.get()));
    diesel::update(links)
        .set((
            recipe_ingredients::quantity.eq(""),
            recipe_ingredients::unit.eq("  "),
        ))
        .execute(&mut conn)
        .unwrap();

    let all = repo.list_recipes(&RecipeFilter::default()).unwrap();
    assert_eq!(all.len(), 2);

    let reread = repo.get_recipe_by_id(pasta.id).unwrap().unwrap();
    assert!(reread.ingredients.iter().all(|i| i.quantity.is_none()));
    assert!(reread.ingredients.iter().all(|i| i.unit.is_none()));
}

#[test]
fn store_rejects_rows_the_domain_cannot_read() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_pasta_and_stew(&repo);

    let mut conn = test_db.pool().get().expect("connection");
    let zero_duration = diesel::insert_into(recipes::table)
        .values((
            recipes::title.eq("Instant"),
            recipes::instructions.eq("Nothing to do."),
            recipes::duration_minutes.eq(0),
        ))
        .execute(&mut conn);
    assert!(zero_duration.is_err());

    let blank_title = diesel::insert_into(recipes::table)
        .values((
            recipes::title.eq(""),
            recipes::instructions.eq("Nothing to do."),
            recipes::duration_minutes.eq(5),
        ))
        .execute(&mut conn);
    assert!(blank_title.is_err());

    assert_eq!(repo.list_recipes(&RecipeFilter::default()).unwrap().len(), 2);
}
