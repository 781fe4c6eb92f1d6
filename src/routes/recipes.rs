use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::auth::AuthenticatedUser;
use crate::domain::filter::RecipeFilter;
use crate::forms::recipes::{
    CreateRecipeForm, CreateRecipePayload, RecipeFilterQuery, SuggestionForm, UpdateRecipeForm,
    UpdateRecipePayload,
};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::ServiceError;
use crate::services::recipes::{
    create_recipe as create_recipe_service, delete_recipe as delete_recipe_service,
    list_recipes as list_recipes_service, show_recipe as show_recipe_service,
    update_recipe as update_recipe_service,
};
use crate::services::suggestions::suggest_recipes as suggest_recipes_service;

#[get("/recipes")]
pub async fn list_recipes(
    query: web::Query<Vec<(String, String)>>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query: RecipeFilterQuery = query.into_inner().into_iter().collect();
    let filter = RecipeFilter::from(query);

    match list_recipes_service(&filter, repo.get_ref()) {
        Ok(recipes) => HttpResponse::Ok().json(recipes),
        Err(err) => service_error_response(err),
    }
}

/// An empty body means "no criteria". A body that is not a JSON object is
/// rejected; inside one, each field degrades to absent on its own.
#[post("/recipes/generate")]
pub async fn suggest_recipes(
    body: web::Bytes,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = if body.iter().all(u8::is_ascii_whitespace) {
        SuggestionForm::default()
    } else {
        match serde_json::from_slice::<SuggestionForm>(&body) {
            Ok(form) => form,
            Err(e) => {
                return service_error_response(ServiceError::Form(format!(
                    "Suggestion request is not valid JSON: {e}"
                )));
            }
        }
    };
    let (filter, limit) = form.into_parts();
    let mut rng = rand::thread_rng();

    match suggest_recipes_service(&filter, limit, repo.get_ref(), &mut rng) {
        Ok(recipes) => HttpResponse::Ok().json(recipes),
        Err(err) => service_error_response(err),
    }
}

#[get("/recipes/{recipe_id}")]
pub async fn show_recipe(
    recipe_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_recipe_service(recipe_id.into_inner(), repo.get_ref()) {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(err) => service_error_response(err),
    }
}

#[post("/recipes")]
pub async fn create_recipe(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateRecipeForm>,
) -> impl Responder {
    let payload: CreateRecipePayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    match create_recipe_service(payload, &user, repo.get_ref()) {
        Ok(recipe) => HttpResponse::Created().json(recipe),
        Err(err) => service_error_response(err),
    }
}

#[patch("/recipes/{recipe_id}")]
pub async fn update_recipe(
    recipe_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateRecipeForm>,
) -> impl Responder {
    let payload: UpdateRecipePayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    match update_recipe_service(recipe_id.into_inner(), payload, &user, repo.get_ref()) {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(err) => service_error_response(err),
    }
}

#[delete("/recipes/{recipe_id}")]
pub async fn delete_recipe(
    recipe_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_recipe_service(recipe_id.into_inner(), &user, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err),
    }
}
