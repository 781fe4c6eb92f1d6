use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::catalog::{
    AddCategoryForm, AddCategoryFormPayload, AddIngredientForm, AddIngredientFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::ServiceError;
use crate::services::catalog::{
    add_category as add_category_service, add_ingredient as add_ingredient_service,
    delete_category as delete_category_service, delete_ingredient as delete_ingredient_service,
    list_categories as list_categories_service, list_ingredients as list_ingredients_service,
};

#[get("/ingredients")]
pub async fn list_ingredients(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_ingredients_service(repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => service_error_response(err),
    }
}

#[post("/ingredients")]
pub async fn add_ingredient(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddIngredientForm>,
) -> impl Responder {
    let payload: AddIngredientFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    match add_ingredient_service(payload, &user, repo.get_ref()) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => service_error_response(err),
    }
}

#[delete("/ingredients/{ingredient_id}")]
pub async fn delete_ingredient(
    ingredient_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_ingredient_service(ingredient_id.into_inner(), &user, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err),
    }
}

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories_service(repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => service_error_response(err),
    }
}

#[post("/categories")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddCategoryForm>,
) -> impl Responder {
    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    match add_category_service(payload, &user, repo.get_ref()) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => service_error_response(err),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_category_service(category_id.into_inner(), &user, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err),
    }
}
