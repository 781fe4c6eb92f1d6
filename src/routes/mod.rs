use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod catalog;
pub mod recipes;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Map a service failure onto an HTTP status with a JSON `{ "error": .. }` body.
pub fn service_error_response(err: ServiceError) -> HttpResponse {
    let body = ErrorBody {
        error: err.to_string(),
    };
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::Internal => HttpResponse::InternalServerError().json(body),
    }
}

/// Register every endpoint of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(recipes::list_recipes)
        .service(recipes::suggest_recipes)
        .service(recipes::show_recipe)
        .service(recipes::create_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe)
        .service(catalog::list_ingredients)
        .service(catalog::add_ingredient)
        .service(catalog::delete_ingredient)
        .service(catalog::list_categories)
        .service(catalog::add_category)
        .service(catalog::delete_category);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test::{TestRequest, call_service, init_service};
    use actix_web::{App, body::to_bytes};

    use super::*;
    use crate::auth::{CredentialVerifier, JwtVerifier};
    use crate::db::establish_connection_pool;
    use crate::repository::DieselRepository;

    macro_rules! test_app {
        () => {
            init_service(
                App::new()
                    .app_data(web::Data::new(DieselRepository::new(
                        establish_connection_pool(":memory:").unwrap(),
                    )))
                    .app_data(web::Data::from(
                        Arc::new(JwtVerifier::new("secret")) as Arc<dyn CredentialVerifier>
                    ))
                    .configure(configure),
            )
            .await
        };
    }

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Form("bad".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::TypeConstraint("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::Conflict("taken".into()), StatusCode::CONFLICT),
            (ServiceError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(service_error_response(err).status(), status);
        }
    }

    #[actix_web::test]
    async fn error_body_carries_the_message() {
        let response = service_error_response(ServiceError::Conflict("taken".into()));
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "conflict: taken");
    }

    #[actix_web::test]
    async fn writes_without_bearer_token_are_unauthorized() {
        let app = test_app!();

        let req = TestRequest::post()
            .uri("/recipes")
            .set_json(serde_json::json!({
                "title": "Toast",
                "instructions": "Toast the bread.",
                "durationMinutes": 5
            }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = TestRequest::delete()
            .uri("/recipes/1")
            .insert_header((AUTHORIZATION, "Bearer not-a-jwt"))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = TestRequest::post()
            .uri("/ingredients")
            .set_json(serde_json::json!({ "name": "Salt" }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn non_numeric_path_id_is_not_found() {
        let app = test_app!();
        let req = TestRequest::get().uri("/recipes/abc").to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn suggestion_body_that_is_not_json_is_rejected() {
        let app = test_app!();
        let req = TestRequest::post()
            .uri("/recipes/generate")
            .set_payload("limit=3")
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
