pub mod courses;

use actix_web::{HttpResponse, web};

use self::courses::ApiErrorResponse;

/// Configure API v1 routes. The caller wraps the scope in `require_api_auth`.
/// Read-only, so no content-type guard is needed.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses")
            .route("/{id}/records", web::get().to(courses::records))
            .route("/{id}/monitoring", web::get().to(courses::monitoring)),
    );
}

/// Unknown `/api/v1` paths answer in JSON rather than with the HTML 404 page.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorResponse {
        error: "No such API endpoint".to_string(),
    })
}
