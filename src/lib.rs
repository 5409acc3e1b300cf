pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod templates_structs;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{HttpResponse, cookie::Key, web};

/// Cookie-backed session store shared by the server and the test harness.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}

/// Register every route. Callers supply `AppConfig`, `ApiClient` and
/// `MonitorGuard` as app data and wrap the session middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        actix_multipart::form::MultipartFormConfig::default()
            .memory_limit(handlers::student_handlers::helpers::MAX_UPLOAD_BYTES),
    );
    cfg
        // Public routes
        .route("/login", web::get().to(handlers::auth_handlers::login_page))
        .route("/login", web::post().to(handlers::auth_handlers::login_submit))
        .route("/", web::get().to(|| async { errors::see_other("/dashboard") }))
        // JSON API
        .service(
            web::scope("/api/v1")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_api_auth))
                .configure(handlers::api_v1::configure)
                .default_service(web::to(handlers::api_v1::not_found)),
        )
        // Protected routes
        .service(
            web::scope("")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("/dashboard", web::get().to(handlers::dashboard::index))
                .route("/logout", web::post().to(handlers::auth_handlers::logout))
                .route("/account", web::get().to(handlers::auth_handlers::account))
                // Courses
                .route("/courses", web::get().to(handlers::course_handlers::list))
                .route("/courses/{id}", web::get().to(handlers::course_handlers::detail))
                .route(
                    "/courses/{id}/monitoring/{action}",
                    web::post().to(handlers::course_handlers::toggle),
                )
                .route(
                    "/courses/{id}/students/add",
                    web::post().to(handlers::course_handlers::add_student),
                )
                .route(
                    "/courses/{id}/students/{sid}/remove",
                    web::post().to(handlers::course_handlers::remove_student),
                )
                .route(
                    "/courses/{id}/records/{rid}/images",
                    web::get().to(handlers::course_handlers::images),
                )
                // Student CRUD: /students/new BEFORE /students/{id}
                .route("/students", web::get().to(handlers::student_handlers::list))
                .route("/students/new", web::get().to(handlers::student_handlers::new_form))
                .route("/students", web::post().to(handlers::student_handlers::create))
                .route("/students/{id}/edit", web::get().to(handlers::student_handlers::edit_form))
                .route("/students/{id}", web::post().to(handlers::student_handlers::update))
                .route("/students/{id}/delete", web::post().to(handlers::student_handlers::delete))
                // Teacher CRUD, keyed by name
                .route("/teachers", web::get().to(handlers::teacher_handlers::list))
                .route("/teachers/new", web::get().to(handlers::teacher_handlers::new_form))
                .route("/teachers", web::post().to(handlers::teacher_handlers::create))
                .route("/teachers/{name}/edit", web::get().to(handlers::teacher_handlers::edit_form))
                .route("/teachers/{name}", web::post().to(handlers::teacher_handlers::update))
                .route("/teachers/{name}/delete", web::post().to(handlers::teacher_handlers::delete))
                .default_service(web::to(not_found)),
        );
}

async fn not_found() -> HttpResponse {
    errors::not_found_page()
}
