use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::local_path;
use crate::models::student::Student;
use crate::templates_structs::{PageContext, StudentFormTemplate};
use super::helpers::{self, StudentUpload};

fn form_page(
    ctx: PageContext,
    action: String,
    title: &str,
    student: Option<Student>,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    render(StudentFormTemplate {
        ctx,
        form_action: action,
        form_title: title.to_string(),
        student,
        errors,
    })
}

pub async fn new_form(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config, "/students")?;
    form_page(ctx, "/students".to_string(), "Add Student", None, vec![])
}

pub async fn create(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    MultipartForm(upload): MultipartForm<StudentUpload>,
) -> Result<HttpResponse, AppError> {
    let (form, photo) = upload.into_parts();
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let student = form.to_student(&form.id);
    let mut errors = helpers::validate_student_form(&form, true);
    errors.extend(helpers::validate_photo(photo.as_ref()));
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &config, "/students")?;
        return form_page(ctx, "/students".to_string(), "Add Student", Some(student), errors);
    }

    match api.create_student(&student, photo).await {
        Ok(()) => {
            log::info!("Created student {}", student.id);
            set_flash(&session, "Student created successfully");
            Ok(see_other("/students"))
        }
        Err(e) => {
            log::error!("Creating student {} failed: {e}", student.id);
            let ctx = PageContext::build(&session, &config, "/students")?;
            let msg = format!("Error creating student: {e}");
            form_page(ctx, "/students".to_string(), "Add Student", Some(student), vec![msg])
        }
    }
}

/// The service has no single-student lookup, so the list is searched.
pub async fn edit_form(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let ctx = PageContext::build(&session, &config, "/students")?;

    let student = api
        .list_students()
        .await?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or(AppError::NotFound)?;

    form_page(ctx, local_path(&["students", &id]), "Edit Student", Some(student), vec![])
}

pub async fn update(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    path: web::Path<String>,
    MultipartForm(upload): MultipartForm<StudentUpload>,
) -> Result<HttpResponse, AppError> {
    let (form, photo) = upload.into_parts();
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    let student = form.to_student(&id);
    let mut errors = helpers::validate_student_form(&form, false);
    errors.extend(helpers::validate_photo(photo.as_ref()));
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &config, "/students")?;
        return form_page(ctx, local_path(&["students", &id]), "Edit Student", Some(student), errors);
    }

    match api.update_student(&student, photo).await {
        Ok(()) => {
            log::info!("Updated student {id}");
            set_flash(&session, "Student updated successfully");
            Ok(see_other("/students"))
        }
        Err(e) => {
            log::error!("Updating student {id} failed: {e}");
            let ctx = PageContext::build(&session, &config, "/students")?;
            let msg = format!("Error updating student: {e}");
            form_page(ctx, local_path(&["students", &id]), "Edit Student", Some(student), vec![msg])
        }
    }
}

pub async fn delete(
    api: web::Data<ApiClient>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    match api.delete_student(&id).await {
        Ok(()) => {
            log::info!("Deleted student {id}");
            set_flash(&session, "Student deleted");
        }
        Err(e) => {
            log::error!("Deleting student {id} failed: {e}");
            set_flash(&session, "Failed to delete student");
        }
    }
    Ok(see_other("/students"))
}
