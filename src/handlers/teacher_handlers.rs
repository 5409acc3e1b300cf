use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::ApiClient;
use crate::auth::session::set_flash;
use crate::auth::{csrf, validate};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::local_path;
use crate::models::teacher::{Teacher, TeacherForm, TeacherPayload, filter_teachers};
use crate::templates_structs::{PageContext, TeacherFormTemplate, TeacherListTemplate};

#[derive(Deserialize)]
pub struct TeacherQuery {
    q: Option<String>,
}

fn validate_teacher_form(form: &TeacherForm) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.name, "Name", 50));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_optional(&form.title, "Title", 50));
    errors.extend(validate::validate_optional(&form.department, "Department", 100));
    errors.extend(validate::validate_phone(&form.phone_number, false));
    errors
}

/// Echo submitted values back into the form after a failed submit.
fn echo(payload: &TeacherPayload) -> Teacher {
    Teacher {
        id: String::new(),
        name: payload.name.clone(),
        email: payload.email.clone(),
        title: payload.title.clone(),
        department: payload.department.clone(),
        phone_number: payload.phone_number.clone(),
    }
}

fn form_page(
    ctx: PageContext,
    action: String,
    title: &str,
    teacher: Option<Teacher>,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    render(TeacherFormTemplate {
        ctx,
        form_action: action,
        form_title: title.to_string(),
        teacher,
        errors,
    })
}

/// Teachers are keyed by name.
fn teacher_path(name: &str) -> String {
    local_path(&["teachers", name])
}

pub async fn list(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    query: web::Query<TeacherQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config, "/teachers")?;
    let search = query.q.clone().unwrap_or_default();

    let (teachers, error) = match api.list_teachers().await {
        Ok(list) => (filter_teachers(list, &search), None),
        Err(e) => {
            log::warn!("Teacher list unavailable: {e}");
            (Vec::new(), Some("Teachers could not be loaded.".to_string()))
        }
    };

    render(TeacherListTemplate { ctx, teachers, search_query: search, error })
}

pub async fn new_form(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config, "/teachers")?;
    form_page(ctx, "/teachers".to_string(), "Add Teacher", None, vec![])
}

pub async fn create(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    form: web::Form<TeacherForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let payload = form.to_payload();
    let errors = validate_teacher_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &config, "/teachers")?;
        return form_page(ctx, "/teachers".to_string(), "Add Teacher", Some(echo(&payload)), errors);
    }

    match api.create_teacher(&payload).await {
        Ok(()) => {
            log::info!("Created teacher {}", payload.name);
            set_flash(&session, "Teacher created successfully");
            Ok(see_other("/teachers"))
        }
        Err(e) => {
            log::error!("Creating teacher {} failed: {e}", payload.name);
            let ctx = PageContext::build(&session, &config, "/teachers")?;
            let msg = format!("Error creating teacher: {e}");
            form_page(ctx, "/teachers".to_string(), "Add Teacher", Some(echo(&payload)), vec![msg])
        }
    }
}

pub async fn edit_form(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    let ctx = PageContext::build(&session, &config, "/teachers")?;

    let teacher = api
        .list_teachers()
        .await?
        .into_iter()
        .find(|t| t.name == name)
        .ok_or(AppError::NotFound)?;

    form_page(ctx, teacher_path(&name), "Edit Teacher", Some(teacher), vec![])
}

pub async fn update(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<TeacherForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let name = path.into_inner();

    let payload = form.to_payload();
    let errors = validate_teacher_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &config, "/teachers")?;
        return form_page(ctx, teacher_path(&name), "Edit Teacher", Some(echo(&payload)), errors);
    }

    match api.update_teacher(&name, &payload).await {
        Ok(()) => {
            log::info!("Updated teacher {name}");
            set_flash(&session, "Teacher updated successfully");
            Ok(see_other("/teachers"))
        }
        Err(e) => {
            log::error!("Updating teacher {name} failed: {e}");
            let ctx = PageContext::build(&session, &config, "/teachers")?;
            let msg = format!("Error updating teacher: {e}");
            form_page(ctx, teacher_path(&name), "Edit Teacher", Some(echo(&payload)), vec![msg])
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
    let name = path.into_inner();

    match api.delete_teacher(&name).await {
        Ok(()) => {
            log::info!("Deleted teacher {name}");
            set_flash(&session, "Teacher deleted");
        }
        Err(e) => {
            log::error!("Deleting teacher {name} failed: {e}");
            set_flash(&session, "Failed to delete teacher");
        }
    }
    Ok(see_other("/teachers"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, phone: &str) -> TeacherForm {
        TeacherForm {
            name: name.into(),
            email: email.into(),
            title: String::new(),
            department: String::new(),
            phone_number: phone.into(),
            csrf_token: "t".into(),
        }
    }

    #[test]
    fn optional_fields_may_be_blank() {
        assert!(validate_teacher_form(&form("Li Ming", "li@example.com", "")).is_empty());
    }

    #[test]
    fn name_and_email_are_checked() {
        let errors = validate_teacher_form(&form("", "not-an-email", ""));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn teacher_names_are_escaped_in_paths() {
        assert_eq!(teacher_path("Li Ming"), "/teachers/Li%20Ming");
    }
}
