use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::ApiClient;
use crate::auth::session::set_flash;
use crate::auth::{csrf, validate};
use crate::errors::{AppError, see_other};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::local_path;

#[derive(Deserialize)]
pub struct AddStudentForm {
    pub sid: String,
    pub csrf_token: String,
}

pub async fn add_student(
    api: web::Data<ApiClient>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<AddStudentForm>,
) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let back = local_path(&["courses", &course_id]);

    if let Some(err) = validate::validate_identifier(&form.sid, "Student") {
        set_flash(&session, &err);
        return Ok(see_other(&back));
    }

    let student_id = form.sid.trim();
    match api.add_student_to_course(&course_id, student_id).await {
        Ok(()) => set_flash(&session, "Student added to course"),
        Err(e) => {
            log::error!("Adding {student_id} to course {course_id} failed: {e}");
            set_flash(&session, "Failed to add student to course");
        }
    }
    Ok(see_other(&back))
}

pub async fn remove_student(
    api: web::Data<ApiClient>,
    session: Session,
    path: web::Path<(String, String)>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let (course_id, student_id) = path.into_inner();
    csrf::validate_csrf(&session, &form.csrf_token)?;

    match api.remove_student_from_course(&course_id, &student_id).await {
        Ok(()) => set_flash(&session, "Student removed from course"),
        Err(e) => {
            log::error!("Removing {student_id} from course {course_id} failed: {e}");
            set_flash(&session, "Failed to remove student from course");
        }
    }
    Ok(see_other(&local_path(&["courses", &course_id])))
}
