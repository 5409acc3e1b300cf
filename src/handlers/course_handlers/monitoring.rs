use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::auth::csrf;
use crate::auth::session::{SessionContext, set_flash};
use crate::errors::{AppError, see_other};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::local_path;
use crate::models::monitoring::{MonitorAction, MonitorGuard};

pub const TOGGLE_PENDING: &str = "A monitoring request for this course is already in progress";

fn parse_action(raw: &str) -> Option<MonitorAction> {
    match raw {
        "start" => Some(MonitorAction::Start),
        "stop" => Some(MonitorAction::Stop),
        _ => None,
    }
}

/// POST /courses/{id}/monitoring/{start|stop}
///
/// At most one toggle per course is outstanding; a concurrent second request
/// is turned away without calling the service. The redirect re-fetches the
/// records, which are the only source of the monitoring state.
pub async fn toggle(
    api: web::Data<ApiClient>,
    guard: web::Data<MonitorGuard>,
    session: Session,
    path: web::Path<(String, String)>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let (course_id, raw_action) = path.into_inner();
    let action = parse_action(&raw_action).ok_or(AppError::NotFound)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let current = SessionContext::load(&session)?;
    let back = local_path(&["courses", &course_id]);

    let Some(_in_flight) = guard.try_begin(&course_id) else {
        log::info!("Ignoring duplicate {action:?} for course {course_id}");
        set_flash(&session, TOGGLE_PENDING);
        return Ok(see_other(&back));
    };

    match api.toggle_monitoring(&course_id, action).await {
        Ok(()) => {
            log::info!("{} requested {action:?} monitoring for course {course_id}", current.user.id);
            set_flash(&session, action.done_message());
        }
        Err(e) => {
            log::error!("{action:?} monitoring for course {course_id} failed: {e}");
            set_flash(&session, action.failed_message());
        }
    }
    Ok(see_other(&back))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_parse() {
        assert_eq!(parse_action("start"), Some(MonitorAction::Start));
        assert_eq!(parse_action("stop"), Some(MonitorAction::Stop));
        assert_eq!(parse_action("pause"), None);
    }
}
