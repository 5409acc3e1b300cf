use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Local;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::attendance::RecordReport;
use crate::models::monitoring::{MonitorGuard, monitoring_active};
use crate::models::student::not_enrolled;
use crate::templates_structs::{CourseDetailTemplate, PageContext};

/// Course page: info, monitoring state, roster and every record with its
/// derived attendance. Only the course info is required; the other sections
/// show an inline notice when their fetch fails.
pub async fn detail(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    guard: web::Data<MonitorGuard>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();
    let ctx = PageContext::build(&session, &config, "/courses")?;

    let (course, records, roster, all_students) = tokio::join!(
        api.course_info(&course_id),
        api.course_records(&course_id),
        api.course_students(&course_id),
        api.list_students(),
    );

    let course = match course {
        Ok(c) => c,
        Err(e) if e.status() == Some(404) => return Err(AppError::NotFound),
        Err(e) => return Err(e.into()),
    };

    // Monitoring state comes only from the records fetched for this render
    let (reports, monitoring, records_error) = match records {
        Ok(records) => {
            let active = monitoring_active(&records);
            let reports = records
                .into_iter()
                .map(|r| RecordReport::build(r, &config.thresholds))
                .collect();
            (reports, Some(active), None)
        }
        Err(e) => {
            log::warn!("Records for course {course_id} unavailable: {e}");
            (Vec::new(), None, Some("Classroom records could not be loaded.".to_string()))
        }
    };

    let (roster, roster_error) = match roster {
        Ok(list) => (list, None),
        Err(e) => {
            log::warn!("Roster for course {course_id} unavailable: {e}");
            (Vec::new(), Some("The course roster could not be loaded.".to_string()))
        }
    };
    let candidates = match all_students {
        Ok(all) if roster_error.is_none() => not_enrolled(&all, &roster),
        Ok(_) => Vec::new(),
        Err(e) => {
            log::warn!("Student list unavailable: {e}");
            Vec::new()
        }
    };

    let tmpl = CourseDetailTemplate {
        ctx,
        phase: course.phase(Local::now().date_naive()),
        course,
        monitoring_active: monitoring,
        toggle_pending: guard.is_busy(&course_id),
        reports,
        records_error,
        roster,
        roster_error,
        candidates,
    };
    render(tmpl)
}
