use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;
use crate::models::attendance::RecordReport;
use crate::models::monitoring::{MonitorGuard, monitoring_active};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringState {
    pub course_id: String,
    pub active: bool,
    pub toggle_pending: bool,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

fn upstream_error(course_id: &str, e: ApiError) -> HttpResponse {
    log::warn!("Records for course {course_id} unavailable: {e}");
    HttpResponse::BadGateway().json(ApiErrorResponse {
        error: format!("Classroom records could not be loaded: {e}"),
    })
}

/// GET /api/v1/courses/{id}/records - records with derived attendance
pub async fn records(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    path: web::Path<String>,
) -> HttpResponse {
    let course_id = path.into_inner();
    match api.course_records(&course_id).await {
        Ok(records) => {
            let reports: Vec<RecordReport> = records
                .into_iter()
                .map(|r| RecordReport::build(r, &config.thresholds))
                .collect();
            HttpResponse::Ok().json(reports)
        }
        Err(e) => upstream_error(&course_id, e),
    }
}

/// GET /api/v1/courses/{id}/monitoring
pub async fn monitoring(
    api: web::Data<ApiClient>,
    guard: web::Data<MonitorGuard>,
    path: web::Path<String>,
) -> HttpResponse {
    let course_id = path.into_inner();
    match api.course_records(&course_id).await {
        Ok(records) => HttpResponse::Ok().json(MonitoringState {
            active: monitoring_active(&records),
            toggle_pending: guard.is_busy(&course_id),
            course_id,
        }),
        Err(e) => upstream_error(&course_id, e),
    }
}
