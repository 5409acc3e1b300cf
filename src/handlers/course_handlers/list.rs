use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Deserialize;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::course::{CoursePhase, filter_courses};
use crate::templates_structs::{CourseListTemplate, PageContext, PhaseOption};

#[derive(Deserialize)]
pub struct CourseQuery {
    q: Option<String>,
    phase: Option<String>,
}

fn phase_options(selected: Option<CoursePhase>) -> Vec<PhaseOption> {
    let mut options = vec![PhaseOption { value: "all", label: "All phases", selected: selected.is_none() }];
    options.extend(CoursePhase::ALL.into_iter().map(|p| PhaseOption {
        value: p.as_str(),
        label: p.label(),
        selected: selected == Some(p),
    }));
    options
}

pub async fn list(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    query: web::Query<CourseQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config, "/courses")?;
    let search = query.q.clone().unwrap_or_default();
    let phase = query.phase.as_deref().and_then(CoursePhase::parse);

    let courses = api.list_courses().await?;
    let cards = filter_courses(courses, &search, phase, Local::now().date_naive());

    let tmpl = CourseListTemplate {
        ctx,
        cards,
        search_query: search,
        phase_options: phase_options(phase),
    };
    render(tmpl)
}
