use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, Timelike};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::course::PhaseCounts;
use crate::templates_structs::{DashboardTemplate, PageContext};

fn time_greeting(username: &str, hour: u32) -> String {
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{period}, {username}")
}

fn count_or_dash<T, E: std::fmt::Display>(result: &Result<Vec<T>, E>, what: &str) -> String {
    match result {
        Ok(items) => items.len().to_string(),
        Err(e) => {
            log::warn!("Dashboard could not load {what}: {e}");
            "-".to_string()
        }
    }
}

pub async fn index(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config, "/dashboard")?;
    let greeting = time_greeting(&ctx.username, Local::now().hour());

    let (courses, students, teachers) =
        tokio::join!(api.list_courses(), api.list_students(), api.list_teachers());

    let today = Local::now().date_naive();
    let (total_courses, active_courses, upcoming_courses, completed_courses) = match &courses {
        Ok(list) => {
            let counts = PhaseCounts::tally(list, today);
            (
                counts.total().to_string(),
                counts.active.to_string(),
                counts.upcoming.to_string(),
                counts.completed.to_string(),
            )
        }
        Err(e) => {
            log::warn!("Dashboard could not load courses: {e}");
            let dash = || "-".to_string();
            (dash(), dash(), dash(), dash())
        }
    };

    let tmpl = DashboardTemplate {
        ctx,
        greeting,
        total_courses,
        active_courses,
        upcoming_courses,
        completed_courses,
        student_count: count_or_dash(&students, "students"),
        teacher_count: count_or_dash(&teachers, "teachers"),
    };
    render(tmpl)
}
