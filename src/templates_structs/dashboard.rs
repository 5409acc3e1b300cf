use askama::Template;

use super::PageContext;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub total_courses: String,
    pub active_courses: String,
    pub upcoming_courses: String,
    pub completed_courses: String,
    pub student_count: String,
    pub teacher_count: String,
}
