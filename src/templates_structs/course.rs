use askama::Template;

use super::PageContext;
use crate::models::attendance::RecordReport;
use crate::models::course::{Course, CourseCard, CoursePhase};
use crate::models::pagination::Page;
use crate::models::student::Student;

pub struct PhaseOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "courses/list.html")]
pub struct CourseListTemplate {
    pub ctx: PageContext,
    pub cards: Vec<CourseCard>,
    pub search_query: String,
    pub phase_options: Vec<PhaseOption>,
}

#[derive(Template)]
#[template(path = "courses/detail.html")]
pub struct CourseDetailTemplate {
    pub ctx: PageContext,
    pub course: Course,
    pub phase: CoursePhase,
    pub monitoring_active: Option<bool>,
    pub toggle_pending: bool,
    pub reports: Vec<RecordReport>,
    pub records_error: Option<String>,
    pub roster: Vec<Student>,
    pub roster_error: Option<String>,
    pub candidates: Vec<Student>,
}

pub struct PageLink {
    pub number: usize,
    pub current: bool,
}

#[derive(Template)]
#[template(path = "courses/images.html")]
pub struct RecordImagesTemplate {
    pub ctx: PageContext,
    pub course_id: String,
    pub record_id: String,
    pub record_time: Option<String>,
    /// Raw `time` query value, carried through pagination links.
    pub time_param: String,
    pub images: Page<String>,
    pub page_links: Vec<PageLink>,
    pub per_page_options: Vec<PageLink>,
    pub error: Option<String>,
}

impl CourseDetailTemplate {
    /// Label for the monitoring badge; "Unknown" when records failed to load.
    pub fn monitoring_label(&self) -> &'static str {
        match self.monitoring_active {
            Some(true) => "Monitoring",
            Some(false) => "Not monitoring",
            None => "Unknown",
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring_active == Some(true)
    }

    pub fn monitoring_known(&self) -> bool {
        self.monitoring_active.is_some()
    }
}
