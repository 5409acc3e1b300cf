use askama::Template;

use super::PageContext;
use crate::models::teacher::Teacher;

#[derive(Template)]
#[template(path = "teachers/list.html")]
pub struct TeacherListTemplate {
    pub ctx: PageContext,
    pub teachers: Vec<Teacher>,
    pub search_query: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "teachers/form.html")]
pub struct TeacherFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub teacher: Option<Teacher>,
    pub errors: Vec<String>,
}
