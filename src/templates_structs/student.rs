use askama::Template;

use super::PageContext;
use crate::models::pagination::Page;
use crate::models::student::Student;

pub struct ClassOption {
    pub value: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "students/list.html")]
pub struct StudentListTemplate {
    pub ctx: PageContext,
    pub student_page: Page<Student>,
    pub search_query: String,
    pub class_filter: String,
    pub class_options: Vec<ClassOption>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "students/form.html")]
pub struct StudentFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub student: Option<Student>,
    pub errors: Vec<String>,
}
