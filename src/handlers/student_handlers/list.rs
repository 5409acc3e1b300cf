use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::pagination::Page;
use crate::models::student::{class_options, filter_students};
use crate::templates_structs::{ClassOption, PageContext, StudentListTemplate};

const PER_PAGE: usize = 10;

#[derive(Deserialize)]
pub struct StudentQuery {
    q: Option<String>,
    class: Option<String>,
    page: Option<usize>,
}

pub async fn list(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    query: web::Query<StudentQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config, "/students")?;
    let search = query.q.clone().unwrap_or_default();
    let class_filter = query
        .class
        .clone()
        .filter(|c| !c.is_empty() && c != "all")
        .unwrap_or_default();

    let (students, error) = match api.list_students().await {
        Ok(list) => (list, None),
        Err(e) => {
            log::warn!("Student list unavailable: {e}");
            (Vec::new(), Some("Students could not be loaded.".to_string()))
        }
    };

    let options = class_options(&students)
        .into_iter()
        .map(|value| ClassOption { selected: value == class_filter, value })
        .collect();
    let class = (!class_filter.is_empty()).then_some(class_filter.as_str());
    let filtered = filter_students(students, &search, class);
    let student_page = Page::paginate(filtered, query.page.unwrap_or(1), PER_PAGE);

    let tmpl = StudentListTemplate {
        ctx,
        student_page,
        search_query: search,
        class_filter,
        class_options: options,
        error,
    };
    render(tmpl)
}
