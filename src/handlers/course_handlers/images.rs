use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::DateTime;
use serde::Deserialize;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::pagination::Page;
use crate::templates_structs::{PageContext, PageLink, RecordImagesTemplate};

const DEFAULT_PER_PAGE: usize = 3;
const MAX_PER_PAGE: usize = 5;

#[derive(Deserialize)]
pub struct ImagesQuery {
    page: Option<usize>,
    per_page: Option<usize>,
    time: Option<String>,
}

fn record_time(raw: Option<&str>) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(raw?.trim()).ok()?;
    Some(parsed.format("%Y-%m-%d %H:%M:%S").to_string())
}

pub async fn images(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    path: web::Path<(String, String)>,
    query: web::Query<ImagesQuery>,
) -> Result<HttpResponse, AppError> {
    let (course_id, record_id) = path.into_inner();
    let ctx = PageContext::build(&session, &config, "/courses")?;
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);

    let (urls, error) = match api.record_images(&course_id, &record_id).await {
        Ok(urls) => (urls, None),
        Err(e) => {
            log::warn!("Images for record {record_id} of course {course_id} unavailable: {e}");
            (Vec::new(), Some("Classroom images could not be loaded.".to_string()))
        }
    };

    let images = Page::paginate(urls, query.page.unwrap_or(1), per_page);
    let page_links = (1..=images.total_pages)
        .map(|number| PageLink { number, current: number == images.page })
        .collect();
    let per_page_options = (1..=MAX_PER_PAGE)
        .map(|number| PageLink { number, current: number == per_page })
        .collect();

    let tmpl = RecordImagesTemplate {
        ctx,
        course_id,
        record_id,
        record_time: record_time(query.time.as_deref()),
        time_param: query.time.clone().unwrap_or_default(),
        images,
        page_links,
        per_page_options,
        error,
    };
    render(tmpl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_time_formats_rfc3339() {
        assert_eq!(record_time(Some("2024-03-01T08:00:00Z")).as_deref(), Some("2024-03-01 08:00:00"));
        assert_eq!(record_time(Some("not a time")), None);
        assert_eq!(record_time(None), None);
    }
}
