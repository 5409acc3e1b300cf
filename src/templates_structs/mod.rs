// Template context structures for askama templates, organized by page area.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{SessionContext, take_flash};
use crate::config::AppConfig;
use crate::errors::AppError;

mod common;
mod course;
mod dashboard;
mod student;
mod teacher;

pub use self::common::{AccountTemplate, LoginTemplate};
pub use self::course::{CourseDetailTemplate, CourseListTemplate, PageLink, PhaseOption, RecordImagesTemplate};
pub use self::dashboard::DashboardTemplate;
pub use self::student::{ClassOption, StudentFormTemplate, StudentListTemplate};
pub use self::teacher::{TeacherFormTemplate, TeacherListTemplate};

pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

const NAV: [(&str, &str); 4] = [
    ("/dashboard", "Home"),
    ("/courses", "Courses"),
    ("/students", "Students"),
    ("/teachers", "Teachers"),
];

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.username`, `ctx.nav`, etc.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub role_label: String,
    pub flash: Option<String>,
    pub nav: Vec<NavItem>,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig, current_path: &str) -> Result<Self, AppError> {
        let current = SessionContext::load(session)?;
        Ok(Self::from_parts(session, config, &current, current_path))
    }

    pub fn from_parts(
        session: &Session,
        config: &AppConfig,
        current: &SessionContext,
        current_path: &str,
    ) -> Self {
        let username = current.user.name.clone();
        let avatar_initial = username.chars().next().unwrap_or('?').to_uppercase().to_string();
        let nav = NAV
            .iter()
            .map(|&(href, label)| NavItem {
                href,
                label,
                active: current_path == href || current_path.starts_with(&format!("{href}/")),
            })
            .collect();
        Self {
            username,
            avatar_initial,
            role_label: current.user.role.label().to_string(),
            flash: take_flash(session),
            nav,
            app_name: config.app_name.clone(),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}
