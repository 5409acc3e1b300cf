pub mod attendance;
pub mod course;
pub mod monitoring;
pub mod pagination;
pub mod record;
pub mod student;
pub mod teacher;
pub mod user;
