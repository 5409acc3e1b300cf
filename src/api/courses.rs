use super::{ApiClient, ApiError};
use crate::models::course::Course;
use crate::models::monitoring::MonitorAction;
use crate::models::student::Student;

impl ApiClient {
    pub async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        let endpoint = "/course/list";
        self.fetch_list(self.http.get(self.monitor_url(endpoint)), endpoint).await
    }

    pub async fn course_info(&self, course_id: &str) -> Result<Course, ApiError> {
        let endpoint = "/course/queryCourseInfo";
        let request = self.http.get(self.monitor_url(endpoint)).query(&[("id", course_id)]);
        self.fetch(request, endpoint).await
    }

    /// Start or stop monitoring. The response body carries nothing we use.
    pub async fn toggle_monitoring(&self, course_id: &str, action: MonitorAction) -> Result<(), ApiError> {
        let endpoint = action.endpoint();
        let request = self.http.post(self.monitor_url(endpoint)).form(&[("id", course_id)]);
        self.execute(request, endpoint).await
    }

    pub async fn course_students(&self, course_id: &str) -> Result<Vec<Student>, ApiError> {
        let endpoint = "/course/queryStudents";
        let request = self.http.get(self.monitor_url(endpoint)).query(&[("id", course_id)]);
        self.fetch_list(request, endpoint).await
    }

    pub async fn add_student_to_course(&self, course_id: &str, student_id: &str) -> Result<(), ApiError> {
        let endpoint = "/course/addStudent";
        let request = self
            .http
            .post(self.monitor_url(endpoint))
            .form(&[("cid", course_id), ("sid", student_id)]);
        self.execute(request, endpoint).await
    }

    pub async fn remove_student_from_course(&self, course_id: &str, student_id: &str) -> Result<(), ApiError> {
        let endpoint = "/course/removeStudent";
        let request = self
            .http
            .post(self.monitor_url(endpoint))
            .form(&[("cid", course_id), ("sid", student_id)]);
        self.execute(request, endpoint).await
    }
}
