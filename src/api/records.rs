use super::{ApiClient, ApiError};
use crate::models::record::ClassroomRecord;

impl ApiClient {
    /// Classroom records of a course, in the order the service returns them.
    pub async fn course_records(&self, course_id: &str) -> Result<Vec<ClassroomRecord>, ApiError> {
        let endpoint = "/course/queryRecords";
        let request = self.http.get(self.monitor_url(endpoint)).query(&[("courseID", course_id)]);
        self.fetch_list(request, endpoint).await
    }

    /// URLs of the images captured during one session.
    pub async fn record_images(&self, course_id: &str, record_id: &str) -> Result<Vec<String>, ApiError> {
        let endpoint = "/course/queryOriginalImage";
        let request = self
            .http
            .get(self.monitor_url(endpoint))
            .query(&[("courseID", course_id), ("recordID", record_id)]);
        self.fetch_list(request, endpoint).await
    }
}
