use super::{ApiClient, ApiError};
use crate::models::teacher::{Teacher, TeacherPayload};

impl ApiClient {
    pub async fn list_teachers(&self) -> Result<Vec<Teacher>, ApiError> {
        let endpoint = "/teachers";
        self.fetch_list(self.http.get(self.api_url(endpoint)), endpoint).await
    }

    pub async fn create_teacher(&self, teacher: &TeacherPayload) -> Result<(), ApiError> {
        let endpoint = "/teachers";
        self.execute(self.http.post(self.api_url(endpoint)).json(teacher), endpoint).await
    }

    /// Teachers are addressed by name on the remote side.
    pub async fn update_teacher(&self, name: &str, teacher: &TeacherPayload) -> Result<(), ApiError> {
        let url = self.api_url_with_segments(&["teachers", name])?;
        self.execute(self.http.put(url).json(teacher), "/teachers/{name}").await
    }

    pub async fn delete_teacher(&self, name: &str) -> Result<(), ApiError> {
        let url = self.api_url_with_segments(&["teachers", name])?;
        self.execute(self.http.delete(url), "/teachers/{name}").await
    }
}
