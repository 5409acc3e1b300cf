use reqwest::multipart::{Form, Part};

use super::{ApiClient, ApiError};
use crate::models::student::{Student, StudentPhoto};

impl ApiClient {
    pub async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        let endpoint = "/student/list";
        self.fetch_list(self.http.get(self.monitor_url(endpoint)), endpoint).await
    }

    pub async fn create_student(&self, student: &Student, photo: Option<StudentPhoto>) -> Result<(), ApiError> {
        self.write_student("/student/create", student, photo).await
    }

    /// No `image` part is sent when `photo` is `None`.
    pub async fn update_student(&self, student: &Student, photo: Option<StudentPhoto>) -> Result<(), ApiError> {
        self.write_student("/student/updateStudent", student, photo).await
    }

    pub async fn delete_student(&self, student_id: &str) -> Result<(), ApiError> {
        let endpoint = "/student/remove";
        let request = self.http.post(self.monitor_url(endpoint)).form(&[("id", student_id)]);
        self.execute(request, endpoint).await
    }

    /// Student writes are multipart so the photo can ride along.
    async fn write_student(
        &self,
        endpoint: &str,
        student: &Student,
        photo: Option<StudentPhoto>,
    ) -> Result<(), ApiError> {
        let mut form = Form::new()
            .text("id", student.id.clone())
            .text("name", student.name.clone())
            .text("class", student.class.clone())
            .text("phone", student.phone.clone());
        if let Some(photo) = photo {
            let part = Part::bytes(photo.data)
                .file_name(photo.file_name)
                .mime_str(&photo.content_type)?;
            form = form.part("image", part);
        }
        let request = self.http.post(self.monitor_url(endpoint)).multipart(form);
        self.execute(request, endpoint).await
    }
}
