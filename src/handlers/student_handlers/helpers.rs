use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};

use crate::auth::validate;
use crate::models::student::{StudentForm, StudentPhoto};

/// Largest student form body held in memory, photo included.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Multipart body of the create/edit student forms.
#[derive(MultipartForm)]
pub struct StudentUpload {
    pub id: Option<Text<String>>,
    pub name: Text<String>,
    pub class: Text<String>,
    pub phone: Text<String>,
    pub csrf_token: Text<String>,
    pub image: Option<Bytes>,
}

impl StudentUpload {
    /// Split into the text fields and the photo. An empty file input counts
    /// as no photo.
    pub fn into_parts(self) -> (StudentForm, Option<StudentPhoto>) {
        let photo = self.image.filter(|file| !file.data.is_empty()).map(|file| StudentPhoto {
            file_name: file
                .file_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "photo".to_string()),
            content_type: file
                .content_type
                .map(|m| m.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            data: file.data.to_vec(),
        });
        let form = StudentForm {
            id: self.id.map(|t| t.0).unwrap_or_default(),
            name: self.name.0,
            class: self.class.0,
            phone: self.phone.0,
            csrf_token: self.csrf_token.0,
        };
        (form, photo)
    }
}

/// Validate student form data (used in both create and update flows).
/// On update the id comes from the path, so it is checked there instead.
pub fn validate_student_form(form: &StudentForm, check_id: bool) -> Vec<String> {
    let mut errors = vec![];
    if check_id {
        errors.extend(validate::validate_identifier(&form.id, "Student ID"));
    }
    errors.extend(validate::validate_required(&form.name, "Name", 50));
    errors.extend(validate::validate_required(&form.class, "Class", 50));
    errors.extend(validate::validate_phone(&form.phone, true));
    errors
}

/// The photo is optional; when present it must be an image.
pub fn validate_photo(photo: Option<&StudentPhoto>) -> Option<String> {
    match photo {
        Some(p) if !p.is_image() => Some("Photo must be an image file".to_string()),
        _ => None,
    }
}
