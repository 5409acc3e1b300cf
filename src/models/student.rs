use serde::{Deserialize, Serialize};

/// Student as returned by `/student/list` and `/course/queryStudents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "classGroup")]
    pub class: String,
    #[serde(default, alias = "phoneNumber")]
    pub phone: String,
}

/// Form data from the create/edit student forms.
#[derive(Debug, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub class: String,
    pub phone: String,
    pub csrf_token: String,
}

impl StudentForm {
    /// Trimmed payload for the remote service. `id` is taken from the path on edit.
    pub fn to_student(&self, id: &str) -> Student {
        Student {
            id: id.trim().to_string(),
            name: self.name.trim().to_string(),
            class: self.class.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}

/// Face photo sent to the service as the `image` part. The service matches
/// classroom snapshots against it.
#[derive(Debug, Clone)]
pub struct StudentPhoto {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl StudentPhoto {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Search by name or id (case-insensitive) and optionally by exact class.
pub fn filter_students(students: Vec<Student>, search: &str, class: Option<&str>) -> Vec<Student> {
    let needle = search.trim().to_lowercase();
    students
        .into_iter()
        .filter(|s| {
            needle.is_empty()
                || s.name.to_lowercase().contains(&needle)
                || s.id.to_lowercase().contains(&needle)
        })
        .filter(|s| class.is_none_or(|c| s.class == c))
        .collect()
}

/// Distinct non-empty class names, sorted.
pub fn class_options(students: &[Student]) -> Vec<String> {
    let mut classes: Vec<String> = students
        .iter()
        .map(|s| s.class.clone())
        .filter(|c| !c.is_empty())
        .collect();
    classes.sort();
    classes.dedup();
    classes
}

/// Students from `all` that are not yet on `roster`, for the "add to course" picker.
pub fn not_enrolled(all: &[Student], roster: &[Student]) -> Vec<Student> {
    all.iter()
        .filter(|s| !roster.iter().any(|r| r.id == s.id))
        .cloned()
        .collect()
}
