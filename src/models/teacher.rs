use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub phone_number: String,
}

/// Body for `POST /teachers` and `PUT /teachers/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub department: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
}

/// Form data from the create/edit teacher forms.
#[derive(Debug, Deserialize)]
pub struct TeacherForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub phone_number: String,
    pub csrf_token: String,
}

impl TeacherForm {
    pub fn to_payload(&self) -> TeacherPayload {
        TeacherPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            title: self.title.trim().to_string(),
            department: self.department.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        }
    }
}

pub fn filter_teachers(teachers: Vec<Teacher>, search: &str) -> Vec<Teacher> {
    let needle = search.trim().to_lowercase();
    teachers
        .into_iter()
        .filter(|t| needle.is_empty() || t.name.to_lowercase().contains(&needle))
        .collect()
}
