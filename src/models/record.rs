use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Literal the monitoring service stores in `finishedAt` while a session is running.
pub const UNFINISHED_SENTINEL: &str = "0001-01-01T00:00:00Z";

/// Placeholder shown for roster entries that carry only an identifier.
pub const UNKNOWN_STUDENT: &str = "unknown student";

/// Full student detail as embedded in a classroom record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetail {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub phone: String,
}

/// A roster or status-list entry: either a bare id or a full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudentRef {
    Ref(String),
    Detail(StudentDetail),
}

impl StudentRef {
    pub fn id(&self) -> &str {
        match self {
            StudentRef::Ref(id) => id,
            StudentRef::Detail(detail) => &detail.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            StudentRef::Detail(detail) if !detail.name.is_empty() => &detail.name,
            _ => UNKNOWN_STUDENT,
        }
    }

    pub fn detail(&self) -> Option<&StudentDetail> {
        match self {
            StudentRef::Ref(_) => None,
            StudentRef::Detail(detail) => Some(detail),
        }
    }
}

/// End of a monitored session. The wire sentinel never becomes a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionFinish {
    #[default]
    Ongoing,
    Finished(DateTime<Utc>),
}

impl SessionFinish {
    pub fn from_wire(raw: Option<&str>) -> Result<Self, chrono::ParseError> {
        match raw.map(str::trim) {
            None | Some("") | Some(UNFINISHED_SENTINEL) => Ok(SessionFinish::Ongoing),
            Some(ts) => {
                let parsed = DateTime::parse_from_rfc3339(ts)?.with_timezone(&Utc);
                // Any zero-year timestamp is the same sentinel in a different spelling
                if parsed.timestamp() == sentinel_timestamp() {
                    Ok(SessionFinish::Ongoing)
                } else {
                    Ok(SessionFinish::Finished(parsed))
                }
            }
        }
    }

    /// Rendered form: `-` while the session is still running.
    pub fn display(&self) -> String {
        match self {
            SessionFinish::Ongoing => "-".to_string(),
            SessionFinish::Finished(at) => format_timestamp(at),
        }
    }
}

fn sentinel_timestamp() -> i64 {
    DateTime::parse_from_rfc3339(UNFINISHED_SENTINEL)
        .map(|dt| dt.timestamp())
        .unwrap_or(i64::MIN)
}

impl<'de> Deserialize<'de> for SessionFinish {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        SessionFinish::from_wire(raw.as_deref()).map_err(serde::de::Error::custom)
    }
}

impl Serialize for SessionFinish {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SessionFinish::Ongoing => serializer.serialize_str(UNFINISHED_SENTINEL),
            SessionFinish::Finished(at) => serializer.serialize_str(&at.to_rfc3339()),
        }
    }
}

pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Treats a JSON `null` list the same as a missing one.
pub fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One monitored class session as returned by `/course/queryRecords`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomRecord {
    #[serde(default)]
    pub course_id: String,
    pub record_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: SessionFinish,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub roster: Vec<StudentRef>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub attendees: Vec<StudentRef>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub latecomers: Vec<StudentRef>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub early_leavers: Vec<StudentRef>,
    #[serde(default)]
    pub is_detecting: bool,
}

impl ClassroomRecord {
    pub fn created_display(&self) -> String {
        format_timestamp(&self.created_at)
    }

    pub fn finished_display(&self) -> String {
        self.finished_at.display()
    }
}
