use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::record::nullable_list;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoursePhase {
    Upcoming,
    Active,
    Completed,
}

impl CoursePhase {
    pub const ALL: [CoursePhase; 3] = [CoursePhase::Active, CoursePhase::Completed, CoursePhase::Upcoming];

    /// Phase of a course on `today`. Both boundary days count as active.
    pub fn resolve(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        if today < start {
            CoursePhase::Upcoming
        } else if today > end {
            CoursePhase::Completed
        } else {
            CoursePhase::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoursePhase::Upcoming => "upcoming",
            CoursePhase::Active => "active",
            CoursePhase::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoursePhase::Upcoming => "Upcoming",
            CoursePhase::Active => "In progress",
            CoursePhase::Completed => "Finished",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            CoursePhase::Upcoming => "tag-blue",
            CoursePhase::Active => "tag-green",
            CoursePhase::Completed => "tag-gray",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (its date part is used).
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn calendar_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date {raw:?}")))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    /// 0 = Sunday, 1 = Monday .. 6 = Saturday. 7 is also read as Sunday.
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl ScheduleSlot {
    pub fn weekday_label(&self) -> &'static str {
        match self.day_of_week {
            1 => "Monday",
            2 => "Tuesday",
            3 => "Wednesday",
            4 => "Thursday",
            5 => "Friday",
            6 => "Saturday",
            0 | 7 => "Sunday",
            _ => "?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub classroom: String,
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(deserialize_with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "calendar_date")]
    pub end_date: NaiveDate,
    #[serde(default, deserialize_with = "nullable_list")]
    pub schedule: Vec<ScheduleSlot>,
}

impl Course {
    pub fn phase(&self, today: NaiveDate) -> CoursePhase {
        CoursePhase::resolve(self.start_date, self.end_date, today)
    }

    pub fn excerpt(&self, max_chars: usize) -> String {
        if self.description.chars().count() <= max_chars {
            return self.description.clone();
        }
        let cut: String = self.description.chars().take(max_chars).collect();
        format!("{cut}...")
    }

    fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.code.to_lowercase().contains(needle)
    }
}

/// A course paired with its phase for one render.
#[derive(Debug, Clone)]
pub struct CourseCard {
    pub course: Course,
    pub phase: CoursePhase,
}

/// Case-insensitive search over name and code, optionally restricted to a phase.
pub fn filter_courses(
    courses: Vec<Course>,
    search: &str,
    phase: Option<CoursePhase>,
    today: NaiveDate,
) -> Vec<CourseCard> {
    let needle = search.trim().to_lowercase();
    courses
        .into_iter()
        .filter(|c| c.matches_search(&needle))
        .map(|course| {
            let phase = course.phase(today);
            CourseCard { course, phase }
        })
        .filter(|card| phase.is_none_or(|p| card.phase == p))
        .collect()
}

/// Number of courses per phase, in `CoursePhase::ALL` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseCounts {
    pub active: usize,
    pub completed: usize,
    pub upcoming: usize,
}

impl PhaseCounts {
    pub fn tally(courses: &[Course], today: NaiveDate) -> Self {
        courses.iter().fold(Self::default(), |mut acc, c| {
            match c.phase(today) {
                CoursePhase::Active => acc.active += 1,
                CoursePhase::Completed => acc.completed += 1,
                CoursePhase::Upcoming => acc.upcoming += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.active + self.completed + self.upcoming
    }
}
