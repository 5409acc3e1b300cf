use serde::Serialize;

use super::record::{ClassroomRecord, StudentDetail, StudentRef};

/// Per-student status for one classroom record. Never stored, always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendance {
    pub id: String,
    pub name: String,
    pub is_attending: bool,
    pub is_late: bool,
    pub is_early_leaving: bool,
    pub is_absent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<StudentDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceTag {
    Attending,
    Late,
    EarlyLeaving,
    Absent,
}

impl AttendanceTag {
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceTag::Attending => "Attending",
            AttendanceTag::Late => "Late",
            AttendanceTag::EarlyLeaving => "Left early",
            AttendanceTag::Absent => "Absent",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            AttendanceTag::Attending => "tag-green",
            AttendanceTag::Late => "tag-orange",
            AttendanceTag::EarlyLeaving => "tag-gold",
            AttendanceTag::Absent => "tag-red",
        }
    }
}

impl StudentAttendance {
    /// Tags to render. Absence suppresses every other tag, even if the
    /// record inconsistently marks the student present as well.
    pub fn tags(&self) -> Vec<AttendanceTag> {
        if self.is_absent {
            return vec![AttendanceTag::Absent];
        }
        let mut tags = Vec::with_capacity(3);
        if self.is_attending {
            tags.push(AttendanceTag::Attending);
        }
        if self.is_late {
            tags.push(AttendanceTag::Late);
        }
        if self.is_early_leaving {
            tags.push(AttendanceTag::EarlyLeaving);
        }
        tags
    }
}

fn contains(list: &[StudentRef], id: &str) -> bool {
    list.iter().any(|s| s.id() == id)
}

/// Derive the status of every roster entry, in roster order.
pub fn resolve_attendance(record: &ClassroomRecord) -> Vec<StudentAttendance> {
    record
        .roster
        .iter()
        .map(|student| {
            let id = student.id();
            let is_attending = contains(&record.attendees, id);
            let is_late = contains(&record.latecomers, id);
            let is_early_leaving = contains(&record.early_leavers, id);
            StudentAttendance {
                id: id.to_string(),
                name: student.display_name().to_string(),
                is_attending,
                is_late,
                is_early_leaving,
                is_absent: !is_attending && !is_late && !is_early_leaving,
                detail: student.detail().cloned(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total_students: usize,
    pub attend_count: usize,
    pub late_count: usize,
    pub early_leave_count: usize,
    pub absent_count: usize,
    pub attend_rate_percent: u8,
}

/// Summary counts for a record. `students` must be the output of
/// [`resolve_attendance`] for the same record.
pub fn summarize(record: &ClassroomRecord, students: &[StudentAttendance]) -> AttendanceSummary {
    let total_students = record.roster.len();
    let attend_count = record.attendees.len();
    AttendanceSummary {
        total_students,
        attend_count,
        late_count: record.latecomers.len(),
        early_leave_count: record.early_leavers.len(),
        absent_count: students.iter().filter(|s| s.is_absent).count(),
        attend_rate_percent: attend_rate(attend_count, total_students),
    }
}

/// `round(attend / total * 100)`, 0 for an empty roster, never above 100.
pub fn attend_rate(attend_count: usize, total_students: usize) -> u8 {
    if total_students == 0 {
        return 0;
    }
    let rate = (attend_count as f64 / total_students as f64 * 100.0).round();
    rate.clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBand {
    Good,
    Warning,
    Critical,
}

impl RateBand {
    pub fn css_class(&self) -> &'static str {
        match self {
            RateBand::Good => "rate-good",
            RateBand::Warning => "rate-warning",
            RateBand::Critical => "rate-critical",
        }
    }
}

/// Display bands for the attendance rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateThresholds {
    pub good: u8,
    pub warning: u8,
}

impl Default for RateThresholds {
    fn default() -> Self {
        Self { good: 80, warning: 60 }
    }
}

impl RateThresholds {
    /// Returns `None` unless `warning <= good <= 100`.
    pub fn new(good: u8, warning: u8) -> Option<Self> {
        (warning <= good && good <= 100).then_some(Self { good, warning })
    }

    pub fn band(&self, rate_percent: u8) -> RateBand {
        if rate_percent >= self.good {
            RateBand::Good
        } else if rate_percent >= self.warning {
            RateBand::Warning
        } else {
            RateBand::Critical
        }
    }
}

/// Everything a page or JSON response needs for one record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReport {
    pub record: ClassroomRecord,
    pub students: Vec<StudentAttendance>,
    pub summary: AttendanceSummary,
    pub band: RateBand,
}

impl RecordReport {
    pub fn build(record: ClassroomRecord, thresholds: &RateThresholds) -> Self {
        let students = resolve_attendance(&record);
        let summary = summarize(&record, &students);
        let band = thresholds.band(summary.attend_rate_percent);
        Self { record, students, summary, band }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::SessionFinish;
    use chrono::{TimeZone, Utc};

    fn ids(list: &[&str]) -> Vec<StudentRef> {
        list.iter().map(|s| StudentRef::Ref(s.to_string())).collect()
    }

    fn record(roster: &[&str], attendees: &[&str], late: &[&str], early: &[&str]) -> ClassroomRecord {
        ClassroomRecord {
            course_id: "c1".into(),
            record_id: "r1".into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            finished_at: SessionFinish::Ongoing,
            teacher_name: "Wang".into(),
            roster: ids(roster),
            attendees: ids(attendees),
            latecomers: ids(late),
            early_leavers: ids(early),
            is_detecting: false,
        }
    }

    #[test]
    fn attending_late_and_absent() {
        let r = record(&["s1", "s2", "s3"], &["s1"], &["s2"], &[]);
        let students = resolve_attendance(&r);
        assert_eq!(students[0].tags(), vec![AttendanceTag::Attending]);
        assert_eq!(students[1].tags(), vec![AttendanceTag::Late]);
        assert_eq!(students[2].tags(), vec![AttendanceTag::Absent]);
        assert!(students[2].is_absent);
    }

    #[test]
    fn presence_flags_combine() {
        let r = record(&["s1"], &["s1"], &["s1"], &["s1"]);
        let students = resolve_attendance(&r);
        assert_eq!(
            students[0].tags(),
            vec![AttendanceTag::Attending, AttendanceTag::Late, AttendanceTag::EarlyLeaving]
        );
        assert!(!students[0].is_absent);
    }

    #[test]
    fn absence_suppresses_other_tags() {
        let inconsistent = StudentAttendance {
            id: "s1".into(),
            name: "x".into(),
            is_attending: true,
            is_late: false,
            is_early_leaving: false,
            is_absent: true,
            detail: None,
        };
        assert_eq!(inconsistent.tags(), vec![AttendanceTag::Absent]);
    }

    #[test]
    fn absent_xor_present_for_every_student() {
        let r = record(&["a", "b", "c", "d", "e"], &["a", "d"], &["b", "d"], &["e"]);
        for s in resolve_attendance(&r) {
            let present = s.is_attending || s.is_late || s.is_early_leaving;
            assert!(s.is_absent != present, "student {}", s.id);
        }
    }

    #[test]
    fn summary_counts_and_rate() {
        let r = record(&["s1", "s2", "s3", "s4"], &["s1", "s2", "s3"], &["s3"], &[]);
        let students = resolve_attendance(&r);
        let summary = summarize(&r, &students);
        assert_eq!(summary.total_students, 4);
        assert_eq!(summary.attend_count, 3);
        assert_eq!(summary.late_count, 1);
        assert_eq!(summary.absent_count, 1);
        assert_eq!(summary.attend_rate_percent, 75);
    }

    #[test]
    fn absent_count_matches_union_complement() {
        let r = record(&["a", "b", "c", "d", "e", "f"], &["a"], &["a", "b"], &["b", "c"]);
        let summary = summarize(&r, &resolve_attendance(&r));
        // union {a, b, c}
        assert_eq!(summary.absent_count, 6 - 3);
    }

    #[test]
    fn empty_roster_rate_is_zero() {
        let r = record(&[], &[], &[], &[]);
        let summary = summarize(&r, &resolve_attendance(&r));
        assert_eq!(summary.total_students, 0);
        assert_eq!(summary.attend_rate_percent, 0);
    }

    #[test]
    fn rate_rounds_and_is_bounded() {
        assert_eq!(attend_rate(2, 3), 67);
        assert_eq!(attend_rate(1, 3), 33);
        assert_eq!(attend_rate(5, 4), 100);
        assert_eq!(attend_rate(0, 7), 0);
    }

    #[test]
    fn bands_follow_thresholds() {
        let t = RateThresholds::default();
        assert_eq!(t.band(80), RateBand::Good);
        assert_eq!(t.band(79), RateBand::Warning);
        assert_eq!(t.band(60), RateBand::Warning);
        assert_eq!(t.band(59), RateBand::Critical);

        let strict = RateThresholds::new(95, 90).unwrap();
        assert_eq!(strict.band(92), RateBand::Warning);
        assert!(RateThresholds::new(50, 60).is_none());
        assert!(RateThresholds::new(101, 60).is_none());
    }

    #[test]
    fn report_bundles_band() {
        let r = record(&["s1", "s2"], &["s1"], &[], &[]);
        let report = RecordReport::build(r, &RateThresholds::default());
        assert_eq!(report.summary.attend_rate_percent, 50);
        assert_eq!(report.band, RateBand::Critical);
        assert_eq!(report.students.len(), 2);
    }
}
