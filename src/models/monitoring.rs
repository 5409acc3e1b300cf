use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::record::ClassroomRecord;

/// Monitoring is active iff any fetched record is still detecting.
pub fn monitoring_active(records: &[ClassroomRecord]) -> bool {
    records.iter().any(|r| r.is_detecting)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorAction {
    Start,
    Stop,
}

impl MonitorAction {
    pub fn endpoint(&self) -> &'static str {
        match self {
            MonitorAction::Start => "/course/startMonitoring",
            MonitorAction::Stop => "/course/stopMonitoring",
        }
    }

    pub fn done_message(&self) -> &'static str {
        match self {
            MonitorAction::Start => "Monitoring started",
            MonitorAction::Stop => "Monitoring stopped",
        }
    }

    pub fn failed_message(&self) -> &'static str {
        match self {
            MonitorAction::Start => "Failed to start monitoring",
            MonitorAction::Stop => "Failed to stop monitoring",
        }
    }
}

/// Process-wide set of courses with a start/stop request outstanding.
#[derive(Clone, Default)]
pub struct MonitorGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Held while a toggle request for `course_id` is running; releases on drop.
pub struct InFlight {
    guard: MonitorGuard,
    course_id: String,
}

impl MonitorGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the course. Returns `None` if another toggle for it is running.
    pub fn try_begin(&self, course_id: &str) -> Option<InFlight> {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(course_id.to_string()) {
            return None;
        }
        Some(InFlight {
            guard: self.clone(),
            course_id: course_id.to_string(),
        })
    }

    pub fn is_busy(&self, course_id: &str) -> bool {
        let set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.contains(course_id)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut set = self.guard.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.course_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::SessionFinish;
    use chrono::Utc;

    fn record(id: &str, detecting: bool) -> ClassroomRecord {
        ClassroomRecord {
            course_id: "c1".into(),
            record_id: id.into(),
            created_at: Utc::now(),
            finished_at: SessionFinish::Ongoing,
            teacher_name: String::new(),
            roster: vec![],
            attendees: vec![],
            latecomers: vec![],
            early_leavers: vec![],
            is_detecting: detecting,
        }
    }

    #[test]
    fn active_is_or_of_detecting() {
        assert!(!monitoring_active(&[]));
        assert!(!monitoring_active(&[record("r1", false), record("r2", false)]));
        assert!(monitoring_active(&[record("r1", false), record("r2", true)]));
    }

    #[test]
    fn refetch_without_detecting_flips_to_inactive() {
        let before = vec![record("r1", true)];
        assert!(monitoring_active(&before));
        let after = vec![record("r1", false)];
        assert!(!monitoring_active(&after));
    }

    #[test]
    fn second_toggle_is_rejected_while_in_flight() {
        let guard = MonitorGuard::new();
        let first = guard.try_begin("c1");
        assert!(first.is_some());
        assert!(guard.is_busy("c1"));
        assert!(guard.try_begin("c1").is_none());
        // other courses are independent
        assert!(guard.try_begin("c2").is_some());
        drop(first);
        assert!(!guard.is_busy("c1"));
        assert!(guard.try_begin("c1").is_some());
    }

    #[test]
    fn clones_share_state() {
        let guard = MonitorGuard::new();
        let other = guard.clone();
        let _held = guard.try_begin("c1").unwrap();
        assert!(other.try_begin("c1").is_none());
    }
}
