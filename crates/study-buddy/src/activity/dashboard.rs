use chrono::NaiveDateTime;
use serde::Serialize;

use super::schedule::{StudySchedule, StudySession};
use crate::connections::{with_status, Connection, ConnectionStatus};

/// Snapshot backing the dashboard tabs and connection panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub upcoming_sessions: Vec<StudySession>,
    pub past_sessions: Vec<StudySession>,
    pub active_connections: Vec<Connection>,
    pub pending_connections: Vec<Connection>,
}

impl DashboardSummary {
    pub fn build(schedule: &StudySchedule, connections: &[Connection], now: NaiveDateTime) -> Self {
        Self {
            upcoming_sessions: schedule.upcoming(now).into_iter().cloned().collect(),
            past_sessions: schedule.past(now).into_iter().cloned().collect(),
            active_connections: with_status(connections, ConnectionStatus::Active)
                .into_iter()
                .cloned()
                .collect(),
            pending_connections: with_status(connections, ConnectionStatus::Pending)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    pub fn completed_sessions(&self) -> usize {
        self.past_sessions
            .iter()
            .filter(|session| session.completed)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::schedule::{SessionMode, StudySessionDraft};
    use crate::discovery::CandidateId;
    use chrono::NaiveDate;

    fn on(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, month, day)
            .and_then(|date| date.and_hms_opt(10, 0, 0))
            .expect("valid timestamp")
    }

    fn draft(title: &str, scheduled_at: NaiveDateTime, completed: bool) -> StudySessionDraft {
        StudySessionDraft {
            title: title.to_string(),
            scheduled_at,
            duration_hours: 1.5,
            subject: "Psychology".to_string(),
            buddy_id: None,
            mode: SessionMode::InPerson,
            location: Some("Psychology Building, Study Room 2".to_string()),
            notes: None,
            completed,
        }
    }

    #[test]
    fn partitions_sessions_and_connections() {
        let mut schedule = StudySchedule::default();
        schedule.schedule(draft("Research Methods Discussion", on(5, 5), true));
        schedule.schedule(draft("Organic Chemistry Preparation", on(6, 18), false));
        schedule.schedule(draft("Quantum Mechanics Problem Set", on(5, 10), true));

        let connections = vec![
            Connection {
                id: CandidateId::new("buddy-1"),
                name: "Alex Johnson".to_string(),
                subject: "Computer Science".to_string(),
                status: ConnectionStatus::Active,
                message: None,
            },
            Connection {
                id: CandidateId::new("buddy-7"),
                name: "James Wilson".to_string(),
                subject: "Mathematics".to_string(),
                status: ConnectionStatus::Pending,
                message: Some("Hello!".to_string()),
            },
            Connection {
                id: CandidateId::new("buddy-9"),
                name: "Ryan Patel".to_string(),
                subject: "Marketing".to_string(),
                status: ConnectionStatus::Rejected,
                message: None,
            },
        ];

        let summary = DashboardSummary::build(&schedule, &connections, on(6, 1));
        assert_eq!(summary.upcoming_sessions.len(), 1);
        assert_eq!(
            summary.past_sessions[0].title,
            "Quantum Mechanics Problem Set"
        );
        assert_eq!(summary.completed_sessions(), 2);
        assert_eq!(summary.active_connections.len(), 1);
        assert_eq!(summary.pending_connections[0].name, "James Wilson");
    }
}
