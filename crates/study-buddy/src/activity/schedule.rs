use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::discovery::CandidateId;

/// Identifier wrapper for scheduled study sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudySessionId(pub String);

static STUDY_SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_study_session_id() -> StudySessionId {
    let id = STUDY_SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    StudySessionId(format!("session-{id:06}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionMode {
    Online,
    InPerson,
}

impl SessionMode {
    pub const fn label(self) -> &'static str {
        match self {
            SessionMode::Online => "online",
            SessionMode::InPerson => "in-person",
        }
    }
}

/// A planned or completed study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: StudySessionId,
    pub title: String,
    pub scheduled_at: NaiveDateTime,
    pub duration_hours: f32,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buddy_id: Option<CandidateId>,
    pub mode: SessionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Session fields supplied by the scheduling form; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySessionDraft {
    pub title: String,
    pub scheduled_at: NaiveDateTime,
    pub duration_hours: f32,
    pub subject: String,
    #[serde(default)]
    pub buddy_id: Option<CandidateId>,
    pub mode: SessionMode,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl StudySessionDraft {
    fn into_session(self, id: StudySessionId) -> StudySession {
        StudySession {
            id,
            title: self.title,
            scheduled_at: self.scheduled_at,
            duration_hours: self.duration_hours,
            subject: self.subject,
            buddy_id: self.buddy_id,
            mode: self.mode,
            location: self.location,
            notes: self.notes,
            completed: self.completed,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudySchedule {
    sessions: Vec<StudySession>,
}

impl StudySchedule {
    pub fn schedule(&mut self, draft: StudySessionDraft) -> &StudySession {
        let id = next_study_session_id();
        self.sessions.push(draft.into_session(id));
        &self.sessions[self.sessions.len() - 1]
    }

    pub fn sessions(&self) -> &[StudySession] {
        &self.sessions
    }

    /// Sessions starting at or after `now`, soonest first.
    pub fn upcoming(&self, now: NaiveDateTime) -> Vec<&StudySession> {
        let mut upcoming: Vec<&StudySession> = self
            .sessions
            .iter()
            .filter(|session| session.scheduled_at >= now)
            .collect();
        upcoming.sort_by_key(|session| session.scheduled_at);
        upcoming
    }

    /// Sessions that started before `now`, most recent first.
    pub fn past(&self, now: NaiveDateTime) -> Vec<&StudySession> {
        let mut past: Vec<&StudySession> = self
            .sessions
            .iter()
            .filter(|session| session.scheduled_at < now)
            .collect();
        past.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        past
    }
}
