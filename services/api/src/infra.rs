use chrono::{NaiveDate, NaiveDateTime};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use study_buddy::activity::{
    Inbox, Message, MessageId, SessionMode, StudySchedule, StudySessionDraft,
};
use study_buddy::connections::{Connection, ConnectionRegistry, ConnectionStatus, RegistryError};
use study_buddy::directory::{DirectoryError, StaticDirectory};
use study_buddy::discovery::{AvailabilitySlot, CandidateId, DistanceBucket, YearOfStudy};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryConnectionRegistry {
    connections: Arc<Mutex<Vec<Connection>>>,
}

impl InMemoryConnectionRegistry {
    pub(crate) fn seeded(connections: Vec<Connection>) -> Self {
        Self {
            connections: Arc::new(Mutex::new(connections)),
        }
    }
}

impl ConnectionRegistry for InMemoryConnectionRegistry {
    fn list(&self) -> Result<Vec<Connection>, RegistryError> {
        let guard = self
            .connections
            .lock()
            .map_err(|_| RegistryError::Unavailable("registry mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn insert_if_absent(&self, connection: Connection) -> Result<bool, RegistryError> {
        let mut guard = self
            .connections
            .lock()
            .map_err(|_| RegistryError::Unavailable("registry mutex poisoned".to_string()))?;
        if guard.iter().any(|existing| existing.id == connection.id) {
            return Ok(false);
        }
        guard.push(connection);
        Ok(true)
    }
}

/// Roster from a CSV or JSON export when one is configured, otherwise the bundled sample.
pub(crate) fn load_directory(roster_csv: Option<&Path>) -> Result<StaticDirectory, DirectoryError> {
    match roster_csv {
        Some(path) => {
            let directory = StaticDirectory::from_path(path)?;
            info!(path = %path.display(), candidates = directory.len(), "roster imported");
            Ok(directory)
        }
        None => Ok(StaticDirectory::sample()),
    }
}

fn connection(
    id: &str,
    name: &str,
    subject: &str,
    status: ConnectionStatus,
    message: Option<&str>,
) -> Connection {
    Connection {
        id: CandidateId::new(id),
        name: name.to_string(),
        subject: subject.to_string(),
        status,
        message: message.map(str::to_string),
    }
}

const EMILY_REQUEST: &str = "Hi! I noticed we're both interested in cognitive psychology. \
Would you like to study together for the upcoming exam?";
const JAMES_REQUEST: &str = "Hello! I see you're also studying abstract algebra. \
I've been working on some challenging problems and would love to collaborate.";

/// Connections the demo student already has.
pub(crate) fn seed_connections() -> Vec<Connection> {
    let active = |id, name, subject| connection(id, name, subject, ConnectionStatus::Active, None);
    vec![
        active("buddy-1", "Alex Johnson", "Computer Science"),
        active("buddy-2", "Sarah Williams", "Biology"),
        active("buddy-3", "Michael Chen", "Physics"),
        connection(
            "buddy-4",
            "Emily Rodriguez",
            "Psychology",
            ConnectionStatus::Pending,
            Some(EMILY_REQUEST),
        ),
        connection(
            "buddy-7",
            "James Wilson",
            "Mathematics",
            ConnectionStatus::Pending,
            Some(JAMES_REQUEST),
        ),
    ]
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day).and_then(|date| date.and_hms_opt(hour, minute, 0))
}

struct SessionSeed {
    title: &'static str,
    at: (i32, u32, u32, u32, u32),
    duration_hours: f32,
    subject: &'static str,
    buddy: &'static str,
    mode: SessionMode,
    location: Option<&'static str>,
    notes: &'static str,
    completed: bool,
}

const SESSION_SEEDS: [SessionSeed; 4] = [
    SessionSeed {
        title: "Algorithms Review",
        at: (2025, 6, 15, 15, 0),
        duration_hours: 2.0,
        subject: "Computer Science",
        buddy: "buddy-1",
        mode: SessionMode::Online,
        location: None,
        notes: "Focus on dynamic programming and graph algorithms",
        completed: false,
    },
    SessionSeed {
        title: "Organic Chemistry Preparation",
        at: (2025, 6, 18, 10, 0),
        duration_hours: 3.0,
        subject: "Chemistry",
        buddy: "buddy-2",
        mode: SessionMode::InPerson,
        location: Some("University Library, Room 305"),
        notes: "Reviewing mechanisms for midterm exam",
        completed: false,
    },
    SessionSeed {
        title: "Quantum Mechanics Problem Set",
        at: (2025, 5, 10, 14, 0),
        duration_hours: 2.5,
        subject: "Physics",
        buddy: "buddy-3",
        mode: SessionMode::Online,
        location: None,
        notes: "Work through problem set #4, focus on wave functions",
        completed: true,
    },
    SessionSeed {
        title: "Research Methods Discussion",
        at: (2025, 5, 5, 11, 0),
        duration_hours: 1.5,
        subject: "Psychology",
        buddy: "buddy-4",
        mode: SessionMode::InPerson,
        location: Some("Psychology Building, Study Room 2"),
        notes: "Discuss experimental design for final project",
        completed: true,
    },
];

pub(crate) fn sample_schedule() -> StudySchedule {
    let mut schedule = StudySchedule::default();
    for seed in &SESSION_SEEDS {
        let (year, month, day, hour, minute) = seed.at;
        let Some(scheduled_at) = timestamp(year, month, day, hour, minute) else {
            continue;
        };
        schedule.schedule(StudySessionDraft {
            title: seed.title.to_string(),
            scheduled_at,
            duration_hours: seed.duration_hours,
            subject: seed.subject.to_string(),
            buddy_id: Some(CandidateId::new(seed.buddy)),
            mode: seed.mode,
            location: seed.location.map(str::to_string),
            notes: Some(seed.notes.to_string()),
            completed: seed.completed,
        });
    }
    schedule
}

pub(crate) const DEMO_USER_ID: &str = "user-1";

const MESSAGE_SEEDS: [(&str, &str, &str, &str, (u32, u32, u32, u32), bool); 8] = [
    (
        "msg-1",
        "buddy-1",
        DEMO_USER_ID,
        "Hey! Are we still on for our algorithms study session tomorrow?",
        (6, 14, 14, 25),
        true,
    ),
    (
        "msg-2",
        DEMO_USER_ID,
        "buddy-1",
        "Yes, definitely! I've been working through the practice problems. Do you want to focus on anything specific?",
        (6, 14, 14, 30),
        true,
    ),
    (
        "msg-3",
        "buddy-1",
        DEMO_USER_ID,
        "I'm struggling a bit with dynamic programming. Could we spend some extra time on that?",
        (6, 14, 14, 32),
        true,
    ),
    (
        "msg-4",
        DEMO_USER_ID,
        "buddy-1",
        "Sure! I found some great resources on dynamic programming that we can go through together.",
        (6, 14, 14, 35),
        true,
    ),
    (
        "msg-5",
        "buddy-1",
        DEMO_USER_ID,
        "That sounds perfect. Thanks for being so helpful! See you online at 3 PM tomorrow.",
        (6, 14, 14, 40),
        false,
    ),
    (
        "msg-6",
        "buddy-2",
        DEMO_USER_ID,
        "Hi! I just found out our Organic Chemistry exam got moved up a week. Do you want to meet earlier than planned?",
        (6, 14, 16, 10),
        false,
    ),
    (
        "msg-7",
        "buddy-3",
        DEMO_USER_ID,
        "Thanks for the help with the quantum mechanics problems last week. I got an A on the assignment!",
        (5, 15, 9, 20),
        true,
    ),
    (
        "msg-8",
        DEMO_USER_ID,
        "buddy-3",
        "That's awesome news! Congratulations! Those problems were definitely challenging.",
        (5, 15, 10, 5),
        true,
    ),
];

pub(crate) fn sample_inbox() -> Inbox {
    let messages = MESSAGE_SEEDS
        .iter()
        .filter_map(|(id, from, to, content, (month, day, hour, minute), read)| {
            Some(Message {
                id: MessageId(id.to_string()),
                sender_id: CandidateId::new(*from),
                recipient_id: CandidateId::new(*to),
                content: content.to_string(),
                sent_at: timestamp(2025, *month, *day, *hour, *minute)?,
                read: *read,
            })
        })
        .collect();
    Inbox::new(messages)
}

pub(crate) fn parse_year(raw: &str) -> Result<YearOfStudy, String> {
    YearOfStudy::parse(raw).ok_or_else(|| {
        format!("unknown year of study '{raw}' (expected one of 1, 2, 3, 4, 5+, Graduate)")
    })
}

pub(crate) fn parse_slot(raw: &str) -> Result<AvailabilitySlot, String> {
    AvailabilitySlot::parse(raw)
        .ok_or_else(|| format!("unknown availability slot '{raw}' (e.g. 'Weekday evenings')"))
}

pub(crate) fn parse_distance(raw: &str) -> Result<DistanceBucket, String> {
    DistanceBucket::parse(raw)
        .ok_or_else(|| format!("unknown distance '{raw}' (e.g. '10 miles', 'Remote only')"))
}

pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DDTHH:MM[:SS] ({err})"))
}
