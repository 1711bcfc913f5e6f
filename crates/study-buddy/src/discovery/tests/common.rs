use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::connections::{Connection, ConnectionRegistry, ConnectionStatus, RegistryError};
use crate::directory::{BuddyDirectory, DirectoryError, StaticDirectory};
use crate::discovery::domain::{
    AvailabilitySlot, Candidate, CandidateId, SessionUser, YearOfStudy,
};
use crate::discovery::{discovery_router, BuddyDiscoveryService};

pub(super) fn alex() -> Candidate {
    Candidate {
        major: Some("Computer Science".to_string()),
        year_of_study: Some(YearOfStudy::Third),
        subjects: vec!["Algorithms".to_string(), "ML".to_string()],
        availability: vec![AvailabilitySlot::WeekdayEvenings],
        ..Candidate::new("b1", "Alex Johnson")
    }
}

pub(super) fn sarah() -> Candidate {
    Candidate {
        major: Some("Biology".to_string()),
        year_of_study: Some(YearOfStudy::Second),
        subjects: vec!["Biology".to_string()],
        availability: vec![AvailabilitySlot::WeekendMornings],
        ..Candidate::new("b2", "Sarah Williams")
    }
}

/// Five profiles with distinct years and availability for facet combinations.
pub(super) fn five_candidates() -> Vec<Candidate> {
    vec![
        alex(),
        sarah(),
        Candidate {
            major: Some("Mathematics".to_string()),
            year_of_study: Some(YearOfStudy::FifthPlus),
            subjects: vec!["Topology".to_string(), "Algorithms".to_string()],
            availability: vec![AvailabilitySlot::WeekdayEvenings],
            ..Candidate::new("b3", "James Wilson")
        },
        Candidate {
            major: Some("Physics".to_string()),
            year_of_study: Some(YearOfStudy::Graduate),
            subjects: vec!["Quantum Mechanics".to_string()],
            availability: vec![
                AvailabilitySlot::WeekdayAfternoons,
                AvailabilitySlot::WeekendMornings,
            ],
            ..Candidate::new("b4", "Michael Chen")
        },
        Candidate::new("b5", "Riley Unset"),
    ]
}

pub(super) fn user() -> SessionUser {
    SessionUser {
        id: CandidateId::new("user-1"),
        full_name: "Casey Student".to_string(),
    }
}

pub(super) fn ids(candidates: &[&Candidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|candidate| candidate.id.0.clone())
        .collect()
}

#[derive(Default, Clone)]
pub(super) struct MemoryRegistry {
    connections: Arc<Mutex<Vec<Connection>>>,
}

impl MemoryRegistry {
    pub(super) fn with(connections: Vec<Connection>) -> Self {
        Self {
            connections: Arc::new(Mutex::new(connections)),
        }
    }

    pub(super) fn snapshot(&self) -> Vec<Connection> {
        self.connections.lock().unwrap().clone()
    }
}

impl ConnectionRegistry for MemoryRegistry {
    fn list(&self) -> Result<Vec<Connection>, RegistryError> {
        Ok(self.connections.lock().unwrap().clone())
    }

    fn insert_if_absent(&self, connection: Connection) -> Result<bool, RegistryError> {
        let mut guard = self.connections.lock().unwrap();
        if guard.iter().any(|existing| existing.id == connection.id) {
            return Ok(false);
        }
        guard.push(connection);
        Ok(true)
    }
}

pub(super) struct OfflineRegistry;

impl ConnectionRegistry for OfflineRegistry {
    fn list(&self) -> Result<Vec<Connection>, RegistryError> {
        Err(RegistryError::Unavailable("offline".to_string()))
    }

    fn insert_if_absent(&self, _connection: Connection) -> Result<bool, RegistryError> {
        Err(RegistryError::Unavailable("offline".to_string()))
    }
}

pub(super) struct OfflineDirectory;

impl BuddyDirectory for OfflineDirectory {
    fn candidates(&self) -> Result<Vec<Candidate>, DirectoryError> {
        Err(DirectoryError::Unavailable("maintenance".to_string()))
    }
}

pub(super) fn active_connection(candidate: &Candidate) -> Connection {
    Connection {
        status: ConnectionStatus::Active,
        message: None,
        ..Connection::pending_request(candidate)
    }
}

pub(super) fn build_service() -> (
    BuddyDiscoveryService<StaticDirectory, MemoryRegistry>,
    Arc<MemoryRegistry>,
) {
    let directory =
        Arc::new(StaticDirectory::new(five_candidates()).expect("unique candidate ids"));
    let registry = Arc::new(MemoryRegistry::default());
    let service = BuddyDiscoveryService::new(directory, registry.clone());
    (service, registry)
}

pub(super) fn discovery_router_with_service(
    service: BuddyDiscoveryService<StaticDirectory, MemoryRegistry>,
) -> axum::Router {
    discovery_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
