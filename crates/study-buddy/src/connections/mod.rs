//! Connection registry contract: the authoritative status of each buddy relationship.

use serde::{Deserialize, Serialize};

use crate::discovery::{Candidate, CandidateId};

pub const DEFAULT_SUBJECT: &str = "General Studies";
pub const DEFAULT_REQUEST_MESSAGE: &str = "I would like to connect and study together!";

/// Lifecycle of a buddy relationship as tracked by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Pending,
    Active,
    Rejected,
}

impl ConnectionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Active => "active",
            ConnectionStatus::Rejected => "rejected",
        }
    }
}

/// A relationship with one buddy, keyed by the buddy's candidate id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: CandidateId,
    pub name: String,
    pub subject: String,
    pub status: ConnectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Connection {
    /// Outbound request built from a directory profile.
    pub fn pending_request(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.full_name.clone(),
            subject: candidate
                .primary_subject()
                .unwrap_or(DEFAULT_SUBJECT)
                .to_string(),
            status: ConnectionStatus::Pending,
            message: Some(DEFAULT_REQUEST_MESSAGE.to_string()),
        }
    }

    /// Avatar initials: the first character of every space-separated name part.
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|part| part.chars().next())
        .collect()
}

/// Storage abstraction for connections so discovery can be exercised in isolation.
pub trait ConnectionRegistry: Send + Sync {
    fn list(&self) -> Result<Vec<Connection>, RegistryError>;

    fn find(&self, id: &CandidateId) -> Result<Option<Connection>, RegistryError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|connection| &connection.id == id))
    }

    /// Store `connection` unless one already exists for the same buddy.
    /// Returns `true` when the connection was inserted.
    fn insert_if_absent(&self, connection: Connection) -> Result<bool, RegistryError>;
}

/// Error enumeration for registry failures.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

/// Split connections the way the dashboard and inbox present them.
pub fn with_status(connections: &[Connection], status: ConnectionStatus) -> Vec<&Connection> {
    connections
        .iter()
        .filter(|connection| connection.status == status)
        .collect()
}
