use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::criteria::{CriteriaUpdate, FilterCriteria};
use super::domain::{CandidateId, SessionUser};
use super::engine::FacetCatalog;
use super::session::{CandidateMatch, DiscoverySession};
use crate::connections::{Connection, ConnectionRegistry, ConnectionStatus, RegistryError};
use crate::directory::{BuddyDirectory, DirectoryError};

/// Identifier for an open discovery session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("discovery-{id:06}"))
}

/// Filtered view of the directory for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub session_id: SessionId,
    pub criteria: FilterCriteria,
    pub active_filters: usize,
    pub total_candidates: usize,
    pub matches: Vec<CandidateMatch>,
}

/// What happened when a session asked to connect with a buddy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOutcome {
    pub candidate_id: CandidateId,
    /// `false` when the registry already tracked a connection with this buddy.
    pub connection_created: bool,
    pub status: ConnectionStatus,
    pub request_sent: bool,
}

/// Service composing the buddy directory, connection registry, and open sessions.
pub struct BuddyDiscoveryService<D, C> {
    directory: Arc<D>,
    registry: Arc<C>,
    sessions: Mutex<HashMap<SessionId, DiscoverySession>>,
}

impl<D, C> BuddyDiscoveryService<D, C>
where
    D: BuddyDirectory + 'static,
    C: ConnectionRegistry + 'static,
{
    pub fn new(directory: Arc<D>, registry: Arc<C>) -> Self {
        Self {
            directory,
            registry,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn facets(&self) -> Result<FacetCatalog, DiscoveryServiceError> {
        let candidates = self.directory.candidates()?;
        Ok(FacetCatalog::from_candidates(&candidates))
    }

    /// Start browsing with empty criteria and no sent requests.
    pub fn open_session(&self, user: SessionUser) -> Result<SessionId, DiscoveryServiceError> {
        let session_id = next_session_id();
        info!(session = %session_id, user = %user.id, "discovery session opened");
        self.lock_sessions()?
            .insert(session_id.clone(), DiscoverySession::new(user));
        Ok(session_id)
    }

    pub fn session(
        &self,
        session_id: &SessionId,
    ) -> Result<DiscoverySession, DiscoveryServiceError> {
        self.lock_sessions()?
            .get(session_id)
            .cloned()
            .ok_or_else(|| DiscoveryServiceError::UnknownSession(session_id.clone()))
    }

    /// Recompute the filtered list from the full roster.
    pub fn search(&self, session_id: &SessionId) -> Result<SearchResults, DiscoveryServiceError> {
        let session = self.session(session_id)?;
        let candidates = self.directory.candidates()?;
        let matches = session.matches(&candidates);

        debug!(
            session = %session_id,
            total = candidates.len(),
            matched = matches.len(),
            "filters applied"
        );

        Ok(SearchResults {
            session_id: session_id.clone(),
            active_filters: session.criteria().active_filter_count(),
            criteria: session.criteria().clone(),
            total_candidates: candidates.len(),
            matches,
        })
    }

    pub fn update_criteria(
        &self,
        session_id: &SessionId,
        update: CriteriaUpdate,
    ) -> Result<FilterCriteria, DiscoveryServiceError> {
        let mut sessions = self.lock_sessions()?;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| DiscoveryServiceError::UnknownSession(session_id.clone()))?;

        debug!(session = %session_id, ?update, "criteria updated");
        Ok(session.update(update).clone())
    }

    /// Ask the registry for a pending connection and remember the click for this session.
    pub fn send_request(
        &self,
        session_id: &SessionId,
        candidate_id: &CandidateId,
    ) -> Result<RequestOutcome, DiscoveryServiceError> {
        if !self.lock_sessions()?.contains_key(session_id) {
            return Err(DiscoveryServiceError::UnknownSession(session_id.clone()));
        }

        let candidate = self
            .directory
            .find(candidate_id)?
            .ok_or_else(|| DiscoveryServiceError::UnknownCandidate(candidate_id.clone()))?;

        let connection_created = self
            .registry
            .insert_if_absent(Connection::pending_request(&candidate))?;
        let status = self
            .registry
            .find(candidate_id)?
            .map(|connection| connection.status)
            .unwrap_or(ConnectionStatus::Pending);

        let mut sessions = self.lock_sessions()?;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| DiscoveryServiceError::UnknownSession(session_id.clone()))?;
        session.record_request_sent(candidate_id.clone());

        info!(
            session = %session_id,
            user = %session.user().id,
            candidate = %candidate_id,
            connection_created,
            status = status.label(),
            "connection request sent"
        );

        Ok(RequestOutcome {
            candidate_id: candidate_id.clone(),
            connection_created,
            status,
            request_sent: true,
        })
    }

    /// Discard a session together with its request flags.
    pub fn close_session(&self, session_id: &SessionId) -> Result<(), DiscoveryServiceError> {
        let session = self
            .lock_sessions()?
            .remove(session_id)
            .ok_or_else(|| DiscoveryServiceError::UnknownSession(session_id.clone()))?;

        info!(
            session = %session_id,
            user = %session.user().id,
            requests = session.requests().len(),
            "discovery session closed"
        );
        Ok(())
    }

    fn lock_sessions(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<SessionId, DiscoverySession>>, DiscoveryServiceError> {
        self.sessions
            .lock()
            .map_err(|_| DiscoveryServiceError::SessionStorePoisoned)
    }
}

/// Error raised by the discovery service.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryServiceError {
    #[error("discovery session '{0}' not found")]
    UnknownSession(SessionId),
    #[error("candidate '{0}' is not in the buddy directory")]
    UnknownCandidate(CandidateId),
    #[error("session store lock poisoned")]
    SessionStorePoisoned,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl DiscoveryServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DiscoveryServiceError::UnknownSession(_)
            | DiscoveryServiceError::UnknownCandidate(_) => StatusCode::NOT_FOUND,
            DiscoveryServiceError::Directory(_)
            | DiscoveryServiceError::Registry(_)
            | DiscoveryServiceError::SessionStorePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
