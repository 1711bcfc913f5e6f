use serde::Serialize;

use super::criteria::{CriteriaUpdate, FilterCriteria};
use super::domain::{Candidate, CandidateId, SessionUser};
use super::engine::apply_filters;
use super::requests::RequestState;

/// Per-user browsing state: the filter panel plus the request shadow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySession {
    user: SessionUser,
    criteria: FilterCriteria,
    requests: RequestState,
}

impl DiscoverySession {
    pub fn new(user: SessionUser) -> Self {
        Self {
            user,
            criteria: FilterCriteria::default(),
            requests: RequestState::default(),
        }
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn requests(&self) -> &RequestState {
        &self.requests
    }

    /// Replace the criteria with the result of `update`. Request flags are never touched.
    pub fn update(&mut self, update: CriteriaUpdate) -> &FilterCriteria {
        let current = std::mem::take(&mut self.criteria);
        self.criteria = update.apply(current);
        &self.criteria
    }

    pub fn record_request_sent(&mut self, candidate_id: CandidateId) -> bool {
        self.requests.record_request_sent(candidate_id)
    }

    /// Filter `candidates` with the current criteria. The browsing user is removed from the
    /// roster before filtering, so positions count only the buddies that can be shown.
    pub fn matches(&self, candidates: &[Candidate]) -> Vec<CandidateMatch> {
        let roster: Vec<Candidate> = candidates
            .iter()
            .filter(|candidate| candidate.id != self.user.id)
            .cloned()
            .collect();

        apply_filters(&roster, &self.criteria)
            .into_iter()
            .map(|candidate| CandidateMatch {
                request_sent: self.requests.is_sent(&candidate.id),
                candidate: candidate.clone(),
            })
            .collect()
    }
}

/// A filtered candidate annotated for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMatch {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub request_sent: bool,
}
