use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::CandidateId;

/// Session-local record of outbound connection requests.
///
/// Flags only ever move from "not requested" to "requested". The connection registry stays
/// authoritative; this is the shadow the display uses to disable the send control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestState {
    sent: BTreeMap<CandidateId, bool>,
}

impl RequestState {
    /// Mark a request as sent. Returns `true` when the flag was not already set.
    pub fn record_request_sent(&mut self, candidate_id: CandidateId) -> bool {
        let previous = self.sent.insert(candidate_id, true);
        previous != Some(true)
    }

    pub fn is_sent(&self, candidate_id: &CandidateId) -> bool {
        self.sent.get(candidate_id).copied().unwrap_or(false)
    }

    pub fn sent_ids(&self) -> impl Iterator<Item = &CandidateId> {
        self.sent
            .iter()
            .filter(|(_, sent)| **sent)
            .map(|(candidate_id, _)| candidate_id)
    }

    pub fn len(&self) -> usize {
        self.sent_ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_twice_is_a_no_op() {
        let mut state = RequestState::default();
        assert!(state.record_request_sent(CandidateId::new("buddy-1")));
        state.record_request_sent(CandidateId::new("buddy-2"));
        let snapshot = state.clone();

        assert!(!state.record_request_sent(CandidateId::new("buddy-1")));
        assert_eq!(state, snapshot);
        assert!(state.is_sent(&CandidateId::new("buddy-1")));
        assert!(state.is_sent(&CandidateId::new("buddy-2")));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn unknown_ids_are_not_sent() {
        let state = RequestState::default();
        assert!(!state.is_sent(&CandidateId::new("buddy-7")));
        assert!(state.is_empty());
    }
}
