//! Buddy discovery: search, faceted filtering, and session-local connection requests.

pub mod criteria;
pub mod domain;
pub mod engine;
pub(crate) mod predicates;
pub mod requests;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use criteria::{clear_filters, toggle_set_member, CriteriaUpdate, FilterCriteria};
pub use domain::{
    AvailabilitySlot, Candidate, CandidateId, DistanceBucket, SessionUser, YearOfStudy,
};
pub use engine::{apply_filters, FacetCatalog};
pub use requests::RequestState;
pub use router::discovery_router;
pub use service::{
    BuddyDiscoveryService, DiscoveryServiceError, RequestOutcome, SearchResults, SessionId,
};
pub use session::{CandidateMatch, DiscoverySession};
