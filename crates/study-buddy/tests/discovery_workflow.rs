//! End-to-end discovery scenarios against the bundled sample roster, exercised through the
//! public service facade and HTTP router.

mod common {
    use std::sync::{Arc, Mutex};

    use study_buddy::connections::{Connection, ConnectionRegistry, RegistryError};
    use study_buddy::directory::StaticDirectory;
    use study_buddy::discovery::{BuddyDiscoveryService, CandidateId, SessionUser};

    #[derive(Default, Clone)]
    pub(super) struct MemoryRegistry {
        connections: Arc<Mutex<Vec<Connection>>>,
    }

    impl MemoryRegistry {
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

    pub(super) fn user() -> SessionUser {
        SessionUser {
            id: CandidateId::new("user-1"),
            full_name: "Jordan Student".to_string(),
        }
    }

    pub(super) fn sample_service() -> (
        Arc<BuddyDiscoveryService<StaticDirectory, MemoryRegistry>>,
        Arc<MemoryRegistry>,
    ) {
        let registry = Arc::new(MemoryRegistry::default());
        let service = BuddyDiscoveryService::new(
            Arc::new(StaticDirectory::sample()),
            registry.clone(),
        );
        (Arc::new(service), registry)
    }
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use serde_json::Value;
use study_buddy::directory::{BuddyDirectory, StaticDirectory};
use study_buddy::discovery::{
    apply_filters, discovery_router, AvailabilitySlot, CandidateId, CriteriaUpdate,
    DistanceBucket, FacetCatalog, FilterCriteria, YearOfStudy,
};
use tower::ServiceExt;

fn matched_ids(
    service: &study_buddy::discovery::BuddyDiscoveryService<StaticDirectory, MemoryRegistry>,
    session_id: &study_buddy::discovery::SessionId,
) -> Vec<String> {
    service
        .search(session_id)
        .expect("search succeeds")
        .matches
        .into_iter()
        .map(|m| m.candidate.id.0)
        .collect()
}

#[test]
fn sample_roster_search_scenarios() {
    let roster = StaticDirectory::sample().candidates().expect("roster");
    let ids = |criteria: &FilterCriteria| -> Vec<String> {
        apply_filters(&roster, criteria)
            .into_iter()
            .map(|candidate| candidate.id.0.clone())
            .collect()
    };

    assert_eq!(ids(&FilterCriteria::default().with_query("algo")), vec!["buddy-1"]);
    assert_eq!(
        ids(&FilterCriteria::default().with_query("bio")),
        vec!["buddy-2", "buddy-8"]
    );
    assert!(ids(&FilterCriteria::default().with_query("new york")).is_empty());
    assert_eq!(
        ids(&FilterCriteria::default().with_year(Some(YearOfStudy::Third))),
        vec!["buddy-1", "buddy-4", "buddy-7"]
    );
    assert_eq!(
        ids(&FilterCriteria::default().toggle_availability(AvailabilitySlot::WeekendMornings)),
        vec!["buddy-2", "buddy-6", "buddy-8"]
    );
    assert_eq!(
        ids(&FilterCriteria::default().with_distance(Some(DistanceBucket::TwentyFiveMiles))),
        vec!["buddy-1", "buddy-4", "buddy-7"]
    );
}

#[test]
fn sample_facets_cover_every_subject() {
    let roster = StaticDirectory::sample().candidates().expect("roster");
    let catalog = FacetCatalog::from_candidates(&roster);
    assert_eq!(catalog.subjects.len(), 36);
    assert_eq!(catalog.subjects.first().map(String::as_str), Some("Abstract Algebra"));
    let mut sorted = catalog.subjects.clone();
    sorted.sort();
    assert_eq!(sorted, catalog.subjects);
}

#[test]
fn browsing_session_filters_and_requests() {
    let (service, registry) = sample_service();
    let session_id = service.open_session(user()).expect("session opens");

    service
        .update_criteria(
            &session_id,
            CriteriaUpdate::ToggleAvailability {
                slot: AvailabilitySlot::WeekdayEvenings,
            },
        )
        .expect("update applies");
    service
        .update_criteria(
            &session_id,
            CriteriaUpdate::SelectYear {
                year: Some(YearOfStudy::Fourth),
            },
        )
        .expect("update applies");
    assert_eq!(matched_ids(&service, &session_id), vec!["buddy-3", "buddy-9"]);

    let outcome = service
        .send_request(&session_id, &CandidateId::new("buddy-9"))
        .expect("request sent");
    assert!(outcome.connection_created);
    assert_eq!(registry.snapshot()[0].subject, "Marketing");

    service
        .update_criteria(&session_id, CriteriaUpdate::Clear)
        .expect("clear applies");
    let results = service.search(&session_id).expect("search succeeds");
    assert_eq!(results.matches.len(), 9);
    let flagged: Vec<&str> = results
        .matches
        .iter()
        .filter(|m| m.request_sent)
        .map(|m| m.candidate.id.as_str())
        .collect();
    assert_eq!(flagged, vec!["buddy-9"]);
}

#[tokio::test]
async fn facets_route_serves_sample_catalog() {
    let (service, _) = sample_service();
    let response = discovery_router(service)
        .oneshot(
            Request::get("/api/v1/discovery/facets")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload["years"][4], Value::from("5+"));
    assert_eq!(payload["availability"][0], Value::from("Weekday mornings"));
}
