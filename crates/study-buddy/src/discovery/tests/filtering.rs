use super::common::*;

use crate::discovery::domain::{AvailabilitySlot, DistanceBucket, YearOfStudy};
use crate::discovery::{apply_filters, clear_filters, Candidate, CriteriaUpdate, FilterCriteria};

fn is_ordered_subsequence(filtered: &[&Candidate], source: &[Candidate]) -> bool {
    let mut remaining = source.iter();
    filtered
        .iter()
        .all(|candidate| remaining.any(|original| original == *candidate))
}

#[test]
fn query_matches_subject_substring() {
    let candidates = vec![alex(), sarah()];
    let criteria = FilterCriteria::default().with_query("algo");
    assert_eq!(ids(&apply_filters(&candidates, &criteria)), vec!["b1"]);
}

#[test]
fn subject_selection_matches_exact_tag() {
    let candidates = vec![alex(), sarah()];
    let criteria = FilterCriteria::default().toggle_subject("Biology");
    assert_eq!(ids(&apply_filters(&candidates, &criteria)), vec!["b2"]);
}

#[test]
fn empty_criteria_is_identity() {
    let candidates = five_candidates();
    let filtered = apply_filters(&candidates, &FilterCriteria::default());
    assert_eq!(filtered.len(), candidates.len());
    assert!(filtered
        .iter()
        .zip(candidates.iter())
        .all(|(kept, original)| *kept == original));
}

#[test]
fn query_is_case_insensitive_across_name_and_major() {
    let candidates = five_candidates();
    let by_name = FilterCriteria::default().with_query("WILSON");
    assert_eq!(ids(&apply_filters(&candidates, &by_name)), vec!["b3"]);

    let by_major = FilterCriteria::default().with_query("physics");
    assert_eq!(ids(&apply_filters(&candidates, &by_major)), vec!["b4"]);
}

#[test]
fn facets_combine_conjunctively() {
    let candidates = five_candidates();
    let criteria = FilterCriteria::default()
        .toggle_subject("Algorithms")
        .toggle_availability(AvailabilitySlot::WeekdayEvenings);
    assert_eq!(ids(&apply_filters(&candidates, &criteria)), vec!["b1", "b3"]);

    let narrowed = criteria.with_year(Some(YearOfStudy::FifthPlus));
    assert_eq!(ids(&apply_filters(&candidates, &narrowed)), vec!["b3"]);

    let contradictory = narrowed.with_query("biology");
    assert!(apply_filters(&candidates, &contradictory).is_empty());
}

#[test]
fn subject_selection_is_a_union_within_the_facet() {
    let candidates = five_candidates();
    let criteria = FilterCriteria::default()
        .toggle_subject("Biology")
        .toggle_subject("Quantum Mechanics");
    assert_eq!(ids(&apply_filters(&candidates, &criteria)), vec!["b2", "b4"]);
}

#[test]
fn graduate_and_fifth_plus_are_distinct_years() {
    let candidates = five_candidates();
    let graduate = FilterCriteria::default().with_year(Some(YearOfStudy::Graduate));
    assert_eq!(ids(&apply_filters(&candidates, &graduate)), vec!["b4"]);
    let fifth = FilterCriteria::default().with_year(Some(YearOfStudy::FifthPlus));
    assert_eq!(ids(&apply_filters(&candidates, &fifth)), vec!["b3"]);
}

#[test]
fn distance_bucket_keeps_every_rank_plus_one_position() {
    let candidates = five_candidates();
    let criteria =
        FilterCriteria::default().with_distance(Some(DistanceBucket::TwentyFiveMiles));
    assert_eq!(ids(&apply_filters(&candidates, &criteria)), vec!["b1", "b4"]);

    let remote = FilterCriteria::default().with_distance(Some(DistanceBucket::RemoteOnly));
    assert_eq!(ids(&apply_filters(&candidates, &remote)), vec!["b1"]);

    let nearest = FilterCriteria::default().with_distance(Some(DistanceBucket::FiveMiles));
    assert_eq!(apply_filters(&candidates, &nearest).len(), 5);
}

#[test]
fn distance_positions_come_from_the_input_list() {
    let candidates = five_candidates();
    // b3 and b4 sit at input positions 2 and 3; only position 3 is divisible by 3.
    let criteria = FilterCriteria::default()
        .toggle_subject("Topology")
        .toggle_subject("Quantum Mechanics")
        .with_distance(Some(DistanceBucket::TwentyFiveMiles));
    assert_eq!(ids(&apply_filters(&candidates, &criteria)), vec!["b4"]);
}

#[test]
fn results_are_ordered_subsequences_without_duplicates() {
    let candidates = five_candidates();
    let criteria_sets = vec![
        FilterCriteria::default(),
        FilterCriteria::default().with_query("a"),
        FilterCriteria::default().toggle_availability(AvailabilitySlot::WeekendMornings),
        FilterCriteria::default().with_distance(Some(DistanceBucket::TenMiles)),
        FilterCriteria::default()
            .toggle_subject("Algorithms")
            .with_distance(Some(DistanceBucket::FiftyPlusMiles)),
    ];

    for criteria in criteria_sets {
        let filtered = apply_filters(&candidates, &criteria);
        assert!(is_ordered_subsequence(&filtered, &candidates));
        let mut seen = std::collections::HashSet::new();
        assert!(filtered.iter().all(|candidate| seen.insert(&candidate.id)));
    }
}

#[test]
fn reapplying_without_distance_is_idempotent() {
    let candidates = five_candidates();
    let criteria = FilterCriteria::default()
        .with_query("o")
        .toggle_availability(AvailabilitySlot::WeekdayEvenings)
        .toggle_availability(AvailabilitySlot::WeekendMornings);

    let once: Vec<_> = apply_filters(&candidates, &criteria)
        .into_iter()
        .cloned()
        .collect();
    let twice: Vec<_> = apply_filters(&once, &criteria)
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(once, twice);
}

#[test]
fn filtering_does_not_mutate_criteria() {
    let candidates = five_candidates();
    let criteria = FilterCriteria::default()
        .toggle_subject("Biology")
        .with_year(Some(YearOfStudy::Second));
    let before = criteria.clone();
    let _ = apply_filters(&candidates, &criteria);
    assert_eq!(criteria, before);
}

#[test]
fn clear_after_any_sequence_returns_default() {
    let updates = vec![
        CriteriaUpdate::SetQuery {
            query: "chem".to_string(),
        },
        CriteriaUpdate::ToggleSubject {
            subject: "Biology".to_string(),
        },
        CriteriaUpdate::SelectDistance {
            distance: Some(DistanceBucket::TenMiles),
        },
        CriteriaUpdate::SelectYear {
            year: Some(YearOfStudy::First),
        },
    ];
    let criteria = updates
        .into_iter()
        .fold(FilterCriteria::default(), |current, update| {
            update.apply(current)
        });
    assert_eq!(criteria.active_filter_count(), 3);
    assert_eq!(CriteriaUpdate::Clear.apply(criteria), clear_filters());
}
