use std::collections::BTreeSet;

use serde::Serialize;

use super::criteria::FilterCriteria;
use super::domain::{AvailabilitySlot, Candidate, DistanceBucket, YearOfStudy};
use super::predicates::{
    matches_availability, matches_distance, matches_query, matches_subjects, matches_year,
};

/// Return the candidates that pass every active predicate, in their original order.
///
/// Pure: neither input is modified and nothing is cached between calls.
pub fn apply_filters<'a>(
    candidates: &'a [Candidate],
    criteria: &FilterCriteria,
) -> Vec<&'a Candidate> {
    let lowered_query = criteria.query.to_lowercase();

    candidates
        .iter()
        .enumerate()
        .filter(|(position, candidate)| {
            matches_query(candidate, &lowered_query)
                && matches_subjects(candidate, &criteria.subjects)
                && matches_availability(candidate, &criteria.availability)
                && matches_year(candidate, criteria.year_of_study)
                && matches_distance(*position, criteria.distance)
        })
        .map(|(_, candidate)| candidate)
        .collect()
}

/// Options presented by the filter panel for a given roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetCatalog {
    pub subjects: Vec<String>,
    pub availability: Vec<AvailabilitySlot>,
    pub years: Vec<YearOfStudy>,
    pub distances: Vec<DistanceBucket>,
}

impl FacetCatalog {
    pub fn from_candidates(candidates: &[Candidate]) -> Self {
        let subjects: BTreeSet<&str> = candidates
            .iter()
            .flat_map(|candidate| candidate.subjects.iter().map(String::as_str))
            .collect();

        Self {
            subjects: subjects.into_iter().map(str::to_string).collect(),
            availability: AvailabilitySlot::ALL.to_vec(),
            years: YearOfStudy::ALL.to_vec(),
            distances: DistanceBucket::ALL.to_vec(),
        }
    }
}
