use std::collections::BTreeSet;

use super::domain::{AvailabilitySlot, Candidate, DistanceBucket, YearOfStudy};

/// Query must already be lowercased by the caller.
pub(crate) fn matches_query(candidate: &Candidate, lowered_query: &str) -> bool {
    if lowered_query.is_empty() {
        return true;
    }

    let contains = |value: &str| value.to_lowercase().contains(lowered_query);

    contains(&candidate.full_name)
        || candidate.major.as_deref().is_some_and(contains)
        || candidate.subjects.iter().any(|subject| contains(subject))
}

pub(crate) fn matches_subjects(candidate: &Candidate, selected: &BTreeSet<String>) -> bool {
    selected.is_empty()
        || candidate
            .subjects
            .iter()
            .any(|subject| selected.contains(subject))
}

pub(crate) fn matches_availability(
    candidate: &Candidate,
    selected: &BTreeSet<AvailabilitySlot>,
) -> bool {
    selected.is_empty()
        || candidate
            .availability
            .iter()
            .any(|slot| selected.contains(slot))
}

pub(crate) fn matches_year(candidate: &Candidate, selected: Option<YearOfStudy>) -> bool {
    match selected {
        None => true,
        Some(year) => candidate.year_of_study == Some(year),
    }
}

/// Placeholder rule with no geographic meaning: keeps every `rank + 1`th position.
pub(crate) fn matches_distance(position: usize, selected: Option<DistanceBucket>) -> bool {
    match selected {
        None => true,
        Some(bucket) => position % (bucket.rank() + 1) == 0,
    }
}
