use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{AvailabilitySlot, DistanceBucket, YearOfStudy};

/// Active filter constraints. Every field has an "unset" form that imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub subjects: BTreeSet<String>,
    #[serde(default)]
    pub availability: BTreeSet<AvailabilitySlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_study: Option<YearOfStudy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<DistanceBucket>,
}

/// Add `value` when absent, remove it when present. The input set is left untouched.
pub fn toggle_set_member<T>(current: &BTreeSet<T>, value: T) -> BTreeSet<T>
where
    T: Ord + Clone,
{
    let mut next = current.clone();
    if !next.remove(&value) {
        next.insert(value);
    }
    next
}

/// Criteria with every field unset.
pub fn clear_filters() -> FilterCriteria {
    FilterCriteria::default()
}

impl FilterCriteria {
    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self
        }
    }

    pub fn toggle_subject(self, subject: impl Into<String>) -> Self {
        let subjects = toggle_set_member(&self.subjects, subject.into());
        Self { subjects, ..self }
    }

    pub fn toggle_availability(self, slot: AvailabilitySlot) -> Self {
        let availability = toggle_set_member(&self.availability, slot);
        Self {
            availability,
            ..self
        }
    }

    pub fn with_year(self, year_of_study: Option<YearOfStudy>) -> Self {
        Self {
            year_of_study,
            ..self
        }
    }

    pub fn with_distance(self, distance: Option<DistanceBucket>) -> Self {
        Self { distance, ..self }
    }

    /// Number of facet selections shown on the filter badge. The free-text query is not a facet.
    pub fn active_filter_count(&self) -> usize {
        self.subjects.len()
            + self.availability.len()
            + usize::from(self.year_of_study.is_some())
            + usize::from(self.distance.is_some())
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }

    pub fn is_unconstrained(&self) -> bool {
        self.query.is_empty() && !self.has_active_filters()
    }
}

/// A single user interaction with the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CriteriaUpdate {
    SetQuery { query: String },
    ToggleSubject { subject: String },
    ToggleAvailability { slot: AvailabilitySlot },
    SelectYear { year: Option<YearOfStudy> },
    SelectDistance { distance: Option<DistanceBucket> },
    Clear,
}

impl CriteriaUpdate {
    /// Produce the next criteria value; `current` is consumed, never edited in place.
    pub fn apply(self, current: FilterCriteria) -> FilterCriteria {
        match self {
            CriteriaUpdate::SetQuery { query } => current.with_query(query),
            CriteriaUpdate::ToggleSubject { subject } => current.toggle_subject(subject),
            CriteriaUpdate::ToggleAvailability { slot } => current.toggle_availability(slot),
            CriteriaUpdate::SelectYear { year } => current.with_year(year),
            CriteriaUpdate::SelectDistance { distance } => current.with_distance(distance),
            CriteriaUpdate::Clear => clear_filters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_self_inverse() {
        let start: BTreeSet<String> = ["Ecology".to_string(), "Poetry".to_string()].into();
        let once = toggle_set_member(&start, "Topology".to_string());
        assert!(once.contains("Topology"));
        let twice = toggle_set_member(&once, "Topology".to_string());
        assert_eq!(twice, start);

        let removed = toggle_set_member(&start, "Poetry".to_string());
        assert!(!removed.contains("Poetry"));
        assert_eq!(toggle_set_member(&removed, "Poetry".to_string()), start);
    }

    #[test]
    fn toggle_leaves_input_untouched() {
        let start: BTreeSet<AvailabilitySlot> = BTreeSet::new();
        let next = toggle_set_member(&start, AvailabilitySlot::WeekdayEvenings);
        assert!(start.is_empty());
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn clear_resets_every_field() {
        let busy = FilterCriteria::default()
            .with_query("bio")
            .toggle_subject("Ecology")
            .toggle_availability(AvailabilitySlot::WeekendMornings)
            .with_year(Some(YearOfStudy::Graduate))
            .with_distance(Some(DistanceBucket::RemoteOnly));
        assert_eq!(busy.active_filter_count(), 4);
        assert!(!busy.is_unconstrained());

        let cleared = CriteriaUpdate::Clear.apply(busy);
        assert_eq!(cleared, FilterCriteria::default());
        assert_eq!(clear_filters(), FilterCriteria::default());
    }

    #[test]
    fn query_does_not_count_as_facet() {
        let criteria = FilterCriteria::default().with_query("algo");
        assert_eq!(criteria.active_filter_count(), 0);
        assert!(!criteria.has_active_filters());
        assert!(!criteria.is_unconstrained());
    }

    #[test]
    fn updates_deserialize_from_tagged_json() {
        let update: CriteriaUpdate =
            serde_json::from_str(r#"{"action":"toggle_availability","slot":"Weekday evenings"}"#)
                .expect("tagged update parses");
        assert_eq!(
            update,
            CriteriaUpdate::ToggleAvailability {
                slot: AvailabilitySlot::WeekdayEvenings
            }
        );

        let update: CriteriaUpdate =
            serde_json::from_str(r#"{"action":"select_year","year":null}"#).expect("parses");
        assert_eq!(update, CriteriaUpdate::SelectYear { year: None });
    }
}
