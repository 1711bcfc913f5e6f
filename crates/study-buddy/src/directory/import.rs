use std::io::Read;

use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::discovery::{AvailabilitySlot, Candidate, CandidateId, YearOfStudy};

const LIST_SEPARATOR: char = ';';

/// Parse a roster export. List columns use `;` between entries.
///
/// Unknown year or availability labels are dropped with a warning rather than failing the import.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<Candidate>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut candidates = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        candidates.push(row.into_candidate());
    }

    Ok(candidates)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Full Name")]
    full_name: String,
    #[serde(rename = "University", default, deserialize_with = "empty_string_as_none")]
    university: Option<String>,
    #[serde(rename = "Major", default, deserialize_with = "empty_string_as_none")]
    major: Option<String>,
    #[serde(
        rename = "Year of Study",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    year_of_study: Option<String>,
    #[serde(rename = "Bio", default, deserialize_with = "empty_string_as_none")]
    bio: Option<String>,
    #[serde(rename = "Subjects", default)]
    subjects: String,
    #[serde(rename = "Availability", default)]
    availability: String,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(rename = "Learning Preferences", default)]
    learning_preferences: String,
}

impl RosterRow {
    fn into_candidate(self) -> Candidate {
        let year_of_study = self.year_of_study.as_deref().and_then(|raw| {
            let parsed = YearOfStudy::parse(raw);
            if parsed.is_none() {
                warn!(candidate = %self.id, value = raw, "ignoring unknown year of study");
            }
            parsed
        });

        let availability = split_list(&self.availability)
            .into_iter()
            .filter_map(|raw| {
                let parsed = AvailabilitySlot::parse(&raw);
                if parsed.is_none() {
                    warn!(candidate = %self.id, value = %raw, "ignoring unknown availability slot");
                }
                parsed
            })
            .collect();

        Candidate {
            id: CandidateId(self.id),
            full_name: self.full_name,
            university: self.university,
            major: self.major,
            year_of_study,
            bio: self.bio,
            subjects: split_list(&self.subjects),
            availability,
            location: self.location,
            learning_preferences: split_list(&self.learning_preferences),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ID,Full Name,University,Major,Year of Study,Bio,Subjects,Availability,Location,Learning Preferences\n";

    #[test]
    fn parses_list_columns() {
        let csv = format!(
            "{HEADER}buddy-1,Alex Johnson,Stanford University,Computer Science,3,,Algorithms; Machine Learning,Weekday evenings;Weekend afternoons,\"Palo Alto, CA\",Visual learning\n"
        );
        let candidates = parse_roster(csv.as_bytes()).expect("roster parses");
        assert_eq!(candidates.len(), 1);
        let alex = &candidates[0];
        assert_eq!(alex.id.as_str(), "buddy-1");
        assert_eq!(alex.year_of_study, Some(YearOfStudy::Third));
        assert_eq!(alex.subjects, vec!["Algorithms", "Machine Learning"]);
        assert_eq!(
            alex.availability,
            vec![
                AvailabilitySlot::WeekdayEvenings,
                AvailabilitySlot::WeekendAfternoons
            ]
        );
        assert_eq!(alex.location.as_deref(), Some("Palo Alto, CA"));
        assert!(alex.bio.is_none());
    }

    #[test]
    fn unknown_labels_are_dropped() {
        let csv = format!("{HEADER}buddy-2,Sam Doe,,,Sophomore,,,Lunchtime;weekend mornings,,\n");
        let candidates = parse_roster(csv.as_bytes()).expect("roster parses");
        let sam = &candidates[0];
        assert!(sam.year_of_study.is_none());
        assert_eq!(sam.availability, vec![AvailabilitySlot::WeekendMornings]);
        assert!(sam.subjects.is_empty());
        assert!(sam.major.is_none());
    }

    #[test]
    fn missing_required_column_fails() {
        let csv = "ID,University\nbuddy-3,MIT\n";
        assert!(parse_roster(csv.as_bytes()).is_err());
    }
}
