use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for buddy profiles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A prospective study partner as published by the buddy directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_study: Option<YearOfStudy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub learning_preferences: Vec<String>,
}

impl Candidate {
    /// Bare profile with only the mandatory identity fields populated.
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: CandidateId::new(id),
            full_name: full_name.into(),
            university: None,
            major: None,
            year_of_study: None,
            bio: None,
            subjects: Vec::new(),
            availability: Vec::new(),
            location: None,
            learning_preferences: Vec::new(),
        }
    }

    /// Subject used when a connection needs a single headline topic.
    pub fn primary_subject(&self) -> Option<&str> {
        self.subjects.first().map(String::as_str)
    }
}

/// Year of study. `5+` and `Graduate` are distinct labels, never numeric years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum YearOfStudy {
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "4")]
    Fourth,
    #[serde(rename = "5+")]
    FifthPlus,
    #[serde(rename = "Graduate")]
    Graduate,
}

impl YearOfStudy {
    pub const ALL: [YearOfStudy; 6] = [
        YearOfStudy::First,
        YearOfStudy::Second,
        YearOfStudy::Third,
        YearOfStudy::Fourth,
        YearOfStudy::FifthPlus,
        YearOfStudy::Graduate,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            YearOfStudy::First => "1",
            YearOfStudy::Second => "2",
            YearOfStudy::Third => "3",
            YearOfStudy::Fourth => "4",
            YearOfStudy::FifthPlus => "5+",
            YearOfStudy::Graduate => "Graduate",
        }
    }

    /// Case-insensitive label match. `5+` and `Graduate` are literals, never numbers.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|year| year.label().eq_ignore_ascii_case(trimmed))
    }
}

/// Weekly availability slots offered by the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AvailabilitySlot {
    #[serde(rename = "Weekday mornings")]
    WeekdayMornings,
    #[serde(rename = "Weekday afternoons")]
    WeekdayAfternoons,
    #[serde(rename = "Weekday evenings")]
    WeekdayEvenings,
    #[serde(rename = "Weekend mornings")]
    WeekendMornings,
    #[serde(rename = "Weekend afternoons")]
    WeekendAfternoons,
    #[serde(rename = "Weekend evenings")]
    WeekendEvenings,
}

impl AvailabilitySlot {
    pub const ALL: [AvailabilitySlot; 6] = [
        AvailabilitySlot::WeekdayMornings,
        AvailabilitySlot::WeekdayAfternoons,
        AvailabilitySlot::WeekdayEvenings,
        AvailabilitySlot::WeekendMornings,
        AvailabilitySlot::WeekendAfternoons,
        AvailabilitySlot::WeekendEvenings,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            AvailabilitySlot::WeekdayMornings => "Weekday mornings",
            AvailabilitySlot::WeekdayAfternoons => "Weekday afternoons",
            AvailabilitySlot::WeekdayEvenings => "Weekday evenings",
            AvailabilitySlot::WeekendMornings => "Weekend mornings",
            AvailabilitySlot::WeekendAfternoons => "Weekend afternoons",
            AvailabilitySlot::WeekendEvenings => "Weekend evenings",
        }
    }

    /// Case-insensitive label match so hand-edited rosters still import.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|slot| slot.label().eq_ignore_ascii_case(trimmed))
    }
}

/// Distance buckets offered by the filter panel, in rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DistanceBucket {
    #[serde(rename = "5 miles")]
    FiveMiles,
    #[serde(rename = "10 miles")]
    TenMiles,
    #[serde(rename = "25 miles")]
    TwentyFiveMiles,
    #[serde(rename = "50+ miles")]
    FiftyPlusMiles,
    #[serde(rename = "Remote only")]
    RemoteOnly,
}

impl DistanceBucket {
    pub const ALL: [DistanceBucket; 5] = [
        DistanceBucket::FiveMiles,
        DistanceBucket::TenMiles,
        DistanceBucket::TwentyFiveMiles,
        DistanceBucket::FiftyPlusMiles,
        DistanceBucket::RemoteOnly,
    ];

    /// Zero-based position in [`DistanceBucket::ALL`].
    pub const fn rank(self) -> usize {
        match self {
            DistanceBucket::FiveMiles => 0,
            DistanceBucket::TenMiles => 1,
            DistanceBucket::TwentyFiveMiles => 2,
            DistanceBucket::FiftyPlusMiles => 3,
            DistanceBucket::RemoteOnly => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DistanceBucket::FiveMiles => "5 miles",
            DistanceBucket::TenMiles => "10 miles",
            DistanceBucket::TwentyFiveMiles => "25 miles",
            DistanceBucket::FiftyPlusMiles => "50+ miles",
            DistanceBucket::RemoteOnly => "Remote only",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.label().eq_ignore_ascii_case(trimmed))
    }
}

/// Identity of the student browsing the directory, passed in rather than read from globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: CandidateId,
    pub full_name: String,
}
