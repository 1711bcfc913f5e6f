use serde::{Deserialize, Serialize};

use crate::discovery::{AvailabilitySlot, Candidate, CandidateId, SessionUser, YearOfStudy};

/// Profile owned by the signed-in student. Its public part is what other students discover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: CandidateId,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
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

/// Partial profile. Fields left out keep their current value; the id can never change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub university: Option<String>,
    pub major: Option<String>,
    pub year_of_study: Option<YearOfStudy>,
    pub bio: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub availability: Option<Vec<AvailabilitySlot>>,
    pub location: Option<String>,
    pub learning_preferences: Option<Vec<String>>,
}

/// A single edit made from the profile form's tag and checkbox controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProfileEdit {
    AddSubject { subject: String },
    RemoveSubject { subject: String },
    ToggleAvailability { slot: AvailabilitySlot },
    AddPreference { preference: String },
    RemovePreference { preference: String },
}

impl UserProfile {
    /// Fresh profile for a first sign-in: identity only, every list empty.
    pub fn initialize(user: &SessionUser, email: Option<String>) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            email,
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

    pub fn merge(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            full_name,
            email,
            university,
            major,
            year_of_study,
            bio,
            subjects,
            availability,
            location,
            learning_preferences,
        } = update;

        if let Some(full_name) = full_name {
            self.full_name = full_name;
        }
        replace_if_some(&mut self.email, email);
        replace_if_some(&mut self.university, university);
        replace_if_some(&mut self.major, major);
        replace_if_some(&mut self.year_of_study, year_of_study);
        replace_if_some(&mut self.bio, bio);
        replace_if_some(&mut self.location, location);
        if let Some(subjects) = subjects {
            self.subjects = subjects;
        }
        if let Some(availability) = availability {
            self.availability = availability;
        }
        if let Some(preferences) = learning_preferences {
            self.learning_preferences = preferences;
        }
    }

    /// Returns `false` when nothing changed (blank input, duplicate tag, or tag not present).
    pub fn apply(&mut self, edit: ProfileEdit) -> bool {
        match edit {
            ProfileEdit::AddSubject { subject } => add_tag(&mut self.subjects, &subject),
            ProfileEdit::RemoveSubject { subject } => remove_tag(&mut self.subjects, &subject),
            ProfileEdit::ToggleAvailability { slot } => {
                match self.availability.iter().position(|existing| *existing == slot) {
                    Some(index) => {
                        self.availability.remove(index);
                    }
                    None => self.availability.push(slot),
                }
                true
            }
            ProfileEdit::AddPreference { preference } => {
                add_tag(&mut self.learning_preferences, &preference)
            }
            ProfileEdit::RemovePreference { preference } => {
                remove_tag(&mut self.learning_preferences, &preference)
            }
        }
    }

    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
        }
    }

    /// The profile as other students see it in discovery. The email stays private.
    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            university: self.university.clone(),
            major: self.major.clone(),
            year_of_study: self.year_of_study,
            bio: self.bio.clone(),
            subjects: self.subjects.clone(),
            availability: self.availability.clone(),
            location: self.location.clone(),
            learning_preferences: self.learning_preferences.clone(),
        }
    }
}

fn replace_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn add_tag(tags: &mut Vec<String>, raw: &str) -> bool {
    let tag = raw.trim();
    if tag.is_empty() || tags.iter().any(|existing| existing == tag) {
        return false;
    }
    tags.push(tag.to_string());
    true
}

fn remove_tag(tags: &mut Vec<String>, tag: &str) -> bool {
    let before = tags.len();
    tags.retain(|existing| existing != tag);
    tags.len() != before
}
