use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use axum::http::StatusCode;
use tracing::{debug, info};

use super::domain::{ProfileEdit, ProfileUpdate, UserProfile};
use crate::discovery::{CandidateId, SessionUser};

/// In-memory profiles keyed by student id.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: Mutex<HashMap<CandidateId, UserProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign-in hook. Returns the stored profile refreshed with the sign-in identity, or a new
    /// empty profile. The flag is `true` when the profile was created.
    pub fn open(
        &self,
        user: &SessionUser,
        email: Option<String>,
    ) -> Result<(UserProfile, bool), ProfileError> {
        let mut profiles = self.lock_profiles()?;
        if let Some(existing) = profiles.get_mut(&user.id) {
            existing.full_name = user.full_name.clone();
            if email.is_some() {
                existing.email = email;
            }
            return Ok((existing.clone(), false));
        }

        let profile = UserProfile::initialize(user, email);
        profiles.insert(user.id.clone(), profile.clone());
        info!(user = %user.id, "profile created");
        Ok((profile, true))
    }

    pub fn get(&self, id: &CandidateId) -> Result<UserProfile, ProfileError> {
        self.lock_profiles()?
            .get(id)
            .cloned()
            .ok_or_else(|| ProfileError::UnknownProfile(id.clone()))
    }

    pub fn update(
        &self,
        id: &CandidateId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ProfileError> {
        self.modify(id, |profile| {
            profile.merge(update);
            true
        })
    }

    pub fn edit(&self, id: &CandidateId, edit: ProfileEdit) -> Result<UserProfile, ProfileError> {
        debug!(user = %id, ?edit, "profile edit");
        self.modify(id, |profile| profile.apply(edit))
    }

    fn modify<F>(&self, id: &CandidateId, change: F) -> Result<UserProfile, ProfileError>
    where
        F: FnOnce(&mut UserProfile) -> bool,
    {
        let mut profiles = self.lock_profiles()?;
        let profile = profiles
            .get_mut(id)
            .ok_or_else(|| ProfileError::UnknownProfile(id.clone()))?;
        if change(profile) {
            info!(user = %id, "profile saved");
        }
        Ok(profile.clone())
    }

    fn lock_profiles(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<CandidateId, UserProfile>>, ProfileError> {
        self.profiles
            .lock()
            .map_err(|_| ProfileError::StorePoisoned)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("no profile for '{0}'")]
    UnknownProfile(CandidateId),
    #[error("profile store lock poisoned")]
    StorePoisoned,
}

impl ProfileError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProfileError::UnknownProfile(_) => StatusCode::NOT_FOUND,
            ProfileError::StorePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn casey(full_name: &str) -> SessionUser {
        SessionUser {
            id: CandidateId::new("user-1"),
            full_name: full_name.to_string(),
        }
    }

    #[test]
    fn reopening_keeps_stored_fields_and_refreshes_identity() {
        let store = ProfileStore::new();
        let (_, created) = store
            .open(&casey("Casey Student"), Some("casey@example.edu".to_string()))
            .expect("open");
        assert!(created);
        store
            .edit(
                &CandidateId::new("user-1"),
                ProfileEdit::AddSubject {
                    subject: "Genetics".to_string(),
                },
            )
            .expect("edit");

        let (profile, created) = store.open(&casey("Casey S. Student"), None).expect("reopen");
        assert!(!created);
        assert_eq!(profile.full_name, "Casey S. Student");
        assert_eq!(profile.email.as_deref(), Some("casey@example.edu"));
        assert_eq!(profile.subjects, vec!["Genetics"]);
    }

    #[test]
    fn unknown_profiles_are_not_found() {
        let store = ProfileStore::new();
        let err = store
            .update(&CandidateId::new("user-9"), ProfileUpdate::default())
            .expect_err("no profile yet");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(store.get(&CandidateId::new("user-9")).is_err());
    }
}
