//! Buddy directory: the source of candidate profiles handed to the filter engine.

mod import;
mod sample;

use std::io::Read;
use std::path::Path;

use crate::discovery::{Candidate, CandidateId};

pub use import::parse_roster;

/// Supplies the full candidate roster. The filter engine never pages or caches it.
pub trait BuddyDirectory: Send + Sync {
    fn candidates(&self) -> Result<Vec<Candidate>, DirectoryError>;

    fn find(&self, id: &CandidateId) -> Result<Option<Candidate>, DirectoryError> {
        Ok(self
            .candidates()?
            .into_iter()
            .find(|candidate| &candidate.id == id))
    }
}

/// Error enumeration for roster loading failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read buddy roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid roster JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate candidate id '{0}' in roster")]
    DuplicateId(CandidateId),
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Fixed, in-memory roster loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    candidates: Vec<Candidate>,
}

impl StaticDirectory {
    pub fn new(candidates: Vec<Candidate>) -> Result<Self, DirectoryError> {
        let mut seen = std::collections::HashSet::new();
        for candidate in &candidates {
            if !seen.insert(&candidate.id) {
                return Err(DirectoryError::DuplicateId(candidate.id.clone()));
            }
        }
        Ok(Self { candidates })
    }

    /// The demo roster of nine students shipped with the application.
    pub fn sample() -> Self {
        Self {
            candidates: sample::roster(),
        }
    }

    /// Load a roster export, choosing the format from the extension: `.json` holds a candidate
    /// array, anything else is read as CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_path(path)
        } else {
            Self::from_csv_path(path)
        }
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        Self::new(parse_roster(reader)?)
    }

    /// Load a JSON array of candidate profiles.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        let candidates: Vec<Candidate> = serde_json::from_reader(reader)?;
        Self::new(candidates)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl BuddyDirectory for StaticDirectory {
    fn candidates(&self) -> Result<Vec<Candidate>, DirectoryError> {
        Ok(self.candidates.clone())
    }
}
