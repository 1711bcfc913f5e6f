//! The signed-in student's own profile: creation on first sign-in, partial updates, and tag edits.

pub mod domain;
pub mod router;
pub mod store;

pub use domain::{ProfileEdit, ProfileUpdate, UserProfile};
pub use router::profile_router;
pub use store::{ProfileError, ProfileStore};
