//! Domain entities served by the rental backend.
//!
//! Everything here is plain data: decoding rules live on the types
//! (serde attributes and a couple of custom deserializers) so the rest of
//! the crate can assume the invariants hold.

mod city;
mod id;
mod offer;
mod review;
mod user;

pub use city::{City, Location};
pub use id::OfferId;
pub use offer::{capitalize, Host, Offer, Person, Rating};
pub use review::{Review, ReviewAuthor, ReviewDraft, ReviewDraftError, COMMENT_MAX_CHARS, COMMENT_MIN_CHARS};
pub use user::{AuthorizationStatus, Credentials, CredentialsError, UserInfo};
