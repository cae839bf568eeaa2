//! Remote data gateway: the only code that talks to the backend.
//!
//! The coordinator depends on the `Gateway` trait, so tests can swap the
//! HTTP implementation for a scripted one.

mod error;
mod http;

pub use error::GatewayError;
pub use http::{HttpGateway, TOKEN_HEADER};

use async_trait::async_trait;

use crate::domain::{Credentials, Offer, OfferId, Review, ReviewDraft, UserInfo};

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_offers(&self) -> Result<Vec<Offer>, GatewayError>;

    async fn fetch_offer(&self, id: &OfferId) -> Result<Offer, GatewayError>;

    async fn fetch_nearby(&self, id: &OfferId) -> Result<Vec<Offer>, GatewayError>;

    async fn fetch_reviews(&self, id: &OfferId) -> Result<Vec<Review>, GatewayError>;

    /// Current session's user, or `Unauthorized` when signed out.
    async fn fetch_user(&self) -> Result<UserInfo, GatewayError>;

    async fn fetch_favorites(&self) -> Result<Vec<Offer>, GatewayError>;

    /// Returns the offer as the server stored it.
    async fn set_favorite(&self, id: &OfferId, favorite: bool) -> Result<Offer, GatewayError>;

    /// Signs in and keeps the returned token for subsequent calls.
    async fn login(&self, credentials: &Credentials) -> Result<UserInfo, GatewayError>;

    /// Ends the session and forgets the token.
    async fn logout(&self) -> Result<(), GatewayError>;

    async fn post_review(&self, id: &OfferId, draft: &ReviewDraft) -> Result<Review, GatewayError>;
}
