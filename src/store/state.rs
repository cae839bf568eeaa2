use crate::domain::{AuthorizationStatus, Offer, OfferId, Review, UserInfo};
use crate::mvi::UiState;

use super::slice::{Resource, Slice};

/// Normalized client-side copy of server data.
///
/// Fields are readable by anyone holding a `&EntityState`; writes go
/// through `StoreReducer` only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityState {
    pub offer: Slice<Offer>,
    pub nearby: Slice<Vec<Offer>>,
    pub reviews: Slice<Vec<Review>>,
    pub offers: Slice<Vec<Offer>>,
    pub user: Slice<UserInfo>,
    pub favorites: Slice<Vec<Offer>>,
    pub authorization: AuthorizationStatus,
    /// Offer highlighted on the map; scoped to the current screen.
    pub active_marker: Option<OfferId>,
    pub notice: Option<String>,
}

impl UiState for EntityState {}

impl EntityState {
    /// Whether `self` is the same state as `other` without walking slice data.
    pub fn same_as(&self, other: &Self) -> bool {
        self.offer.same_as(&other.offer)
            && self.nearby.same_as(&other.nearby)
            && self.reviews.same_as(&other.reviews)
            && self.offers.same_as(&other.offers)
            && self.user.same_as(&other.user)
            && self.favorites.same_as(&other.favorites)
            && self.authorization == other.authorization
            && self.active_marker == other.active_marker
            && self.notice == other.notice
    }

    /// Status of any slice, by resource.
    pub fn status_of(&self, resource: Resource) -> super::RequestStatus {
        match resource {
            Resource::Offer => self.offer.status(),
            Resource::Nearby => self.nearby.status(),
            Resource::Reviews => self.reviews.status(),
            Resource::Offers => self.offers.status(),
            Resource::User => self.user.status(),
            Resource::Favorites => self.favorites.status(),
        }
    }
}
