use crate::domain::{AuthorizationStatus, Offer, OfferId, Review, UserInfo};
use crate::mvi::Intent;

use super::slice::{FetchError, Generation, RequestStatus, Resource};

/// Decoded result of a successful fetch, tagged by resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Offer(Offer),
    Nearby(Vec<Offer>),
    Reviews(Vec<Review>),
    Offers(Vec<Offer>),
    User(UserInfo),
    Favorites(Vec<Offer>),
}

impl Payload {
    pub fn resource(&self) -> Resource {
        match self {
            Payload::Offer(_) => Resource::Offer,
            Payload::Nearby(_) => Resource::Nearby,
            Payload::Reviews(_) => Resource::Reviews,
            Payload::Offers(_) => Resource::Offers,
            Payload::User(_) => Resource::User,
            Payload::Favorites(_) => Resource::Favorites,
        }
    }
}

/// Every way the entity store can change.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreIntent {
    /// Replace a slice's status tag and nothing else.
    SetStatus {
        resource: Resource,
        status: RequestStatus,
    },

    /// A tracked request started: Loading, and only `generation` may settle it.
    Begin {
        resource: Resource,
        generation: Generation,
    },

    /// Replace data (status becomes Success). `None` generation writes
    /// unconditionally.
    SetData {
        generation: Option<Generation>,
        payload: Payload,
    },

    /// Mark failed and keep whatever data was there.
    SetError {
        resource: Resource,
        generation: Option<Generation>,
        error: FetchError,
    },

    /// Offer screen entered with a new id or left: clear its slices.
    ResetOfferScreen,

    SetActiveMarker(Option<OfferId>),

    SetAuthorization(AuthorizationStatus),

    /// Server confirmed a favorite flag change for this offer.
    FavoriteChanged(Offer),

    /// Server accepted a new review for `offer_id`. Ignored unless that
    /// offer is the one on screen.
    ReviewPosted { offer_id: OfferId, review: Review },

    /// Posting a review failed; the message goes to the status line.
    ReviewRejected(String),

    SignedOut,

    /// Short message for the status line; `None` clears it.
    Notify(Option<String>),
}

impl Intent for StoreIntent {}
