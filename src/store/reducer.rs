use tracing::debug;

use crate::domain::{AuthorizationStatus, Offer, OfferId};
use crate::mvi::Reducer;

use super::intent::{Payload, StoreIntent};
use super::slice::{Generation, Resource};
use super::state::EntityState;

/// Runs `$body` against the slice selected by `$resource`, binding the
/// taken slice to `$slice` and storing the result back.
macro_rules! on_slice {
    ($state:ident, $resource:expr, |$slice:ident| $body:expr) => {
        match $resource {
            Resource::Offer => {
                let $slice = std::mem::take(&mut $state.offer);
                $state.offer = $body;
            }
            Resource::Nearby => {
                let $slice = std::mem::take(&mut $state.nearby);
                $state.nearby = $body;
            }
            Resource::Reviews => {
                let $slice = std::mem::take(&mut $state.reviews);
                $state.reviews = $body;
            }
            Resource::Offers => {
                let $slice = std::mem::take(&mut $state.offers);
                $state.offers = $body;
            }
            Resource::User => {
                let $slice = std::mem::take(&mut $state.user);
                $state.user = $body;
            }
            Resource::Favorites => {
                let $slice = std::mem::take(&mut $state.favorites);
                $state.favorites = $body;
            }
        }
    };
}

pub struct StoreReducer;

impl Reducer for StoreReducer {
    type State = EntityState;
    type Intent = StoreIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            StoreIntent::SetStatus { resource, status } => {
                on_slice!(state, resource, |slice| slice.set_status(status));
            }

            StoreIntent::Begin {
                resource,
                generation,
            } => {
                on_slice!(state, resource, |slice| slice.begin(generation));
            }

            StoreIntent::SetData {
                generation,
                payload,
            } => {
                let resource = payload.resource();
                if !admits(&state, resource, generation) {
                    discard_stale(resource, generation);
                    return state;
                }
                match payload {
                    Payload::Offer(offer) => {
                        state.offer = std::mem::take(&mut state.offer).set_data(offer);
                    }
                    Payload::Nearby(offers) => {
                        state.nearby = std::mem::take(&mut state.nearby).set_data(offers);
                    }
                    Payload::Reviews(reviews) => {
                        state.reviews = std::mem::take(&mut state.reviews).set_data(reviews);
                    }
                    Payload::Offers(offers) => {
                        state.offers = std::mem::take(&mut state.offers).set_data(offers);
                    }
                    Payload::User(user) => {
                        state.user = std::mem::take(&mut state.user).set_data(user);
                        state.authorization = AuthorizationStatus::Authenticated;
                    }
                    Payload::Favorites(offers) => {
                        state.favorites = std::mem::take(&mut state.favorites).set_data(offers);
                    }
                }
            }

            StoreIntent::SetError {
                resource,
                generation,
                error,
            } => {
                if !admits(&state, resource, generation) {
                    discard_stale(resource, generation);
                    return state;
                }
                on_slice!(state, resource, |slice| slice.set_error(error));
                if resource == Resource::User {
                    state.authorization = AuthorizationStatus::Unauthenticated;
                }
            }

            StoreIntent::ResetOfferScreen => {
                state.offer = std::mem::take(&mut state.offer).reset();
                state.nearby = std::mem::take(&mut state.nearby).reset();
                state.reviews = std::mem::take(&mut state.reviews).reset();
                state.active_marker = None;
            }

            StoreIntent::SetActiveMarker(id) => {
                state.active_marker = id;
            }

            StoreIntent::SetAuthorization(status) => {
                state.authorization = status;
            }

            StoreIntent::FavoriteChanged(changed) => {
                state = apply_favorite(state, &changed);
            }

            StoreIntent::ReviewPosted { offer_id, review } => {
                let on_screen = state.offer.data().is_some_and(|offer| offer.id == offer_id);
                if !on_screen {
                    debug!(offer = %offer_id, "Discarding review posted for another offer");
                    return state;
                }
                let reviews = std::mem::take(&mut state.reviews);
                state.reviews = if reviews.data().is_some() {
                    reviews.patch(|reviews| {
                        let mut reviews = reviews.clone();
                        reviews.push(review);
                        Some(reviews)
                    })
                } else {
                    // The list never loaded; the accepted review is all we know.
                    reviews.set_data(vec![review])
                };
            }

            StoreIntent::ReviewRejected(message) => {
                state.notice = Some(message);
            }

            StoreIntent::SignedOut => {
                state.user = std::mem::take(&mut state.user).reset();
                state.favorites = std::mem::take(&mut state.favorites).reset();
                state.authorization = AuthorizationStatus::Unauthenticated;
                state.offer = std::mem::take(&mut state.offer).patch(|offer| {
                    offer.is_favorite.then(|| offer.with_favorite(false))
                });
                state.nearby = std::mem::take(&mut state.nearby).patch(clear_favorites);
                state.offers = std::mem::take(&mut state.offers).patch(clear_favorites);
            }

            StoreIntent::Notify(notice) => {
                state.notice = notice;
            }
        }
        state
    }
}

fn admits(state: &EntityState, resource: Resource, generation: Option<Generation>) -> bool {
    match resource {
        Resource::Offer => state.offer.admits(generation),
        Resource::Nearby => state.nearby.admits(generation),
        Resource::Reviews => state.reviews.admits(generation),
        Resource::Offers => state.offers.admits(generation),
        Resource::User => state.user.admits(generation),
        Resource::Favorites => state.favorites.admits(generation),
    }
}

fn discard_stale(resource: Resource, generation: Option<Generation>) {
    debug!(%resource, ?generation, "Discarding superseded completion");
}

fn apply_favorite(mut state: EntityState, changed: &Offer) -> EntityState {
    let flag = changed.is_favorite;
    let id = &changed.id;

    state.offer = std::mem::take(&mut state.offer).patch(|offer| {
        (offer.id == *id && offer.is_favorite != flag).then(|| offer.with_favorite(flag))
    });
    state.nearby = std::mem::take(&mut state.nearby).patch(|offers| set_flag(offers, id, flag));
    state.offers = std::mem::take(&mut state.offers).patch(|offers| set_flag(offers, id, flag));
    state.favorites = std::mem::take(&mut state.favorites).patch(|favorites| {
        let present = favorites.iter().any(|offer| offer.id == *id);
        match (flag, present) {
            (true, false) => {
                let mut favorites = favorites.clone();
                favorites.push(changed.clone());
                Some(favorites)
            }
            (false, true) => Some(
                favorites
                    .iter()
                    .filter(|offer| offer.id != *id)
                    .cloned()
                    .collect(),
            ),
            _ => None,
        }
    });
    state.user = std::mem::take(&mut state.user).patch(|user| {
        let ids = user.favorites.as_ref()?;
        let present = ids.contains(id);
        let ids: Vec<OfferId> = match (flag, present) {
            (true, false) => ids.iter().cloned().chain(std::iter::once(id.clone())).collect(),
            (false, true) => ids.iter().filter(|known| *known != id).cloned().collect(),
            _ => return None,
        };
        let mut user = user.clone();
        user.favorites = Some(ids);
        Some(user)
    });
    state
}

fn set_flag(offers: &Vec<Offer>, id: &OfferId, flag: bool) -> Option<Vec<Offer>> {
    let needs_change = offers
        .iter()
        .any(|offer| offer.id == *id && offer.is_favorite != flag);
    needs_change.then(|| {
        offers
            .iter()
            .map(|offer| {
                if offer.id == *id {
                    offer.with_favorite(flag)
                } else {
                    offer.clone()
                }
            })
            .collect()
    })
}

fn clear_favorites(offers: &Vec<Offer>) -> Option<Vec<Offer>> {
    offers.iter().any(|offer| offer.is_favorite).then(|| {
        offers
            .iter()
            .map(|offer| offer.with_favorite(false))
            .collect()
    })
}
