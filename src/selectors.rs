//! Pure derivations over `EntityState`.
//!
//! Selectors borrow from the store, so a result is pointer-equal across
//! calls for as long as its slice is untouched. Derivations that allocate
//! go through `CityOffers`, which caches on the source `Arc`.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::{AuthorizationStatus, Offer, OfferId, Review, UserInfo};
use crate::store::{EntityState, RequestStatus};

pub fn current_offer(state: &EntityState) -> Option<&Offer> {
    state.offer.data()
}

pub fn offer_status(state: &EntityState) -> RequestStatus {
    state.offer.status()
}

/// Nearby offers; empty until loaded.
pub fn nearby_offers(state: &EntityState) -> &[Offer] {
    state.nearby.data().map(Vec::as_slice).unwrap_or_default()
}

pub fn nearby_status(state: &EntityState) -> RequestStatus {
    state.nearby.status()
}

pub fn reviews(state: &EntityState) -> &[Review] {
    state.reviews.data().map(Vec::as_slice).unwrap_or_default()
}

pub fn reviews_status(state: &EntityState) -> RequestStatus {
    state.reviews.status()
}

/// Listing for the main screen, all cities.
pub fn offers(state: &EntityState) -> &[Offer] {
    state.offers.data().map(Vec::as_slice).unwrap_or_default()
}

pub fn offers_status(state: &EntityState) -> RequestStatus {
    state.offers.status()
}

pub fn favorites(state: &EntityState) -> &[Offer] {
    state.favorites.data().map(Vec::as_slice).unwrap_or_default()
}

pub fn active_marker_id(state: &EntityState) -> Option<&OfferId> {
    state.active_marker.as_ref()
}

pub fn authorization(state: &EntityState) -> AuthorizationStatus {
    state.authorization
}

/// Signed-in user, only while authorization says so.
pub fn user(state: &EntityState) -> Option<&UserInfo> {
    if state.authorization.is_authenticated() {
        state.user.data()
    } else {
        None
    }
}

/// Count from the independently fetched favorites list.
pub fn favorite_count(state: &EntityState) -> Option<usize> {
    match state.favorites.status() {
        RequestStatus::Success => state.favorites.data().map(Vec::len),
        _ => None,
    }
}

/// Count from the favorites embedded in the user payload.
pub fn favorite_count_from_user(state: &EntityState) -> Option<usize> {
    user(state)
        .and_then(|user| user.favorites.as_ref())
        .map(Vec::len)
}

/// Fetched list when available, else the user payload, else zero.
pub fn live_favorite_count(state: &EntityState) -> usize {
    favorite_count(state)
        .or_else(|| favorite_count_from_user(state))
        .unwrap_or(0)
}

/// First listed offer whose id matches the active marker. `None` is not an
/// error: the map just has no highlighted pin.
pub fn active_offer_for_map(state: &EntityState) -> Option<&Offer> {
    let marker = state.active_marker.as_ref()?;
    offers(state).iter().find(|offer| &offer.id == marker)
}

pub fn offers_in_city<'a>(state: &'a EntityState, city: &'a str) -> impl Iterator<Item = &'a Offer> + 'a {
    offers(state)
        .iter()
        .filter(move |offer| offer.city_name() == Some(city))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Popular,
    PriceLowToHigh,
    PriceHighToLow,
    TopRated,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Popular,
        SortOption::PriceLowToHigh,
        SortOption::PriceHighToLow,
        SortOption::TopRated,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortOption::Popular => "Popular",
            SortOption::PriceLowToHigh => "Price: low to high",
            SortOption::PriceHighToLow => "Price: high to low",
            SortOption::TopRated => "Top rated first",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Stable sort; `Popular` keeps server order.
    pub fn apply(self, offers: &mut [Offer]) {
        match self {
            SortOption::Popular => {}
            SortOption::PriceLowToHigh => offers.sort_by_key(|offer| offer.price),
            SortOption::PriceHighToLow => offers.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOption::TopRated => offers.sort_by(|a, b| {
                b.rating
                    .value()
                    .partial_cmp(&a.rating.value())
                    .unwrap_or(Ordering::Equal)
            }),
        }
    }
}

pub fn sorted_offers<'a>(offers: impl IntoIterator<Item = &'a Offer>, sort: SortOption) -> Vec<Offer> {
    let mut offers: Vec<Offer> = offers.into_iter().cloned().collect();
    sort.apply(&mut offers);
    offers
}

/// Memo for the city-filtered, sorted listing.
///
/// Hands back the same `Arc` while the listing slice, city and sort are
/// unchanged, so callers can compare with `Arc::ptr_eq`.
#[derive(Debug, Default)]
pub struct CityOffers {
    source: Option<Arc<Vec<Offer>>>,
    city: String,
    sort: SortOption,
    cached: Arc<Vec<Offer>>,
}

impl CityOffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, state: &EntityState, city: &str, sort: SortOption) -> Arc<Vec<Offer>> {
        let source = state.offers.shared();
        let fresh = match (&self.source, source) {
            (Some(cached), Some(current)) => Arc::ptr_eq(cached, current),
            (None, None) => true,
            _ => false,
        };
        if fresh && self.city == city && self.sort == sort {
            return Arc::clone(&self.cached);
        }

        self.cached = Arc::new(sorted_offers(offers_in_city(state, city), sort));
        self.source = source.cloned();
        self.city = city.to_string();
        self.sort = sort;
        Arc::clone(&self.cached)
    }
}
