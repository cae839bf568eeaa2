//! Offer screen reconciler.
//!
//! Maps the offer, nearby and reviews slices onto exactly one of
//! Loading, NotFound or Content. The offer slice alone decides which; the
//! secondary resources only shape sections inside Content.

use crate::domain::{AuthorizationStatus, City, Location, Offer, OfferId, Review};
use crate::selectors;
use crate::store::{EntityState, FetchError, RequestStatus};

use super::{MapPin, MapView, OfferCard, RatingBar};

pub const GALLERY_LIMIT: usize = 6;
pub const REVIEWS_LIMIT: usize = 10;
pub const NEARBY_LIMIT: usize = 3;

/// Static inputs the reconciler needs besides the store.
#[derive(Debug, Clone, Copy)]
pub struct ScreenEnv<'a> {
    pub cities: &'a [City],
    pub default_city: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OfferScreenView {
    Loading,
    NotFound,
    Content(Box<OfferContent>),
}

impl OfferScreenView {
    pub fn reconcile(route_id: Option<&OfferId>, state: &EntityState, env: &ScreenEnv<'_>) -> Self {
        let Some(route_id) = route_id else {
            return OfferScreenView::NotFound;
        };

        match (selectors::offer_status(state), selectors::current_offer(state)) {
            (RequestStatus::Failed, _) => OfferScreenView::NotFound,
            // Leftovers from another id are never shown.
            (_, Some(offer)) if offer.id != *route_id => OfferScreenView::Loading,
            (RequestStatus::Idle | RequestStatus::Loading, _) => OfferScreenView::Loading,
            (RequestStatus::Success, Some(offer)) => {
                OfferScreenView::Content(Box::new(OfferContent::build(offer, state, env)))
            }
            (RequestStatus::Success, None) => OfferScreenView::NotFound,
        }
    }

    pub fn content(&self) -> Option<&OfferContent> {
        match self {
            OfferScreenView::Content(content) => Some(content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteToggle {
    pub offer_id: OfferId,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostCard {
    pub name: String,
    pub avatar_url: String,
    pub is_pro: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    pub id: String,
    pub author: String,
    pub avatar_url: String,
    pub is_pro: bool,
    pub rating: RatingBar,
    pub comment: String,
    /// e.g. `MAY 2019`
    pub date_label: String,
    /// e.g. `2019-05-08`
    pub date_attr: String,
}

impl ReviewItem {
    fn from_review(review: &Review) -> Self {
        Self {
            id: review.id.clone(),
            author: review.user.name.clone(),
            avatar_url: review.user.avatar_url.clone(),
            is_pro: review.user.is_pro,
            rating: RatingBar::new(review.rating),
            comment: review.comment.clone(),
            date_label: review.date_label(),
            date_attr: review.date_attr(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewsSection {
    pub total: usize,
    /// Newest first.
    pub items: Vec<ReviewItem>,
    pub loading: bool,
    pub show_form: bool,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbySection {
    pub cards: Vec<OfferCard>,
    pub loading: bool,
    pub notice: Option<String>,
}

/// Everything the Content state renders. Optional sections are `None`
/// when the offer lacks the data; they are never rendered empty.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferContent {
    pub id: OfferId,
    pub gallery: Option<Vec<String>>,
    pub is_premium: bool,
    pub title: String,
    pub favorite: FavoriteToggle,
    pub rating: RatingBar,
    pub kind_label: String,
    pub bedrooms: Option<u32>,
    pub max_adults: Option<u32>,
    pub price: u32,
    pub amenities: Option<Vec<String>>,
    pub host: Option<HostCard>,
    pub description: String,
    pub reviews: ReviewsSection,
    pub map: MapView,
    pub nearby: NearbySection,
}

impl OfferContent {
    fn build(offer: &Offer, state: &EntityState, env: &ScreenEnv<'_>) -> Self {
        let nearby: Vec<&Offer> = selectors::nearby_offers(state)
            .iter()
            .filter(|other| other.id != offer.id)
            .take(NEARBY_LIMIT)
            .collect();

        Self {
            id: offer.id.clone(),
            gallery: offer
                .gallery()
                .map(|images| images.iter().take(GALLERY_LIMIT).cloned().collect()),
            is_premium: offer.is_premium,
            title: offer.title.clone(),
            favorite: FavoriteToggle {
                offer_id: offer.id.clone(),
                active: offer.is_favorite,
            },
            rating: RatingBar::new(offer.rating),
            kind_label: offer.kind_label(),
            bedrooms: offer.bedrooms,
            max_adults: offer.max_adults,
            price: offer.price,
            amenities: offer.amenities().map(<[String]>::to_vec),
            host: offer.host.as_ref().map(|host| HostCard {
                name: host.name.clone(),
                avatar_url: host.avatar_url.clone(),
                is_pro: host.is_pro,
            }),
            description: offer.description.clone(),
            reviews: reviews_section(state),
            map: map_view(offer, &nearby, state, env),
            nearby: NearbySection {
                cards: nearby.iter().map(|o| OfferCard::from_offer(o)).collect(),
                loading: selectors::nearby_status(state) == RequestStatus::Loading,
                notice: secondary_notice("Nearby places", state.nearby.error()),
            },
        }
    }

    pub fn features(&self) -> Vec<String> {
        let mut features = vec![self.kind_label.clone()];
        if let Some(bedrooms) = self.bedrooms {
            features.push(format!("{bedrooms} Bedrooms"));
        }
        if let Some(adults) = self.max_adults {
            features.push(format!("Max {adults} adults"));
        }
        features
    }
}

fn reviews_section(state: &EntityState) -> ReviewsSection {
    let all = selectors::reviews(state);
    let mut newest: Vec<&Review> = all.iter().collect();
    newest.sort_by(|a, b| b.date.cmp(&a.date));

    ReviewsSection {
        total: all.len(),
        items: newest
            .into_iter()
            .take(REVIEWS_LIMIT)
            .map(ReviewItem::from_review)
            .collect(),
        loading: selectors::reviews_status(state) == RequestStatus::Loading,
        show_form: selectors::authorization(state) == AuthorizationStatus::Authenticated,
        notice: secondary_notice("Reviews", state.reviews.error()),
    }
}

fn secondary_notice(section: &str, error: Option<&FetchError>) -> Option<String> {
    error.map(|error| match error {
        FetchError::NotFound => format!("{section} are not available for this offer"),
        _ => format!("{section} could not be loaded"),
    })
}

fn map_view(offer: &Offer, nearby: &[&Offer], state: &EntityState, env: &ScreenEnv<'_>) -> MapView {
    let active = selectors::active_offer_for_map(state)
        .map(|listed| &listed.id)
        .unwrap_or(&offer.id);

    let pins = std::iter::once(offer)
        .chain(nearby.iter().copied())
        .map(|pinned| MapPin {
            offer_id: pinned.id.clone(),
            location: pinned.location,
            active: pinned.id == *active,
        })
        .collect();

    MapView {
        center: map_center(offer, env),
        pins,
    }
}

/// The offer's own city anchor, then the configured one by name, then the
/// default city, then the offer's coordinates.
fn map_center(offer: &Offer, env: &ScreenEnv<'_>) -> Location {
    if let Some(city) = &offer.city {
        return City::find(env.cities, &city.name)
            .map(|configured| configured.location)
            .unwrap_or(city.location);
    }
    City::find(env.cities, env.default_city)
        .map(|city| city.location)
        .unwrap_or(offer.location)
}
