use std::sync::Arc;

use crate::domain::{City, Offer};
use crate::selectors::{self, SortOption};
use crate::store::{EntityState, RequestStatus};

use super::{MapPin, MapView, OfferCard};

#[derive(Debug, Clone, PartialEq)]
pub enum ListingBody {
    Loading,
    /// The listing request failed.
    Failed(String),
    /// Loaded, but nothing in this city.
    Empty,
    Cards(Vec<OfferCard>),
}

/// Main screen: city tabs, sort, cards and the city map.
#[derive(Debug, Clone, PartialEq)]
pub struct MainScreenView {
    pub cities: Vec<String>,
    pub active_city: String,
    pub sort: SortOption,
    pub headline: String,
    pub body: ListingBody,
    pub selected: Option<usize>,
    pub map: MapView,
}

impl MainScreenView {
    /// `offers` is the already filtered and sorted listing for `city`.
    pub fn reconcile(
        state: &EntityState,
        cities: &[City],
        city: &City,
        sort: SortOption,
        offers: &Arc<Vec<Offer>>,
        selected: Option<usize>,
    ) -> Self {
        let body = match selectors::offers_status(state) {
            RequestStatus::Idle | RequestStatus::Loading if state.offers.data().is_none() => {
                ListingBody::Loading
            }
            RequestStatus::Failed if state.offers.data().is_none() => ListingBody::Failed(
                state
                    .offers
                    .error()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "Offers could not be loaded".to_string()),
            ),
            _ if offers.is_empty() => ListingBody::Empty,
            _ => ListingBody::Cards(offers.iter().map(OfferCard::from_offer).collect()),
        };

        let headline = match &body {
            ListingBody::Cards(cards) => format!(
                "{} place{} to stay in {}",
                cards.len(),
                if cards.len() == 1 { "" } else { "s" },
                city.name
            ),
            _ => format!("No places to stay available in {}", city.name),
        };

        let active = selectors::active_marker_id(state);
        Self {
            cities: cities.iter().map(|c| c.name.clone()).collect(),
            active_city: city.name.clone(),
            sort,
            headline,
            selected: selected.filter(|index| *index < offers.len()),
            map: MapView {
                center: city.location,
                pins: pins(offers, |offer| Some(&offer.id) == active),
            },
            body,
        }
    }

    pub fn active_city_index(&self) -> Option<usize> {
        self.cities.iter().position(|name| *name == self.active_city)
    }
}

fn pins(offers: &[Offer], is_active: impl Fn(&Offer) -> bool) -> Vec<MapPin> {
    offers
        .iter()
        .map(|offer| MapPin {
            offer_id: offer.id.clone(),
            location: offer.location,
            active: is_active(offer),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, OfferId};
    use crate::selectors::CityOffers;
    use crate::store::{Payload, Store, StoreIntent};

    fn paris() -> City {
        City::new(1, "Paris", Location::new(48.85661, 2.351499, 13))
    }

    #[test]
    fn loading_until_listing_arrives() {
        let store = Store::new();
        let mut memo = CityOffers::new();
        let offers = memo.select(store.state(), "Paris", SortOption::Popular);
        let view = MainScreenView::reconcile(store.state(), &[paris()], &paris(), SortOption::Popular, &offers, None);
        assert_eq!(view.body, ListingBody::Loading);
    }

    #[test]
    fn empty_city_has_empty_state() {
        let mut store = Store::new();
        store.dispatch(StoreIntent::SetData {
            generation: None,
            payload: Payload::Offers(vec![Offer {
                id: OfferId::new("1"),
                city: Some(City::new(0, "Cologne", Location::default())),
                ..Offer::default()
            }]),
        });
        let mut memo = CityOffers::new();
        let offers = memo.select(store.state(), "Paris", SortOption::Popular);
        let view = MainScreenView::reconcile(store.state(), &[paris()], &paris(), SortOption::Popular, &offers, Some(0));
        assert_eq!(view.body, ListingBody::Empty);
        assert_eq!(view.headline, "No places to stay available in Paris");
        assert_eq!(view.selected, None);
        assert!(view.map.pins.is_empty());
    }
}
