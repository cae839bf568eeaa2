//! View models for each screen.
//!
//! Every screen is reconciled from `&EntityState` into a plain value that
//! the renderer draws. The values own their data, so tests can assert on
//! them without a terminal.

pub mod favorites;
pub mod main;
pub mod offer;

use crate::domain::{Location, Offer, OfferId, Rating};

/// Star bar: `width_percent` is how much of five stars is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingBar {
    pub value: f32,
    pub width_percent: f32,
}

impl RatingBar {
    pub fn new(rating: Rating) -> Self {
        Self {
            value: rating.value(),
            width_percent: rating.star_width_percent(),
        }
    }

    /// Filled cells out of `cells`, rounded to the nearest cell.
    pub fn filled_cells(&self, cells: u16) -> u16 {
        ((self.width_percent / 100.0) * f32::from(cells)).round() as u16
    }
}

/// Compact card used by listings, nearby offers and favorites.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferCard {
    pub id: OfferId,
    pub title: String,
    pub kind_label: String,
    pub price: u32,
    pub rating: RatingBar,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub preview_image: Option<String>,
}

impl OfferCard {
    pub fn from_offer(offer: &Offer) -> Self {
        Self {
            id: offer.id.clone(),
            title: offer.title.clone(),
            kind_label: offer.kind_label(),
            price: offer.price,
            rating: RatingBar::new(offer.rating),
            is_premium: offer.is_premium,
            is_favorite: offer.is_favorite,
            preview_image: offer.preview_image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub offer_id: OfferId,
    pub location: Location,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Location,
    pub pins: Vec<MapPin>,
}

impl MapView {
    pub fn active_pin(&self) -> Option<&MapPin> {
        self.pins.iter().find(|pin| pin.active)
    }
}
