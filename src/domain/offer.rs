use serde::{Deserialize, Serialize};

use super::city::{City, Location};
use super::id::OfferId;

/// Star rating on a 0..=5 scale with a 0.1 step.
///
/// Out-of-range or non-finite values are clamped on construction, so every
/// `Rating` in the system satisfies the invariant.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Rating(f32);

impl Rating {
    pub const MAX: f32 = 5.0;

    pub fn new(value: f32) -> Self {
        if !value.is_finite() {
            return Self(0.0);
        }
        let clamped = value.clamp(0.0, Self::MAX);
        Self((clamped * 10.0).round() / 10.0)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Width of the filled part of a five-star bar, in percent.
    ///
    /// Five stars map to 100%, so the width is `rating * 20`.
    pub fn star_width_percent(self) -> f32 {
        (self.0 * 20.0).clamp(0.0, 100.0)
    }
}

impl From<f32> for Rating {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Rating> for f32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A user as embedded in offers (host) and reviews (author).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub is_pro: bool,
}

pub type Host = Person;

/// A rental offer.
///
/// Listing endpoints return a reduced shape, so every detail-only field is
/// optional. A missing field means "omit that section", never "render it
/// empty".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: u32,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub max_adults: Option<u32>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub goods: Option<Vec<String>>,
    #[serde(default)]
    pub host: Option<Host>,
    pub location: Location,
    #[serde(default)]
    pub city: Option<City>,
    #[serde(default)]
    pub preview_image: Option<String>,
}

impl Offer {
    /// Images to show in the gallery, or `None` when there is nothing to show.
    pub fn gallery(&self) -> Option<&[String]> {
        match self.images.as_deref() {
            Some(images) if !images.is_empty() => Some(images),
            _ => None,
        }
    }

    /// Amenities to list, or `None` when absent or empty.
    pub fn amenities(&self) -> Option<&[String]> {
        match self.goods.as_deref() {
            Some(goods) if !goods.is_empty() => Some(goods),
            _ => None,
        }
    }

    pub fn city_name(&self) -> Option<&str> {
        self.city.as_ref().map(|city| city.name.as_str())
    }

    /// Offer type with its first letter upper-cased, e.g. `Apartment`.
    pub fn kind_label(&self) -> String {
        capitalize(&self.kind)
    }

    /// Same offer with the favorite flag replaced.
    pub fn with_favorite(&self, is_favorite: bool) -> Self {
        Self {
            is_favorite,
            ..self.clone()
        }
    }
}

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"{
        "id": "42",
        "title": "Canal View Prinsengracht",
        "description": "A quiet cozy and picturesque place.",
        "type": "apartment",
        "price": 120,
        "rating": 4,
        "isPremium": true,
        "isFavorite": false,
        "bedrooms": 3,
        "maxAdults": 4,
        "images": ["img/1.jpg", "img/2.jpg"],
        "goods": ["Heating", "Kitchen"],
        "host": {"name": "Angelina", "avatarUrl": "img/avatar.jpg", "isPro": true},
        "location": {"latitude": 52.35514938496378, "longitude": 4.673877537499948, "zoom": 8},
        "city": {"name": "Amsterdam", "location": {"latitude": 52.370216, "longitude": 4.895168, "zoom": 10}}
    }"#;

    const CARD: &str = r#"{
        "id": 7,
        "title": "Nice, cozy, warm big bed apartment",
        "type": "room",
        "price": 80,
        "rating": 3.7,
        "location": {"latitude": 48.8, "longitude": 2.3}
    }"#;

    #[test]
    fn decodes_detail_offer() {
        let offer: Offer = serde_json::from_str(DETAIL).unwrap();
        assert_eq!(offer.id, OfferId::new("42"));
        assert_eq!(offer.kind, "apartment");
        assert_eq!(offer.bedrooms, Some(3));
        assert_eq!(offer.host.as_ref().map(|h| h.is_pro), Some(true));
        assert_eq!(offer.city_name(), Some("Amsterdam"));
        assert_eq!(offer.gallery().map(<[String]>::len), Some(2));
    }

    #[test]
    fn decodes_card_without_detail_fields() {
        let offer: Offer = serde_json::from_str(CARD).unwrap();
        assert_eq!(offer.id.as_str(), "7");
        assert!(offer.images.is_none());
        assert!(offer.goods.is_none());
        assert!(offer.host.is_none());
        assert_eq!(offer.bedrooms, None);
        assert_eq!(offer.location.zoom, 13);
    }

    #[test]
    fn empty_collections_count_as_absent() {
        let mut offer: Offer = serde_json::from_str(CARD).unwrap();
        offer.images = Some(Vec::new());
        offer.goods = Some(Vec::new());
        assert!(offer.gallery().is_none());
        assert!(offer.amenities().is_none());
    }

    #[test]
    fn rating_is_clamped_and_stepped() {
        assert_eq!(Rating::new(7.5).value(), 5.0);
        assert_eq!(Rating::new(-1.0).value(), 0.0);
        assert_eq!(Rating::new(f32::NAN).value(), 0.0);
        assert!((Rating::new(3.14).value() - 3.1).abs() < 1e-6);
    }

    #[test]
    fn star_width_is_twenty_percent_per_star() {
        for tenths in 0..=50u8 {
            let rating = Rating::new(f32::from(tenths) / 10.0);
            let expected = f32::from(tenths) * 2.0;
            assert!((rating.star_width_percent() - expected).abs() < 1e-3);
            assert!((0.0..=100.0).contains(&rating.star_width_percent()));
        }
        assert_eq!(Rating::new(4.0).star_width_percent(), 80.0);
    }

    #[test]
    fn out_of_range_rating_decodes_clamped() {
        let offer: Offer =
            serde_json::from_str(&CARD.replace("\"rating\": 3.7", "\"rating\": 9")).unwrap();
        assert_eq!(offer.rating.value(), 5.0);
        assert_eq!(offer.rating.star_width_percent(), 100.0);
    }

    #[test]
    fn capitalize_handles_empty_and_words() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("house"), "House");
        assert_eq!(capitalize("Hotel"), "Hotel");
    }
}
