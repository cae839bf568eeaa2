//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;
pub mod mock_gateway;

use chrono::{TimeZone, Utc};
use six_cities::coordinator::IntentReceiver;
use six_cities::domain::{City, Host, Location, Offer, OfferId, Rating, Review, ReviewAuthor, UserInfo};
use six_cities::store::{Store, StoreIntent};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

pub use mock_gateway::{Reply, ScriptedGateway};

/// How long a test waits for a coordinator task before giving up.
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

// -- Fixtures -----------------------------------------------------------------

pub fn paris() -> City {
    City::new(1, "Paris", Location::new(48.85661, 2.351499, 13))
}

pub fn amsterdam() -> City {
    City::new(4, "Amsterdam", Location::new(52.37454, 4.897976, 13))
}

/// Listing-shaped offer: no detail-only fields.
pub fn listing_offer(id: &str, city: &City, price: u32, rating: f32) -> Offer {
    Offer {
        id: OfferId::new(id),
        title: format!("Offer {id}"),
        kind: "apartment".to_string(),
        price,
        rating: Rating::new(rating),
        location: city.location,
        city: Some(city.clone()),
        preview_image: Some(format!("img/{id}.jpg")),
        ..Offer::default()
    }
}

/// Full offer as the detail endpoint returns it.
pub fn detailed_offer(id: &str, city: &City) -> Offer {
    Offer {
        description: "A quiet cozy and picturesque place.".to_string(),
        bedrooms: Some(3),
        max_adults: Some(4),
        images: Some((1..=8).map(|n| format!("img/{id}-{n}.jpg")).collect()),
        goods: Some(vec!["Wi-Fi".to_string(), "Heating".to_string()]),
        host: Some(Host {
            name: "Angelina".to_string(),
            avatar_url: "img/avatar-angelina.jpg".to_string(),
            is_pro: true,
        }),
        ..listing_offer(id, city, 120, 4.8)
    }
}

pub fn review(id: &str, day: u32) -> Review {
    Review {
        id: id.to_string(),
        user: ReviewAuthor {
            name: format!("Guest {id}"),
            avatar_url: String::new(),
            is_pro: false,
        },
        rating: Rating::new(4.0),
        comment: "A lovely flat with a view of the canal and plenty of light.".to_string(),
        date: Utc
            .with_ymd_and_hms(2019, 5, day, 12, 0, 0)
            .single()
            .expect("valid fixture date"),
    }
}

pub fn user(email: &str) -> UserInfo {
    UserInfo {
        email: email.to_string(),
        avatar_url: "img/avatar.jpg".to_string(),
        token: Some("secret-token".to_string()),
        ..UserInfo::default()
    }
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Store helpers ------------------------------------------------------------

/// Receives `count` intents from the coordinator and dispatches them.
pub async fn settle(store: &mut Store, rx: &mut IntentReceiver, count: usize) {
    for _ in 0..count {
        let intent = next_intent(rx).await;
        store.dispatch(intent);
    }
}

pub async fn next_intent(rx: &mut IntentReceiver) -> StoreIntent {
    tokio::time::timeout(SETTLE_TIMEOUT, rx.recv())
        .await
        .expect("Timed out waiting for a store intent")
        .expect("Intent channel closed")
}

/// Dispatches whatever is already queued without waiting.
pub fn drain(store: &mut Store, rx: &mut IntentReceiver) -> usize {
    let mut applied = 0;
    while let Ok(intent) = rx.try_recv() {
        store.dispatch(intent);
        applied += 1;
    }
    applied
}

/// Polls `condition` until it holds or the timeout passes.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < SETTLE_TIMEOUT {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    false
}
