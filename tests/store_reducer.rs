//! Entity store transitions driven through `Store::dispatch`.

mod common;

use common::{detailed_offer, listing_offer, paris, review, user};
use six_cities::domain::{AuthorizationStatus, OfferId};
use six_cities::selectors;
use six_cities::store::{FetchError, Payload, RequestStatus, Resource, Store, StoreIntent};

fn begin(store: &mut Store, resource: Resource, generation: u64) {
    store.dispatch(StoreIntent::Begin {
        resource,
        generation,
    });
}

#[test]
fn stale_generation_never_overwrites_newer_request() {
    let mut store = Store::new();
    begin(&mut store, Resource::Offer, 1);
    begin(&mut store, Resource::Offer, 2);

    store.dispatch(StoreIntent::SetData {
        generation: Some(2),
        payload: Payload::Offer(detailed_offer("43", &paris())),
    });
    let changed = store.dispatch(StoreIntent::SetData {
        generation: Some(1),
        payload: Payload::Offer(detailed_offer("42", &paris())),
    });

    assert!(!changed);
    assert_eq!(
        selectors::current_offer(store.state()).map(|offer| offer.id.as_str()),
        Some("43")
    );
}

#[test]
fn stale_error_is_ignored_while_newer_request_loads() {
    let mut store = Store::new();
    begin(&mut store, Resource::Reviews, 1);
    begin(&mut store, Resource::Reviews, 2);

    store.dispatch(StoreIntent::SetError {
        resource: Resource::Reviews,
        generation: Some(1),
        error: FetchError::transient("timeout"),
    });
    assert_eq!(selectors::reviews_status(store.state()), RequestStatus::Loading);
    assert!(store.state().reviews.error().is_none());
}

#[test]
fn untagged_writes_always_apply() {
    let mut store = Store::new();
    begin(&mut store, Resource::Offers, 7);
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Offers(vec![listing_offer("1", &paris(), 100, 4.0)]),
    });
    assert_eq!(selectors::offers_status(store.state()), RequestStatus::Success);
    assert_eq!(store.state().offers.in_flight(), None);
}

#[test]
fn user_failure_means_unauthenticated() {
    let mut store = Store::new();
    begin(&mut store, Resource::User, 1);
    store.dispatch(StoreIntent::SetError {
        resource: Resource::User,
        generation: Some(1),
        error: FetchError::Unauthorized,
    });
    assert_eq!(
        selectors::authorization(store.state()),
        AuthorizationStatus::Unauthenticated
    );
}

#[test]
fn reset_offer_screen_clears_only_its_slices() {
    let mut store = Store::new();
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Offer(detailed_offer("42", &paris())),
    });
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Reviews(vec![review("1", 3)]),
    });
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Offers(vec![listing_offer("1", &paris(), 100, 4.0)]),
    });
    store.dispatch(StoreIntent::SetActiveMarker(Some(OfferId::new("1"))));

    store.dispatch(StoreIntent::ResetOfferScreen);

    assert!(selectors::current_offer(store.state()).is_none());
    assert!(selectors::reviews(store.state()).is_empty());
    assert_eq!(selectors::offer_status(store.state()), RequestStatus::Idle);
    assert!(selectors::active_marker_id(store.state()).is_none());
    assert_eq!(selectors::offers(store.state()).len(), 1);
}

#[test]
fn favorite_change_reaches_every_copy() {
    let mut store = Store::new();
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Offer(detailed_offer("1", &paris())),
    });
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Nearby(vec![listing_offer("1", &paris(), 100, 4.0)]),
    });
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Favorites(Vec::new()),
    });
    let mut profile = user("guest@example.com");
    profile.favorites = Some(Vec::new());
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::User(profile),
    });

    let changed = detailed_offer("1", &paris()).with_favorite(true);
    store.dispatch(StoreIntent::FavoriteChanged(changed.clone()));

    let state = store.state();
    assert!(selectors::current_offer(state).is_some_and(|offer| offer.is_favorite));
    assert!(selectors::nearby_offers(state)[0].is_favorite);
    assert_eq!(selectors::favorite_count(state), Some(1));
    assert_eq!(selectors::favorite_count_from_user(state), Some(1));

    store.dispatch(StoreIntent::FavoriteChanged(changed.with_favorite(false)));
    assert_eq!(selectors::favorite_count(store.state()), Some(0));
    assert_eq!(selectors::favorite_count_from_user(store.state()), Some(0));
}

#[test]
fn repeated_favorite_change_is_not_a_change() {
    let mut store = Store::new();
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Offers(vec![listing_offer("1", &paris(), 100, 4.0).with_favorite(true)]),
    });
    let revision = store.revision();
    let changed = store.dispatch(StoreIntent::FavoriteChanged(
        listing_offer("1", &paris(), 100, 4.0).with_favorite(true),
    ));
    assert!(!changed);
    assert_eq!(store.revision(), revision);
}

#[test]
fn signing_out_clears_session_and_flags() {
    let mut store = Store::new();
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::User(user("guest@example.com")),
    });
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Offers(vec![listing_offer("1", &paris(), 100, 4.0).with_favorite(true)]),
    });
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Favorites(vec![listing_offer("1", &paris(), 100, 4.0).with_favorite(true)]),
    });

    store.dispatch(StoreIntent::SignedOut);

    let state = store.state();
    assert_eq!(selectors::authorization(state), AuthorizationStatus::Unauthenticated);
    assert!(selectors::user(state).is_none());
    assert!(selectors::favorites(state).is_empty());
    assert!(selectors::offers(state).iter().all(|offer| !offer.is_favorite));
}

#[test]
fn posted_review_appends_and_notice_is_replaced() {
    let mut store = Store::new();
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Offer(detailed_offer("42", &paris())),
    });
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Reviews(vec![review("1", 3)]),
    });
    store.dispatch(StoreIntent::ReviewRejected("Could not post review".to_string()));
    assert_eq!(store.state().notice.as_deref(), Some("Could not post review"));

    store.dispatch(StoreIntent::ReviewPosted {
        offer_id: OfferId::new("42"),
        review: review("2", 4),
    });
    store.dispatch(StoreIntent::Notify(None));
    assert_eq!(selectors::reviews(store.state()).len(), 2);
    assert!(store.state().notice.is_none());
}

#[test]
fn review_for_another_offer_is_dropped() {
    let mut store = Store::new();
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Offer(detailed_offer("43", &paris())),
    });
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Reviews(vec![review("1", 3)]),
    });

    let changed = store.dispatch(StoreIntent::ReviewPosted {
        offer_id: OfferId::new("42"),
        review: review("2", 4),
    });

    assert!(!changed);
    let ids: Vec<&str> = selectors::reviews(store.state())
        .iter()
        .map(|review| review.id.as_str())
        .collect();
    assert_eq!(ids, ["1"]);
}

#[test]
fn posted_review_survives_failed_review_list() {
    let mut store = Store::new();
    store.dispatch(StoreIntent::SetData {
        generation: None,
        payload: Payload::Offer(detailed_offer("42", &paris())),
    });
    begin(&mut store, Resource::Reviews, 1);
    store.dispatch(StoreIntent::SetError {
        resource: Resource::Reviews,
        generation: Some(1),
        error: FetchError::transient("boom"),
    });

    store.dispatch(StoreIntent::ReviewPosted {
        offer_id: OfferId::new("42"),
        review: review("9", 4),
    });

    assert_eq!(selectors::reviews_status(store.state()), RequestStatus::Success);
    assert_eq!(selectors::reviews(store.state()).len(), 1);
}
