//! Scripted in-process `Gateway` for coordinator and app tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use six_cities::domain::{Credentials, Offer, OfferId, Review, ReviewDraft, UserInfo};
use six_cities::gateway::{Gateway, GatewayError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Canned answer for one gateway call.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    NotFound,
    Unauthorized,
    /// Answered with a 500.
    Fail,
}

impl<T> Reply<T> {
    fn into_result(self, path: &str) -> Result<T, GatewayError> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::NotFound => Err(GatewayError::NotFound {
                path: path.to_string(),
            }),
            Reply::Unauthorized => Err(GatewayError::Unauthorized {
                path: path.to_string(),
            }),
            Reply::Fail => Err(GatewayError::Status {
                status: 500,
                path: path.to_string(),
            }),
        }
    }
}

#[derive(Default)]
struct Script {
    offers: Option<Reply<Vec<Offer>>>,
    offer: HashMap<String, Reply<Offer>>,
    nearby: HashMap<String, Reply<Vec<Offer>>>,
    reviews: HashMap<String, Reply<Vec<Review>>>,
    user: Option<Reply<UserInfo>>,
    login: Option<Reply<UserInfo>>,
    favorites: Option<Reply<Vec<Offer>>>,
    set_favorite: Option<Reply<Offer>>,
    post_review: Option<Reply<Review>>,
}

/// Gateway whose answers are set up per call and whose calls can be held
/// back until a test releases them.
///
/// Call keys look like `offer:1`, `nearby:1`, `reviews:1`, `offers`,
/// `user`, `login`, `favorites`, `favorite:1:1`, `review:1`, `logout`.
/// Unscripted calls answer `NotFound`.
#[derive(Default)]
pub struct ScriptedGateway {
    script: Mutex<Script>,
    calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn offers(&self, reply: Reply<Vec<Offer>>) -> &Self {
        self.script.lock().offers = Some(reply);
        self
    }

    pub fn offer(&self, id: &str, reply: Reply<Offer>) -> &Self {
        self.script.lock().offer.insert(id.to_string(), reply);
        self
    }

    pub fn nearby(&self, id: &str, reply: Reply<Vec<Offer>>) -> &Self {
        self.script.lock().nearby.insert(id.to_string(), reply);
        self
    }

    pub fn reviews(&self, id: &str, reply: Reply<Vec<Review>>) -> &Self {
        self.script.lock().reviews.insert(id.to_string(), reply);
        self
    }

    pub fn user(&self, reply: Reply<UserInfo>) -> &Self {
        self.script.lock().user = Some(reply);
        self
    }

    pub fn login(&self, reply: Reply<UserInfo>) -> &Self {
        self.script.lock().login = Some(reply);
        self
    }

    pub fn favorites(&self, reply: Reply<Vec<Offer>>) -> &Self {
        self.script.lock().favorites = Some(reply);
        self
    }

    /// Overrides the default favorite answer (the scripted offer with the
    /// requested flag).
    pub fn set_favorite(&self, reply: Reply<Offer>) -> &Self {
        self.script.lock().set_favorite = Some(reply);
        self
    }

    pub fn post_review(&self, reply: Reply<Review>) -> &Self {
        self.script.lock().post_review = Some(reply);
        self
    }

    /// Calls with this key block until `release` is called.
    pub fn hold(&self, key: &str) {
        self.gates
            .lock()
            .insert(key.to_string(), Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, key: &str) {
        if let Some(gate) = self.gates.lock().get(key) {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, key: &str) -> usize {
        self.calls.lock().iter().filter(|call| *call == key).count()
    }

    async fn enter(&self, key: String) {
        self.calls.lock().push(key.clone());
        let gate = self.gates.lock().get(&key).cloned();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await;
        }
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn fetch_offers(&self) -> Result<Vec<Offer>, GatewayError> {
        self.enter("offers".to_string()).await;
        let reply = self.script.lock().offers.clone();
        reply.unwrap_or(Reply::NotFound).into_result("/offers")
    }

    async fn fetch_offer(&self, id: &OfferId) -> Result<Offer, GatewayError> {
        self.enter(format!("offer:{id}")).await;
        let reply = self.script.lock().offer.get(id.as_str()).cloned();
        reply
            .unwrap_or(Reply::NotFound)
            .into_result(&format!("/offers/{id}"))
    }

    async fn fetch_nearby(&self, id: &OfferId) -> Result<Vec<Offer>, GatewayError> {
        self.enter(format!("nearby:{id}")).await;
        let reply = self.script.lock().nearby.get(id.as_str()).cloned();
        reply
            .unwrap_or(Reply::NotFound)
            .into_result(&format!("/offers/{id}/nearby"))
    }

    async fn fetch_reviews(&self, id: &OfferId) -> Result<Vec<Review>, GatewayError> {
        self.enter(format!("reviews:{id}")).await;
        let reply = self.script.lock().reviews.get(id.as_str()).cloned();
        reply
            .unwrap_or(Reply::NotFound)
            .into_result(&format!("/comments/{id}"))
    }

    async fn fetch_user(&self) -> Result<UserInfo, GatewayError> {
        self.enter("user".to_string()).await;
        let reply = self.script.lock().user.clone();
        reply.unwrap_or(Reply::Unauthorized).into_result("/login")
    }

    async fn fetch_favorites(&self) -> Result<Vec<Offer>, GatewayError> {
        self.enter("favorites".to_string()).await;
        let reply = self.script.lock().favorites.clone();
        reply.unwrap_or(Reply::Unauthorized).into_result("/favorite")
    }

    async fn set_favorite(&self, id: &OfferId, favorite: bool) -> Result<Offer, GatewayError> {
        self.enter(format!("favorite:{id}:{}", u8::from(favorite)))
            .await;
        let path = format!("/favorite/{id}/{}", u8::from(favorite));
        let script = self.script.lock();
        if let Some(reply) = script.set_favorite.clone() {
            return reply.into_result(&path);
        }
        let known = script
            .offer
            .get(id.as_str())
            .cloned()
            .unwrap_or(Reply::NotFound);
        drop(script);
        known
            .into_result(&path)
            .map(|offer| offer.with_favorite(favorite))
    }

    async fn login(&self, _credentials: &Credentials) -> Result<UserInfo, GatewayError> {
        self.enter("login".to_string()).await;
        let reply = self.script.lock().login.clone();
        reply.unwrap_or(Reply::Fail).into_result("/login")
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        self.enter("logout".to_string()).await;
        Ok(())
    }

    async fn post_review(&self, id: &OfferId, _draft: &ReviewDraft) -> Result<Review, GatewayError> {
        self.enter(format!("review:{id}")).await;
        let reply = self.script.lock().post_review.clone();
        reply
            .unwrap_or(Reply::Fail)
            .into_result(&format!("/comments/{id}"))
    }
}
