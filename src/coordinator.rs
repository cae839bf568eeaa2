//! Async action coordinator: bridges the gateway and the entity store.
//!
//! Each fetch gets a fresh generation. `Begin` is applied to the store
//! synchronously, the gateway call runs on its own tokio task, and the
//! settled result comes back as a `StoreIntent` over a channel that the
//! event loop drains. A newer fetch for the same resource aborts the older
//! task, and the store rejects any completion whose generation is no
//! longer in flight, so the latest request always wins.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::domain::{AuthorizationStatus, Credentials, OfferId, ReviewDraft};
use crate::gateway::{Gateway, GatewayError};
use crate::store::{FetchError, Generation, Payload, Resource, Store, StoreIntent};

pub type IntentSender = mpsc::UnboundedSender<StoreIntent>;
pub type IntentReceiver = mpsc::UnboundedReceiver<StoreIntent>;

pub fn intent_channel() -> (IntentSender, IntentReceiver) {
    mpsc::unbounded_channel()
}

/// A fetch the coordinator knows how to run.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Offers,
    Offer(OfferId),
    Nearby(OfferId),
    Reviews(OfferId),
    User,
    SignIn(Credentials),
    Favorites,
}

impl FetchRequest {
    pub fn resource(&self) -> Resource {
        match self {
            FetchRequest::Offers => Resource::Offers,
            FetchRequest::Offer(_) => Resource::Offer,
            FetchRequest::Nearby(_) => Resource::Nearby,
            FetchRequest::Reviews(_) => Resource::Reviews,
            FetchRequest::User | FetchRequest::SignIn(_) => Resource::User,
            FetchRequest::Favorites => Resource::Favorites,
        }
    }
}

pub struct Coordinator {
    gateway: Arc<dyn Gateway>,
    sender: IntentSender,
    fetch_timeout: Duration,
    next_generation: Generation,
    /// At most one tracked fetch per resource.
    tasks: HashMap<Resource, JoinHandle<()>>,
    /// Fire-and-forget writes (favorites, logout).
    mutations: Vec<JoinHandle<()>>,
    /// Review post for the offer on screen; cancelled with the screen.
    review_post: Option<JoinHandle<()>>,
    /// Offer id the offer screen is currently bound to.
    screen: Option<OfferId>,
}

impl Coordinator {
    pub fn new(gateway: Arc<dyn Gateway>, sender: IntentSender, fetch_timeout: Duration) -> Self {
        Self {
            gateway,
            sender,
            fetch_timeout,
            next_generation: 0,
            tasks: HashMap::new(),
            mutations: Vec::new(),
            review_post: None,
            screen: None,
        }
    }

    /// Starts a fetch and returns its generation.
    ///
    /// The resource is Loading when this returns. Any previous fetch for the
    /// same resource is aborted.
    pub fn fetch(&mut self, store: &mut Store, request: FetchRequest) -> Generation {
        self.next_generation += 1;
        let generation = self.next_generation;
        let resource = request.resource();

        if let Some(previous) = self.tasks.remove(&resource) {
            if !previous.is_finished() {
                debug!(%resource, "Aborting superseded fetch");
            }
            previous.abort();
        }

        store.dispatch(StoreIntent::Begin {
            resource,
            generation,
        });
        debug!(%resource, generation, ?request, "Fetch started");

        let gateway = Arc::clone(&self.gateway);
        let sender = self.sender.clone();
        let fetch_timeout = self.fetch_timeout;
        let handle = tokio::spawn(async move {
            let outcome = match tokio::time::timeout(fetch_timeout, load(gateway.as_ref(), &request)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(GatewayError::Timeout {
                    seconds: fetch_timeout.as_secs(),
                }),
            };
            let intent = match outcome {
                Ok(payload) => {
                    debug!(%resource, generation, "Fetch succeeded");
                    StoreIntent::SetData {
                        generation: Some(generation),
                        payload,
                    }
                }
                Err(err) => {
                    warn!(%resource, generation, kind = err.error_type(), error = %err, "Fetch failed");
                    StoreIntent::SetError {
                        resource,
                        generation: Some(generation),
                        error: FetchError::from(&err),
                    }
                }
            };
            if sender.send(intent).is_err() {
                trace!(%resource, "Store channel closed before fetch settled");
            }
        });
        self.tasks.insert(resource, handle);
        generation
    }

    /// Binds the offer screen to `id` and fires offer, nearby and reviews
    /// concurrently. Re-entering with the same id is a no-op; a different
    /// id cancels the old fetches and resets the screen to Loading first.
    pub fn enter_offer_screen(&mut self, store: &mut Store, id: OfferId) {
        if self.screen.as_ref() == Some(&id) {
            return;
        }
        if self.screen.is_some() {
            self.cancel_offer_screen(store);
        }
        info!(offer = %id, "Offer screen entered");
        self.screen = Some(id.clone());
        self.fetch(store, FetchRequest::Offer(id.clone()));
        self.fetch(store, FetchRequest::Nearby(id.clone()));
        self.fetch(store, FetchRequest::Reviews(id));
    }

    /// Re-fires the offer screen fetches for the bound id.
    pub fn reload_offer_screen(&mut self, store: &mut Store) {
        if let Some(id) = self.screen.take() {
            self.cancel_offer_screen(store);
            self.enter_offer_screen(store, id);
        }
    }

    /// Cancels in-flight offer screen fetches and clears their slices.
    pub fn leave_offer_screen(&mut self, store: &mut Store) {
        if let Some(id) = self.screen.take() {
            info!(offer = %id, "Offer screen left");
            self.cancel_offer_screen(store);
        }
    }

    pub fn offer_screen(&self) -> Option<&OfferId> {
        self.screen.as_ref()
    }

    fn cancel_offer_screen(&mut self, store: &mut Store) {
        for resource in Resource::OFFER_SCREEN {
            if let Some(task) = self.tasks.remove(&resource) {
                task.abort();
            }
        }
        if let Some(task) = self.review_post.take() {
            if !task.is_finished() {
                debug!("Abandoning review post for the previous offer");
            }
            task.abort();
        }
        store.dispatch(StoreIntent::ResetOfferScreen);
    }

    pub fn fetch_offers(&mut self, store: &mut Store) -> Generation {
        self.fetch(store, FetchRequest::Offers)
    }

    /// Session check; settles authorization to Authenticated or Unauthenticated.
    pub fn check_auth(&mut self, store: &mut Store) -> Generation {
        self.fetch(store, FetchRequest::User)
    }

    /// Favorites fetched on their own, independent of the user payload.
    pub fn fetch_favorites(&mut self, store: &mut Store) -> Generation {
        self.fetch(store, FetchRequest::Favorites)
    }

    pub fn login(&mut self, store: &mut Store, credentials: Credentials) -> Generation {
        info!(email = %credentials.email, "Signing in");
        self.fetch(store, FetchRequest::SignIn(credentials))
    }

    /// Signs out locally right away and tells the backend in the background.
    pub fn logout(&mut self, store: &mut Store) {
        for resource in [Resource::User, Resource::Favorites] {
            if let Some(task) = self.tasks.remove(&resource) {
                task.abort();
            }
        }
        store.dispatch(StoreIntent::SignedOut);
        info!("Signed out");

        let gateway = Arc::clone(&self.gateway);
        self.spawn_mutation(async move {
            if let Err(err) = gateway.logout().await {
                warn!(error = %err, "Logout request failed");
            }
        });
    }

    /// Sets or clears the favorite flag of an offer on the server.
    pub fn toggle_favorite(&mut self, offer_id: OfferId, make_favorite: bool) {
        debug!(offer = %offer_id, make_favorite, "Updating favorite");
        let gateway = Arc::clone(&self.gateway);
        let sender = self.sender.clone();
        self.spawn_mutation(async move {
            let intents = match gateway.set_favorite(&offer_id, make_favorite).await {
                Ok(offer) => vec![StoreIntent::FavoriteChanged(offer), StoreIntent::Notify(None)],
                Err(err @ GatewayError::Unauthorized { .. }) => {
                    warn!(offer = %offer_id, error = %err, "Favorite update rejected");
                    vec![
                        StoreIntent::SetAuthorization(AuthorizationStatus::Unauthenticated),
                        StoreIntent::Notify(Some("Sign in to save favorites".to_string())),
                    ]
                }
                Err(err) => {
                    warn!(offer = %offer_id, error = %err, "Favorite update failed");
                    vec![StoreIntent::Notify(Some(format!("Could not update favorite: {err}")))]
                }
            };
            send_all(&sender, intents);
        });
    }

    /// Posts a review for `offer_id`. The result is tagged with the id so
    /// it can only land on that offer's screen.
    pub fn post_review(&mut self, offer_id: OfferId, draft: ReviewDraft) {
        debug!(offer = %offer_id, rating = draft.rating, "Posting review");
        if let Some(previous) = self.review_post.take() {
            previous.abort();
        }
        let gateway = Arc::clone(&self.gateway);
        let sender = self.sender.clone();
        self.review_post = Some(tokio::spawn(async move {
            let result = gateway.post_review(&offer_id, &draft).await;
            let intents = match result {
                Ok(review) => vec![
                    StoreIntent::ReviewPosted { offer_id, review },
                    StoreIntent::Notify(None),
                ],
                Err(err) => {
                    warn!(offer = %offer_id, error = %err, "Posting review failed");
                    vec![StoreIntent::ReviewRejected(format!("Could not post review: {err}"))]
                }
            };
            send_all(&sender, intents);
        }));
    }

    /// Whether a review post is still waiting on the backend.
    pub fn is_posting_review(&self) -> bool {
        self.review_post.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Whether a tracked fetch for `resource` is still running.
    pub fn is_running(&self, resource: Resource) -> bool {
        self.tasks
            .get(&resource)
            .is_some_and(|task| !task.is_finished())
    }

    /// Aborts every task this coordinator started.
    pub fn shutdown(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
        for task in self.mutations.drain(..) {
            task.abort();
        }
        if let Some(task) = self.review_post.take() {
            task.abort();
        }
        self.screen = None;
    }

    fn spawn_mutation<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.mutations.retain(|task| !task.is_finished());
        self.mutations.push(tokio::spawn(future));
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn load(gateway: &dyn Gateway, request: &FetchRequest) -> Result<Payload, GatewayError> {
    Ok(match request {
        FetchRequest::Offers => Payload::Offers(gateway.fetch_offers().await?),
        FetchRequest::Offer(id) => Payload::Offer(gateway.fetch_offer(id).await?),
        FetchRequest::Nearby(id) => Payload::Nearby(gateway.fetch_nearby(id).await?),
        FetchRequest::Reviews(id) => Payload::Reviews(gateway.fetch_reviews(id).await?),
        FetchRequest::User => Payload::User(gateway.fetch_user().await?),
        FetchRequest::SignIn(credentials) => Payload::User(gateway.login(credentials).await?),
        FetchRequest::Favorites => Payload::Favorites(gateway.fetch_favorites().await?),
    })
}

fn send_all(sender: &IntentSender, intents: Vec<StoreIntent>) {
    for intent in intents {
        if sender.send(intent).is_err() {
            trace!("Store channel closed");
            return;
        }
    }
}
