use crate::config::Config;
use crate::coordinator::Coordinator;
use crate::domain::{AuthorizationStatus, City, OfferId};
use crate::mvi::Reducer;
use crate::routing::{guard, Guard, Route};
use crate::selectors::{self, CityOffers, SortOption};
use crate::store::{EntityState, Resource, Store, StoreIntent};
use crate::ui::header::HeaderView;
use crate::ui::login::{LoginFormState, LoginIntent, LoginReducer};
use crate::ui::review_form::{ReviewFormIntent, ReviewFormReducer, ReviewFormState};
use crate::ui::screens::favorites::FavoritesView;
use crate::ui::screens::main::MainScreenView;
use crate::ui::screens::offer::{OfferScreenView, ScreenEnv, NEARBY_LIMIT};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, info};

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

const HISTORY_LIMIT: usize = 32;

/// Owns the store, the coordinator and screen-local state. Lives on the
/// UI loop; every mutation happens through `&mut self`.
pub struct App {
    should_quit: bool,
    route: Route,
    history: Vec<Route>,
    store: Store,
    coordinator: Coordinator,
    cities: Vec<City>,
    ratings: Vec<String>,
    default_city: String,
    city_index: usize,
    sort: SortOption,
    /// Selected card on the current screen.
    selection: usize,
    listing: CityOffers,
    login: LoginFormState,
    review_form: ReviewFormState,
    size: Option<(u16, u16)>,
}

impl App {
    pub fn new(config: &Config, coordinator: Coordinator) -> Self {
        let city_index = config
            .cities
            .iter()
            .position(|city| city.name == config.ui.default_city)
            .unwrap_or(0);
        Self {
            should_quit: false,
            route: Route::Main,
            history: Vec::new(),
            store: Store::new(),
            coordinator,
            cities: config.cities.clone(),
            ratings: config.ratings.clone(),
            default_city: config.ui.default_city.clone(),
            city_index,
            sort: SortOption::default(),
            selection: 0,
            listing: CityOffers::new(),
            login: LoginFormState::default(),
            review_form: ReviewFormState::default(),
            size: None,
        }
    }

    /// Session check, listing fetch, then the initial route.
    pub fn start(&mut self, initial: Route) {
        self.coordinator.check_auth(&mut self.store);
        self.coordinator.fetch_offers(&mut self.store);
        self.enter(initial);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn state(&self) -> &EntityState {
        self.store.state()
    }

    pub fn store_revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn active_city(&self) -> Option<&City> {
        self.cities.get(self.city_index)
    }

    pub fn ratings(&self) -> &[String] {
        &self.ratings
    }

    pub fn login_form(&self) -> &LoginFormState {
        &self.login
    }

    pub fn review_form(&self) -> &ReviewFormState {
        &self.review_form
    }

    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.size = Some((cols, rows));
    }

    /// Whether keys should go to a text field rather than shortcuts.
    pub fn is_editing_text(&self) -> bool {
        matches!(self.route, Route::Login) || self.review_form.is_visible()
    }

    // -- Navigation -----------------------------------------------------------

    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        let previous = std::mem::take(&mut self.route);
        self.history.push(previous);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.enter(route);
    }

    pub fn back(&mut self) {
        let route = self.history.pop().unwrap_or_default();
        self.enter(route);
    }

    /// Switches to `route` after the guard, running exit and entry effects.
    fn enter(&mut self, route: Route) {
        let route = match guard(&route, self.store.state().authorization) {
            Guard::Redirect(target) => {
                debug!(from = %route, to = %target, "Route redirected");
                target
            }
            Guard::Allow | Guard::Wait => route,
        };

        let leaving_offer = matches!(self.route, Route::Offer { .. });
        let entering_offer = route.offer_id().cloned();
        if leaving_offer && entering_offer.is_none() {
            self.coordinator.leave_offer_screen(&mut self.store);
        }

        info!(route = %route, "Navigated");
        self.route = route;
        self.selection = 0;
        dispatch_mvi!(self, review_form, ReviewFormReducer, ReviewFormIntent::Close);
        self.store.dispatch(StoreIntent::Notify(None));

        match &self.route {
            Route::Offer { .. } => {
                self.store.dispatch(StoreIntent::SetActiveMarker(None));
                if let Some(id) = entering_offer {
                    self.coordinator.enter_offer_screen(&mut self.store, id);
                } else {
                    self.coordinator.leave_offer_screen(&mut self.store);
                }
            }
            Route::Favorites => {
                if self.store.state().authorization.is_authenticated() {
                    self.coordinator.fetch_favorites(&mut self.store);
                }
            }
            Route::Login => {
                dispatch_mvi!(self, login, LoginReducer, LoginIntent::Reset);
            }
            Route::Main => {
                self.store.dispatch(StoreIntent::SetActiveMarker(None));
            }
            Route::NotFound { .. } => {}
        }
    }

    // -- Store ----------------------------------------------------------------

    /// Applies a settled intent from the coordinator and reacts to it.
    pub fn on_store(&mut self, intent: StoreIntent) {
        let was = self.store.state().authorization;
        let login_error = match &intent {
            StoreIntent::SetError {
                resource: Resource::User,
                error,
                ..
            } if self.login.submitting => Some(error.to_string()),
            _ => None,
        };
        match &intent {
            StoreIntent::ReviewPosted { offer_id, .. } => {
                let on_screen = selectors::current_offer(self.store.state())
                    .is_some_and(|offer| offer.id == *offer_id);
                if on_screen {
                    dispatch_mvi!(self, review_form, ReviewFormReducer, ReviewFormIntent::Posted);
                }
            }
            StoreIntent::ReviewRejected(message) => {
                dispatch_mvi!(
                    self,
                    review_form,
                    ReviewFormReducer,
                    ReviewFormIntent::Failed(message.clone())
                );
            }
            _ => {}
        }

        if !self.store.dispatch(intent) {
            return;
        }
        if let Some(message) = login_error {
            dispatch_mvi!(self, login, LoginReducer, LoginIntent::Failed(message));
        }

        let now = self.store.state().authorization;
        if was == now {
            return;
        }
        info!(from = ?was, to = ?now, "Authorization changed");
        if now.is_authenticated() {
            self.coordinator.fetch_favorites(&mut self.store);
        }
        // The current screen may no longer be allowed.
        if let Guard::Redirect(target) = guard(&self.route, now) {
            if matches!(self.route, Route::Login) {
                dispatch_mvi!(self, login, LoginReducer, LoginIntent::Reset);
                self.back();
            } else {
                self.navigate(target);
            }
        }
    }

    // -- Views ----------------------------------------------------------------

    pub fn header_view(&self) -> HeaderView {
        HeaderView::reconcile(self.store.state())
    }

    pub fn offer_view(&self) -> OfferScreenView {
        let env = ScreenEnv {
            cities: &self.cities,
            default_city: &self.default_city,
        };
        OfferScreenView::reconcile(self.route.offer_id(), self.store.state(), &env)
    }

    pub fn main_view(&mut self) -> Option<MainScreenView> {
        let city = self.cities.get(self.city_index)?;
        let offers = self.listing.select(self.store.state(), &city.name, self.sort);
        Some(MainScreenView::reconcile(
            self.store.state(),
            &self.cities,
            city,
            self.sort,
            &offers,
            Some(self.selection),
        ))
    }

    pub fn favorites_view(&self) -> FavoritesView {
        FavoritesView::reconcile(self.store.state())
    }

    // -- Input ----------------------------------------------------------------

    pub fn on_tick(&mut self) {}

    pub fn on_key(&mut self, key: KeyEvent) {
        match self.route.clone() {
            Route::Main => self.on_main_key(key),
            Route::Offer { .. } => self.on_offer_key(key),
            Route::Favorites => self.on_favorites_key(key),
            Route::Login => self.on_login_key(key),
            Route::NotFound { .. } => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Backspace) {
                    self.back();
                }
            }
        }
    }

    fn on_main_key(&mut self, key: KeyEvent) {
        let cards = self
            .cities
            .get(self.city_index)
            .map(|city| self.listing.select(self.store.state(), &city.name, self.sort))
            .unwrap_or_default();

        match key.code {
            KeyCode::Left | KeyCode::Right if !self.cities.is_empty() => {
                let count = self.cities.len();
                self.city_index = if key.code == KeyCode::Left {
                    (self.city_index + count - 1) % count
                } else {
                    (self.city_index + 1) % count
                };
                self.selection = 0;
                self.store.dispatch(StoreIntent::SetActiveMarker(None));
            }
            KeyCode::Up | KeyCode::Down if !cards.is_empty() => {
                self.selection = step(self.selection, cards.len(), key.code == KeyCode::Down);
                let id = cards.get(self.selection).map(|offer| offer.id.clone());
                self.store.dispatch(StoreIntent::SetActiveMarker(id));
            }
            KeyCode::Enter => {
                if let Some(offer) = cards.get(self.selection) {
                    self.navigate(Route::offer(offer.id.clone()));
                }
            }
            KeyCode::Char('s') => {
                self.sort = self.sort.next();
                self.selection = 0;
            }
            KeyCode::Char('f') => {
                if let Some(offer) = cards.get(self.selection) {
                    self.toggle_favorite(offer.id.clone(), !offer.is_favorite);
                }
            }
            KeyCode::Char('v') => self.navigate(Route::Favorites),
            KeyCode::Char('l') => self.sign_in_or_out(),
            _ => {}
        }
    }

    fn on_offer_key(&mut self, key: KeyEvent) {
        if self.review_form.is_visible() {
            self.on_review_key(key);
            return;
        }

        let view = self.offer_view();
        let Some(content) = view.content() else {
            if matches!(key.code, KeyCode::Esc | KeyCode::Backspace) {
                self.back();
            }
            return;
        };
        let nearby = content.nearby.cards.len().min(NEARBY_LIMIT);

        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.back(),
            KeyCode::Up | KeyCode::Down if nearby > 0 => {
                self.selection = step(self.selection, nearby, key.code == KeyCode::Down);
                let id = content.nearby.cards.get(self.selection).map(|card| card.id.clone());
                self.store.dispatch(StoreIntent::SetActiveMarker(id));
            }
            KeyCode::Enter => {
                // Same screen, new id: previous fetches are superseded.
                if let Some(card) = content.nearby.cards.get(self.selection) {
                    self.navigate(Route::offer(card.id.clone()));
                }
            }
            KeyCode::Char('f') => {
                let toggle = content.favorite.clone();
                self.toggle_favorite(toggle.offer_id, !toggle.active);
            }
            KeyCode::Char('r') => {
                if content.reviews.show_form {
                    dispatch_mvi!(self, review_form, ReviewFormReducer, ReviewFormIntent::Open);
                } else {
                    self.navigate(Route::Login);
                }
            }
            KeyCode::Char('R') => self.coordinator.reload_offer_screen(&mut self.store),
            _ => {}
        }
    }

    fn on_review_key(&mut self, key: KeyEvent) {
        let intent = match key.code {
            KeyCode::Esc => ReviewFormIntent::Close,
            KeyCode::Left | KeyCode::Right => {
                let current = match &self.review_form {
                    ReviewFormState::Editing { rating, .. } => *rating,
                    _ => 0,
                };
                let rating = if key.code == KeyCode::Left {
                    current.saturating_sub(1).max(1)
                } else {
                    (current + 1).min(5)
                };
                ReviewFormIntent::Rate(rating)
            }
            KeyCode::Backspace => ReviewFormIntent::Backspace,
            KeyCode::Char(ch) => ReviewFormIntent::Type(ch),
            KeyCode::Enter => {
                let Some(draft) = self.review_form.draft() else {
                    return;
                };
                match (draft, self.route.offer_id().cloned()) {
                    (Ok(draft), Some(id)) => {
                        self.coordinator.post_review(id, draft);
                        ReviewFormIntent::Submitted
                    }
                    (Err(err), _) => ReviewFormIntent::Rejected(err.to_string()),
                    (Ok(_), None) => return,
                }
            }
            _ => return,
        };
        dispatch_mvi!(self, review_form, ReviewFormReducer, intent);
    }

    fn on_favorites_key(&mut self, key: KeyEvent) {
        let view = self.favorites_view();
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.back(),
            KeyCode::Up | KeyCode::Down if !view.is_empty() => {
                self.selection = step(self.selection, view.len(), key.code == KeyCode::Down);
            }
            KeyCode::Enter => {
                if let Some(card) = view.card(self.selection) {
                    self.navigate(Route::offer(card.id.clone()));
                }
            }
            KeyCode::Char('f') => {
                if let Some(card) = view.card(self.selection) {
                    self.toggle_favorite(card.id.clone(), false);
                    self.selection = self.selection.min(view.len().saturating_sub(2));
                }
            }
            _ => {}
        }
    }

    fn on_login_key(&mut self, key: KeyEvent) {
        let intent = match key.code {
            KeyCode::Esc => {
                self.back();
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => LoginIntent::NextField,
            KeyCode::Backspace => LoginIntent::Backspace,
            KeyCode::Char(ch) => LoginIntent::Type(ch),
            KeyCode::Enter if !self.login.submitting => match self.login.credentials() {
                Ok(credentials) => {
                    self.coordinator.login(&mut self.store, credentials);
                    LoginIntent::Submitted
                }
                Err(err) => LoginIntent::Rejected(err.to_string()),
            },
            _ => return,
        };
        dispatch_mvi!(self, login, LoginReducer, intent);
    }

    // -- Actions --------------------------------------------------------------

    fn toggle_favorite(&mut self, id: OfferId, make_favorite: bool) {
        match self.store.state().authorization {
            AuthorizationStatus::Authenticated => self.coordinator.toggle_favorite(id, make_favorite),
            _ => self.navigate(Route::Login),
        }
    }

    fn sign_in_or_out(&mut self) {
        if selectors::authorization(self.store.state()).is_authenticated() {
            self.coordinator.logout(&mut self.store);
            if self.route.is_private() {
                self.navigate(Route::Main);
            }
        } else {
            self.navigate(Route::Login);
        }
    }

    pub fn shutdown(&mut self) {
        self.coordinator.shutdown();
    }
}

fn step(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    let current = current.min(len - 1);
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}
