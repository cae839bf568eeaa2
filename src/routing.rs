//! Route table and the authorization guard for private screens.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::{AuthorizationStatus, OfferId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Main,
    Login,
    Favorites,
    /// `/offer/:id`. The id is `None` when the segment is empty, which the
    /// offer screen renders as not found.
    Offer { id: Option<OfferId> },
    NotFound { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Route '{0}' must start with '/'")]
    Relative(String),
}

impl Route {
    pub fn offer(id: impl Into<OfferId>) -> Self {
        Route::Offer {
            id: Some(id.into()),
        }
    }

    /// Maps a path onto a route. Unknown paths become `NotFound`; the `:id`
    /// segment is kept verbatim.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match trimmed {
            "" | "/" => Route::Main,
            "/login" => Route::Login,
            "/favorites" => Route::Favorites,
            "/offer" => Route::Offer { id: None },
            other => match other.strip_prefix("/offer/") {
                Some(id) if !id.contains('/') => Route::Offer {
                    id: (!id.is_empty()).then(|| OfferId::new(id)),
                },
                _ => Route::NotFound {
                    path: path.to_string(),
                },
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Main => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Favorites => "/favorites".to_string(),
            Route::Offer { id: Some(id) } => format!("/offer/{id}"),
            Route::Offer { id: None } => "/offer/".to_string(),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Route::Favorites)
    }

    pub fn offer_id(&self) -> Option<&OfferId> {
        match self {
            Route::Offer { id } => id.as_ref(),
            _ => None,
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with('/') {
            return Err(RouteError::Relative(s.to_string()));
        }
        Ok(Route::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What the router does with a requested route given the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Allow,
    /// Session check still running; show a placeholder.
    Wait,
    Redirect(Route),
}

pub fn guard(route: &Route, authorization: AuthorizationStatus) -> Guard {
    match (route, authorization) {
        (route, AuthorizationStatus::Unknown) if route.is_private() => Guard::Wait,
        (route, AuthorizationStatus::Unauthenticated) if route.is_private() => {
            Guard::Redirect(Route::Login)
        }
        (Route::Login, AuthorizationStatus::Authenticated) => Guard::Redirect(Route::Main),
        _ => Guard::Allow,
    }
}
