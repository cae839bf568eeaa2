use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

use crate::config::ApiConfig;
use crate::domain::{Credentials, Offer, OfferId, Review, ReviewDraft, UserInfo};

use super::{Gateway, GatewayError};

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "X-Token";

/// `Gateway` over the backend's JSON HTTP API.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    token: RwLock<Option<String>>,
}

impl HttpGateway {
    pub fn new(api: &ApiConfig) -> Result<Self, GatewayError> {
        let request_timeout = Duration::from_secs(u64::from(api.request_timeout_seconds));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(api.connect_timeout_seconds)))
            .timeout(request_timeout)
            .build()
            .map_err(|e| GatewayError::InvalidRequest(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            request_timeout,
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_as(method, path, self.token.read().as_deref())
    }

    fn request_as(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(token) => builder.header(TOKEN_HEADER, token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Vec<u8>, GatewayError> {
        trace!(path, "Sending request");
        let response = builder.send().await.map_err(|source| {
            if source.is_timeout() {
                GatewayError::Timeout {
                    seconds: self.request_timeout.as_secs(),
                }
            } else {
                GatewayError::Network {
                    path: path.to_string(),
                    source,
                }
            }
        })?;

        check_status(response.status(), path)?;

        let body = response.bytes().await.map_err(|source| GatewayError::Network {
            path: path.to_string(),
            source,
        })?;
        debug!(path, bytes = body.len(), "Response received");
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let body = self.send(self.request(Method::GET, path), path).await?;
        decode(&body, path)
    }
}

fn check_status(status: StatusCode, path: &str) -> Result<(), GatewayError> {
    match status {
        StatusCode::NOT_FOUND => Err(GatewayError::NotFound {
            path: path.to_string(),
        }),
        StatusCode::UNAUTHORIZED => Err(GatewayError::Unauthorized {
            path: path.to_string(),
        }),
        status if !status.is_success() => Err(GatewayError::Status {
            status: status.as_u16(),
            path: path.to_string(),
        }),
        _ => Ok(()),
    }
}

fn decode<T: DeserializeOwned>(body: &[u8], path: &str) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|e| GatewayError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn fetch_offers(&self) -> Result<Vec<Offer>, GatewayError> {
        self.get_json("/offers").await
    }

    async fn fetch_offer(&self, id: &OfferId) -> Result<Offer, GatewayError> {
        self.get_json(&format!("/offers/{id}")).await
    }

    async fn fetch_nearby(&self, id: &OfferId) -> Result<Vec<Offer>, GatewayError> {
        self.get_json(&format!("/offers/{id}/nearby")).await
    }

    async fn fetch_reviews(&self, id: &OfferId) -> Result<Vec<Review>, GatewayError> {
        self.get_json(&format!("/comments/{id}")).await
    }

    async fn fetch_user(&self) -> Result<UserInfo, GatewayError> {
        self.get_json("/login").await
    }

    async fn fetch_favorites(&self) -> Result<Vec<Offer>, GatewayError> {
        self.get_json("/favorite").await
    }

    async fn set_favorite(&self, id: &OfferId, favorite: bool) -> Result<Offer, GatewayError> {
        let path = format!("/favorite/{id}/{}", u8::from(favorite));
        let body = self.send(self.request(Method::POST, &path), &path).await?;
        decode(&body, &path)
    }

    async fn login(&self, credentials: &Credentials) -> Result<UserInfo, GatewayError> {
        let path = "/login";
        let builder = self.request(Method::POST, path).json(credentials);
        let body = self.send(builder, path).await?;
        let user: UserInfo = decode(&body, path)?;
        self.set_token(user.token.clone());
        Ok(user)
    }

    /// The token is dropped before the request goes out, so a sign-in that
    /// completes while this is in flight keeps its own token.
    async fn logout(&self) -> Result<(), GatewayError> {
        let path = "/logout";
        let token = self.token.write().take();
        let builder = self.request_as(Method::DELETE, path, token.as_deref());
        self.send(builder, path).await.map(|_| ())
    }

    async fn post_review(&self, id: &OfferId, draft: &ReviewDraft) -> Result<Review, GatewayError> {
        let path = format!("/comments/{id}");
        let builder = self.request(Method::POST, &path).json(draft);
        let body = self.send(builder, &path).await?;
        decode(&body, &path)
    }
}
