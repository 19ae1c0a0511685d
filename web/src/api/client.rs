//! Thin HTTP client for the Cloktrix REST backend.
//!
//! Everything that used to live in global interceptors is injected through
//! [`ApiConfig`]: where the bearer token comes from, what happens when the
//! session expires, and how a subscription paywall is reported.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared_types::ApiErrorBody;

use super::error::ApiError;

pub type TokenProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;
pub type SubscriptionRequiredHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Error code the backend puts in a 403 body when the paywall blocks a call.
pub const SUBSCRIPTION_REQUIRED_CODE: &str = "SUBSCRIPTION_REQUIRED";

const DEFAULT_SUBSCRIPTION_MESSAGE: &str = "This feature requires an active subscription.";

#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Only honoured on native targets; the browser owns fetch timeouts.
    pub request_timeout: Option<Duration>,
    token_provider: Option<TokenProvider>,
    on_session_expired: Option<SessionExpiredHook>,
    on_subscription_required: Option<SubscriptionRequiredHook>,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("token_provider", &self.token_provider.is_some())
            .field("on_session_expired", &self.on_session_expired.is_some())
            .field(
                "on_subscription_required",
                &self.on_subscription_required.is_some(),
            )
            .finish()
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Some(Duration::from_secs(30)),
            token_provider: None,
            on_session_expired: None,
            on_subscription_required: None,
        }
    }

    pub fn with_token_provider(
        mut self,
        provider: impl Fn() -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.token_provider = Some(Arc::new(provider));
        self
    }

    pub fn with_session_expired(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }

    pub fn with_subscription_required(
        mut self,
        hook: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.on_subscription_required = Some(Arc::new(hook));
        self
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::InvalidConfig("base URL is empty".to_string()));
        }

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.request_timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// Joins percent-encoded path segments onto the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.config.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.authorize(self.http.get(url))
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.authorize(self.http.post(url))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .config
            .token_provider
            .as_ref()
            .and_then(|provider| provider())
            .filter(|token| !token.trim().is_empty());

        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and decodes a successful body into `T`.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                tracing::warn!(%url, error = %e, "undecodable response body");
                ApiError::Decode(e)
            });
        }

        tracing::warn!(%url, status = status.as_u16(), "request failed");
        Err(self.classify_failure(status, &body))
    }

    fn classify_failure(&self, status: StatusCode, body: &str) -> ApiError {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();

        let subscription_blocked = status == StatusCode::PAYMENT_REQUIRED
            || (status == StatusCode::FORBIDDEN
                && parsed.code.as_deref() == Some(SUBSCRIPTION_REQUIRED_CODE));

        if subscription_blocked {
            let message = parsed
                .text()
                .unwrap_or(DEFAULT_SUBSCRIPTION_MESSAGE)
                .to_string();
            if let Some(hook) = &self.config.on_subscription_required {
                hook(&message);
            }
            return ApiError::SubscriptionRequired { message };
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                if let Some(hook) = &self.config.on_session_expired {
                    hook();
                }
                ApiError::Unauthorized
            }
            StatusCode::NOT_FOUND => ApiError::NotFound,
            _ => {
                let message = parsed.text().map(str::to_string).unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
                ApiError::rejected(status, message)
            }
        }
    }
}
