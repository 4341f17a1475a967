// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    body::{Bytes, HttpBody},
    extract::{FromRef, FromRequestParts},
};
use chrono::Duration;
use http::{
    HeaderName, Request, Response, StatusCode,
    header::{CONTENT_TYPE, LOCATION},
};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use rpl_axum_utils::ErrorWrapper;
use rpl_data_model::{
    AccessToken, AccessTokenState, BoxClock, Client, Clock, LogoutPolicy, Ulid, clock::MockClock,
};
use rpl_storage::{BoxRepository, RepositoryError, RepositoryFactory};
use rpl_storage_memory::MemoryRepositoryFactory;
use serde::{Serialize, de::DeserializeOwned};
use tower::{Service, ServiceExt};
use url::Url;

use crate::{LogoutContext, LogoutHook};

/// Setup tracing for tests.
#[allow(unused_must_use)]
pub(crate) fn setup() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

/// A [`LogoutHook`] which remembers every call
#[derive(Debug, Default)]
pub(crate) struct RecordingLogoutHook {
    calls: Mutex<Vec<LogoutContext>>,
}

impl RecordingLogoutHook {
    /// The contexts of all the calls so far
    pub fn calls(&self) -> Vec<LogoutContext> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogoutHook for RecordingLogoutHook {
    async fn on_logout(&self, context: &LogoutContext) {
        self.calls.lock().unwrap().push(context.clone());
    }
}

#[derive(Clone)]
pub(crate) struct TestState {
    pub repository_factory: MemoryRepositoryFactory,
    pub policy: LogoutPolicy,
    pub logout_hook: Arc<RecordingLogoutHook>,
    pub clock: Arc<MockClock>,

    /// A web client registering `http://localhost:3000` and
    /// `https://allowed.example` as redirect URIs
    pub web_client: Client,

    /// A native client registering `app://loggedout.example` as
    /// post-logout redirect URI
    pub native_client: Client,

    /// The end-user the tokens were issued to
    pub user_id: Ulid,

    /// A live token issued to the web client
    pub web_token: String,

    /// A live token issued to the native client
    pub native_token: String,

    /// A revoked token issued to the web client
    pub revoked_token: String,

    /// A live token issued to a client which does not exist
    pub orphan_token: String,
}

impl TestState {
    /// Create a new test state, with `http` redirect URIs allowed and
    /// `allowed.example` in the domain allowlist
    pub fn new() -> Self {
        let mut policy = LogoutPolicy::default().with_allowed_domains(["allowed.example"]);
        policy.force_ssl_in_redirect_uri = false;
        Self::with_policy(policy)
    }

    /// Create a new test state with the given logout policy
    pub fn with_policy(policy: LogoutPolicy) -> Self {
        let clock = Arc::new(MockClock::default());
        let mut rng = ChaChaRng::seed_from_u64(42);
        let now = clock.now();
        let mut ulid = || Ulid::from_datetime_with_source(now.into(), &mut rng);

        let repository_factory = MemoryRepositoryFactory::new();

        let web_client = Client {
            id: ulid(),
            client_id: "web-client".to_owned(),
            redirect_uris: vec![
                Url::parse("http://localhost:3000").unwrap(),
                Url::parse("https://allowed.example").unwrap(),
            ],
            post_logout_redirect_uris: Vec::new(),
        };

        let native_client = Client {
            id: ulid(),
            client_id: "native-client".to_owned(),
            redirect_uris: vec![Url::parse("com.example.native:/callback").unwrap()],
            post_logout_redirect_uris: vec![Url::parse("app://loggedout.example").unwrap()],
        };

        repository_factory.add_client(web_client.clone()).unwrap();
        repository_factory
            .add_client(native_client.clone())
            .unwrap();

        let user_id = ulid();
        let token = |id: Ulid, client_id: Ulid, value: &str| AccessToken {
            id,
            state: AccessTokenState::Valid,
            client_id,
            resource_owner_id: Some(user_id),
            access_token: value.to_owned(),
            created_at: now,
            expires_at: Some(now + Duration::hours(1)),
        };

        let web_token = "web-token".to_owned();
        repository_factory
            .add_access_token(token(ulid(), web_client.id, &web_token))
            .unwrap();

        let native_token = "native-token".to_owned();
        repository_factory
            .add_access_token(token(ulid(), native_client.id, &native_token))
            .unwrap();

        let revoked_token = "revoked-token".to_owned();
        repository_factory
            .add_access_token(
                token(ulid(), web_client.id, &revoked_token)
                    .revoke(now)
                    .unwrap(),
            )
            .unwrap();

        let orphan_token = "orphan-token".to_owned();
        let missing_client_id = ulid();
        repository_factory
            .add_access_token(token(ulid(), missing_client_id, &orphan_token))
            .unwrap();

        Self {
            repository_factory,
            policy,
            logout_hook: Arc::new(RecordingLogoutHook::default()),
            clock,
            web_client,
            native_client,
            user_id,
            web_token,
            native_token,
            revoked_token,
            orphan_token,
        }
    }

    pub async fn request<B>(&self, request: Request<B>) -> Response<String>
    where
        B: HttpBody<Data = Bytes> + Send + 'static,
        B::Error: std::error::Error + Send + Sync,
    {
        let app = crate::oauth2_router()
            .with_state(self.clone())
            .into_service();

        let Ok(mut service) = app.ready_oneshot().await;
        let Ok(response) = service.call(request).await;

        let (parts, body) = response.into_parts();

        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = std::str::from_utf8(&body)
            .expect("Response body is not valid UTF-8")
            .to_owned();

        Response::from_parts(parts, body)
    }

    pub async fn repository(&self) -> Result<BoxRepository, RepositoryError> {
        self.repository_factory.create().await
    }
}

impl FromRef<TestState> for LogoutPolicy {
    fn from_ref(input: &TestState) -> Self {
        input.policy.clone()
    }
}

impl FromRef<TestState> for Arc<dyn LogoutHook> {
    fn from_ref(input: &TestState) -> Self {
        input.logout_hook.clone()
    }
}

impl FromRequestParts<TestState> for BoxClock {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        state: &TestState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Box::new(state.clock.clone()))
    }
}

impl FromRequestParts<TestState> for BoxRepository {
    type Rejection = ErrorWrapper<RepositoryError>;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        state: &TestState,
    ) -> Result<Self, Self::Rejection> {
        let repo = state.repository_factory.create().await?;
        Ok(repo)
    }
}

pub(crate) trait RequestBuilderExt {
    /// Builds the request with the given form value as body.
    fn form<T: Serialize>(self, body: T) -> Request<String>;

    /// Builds the request with an empty body.
    fn empty(self) -> Request<String>;
}

impl RequestBuilderExt for http::request::Builder {
    fn form<T: Serialize>(self, body: T) -> Request<String> {
        self.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(serde_urlencoded::to_string(&body).unwrap())
            .unwrap()
    }

    fn empty(self) -> Request<String> {
        self.body(String::new()).unwrap()
    }
}

pub(crate) trait ResponseExt {
    /// Asserts that the response has the given status code.
    ///
    /// # Panics
    ///
    /// Panics if the response has a different status code.
    fn assert_status(&self, status: StatusCode);

    /// Asserts that the response has the given header value.
    ///
    /// # Panics
    ///
    /// Panics if the response does not have the given header or if the header
    /// value does not match.
    fn assert_header_value(&self, header: HeaderName, value: &str);

    /// Asserts that the response redirects to the given location.
    ///
    /// # Panics
    ///
    /// Panics if the response is not a `302 Found` with that `Location`.
    fn assert_redirect(&self, location: &str);

    /// Get the response body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the response is missing the `Content-Type: application/json`,
    /// or if the body is not valid JSON.
    fn json<T: DeserializeOwned>(&self) -> T;
}

impl ResponseExt for Response<String> {
    #[track_caller]
    fn assert_status(&self, status: StatusCode) {
        assert_eq!(
            self.status(),
            status,
            "HTTP status code mismatch: got {}, expected {}. Body: {}",
            self.status(),
            status,
            self.body()
        );
    }

    #[track_caller]
    fn assert_header_value(&self, header: HeaderName, value: &str) {
        let actual_value = self
            .headers()
            .get(&header)
            .unwrap_or_else(|| panic!("Missing header {header}"));

        assert_eq!(
            actual_value,
            value,
            "Header mismatch: got {:?}, expected {:?}",
            self.headers().get(header),
            value
        );
    }

    #[track_caller]
    fn assert_redirect(&self, location: &str) {
        self.assert_status(StatusCode::FOUND);
        self.assert_header_value(LOCATION, location);
    }

    #[track_caller]
    fn json<T: DeserializeOwned>(&self) -> T {
        self.assert_header_value(CONTENT_TYPE, "application/json");
        serde_json::from_str(self.body()).expect("JSON deserialization failed")
    }
}
