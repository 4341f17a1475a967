// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::{convert::Infallible, sync::Arc};

use axum::extract::{FromRef, FromRequestParts};
use rpl_data_model::{BoxClock, LogoutPolicy, SystemClock};
use rpl_handlers::{ErrorWrapper, LogoutHook};
use rpl_storage::{BoxRepository, RepositoryError, RepositoryFactory};
use rpl_storage_memory::MemoryRepositoryFactory;

#[derive(Clone)]
pub struct AppState {
    pub repository_factory: MemoryRepositoryFactory,
    pub logout_policy: LogoutPolicy,
    pub logout_hook: Arc<dyn LogoutHook>,
}

impl FromRef<AppState> for LogoutPolicy {
    fn from_ref(input: &AppState) -> Self {
        input.logout_policy.clone()
    }
}

impl FromRef<AppState> for Arc<dyn LogoutHook> {
    fn from_ref(input: &AppState) -> Self {
        input.logout_hook.clone()
    }
}

impl FromRequestParts<AppState> for BoxClock {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let clock = SystemClock::default();
        Ok(Box::new(clock))
    }
}

impl FromRequestParts<AppState> for BoxRepository {
    type Rejection = ErrorWrapper<RepositoryError>;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let repo = state.repository_factory.create().await?;
        Ok(repo)
    }
}
