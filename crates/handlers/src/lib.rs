// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

#![deny(clippy::future_not_send)]
#![allow(
    // Some axum handlers need that
    clippy::unused_async,
    // Because of how axum handlers work, we sometime have take many arguments
    clippy::too_many_arguments,
)]

use std::sync::Arc;

use axum::{
    Router,
    extract::{FromRef, FromRequestParts},
    routing::get,
};
use rpl_data_model::{BoxClock, LogoutPolicy};
use rpl_storage::BoxRepository;

mod logout_hook;
mod oauth2;

#[cfg(test)]
mod test_utils;

/// Implement `From<E>` for `RouteError`, for "internal server error" kind of
/// errors.
#[macro_export]
macro_rules! impl_from_error_for_route {
    ($route_error:ty : $error:ty) => {
        impl ::std::convert::From<$error> for $route_error {
            fn from(e: $error) -> Self {
                Self::Internal(Box::new(e))
            }
        }
    };
    ($error:ty) => {
        impl_from_error_for_route!(self::RouteError: $error);
    };
}

pub use rpl_axum_utils::ErrorWrapper;

pub use self::{
    logout_hook::{LogoutContext, LogoutHook, NoopLogoutHook, TracingLogoutHook},
    oauth2::end_session::{LogoutRejection, ValidationOutcome, compose, validate},
};

/// Where the RP-initiated logout endpoint is mounted
pub const END_SESSION_PATH: &str = "/oauth2/logout";

/// The OAuth 2.0 and OIDC endpoints
pub fn oauth2_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    BoxRepository: FromRequestParts<S>,
    BoxClock: FromRequestParts<S>,
    LogoutPolicy: FromRef<S>,
    Arc<dyn LogoutHook>: FromRef<S>,
{
    Router::new().route(
        END_SESSION_PATH,
        get(self::oauth2::end_session::get).post(self::oauth2::end_session::post),
    )
}
