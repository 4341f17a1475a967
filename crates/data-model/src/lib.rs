// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

#![allow(clippy::module_name_repetitions)]

use thiserror::Error;

pub mod clock;
mod logout_policy;
pub mod oauth2;
pub(crate) mod tokens;

/// Error when an invalid state transition is attempted.
#[derive(Debug, Error)]
#[error("invalid state transition")]
pub struct InvalidTransitionError;

pub use ulid::Ulid;

pub use self::{
    clock::{BoxClock, Clock, SystemClock},
    logout_policy::LogoutPolicy,
    oauth2::{Client, InvalidPostLogoutRedirectUri, PostLogoutRedirectUri, QueryParameter},
    tokens::{AccessToken, AccessTokenState},
};
