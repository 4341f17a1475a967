// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Repositories to interact with entities related to the OAuth 2.0 protocol

mod access_token;
mod client;

pub use self::{access_token::OAuth2AccessTokenRepository, client::OAuth2ClientRepository};
