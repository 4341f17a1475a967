// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! In-memory implementations of the OAuth 2.0 repositories

mod access_token;
mod client;

pub use self::{
    access_token::MemoryOAuth2AccessTokenRepository, client::MemoryOAuth2ClientRepository,
};
