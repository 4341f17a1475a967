// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

mod client;
mod post_logout_redirect_uri;

pub use self::{
    client::Client,
    post_logout_redirect_uri::{InvalidPostLogoutRedirectUri, PostLogoutRedirectUri, QueryParameter},
};
