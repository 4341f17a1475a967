// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Requests received by the provider.

use serde::{Deserialize, Serialize};

/// The parameters of an [RP-Initiated Logout] request.
///
/// Every parameter is optional. Empty values are treated the same as absent
/// ones, which is what the getters return.
///
/// [RP-Initiated Logout]: https://openid.net/specs/openid-connect-rpinitiated-1_0.html#RPLogout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpInitiatedLogoutRequest {
    /// A previously issued token, used as a hint about the client and the
    /// end-user whose session is being ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token_hint: Option<String>,

    /// The URL to which the end-user should be redirected after the logout.
    ///
    /// This is kept as the raw string sent by the client, so that it can be
    /// sent back byte-for-byte.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_logout_redirect_uri: Option<String>,

    /// Opaque value passed back to the client in the redirect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// The identifier of the client requesting the logout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl RpInitiatedLogoutRequest {
    /// The `id_token_hint`, if one was given.
    #[must_use]
    pub fn id_token_hint(&self) -> Option<&str> {
        non_empty(self.id_token_hint.as_ref())
    }

    /// The raw `post_logout_redirect_uri`, if one was given.
    #[must_use]
    pub fn post_logout_redirect_uri(&self) -> Option<&str> {
        non_empty(self.post_logout_redirect_uri.as_ref())
    }

    /// The `state`, if one was given.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        non_empty(self.state.as_ref())
    }

    /// The `client_id`, if one was given.
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        non_empty(self.client_id.as_ref())
    }
}
