// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use rpl_data_model::{Client, LogoutPolicy, PostLogoutRedirectUri};
use thiserror::Error;

/// Why a logout request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LogoutRejection {
    #[error("post_logout_redirect_uri is not a valid absolute URI")]
    InvalidUri,

    #[error("post_logout_redirect_uri must use https")]
    SslRequired,

    #[error("post_logout_redirect_uri is not registered for this client")]
    RedirectUriMismatch,

    #[error("post_logout_redirect_uri points to a domain which is not allowed")]
    DomainNotAllowed,

    #[error("an id_token_hint is required along with a post_logout_redirect_uri")]
    IdTokenHintRequired,

    #[error("id_token_hint and client_id identify different clients")]
    ClientMismatch,
}

impl LogoutRejection {
    /// The machine-readable reason code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidUri => "invalid_uri",
            Self::SslRequired => "ssl_required",
            Self::RedirectUriMismatch => "redirect_uri_mismatch",
            Self::DomainNotAllowed => "domain_not_allowed",
            Self::IdTokenHintRequired => "id_token_hint_required",
            Self::ClientMismatch => "client_mismatch",
        }
    }
}

/// The result of validating a `post_logout_redirect_uri`
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    /// The URI can be redirected to
    Accepted(PostLogoutRedirectUri),

    /// No URI was supplied, so there is nothing to redirect to
    NoRedirectUri,

    /// The URI must not be redirected to
    Rejected(LogoutRejection),
}

/// Check a raw `post_logout_redirect_uri` against the client which requested
/// the logout, if known, and the logout policy.
///
/// The accepted URI is returned as parsed, with its query and fragment
/// untouched.
#[must_use]
pub fn validate(
    raw_uri: Option<&str>,
    client: Option<&Client>,
    policy: &LogoutPolicy,
) -> ValidationOutcome {
    let Some(raw_uri) = raw_uri else {
        return ValidationOutcome::NoRedirectUri;
    };

    let uri: PostLogoutRedirectUri = match raw_uri.parse() {
        Ok(uri) => uri,
        Err(e) => {
            tracing::debug!(
                error = &e as &dyn std::error::Error,
                "Could not parse post_logout_redirect_uri"
            );
            return ValidationOutcome::Rejected(LogoutRejection::InvalidUri);
        }
    };

    if policy.require_id_token_hint && client.is_none() {
        return ValidationOutcome::Rejected(LogoutRejection::IdTokenHintRequired);
    }

    if policy.force_ssl_in_redirect_uri && uri.scheme() == "http" {
        return ValidationOutcome::Rejected(LogoutRejection::SslRequired);
    }

    if let Some(client) = client.filter(|client| !client.logout_redirect_uris().is_empty()) {
        if !client.is_logout_redirect_uri_registered(uri.url()) {
            return ValidationOutcome::Rejected(LogoutRejection::RedirectUriMismatch);
        }
    } else if !uri.is_custom_scheme() {
        let allowed = uri.host().is_some_and(|host| policy.is_host_allowed(host));
        if !allowed {
            return ValidationOutcome::Rejected(LogoutRejection::DomainNotAllowed);
        }
    }

    ValidationOutcome::Accepted(uri)
}
