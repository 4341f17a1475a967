// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Error types returned by the endpoints.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A client error returned by an authorization server.
///
/// To construct this with a default description for the error code, use its
/// `From<ClientErrorCode>` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientError {
    /// The error code.
    pub error: ClientErrorCode,

    /// A human-readable description of the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<Cow<'static, str>>,
}

impl ClientError {
    /// Creates a new `ClientError` with the given error code and description.
    #[must_use]
    pub const fn new(error: ClientErrorCode, error_description: &'static str) -> Self {
        Self {
            error,
            error_description: Some(Cow::Borrowed(error_description)),
        }
    }

    /// Changes the description of this `ClientError` with the given `String`.
    #[must_use]
    pub fn with_description(mut self, description: String) -> Self {
        self.error_description = Some(Cow::Owned(description));
        self
    }
}

impl From<ClientErrorCode> for ClientError {
    fn from(error: ClientErrorCode) -> Self {
        let desc = error.default_description();
        Self::new(error, desc)
    }
}

/// Client error codes defined in OAuth2.0, OpenID Connect and their
/// extensions, restricted to the ones the logout endpoint emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientErrorCode {
    /// `invalid_request`
    ///
    /// The request is missing a required parameter, includes an invalid
    /// parameter value, includes a parameter more than once, or is otherwise
    /// malformed.
    InvalidRequest,

    /// `invalid_client`
    ///
    /// Client authentication failed.
    InvalidClient,

    /// `unauthorized_client`
    ///
    /// The authenticated client is not authorized to use this endpoint.
    UnauthorizedClient,

    /// `server_error`
    ///
    /// The authorization server encountered an unexpected condition that
    /// prevented it from fulfilling the request.
    ServerError,
}

impl ClientErrorCode {
    /// Get the default description for this `ClientErrorCode`.
    #[must_use]
    pub const fn default_description(&self) -> &'static str {
        match self {
            ClientErrorCode::InvalidRequest => {
                "The request is missing a required parameter, includes an invalid parameter value, includes a parameter more than once, or is otherwise malformed."
            }
            ClientErrorCode::InvalidClient => "Client authentication failed.",
            ClientErrorCode::UnauthorizedClient => {
                "The client is not authorized to request a logout using this method."
            }
            ClientErrorCode::ServerError => {
                "The authorization server encountered an unexpected condition that prevented it from fulfilling the request."
            }
        }
    }

    /// The error code as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ClientErrorCode::InvalidRequest => "invalid_request",
            ClientErrorCode::InvalidClient => "invalid_client",
            ClientErrorCode::UnauthorizedClient => "unauthorized_client",
            ClientErrorCode::ServerError => "server_error",
        }
    }
}

impl std::fmt::Display for ClientErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_utils::assert_serde_json;

    #[test]
    fn serialize_client_error() {
        let error = ClientError::from(ClientErrorCode::InvalidRequest)
            .with_description("post_logout_redirect_uri is not a valid URI".to_owned());

        assert_serde_json(
            &error,
            json!({
                "error": "invalid_request",
                "error_description": "post_logout_redirect_uri is not a valid URI",
            }),
        );
    }

    #[test]
    fn error_code_without_description() {
        let error = ClientError {
            error: ClientErrorCode::ServerError,
            error_description: None,
        };

        assert_serde_json(&error, json!({ "error": "server_error" }));
    }

    #[test]
    fn display_matches_wire_format() {
        for code in [
            ClientErrorCode::InvalidRequest,
            ClientErrorCode::InvalidClient,
            ClientErrorCode::UnauthorizedClient,
            ClientErrorCode::ServerError,
        ] {
            let wire = serde_json::to_value(code).unwrap();
            assert_eq!(wire, json!(code.to_string()));
        }
    }
}
