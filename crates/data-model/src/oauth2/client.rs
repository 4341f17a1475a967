// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::Serialize;
use ulid::Ulid;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    pub id: Ulid,

    /// Client identifier
    pub client_id: String,

    /// Array of Redirection URI values used by the Client
    pub redirect_uris: Vec<Url>,

    /// Array of URLs supplied by the RP to which it MAY request that the
    /// End-User's User Agent be redirected after a logout has been performed
    pub post_logout_redirect_uris: Vec<Url>,
}

impl Client {
    /// The URIs this client may be redirected to after a logout.
    ///
    /// Clients which did not register any `post_logout_redirect_uris` fall
    /// back to their regular `redirect_uris`.
    #[must_use]
    pub fn logout_redirect_uris(&self) -> &[Url] {
        if self.post_logout_redirect_uris.is_empty() {
            &self.redirect_uris
        } else {
            &self.post_logout_redirect_uris
        }
    }

    /// Whether the given URI matches one of the logout redirect URIs of this
    /// client.
    #[must_use]
    pub fn is_logout_redirect_uri_registered(&self, uri: &Url) -> bool {
        uri_matches_one_of(uri, self.logout_redirect_uris())
    }

    #[doc(hidden)]
    pub fn samples(now: DateTime<Utc>, rng: &mut impl RngCore) -> Vec<Client> {
        vec![
            // A web client with dedicated logout URIs
            Self {
                id: Ulid::from_datetime_with_source(now.into(), rng),
                client_id: "client1".to_owned(),
                redirect_uris: vec![
                    Url::parse("https://client1.example.com/redirect").unwrap(),
                    Url::parse("https://client1.example.com/redirect2").unwrap(),
                ],
                post_logout_redirect_uris: vec![
                    Url::parse("https://client1.example.com/logged-out").unwrap(),
                ],
            },
            // A native client which only registered a redirect URI
            Self {
                id: Ulid::from_datetime_with_source(now.into(), rng),
                client_id: "client2".to_owned(),
                redirect_uris: vec![Url::parse("com.example.client2:/callback").unwrap()],
                post_logout_redirect_uris: Vec::new(),
            },
        ]
    }
}

/// The hosts that match the loopback interface.
const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "[::1]"];

/// Whether the given URI matches one of the registered URIs.
fn uri_matches_one_of(uri: &Url, registered_uris: &[Url]) -> bool {
    registered_uris
        .iter()
        .any(|registered| uri_matches(uri, registered))
}

/// Compare the scheme, authority and, if the registration has one, the path.
///
/// If the registered URI host is one of `localhost`, `127.0.0.1` or `[::1]`
/// and it has no explicit port, any port is accepted.
fn uri_matches(uri: &Url, registered: &Url) -> bool {
    if uri.scheme() != registered.scheme()
        || uri.host() != registered.host()
        || uri.username() != registered.username()
        || uri.password() != registered.password()
    {
        return false;
    }

    let any_port = registered.port().is_none()
        && LOCAL_HOSTS.contains(&registered.host_str().unwrap_or_default());
    if !any_port && uri.port_or_known_default() != registered.port_or_known_default() {
        return false;
    }

    let path_specific = !matches!(registered.path(), "" | "/");
    !path_specific || uri.path() == registered.path()
}
