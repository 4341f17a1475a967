// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Schemes for which TLS and host-based checks apply. Anything else is a
/// custom scheme, typically registered by a native application.
const HTTP_SCHEMES: &[&str] = &["http", "https"];

#[derive(Debug, Error)]
pub enum InvalidPostLogoutRedirectUri {
    #[error("post_logout_redirect_uri contains characters which are not allowed in a URI")]
    ForbiddenCharacter,

    #[error("post_logout_redirect_uri is not a valid absolute URI")]
    Malformed(#[from] url::ParseError),

    #[error("post_logout_redirect_uri has no authority")]
    MissingAuthority,
}

/// One `key=value` segment of a query string.
///
/// The raw text is kept as-is so that untouched parameters are sent back
/// exactly as the client sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    raw: String,
    key: String,
}

impl QueryParameter {
    fn parse(raw: &str) -> Self {
        let key = form_urlencoded::parse(raw.as_bytes())
            .next()
            .map(|(key, _)| key.into_owned())
            .unwrap_or_default();

        Self {
            raw: raw.to_owned(),
            key,
        }
    }

    /// Build a new parameter, form-encoding the key and value
    #[must_use]
    pub fn new(key: &str, value: &str) -> Self {
        let raw = form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .finish();

        Self {
            raw,
            key: key.to_owned(),
        }
    }

    /// The decoded parameter name
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The parameter as it appears in the query string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// A `post_logout_redirect_uri` sent by a client.
///
/// Parsing goes through [`Url`] to make sure the string is a well-formed
/// absolute URI, but the components are kept as they were in the original
/// string: no normalisation of the host, path or query is applied, so the URI
/// can be sent back byte-for-byte in a `Location` header.
#[derive(Debug, Clone)]
pub struct PostLogoutRedirectUri {
    url: Url,
    scheme: String,
    authority: Option<String>,
    path: String,
    query: Vec<QueryParameter>,
    fragment: Option<String>,
}

impl PostLogoutRedirectUri {
    /// The parsed URL, used for matching against registered URIs and policies
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The scheme, lowercased
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Whether this URI uses a scheme other than `http` or `https`
    #[must_use]
    pub fn is_custom_scheme(&self) -> bool {
        !HTTP_SCHEMES.contains(&self.scheme())
    }

    /// The host, as normalised by the URL parser
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// The ordered query parameters
    #[must_use]
    pub fn query(&self) -> &[QueryParameter] {
        &self.query
    }

    /// Rebuild the URI with the given query parameters instead of the original
    /// ones. Everything else is left untouched.
    #[must_use]
    pub fn to_string_with_query(&self, query: &[QueryParameter]) -> String {
        let mut out = String::with_capacity(self.url.as_str().len());
        out.push_str(&self.scheme);
        out.push(':');
        if let Some(authority) = &self.authority {
            out.push_str("//");
            out.push_str(authority);
        }
        out.push_str(&self.path);

        for (i, parameter) in query.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(parameter.as_str());
        }

        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }

        out
    }
}

impl std::fmt::Display for PostLogoutRedirectUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string_with_query(&self.query))
    }
}

impl FromStr for PostLogoutRedirectUri {
    type Err = InvalidPostLogoutRedirectUri;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // The URL parser silently strips or rewrites those, which would make the
        // raw components disagree with what we validate. Non-ASCII characters
        // can't be sent back in a header either.
        if raw.chars().any(|c| !c.is_ascii_graphic() || c == '\\') {
            return Err(InvalidPostLogoutRedirectUri::ForbiddenCharacter);
        }

        let url = Url::parse(raw)?;

        // Guaranteed to be there by the URL parser
        let (scheme, rest) = raw
            .split_once(':')
            .ok_or(InvalidPostLogoutRedirectUri::Malformed(
                url::ParseError::RelativeUrlWithoutBase,
            ))?;

        let (rest, fragment) = match rest.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_owned())),
            None => (rest, None),
        };

        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, query),
            None => (rest, ""),
        };

        let (authority, path) = match rest.strip_prefix("//") {
            Some(rest) => {
                let end = rest.find('/').unwrap_or(rest.len());
                (Some(rest[..end].to_owned()), rest[end..].to_owned())
            }
            None => (None, rest.to_owned()),
        };

        // `https:example.com` is accepted by the URL parser, but we want the
        // host to be spelled out for HTTP URIs
        if HTTP_SCHEMES.contains(&url.scheme()) && authority.as_deref().is_none_or(str::is_empty) {
            return Err(InvalidPostLogoutRedirectUri::MissingAuthority);
        }

        let query = if query.is_empty() {
            Vec::new()
        } else {
            query.split('&').map(QueryParameter::parse).collect()
        };

        Ok(Self {
            url,
            scheme: scheme.to_owned(),
            authority,
            path,
            query,
            fragment,
        })
    }
}
