// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

/// Policy applied to `post_logout_redirect_uri` values, built once from the
/// configuration and shared with the handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutPolicy {
    /// Whether plain `http` redirect URIs are refused.
    pub force_ssl_in_redirect_uri: bool,

    /// Domains (and their subdomains) clients may be redirected to when no
    /// registered client could be determined.
    allowed_domains: Vec<String>,

    /// Whether a redirect URI requires the client to be identified.
    pub require_id_token_hint: bool,
}

impl Default for LogoutPolicy {
    fn default() -> Self {
        Self {
            force_ssl_in_redirect_uri: true,
            allowed_domains: Vec::new(),
            require_id_token_hint: false,
        }
    }
}

fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_matches('.').to_ascii_lowercase()
}

impl LogoutPolicy {
    /// Replace the allowed domains. Entries are lowercased and stripped of
    /// surrounding whitespace and dots.
    #[must_use]
    pub fn with_allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_domains = domains
            .into_iter()
            .map(|d| normalize_domain(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();
        self
    }

    /// The normalised allowed domains
    #[must_use]
    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    /// Whether the host is one of the allowed domains or a subdomain of one.
    #[must_use]
    pub fn is_host_allowed(&self, host: &str) -> bool {
        let host = normalize_domain(host);
        self.allowed_domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}
