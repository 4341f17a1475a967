// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use figment::Figment;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::Error as _};

use crate::{ConfigurationSection, schema::Hostname, util::error_on_field};

const fn default_true() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_default_true(value: &bool) -> bool {
    *value == default_true()
}

const fn default_false() -> bool {
    false
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_default_false(value: &bool) -> bool {
    *value == default_false()
}

/// Configuration of the RP-initiated logout endpoint
#[derive(Clone, Debug, Deserialize, JsonSchema, Serialize)]
pub struct LogoutConfig {
    /// Whether `http` post-logout redirect URIs should be refused. Custom
    /// schemes are not affected. Defaults to `true`.
    #[serde(default = "default_true", skip_serializing_if = "is_default_true")]
    pub force_ssl_in_redirect_uri: bool,

    /// Domains a client without a registered redirect URI may send users back
    /// to. Subdomains of those domains are allowed as well.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schemars(with = "Vec<Hostname>")]
    pub allowed_domains: Vec<String>,

    /// Whether requests carrying a `post_logout_redirect_uri` must also carry
    /// an `id_token_hint` identifying the client. Defaults to `false`.
    #[serde(default = "default_false", skip_serializing_if = "is_default_false")]
    pub require_id_token_hint: bool,
}

impl Default for LogoutConfig {
    fn default() -> Self {
        Self {
            force_ssl_in_redirect_uri: default_true(),
            allowed_domains: Vec::new(),
            require_id_token_hint: default_false(),
        }
    }
}

impl LogoutConfig {
    /// Returns true if the configuration is the default one
    pub(crate) fn is_default(&self) -> bool {
        is_default_true(&self.force_ssl_in_redirect_uri)
            && self.allowed_domains.is_empty()
            && is_default_false(&self.require_id_token_hint)
    }
}

impl ConfigurationSection for LogoutConfig {
    const PATH: Option<&'static str> = Some("logout");

    fn validate(
        &self,
        figment: &Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        for (index, domain) in self.allowed_domains.iter().enumerate() {
            let index = index.to_string();
            let domain = domain.trim().trim_matches('.');

            let error = if domain.is_empty() {
                Some("allowed domains must not be empty")
            } else if domain.contains("://") || domain.contains(['/', '?', '#', '@']) {
                Some("allowed domains must be bare host names, without scheme or path")
            } else {
                None
            };

            if let Some(error) = error {
                return Err(error_on_field::<Self>(
                    figment,
                    figment::Error::custom(error),
                    &["allowed_domains", index.as_str()],
                )
                .into());
            }
        }

        Ok(())
    }
}
