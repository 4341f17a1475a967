// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::ops::Deref;

use chrono::{DateTime, Utc};
use figment::Figment;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::Error as _};
use ulid::Ulid;

use crate::{
    ClientsConfig, ConfigurationSection, ConfigurationSectionExt, schema, util::error_on_field,
};

/// An access token loaded at startup. Such a token can be used as an
/// `id_token_hint` to identify its client on logout.
#[derive(JsonSchema, Serialize, Deserialize, Clone, Debug)]
pub struct TokenConfig {
    /// The opaque token value
    pub token: String,

    /// The client this token was issued to. Must be one of the configured
    /// clients.
    #[schemars(with = "schema::Ulid")]
    pub client_id: Ulid,

    /// The user this token was issued for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<schema::Ulid>")]
    pub resource_owner: Option<Ulid>,

    /// When the token stops being valid. Tokens without an expiration never
    /// expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// List of access tokens to load at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TokensConfig(#[schemars(with = "Vec::<TokenConfig>")] Vec<TokenConfig>);

impl TokensConfig {
    /// Returns true if all fields are at their default values
    pub(crate) fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for TokensConfig {
    type Target = Vec<TokenConfig>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for TokensConfig {
    type Item = TokenConfig;
    type IntoIter = std::vec::IntoIter<TokenConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl ConfigurationSection for TokensConfig {
    const PATH: Option<&'static str> = Some("tokens");

    fn validate(
        &self,
        figment: &Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        if self.0.is_empty() {
            return Ok(());
        }

        let clients = ClientsConfig::extract_or_default(figment)?;

        for (index, token) in self.0.iter().enumerate() {
            let index = index.to_string();

            if token.token.is_empty() {
                return Err(error_on_field::<Self>(
                    figment,
                    figment::Error::custom("token must not be empty"),
                    &[index.as_str(), "token"],
                )
                .into());
            }

            if !clients.iter().any(|c| c.client_id == token.client_id) {
                return Err(error_on_field::<Self>(
                    figment,
                    figment::Error::custom(format!("unknown client {}", token.client_id)),
                    &[index.as_str(), "client_id"],
                )
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use figment::{
        Figment, Jail,
        providers::{Format, Yaml},
    };

    use super::*;

    #[test]
    fn load_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r"
                    clients:
                      - client_id: 01GFWR28C4KNE04WG3HKXB7C9R
                    tokens:
                      - token: dev-token
                        client_id: 01GFWR28C4KNE04WG3HKXB7C9R
                        resource_owner: 01GFWR32NCQ12B8Z0J8CPXRRB6
                        expires_at: '2030-01-01T00:00:00Z'
                      - token: forever
                        client_id: 01GFWR28C4KNE04WG3HKXB7C9R
                ",
            )?;

            let figment = Figment::new().merge(Yaml::file("config.yaml"));
            let config = TokensConfig::extract(&figment).map_err(|e| e.to_string())?;

            assert_eq!(config.len(), 2);
            assert_eq!(config[0].token, "dev-token");
            assert!(config[0].resource_owner.is_some());
            assert!(config[0].expires_at.is_some());
            assert!(config[1].expires_at.is_none());

            Ok(())
        });
    }
}
