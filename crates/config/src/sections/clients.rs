// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::{collections::HashSet, ops::Deref};

use figment::Figment;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::Error as _};
use ulid::Ulid;
use url::Url;

use crate::{ConfigurationSection, schema, util::error_on_field};

/// An OAuth 2.0 client configuration
#[derive(JsonSchema, Serialize, Deserialize, Clone, Debug)]
pub struct ClientConfig {
    /// The client ID
    #[schemars(with = "schema::Ulid")]
    pub client_id: Ulid,

    /// List of allowed redirect URIs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirect_uris: Vec<Url>,

    /// List of allowed post-logout redirect URIs. When empty, the redirect
    /// URIs are used instead.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_logout_redirect_uris: Vec<Url>,
}

/// List of OAuth 2.0/OIDC clients config
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ClientsConfig(#[schemars(with = "Vec::<ClientConfig>")] Vec<ClientConfig>);

impl ClientsConfig {
    /// Returns true if all fields are at their default values
    pub(crate) fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for ClientsConfig {
    type Target = Vec<ClientConfig>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for ClientsConfig {
    type Item = ClientConfig;
    type IntoIter = std::vec::IntoIter<ClientConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl ConfigurationSection for ClientsConfig {
    const PATH: Option<&'static str> = Some("clients");

    fn validate(
        &self,
        figment: &Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        let mut seen = HashSet::new();
        for (index, client) in self.0.iter().enumerate() {
            let index = index.to_string();

            if !seen.insert(client.client_id) {
                return Err(error_on_field::<Self>(
                    figment,
                    figment::Error::custom(format!("duplicate client {}", client.client_id)),
                    &[index.as_str(), "client_id"],
                )
                .into());
            }

            let uris = client
                .redirect_uris
                .iter()
                .map(|uri| ("redirect_uris", uri))
                .chain(
                    client
                        .post_logout_redirect_uris
                        .iter()
                        .map(|uri| ("post_logout_redirect_uris", uri)),
                );

            for (field, uri) in uris {
                if uri.fragment().is_some() {
                    return Err(error_on_field::<Self>(
                        figment,
                        figment::Error::custom(format!(
                            "redirect URI {uri} must not contain a fragment"
                        )),
                        &[index.as_str(), field],
                    )
                    .into());
                }
            }
        }

        Ok(())
    }
}
