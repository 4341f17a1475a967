// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod clients;
mod http;
mod logout;
mod tokens;

pub use self::{
    clients::{ClientConfig, ClientsConfig},
    http::HttpConfig,
    logout::LogoutConfig,
    tokens::{TokenConfig, TokensConfig},
};
use crate::util::ConfigurationSection;

/// Application configuration root
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct RootConfig {
    /// Configuration of the HTTP server
    #[serde(default)]
    pub http: HttpConfig,

    /// Configuration of the RP-initiated logout endpoint
    #[serde(default, skip_serializing_if = "LogoutConfig::is_default")]
    pub logout: LogoutConfig,

    /// List of OAuth 2.0/OIDC clients config
    #[serde(default, skip_serializing_if = "ClientsConfig::is_default")]
    pub clients: ClientsConfig,

    /// List of access tokens to load at startup, for development purposes
    #[serde(default, skip_serializing_if = "TokensConfig::is_default")]
    pub tokens: TokensConfig,
}

impl ConfigurationSection for RootConfig {
    fn validate(
        &self,
        figment: &figment::Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        self.http.validate(figment)?;
        self.logout.validate(figment)?;
        self.clients.validate(figment)?;
        self.tokens.validate(figment)?;

        Ok(())
    }
}
