// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::net::SocketAddr;

use figment::Figment;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::Error as _};
use url::Url;

use crate::{ConfigurationSection, util::error_on_field};

fn default_listen() -> String {
    "[::]:8080".to_owned()
}

fn default_public_base() -> Url {
    Url::parse("http://localhost:8080/").unwrap()
}

/// Configuration related to the web server
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HttpConfig {
    /// Socket address to listen on
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Public URL base from where the service is reachable
    #[serde(default = "default_public_base")]
    pub public_base: Url,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            public_base: default_public_base(),
        }
    }
}

impl ConfigurationSection for HttpConfig {
    const PATH: Option<&'static str> = Some("http");

    fn validate(
        &self,
        figment: &Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        if let Err(e) = self.listen.parse::<SocketAddr>() {
            return Err(error_on_field::<Self>(
                figment,
                figment::Error::custom(format!("invalid socket address: {e}")),
                &["listen"],
            )
            .into());
        }

        if self.public_base.cannot_be_a_base() {
            return Err(error_on_field::<Self>(
                figment,
                figment::Error::custom("the public base must be a base URL"),
                &["public_base"],
            )
            .into());
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
    fn invalid_listen_address() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r"
                    http:
                      listen: 'localhost'
                ",
            )?;

            let figment = Figment::new().merge(Yaml::file("config.yaml"));
            let error = HttpConfig::extract(&figment).unwrap_err();
            assert!(error.to_string().contains("invalid socket address"));

            Ok(())
        });
    }
}
