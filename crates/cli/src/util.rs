// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use anyhow::Context;
use rand::Rng;
use rpl_config::{ClientsConfig, LogoutConfig, TokensConfig};
use rpl_data_model::{AccessToken, AccessTokenState, Client, Clock, LogoutPolicy};
use rpl_storage_memory::MemoryRepositoryFactory;
use ulid::Ulid;

pub fn logout_policy_from_config(config: &LogoutConfig) -> LogoutPolicy {
    let mut policy = LogoutPolicy::default().with_allowed_domains(&config.allowed_domains);
    policy.force_ssl_in_redirect_uri = config.force_ssl_in_redirect_uri;
    policy.require_id_token_hint = config.require_id_token_hint;
    policy
}

/// Build the in-memory store holding the clients and tokens declared in the
/// configuration
pub fn repository_factory_from_config(
    clients: &ClientsConfig,
    tokens: &TokensConfig,
    clock: &impl Clock,
    rng: &mut impl Rng,
) -> Result<MemoryRepositoryFactory, anyhow::Error> {
    let factory = MemoryRepositoryFactory::new();

    for client in clients.iter() {
        let client = Client {
            id: client.client_id,
            client_id: client.client_id.to_string(),
            redirect_uris: client.redirect_uris.clone(),
            post_logout_redirect_uris: client.post_logout_redirect_uris.clone(),
        };

        factory
            .add_client(client)
            .context("could not load client from config")?;
    }

    let now = clock.now();
    for token in tokens.iter() {
        let access_token = AccessToken {
            id: Ulid::from_datetime_with_source(now.into(), rng),
            state: AccessTokenState::Valid,
            client_id: token.client_id,
            resource_owner_id: token.resource_owner,
            access_token: token.token.clone(),
            created_at: now,
            expires_at: token.expires_at,
        };

        factory
            .add_access_token(access_token)
            .context("could not load access token from config")?;
    }

    tracing::info!(
        clients = clients.len(),
        tokens = tokens.len(),
        "Loaded clients and tokens from config"
    );

    Ok(factory)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use figment::{
        Figment, Jail,
        providers::{Format, Yaml},
    };
    use rand::SeedableRng;
    use rpl_config::{ConfigurationSection, RootConfig};
    use rpl_data_model::clock::MockClock;
    use rpl_storage::{RepositoryAccess, RepositoryFactory};

    use super::*;

    #[test]
    fn policy_from_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r"
                    logout:
                      force_ssl_in_redirect_uri: false
                      require_id_token_hint: true
                      allowed_domains:
                        - Allowed.Example
                ",
            )?;

            let figment = Figment::new().merge(Yaml::file("config.yaml"));
            let config = RootConfig::extract(&figment).map_err(|e| e.to_string())?;
            let policy = logout_policy_from_config(&config.logout);

            assert!(!policy.force_ssl_in_redirect_uri);
            assert!(policy.require_id_token_hint);
            assert_eq!(policy.allowed_domains(), ["allowed.example"]);

            Ok(())
        });
    }

    #[tokio::test]
    async fn store_from_config() {
        let figment = Figment::new().merge(Yaml::string(
            r"
                clients:
                  - client_id: 01GFWR28C4KNE04WG3HKXB7C9R
                    redirect_uris:
                      - 'http://localhost:3000'
                tokens:
                  - token: dev-token
                    client_id: 01GFWR28C4KNE04WG3HKXB7C9R
            ",
        ));
        let config = RootConfig::extract(&figment).unwrap();

        let clock = MockClock::default();
        let mut rng = rand_chacha::ChaChaRng::seed_from_u64(42);
        let factory =
            repository_factory_from_config(&config.clients, &config.tokens, &clock, &mut rng)
                .unwrap();

        let mut repo = factory.create().await.unwrap();
        let token = repo
            .oauth2_access_token()
            .find_by_token("dev-token")
            .await
            .unwrap()
            .unwrap();
        assert!(token.is_valid(clock.now()));

        let client = repo
            .oauth2_client()
            .lookup(token.client_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            client.id,
            Ulid::from_str("01GFWR28C4KNE04WG3HKXB7C9R").unwrap()
        );
        assert_eq!(client.client_id, "01GFWR28C4KNE04WG3HKXB7C9R");
        let uri = url::Url::parse("http://localhost:3000").unwrap();
        assert!(client.is_logout_redirect_uri_registered(&uri));
    }
}
