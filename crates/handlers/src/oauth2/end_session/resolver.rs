// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use rpl_data_model::{Client, Clock, Ulid};
use rpl_storage::{BoxRepository, RepositoryAccess, RepositoryError};

/// The client which requested a logout, and the end-user if it is known
#[derive(Debug, Clone)]
pub(crate) struct ResolvedClient {
    pub client: Client,
    pub resource_owner_id: Option<Ulid>,
}

/// Find the client an `id_token_hint` was issued to.
///
/// Returns `None` if the token is unknown, no longer valid, or if its client
/// does not exist anymore.
pub(crate) async fn resolve(
    repo: &mut BoxRepository,
    clock: &impl Clock,
    id_token_hint: &str,
) -> Result<Option<ResolvedClient>, RepositoryError> {
    let Some(access_token) = repo
        .oauth2_access_token()
        .find_by_token(id_token_hint)
        .await?
    else {
        tracing::debug!("Unknown id_token_hint");
        return Ok(None);
    };

    if !access_token.is_valid(clock.now()) {
        tracing::debug!(access_token.id = %access_token.id, "id_token_hint is not valid anymore");
        return Ok(None);
    }

    let Some(client) = repo
        .oauth2_client()
        .lookup(access_token.client_id)
        .await?
    else {
        tracing::warn!(
            access_token.id = %access_token.id,
            client.id = %access_token.client_id,
            "id_token_hint was issued to a client which does not exist"
        );
        return Ok(None);
    };

    Ok(Some(ResolvedClient {
        client,
        resource_owner_id: access_token.resource_owner_id,
    }))
}

/// Find a client by its `client_id`. No end-user is known in that case.
pub(crate) async fn find_by_client_id(
    repo: &mut BoxRepository,
    client_id: &str,
) -> Result<Option<ResolvedClient>, RepositoryError> {
    let client = repo.oauth2_client().find_by_client_id(client_id).await?;

    Ok(client.map(|client| ResolvedClient {
        client,
        resource_owner_id: None,
    }))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rpl_data_model::clock::MockClock;

    use super::*;
    use crate::test_utils::{TestState, setup};

    #[tokio::test]
    async fn resolve_live_token() {
        setup();
        let state = TestState::new();
        let mut repo = state.repository().await.unwrap();

        let resolved = resolve(&mut repo, &state.clock, &state.web_token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.client, state.web_client);
        assert_eq!(resolved.resource_owner_id, Some(state.user_id));
    }

    #[tokio::test]
    async fn unknown_or_dead_tokens_do_not_resolve() {
        setup();
        let state = TestState::new();
        let mut repo = state.repository().await.unwrap();

        assert!(
            resolve(&mut repo, &state.clock, "unknown")
                .await
                .unwrap()
                .is_none()
        );

        assert!(
            resolve(&mut repo, &state.clock, &state.revoked_token)
                .await
                .unwrap()
                .is_none()
        );

        // Tokens expire after an hour
        let clock = MockClock::default();
        clock.advance(Duration::hours(2));
        assert!(
            resolve(&mut repo, &clock, &state.web_token)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn token_of_a_missing_client() {
        setup();
        let state = TestState::new();
        let mut repo = state.repository().await.unwrap();

        assert!(
            resolve(&mut repo, &state.clock, &state.orphan_token)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn lookup_by_client_id() {
        setup();
        let state = TestState::new();
        let mut repo = state.repository().await.unwrap();

        let resolved = find_by_client_id(&mut repo, &state.native_client.client_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.client, state.native_client);
        assert_eq!(resolved.resource_owner_id, None);

        assert!(
            find_by_client_id(&mut repo, "unknown")
                .await
                .unwrap()
                .is_none()
        );
    }
}
