// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::sync::RwLock;

use async_trait::async_trait;
use rpl_data_model::AccessToken;
use rpl_storage::{RepositoryError, oauth2::OAuth2AccessTokenRepository};
use ulid::Ulid;

use crate::repository::{MemoryState, read};

/// An implementation of [`OAuth2AccessTokenRepository`] for the in-memory
/// storage
pub struct MemoryOAuth2AccessTokenRepository<'c> {
    state: &'c RwLock<MemoryState>,
}

impl<'c> MemoryOAuth2AccessTokenRepository<'c> {
    pub(crate) fn new(state: &'c RwLock<MemoryState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl OAuth2AccessTokenRepository for MemoryOAuth2AccessTokenRepository<'_> {
    type Error = RepositoryError;

    #[tracing::instrument(
        name = "storage.oauth2_access_token.lookup",
        skip_all,
        fields(access_token.id = %id),
        err,
    )]
    async fn lookup(&mut self, id: Ulid) -> Result<Option<AccessToken>, Self::Error> {
        let state = read(self.state)?;
        Ok(state.access_tokens.get(&id).cloned())
    }

    #[tracing::instrument(
        name = "storage.oauth2_access_token.find_by_token",
        skip_all,
        err,
    )]
    async fn find_by_token(
        &mut self,
        access_token: &str,
    ) -> Result<Option<AccessToken>, Self::Error> {
        let state = read(self.state)?;
        Ok(state
            .access_tokens
            .values()
            .find(|token| token.access_token == access_token)
            .cloned())
    }
}
