// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::sync::RwLock;

use async_trait::async_trait;
use rpl_data_model::Client;
use rpl_storage::{RepositoryError, oauth2::OAuth2ClientRepository};
use ulid::Ulid;

use crate::repository::{MemoryState, read};

/// An implementation of [`OAuth2ClientRepository`] for the in-memory storage
pub struct MemoryOAuth2ClientRepository<'c> {
    state: &'c RwLock<MemoryState>,
}

impl<'c> MemoryOAuth2ClientRepository<'c> {
    pub(crate) fn new(state: &'c RwLock<MemoryState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl OAuth2ClientRepository for MemoryOAuth2ClientRepository<'_> {
    type Error = RepositoryError;

    #[tracing::instrument(
        name = "storage.oauth2_client.lookup",
        skip_all,
        fields(client.id = %id),
        err,
    )]
    async fn lookup(&mut self, id: Ulid) -> Result<Option<Client>, Self::Error> {
        let state = read(self.state)?;
        Ok(state.clients.get(&id).cloned())
    }

    #[tracing::instrument(
        name = "storage.oauth2_client.find_by_client_id",
        skip_all,
        fields(client.client_id = client_id),
        err,
    )]
    async fn find_by_client_id(&mut self, client_id: &str) -> Result<Option<Client>, Self::Error> {
        let state = read(self.state)?;
        Ok(state
            .clients
            .values()
            .find(|client| client.client_id == client_id)
            .cloned())
    }
}
