// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard},
};

use async_trait::async_trait;
use rpl_data_model::{AccessToken, Client};
use rpl_storage::{
    BoxRepository, BoxRepositoryFactory, RepositoryAccess, RepositoryError, RepositoryFactory,
    oauth2::{OAuth2AccessTokenRepository, OAuth2ClientRepository},
};
use ulid::Ulid;

use crate::{
    MemoryStorageError,
    oauth2::{MemoryOAuth2AccessTokenRepository, MemoryOAuth2ClientRepository},
};

#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub(crate) clients: BTreeMap<Ulid, Client>,
    pub(crate) access_tokens: BTreeMap<Ulid, AccessToken>,
}

pub(crate) fn read(
    state: &RwLock<MemoryState>,
) -> Result<RwLockReadGuard<'_, MemoryState>, RepositoryError> {
    state
        .read()
        .map_err(|_| RepositoryError::from_error(MemoryStorageError::Poisoned))
}

/// An implementation of the [`RepositoryFactory`] trait backed by a shared
/// in-memory state.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepositoryFactory {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryRepositoryFactory {
    /// Create a new, empty [`MemoryRepositoryFactory`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Box the factory
    #[must_use]
    pub fn boxed(self) -> BoxRepositoryFactory {
        Box::new(self)
    }

    /// Get a repository reading from this factory's state
    #[must_use]
    pub fn repository(&self) -> MemoryRepository {
        MemoryRepository {
            state: Arc::clone(&self.state),
        }
    }

    /// Register a client
    ///
    /// # Errors
    ///
    /// Returns an error if a client with the same ID or client ID exists, or
    /// if the lock is poisoned
    pub fn add_client(&self, client: Client) -> Result<(), MemoryStorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| MemoryStorageError::Poisoned)?;

        if state.clients.contains_key(&client.id)
            || state
                .clients
                .values()
                .any(|c| c.client_id == client.client_id)
        {
            return Err(MemoryStorageError::Duplicate(client.client_id));
        }

        tracing::debug!(client.id = %client.id, client.client_id = %client.client_id, "Adding client");
        state.clients.insert(client.id, client);
        Ok(())
    }

    /// Register an access token
    ///
    /// # Errors
    ///
    /// Returns an error if the token already exists, or if the lock is
    /// poisoned
    pub fn add_access_token(&self, access_token: AccessToken) -> Result<(), MemoryStorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| MemoryStorageError::Poisoned)?;

        if state.access_tokens.contains_key(&access_token.id)
            || state
                .access_tokens
                .values()
                .any(|t| t.access_token == access_token.access_token)
        {
            return Err(MemoryStorageError::Duplicate(access_token.id.to_string()));
        }

        tracing::debug!(access_token.id = %access_token.id, client.id = %access_token.client_id, "Adding access token");
        state.access_tokens.insert(access_token.id, access_token);
        Ok(())
    }
}

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    async fn create(&self) -> Result<BoxRepository, RepositoryError> {
        Ok(self.repository().boxed())
    }
}

/// An implementation of the [`RepositoryAccess`] trait backed by the shared
/// in-memory state.
#[derive(Debug)]
pub struct MemoryRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryRepository {
    /// Transform the repository into a type-erased [`BoxRepository`]
    #[must_use]
    pub fn boxed(self) -> BoxRepository {
        Box::new(self)
    }
}

impl RepositoryAccess for MemoryRepository {
    type Error = RepositoryError;

    fn oauth2_client<'c>(
        &'c mut self,
    ) -> Box<dyn OAuth2ClientRepository<Error = Self::Error> + 'c> {
        Box::new(MemoryOAuth2ClientRepository::new(&self.state))
    }

    fn oauth2_access_token<'c>(
        &'c mut self,
    ) -> Box<dyn OAuth2AccessTokenRepository<Error = Self::Error> + 'c> {
        Box::new(MemoryOAuth2AccessTokenRepository::new(&self.state))
    }
}
