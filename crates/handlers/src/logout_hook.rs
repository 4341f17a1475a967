// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Hooks invoked when an end-user logs out through the RP-initiated logout
//! endpoint.

use async_trait::async_trait;
use rpl_data_model::{Client, Ulid};

/// What is known about a logout when the hook runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoutContext {
    /// The client which requested the logout, if it could be identified
    pub client: Option<Client>,

    /// The end-user whose session is ending, if the token hint named one
    pub resource_owner_id: Option<Ulid>,

    /// Where the end-user is about to be sent, if anywhere
    pub redirect_to: Option<String>,
}

/// A hook run once per accepted logout, after the redirect location is known
/// and before the response is sent
#[async_trait]
pub trait LogoutHook: Send + Sync {
    /// Called with the details of the logout. There is no way for the hook to
    /// affect the response.
    async fn on_logout(&self, context: &LogoutContext);
}

/// A [`LogoutHook`] which does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogoutHook;

#[async_trait]
impl LogoutHook for NoopLogoutHook {
    async fn on_logout(&self, _context: &LogoutContext) {}
}

/// A [`LogoutHook`] which records every logout as a tracing event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogoutHook;

#[async_trait]
impl LogoutHook for TracingLogoutHook {
    async fn on_logout(&self, context: &LogoutContext) {
        tracing::info!(
            client.id = context.client.as_ref().map(|client| tracing::field::display(client.id)),
            client.client_id = context.client.as_ref().map(|client| client.client_id.as_str()),
            user.id = context.resource_owner_id.map(tracing::field::display),
            redirect_to = context.redirect_to.as_deref(),
            "End-user logged out",
        );
    }
}
