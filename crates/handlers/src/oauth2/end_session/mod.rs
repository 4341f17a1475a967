// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! The OIDC RP-initiated logout endpoint

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, Query};
use http::{HeaderValue, StatusCode, header::LOCATION};
use oauth2_types::{
    errors::{ClientError, ClientErrorCode},
    requests::RpInitiatedLogoutRequest,
};
use rpl_axum_utils::record_error;
use rpl_data_model::{BoxClock, Clock, LogoutPolicy};
use rpl_storage::BoxRepository;
use serde::Serialize;
use thiserror::Error;

use crate::{LogoutContext, LogoutHook, impl_from_error_for_route};

mod destination;
mod resolver;
mod validator;

pub use self::{
    destination::compose,
    validator::{LogoutRejection, ValidationOutcome, validate},
};

#[derive(Debug, Error)]
pub(crate) enum RouteError {
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error(transparent)]
    Rejected(#[from] LogoutRejection),
}

impl_from_error_for_route!(rpl_storage::RepositoryError);
impl_from_error_for_route!(http::header::InvalidHeaderValue);

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        record_error!(self, Self::Internal(_));
        match self {
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ClientError::from(ClientErrorCode::ServerError)),
            )
                .into_response(),

            Self::Rejected(rejection) => (
                StatusCode::BAD_REQUEST,
                Json(
                    ClientError::from(ClientErrorCode::InvalidRequest)
                        .with_description(format!("{}: {rejection}", rejection.code())),
                ),
            )
                .into_response(),
        }
    }
}

/// Body sent back when there is nowhere to redirect the end-user to
#[derive(Serialize)]
struct LoggedOut {
    logged_out: bool,
}

#[tracing::instrument(name = "handlers.oauth2.end_session.get", skip_all)]
pub(crate) async fn get(
    clock: BoxClock,
    mut repo: BoxRepository,
    State(policy): State<LogoutPolicy>,
    State(logout_hook): State<Arc<dyn LogoutHook>>,
    Query(params): Query<RpInitiatedLogoutRequest>,
) -> Result<Response, RouteError> {
    end_session(&clock, &mut repo, &policy, &*logout_hook, &params).await
}

#[tracing::instrument(name = "handlers.oauth2.end_session.post", skip_all)]
pub(crate) async fn post(
    clock: BoxClock,
    mut repo: BoxRepository,
    State(policy): State<LogoutPolicy>,
    State(logout_hook): State<Arc<dyn LogoutHook>>,
    Form(params): Form<RpInitiatedLogoutRequest>,
) -> Result<Response, RouteError> {
    end_session(&clock, &mut repo, &policy, &*logout_hook, &params).await
}

async fn end_session(
    clock: &impl Clock,
    repo: &mut BoxRepository,
    policy: &LogoutPolicy,
    logout_hook: &dyn LogoutHook,
    params: &RpInitiatedLogoutRequest,
) -> Result<Response, RouteError> {
    let hinted = match params.id_token_hint() {
        Some(id_token_hint) => resolver::resolve(repo, clock, id_token_hint).await?,
        None => None,
    };

    // A hint which does not resolve is not an error: the client-specific
    // checks are skipped and the policy applies
    let resolved = match (hinted, params.client_id()) {
        (Some(resolved), Some(client_id)) if resolved.client.client_id != client_id => {
            return Err(LogoutRejection::ClientMismatch.into());
        }
        (Some(resolved), _) => Some(resolved),
        (None, Some(client_id)) => resolver::find_by_client_id(repo, client_id).await?,
        (None, None) => None,
    };

    let client = resolved.as_ref().map(|resolved| &resolved.client);
    let location = match validate(params.post_logout_redirect_uri(), client, policy) {
        ValidationOutcome::Accepted(uri) => Some(compose(&uri, params.state())),
        ValidationOutcome::NoRedirectUri => None,
        ValidationOutcome::Rejected(rejection) => return Err(rejection.into()),
    };

    let location_header = location
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()?;

    let context = LogoutContext {
        client: client.cloned(),
        resource_owner_id: resolved.and_then(|resolved| resolved.resource_owner_id),
        redirect_to: location,
    };

    tracing::info!(
        client.id = context.client.as_ref().map(|client| tracing::field::display(client.id)),
        redirect = context.redirect_to.is_some(),
        "Accepted RP-initiated logout"
    );

    logout_hook.on_logout(&context).await;

    let response = match location_header {
        Some(location) => (StatusCode::FOUND, [(LOCATION, location)]).into_response(),
        None => (StatusCode::OK, Json(LoggedOut { logged_out: true })).into_response(),
    };

    Ok(response)
}
