// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::Parser;
use figment::Figment;
use rand::SeedableRng;
use rpl_config::{ConfigurationSection, RootConfig};
use rpl_data_model::SystemClock;
use rpl_handlers::{LogoutHook, NoopLogoutHook, TracingLogoutHook};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span};

use crate::{
    app_state::AppState,
    util::{logout_policy_from_config, repository_factory_from_config},
};

#[derive(Parser, Debug, Default)]
pub(super) struct Options {
    /// Do not log accepted logouts
    #[arg(long)]
    quiet_logouts: bool,
}

impl Options {
    pub async fn run(self, figment: &Figment) -> anyhow::Result<ExitCode> {
        let span = info_span!("cli.run.init").entered();
        let config = RootConfig::extract(figment).map_err(anyhow::Error::from_boxed)?;

        info!(version = env!("CARGO_PKG_VERSION"), "Starting up");

        let clock = SystemClock::default();
        // XXX: we should disallow SeedableRng::from_entropy
        let mut rng = rand_chacha::ChaChaRng::from_entropy();

        let repository_factory =
            repository_factory_from_config(&config.clients, &config.tokens, &clock, &mut rng)?;
        let logout_policy = logout_policy_from_config(&config.logout);

        let logout_hook: Arc<dyn LogoutHook> = if self.quiet_logouts {
            Arc::new(NoopLogoutHook)
        } else {
            Arc::new(TracingLogoutHook)
        };

        let state = AppState {
            repository_factory,
            logout_policy,
            logout_hook,
        };

        let router = rpl_handlers::oauth2_router()
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(&config.http.listen)
            .await
            .with_context(|| format!("could not bind to {}", config.http.listen))?;

        info!(
            listen = %config.http.listen,
            public_base = %config.http.public_base,
            "Listening for logout requests"
        );

        drop(span);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server failed")?;

        info!("Server stopped");

        Ok(ExitCode::SUCCESS)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(
            error = &e as &dyn std::error::Error,
            "Failed to listen for the shutdown signal"
        );
    }

    info!("Received shutdown signal, stopping");
}
