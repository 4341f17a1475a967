// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

#![deny(clippy::future_not_send)]
#![allow(clippy::module_name_repetitions)]

pub mod error_reporting;
pub mod error_wrapper;

pub use axum;

pub use self::error_wrapper::ErrorWrapper;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
