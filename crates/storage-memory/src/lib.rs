// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! An in-memory implementation of the storage traits.
//!
//! The store is seeded once at startup, from the configuration or from test
//! fixtures, and only read afterwards.

#![deny(clippy::future_not_send, missing_docs)]
#![allow(clippy::module_name_repetitions)]

use thiserror::Error;

pub mod oauth2;
mod repository;

pub use self::repository::{MemoryRepository, MemoryRepositoryFactory};

/// Errors raised by the in-memory storage
#[derive(Debug, Error)]
pub enum MemoryStorageError {
    /// A writer panicked while holding the lock
    #[error("the in-memory storage lock was poisoned")]
    Poisoned,

    /// An entity with the same identifier already exists
    #[error("duplicate entity {0}")]
    Duplicate(String),
}
