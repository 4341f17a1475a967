// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Interactions with the storage backend
//!
//! This crate provides a set of traits that can be implemented to interact with
//! the storage backend. Those traits are called repositories and are grouped by
//! the type of data they manage.
//!
//! Each of those repositories can be accessed via the [`RepositoryAccess`]
//! trait. This trait can be wrapped in a [`BoxRepository`] to allow using it
//! without caring about the underlying storage backend, and without carrying
//! around the generic type parameter.
//!
//! The logout endpoint only ever reads from the storage: clients and tokens
//! are written by whatever issued them.
//!
//! Repository traits follow the same conventions:
//!
//!   1. They define an associated error type, and all functions are fallible
//!      and use that error type
//!   2. Lookups return a `Result<Option<T>, Self::Error>`, because 'not found'
//!      errors are usually cases that are handled differently
//!   3. All the methods use an `&mut self`. This ensures only one operation is
//!      done at a time on a single repository instance.

#![deny(clippy::future_not_send, missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod oauth2;
mod repository;

pub use rpl_data_model::clock::{self, BoxClock, Clock, SystemClock};

pub use self::repository::{
    BoxRepository, BoxRepositoryFactory, RepositoryAccess, RepositoryError, RepositoryFactory,
};
