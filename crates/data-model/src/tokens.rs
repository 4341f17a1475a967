// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use chrono::{DateTime, Utc};
use ulid::Ulid;

use crate::InvalidTransitionError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AccessTokenState {
    #[default]
    Valid,
    Revoked {
        revoked_at: DateTime<Utc>,
    },
}

impl AccessTokenState {
    fn revoke(self, revoked_at: DateTime<Utc>) -> Result<Self, InvalidTransitionError> {
        match self {
            Self::Valid => Ok(Self::Revoked { revoked_at }),
            Self::Revoked { .. } => Err(InvalidTransitionError),
        }
    }

    /// Returns `true` if the access token state is [`Valid`].
    ///
    /// [`Valid`]: AccessTokenState::Valid
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` if the access token state is [`Revoked`].
    ///
    /// [`Revoked`]: AccessTokenState::Revoked
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        matches!(self, Self::Revoked { .. })
    }
}

/// A token issued to a client, which the logout endpoint accepts as an
/// `id_token_hint`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub id: Ulid,
    pub state: AccessTokenState,

    /// The [`Client`] this token was issued to.
    ///
    /// [`Client`]: crate::Client
    pub client_id: Ulid,

    /// The end-user on whose behalf the token was issued, if any
    pub resource_owner_id: Option<Ulid>,

    pub access_token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Whether the access token is valid, i.e. not revoked and not expired
    ///
    /// # Parameters
    ///
    /// * `now` - The current time
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.state.is_valid() && !self.is_expired(now)
    }

    /// Whether the access token is expired
    ///
    /// Always returns `false` if the access token does not have an expiry time.
    ///
    /// # Parameters
    ///
    /// * `now` - The current time
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at < now,
            None => false,
        }
    }

    /// Mark the access token as revoked
    ///
    /// # Parameters
    ///
    /// * `revoked_at` - The time at which the access token was revoked
    ///
    /// # Errors
    ///
    /// Returns an error if the access token is already revoked
    pub fn revoke(mut self, revoked_at: DateTime<Utc>) -> Result<Self, InvalidTransitionError> {
        self.state = self.state.revoke(revoked_at)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Duration;

    use super::*;
    use crate::clock::{Clock, MockClock};

    fn token(now: DateTime<Utc>, expires_at: Option<DateTime<Utc>>) -> AccessToken {
        AccessToken {
            id: Ulid::nil(),
            state: AccessTokenState::Valid,
            client_id: Ulid::nil(),
            resource_owner_id: None,
            access_token: "hint".to_owned(),
            created_at: now,
            expires_at,
        }
    }

    #[test]
    fn expiry() {
        let clock = MockClock::default();
        let now = clock.now();

        let forever = token(now, None);
        let short = token(now, Some(now + Duration::minutes(5)));
        assert!(forever.is_valid(now));
        assert!(short.is_valid(now));

        clock.advance(Duration::minutes(10));
        assert!(forever.is_valid(clock.now()));
        assert!(short.is_expired(clock.now()));
        assert!(!short.is_valid(clock.now()));
    }

    #[test]
    fn revocation() {
        let clock = MockClock::default();
        let now = clock.now();

        let revoked = token(now, None).revoke(now).unwrap();
        assert!(revoked.state.is_revoked());
        assert!(!revoked.is_valid(now));

        // Revoking twice is not a valid transition
        assert_matches!(revoked.revoke(now), Err(InvalidTransitionError));
    }
}
