// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;

use crate::error::ApiError;

/// Invitation lifetime used when none is configured.
pub const DEFAULT_INVITATION_TTL_DAYS: i64 = 7;

/// Longest invitation lifetime that may be configured.
pub const MAX_INVITATION_TTL_DAYS: i64 = 365;

/// Tunable lifecycle settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    invitation_ttl: Duration,
}

impl LifecycleConfig {
    /// Creates a configuration with the given invitation lifetime.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if `days` is below 1 or above
    /// [`MAX_INVITATION_TTL_DAYS`].
    pub fn with_invitation_ttl_days(days: i64) -> Result<Self, ApiError> {
        if !(1..=MAX_INVITATION_TTL_DAYS).contains(&days) {
            return Err(ApiError::InvalidInput {
                field: String::from("invitation_ttl_days"),
                message: format!(
                    "Invitation lifetime must be between 1 and {MAX_INVITATION_TTL_DAYS} days, got {days}"
                ),
            });
        }

        Ok(Self {
            invitation_ttl: Duration::days(days),
        })
    }

    /// How long a freshly sent invitation stays redeemable.
    #[must_use]
    pub const fn invitation_ttl(&self) -> Duration {
        self.invitation_ttl
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            invitation_ttl: Duration::days(DEFAULT_INVITATION_TTL_DAYS),
        }
    }
}
