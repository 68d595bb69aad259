// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Admission control for batch submissions.
//!
//! Every live instance pins a rendering context, and hosts cap how many of
//! those can exist at once. The admission controller keeps the registry
//! under that ceiling unless the caller explicitly overrides it.

use medley_core::error::HostError;

/// The default ceiling on concurrently live instances.
///
/// Matches the typical host limit on concurrently live rendering contexts;
/// raising it requires reconfiguring the host, which the caller signals via
/// the override flag.
pub const DEFAULT_INSTANCE_LIMIT: usize = 15;

/// The admission rule applied to every batch submission.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionPolicy {
    /// Maximum registry size.
    pub limit: usize,
    /// When set, the limit is not enforced. Trusted, never verified.
    pub override_enabled: bool,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            limit: DEFAULT_INSTANCE_LIMIT,
            override_enabled: false,
        }
    }
}

impl AdmissionPolicy {
    /// Checks whether a batch of `incoming` records may join a registry
    /// currently holding `current` instances.
    ///
    /// Rejection carries the attempted total and the limit so the caller
    /// can report both.
    pub fn check(&self, current: usize, incoming: usize) -> Result<(), HostError> {
        let attempted = current + incoming;
        if !self.override_enabled && attempted > self.limit {
            return Err(HostError::AdmissionLimitExceeded {
                attempted,
                limit: self.limit,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_within_limit_is_admitted() {
        let policy = AdmissionPolicy::default();
        assert!(policy.check(0, 15).is_ok());
        assert!(policy.check(10, 5).is_ok());
    }

    #[test]
    fn batch_over_limit_is_rejected_with_counts() {
        let policy = AdmissionPolicy::default();
        let err = policy.check(0, 16).unwrap_err();
        assert_eq!(
            err,
            HostError::AdmissionLimitExceeded {
                attempted: 16,
                limit: 15
            }
        );

        let err = policy.check(14, 2).unwrap_err();
        assert_eq!(
            err,
            HostError::AdmissionLimitExceeded {
                attempted: 16,
                limit: 15
            }
        );
    }

    #[test]
    fn override_bypasses_the_limit() {
        let policy = AdmissionPolicy {
            limit: 15,
            override_enabled: true,
        };
        assert!(policy.check(0, 40).is_ok());
    }
}
