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

//! Defines the hierarchy of error types for the orchestration core.

use crate::project::ProjectId;
use std::fmt;

/// A failure surfaced by the orchestrator to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A batch submission would exceed the admission limit. Rejected
    /// atomically with zero side effects; the caller recovers by reducing
    /// the batch or enabling the override.
    AdmissionLimitExceeded {
        /// The registry size the batch would have produced.
        attempted: usize,
        /// The configured admission limit.
        limit: usize,
    },
    /// Acquiring an engine binding, rendering surface, or audio sink failed.
    /// Terminal for the affected instance.
    EngineAcquisition(String),
    /// The engine rejected the project binary. Terminal for the affected
    /// instance.
    ProjectLoad(String),
    /// An id-keyed operation named a project the registry does not hold.
    UnknownProject(ProjectId),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::AdmissionLimitExceeded { attempted, limit } => {
                write!(
                    f,
                    "Admission limit exceeded: batch would raise the instance count to {attempted}, limit is {limit}"
                )
            }
            HostError::EngineAcquisition(msg) => {
                write!(f, "Engine resource acquisition failed: {msg}")
            }
            HostError::ProjectLoad(msg) => {
                write!(f, "Project load failed: {msg}")
            }
            HostError::UnknownProject(id) => {
                write!(f, "Unknown project: {id}")
            }
        }
    }
}

impl std::error::Error for HostError {}

/// One resource that failed to release during a disposal sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisposalFailure {
    /// The project whose instance was being disposed, when known.
    pub project: Option<ProjectId>,
    /// Which resource failed to release (`"audio sink"`, `"surface"`, ...).
    pub resource: &'static str,
    /// The underlying failure description.
    pub message: String,
}

impl fmt::Display for DisposalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.project {
            Some(id) => write!(f, "{id}: {} release failed: {}", self.resource, self.message),
            None => write!(f, "{} release failed: {}", self.resource, self.message),
        }
    }
}

/// The collected outcome of a disposal sweep.
///
/// Disposal failures are collected, never thrown, so a registry-wide sweep
/// always runs to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisposalReport {
    /// Every release failure observed during the sweep.
    pub failures: Vec<DisposalFailure>,
}

impl DisposalReport {
    /// Returns `true` if every resource released cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Records a failure against an unattributed resource.
    pub fn record(&mut self, resource: &'static str, message: String) {
        self.failures.push(DisposalFailure {
            project: None,
            resource,
            message,
        });
    }

    /// Merges another report, attributing its failures to `project`.
    pub fn absorb(&mut self, project: &ProjectId, mut other: DisposalReport) {
        for failure in &mut other.failures {
            failure.project.get_or_insert_with(|| project.clone());
        }
        self.failures.extend(other.failures);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission_error_display() {
        let err = HostError::AdmissionLimitExceeded {
            attempted: 16,
            limit: 15,
        };
        assert_eq!(
            format!("{err}"),
            "Admission limit exceeded: batch would raise the instance count to 16, limit is 15"
        );
    }

    #[test]
    fn acquisition_and_load_display() {
        let err = HostError::EngineAcquisition("no contexts left".to_string());
        assert_eq!(
            format!("{err}"),
            "Engine resource acquisition failed: no contexts left"
        );

        let err = HostError::ProjectLoad("not a project container".to_string());
        assert_eq!(format!("{err}"), "Project load failed: not a project container");
    }

    #[test]
    fn disposal_report_absorbs_with_attribution() {
        let id = ProjectId::generate("p.sb3", 1);
        let mut inner = DisposalReport::default();
        inner.record("surface", "context already lost".to_string());

        let mut outer = DisposalReport::default();
        outer.absorb(&id, inner);

        assert!(!outer.is_clean());
        assert_eq!(outer.failures.len(), 1);
        assert_eq!(outer.failures[0].project.as_ref(), Some(&id));
        assert!(format!("{}", outer.failures[0]).contains("surface release failed"));
    }

    #[test]
    fn empty_report_is_clean() {
        assert!(DisposalReport::default().is_clean());
    }
}
