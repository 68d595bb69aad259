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

//! The instance registry: an arena of lifecycle controllers keyed by
//! project id.
//!
//! External callers hold ids, never controller references, so nothing can
//! dangle when an instance is disposed. Insertion order is preserved for
//! iteration and for the default-focus rule.

use std::collections::HashMap;

use medley_core::error::{DisposalReport, HostError};
use medley_core::platform::EnginePlatform;
use medley_core::project::{ProjectId, ProjectRecord, ProjectSource};

use crate::admission::AdmissionPolicy;
use crate::config::HostConfig;
use crate::instance::InstanceController;

/// Holds every live instance, keyed by project id.
#[derive(Default)]
pub struct InstanceRegistry {
    instances: HashMap<ProjectId, InstanceController>,
    order: Vec<ProjectId>,
}

impl InstanceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if no instances are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Returns `true` if an instance exists for `id`.
    #[must_use]
    pub fn contains(&self, id: &ProjectId) -> bool {
        self.instances.contains_key(id)
    }

    /// Project ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &ProjectId> {
        self.order.iter()
    }

    /// Looks up a controller.
    #[must_use]
    pub fn get(&self, id: &ProjectId) -> Option<&InstanceController> {
        self.instances.get(id)
    }

    /// Looks up a controller mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: &ProjectId) -> Option<&mut InstanceController> {
        self.instances.get_mut(id)
    }

    /// Admits a batch of project sources, creating and initializing one
    /// instance per source in input order.
    ///
    /// Admission is atomic: if the batch would exceed the policy's limit,
    /// the whole batch is rejected with zero side effects. Per-instance
    /// acquisition failures after admission are isolated — they surface as
    /// that instance's `Error` state and never abort the rest of the batch.
    pub fn submit_batch(
        &mut self,
        policy: &AdmissionPolicy,
        platform: &EnginePlatform,
        config: &HostConfig,
        sources: Vec<ProjectSource>,
    ) -> Result<Vec<ProjectRecord>, HostError> {
        policy.check(self.instances.len(), sources.len())?;

        let mut admitted = Vec::with_capacity(sources.len());
        for source in sources {
            let record = ProjectRecord::ingest(source);
            let mut controller =
                InstanceController::new(record.clone(), config.surface_size, config.auto_run);
            controller.initialize(platform);
            self.order.push(record.id.clone());
            self.instances.insert(record.id.clone(), controller);
            admitted.push(record);
        }
        log::info!(
            "admitted {} project(s), registry now holds {}",
            admitted.len(),
            self.instances.len()
        );
        Ok(admitted)
    }

    /// Disposes the instance for `id` and removes it from the registry.
    pub fn remove(&mut self, id: &ProjectId) -> Result<DisposalReport, HostError> {
        let mut controller = self
            .instances
            .remove(id)
            .ok_or_else(|| HostError::UnknownProject(id.clone()))?;
        self.order.retain(|other| other != id);
        let mut report = DisposalReport::default();
        report.absorb(id, controller.dispose());
        Ok(report)
    }

    /// Disposes every instance and empties the registry.
    ///
    /// Each disposal is independent: failures are collected into the
    /// returned report and never abort the sweep.
    pub fn clear(&mut self) -> DisposalReport {
        let mut report = DisposalReport::default();
        for (id, mut controller) in self.instances.drain() {
            report.absorb(&id, controller.dispose());
        }
        self.order.clear();
        log::info!("registry cleared");
        report
    }

    /// Issues a start signal to every live instance.
    ///
    /// Instances in `Error` or `Disposed` are silently skipped, never
    /// retried. Each dispatch is independent; a hung engine on one instance
    /// cannot delay the others.
    pub fn run_all(&mut self) {
        for controller in self.instances.values_mut() {
            if !controller.state().is_live() {
                log::trace!(
                    "{}: skipped by run_all in state {}",
                    controller.record().id,
                    controller.state()
                );
                continue;
            }
            controller.run();
        }
    }

    /// Issues a stop signal to every live instance. Skip rules match
    /// [`run_all`](Self::run_all).
    pub fn stop_all(&mut self) {
        for controller in self.instances.values_mut() {
            if !controller.state().is_live() {
                continue;
            }
            controller.stop();
        }
    }

    /// Applies pending engine events on every instance.
    pub fn pump_all(&mut self) {
        for controller in self.instances.values_mut() {
            controller.pump();
        }
    }
}
