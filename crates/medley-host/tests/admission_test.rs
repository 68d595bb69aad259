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

use medley_core::error::HostError;
use medley_core::project::ProjectSource;
use medley_host::{HostConfig, ProjectHost};
use medley_infra::headless_platform;

fn sources(count: usize) -> Vec<ProjectSource> {
    (0..count)
        .map(|i| ProjectSource::new(format!("project-{i}.sb3"), vec![0u8; 32], 1_700_000_000_000))
        .collect()
}

#[test]
fn batch_within_limit_is_admitted() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host.submit_batch(sources(3)).unwrap();
    assert_eq!(admitted.len(), 3);
    assert_eq!(host.len(), 3);

    // Insertion order is preserved.
    let ids: Vec<_> = host.ids().cloned().collect();
    assert_eq!(ids, admitted.iter().map(|r| r.id.clone()).collect::<Vec<_>>());
}

#[test]
fn batch_filling_the_limit_exactly_is_admitted() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    host.submit_batch(sources(15)).unwrap();
    assert_eq!(host.len(), 15);
}

#[test]
fn batch_exceeding_limit_is_rejected_atomically() {
    let (platform, hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    host.submit_batch(sources(10)).unwrap();
    assert_eq!(hooks.engine_count(), 10);

    let err = host.submit_batch(sources(6)).unwrap_err();
    assert_eq!(
        err,
        HostError::AdmissionLimitExceeded {
            attempted: 16,
            limit: 15
        }
    );

    // No partial admission: nothing was registered, no resources acquired.
    assert_eq!(host.len(), 10);
    assert_eq!(hooks.engine_count(), 10);
}

#[test]
fn override_bypasses_the_limit() {
    let (platform, _hooks) = headless_platform();
    let config = HostConfig {
        admission_override: true,
        ..Default::default()
    };
    let mut host = ProjectHost::new(platform, config);

    host.submit_batch(sources(20)).unwrap();
    assert_eq!(host.len(), 20);
}

#[test]
fn override_can_be_enabled_at_runtime() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    host.submit_batch(sources(15)).unwrap();
    assert!(host.submit_batch(sources(1)).is_err());

    host.set_admission_override(true);
    host.submit_batch(sources(1)).unwrap();
    assert_eq!(host.len(), 16);
}

#[test]
fn disposal_frees_admission_capacity() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host.submit_batch(sources(15)).unwrap();
    assert!(host.submit_batch(sources(1)).is_err());

    host.remove(&admitted[0].id).unwrap();
    host.submit_batch(sources(1)).unwrap();
    assert_eq!(host.len(), 15);
}
