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

use medley_core::lifecycle::LifecycleState;
use medley_core::project::{ProjectId, ProjectSource};
use medley_core::surface::SurfaceSize;
use medley_host::{HostConfig, ProjectHost};
use medley_infra::headless_platform;

const PREVIEW: SurfaceSize = SurfaceSize::new(240, 180);
const EXCLUSIVE: SurfaceSize = SurfaceSize::new(320, 240);

fn source(name: &str) -> ProjectSource {
    ProjectSource::new(name, vec![0u8; 32], 1_700_000_000_000)
}

#[test]
fn opening_a_view_suspends_every_other_surface() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host
        .submit_batch(vec![source("a.sb3"), source("b.sb3"), source("c.sb3")])
        .unwrap();
    host.pump_events();

    host.open_exclusive_view(&admitted[1].id).unwrap();

    assert_eq!(host.exclusive_view(), Some(&admitted[1].id));
    assert_eq!(host.surface_dimensions(&admitted[0].id), None);
    assert_eq!(host.surface_dimensions(&admitted[2].id), None);
    assert_eq!(host.surface_dimensions(&admitted[1].id), Some(EXCLUSIVE));

    // Suspended instances stay loaded; only their surfaces are gone.
    assert_eq!(host.state_of(&admitted[0].id), Some(LifecycleState::Ready));
    assert_eq!(host.state_of(&admitted[2].id), Some(LifecycleState::Ready));
}

#[test]
fn closing_the_view_restores_exactly_what_was_suspended() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host
        .submit_batch(vec![source("a.sb3"), source("b.sb3"), source("c.sb3")])
        .unwrap();
    host.pump_events();

    host.open_exclusive_view(&admitted[1].id).unwrap();
    host.close_exclusive_view();

    assert_eq!(host.exclusive_view(), None);
    assert_eq!(host.surface_dimensions(&admitted[0].id), Some(PREVIEW));
    assert_eq!(host.surface_dimensions(&admitted[2].id), Some(PREVIEW));
    // The detailed instance returns to its previous dimensions.
    assert_eq!(host.surface_dimensions(&admitted[1].id), Some(PREVIEW));
}

#[test]
fn instances_without_a_surface_are_not_reacquired_on_close() {
    let (platform, hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let good = host.submit_batch(vec![source("a.sb3")]).unwrap();
    hooks.configure(|script| {
        script.fail_create_binding = Some("no contexts left".to_string());
    });
    let failed = host.submit_batch(vec![source("b.sb3")]).unwrap();
    hooks.configure(|script| script.fail_create_binding = None);
    host.pump_events();
    assert_eq!(host.state_of(&failed[0].id), Some(LifecycleState::Error));
    assert_eq!(host.surface_dimensions(&failed[0].id), None);

    host.open_exclusive_view(&good[0].id).unwrap();
    host.close_exclusive_view();

    // The failed instance never had a surface to give up, so none comes back.
    assert_eq!(host.surface_dimensions(&failed[0].id), None);
    assert_eq!(host.surface_dimensions(&good[0].id), Some(PREVIEW));
}

#[test]
fn newcomers_join_suspended_while_a_view_is_open() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let first = host.submit_batch(vec![source("a.sb3")]).unwrap();
    host.pump_events();
    host.open_exclusive_view(&first[0].id).unwrap();

    let newcomer = host.submit_batch(vec![source("b.sb3")]).unwrap();
    assert_eq!(host.surface_dimensions(&newcomer[0].id), None);

    host.close_exclusive_view();
    assert_eq!(host.surface_dimensions(&newcomer[0].id), Some(PREVIEW));
}

#[test]
fn switching_views_closes_the_previous_one_first() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host
        .submit_batch(vec![source("a.sb3"), source("b.sb3"), source("c.sb3")])
        .unwrap();
    host.pump_events();

    host.open_exclusive_view(&admitted[0].id).unwrap();
    host.open_exclusive_view(&admitted[1].id).unwrap();

    assert_eq!(host.exclusive_view(), Some(&admitted[1].id));
    assert_eq!(host.surface_dimensions(&admitted[1].id), Some(EXCLUSIVE));
    assert_eq!(host.surface_dimensions(&admitted[0].id), None);
    assert_eq!(host.surface_dimensions(&admitted[2].id), None);

    // The first instance returns at preview size, not the exclusive size it
    // was enlarged to while detailed.
    host.close_exclusive_view();
    assert_eq!(host.surface_dimensions(&admitted[0].id), Some(PREVIEW));
    assert_eq!(host.surface_dimensions(&admitted[1].id), Some(PREVIEW));
}

#[test]
fn reopening_the_same_view_is_a_no_op() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host
        .submit_batch(vec![source("a.sb3"), source("b.sb3")])
        .unwrap();
    host.open_exclusive_view(&admitted[0].id).unwrap();
    host.open_exclusive_view(&admitted[0].id).unwrap();

    assert_eq!(host.exclusive_view(), Some(&admitted[0].id));
    assert_eq!(host.surface_dimensions(&admitted[0].id), Some(EXCLUSIVE));
    assert_eq!(host.surface_dimensions(&admitted[1].id), None);
}

#[test]
fn removing_the_detailed_instance_closes_the_view() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host
        .submit_batch(vec![source("a.sb3"), source("b.sb3")])
        .unwrap();
    host.pump_events();
    host.open_exclusive_view(&admitted[0].id).unwrap();
    assert_eq!(host.surface_dimensions(&admitted[1].id), None);

    host.remove(&admitted[0].id).unwrap();

    assert_eq!(host.exclusive_view(), None);
    assert_eq!(host.surface_dimensions(&admitted[1].id), Some(PREVIEW));
    assert_eq!(host.len(), 1);
}

#[test]
fn removing_a_suspended_instance_is_forgotten_by_the_view() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host
        .submit_batch(vec![source("a.sb3"), source("b.sb3"), source("c.sb3")])
        .unwrap();
    host.pump_events();
    host.open_exclusive_view(&admitted[0].id).unwrap();

    host.remove(&admitted[1].id).unwrap();
    host.close_exclusive_view();

    assert_eq!(host.len(), 2);
    assert_eq!(host.surface_dimensions(&admitted[2].id), Some(PREVIEW));
}

#[test]
fn opening_a_view_for_an_unknown_id_is_rejected() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());
    host.submit_batch(vec![source("a.sb3")]).unwrap();

    let foreign = ProjectId::generate("elsewhere.sb3", 7);
    let err = host.open_exclusive_view(&foreign).unwrap_err();
    assert!(matches!(
        err,
        medley_core::error::HostError::UnknownProject(_)
    ));
}
