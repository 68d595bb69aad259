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

use medley_core::input::KeyEvent;
use medley_core::project::{ProjectId, ProjectSource};
use medley_host::{HostConfig, ProjectHost};
use medley_infra::headless_platform;

fn source(name: &str) -> ProjectSource {
    ProjectSource::new(name, vec![0u8; 32], 1_700_000_000_000)
}

#[test]
fn first_admitted_instance_receives_focus() {
    let (platform, hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host
        .submit_batch(vec![source("a.sb3"), source("b.sb3")])
        .unwrap();
    host.pump_events();

    assert_eq!(host.focused(), Some(&admitted[0].id));
    let first = hooks.sink(0).unwrap();
    let second = hooks.sink(1).unwrap();
    assert_eq!(*first.gain.lock().unwrap(), 1.0);
    assert!(first.resumed.load(std::sync::atomic::Ordering::SeqCst));
    assert_eq!(*second.gain.lock().unwrap(), 0.0);
}

#[test]
fn later_batches_do_not_steal_focus() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let first = host.submit_batch(vec![source("a.sb3")]).unwrap();
    host.submit_batch(vec![source("b.sb3")]).unwrap();
    assert_eq!(host.focused(), Some(&first[0].id));
}

#[test]
fn focus_handoff_unfocuses_the_holder_first() {
    let (platform, hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host
        .submit_batch(vec![source("a.sb3"), source("b.sb3")])
        .unwrap();
    host.pump_events();

    // Press a key on the focused instance, then hand focus over.
    host.post_key(KeyEvent::down("ArrowUp"));
    let _ = hooks.log.take();
    host.request_focus(&admitted[1].id).unwrap();

    let muted = hooks.log.position("sink#0: gain 0").unwrap();
    let released = hooks.log.position("engine#0: key ArrowUp up").unwrap();
    let granted = hooks.log.position("sink#1: gain 1").unwrap();
    assert!(muted < granted, "old holder must be muted before the new one is unmuted");
    assert!(released < granted, "stuck keys must be released before the handoff completes");

    assert_eq!(host.focused(), Some(&admitted[1].id));
    let old = hooks.engine(0).unwrap();
    assert!(old.pressed.lock().unwrap().is_empty());
}

#[test]
fn refocusing_the_holder_is_a_no_op() {
    let (platform, hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host.submit_batch(vec![source("a.sb3")]).unwrap();
    let _ = hooks.log.take();
    host.request_focus(&admitted[0].id).unwrap();
    assert!(hooks.log.snapshot().is_empty());
}

#[test]
fn input_reaches_only_the_focused_instance() {
    let (platform, hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    host.submit_batch(vec![source("a.sb3"), source("b.sb3")])
        .unwrap();
    host.pump_events();
    host.post_key(KeyEvent::down("Space"));

    let focused = hooks.engine(0).unwrap();
    let other = hooks.engine(1).unwrap();
    assert_eq!(*focused.pressed.lock().unwrap(), vec!["Space".to_string()]);
    assert!(other.pressed.lock().unwrap().is_empty());
}

#[test]
fn removing_the_holder_clears_focus_without_reassignment() {
    let (platform, hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    let admitted = host
        .submit_batch(vec![source("a.sb3"), source("b.sb3")])
        .unwrap();
    host.remove(&admitted[0].id).unwrap();

    assert_eq!(host.focused(), None);
    let survivor = hooks.sink(1).unwrap();
    assert_eq!(*survivor.gain.lock().unwrap(), 0.0);
}

#[test]
fn clear_focus_leaves_no_instance_focused() {
    let (platform, hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    host.submit_batch(vec![source("a.sb3")]).unwrap();
    host.clear_focus();

    assert_eq!(host.focused(), None);
    let sink = hooks.sink(0).unwrap();
    assert_eq!(*sink.gain.lock().unwrap(), 0.0);
}

#[test]
fn resubmission_after_clear_focuses_the_newcomer() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());

    host.submit_batch(vec![source("a.sb3")]).unwrap();
    host.clear();
    assert_eq!(host.focused(), None);

    let fresh = host.submit_batch(vec![source("b.sb3")]).unwrap();
    assert_eq!(host.focused(), Some(&fresh[0].id));
}

#[test]
fn focus_requests_for_unknown_ids_are_rejected() {
    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, HostConfig::default());
    host.submit_batch(vec![source("a.sb3")]).unwrap();

    let foreign = ProjectId::generate("elsewhere.sb3", 7);
    let err = host.request_focus(&foreign).unwrap_err();
    assert!(matches!(
        err,
        medley_core::error::HostError::UnknownProject(_)
    ));
}
