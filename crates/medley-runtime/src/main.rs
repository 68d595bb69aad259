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

//! Command-line runner: hosts every project named in a manifest on the
//! headless platform, starts them all, then tears everything down.

use std::fs;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};
use serde::Deserialize;

use medley_core::project::ProjectSource;
use medley_host::{HostConfig, ProjectHost};
use medley_infra::headless_platform;

/// One project entry in the manifest.
#[derive(Debug, Deserialize)]
struct ManifestProject {
    /// Display name; defaults to the file stem.
    name: Option<String>,
    /// Path to the project binary, relative to the manifest.
    path: PathBuf,
}

/// The manifest file driving a run.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    config: HostConfig,
    projects: Vec<ManifestProject>,
}

fn load_sources(manifest_dir: &std::path::Path, projects: &[ManifestProject]) -> Result<Vec<ProjectSource>> {
    let mut sources = Vec::with_capacity(projects.len());
    for project in projects {
        let path = manifest_dir.join(&project.path);
        let binary = fs::read(&path)
            .with_context(|| format!("failed to read project binary {}", path.display()))?;
        let name = match &project.name {
            Some(name) => name.clone(),
            None => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "untitled".to_string()),
        };
        let last_modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| modified.duration_since(UNIX_EPOCH).ok())
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);
        sources.push(ProjectSource::new(name, binary, last_modified));
    }
    Ok(sources)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let manifest_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("medley.json"));
    let manifest_text = fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read manifest {}", manifest_path.display()))?;
    let manifest: Manifest = serde_json::from_str(&manifest_text)
        .with_context(|| format!("failed to parse manifest {}", manifest_path.display()))?;

    let manifest_dir = manifest_path
        .parent()
        .map(std::path::Path::to_path_buf)
        .unwrap_or_default();
    let sources = load_sources(&manifest_dir, &manifest.projects)?;

    let (platform, _hooks) = headless_platform();
    let mut host = ProjectHost::new(platform, manifest.config);

    let admitted = host.submit_batch(sources)?;
    log::info!("Admitted {} project(s)", admitted.len());

    host.pump_events();
    for record in &admitted {
        if let Some(state) = host.state_of(&record.id) {
            log::info!("  {} [{}]: {}", record.name, record.id, state);
        }
        if let Some(error) = host.last_error_of(&record.id) {
            log::warn!("  {}: {}", record.name, error);
        }
    }

    host.run_all();
    host.pump_events();

    host.stop_all();
    host.pump_events();

    let report = host.clear();
    if !report.is_clean() {
        for failure in &report.failures {
            log::warn!("Disposal failure: {failure}");
        }
    }
    log::info!("All projects disposed");
    Ok(())
}
