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

//! The project data model: ingestion sources, immutable records, and ids.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// An opaque, unique token identifying one loaded project.
///
/// Generated at ingestion time from the project name, its modification
/// timestamp, and a random component, so two files with the same name (or
/// even the same bytes) still get distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(Arc<str>);

impl ProjectId {
    /// Generates a fresh id for a project with the given name and
    /// modification timestamp.
    #[must_use]
    pub fn generate(name: &str, last_modified: u64) -> Self {
        ProjectId(format!("{name}-{last_modified}-{}", Uuid::new_v4()).into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The raw form of a project as supplied by the caller, before an identity
/// has been assigned.
#[derive(Debug, Clone)]
pub struct ProjectSource {
    /// Display name, typically the filename.
    pub name: String,
    /// The opaque project binary. The orchestrator never interprets it.
    pub binary: Arc<[u8]>,
    /// Modification timestamp in milliseconds since the epoch.
    pub last_modified: u64,
}

impl ProjectSource {
    /// Creates a source from a name, raw bytes, and a modification timestamp.
    pub fn new(name: impl Into<String>, binary: impl Into<Arc<[u8]>>, last_modified: u64) -> Self {
        Self {
            name: name.into(),
            binary: binary.into(),
            last_modified,
        }
    }
}

/// An accepted project. Immutable once created; owned by the registry for
/// the lifetime of its instance.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    /// Unique identity assigned at ingestion.
    pub id: ProjectId,
    /// Display name, typically the filename.
    pub name: String,
    /// The opaque project binary.
    pub binary: Arc<[u8]>,
    /// Size of the binary in bytes.
    pub size: u64,
    /// Modification timestamp in milliseconds since the epoch.
    pub last_modified: u64,
}

impl ProjectRecord {
    /// Ingests a source, assigning it a fresh identity.
    #[must_use]
    pub fn ingest(source: ProjectSource) -> Self {
        let id = ProjectId::generate(&source.name, source.last_modified);
        let size = source.binary.len() as u64;
        Self {
            id,
            name: source.name,
            binary: source.binary,
            size,
            last_modified: source.last_modified,
        }
    }
}
