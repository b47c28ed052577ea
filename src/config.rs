//! Where the roster and zone list come from.
//!
//! Resolution order: a TOML seed file, then a pair of CSV files, then the
//! built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SeedError;
use crate::model::{Person, Roster, Zone};
use crate::parser::{load_people, load_zones};
use crate::seed::{default_people, default_zones};

/// Contents of a TOML seed file:
///
/// ```toml
/// [[people]]
/// id = "alice"
/// name = "Alice"
///
/// [[zones]]
/// id = "z1"
/// label = "Shower(1)"
/// order = 1
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl SeedFile {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, SeedError> {
        toml::from_str(raw).map_err(|source| SeedError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Seed locations, usually filled from the command line
#[derive(Debug, Clone, Default)]
pub struct SeedOptions {
    pub seed: Option<PathBuf>,
    pub people_csv: Option<PathBuf>,
    pub zones_csv: Option<PathBuf>,
}

impl SeedOptions {
    pub fn load_roster(&self) -> Result<Roster, SeedError> {
        if let Some(path) = &self.seed {
            tracing::info!(path = %path.display(), "loading seed file");
            let file = SeedFile::load(path)?;
            return Roster::new(file.people, file.zones);
        }

        if let (Some(people), Some(zones)) = (&self.people_csv, &self.zones_csv) {
            tracing::info!(people = %people.display(), zones = %zones.display(), "loading CSV seed");
            return Roster::new(load_people(people)?, load_zones(zones)?);
        }

        Roster::new(default_people(), default_zones())
    }
}
