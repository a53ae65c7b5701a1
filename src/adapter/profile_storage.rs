use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use log::debug;

use crate::model::ProfileRecord;
use crate::Result;

/// Name of the profile file in the user home directory.
pub const PROFILE_FILE_NAME: &str = ".nem2rc.json";

/// Profile storage trait.
///
/// This trait defines how profiles are looked up. It must raise an error only
/// if the storage itself cannot be read, an unknown profile is `None`.
pub trait ProfileStorage {
    /// Get a profile by its name.
    fn get_profile(&self, name: &str) -> Result<Option<ProfileRecord>>;

    /// List the names of the stored profiles.
    fn profile_names(&self) -> Result<Vec<String>>;
}

/// Error raised when no profile file can be found.
#[derive(Debug, thiserror::Error)]
#[error("No profile found at '{0}', create a profile first.")]
pub struct NoProfileFile(pub PathBuf);

/// Profiles stored as a JSON object keyed by profile name.
#[derive(Debug, Clone)]
pub struct JsonFileProfileStorage {
    path: PathBuf,
}

impl JsonFileProfileStorage {
    /// Storage reading the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage reading the profile file in the user home directory.
    pub fn in_home_directory() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot locate the home directory."))?;

        Ok(Self::new(home.join(PROFILE_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_profiles(&self) -> Result<BTreeMap<String, ProfileRecord>> {
        debug!("Reading profiles from '{}'.", self.path.display());

        if !self.path.is_file() {
            return Err(anyhow!(NoProfileFile(self.path.clone())));
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read profile file '{}'.", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Profile file '{}' is malformed.", self.path.display()))
    }
}

impl ProfileStorage for JsonFileProfileStorage {
    fn get_profile(&self, name: &str) -> Result<Option<ProfileRecord>> {
        Ok(self.read_profiles()?.remove(name))
    }

    fn profile_names(&self) -> Result<Vec<String>> {
        Ok(self.read_profiles()?.into_keys().collect())
    }
}

/// A simple in-memory profile storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileStorage {
    profiles: BTreeMap<String, ProfileRecord>,
}

impl InMemoryProfileStorage {
    /// Add or replace a profile.
    pub fn insert(&mut self, name: impl Into<String>, profile: ProfileRecord) {
        self.profiles.insert(name.into(), profile);
    }
}

impl ProfileStorage for InMemoryProfileStorage {
    fn get_profile(&self, name: &str) -> Result<Option<ProfileRecord>> {
        Ok(self.profiles.get(name).cloned())
    }

    fn profile_names(&self) -> Result<Vec<String>> {
        Ok(self.profiles.keys().cloned().collect())
    }
}
