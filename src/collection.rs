use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::args::HttpMethod;
use crate::error::CollectionError;

const COLLECTIONS_DIR: &str = ".apiprobe";
const COLLECTIONS_FILE: &str = "collections.json";
/// Default per-request timeout for saved requests, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// A serialized request that can be stored and replayed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRequest {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CollectionFile {
    #[serde(default)]
    requests: Vec<SavedRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// On-disk store for named requests. Lives at `~/.apiprobe/collections.json`
/// unless overridden.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    path: PathBuf,
}

impl CollectionStore {
    /// Resolves the collections file location.
    ///
    /// # Errors
    ///
    /// Returns an error when no override is given and no home directory can
    /// be determined.
    pub fn open(override_path: Option<&str>) -> Result<Self, CollectionError> {
        let path = match override_path {
            Some(path) => PathBuf::from(path),
            None => {
                let home = user_home_dir().ok_or(CollectionError::HomeDirUnavailable)?;
                home.join(COLLECTIONS_DIR).join(COLLECTIONS_FILE)
            }
        };
        Ok(Self { path })
    }

    /// Saves (or overwrites) a named request.
    ///
    /// # Errors
    ///
    /// Returns an error when the collections file cannot be read or written.
    pub fn save(&self, request: SavedRequest) -> Result<SaveOutcome, CollectionError> {
        let mut collection = self.load()?;
        let existing = collection
            .requests
            .iter_mut()
            .find(|saved| saved.name == request.name);
        let outcome = match existing {
            Some(slot) => {
                *slot = request;
                SaveOutcome::Updated
            }
            None => {
                collection.requests.push(request);
                SaveOutcome::Created
            }
        };
        self.persist(&collection)?;
        Ok(outcome)
    }

    /// Retrieves a saved request by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or no request with the
    /// given name exists.
    pub fn get(&self, name: &str) -> Result<SavedRequest, CollectionError> {
        let collection = self.load()?;
        collection
            .requests
            .into_iter()
            .find(|saved| saved.name == name)
            .ok_or_else(|| CollectionError::NotFound {
                name: name.to_owned(),
            })
    }

    /// Removes a saved request by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or written, or no
    /// request with the given name exists.
    pub fn delete(&self, name: &str) -> Result<(), CollectionError> {
        let mut collection = self.load()?;
        let before = collection.requests.len();
        collection.requests.retain(|saved| saved.name != name);
        if collection.requests.len() == before {
            return Err(CollectionError::NotFound {
                name: name.to_owned(),
            });
        }
        self.persist(&collection)
    }

    /// Returns all saved requests in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error when the collections file cannot be read.
    pub fn list(&self) -> Result<Vec<SavedRequest>, CollectionError> {
        Ok(self.load()?.requests)
    }

    fn load(&self) -> Result<CollectionFile, CollectionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(CollectionFile::default());
            }
            Err(err) => {
                return Err(CollectionError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };
        serde_json::from_str(&content).map_err(|err| CollectionError::Parse {
            path: self.path.clone(),
            source: err,
        })
    }

    fn persist(&self, collection: &CollectionFile) -> Result<(), CollectionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| CollectionError::CreateDir {
                path: parent.to_path_buf(),
                source: err,
            })?;
        }
        let data = serde_json::to_string_pretty(collection)
            .map_err(|err| CollectionError::Serialize { source: err })?;
        std::fs::write(&self.path, data).map_err(|err| CollectionError::Write {
            path: self.path.clone(),
            source: err,
        })
    }
}

fn user_home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(value) = std::env::var_os("USERPROFILE") {
            return Some(PathBuf::from(value));
        }
        let drive = std::env::var_os("HOMEDRIVE");
        let path = std::env::var_os("HOMEPATH");
        match (drive, path) {
            (Some(drive), Some(path)) => {
                let mut full = PathBuf::from(drive);
                full.push(path);
                return Some(full);
            }
            _ => {}
        }
    }

    if let Some(value) = std::env::var_os("HOME") {
        return Some(PathBuf::from(value));
    }

    None
}
