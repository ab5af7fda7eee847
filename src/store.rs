use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::HolocronError;

pub const DEFAULT_CACHE_DIR: &str = ".holocron";

/// Process-local cache: one JSON blob per logical dataset (the root map and one
/// per entity collection). A non-empty file is trusted indefinitely.
#[derive(Debug, Clone)]
pub struct Store {
    root: Utf8PathBuf,
}

impl Store {
    pub fn with_root(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn ensure_root(&self) -> Result<(), HolocronError> {
        fs::create_dir_all(self.root.as_std_path())
            .map_err(|err| HolocronError::Filesystem(err.to_string()))
    }

    pub fn dataset_path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(format!("{name}.json"))
    }

    /// A missing or zero-length file is a cache miss, not an error; any other
    /// read or parse failure is fatal.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, HolocronError> {
        let path = self.dataset_path(name);
        let bytes = match fs::read(path.as_std_path()) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(HolocronError::CacheRead {
                    name: name.to_string(),
                    message: err.to_string(),
                });
            }
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        let value = serde_json::from_slice(&bytes).map_err(|err| HolocronError::CacheRead {
            name: name.to_string(),
            message: err.to_string(),
        })?;
        Ok(Some(value))
    }

    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), HolocronError> {
        let content = serde_json::to_vec(value).map_err(|err| HolocronError::CacheWrite {
            name: name.to_string(),
            message: err.to_string(),
        })?;
        self.ensure_root()?;
        let path = self.dataset_path(name);
        write_bytes_atomic(&path, &content).map_err(|err| HolocronError::CacheWrite {
            name: name.to_string(),
            message: err.to_string(),
        })
    }

    pub fn clear(&self) -> Result<(), HolocronError> {
        if self.root.as_std_path().exists() {
            fs::remove_dir_all(self.root.as_std_path())
                .map_err(|err| HolocronError::Filesystem(err.to_string()))?;
        }
        Ok(())
    }
}

pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_owned(),
        _ => Utf8PathBuf::from("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".holocron-write")
        .tempfile_in(parent.as_std_path())?;
    io::Write::write_all(&mut temp, content)?;
    if path.as_std_path().exists() {
        fs::remove_file(path.as_std_path())?;
    }
    temp.persist(path.as_std_path()).map_err(|err| err.error)?;
    Ok(())
}
