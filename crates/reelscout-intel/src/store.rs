//! Profile persistence keyed by channel id.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::IntelError;
use crate::profile::ChannelProfile;

/// Key-value storage for channel profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// `Ok(None)` when nothing is stored for `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`IntelError`] when a stored value exists but cannot be read.
    async fn load(&self, channel: &str) -> Result<Option<ChannelProfile>, IntelError>;

    /// Replace the stored value for `profile.channel`.
    ///
    /// # Errors
    ///
    /// Returns [`IntelError`] when the value cannot be written.
    async fn save(&self, profile: &ChannelProfile) -> Result<(), IntelError>;
}

/// One pretty-printed JSON file per channel under a directory.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    dir: PathBuf,
}

impl FileProfileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding `channel`'s profile.
    ///
    /// Bytes outside `[A-Za-z0-9.-]`, including `_`, are written as `_xx`
    /// hex escapes, so distinct ids map to distinct files and no id can
    /// escape `dir`.
    #[must_use]
    pub fn path_for(&self, channel: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(channel)))
    }
}

fn file_stem(channel: &str) -> String {
    if channel.is_empty() {
        return "_".to_string();
    }
    let mut stem = String::with_capacity(channel.len());
    for b in channel.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-') {
            stem.push(char::from(b));
        } else {
            let _ = write!(stem, "_{b:02x}");
        }
    }
    stem
}

fn io_error(path: &Path, source: std::io::Error) -> IntelError {
    IntelError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn load(&self, channel: &str) -> Result<Option<ChannelProfile>, IntelError> {
        let path = self.path_for(channel);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };
        let profile = serde_json::from_str(&raw).map_err(|e| IntelError::Deserialize {
            context: path.display().to_string(),
            source: e,
        })?;
        Ok(Some(profile))
    }

    async fn save(&self, profile: &ChannelProfile) -> Result<(), IntelError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))?;

        let path = self.path_for(&profile.channel);
        let tmp = path.with_extension(format!("json.{:08x}.tmp", rand::random::<u32>()));
        let body = serde_json::to_string_pretty(profile)?;

        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error(&path, e));
        }
        Ok(())
    }
}

/// In-process store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, ChannelProfile>>,
}

impl MemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load(&self, channel: &str) -> Result<Option<ChannelProfile>, IntelError> {
        Ok(self.profiles.read().await.get(channel).cloned())
    }

    async fn save(&self, profile: &ChannelProfile) -> Result<(), IntelError> {
        self.profiles
            .write()
            .await
            .insert(profile.channel.clone(), profile.clone());
        Ok(())
    }
}
