//! Whole-snapshot persistence of [`GameState`].
//!
//! Snapshots are `bincode` (standard config) encodings of the state, stored
//! under the fixed key [`STATE_KEY`]. There is no versioning: an unreadable
//! snapshot is reported as a decode error and the host decides what to do.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::state::GameState;

pub const STATE_KEY: &str = "yahtzeeState";

/// Load/save collaborator for the tracker state.
pub trait StateStore {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<GameState>, StoreError>;
    fn save(&mut self, state: &GameState) -> Result<(), StoreError>;
}

pub fn encode_state(state: &GameState) -> Result<Vec<u8>, StoreError> {
    Ok(bincode::serde::encode_to_vec(state, bincode::config::standard())?)
}

pub fn decode_state(bytes: &[u8]) -> Result<GameState, StoreError> {
    let (state, _): (GameState, usize) =
        bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
    Ok(state)
}

/// Stores the snapshot as `<dir>/yahtzeeState.bin`.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STATE_KEY}.bin")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Result<Option<GameState>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => decode_state(&bytes).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        let bytes = encode_state(state)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write beside the target and rename so a crash never leaves half a snapshot.
        let staging = self.path.with_extension("bin.tmp");
        fs::write(&staging, bytes)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

/// In-process store holding the encoded snapshot, used by the simulator and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    snapshot: Option<Vec<u8>>,
    saves: usize,
    reject_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every save fails, for exercising hosts under storage loss.
    pub fn unavailable() -> Self {
        Self {
            reject_saves: true,
            ..Self::default()
        }
    }

    pub fn with_snapshot(bytes: Vec<u8>) -> Self {
        Self {
            snapshot: Some(bytes),
            ..Self::default()
        }
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn snapshot(&self) -> Option<&[u8]> {
        self.snapshot.as_deref()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<GameState>, StoreError> {
        self.snapshot.as_deref().map(decode_state).transpose()
    }

    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        if self.reject_saves {
            return Err(io::Error::other("memory store is unavailable").into());
        }
        self.snapshot = Some(encode_state(state)?);
        self.saves += 1;
        Ok(())
    }
}
