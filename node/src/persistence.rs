// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! Durable store: one JSON snapshot record per replica.
//!
//! The whole state is rewritten after every mutation. O(state size) per
//! call, which is the intended trade-off at this scale; the write happens
//! inside the owning loop's critical section.

use std::path::{Path, PathBuf};

use ripple_core::snapshot::{decode_state, encode_state};
use ripple_core::state::FeedState;

use crate::errors::NodeResult;

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the full state and atomically replace the on-disk record.
    pub fn save(&self, state: &FeedState, server_id: &str) -> NodeResult<()> {
        let bytes = encode_state(state, server_id)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, &bytes)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Read the persisted record if one exists. A missing file means a
    /// fresh start; a present-but-unreadable file is an error the caller
    /// treats as fatal at startup.
    pub fn load(&self) -> NodeResult<Option<FeedState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read(&self.path)?;
        Ok(Some(decode_state(&data)?))
    }
}
