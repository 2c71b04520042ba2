//! Leaderboard CSV store
//!
//! Writes go to a temporary file in the destination directory which is then
//! renamed over the leaderboard, so readers never see a partial file.

use crate::tables::{parse_leaderboard, render_leaderboard};
use async_trait::async_trait;
use graph_challenge_application::{ApplicationResult, LeaderboardStore};
use graph_challenge_domain::{LeaderboardRow, StoreError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, instrument};

/// Leaderboard stored as a `rank,score` CSV file
#[derive(Debug, Clone)]
pub struct FsLeaderboardStore {
    path: PathBuf,
}

impl FsLeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, contents: &[u8]) -> Result<(), StoreError> {
        let io_error = |e: std::io::Error| StoreError::from_io(&self.path, e);

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(io_error)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
        tmp.write_all(contents).map_err(io_error)?;
        tmp.as_file().sync_all().map_err(io_error)?;
        tmp.persist(&self.path).map_err(|e| io_error(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl LeaderboardStore for FsLeaderboardStore {
    #[instrument(skip(self, rows), fields(path = %self.path.display(), rows = rows.len()))]
    async fn write_rows(&self, rows: &[LeaderboardRow], precision: u32) -> ApplicationResult<()> {
        let contents = render_leaderboard(rows, precision).map_err(|e| StoreError::MalformedTable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        self.write_atomic(&contents)?;

        info!("Wrote leaderboard");
        Ok(())
    }

    async fn read_rows(&self) -> ApplicationResult<Vec<LeaderboardRow>> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::from_io(&self.path, e))?;
        Ok(parse_leaderboard(&self.path, &data)?)
    }
}
