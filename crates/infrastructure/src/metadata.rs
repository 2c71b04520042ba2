//! `metadata.json` reader

use graph_challenge_domain::{ChallengeError, ChallengeResult, Metadata, StoreError};
use std::path::Path;

/// Read and validate a run's metadata file
pub async fn read_metadata(path: &Path) -> ChallengeResult<Metadata> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::from_io(path, e))?;

    Metadata::from_json_str(&text)
        .map_err(|e| ChallengeError::from(e).context(path.display().to_string()))
}
