use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::domain::RawSighting;
use crate::error::Result;

/// Reads the enriched sightings file: a JSON array of sighting objects.
///
/// A missing file or malformed JSON is fatal for the run; there is no
/// partial-load fallback.
#[instrument]
pub fn load_sightings(path: &Path) -> Result<Vec<RawSighting>> {
    let content = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());

    let records: Vec<RawSighting> = serde_json::from_str(&content)?;
    info!("Loaded {} total records", records.len());
    metrics::counter!("ufo_import_records_loaded_total").increment(records.len() as u64);

    Ok(records)
}

/// Expands a leading `~` to `$HOME`; other paths are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_with(path, std::env::var("HOME").ok())
}

fn expand_home_with(path: &str, home: Option<String>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            PathBuf::from(format!("{}{}", home.trim_end_matches('/'), rest))
        }
        _ => PathBuf::from(path),
    }
}
