//! JSON dataset writer.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use competency_shared::{ConverterError, Result};

/// Write `records` to `path` as an indented JSON array, replacing any existing file.
///
/// Non-ASCII text is written as-is. Returns the number of records written.
#[instrument(skip(records), fields(path = %path.display()))]
pub fn write_records<T: Serialize>(records: &[T], path: &Path) -> Result<usize> {
    info!(entries = records.len(), "create {} with {} entries", path.display(), records.len());

    let json = serde_json::to_string_pretty(records)
        .map_err(|e| ConverterError::Serialize(format!("{}: {e}", path.display())))?;
    std::fs::write(path, json).map_err(|e| ConverterError::io(path, e))?;

    Ok(records.len())
}
