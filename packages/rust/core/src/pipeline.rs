//! End-to-end conversion pipeline: raw dataset → transformation and classification files.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, instrument};

use competency_shared::{ConvertConfig, Result};

use crate::classification::build_classifications;
use crate::dataset::{load_dataset, strip_label_lookup};
use crate::transformation::build_transformations;
use crate::writer::write_records;

/// Which derived views a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConvertTarget {
    /// Transformation file first, then classification file.
    #[default]
    All,
    Transformation,
    Classification,
}

impl ConvertTarget {
    fn includes_transformation(self) -> bool {
        matches!(self, ConvertTarget::All | ConvertTarget::Transformation)
    }

    fn includes_classification(self) -> bool {
        matches!(self, ConvertTarget::All | ConvertTarget::Classification)
    }
}

/// An output file produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// Number of records in the file.
    pub entries: usize,
}

/// Result of a conversion run.
#[derive(Debug)]
pub struct ConvertSummary {
    /// Transformation view, if requested.
    pub transformation: Option<WrittenFile>,
    /// Classification view, if requested.
    pub classification: Option<WrittenFile>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after an output file has been written.
    fn file_written(&self, file: &WrittenFile);
    /// Called when the pipeline completes.
    fn done(&self, summary: &ConvertSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_written(&self, _file: &WrittenFile) {}
    fn done(&self, _summary: &ConvertSummary) {}
}

/// Run the conversion pipeline.
///
/// 1. Load the raw dataset and strip `label_lookup`
/// 2. Build and write the transformation view
/// 3. Build and write the classification view
///
/// Files are written as soon as their view is built, so a failure in step 3
/// leaves the transformation file in place.
#[instrument(skip_all, fields(input = %config.input.display(), view = ?target))]
pub fn run(
    config: &ConvertConfig,
    target: ConvertTarget,
    progress: &dyn ProgressReporter,
) -> Result<ConvertSummary> {
    let start = Instant::now();

    // --- Phase 1: Load ---
    progress.phase("Loading competency dataset");
    let mut dataset = load_dataset(&config.input)?;
    strip_label_lookup(&mut dataset, config.require_label_lookup)?;

    // --- Phase 2: Transformation view ---
    let transformation = if target.includes_transformation() {
        progress.phase("Building transformation pairs");
        let records = build_transformations(&dataset)?;
        Some(write_view(&records, &config.transformation_output, progress)?)
    } else {
        None
    };

    // --- Phase 3: Classification view ---
    let classification = if target.includes_classification() {
        progress.phase("Building classification pairs");
        let records = build_classifications(&dataset, &config.include_labels, config.lang)?;
        Some(write_view(&records, &config.classification_output, progress)?)
    } else {
        None
    };

    let summary = ConvertSummary {
        transformation,
        classification,
        elapsed: start.elapsed(),
    };

    info!(
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "conversion complete"
    );
    progress.done(&summary);

    Ok(summary)
}

fn write_view<T: Serialize>(
    records: &[T],
    path: &Path,
    progress: &dyn ProgressReporter,
) -> Result<WrittenFile> {
    let entries = write_records(records, path)?;
    let file = WrittenFile {
        path: path.to_path_buf(),
        entries,
    };
    progress.file_written(&file);
    Ok(file)
}
