//! Core extraction and conversion logic for the competency dataset converter.
//!
//! This crate walks the nested competency dataset, builds the transformation
//! and classification views, and writes them to disk (see [`pipeline::run`]).

pub mod classification;
pub mod dataset;
pub mod extract;
pub mod labels;
pub mod pipeline;
pub mod transformation;
pub mod writer;

pub use classification::build_classifications;
pub use extract::extract;
pub use pipeline::{ConvertSummary, ConvertTarget, ProgressReporter, SilentProgress, WrittenFile};
pub use transformation::build_transformations;
pub use writer::write_records;
