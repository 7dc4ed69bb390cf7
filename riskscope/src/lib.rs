//! CSV ingestion and report rendering for the riskscope command-line tool.
//!
//! The scoring engine lives in `riskscope-core`; this crate turns a CSV
//! file into a [`riskscope_core::Dataset`] and wraps the resulting metrics
//! in a timestamped report that can be written as JSON or Markdown.

pub mod input;
pub mod report;

pub use input::{load_config, load_csv, read_csv};
pub use report::{OutputFormat, RiskReport};
