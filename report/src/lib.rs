//! Report persistence for finished runs
//!
//! This crate writes a [`ReportData`] model to disk:
//!
//! - JSON: the whole model, pretty-printed
//! - CSV: every chunk sorted by duration, or key/value summary statistics

#![warn(missing_docs)]
#![warn(clippy::all)]

mod csv_export;
mod json_export;

pub use csv_export::CsvReport;
pub use json_export::JsonReport;

#[doc(no_inline)]
pub use compliance_bench_core::ReportData;
