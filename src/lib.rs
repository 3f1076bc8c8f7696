//! Core library for the tcc-report-tools command line application.
//!
//! The library exposes the merge orchestration that powers the command-line
//! interface as well as the integration tests. The modules are structured to
//! keep responsibilities narrow and composable: PDF adapters live under
//! [`tcc::report::io`], data representations inside [`tcc::report::model`],
//! the pure alignment logic in [`tcc::report::align`], and the merge
//! orchestration under [`tcc::report::merge`].

pub mod tcc;

pub use tcc::report::{ReportError, Result, align, error, io, merge, model};
