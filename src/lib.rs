//! visit-report-rust
//!
//! CLI around the visit-report core: PDF report generation, photo
//! resizing and object-storage diagnostics.

pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod resize;
pub mod storage;
