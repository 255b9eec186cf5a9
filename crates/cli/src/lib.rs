//! Terminal output helpers for pingrank
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Plain-text tables
//! - Progress spinners

#![warn(missing_docs)]

pub mod output;
pub mod progress;
