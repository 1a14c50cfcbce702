//! Configuration file handling for dropins
//!
//! This module contains data structures for:
//! - `dropins.yaml` - Installation request file

pub mod request;

// Re-export commonly used types
pub use request::{RequestConfig, RequestOverrides};
