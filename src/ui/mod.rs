//! Human readable output
//!
//! This module handles:
//! - Installation summaries and dry-run plans
//! - Dropin tree listings
//! - Unit metadata display
//!
//! JSON output bypasses this module and serializes the domain types directly.

pub mod display;

pub use display::{display_plan, display_result, display_tree, display_unit};
