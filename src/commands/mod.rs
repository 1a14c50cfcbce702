//! Command implementations for dropins CLI

pub mod completions;
pub mod helpers;
pub mod install;
pub mod list;
pub mod show;
pub mod version;
