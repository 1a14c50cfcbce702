//! Domain models for dropins
//!
//! This module contains pure domain objects: units, their requirements and
//! the installation request and result. These types perform no I/O.

pub mod installed;
pub mod request;
pub mod requirement;
pub mod unit;

pub use installed::{InstallMode, InstallationResult, InstalledUnit};
pub use request::InstallationRequest;
pub use requirement::Requirement;
pub use unit::{Origin, Shape, Unit, UnitKind};
