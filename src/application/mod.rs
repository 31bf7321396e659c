//! Application layer: orchestration of the simulation pipeline

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{MemberReport, SimulationOutcome, SimulationService};
