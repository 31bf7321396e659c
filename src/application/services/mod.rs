//! Application services

pub mod simulation;

pub use simulation::{MemberReport, SimulationOutcome, SimulationService};
