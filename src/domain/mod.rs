//! Domain layer: the simulation engine
//!
//! Pure functions of one run's configuration. No I/O, no config
//! loading, no ambient state; everything a component needs is passed
//! in explicitly.

pub mod downline;
pub mod entities;
pub mod error;
pub mod ledger;
pub mod network;
pub mod summary;
pub mod tier;

pub use downline::{accumulate_downline_counts, DescendantIndex};
pub use entities::{NodeResult, SimulationConfig};
pub use error::{DomainError, DomainResult};
pub use ledger::{BonusLedger, TierPayout};
pub use network::{Network, MAX_DEPTH};
pub use summary::{project, Summary, TierCounts};
pub use tier::{Classification, MatrixPolicy, Tier, TierClassifier, TierPolicy};
