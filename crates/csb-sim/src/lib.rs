#![forbid(unsafe_code)]
//! csb-sim library.
//!
//! Generates rosters from seeds and checks the balancer against a
//! straightforward reference plus order and idempotence invariants.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod campaign;
pub mod generator;
pub mod logging;
pub mod oracle;
pub mod rng;

pub use campaign::{CampaignConfig, CampaignReport, replay_seed, run_campaign, run_single_seed};
pub use generator::{RosterShape, generate_roster};
pub use logging::init_tracing;
pub use oracle::{BalanceOracle, InvariantViolation, OracleResult, reference_execute};
pub use rng::DeterministicRng;
