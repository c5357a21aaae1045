#![forbid(unsafe_code)]
//! csb-core library.
//!
//! Decides which customer-success agent serves the most customers.
//!
//! # Conventions
//!
//! - **Errors**: Boundary errors are typed ([`error::RosterError`]); the
//!   balancer itself never fails.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! ```
//! use csb_core::{AwaySet, Outcome, agents_from_scores, customers_from_scores, execute};
//!
//! let agents = agents_from_scores(&[60, 20, 95, 75]);
//! let customers = customers_from_scores(&[90, 20, 70, 40, 60, 10]);
//! let away: AwaySet = [2, 4].into_iter().collect();
//!
//! assert_eq!(execute(&agents, &customers, &away), Outcome::Winner(1));
//! ```

pub mod balance;
pub mod error;
pub mod model;
pub mod roster;
pub mod scenario;

pub use balance::{Allocation, AllocationRow, Balancer, NO_WINNER, Outcome, execute};
pub use error::{ErrorCode, RosterError};
pub use model::{
    Agent, AgentId, AwaySet, Customer, CustomerId, agents_from_scores, customers_from_scores,
};
pub use roster::{Roster, Scenario, ScenarioFormat, load_scenario, parse_scenario};
