//! The balancing pipeline.
//!
//! # Algorithm
//!
//! 1. Drop agents listed as away.
//! 2. Group the remaining agents by score. A score carried by more than one
//!    agent keeps a single representative, and that representative can never
//!    be chosen as the winner.
//! 3. Visit representatives in ascending score order.
//! 4. Each representative claims every still-unclaimed customer whose score
//!    does not exceed its own.
//! 5. The winner is the only unique-score agent whose count equals the
//!    maximum count. Anything else (no agents, a tie, a duplicated leader)
//!    resolves to [`Outcome::NoUniqueWinner`].
//!
//! Degenerate inputs are ordinary outcomes, never errors.

pub mod census;
pub mod partition;
pub mod resolve;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub use census::{ScoreCensus, ScoreSlot};
pub use partition::{Claim, Partition, split_pool};
pub use resolve::resolve;

use crate::model::{Agent, AgentId, AwaySet, Customer, CustomerId};

/// Sentinel id reported when no single agent wins.
pub const NO_WINNER: AgentId = 0;

/// Result of a balancing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "agent_id", rename_all = "snake_case")]
pub enum Outcome {
    /// Exactly one agent serves the most customers.
    Winner(AgentId),
    /// No agents, a count tie, or a leader whose score is shared.
    NoUniqueWinner,
}

impl Outcome {
    /// The winning id, or [`NO_WINNER`].
    #[must_use]
    pub const fn sentinel_id(self) -> AgentId {
        match self {
            Self::Winner(id) => id,
            Self::NoUniqueWinner => NO_WINNER,
        }
    }

    #[must_use]
    pub const fn winner(self) -> Option<AgentId> {
        match self {
            Self::Winner(id) => Some(id),
            Self::NoUniqueWinner => None,
        }
    }

    #[must_use]
    pub const fn is_winner(self) -> bool {
        matches!(self, Self::Winner(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(id) => write!(f, "agent {id}"),
            Self::NoUniqueWinner => write!(f, "no unique winner"),
        }
    }
}

/// Per-agent line of an [`Allocation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationRow<S> {
    pub agent_id: AgentId,
    pub score: S,
    pub customers: usize,
    /// Ids of the attributed customers, in ascending customer-score order.
    pub customer_ids: Vec<CustomerId>,
    /// `false` when another available agent shares the score.
    pub eligible: bool,
}

/// Full breakdown of a balancing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation<S> {
    /// Representatives in ascending score order.
    pub rows: Vec<AllocationRow<S>>,
    pub away_skipped: usize,
    pub duplicated_scores: usize,
    pub unattended: usize,
    pub outcome: Outcome,
}

/// Plain-text table for terminal output.
impl<S: fmt::Display> fmt::Display for Allocation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>8} {:>10} {:>10}  note", "agent", "score", "customers")?;
        for row in &self.rows {
            let note = if row.eligible { "" } else { "shared score" };
            writeln!(
                f,
                "{:>8} {:>10} {:>10}  {note}",
                row.agent_id, row.score, row.customers
            )?;
        }
        writeln!(
            f,
            "away: {}  duplicated scores: {}  unattended: {}",
            self.away_skipped, self.duplicated_scores, self.unattended
        )?;
        write!(f, "result: {}", self.outcome)
    }
}

/// Borrowed inputs for one balancing run.
///
/// The balancer never mutates or retains its inputs; each call to
/// [`Balancer::execute`] builds its own working pool.
#[derive(Debug, Clone, Copy)]
pub struct Balancer<'a, S = u32> {
    agents: &'a [Agent<S>],
    customers: &'a [Customer<S>],
    away: &'a AwaySet,
}

impl<'a, S: Ord> Balancer<'a, S> {
    #[must_use]
    pub const fn new(
        agents: &'a [Agent<S>],
        customers: &'a [Customer<S>],
        away: &'a AwaySet,
    ) -> Self {
        Self {
            agents,
            customers,
            away,
        }
    }

    /// Find the agent serving the most customers.
    #[must_use]
    #[instrument(
        level = "debug",
        skip_all,
        fields(agents = self.agents.len(), customers = self.customers.len(), away = self.away.len())
    )]
    pub fn execute(&self) -> Outcome {
        let census = ScoreCensus::build(self.agents, self.away);
        debug!(
            distinct_scores = census.len(),
            duplicated = census.duplicated_scores(),
            "score census built"
        );

        let partition = Partition::run(&census, self.customers);
        debug!(
            max_count = ?partition.max_count(),
            unattended = partition.unattended().len(),
            "customers partitioned"
        );

        let outcome = resolve(&partition, &census);
        debug!(%outcome, "balancing resolved");
        outcome
    }
}

impl<S: Ord + Clone> Balancer<'_, S> {
    /// Run the pipeline and keep the per-agent breakdown.
    #[must_use]
    pub fn allocate(&self) -> Allocation<S> {
        let census = ScoreCensus::build(self.agents, self.away);
        let partition = Partition::run(&census, self.customers);
        let outcome = resolve(&partition, &census);

        let rows = partition
            .claims()
            .iter()
            .map(|claim| AllocationRow {
                agent_id: claim.agent.id,
                score: claim.agent.score.clone(),
                customers: claim.count(),
                customer_ids: partition
                    .customers_of(claim)
                    .iter()
                    .map(|customer| customer.id)
                    .collect(),
                eligible: census.occurrences(&claim.agent.score) == 1,
            })
            .collect();

        Allocation {
            rows,
            away_skipped: census.away_skipped(),
            duplicated_scores: census.duplicated_scores(),
            unattended: partition.unattended().len(),
            outcome,
        }
    }
}

/// One-shot form of [`Balancer::execute`].
#[must_use]
pub fn execute<S: Ord>(agents: &[Agent<S>], customers: &[Customer<S>], away: &AwaySet) -> Outcome {
    Balancer::new(agents, customers, away).execute()
}
