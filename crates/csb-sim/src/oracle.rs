use std::collections::BTreeMap;

use csb_core::{Agent, AgentId, Customer, NO_WINNER, Outcome, Roster, execute};

use crate::rng::DeterministicRng;

// ── Core result types ─────────────────────────────────────────────────────────

/// Oracle result for a set of invariant checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleResult {
    /// `true` iff no violations were found.
    pub passed: bool,
    pub violations: Vec<InvariantViolation>,
}

impl OracleResult {
    const fn pass() -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
        }
    }

    fn fail(violation: InvariantViolation) -> Self {
        Self {
            passed: false,
            violations: vec![violation],
        }
    }

    /// Merge another result into this one (failures accumulate).
    #[must_use]
    fn merge(mut self, other: Self) -> Self {
        if !other.passed {
            self.passed = false;
            self.violations.extend(other.violations);
        }
        self
    }
}

// ── Invariant violation diagnostics ──────────────────────────────────────────

/// Diagnostic information for a single failed invariant check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The balancer and the reference partition disagree.
    ReferenceMismatch { balancer: AgentId, reference: AgentId },

    /// The winner is away, unknown, or shares its score.
    IneligibleWinner { winner: AgentId },

    /// Running twice on the same input gave different answers.
    Idempotence { first: AgentId, second: AgentId },

    /// Shuffling the customer roster changed the answer.
    CustomerOrder {
        canonical: AgentId,
        shuffled: AgentId,
    },

    /// Shuffling the agent roster changed the answer.
    AgentOrder {
        canonical: AgentId,
        shuffled: AgentId,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReferenceMismatch {
                balancer,
                reference,
            } => write!(
                f,
                "ReferenceMismatch: balancer picked {balancer}, reference picked {reference}"
            ),
            Self::IneligibleWinner { winner } => {
                write!(f, "IneligibleWinner: agent {winner} is away, unknown, or shares its score")
            }
            Self::Idempotence { first, second } => {
                write!(f, "Idempotence: first run {first}, second run {second}")
            }
            Self::CustomerOrder {
                canonical,
                shuffled,
            } => write!(
                f,
                "CustomerOrder: canonical {canonical}, shuffled customers {shuffled}"
            ),
            Self::AgentOrder {
                canonical,
                shuffled,
            } => write!(f, "AgentOrder: canonical {canonical}, shuffled agents {shuffled}"),
        }
    }
}

// ── Reference ─────────────────────────────────────────────────────────────────

/// Literal rendition of the balancing rules.
///
/// Re-partitions the unsorted pool once per agent, so it is quadratic and
/// only meant for small rosters.
#[must_use]
pub fn reference_execute(roster: &Roster) -> AgentId {
    let available: Vec<&Agent> = roster
        .agents
        .iter()
        .filter(|agent| !roster.away.contains(&agent.id))
        .collect();

    let mut occurrences: BTreeMap<u32, usize> = BTreeMap::new();
    let mut representatives: Vec<&Agent> = Vec::new();
    for &agent in &available {
        let count = occurrences.entry(agent.score).or_insert(0);
        *count += 1;
        if *count == 1 {
            representatives.push(agent);
        }
    }
    representatives.sort_by_key(|agent| agent.score);

    let mut pool: Vec<&Customer> = roster.customers.iter().collect();
    let mut counts: Vec<(AgentId, u32, usize)> = Vec::with_capacity(representatives.len());
    for agent in representatives {
        let (served, rest): (Vec<&Customer>, Vec<&Customer>) = pool
            .into_iter()
            .partition(|customer| customer.score <= agent.score);
        counts.push((agent.id, agent.score, served.len()));
        pool = rest;
    }

    let Some(max) = counts.iter().map(|&(_, _, n)| n).max() else {
        return NO_WINNER;
    };
    let leaders: Vec<AgentId> = counts
        .iter()
        .filter(|&&(_, score, n)| n == max && occurrences.get(&score) == Some(&1))
        .map(|&(id, _, _)| id)
        .collect();

    match leaders.as_slice() {
        [only] => *only,
        _ => NO_WINNER,
    }
}

// ── Oracle ────────────────────────────────────────────────────────────────────

/// Checks balancer invariants on a single roster.
///
/// # Invariants checked
///
/// 1. **Reference agreement** — same answer as [`reference_execute`].
/// 2. **Eligibility** — a winner is an available agent with a unique score.
/// 3. **Idempotence** — repeated runs agree.
/// 4. **Customer order** — shuffling customers changes nothing.
/// 5. **Agent order** — shuffling agents changes nothing.
pub struct BalanceOracle;

impl BalanceOracle {
    #[must_use]
    pub fn check_reference(roster: &Roster) -> OracleResult {
        let balancer = roster.execute().sentinel_id();
        let reference = reference_execute(roster);
        if balancer == reference {
            OracleResult::pass()
        } else {
            OracleResult::fail(InvariantViolation::ReferenceMismatch {
                balancer,
                reference,
            })
        }
    }

    #[must_use]
    pub fn check_eligibility(roster: &Roster) -> OracleResult {
        let Outcome::Winner(winner) = roster.execute() else {
            return OracleResult::pass();
        };

        let available = || {
            roster
                .agents
                .iter()
                .filter(|agent| !roster.away.contains(&agent.id))
        };
        let eligible = available()
            .find(|agent| agent.id == winner)
            .is_some_and(|w| available().filter(|a| a.score == w.score).count() == 1);

        if eligible {
            OracleResult::pass()
        } else {
            OracleResult::fail(InvariantViolation::IneligibleWinner { winner })
        }
    }

    #[must_use]
    pub fn check_idempotence(roster: &Roster) -> OracleResult {
        let first = roster.execute().sentinel_id();
        let second = roster.execute().sentinel_id();
        if first == second {
            OracleResult::pass()
        } else {
            OracleResult::fail(InvariantViolation::Idempotence { first, second })
        }
    }

    #[must_use]
    pub fn check_customer_order(roster: &Roster, rng: &mut DeterministicRng) -> OracleResult {
        let canonical = roster.execute().sentinel_id();
        let mut customers = roster.customers.clone();
        rng.shuffle(&mut customers);
        let shuffled = execute(&roster.agents, &customers, &roster.away).sentinel_id();
        if canonical == shuffled {
            OracleResult::pass()
        } else {
            OracleResult::fail(InvariantViolation::CustomerOrder {
                canonical,
                shuffled,
            })
        }
    }

    #[must_use]
    pub fn check_agent_order(roster: &Roster, rng: &mut DeterministicRng) -> OracleResult {
        let canonical = roster.execute().sentinel_id();
        let mut agents = roster.agents.clone();
        rng.shuffle(&mut agents);
        let shuffled = execute(&agents, &roster.customers, &roster.away).sentinel_id();
        if canonical == shuffled {
            OracleResult::pass()
        } else {
            OracleResult::fail(InvariantViolation::AgentOrder {
                canonical,
                shuffled,
            })
        }
    }

    /// Run every check.
    #[must_use]
    pub fn check_all(roster: &Roster, rng: &mut DeterministicRng) -> OracleResult {
        Self::check_reference(roster)
            .merge(Self::check_eligibility(roster))
            .merge(Self::check_idempotence(roster))
            .merge(Self::check_customer_order(roster, rng))
            .merge(Self::check_agent_order(roster, rng))
    }
}
