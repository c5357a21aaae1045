//! Random roster generation.

use csb_core::{Agent, AwaySet, Customer, Roster};
use serde::{Deserialize, Serialize};

use crate::rng::DeterministicRng;

/// Bounds for generated rosters.
///
/// Small score ranges are the interesting ones: they produce duplicated
/// agent scores and count ties far more often than wide ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterShape {
    /// Upper bound (inclusive) on the number of agents.
    pub max_agents: usize,
    /// Upper bound (inclusive) on the number of customers.
    pub max_customers: usize,
    /// Scores are drawn from `0..max_score`.
    pub max_score: u32,
    /// Chance (percent) that an agent is marked away.
    pub away_percent: u8,
    /// Chance (percent) that an away id matches no agent.
    pub stray_away_percent: u8,
}

impl Default for RosterShape {
    fn default() -> Self {
        Self {
            max_agents: 12,
            max_customers: 80,
            max_score: 40,
            away_percent: 20,
            stray_away_percent: 5,
        }
    }
}

/// Generate a roster with 1-indexed agent and customer ids.
#[must_use]
pub fn generate_roster(shape: &RosterShape, rng: &mut DeterministicRng) -> Roster {
    let agent_count = rng.next_len(shape.max_agents);
    let customer_count = rng.next_len(shape.max_customers);
    let score_bound = shape.max_score.max(1);

    let agents: Vec<Agent> = (1..)
        .take(agent_count)
        .map(|id| Agent::new(id, rng.next_u32_below(score_bound)))
        .collect();

    let customers: Vec<Customer> = (1..)
        .take(customer_count)
        .map(|id| Customer::new(id, rng.next_u32_below(score_bound)))
        .collect();

    let mut away: AwaySet = agents
        .iter()
        .filter(|_| rng.hit_rate_percent(shape.away_percent))
        .map(|agent| agent.id)
        .collect();
    if rng.hit_rate_percent(shape.stray_away_percent) {
        let stray = u32::try_from(agent_count).unwrap_or(u32::MAX).saturating_add(1);
        away.insert(stray);
    }

    Roster {
        agents,
        customers,
        away,
    }
}
