//! Agent and customer records.
//!
//! Scores are opaque: the balancer only needs them to be totally ordered, so
//! both record types are generic over `S: Ord` and default to `u32`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identifier of a customer-success agent. `0` is reserved as the
/// "no unique winner" sentinel.
pub type AgentId = u32;

/// Identifier of a customer. Carried through for reporting only.
pub type CustomerId = u32;

/// Agents excluded from a balancing run.
pub type AwaySet = BTreeSet<AgentId>;

/// A customer-success agent and its capacity score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Agent<S = u32> {
    pub id: AgentId,
    pub score: S,
}

impl<S> Agent<S> {
    #[must_use]
    pub const fn new(id: AgentId, score: S) -> Self {
        Self { id, score }
    }
}

/// A customer and its demand score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer<S = u32> {
    pub id: CustomerId,
    pub score: S,
}

impl<S> Customer<S> {
    #[must_use]
    pub const fn new(id: CustomerId, score: S) -> Self {
        Self { id, score }
    }
}

/// Build an agent roster from bare scores, assigning 1-indexed ids in order.
///
/// `agents_from_scores(&[60, 20])` yields agents `1 -> 60` and `2 -> 20`.
///
/// # Panics
///
/// Panics if the slice holds more than `u32::MAX` entries.
#[must_use]
pub fn agents_from_scores<S: Clone>(scores: &[S]) -> Vec<Agent<S>> {
    scores
        .iter()
        .zip(1..)
        .map(|(score, id)| Agent::new(id, score.clone()))
        .collect()
}

/// Build a customer roster from bare scores, assigning 1-indexed ids in order.
#[must_use]
pub fn customers_from_scores<S: Clone>(scores: &[S]) -> Vec<Customer<S>> {
    scores
        .iter()
        .zip(1..)
        .map(|(score, id)| Customer::new(id, score.clone()))
        .collect()
}
