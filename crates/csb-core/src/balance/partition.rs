//! Cumulative partition of customers across agents.
//!
//! The customer pool is sorted by score once. Agents are then visited in
//! ascending score order and each one claims the prefix of the *remaining*
//! pool whose scores do not exceed its own. The claimed prefix leaves the
//! pool for good, so a customer is attributed to the lowest-scoring agent
//! able to serve it and never counted twice.
//!
//! The remaining pool is threaded through a fold as the index where it
//! starts. Each claim is a binary search over that suffix, so the whole pass
//! costs `O(n log n + a log n)` for `n` customers and `a` distinct scores.

use std::ops::Range;

use tracing::trace;

use super::census::ScoreCensus;
use crate::model::{Agent, Customer};

/// Customers claimed by one agent, as a range into the sorted pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim<'a, S> {
    pub agent: &'a Agent<S>,
    pub range: Range<usize>,
}

impl<S> Claim<'_, S> {
    /// Number of customers attributed to this agent.
    #[must_use]
    pub fn count(&self) -> usize {
        self.range.len()
    }
}

/// Result of walking every representative agent over the pool.
#[derive(Debug, Clone)]
pub struct Partition<'a, S> {
    pool: Vec<&'a Customer<S>>,
    claims: Vec<Claim<'a, S>>,
    attended: usize,
}

impl<'a, S: Ord> Partition<'a, S> {
    /// Partition `customers` across the census representatives.
    #[must_use]
    pub fn run(census: &ScoreCensus<'a, S>, customers: &'a [Customer<S>]) -> Self {
        let mut pool: Vec<&'a Customer<S>> = customers.iter().collect();
        pool.sort_by(|a, b| a.score.cmp(&b.score));

        let (claims, attended) = census.slots().fold(
            (Vec::with_capacity(census.len()), 0_usize),
            |(mut claims, start), slot| {
                let agent = slot.representative;
                let (claimed, _) = split_pool(&pool[start..], &agent.score);
                let end = start + claimed.len();
                trace!(agent = agent.id, claimed = claimed.len(), "claimed customers");
                claims.push(Claim {
                    agent,
                    range: start..end,
                });
                (claims, end)
            },
        );

        Self {
            pool,
            claims,
            attended,
        }
    }
}

impl<'a, S> Partition<'a, S> {
    /// Claims in ascending agent-score order.
    #[must_use]
    pub fn claims(&self) -> &[Claim<'a, S>] {
        &self.claims
    }

    /// Customers attributed by `claim`, in ascending score order.
    ///
    /// Returns an empty slice for a claim that did not come from this
    /// partition and falls outside its pool.
    #[must_use]
    pub fn customers_of(&self, claim: &Claim<'a, S>) -> &[&'a Customer<S>] {
        self.pool.get(claim.range.clone()).unwrap_or_default()
    }

    /// Customers whose score exceeds every agent's score.
    #[must_use]
    pub fn unattended(&self) -> &[&'a Customer<S>] {
        &self.pool[self.attended..]
    }

    /// Largest count among all claims, `None` when there are no agents.
    #[must_use]
    pub fn max_count(&self) -> Option<usize> {
        self.claims.iter().map(Claim::count).max()
    }
}

/// Split a score-sorted pool into the customers `agent_score` can serve and
/// the remainder.
///
/// `pool` must be sorted ascending by score; the split point is found by
/// binary search.
#[must_use]
pub fn split_pool<'p, 'a, S: Ord>(
    pool: &'p [&'a Customer<S>],
    agent_score: &S,
) -> (&'p [&'a Customer<S>], &'p [&'a Customer<S>]) {
    let at = pool.partition_point(|customer| customer.score <= *agent_score);
    pool.split_at(at)
}
