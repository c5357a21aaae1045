//! Availability filter and score census.
//!
//! Drops away agents, then groups the rest by score. Each distinct score keeps
//! one representative (the first available agent carrying it, in roster
//! order) together with the number of available agents that share it.
//! Iterating the census yields representatives in ascending score order,
//! which is the order the partition pass consumes them in.

use std::collections::BTreeMap;

use crate::model::{Agent, AwaySet};

/// One distinct score among the available agents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSlot<'a, S> {
    /// First available agent with this score.
    pub representative: &'a Agent<S>,
    /// How many available agents carry this score.
    pub occurrences: usize,
}

impl<S> ScoreSlot<'_, S> {
    /// `true` when no other available agent shares the score.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.occurrences == 1
    }
}

/// Score -> occurrence map over the available agents.
#[derive(Debug, Clone)]
pub struct ScoreCensus<'a, S: Ord> {
    slots: BTreeMap<&'a S, ScoreSlot<'a, S>>,
    away_skipped: usize,
}

impl<'a, S: Ord> ScoreCensus<'a, S> {
    /// Build the census in one pass over `agents`, skipping ids in `away`.
    #[must_use]
    pub fn build(agents: &'a [Agent<S>], away: &AwaySet) -> Self {
        let mut slots: BTreeMap<&'a S, ScoreSlot<'a, S>> = BTreeMap::new();
        let mut away_skipped = 0_usize;

        for agent in agents {
            if away.contains(&agent.id) {
                away_skipped += 1;
                continue;
            }
            slots
                .entry(&agent.score)
                .and_modify(|slot| slot.occurrences += 1)
                .or_insert(ScoreSlot {
                    representative: agent,
                    occurrences: 1,
                });
        }

        Self {
            slots,
            away_skipped,
        }
    }

    /// Representatives in ascending score order.
    pub fn slots(&self) -> impl Iterator<Item = &ScoreSlot<'a, S>> + '_ {
        self.slots.values()
    }

    /// Occurrence count for `score` among available agents (0 if absent).
    #[must_use]
    pub fn occurrences(&self, score: &S) -> usize {
        self.slots.get(score).map_or(0, |slot| slot.occurrences)
    }

    /// Number of distinct scores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of agents dropped because they were away.
    #[must_use]
    pub const fn away_skipped(&self) -> usize {
        self.away_skipped
    }

    /// Number of distinct scores held by more than one available agent.
    #[must_use]
    pub fn duplicated_scores(&self) -> usize {
        self.slots.values().filter(|slot| !slot.is_unique()).count()
    }
}
