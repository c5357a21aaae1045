//! Unique-maximum resolution.

use super::census::ScoreCensus;
use super::partition::Partition;
use super::Outcome;

/// Pick the single agent holding the largest count.
///
/// The maximum is taken over every claim, including representatives of
/// duplicated scores. Only agents whose score is unique in `census` can be
/// selected, and the result is [`Outcome::NoUniqueWinner`] unless exactly one
/// of them reaches the maximum.
#[must_use]
pub fn resolve<S: Ord>(partition: &Partition<'_, S>, census: &ScoreCensus<'_, S>) -> Outcome {
    let Some(max_count) = partition.max_count() else {
        return Outcome::NoUniqueWinner;
    };

    let mut leaders = partition
        .claims()
        .iter()
        .filter(|claim| claim.count() == max_count)
        .filter(|claim| census.occurrences(&claim.agent.score) == 1);

    match (leaders.next(), leaders.next()) {
        (Some(only), None) => Outcome::Winner(only.agent.id),
        _ => Outcome::NoUniqueWinner,
    }
}
