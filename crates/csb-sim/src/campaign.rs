//! Campaign runner for deterministic balancing campaigns.
//!
//! Executes many seeds, each generating one roster and running the full
//! oracle suite on it, and records the first failing seed for replay.

use std::ops::Range;

use anyhow::{Result, bail};
use csb_core::Roster;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::generator::{RosterShape, generate_roster};
use crate::oracle::{BalanceOracle, InvariantViolation, OracleResult};
use crate::rng::DeterministicRng;

/// Campaign-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Range of seeds to execute, e.g., `0..500`.
    pub seed_range: Range<u64>,
    pub shape: RosterShape,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            seed_range: 0..500,
            shape: RosterShape::default(),
        }
    }
}

impl CampaignConfig {
    /// Validate configuration before running.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.seed_range.is_empty() {
            bail!("seed_range must not be empty");
        }
        if self.shape.max_score == 0 {
            bail!("max_score must be > 0");
        }
        if self.shape.away_percent > 100 || self.shape.stray_away_percent > 100 {
            bail!("percentages must be within 0..=100");
        }
        Ok(())
    }

    /// Roster generated for `seed`.
    #[must_use]
    pub fn roster_for_seed(&self, seed: u64) -> Roster {
        generate_roster(&self.shape, &mut DeterministicRng::new(seed))
    }
}

/// Failure details for a single seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFailure {
    pub seed: u64,
    pub violations: Vec<String>,
}

/// Aggregate report produced by a campaign run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignReport {
    pub seeds_run: usize,
    pub seeds_passed: usize,
    /// First seed that failed (for prioritized replay).
    pub first_failure: Option<u64>,
    pub failures: Vec<SeedFailure>,
    /// Seeds whose roster produced a unique winner.
    pub winners_found: usize,
    /// Seeds whose roster contained a duplicated available score.
    pub duplicate_scores_seen: usize,
}

impl CampaignReport {
    /// True if every seed passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Detailed trace produced by replaying a single seed.
#[derive(Debug, Clone)]
pub struct DetailedTrace {
    pub roster: Roster,
    pub oracle: OracleResult,
}

/// Run a full campaign across all seeds in the config.
///
/// # Errors
///
/// Returns an error if config validation fails.
pub fn run_campaign(config: &CampaignConfig) -> Result<CampaignReport> {
    config.validate()?;

    let mut report = CampaignReport {
        seeds_run: 0,
        seeds_passed: 0,
        first_failure: None,
        failures: Vec::new(),
        winners_found: 0,
        duplicate_scores_seen: 0,
    };

    for seed in config.seed_range.clone() {
        report.seeds_run += 1;
        let roster = config.roster_for_seed(seed);

        let allocation = roster.allocate();
        if allocation.outcome.is_winner() {
            report.winners_found += 1;
        }
        if allocation.duplicated_scores > 0 {
            report.duplicate_scores_seen += 1;
        }

        match check_roster(seed, &roster) {
            Ok(()) => report.seeds_passed += 1,
            Err(violations) => {
                warn!(seed, violations = violations.len(), "seed failed");
                if report.first_failure.is_none() {
                    report.first_failure = Some(seed);
                }
                report.failures.push(SeedFailure {
                    seed,
                    violations: violations.iter().map(ToString::to_string).collect(),
                });
            }
        }
    }

    info!(
        seeds = report.seeds_run,
        passed = report.seeds_passed,
        winners = report.winners_found,
        "campaign finished"
    );
    Ok(report)
}

/// Run a single seed and return `Ok(())` on pass, `Err(violations)` on failure.
///
/// # Errors
///
/// Returns an `anyhow::Error` if the config is invalid. The inner `Result`
/// distinguishes pass from invariant violations.
pub fn run_single_seed(
    seed: u64,
    config: &CampaignConfig,
) -> Result<std::result::Result<(), Vec<InvariantViolation>>> {
    config.validate()?;
    let roster = config.roster_for_seed(seed);
    Ok(check_roster(seed, &roster))
}

/// Replay a single seed with the generated roster for debugging.
///
/// # Errors
///
/// Returns an error when config validation fails.
pub fn replay_seed(seed: u64, config: &CampaignConfig) -> Result<DetailedTrace> {
    config.validate()?;
    let roster = config.roster_for_seed(seed);
    let oracle = BalanceOracle::check_all(&roster, &mut oracle_rng(seed));
    Ok(DetailedTrace { roster, oracle })
}

fn oracle_rng(seed: u64) -> DeterministicRng {
    DeterministicRng::new(seed.wrapping_add(0xDEAD))
}

fn check_roster(
    seed: u64,
    roster: &Roster,
) -> std::result::Result<(), Vec<InvariantViolation>> {
    let result = BalanceOracle::check_all(roster, &mut oracle_rng(seed));
    debug!(
        seed,
        agents = roster.agents.len(),
        customers = roster.customers.len(),
        passed = result.passed,
        "seed checked"
    );
    if result.passed {
        Ok(())
    } else {
        Err(result.violations)
    }
}
