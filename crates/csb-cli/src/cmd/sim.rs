//! `csb sim` — randomized campaigns that cross-check the balancer.
//!
//! `csb sim run` — execute a campaign across many seeds.
//! `csb sim replay` — replay a single seed and show its roster and verdict.

use std::io::Write;
use std::process;

use anyhow::Result;
use clap::{Args, Subcommand};
use csb_sim::campaign::{CampaignConfig, replay_seed, run_campaign};
use csb_sim::generator::RosterShape;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section};

#[derive(Args, Debug)]
pub struct SimArgs {
    #[command(subcommand)]
    pub command: SimCommand,
}

#[derive(Subcommand, Debug)]
pub enum SimCommand {
    #[command(
        about = "Run a balancing campaign across multiple seeds",
        after_help = "EXAMPLES:\n    # Run 1000 seeds with defaults\n    csb sim run --seeds 1000\n\n\
                      # Narrow score range to force ties\n    csb sim run --max-score 5 --json"
    )]
    Run(SimRunArgs),

    #[command(
        about = "Replay a single seed",
        after_help = "EXAMPLES:\n    # Replay seed 42\n    csb sim replay --seed 42"
    )]
    Replay(SimReplayArgs),
}

/// Roster bounds shared by both subcommands.
#[derive(Args, Debug, Clone)]
pub struct ShapeArgs {
    /// Maximum number of agents per roster.
    #[arg(long, default_value = "12")]
    pub max_agents: usize,

    /// Maximum number of customers per roster.
    #[arg(long, default_value = "80")]
    pub max_customers: usize,

    /// Scores are drawn from 0..max-score.
    #[arg(long, default_value = "40")]
    pub max_score: u32,

    /// Percent chance that an agent is away.
    #[arg(long, default_value = "20")]
    pub away_percent: u8,
}

impl ShapeArgs {
    const fn to_shape(&self) -> RosterShape {
        RosterShape {
            max_agents: self.max_agents,
            max_customers: self.max_customers,
            max_score: self.max_score,
            away_percent: self.away_percent,
            stray_away_percent: 5,
        }
    }
}

#[derive(Args, Debug)]
pub struct SimRunArgs {
    /// Number of seeds to run.
    #[arg(long, default_value = "500")]
    pub seeds: u64,

    /// Starting seed value.
    #[arg(long, default_value = "0")]
    pub seed_start: u64,

    #[command(flatten)]
    pub shape: ShapeArgs,
}

#[derive(Args, Debug)]
pub struct SimReplayArgs {
    /// Seed to replay.
    #[arg(long)]
    pub seed: u64,

    #[command(flatten)]
    pub shape: ShapeArgs,
}

#[derive(Debug, Serialize)]
struct ReplayOutput {
    seed: u64,
    agents: usize,
    customers: usize,
    away: usize,
    winner_id: u32,
    oracle_passed: bool,
    violations: Vec<String>,
}

/// Execute `csb sim run`.
pub fn run_sim_run(args: &SimRunArgs, output: OutputMode) -> Result<()> {
    let config = CampaignConfig {
        seed_range: args.seed_start..args.seed_start.saturating_add(args.seeds),
        shape: args.shape.to_shape(),
    };
    let report = run_campaign(&config)?;

    match output {
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputMode::Human => {
            let mut out = std::io::stdout().lock();
            pretty_section(&mut out, "Campaign")?;
            pretty_kv(&mut out, "seeds", report.seeds_run.to_string())?;
            pretty_kv(&mut out, "passed", report.seeds_passed.to_string())?;
            pretty_kv(&mut out, "winners", report.winners_found.to_string())?;
            pretty_kv(&mut out, "dup scores", report.duplicate_scores_seen.to_string())?;
            for failure in report.failures.iter().take(5) {
                pretty_kv(
                    &mut out,
                    "failure",
                    format!("seed={} {}", failure.seed, failure.violations.join("; ")),
                )?;
            }
        }
    }

    if !report.all_passed() {
        process::exit(1);
    }
    Ok(())
}

/// Execute `csb sim replay`.
pub fn run_sim_replay(args: &SimReplayArgs, output: OutputMode) -> Result<()> {
    let config = CampaignConfig {
        seed_range: args.seed..args.seed.saturating_add(1),
        shape: args.shape.to_shape(),
    };
    let trace = replay_seed(args.seed, &config)?;

    let out = ReplayOutput {
        seed: args.seed,
        agents: trace.roster.agents.len(),
        customers: trace.roster.customers.len(),
        away: trace.roster.away.len(),
        winner_id: trace.roster.execute().sentinel_id(),
        oracle_passed: trace.oracle.passed,
        violations: trace.oracle.violations.iter().map(ToString::to_string).collect(),
    };

    match output {
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&out)?),
        OutputMode::Human => {
            let mut w = std::io::stdout().lock();
            pretty_section(&mut w, &format!("Seed {}", out.seed))?;
            pretty_kv(
                &mut w,
                "roster",
                format!(
                    "{} agents, {} customers, {} away",
                    out.agents, out.customers, out.away
                ),
            )?;
            pretty_kv(&mut w, "winner id", out.winner_id.to_string())?;
            pretty_kv(&mut w, "oracle", if out.oracle_passed { "pass" } else { "FAIL" })?;
            for violation in &out.violations {
                pretty_kv(&mut w, "violation", violation)?;
            }
            if !trace.roster.agents.is_empty() {
                writeln!(w)?;
                writeln!(w, "{}", trace.roster.allocate())?;
            }
        }
    }

    if !out.oracle_passed {
        process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: SimRunArgs,
    }

    #[test]
    fn sim_run_defaults_match_campaign_defaults() {
        let w = Wrapper::parse_from(["test"]);
        assert_eq!(w.args.seeds, 500);
        assert_eq!(w.args.shape.to_shape(), RosterShape::default());
    }
}
