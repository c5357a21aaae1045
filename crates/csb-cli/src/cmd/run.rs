//! `csb run` — balance a roster loaded from a scenario file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::Args;
use csb_core::{AgentId, Allocation, ErrorCode, Outcome, RosterError, Scenario, load_scenario};
use serde::Serialize;
use tracing::info;

use crate::output::{OutputMode, pretty_kv, render, render_error, render_roster_error};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenario file (.toml or .json).
    pub file: PathBuf,

    /// Print the per-agent breakdown.
    #[arg(long)]
    pub explain: bool,
}

/// JSON output shared by `csb run` and `csb inline`.
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub name: String,
    pub outcome: Outcome,
    /// Winning id, `0` when there is no unique winner.
    pub winner_id: AgentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<AgentId>,
    pub matches_expected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation: Option<Allocation<u32>>,
}

impl RunOutput {
    /// Balance `scenario` and collect what should be shown.
    #[must_use]
    pub fn from_scenario(scenario: &Scenario, explain: bool) -> Self {
        let allocation = scenario.roster.allocate();
        let outcome = allocation.outcome;
        let winner_id = outcome.sentinel_id();
        Self {
            name: scenario.name.clone(),
            outcome,
            winner_id,
            expected: scenario.expected,
            matches_expected: scenario.expected.is_none_or(|e| e == winner_id),
            allocation: explain.then_some(allocation),
        }
    }

    /// Describes a failed expectation, `None` when it held or was absent.
    #[must_use]
    pub fn mismatch_message(&self) -> Option<String> {
        let expected = self.expected.filter(|_| !self.matches_expected)?;
        Some(format!(
            "{}: expected agent id {expected}, got {}",
            self.name, self.winner_id
        ))
    }

    pub fn write_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, "scenario", &self.name)?;
        pretty_kv(w, "result", self.outcome.to_string())?;
        pretty_kv(w, "winner id", self.winner_id.to_string())?;
        if let Some(expected) = self.expected {
            let verdict = if self.matches_expected { "ok" } else { "MISMATCH" };
            pretty_kv(w, "expected", format!("{expected} ({verdict})"))?;
        }
        if let Some(allocation) = &self.allocation {
            writeln!(w)?;
            writeln!(w, "{allocation}")?;
        }
        Ok(())
    }
}

/// Render a balanced scenario and exit non-zero on a failed expectation.
pub fn report(scenario: &Scenario, explain: bool, output: OutputMode) -> Result<()> {
    let out = RunOutput::from_scenario(scenario, explain);
    info!(name = %out.name, outcome = %out.outcome, "roster balanced");
    render(output, &out, RunOutput::write_human)?;
    if let Some(message) = out.mismatch_message() {
        io::stdout().flush()?;
        tracing::warn!(name = %out.name, "expectation mismatch");
        render_error(output, ErrorCode::ExpectationMismatch, &message)?;
        process::exit(1);
    }
    Ok(())
}

/// Execute `csb run`.
pub fn run_run(args: &RunArgs, output: OutputMode) -> Result<()> {
    let scenario = match load_scenario(&args.file) {
        Ok(scenario) => scenario,
        Err(err) => return fail(output, &args.file, &err),
    };
    report(&scenario, args.explain, output)
}

fn fail(output: OutputMode, path: &Path, err: &RosterError) -> Result<()> {
    tracing::error!(path = %path.display(), code = %err.code(), "cannot load scenario");
    render_roster_error(output, err)?;
    process::exit(2);
}
