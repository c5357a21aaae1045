//! `csb scenarios` — run the built-in reference scenarios.

use std::io::{self, Write};
use std::process;

use anyhow::Result;
use clap::Args;
use csb_core::ErrorCode;
use csb_core::scenario::{ScenarioReport, builtin_scenarios, run_all};
use serde::Serialize;

use crate::output::{OutputMode, pretty_section, render, render_error};

#[derive(Args, Debug)]
pub struct ScenariosArgs {
    /// Run only scenarios whose name contains this text.
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScenariosOutput {
    total: usize,
    passed: usize,
    all_passed: bool,
    reports: Vec<ScenarioReport>,
}

fn write_human(out: &ScenariosOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Scenarios")?;
    for report in &out.reports {
        let verdict = if report.passed { "pass" } else { "FAIL" };
        let expected = report
            .expected
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        writeln!(
            w,
            "{verdict:<5} {:<20} got {:<4} expected {:<4} {:>8}us",
            report.name,
            report.outcome.sentinel_id(),
            expected,
            report.elapsed.as_micros()
        )?;
        if report.over_budget() {
            writeln!(w, "      over time budget")?;
        }
    }
    writeln!(w, "{}/{} passed", out.passed, out.total)
}

/// Execute `csb scenarios`.
pub fn run_scenarios(args: &ScenariosArgs, output: OutputMode) -> Result<()> {
    let scenarios: Vec<_> = builtin_scenarios()
        .into_iter()
        .filter(|s| args.filter.as_deref().is_none_or(|f| s.name.contains(f)))
        .collect();

    let reports = run_all(&scenarios);
    let passed = reports.iter().filter(|r| r.passed).count();
    let out = ScenariosOutput {
        total: reports.len(),
        passed,
        all_passed: passed == reports.len(),
        reports,
    };

    render(output, &out, write_human)?;
    if !out.all_passed {
        io::stdout().flush()?;
        let failed = out.total - out.passed;
        render_error(
            output,
            ErrorCode::ExpectationMismatch,
            &format!("{failed} of {} scenarios failed", out.total),
        )?;
        process::exit(1);
    }
    Ok(())
}
