#![forbid(unsafe_code)]

use anyhow::Result;
use csb_sim::{CampaignConfig, init_tracing, run_campaign};

fn main() -> Result<()> {
    init_tracing(false);

    let report = run_campaign(&CampaignConfig::default())?;

    println!(
        "campaign complete: seeds={} passed={} winners={} first_failure={:?}",
        report.seeds_run, report.seeds_passed, report.winners_found, report.first_failure
    );

    if !report.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
