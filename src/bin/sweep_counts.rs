//! Sweep one archetype's seller count and report the LTV response curve
//!
//! Runs the independent projections in parallel and writes a CSV of
//! count -> final total / per-seller efficiency for charting.

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;

use ltv_simulator::{
    ArchetypeTable, PeriodModel, ProjectionConfig, ScenarioRunner, SellerAllocation,
};

#[derive(Parser, Debug)]
#[command(name = "sweep_counts", about = "Sweep an archetype's count and chart the LTV response")]
struct Cli {
    /// Archetype to sweep
    #[arg(long, default_value = "born_successful")]
    archetype: String,

    /// Maximum seller count (inclusive)
    #[arg(long, default_value_t = 5000)]
    max: u32,

    /// Sweep step
    #[arg(long, default_value_t = 50)]
    step: u32,

    /// Period model: "monthly" or "annual"
    #[arg(long, default_value = "monthly")]
    model: String,

    /// Output CSV path
    #[arg(long, default_value = "sweep_output.csv")]
    output: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.step == 0 {
        bail!("step must be positive");
    }

    let (model, table) = match cli.model.as_str() {
        "monthly" => (PeriodModel::MonthlySurvival, ArchetypeTable::default_monthly_sellers()),
        "annual" => (PeriodModel::AnnualRetention, ArchetypeTable::default_annual_segments()),
        other => bail!("unknown model '{}': expected 'monthly' or 'annual'", other),
    };
    if !table.contains(&cli.archetype) {
        bail!("archetype '{}' is not in the {} table", cli.archetype, cli.model);
    }

    let runner = ScenarioRunner::with_table(
        table,
        ProjectionConfig { horizon_years: 5, model },
    );

    let counts: Vec<u32> = (0..=cli.max).step_by(cli.step as usize).collect();
    println!("Sweeping {} from 0 to {} in steps of {}...", cli.archetype, cli.max, cli.step);

    let start = Instant::now();

    // Each projection is independent and deterministic, so the sweep
    // parallelizes without affecting the results
    let rows: Vec<(u32, f64)> = counts
        .par_iter()
        .map(|&count| -> Result<(u32, f64)> {
            let allocation =
                SellerAllocation::from_pairs([(cli.archetype.as_str(), count as i64)])?;
            let result = runner.run(&allocation)?;
            Ok((count, result.final_total()))
        })
        .collect::<Result<Vec<_>>>()?;

    println!("Swept {} counts in {:?}", rows.len(), start.elapsed());

    let mut file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output))?;
    writeln!(file, "Count,Final_Total,LTV_Per_Seller")?;
    for (count, total) in &rows {
        if *count == 0 {
            // Per-seller efficiency is undefined for an empty cohort
            writeln!(file, "{},{:.2},", count, total)?;
        } else {
            writeln!(file, "{},{:.2},{:.2}", count, total, total / *count as f64)?;
        }
    }

    println!("Output written to {}", cli.output);

    if let Some((max_count, max_total)) = rows.last() {
        println!("\nSweep summary:");
        println!("  Count {:>6}: total LTV {:.0}", max_count, max_total);
        if *max_count > 0 {
            println!("  Per-seller LTV at full count: {:.2}", max_total / *max_count as f64);
        }
    }

    Ok(())
}
