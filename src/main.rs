//! LTV Simulator CLI
//!
//! Command-line front end for the projection engine: collects archetype
//! seller counts, runs the projection, and renders the yearly curve,
//! contribution breakdown, analytics, and optimization suggestions.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use ltv_simulator::analytics::{average_ltv_per_seller, best_year, contribution_shares, efficiency_ranking};
use ltv_simulator::insights::generate_insights;
use ltv_simulator::{
    ArchetypeTable, PeriodModel, ProjectionConfig, ProjectionEngine, ProjectionResult,
    SellerAllocation,
};

#[derive(Parser, Debug)]
#[command(name = "ltv_simulator", about = "Project 5-year seller LTV by archetype mix")]
struct Cli {
    /// Seller counts as repeated ARCHETYPE=N pairs
    /// (e.g. --count born_successful=226 --count failed=1901)
    #[arg(long = "count", value_name = "ARCHETYPE=N")]
    counts: Vec<String>,

    /// Period model: "monthly" (survival-compounding) or "annual" (growth/retention)
    #[arg(long, default_value = "monthly")]
    model: String,

    /// Projection horizon in years
    #[arg(long, default_value_t = 5)]
    horizon_years: u32,

    /// Load the archetype table from a CSV file instead of the built-ins
    #[arg(long, value_name = "FILE")]
    profiles: Option<PathBuf>,

    /// Write the full projection result as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Write the yearly series as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let model = match cli.model.as_str() {
        "monthly" => PeriodModel::MonthlySurvival,
        "annual" => PeriodModel::AnnualRetention,
        other => bail!("unknown model '{}': expected 'monthly' or 'annual'", other),
    };

    let table = match &cli.profiles {
        Some(path) => ArchetypeTable::from_csv_file(path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("loading archetype table from {}", path.display()))?,
        None => match model {
            PeriodModel::MonthlySurvival => ArchetypeTable::default_monthly_sellers(),
            PeriodModel::AnnualRetention => ArchetypeTable::default_annual_segments(),
        },
    };

    if cli.counts.is_empty() {
        let ids: Vec<&str> = table.iter().map(|p| p.id.as_str()).collect();
        bail!(
            "no seller counts given; pass at least one --count, e.g. --count {}=100 (known archetypes: {})",
            ids.first().unwrap_or(&"archetype"),
            ids.join(", ")
        );
    }

    let allocation = parse_allocation(&cli.counts)?;

    let config = ProjectionConfig {
        horizon_years: cli.horizon_years,
        model,
    };
    let engine = ProjectionEngine::new(table.clone(), config);
    let result = engine.project(&allocation)?;

    print_report(&table, &allocation, &result);

    if let Some(path) = &cli.json {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &result)?;
        println!("\nFull result written to: {}", path.display());
    }

    if let Some(path) = &cli.csv {
        write_csv(path, &result)?;
        println!("\nYearly series written to: {}", path.display());
    }

    Ok(())
}

/// Parse repeated ARCHETYPE=N arguments into an allocation
fn parse_allocation(pairs: &[String]) -> Result<SellerAllocation> {
    let mut allocation = SellerAllocation::new();
    for pair in pairs {
        let (archetype, count) = pair
            .split_once('=')
            .with_context(|| format!("expected ARCHETYPE=N, got '{}'", pair))?;
        let count: i64 = count
            .trim()
            .parse()
            .with_context(|| format!("invalid count in '{}'", pair))?;
        allocation.set(archetype.trim(), count)?;
    }
    Ok(allocation)
}

fn print_report(table: &ArchetypeTable, allocation: &SellerAllocation, result: &ProjectionResult) {
    println!("LTV Simulator v0.1.0");
    println!("====================\n");

    println!("Total sellers: {}", allocation.total_sellers());
    println!("Projected total LTV after {} years: {:.0}\n", result.horizon_years, result.final_total());

    // Yearly curve
    println!("{:>5} {:>16} {:>16}", "Year", "Booked", "Cumulative");
    println!("{}", "-".repeat(40));
    for (i, (booked, cumulative)) in result
        .yearly_booked_totals
        .iter()
        .zip(&result.yearly_totals)
        .enumerate()
    {
        println!("{:>4}Y {:>16.0} {:>16.0}", i + 1, booked, cumulative);
    }

    // Contribution breakdown
    println!("\nContribution by archetype:");
    let shares = contribution_shares(result);
    for series in &result.per_archetype {
        let label = table
            .get(&series.archetype_id)
            .map(|p| p.label.as_str())
            .unwrap_or(series.archetype_id.as_str());
        let share = shares
            .as_ref()
            .and_then(|s| s.iter().find(|(id, _)| *id == series.archetype_id))
            .map(|(_, pct)| format!("{:>5.1}%", pct))
            .unwrap_or_else(|| "   n/a".to_string());
        println!(
            "  {:<20} count={:<6} total={:>14.0} share={}",
            label, series.seller_count, series.total, share
        );
    }

    // Analytics; undefined metrics are suppressed rather than shown as zero
    println!("\nInsights:");
    if let Some(avg) = average_ltv_per_seller(result) {
        println!("  Average LTV per seller: {:.0}", avg);
    }
    if let Some(year) = best_year(result) {
        println!("  Best-performing year: Y{}", year + 1);
    }

    let ranking = efficiency_ranking(result);
    if !ranking.is_empty() {
        println!("\nEfficiency ranking (LTV per seller):");
        for (i, entry) in ranking.iter().enumerate() {
            let label = table
                .get(&entry.archetype_id)
                .map(|p| p.label.as_str())
                .unwrap_or(entry.archetype_id.as_str());
            println!(
                "  {}. {:<20} {:>12.0}/seller ({} sellers)",
                i + 1,
                label,
                entry.ltv_per_seller,
                entry.seller_count
            );
        }
    }

    let suggestions = generate_insights(table, result);
    if !suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &suggestions {
            println!("  - {}", suggestion);
        }
    }
}

/// Write the yearly series as CSV: one row per year, one cumulative column
/// per archetype plus the totals
fn write_csv(path: &PathBuf, result: &ProjectionResult) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = String::from("Year,Booked_Total,Cumulative_Total");
    for series in &result.per_archetype {
        header.push(',');
        header.push_str(&series.archetype_id);
    }
    writeln!(file, "{}", header)?;

    for year in 0..result.horizon_years as usize {
        let mut row = format!(
            "{},{:.2},{:.2}",
            year + 1,
            result.yearly_booked_totals[year],
            result.yearly_totals[year]
        );
        for series in &result.per_archetype {
            row.push_str(&format!(",{:.2}", series.cumulative[year]));
        }
        writeln!(file, "{}", row)?;
    }

    Ok(())
}
