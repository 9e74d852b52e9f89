//! Run offer projections for an entire advisor book
//!
//! Reads a CSV book export, computes offers for every advisor in
//! parallel, and writes one summary row per advisor.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;

use offer_engine::{
    advisor::{load_book, BookEntry},
    MarketData, OfferConfig, OfferEngine, OfferResult,
};

#[derive(Parser, Debug)]
#[command(name = "run_book", about = "Batch offer projections for an advisor book")]
struct Args {
    /// Path to the advisor book CSV
    #[arg(long)]
    input: PathBuf,

    /// Directory containing firm_parameters.csv and firm_deals.csv;
    /// omitted means empty tables and business defaults everywhere
    #[arg(long)]
    market: Option<PathBuf>,

    /// Comma-separated raw firm names to compare
    #[arg(long, value_delimiter = ',', default_value = "morgan stanley,ubs,merrill lynch,raymond james,independent")]
    firms: Vec<String>,

    /// Projection horizon in years
    #[arg(long, default_value_t = 10)]
    years: u32,

    /// Annual book growth rate
    #[arg(long, default_value_t = 0.08)]
    growth: f64,

    /// Honor advanced business-mix attributes
    #[arg(long)]
    premium: bool,

    /// Output CSV path
    #[arg(long, default_value = "book_offers.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let book = load_book(&args.input)
        .with_context(|| format!("loading advisor book {:?}", args.input))?;
    println!("Loaded {} advisors in {:?}", book.len(), start.elapsed());

    let market = match &args.market {
        Some(dir) => MarketData::from_csv_path(dir)
            .with_context(|| format!("loading market data from {:?}", dir))?,
        None => MarketData::empty(),
    };

    let config = OfferConfig {
        horizon_years: args.years,
        annual_growth_rate: args.growth,
        premium_access: args.premium,
        ..OfferConfig::default()
    };

    println!("Computing offers...");
    let compute_start = Instant::now();

    let results: Vec<(&BookEntry, OfferResult)> = book
        .par_iter()
        .map(|entry| {
            let engine = OfferEngine::new(config.clone());
            let result = engine.compute(
                &entry.profile,
                &args.firms,
                &market,
                &offer_engine::NoHistory,
            );
            (entry, result)
        })
        .collect();

    println!(
        "Computed {} results in {:?}",
        results.len(),
        compute_start.elapsed()
    );

    let mut file = File::create(&args.output)
        .with_context(|| format!("creating output file {:?}", args.output))?;
    writeln!(
        file,
        "AdvisorId,TrailingRevenue,BestFirm,TotalDealMillions,CompDelta"
    )?;

    for (entry, result) in &results {
        writeln!(
            file,
            "{},{:.2},{},{:.4},{:.2}",
            entry.advisor_id,
            result.metrics.trailing_revenue.value,
            result
                .best_firm
                .map(|f| f.display_name())
                .unwrap_or("(fallback)"),
            result.metrics.total_deal.value,
            result.metrics.total_comp_delta.value,
        )?;
    }

    println!("Summary written to: {:?}", args.output);

    Ok(())
}
