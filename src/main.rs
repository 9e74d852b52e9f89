//! Offer Engine CLI
//!
//! Console demo: computes the full comparison table for one advisor and
//! writes the per-firm series to CSV.

use std::fs::File;
use std::io::Write;

use anyhow::Result;

use offer_engine::{
    AdvisorProfile, FirmDeal, FirmParameter, InMemoryBestDealStore, MarketData, OfferConfig,
    OfferEngine,
};

fn main() -> Result<()> {
    env_logger::init();

    println!("Offer Engine v0.1.0");
    println!("===================\n");

    // Sample advisor: $180M book, $1.6M trailing, fee-heavy, premium tier
    let profile = AdvisorProfile {
        aum: 180_000_000.0,
        trailing_revenue: 1_600_000.0,
        fee_based_pct: 88.0,
        banking_relationship: true,
        international_countries: vec!["UK".into(), "CH".into()],
        household_count: 140,
        ..AdvisorProfile::default()
    };

    println!("Advisor profile:");
    println!("  AUM: ${:.0}", profile.aum);
    println!("  Trailing revenue: ${:.0}", profile.trailing_revenue);
    println!("  Fee-based: {:.0}%", profile.fee_based_pct);
    println!("  Households: {}", profile.household_count);
    println!();

    // Market data as it would arrive from the external store
    let market = MarketData::new(
        vec![
            FirmParameter::new("Morgan Stanley", "newGridPayout", 0.52),
            FirmParameter::new("UBS", "newGridPayout", 0.51),
        ],
        vec![
            FirmDeal::new("Morgan Stanley", 3.0, 3.5, 0.5, 0.75),
            FirmDeal::new("UBS", 2.75, 3.25, 0.5, 0.5),
            FirmDeal::new("Rockefeller", 3.5, 4.0, 0.75, 1.0),
        ],
    );

    let firm_names: Vec<String> = [
        "Morgan Stanley",
        "UBS",
        "Rockefeller",
        "Raymond James",
        "Independent",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let config = OfferConfig {
        premium_access: true,
        ..OfferConfig::default()
    };
    let engine = OfferEngine::new(config);
    let history = InMemoryBestDealStore::with_value(4.8);

    let result = engine.compute(&profile, &firm_names, &market, &history);

    // Print the comparison table
    let horizon = result.comparison[0].years.len();
    print!("{:<20}", "Firm");
    for year in 1..=horizon {
        print!("{:>8}", format!("Y{}", year));
    }
    println!("{:>10}", "Total");
    println!("{}", "-".repeat(20 + 8 * horizon + 10));

    for series in &result.comparison {
        print!("{:<20}", series.firm.display_name());
        for y in &series.years {
            print!("{:>8.2}", y.value);
        }
        println!("{:>10.2}", series.total());
    }

    println!("\nMetrics:");
    println!(
        "  Best total deal: ${:.2}M ({:+.1}% vs prior)",
        result.metrics.total_deal.value, result.metrics.total_deal.pct_change
    );
    if let Some(firm) = result.best_firm {
        println!("  Best firm: {}", firm.display_name());
    }
    println!(
        "  Increased earnings from moving: ${:.0}",
        result.metrics.total_comp_delta.value
    );
    println!(
        "  Backend composition: growth {:.0}% / assets {:.0}% / tenure {:.0}%",
        result.backend_composition.growth_pct,
        result.backend_composition.assets_pct,
        result.backend_composition.tenure_pct
    );

    // Write full comparison to CSV
    let csv_path = "offer_comparison.csv";
    let mut file = File::create(csv_path)?;

    write!(file, "Firm,GuaranteedUpfront")?;
    for year in 1..=horizon {
        write!(file, ",Year{}", year)?;
    }
    writeln!(file, ",Total")?;

    for (series, upfront) in result.comparison.iter().zip(&result.guaranteed_upfront) {
        write!(
            file,
            "{},{:.4}",
            series.firm.display_name(),
            upfront.value
        )?;
        for y in &series.years {
            write!(file, ",{:.4}", y.value)?;
        }
        writeln!(file, ",{:.4}", series.total())?;
    }

    println!("\nFull comparison written to: {}", csv_path);

    Ok(())
}
