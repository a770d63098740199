//! Terminal output for the `homefinder` commands.

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use homefinder_core::{AttributeIndex, LoadReport};
use serde_json::json;

use crate::search::{Indexes, SearchResponse, Timing};

/// Output format for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

/// Prints one build report per variant.
pub fn print_build(total: usize, reports: &[LoadReport]) {
    println!("{} {}", "Records:".bold(), total);
    for report in reports {
        println!("\n{}", format!("{} index", report.variant).green().bold());
        println!("  Rows indexed:     {}", report.rows);
        println!(
            "  Parsed:           bedrooms={} fullbaths={} price={}",
            report.parsed.bedrooms, report.parsed.fullbaths, report.parsed.price
        );
        println!("  Max bedrooms:     {}", report.max_bedrooms);
        println!("  Max full baths:   {}", report.max_fullbaths);
        println!("  Posting keys:     {}", report.posting_keys);
        println!(
            "  Build time:       {:.3} ms",
            report.elapsed.as_secs_f64() * 1000.0
        );
    }
}

fn print_timing(name: &str, timing: Option<Timing>) {
    if let Some(t) = timing {
        println!("  {:<8} {} matches in {:.3} ms", name.yellow(), t.count, t.time_ms);
    }
}

/// Prints a query response.
pub fn print_search(response: &SearchResponse, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    println!("{}", "Performance".bold());
    print_timing("hashset", response.performance.hashset);
    print_timing("posting", response.performance.posting);

    if response.homes.is_empty() {
        println!("\nNo homes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let header: Vec<Cell> = [
        "id", "beds", "baths", "price", "built", "address", "sqft", "lat", "lon",
    ]
    .iter()
    .map(|c| Cell::new(c).fg(Color::Cyan))
    .collect();
    table.set_header(header);

    for home in &response.homes {
        table.add_row(vec![
            Cell::new(home.id),
            Cell::new(&home.bedrooms),
            Cell::new(&home.bathrooms),
            Cell::new(home.price.map_or_else(|| "N/A".to_string(), |p| format!("${p:.0}"))),
            Cell::new(or_na(home.year_built)),
            Cell::new(&home.address),
            Cell::new(&home.building_sqft),
            Cell::new(or_na(home.latitude)),
            Cell::new(or_na(home.longitude)),
        ]);
    }
    println!("\n{table}");
    println!("{} homes shown", response.homes.len());
    Ok(())
}

/// Prints posting key counts and maxima of both variants as JSON.
pub fn print_stats(total: usize, indexes: &Indexes) -> anyhow::Result<()> {
    let stats = json!({
        "total_properties": total,
        "hashset_index": section(&indexes.hashset),
        "posting_index": section(&indexes.posting),
    });
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn section<I: AttributeIndex>(index: &I) -> serde_json::Value {
    json!({
        "posting_keys": index.posting_key_count(),
        "max_bedrooms": index.max_bedrooms(),
        "max_bathrooms": index.max_fullbaths(),
    })
}
