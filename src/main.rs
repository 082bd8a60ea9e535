use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use daylight_chart::{build_year, format_clock, render_html, render_svg, ChartConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ChartConfig::default();
    let year = config.resolved_year();
    info!("Building daylight table for {} in {}", config.city, year);

    let table = build_year(&config.city, year)
        .with_context(|| format!("failed to compute daylight for {}", config.city))?;

    if let (Some(longest), Some(shortest)) = (table.longest_day(), table.shortest_day()) {
        info!(
            "Longest day {} ({}), shortest day {} ({})",
            longest.date,
            format_clock(longest.daylight_duration_seconds, true),
            shortest.date,
            format_clock(shortest.daylight_duration_seconds, true),
        );
    }

    render_svg(&table, &config)?;
    if let Some(path) = &config.html_path {
        render_html(&table, path)?;
    }

    if let Some(path) = &config.json_path {
        let file = File::create(path).with_context(|| format!("failed to create {}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &table.to_columns())?;
        info!("Column data written to {}", path);
    }

    Ok(())
}
