use daylight_chart::{build_year, format_clock, lookup, Database};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let city = "Moscow";
    let year = 2024;

    let db = Database::bundled()?;
    let location = lookup(city, &db)?;
    let table = build_year(city, year)?;

    println!("=== Daylight Calculation Example ===");
    println!(
        "Location: {}, {} ({:.2}°, {:.2}°, {})",
        location.name, location.region, location.latitude, location.longitude, location.timezone
    );
    println!("Year: {} ({} days)", year, table.len());
    println!();
    println!("{:<12} {:>9} {:>9} {:>10}", "date", "sunrise", "sunset", "daylight");
    for record in table.records.iter().step_by(30) {
        println!(
            "{:<12} {:>9} {:>9} {:>10}",
            record.date.to_string(),
            format_clock(i64::from(record.sunrise_seconds), true),
            format_clock(i64::from(record.sunset_seconds), true),
            format_clock(record.daylight_duration_seconds, true),
        );
    }
    println!();
    if let (Some(longest), Some(shortest)) = (table.longest_day(), table.shortest_day()) {
        println!(
            "Longest day:  {} ({})",
            longest.date,
            format_clock(longest.daylight_duration_seconds, true)
        );
        println!(
            "Shortest day: {} ({})",
            shortest.date,
            format_clock(shortest.daylight_duration_seconds, true)
        );
    }

    Ok(())
}
