use chrono::{Duration, NaiveDate};
use plotters::coord::combinators::BindKeyPoints;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::error::{DaylightError, Result};
use crate::types::{ChartConfig, DayRecord, DaylightTable};

pub(crate) const HOUR: i64 = 60 * 60;
pub(crate) const MIDDAY: i64 = 12 * HOUR;
pub(crate) const FULL_DAY: i64 = 24 * HOUR;

const DURATION_COLOR: RGBColor = RGBColor(0, 0, 128);
const SUNRISE_COLOR: RGBColor = RGBColor(255, 0, 0);
const SUNSET_COLOR: RGBColor = RGBColor(0, 128, 0);
const BEFORE_MIDDAY_FILL: RGBColor = RGBColor(0xF0, 0xE4, 0x42);
const AFTER_MIDDAY_FILL: RGBColor = RGBColor(0x00, 0x9E, 0x73);

pub fn format_clock(seconds: i64, include_seconds: bool) -> String {
    let (h, m, s) = (seconds / HOUR, (seconds % HOUR) / 60, seconds % 60);
    if include_seconds {
        format!("{:02}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", h, m)
    }
}

pub fn format_daytime_tick(seconds: i64) -> String {
    match seconds {
        MIDDAY => "midday".to_string(),
        FULL_DAY => "24:00".to_string(),
        _ => format_clock(seconds, false),
    }
}

pub fn format_duration_tick(seconds: i64) -> String {
    format_clock(seconds, true)
}

pub(crate) fn hour_ticks(start: i64, end: i64, step_hours: i64) -> Vec<i64> {
    (0..=24)
        .step_by(step_hours as usize)
        .map(|h| h * HOUR)
        .filter(|t| (start..=end).contains(t))
        .collect()
}

pub(crate) fn duration_range(records: &[DayRecord]) -> (i64, i64) {
    let lo = records
        .iter()
        .map(|r| r.daylight_duration_seconds)
        .min()
        .unwrap_or(6 * HOUR);
    let hi = records
        .iter()
        .map(|r| r.daylight_duration_seconds)
        .max()
        .unwrap_or(18 * HOUR);
    let lo = (lo / HOUR * HOUR).min(6 * HOUR).max(0);
    let hi = ((hi + HOUR - 1) / HOUR * HOUR).max(18 * HOUR).min(FULL_DAY);
    (lo, hi)
}

pub fn draw_charts<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &DaylightTable,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let records = &table.records;
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Ok(());
    };
    let x_range = first.date..last.date + Duration::days(1);
    let month_label = |d: &NaiveDate| d.format("%b").to_string();

    root.fill(&WHITE)?;
    let (upper, lower) = root.split_vertically((root.dim_in_pixel().1 / 2) as i32);

    // Daylight duration
    let (lo, hi) = duration_range(records);
    let mut duration_chart = ChartBuilder::on(&upper)
        .caption("Daylight duration", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(
            x_range.clone(),
            (lo..hi).with_key_points(hour_ticks(lo, hi, 2)),
        )?;
    duration_chart
        .configure_mesh()
        .x_labels(12)
        .y_labels(13)
        .x_label_formatter(&month_label)
        .y_label_formatter(&|v: &i64| format_duration_tick(*v))
        .y_desc("duration")
        .draw()?;
    duration_chart
        .draw_series(LineSeries::new(
            records.iter().map(|r| (r.date, r.daylight_duration_seconds)),
            DURATION_COLOR.stroke_width(1),
        ))?
        .label("duration")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], DURATION_COLOR.stroke_width(1))
        });
    duration_chart.draw_series(records.iter().map(|r| {
        Circle::new(
            (r.date, r.daylight_duration_seconds),
            2,
            DURATION_COLOR.stroke_width(1),
        )
    }))?;
    duration_chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    // Sunrise & sunset
    let mut time_chart = ChartBuilder::on(&lower)
        .caption("Sunrise & sunset time", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(
            x_range.clone(),
            (0..FULL_DAY).with_key_points(hour_ticks(0, FULL_DAY, 4)),
        )?;
    time_chart
        .configure_mesh()
        .x_labels(12)
        .y_labels(7)
        .x_label_formatter(&month_label)
        .y_label_formatter(&|v: &i64| format_daytime_tick(*v))
        .y_desc("time")
        .draw()?;
    time_chart.draw_series(std::iter::once(Rectangle::new(
        [(x_range.start, 0), (x_range.end, MIDDAY)],
        BEFORE_MIDDAY_FILL.mix(0.2).filled(),
    )))?;
    time_chart.draw_series(std::iter::once(Rectangle::new(
        [(x_range.start, MIDDAY), (x_range.end, FULL_DAY)],
        AFTER_MIDDAY_FILL.mix(0.2).filled(),
    )))?;

    let series: [(&str, RGBColor, fn(&DayRecord) -> u32); 2] = [
        ("sunrise", SUNRISE_COLOR, |r| r.sunrise_seconds),
        ("sunset", SUNSET_COLOR, |r| r.sunset_seconds),
    ];
    for (label, color, value) in series {
        time_chart
            .draw_series(LineSeries::new(
                records.iter().map(|r| (r.date, i64::from(value(r)))),
                color.stroke_width(1),
            ))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(1))
            });
        time_chart.draw_series(
            records
                .iter()
                .map(|r| Circle::new((r.date, i64::from(value(r))), 2, color.stroke_width(1))),
        )?;
    }
    time_chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

pub fn render_svg(table: &DaylightTable, config: &ChartConfig) -> Result<()> {
    let root =
        SVGBackend::new(&config.svg_path, (config.width, config.height)).into_drawing_area();
    draw_charts(&root, table).map_err(|e| DaylightError::Render(e.to_string()))?;
    root.present()
        .map_err(|e| DaylightError::Render(e.to_string()))?;
    info!("Chart written to {}", config.svg_path);
    Ok(())
}
