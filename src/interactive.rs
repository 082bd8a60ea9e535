use plotly::common::{Line, Marker, Mode};
use plotly::layout::{Axis, AxisType, HoverMode, Shape, ShapeLayer, ShapeLine, ShapeType};
use plotly::{Layout, Plot, Scatter};
use tracing::info;

use crate::chart::{
    duration_range, format_clock, format_daytime_tick, format_duration_tick, hour_ticks,
    FULL_DAY, MIDDAY,
};
use crate::error::Result;
use crate::types::{DayRecord, DaylightTable};

const DURATION_COLOR: &str = "#000080";
const SUNRISE_COLOR: &str = "#FF0000";
const SUNSET_COLOR: &str = "#008000";
const BEFORE_MIDDAY_FILL: &str = "#F0E442";
const AFTER_MIDDAY_FILL: &str = "#009E73";

const DAY_HOVER_FORMAT: &str = "%d %b";

fn tick_axis(ticks: Vec<i64>, label: fn(i64) -> String) -> Axis {
    let text = ticks.iter().map(|t| label(*t)).collect::<Vec<_>>();
    Axis::new()
        .tick_values(ticks.into_iter().map(|t| t as f64).collect())
        .tick_text(text)
        .anchor("x")
        .show_grid(true)
}

fn midday_band(y0: i64, y1: i64, color: &'static str) -> Shape {
    Shape::new()
        .shape_type(ShapeType::Rect)
        .layer(ShapeLayer::Below)
        .x_ref("paper")
        .y_ref("y2")
        .x0(0.0)
        .x1(1.0)
        .y0(y0 as f64)
        .y1(y1 as f64)
        .fill_color(color)
        .opacity(0.2)
        .line(ShapeLine::new().width(0.0))
}

/// Same two stacked charts as the SVG, as a plotly figure: duration on `y`,
/// sunrise and sunset on `y2`, one shared date axis with unified hover.
pub fn interactive_plot(table: &DaylightTable) -> Plot {
    let mut plot = Plot::new();
    let records = &table.records;
    if records.is_empty() {
        return plot;
    }
    let days: Vec<_> = records.iter().map(|r| r.date).collect();

    let durations: Vec<i64> = records.iter().map(|r| r.daylight_duration_seconds).collect();
    plot.add_trace(
        Scatter::new(days.clone(), durations.clone())
            .name("duration")
            .mode(Mode::LinesMarkers)
            .line(Line::new().color(DURATION_COLOR).width(1.0))
            .marker(Marker::new().color(DURATION_COLOR).size(3))
            .text_array(durations.iter().map(|s| format_clock(*s, true)).collect::<Vec<_>>())
            .hover_template("%{text}")
            .x_axis("x")
            .y_axis("y"),
    );

    let series: [(&str, &str, fn(&DayRecord) -> u32); 2] = [
        ("sunrise", SUNRISE_COLOR, |r| r.sunrise_seconds),
        ("sunset", SUNSET_COLOR, |r| r.sunset_seconds),
    ];
    for (label, color, value) in series {
        let seconds: Vec<u32> = records.iter().map(value).collect();
        let hover: Vec<String> = seconds
            .iter()
            .map(|s| format_clock(i64::from(*s), false))
            .collect();
        plot.add_trace(
            Scatter::new(days.clone(), seconds)
                .name(label)
                .mode(Mode::LinesMarkers)
                .line(Line::new().color(color).width(1.0))
                .marker(Marker::new().color(color).size(3))
                .text_array(hover)
                .hover_template("%{text}")
                .x_axis("x")
                .y_axis("y2"),
        );
    }

    let (lo, hi) = duration_range(records);
    let layout = Layout::new()
        .title(format!("Daylight in {}, {}", table.location.name, table.year).as_str())
        .hover_mode(HoverMode::XUnified)
        .x_axis(
            Axis::new()
                .type_(AxisType::Date)
                .anchor("y2")
                .tick_format("%b")
                .hover_format(DAY_HOVER_FORMAT),
        )
        .y_axis(
            tick_axis(hour_ticks(lo, hi, 2), format_duration_tick)
                .title("duration")
                .domain(&[0.55, 1.0])
                .range(vec![lo as f64, hi as f64]),
        )
        .y_axis2(
            tick_axis(hour_ticks(0, FULL_DAY, 4), format_daytime_tick)
                .title("time")
                .domain(&[0.0, 0.45])
                .range(vec![0.0, FULL_DAY as f64]),
        )
        .shapes(vec![
            midday_band(0, MIDDAY, BEFORE_MIDDAY_FILL),
            midday_band(MIDDAY, FULL_DAY, AFTER_MIDDAY_FILL),
        ]);
    plot.set_layout(layout);
    plot
}

pub fn render_html(table: &DaylightTable, path: &str) -> Result<()> {
    std::fs::write(path, interactive_plot(table).to_html())?;
    info!("Interactive chart written to {}", path);
    Ok(())
}
