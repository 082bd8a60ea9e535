pub mod chart;
pub mod daylight;
pub mod error;
pub mod geocoder;
pub mod interactive;
pub mod types;

pub use chart::{
    draw_charts, format_clock, format_daytime_tick, format_duration_tick, render_svg,
};

pub use daylight::{
    build_table, build_year, calc_daylight_info, day_range, day_record, local_day_start,
    SpaSunEvents, SunEvents, SECONDS_PER_DAY,
};

pub use error::{DaylightError, Result};

pub use geocoder::{lookup, parse_coordinate, Database};

pub use interactive::{interactive_plot, render_html};

pub use types::{
    ChartConfig, DayRecord, DaylightColumns, DaylightInfo, DaylightTable, Location, Observer,
};
