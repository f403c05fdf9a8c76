use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// Calendar unit used by grid and label steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 60 * 60,
            Self::Day => 24 * 60 * 60,
        }
    }
}

/// One row of the X axis granularity table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickSpec {
    /// Row applies up to this many seconds per pixel.
    pub seconds_per_pixel: f64,
    pub minor_grid_unit: TimeUnit,
    pub minor_grid_step: f64,
    pub major_grid_unit: TimeUnit,
    pub major_grid_step: f64,
    pub label_unit: TimeUnit,
    pub label_step: f64,
    /// strftime pattern for labels.
    pub format: &'static str,
    /// Longest total time range, in seconds, this row is meant for.
    pub max_interval: i64,
}

impl TickSpec {
    #[must_use]
    pub fn label_interval_seconds(&self) -> f64 {
        self.label_unit.seconds() as f64 * self.label_step
    }

    #[must_use]
    pub fn minor_interval_seconds(&self) -> f64 {
        self.minor_grid_unit.seconds() as f64 * self.minor_grid_step
    }

    #[must_use]
    pub fn major_interval_seconds(&self) -> f64 {
        self.major_grid_unit.seconds() as f64 * self.major_grid_step
    }
}

const fn row(
    seconds_per_pixel: f64,
    minor: (TimeUnit, f64),
    major: (TimeUnit, f64),
    label: (TimeUnit, f64),
    format: &'static str,
    max_interval: i64,
) -> TickSpec {
    TickSpec {
        seconds_per_pixel,
        minor_grid_unit: minor.0,
        minor_grid_step: minor.1,
        major_grid_unit: major.0,
        major_grid_step: major.1,
        label_unit: label.0,
        label_step: label.1,
        format,
        max_interval,
    }
}

const MIN: i64 = 60;
const HOUR: i64 = 60 * MIN;
const DAY: i64 = 24 * HOUR;

use self::TimeUnit::{Day, Hour, Minute, Second};

/// Granularity rows ordered by ascending seconds-per-pixel.
pub static TICK_TABLE: [TickSpec; 23] = [
    row(0.0, (Second, 5.0), (Minute, 1.0), (Second, 5.0), "%H:%M:%S", 10 * MIN),
    row(0.07, (Second, 10.0), (Minute, 1.0), (Second, 10.0), "%H:%M:%S", 20 * MIN),
    row(0.14, (Second, 15.0), (Minute, 1.0), (Second, 15.0), "%H:%M:%S", 30 * MIN),
    row(0.27, (Second, 30.0), (Minute, 2.0), (Minute, 1.0), "%H:%M", 2 * HOUR),
    row(0.5, (Minute, 1.0), (Minute, 2.0), (Minute, 1.0), "%H:%M", 2 * HOUR),
    row(1.2, (Minute, 1.0), (Minute, 4.0), (Minute, 2.0), "%H:%M", 3 * HOUR),
    row(2.0, (Minute, 1.0), (Minute, 10.0), (Minute, 5.0), "%H:%M", 6 * HOUR),
    row(5.0, (Minute, 2.0), (Minute, 10.0), (Minute, 10.0), "%H:%M", 12 * HOUR),
    row(10.0, (Minute, 5.0), (Minute, 20.0), (Minute, 20.0), "%H:%M", DAY),
    row(30.0, (Minute, 10.0), (Hour, 1.0), (Hour, 1.0), "%H:%M", 2 * DAY),
    row(60.0, (Minute, 30.0), (Hour, 2.0), (Hour, 2.0), "%H:%M", 2 * DAY),
    row(100.0, (Hour, 2.0), (Hour, 4.0), (Hour, 4.0), "%a %l%p", 2 * DAY),
    row(255.0, (Hour, 6.0), (Hour, 12.0), (Hour, 12.0), "%a %l%p", 10 * DAY),
    row(600.0, (Hour, 6.0), (Day, 1.0), (Day, 1.0), "%m/%d", 14 * DAY),
    row(1200.0, (Hour, 12.0), (Day, 1.0), (Day, 1.0), "%m/%d", 365 * DAY),
    row(2000.0, (Day, 1.0), (Day, 2.0), (Day, 2.0), "%m/%d", 365 * DAY),
    row(4000.0, (Day, 2.0), (Day, 4.0), (Day, 4.0), "%m/%d", 365 * DAY),
    row(8000.0, (Day, 3.5), (Day, 7.0), (Day, 7.0), "%m/%d", 365 * DAY),
    row(16000.0, (Day, 7.0), (Day, 14.0), (Day, 14.0), "%m/%d", 365 * DAY),
    row(32000.0, (Day, 15.0), (Day, 30.0), (Day, 30.0), "%m/%d", 365 * DAY),
    row(64000.0, (Day, 30.0), (Day, 60.0), (Day, 60.0), "%m/%d %Y", 365 * DAY),
    row(100000.0, (Day, 60.0), (Day, 120.0), (Day, 120.0), "%m/%d %Y", 365 * DAY),
    row(120000.0, (Day, 120.0), (Day, 240.0), (Day, 240.0), "%m/%d %Y", 365 * DAY),
];

/// Seconds of data per horizontal pixel; non-positive widths map to infinity.
#[must_use]
pub fn time_density(time_range_seconds: f64, pixel_width: f64) -> f64 {
    if pixel_width > 0.0 {
        time_range_seconds / pixel_width
    } else {
        f64::INFINITY
    }
}

/// Picks the first row fine enough for the density that also spans the range.
///
/// Falls back to the coarsest row when nothing matches.
#[must_use]
pub fn select_tick_spec(time_range_seconds: f64, pixel_width: f64) -> &'static TickSpec {
    let density = time_density(time_range_seconds, pixel_width);
    TICK_TABLE
        .iter()
        .find(|spec| {
            spec.seconds_per_pixel >= density && spec.max_interval as f64 >= time_range_seconds
        })
        .unwrap_or(&TICK_TABLE[TICK_TABLE.len() - 1])
}

/// Timestamps aligned to `interval` inside `[start, end]`.
#[must_use]
pub fn aligned_times(start: i64, end: i64, interval: f64) -> Vec<i64> {
    if !interval.is_finite() || interval <= 0.0 || end < start {
        return Vec::new();
    }
    let first = (start as f64 / interval).ceil() * interval;
    let count = ((end as f64 - first) / interval).floor();
    if count < 0.0 {
        return Vec::new();
    }
    (0..=count as i64)
        .map(|index| (first + index as f64 * interval).round() as i64)
        .collect()
}

/// Formats a unix timestamp with a strftime pattern in a fixed offset.
#[must_use]
pub fn format_time_label(timestamp: i64, format: &str, offset: FixedOffset) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(&offset).format(format).to_string(),
        None => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_by_density() {
        assert!(
            TICK_TABLE
                .windows(2)
                .all(|pair| pair[0].seconds_per_pixel < pair[1].seconds_per_pixel)
        );
    }

    #[test]
    fn one_day_on_500_pixels_uses_twelve_hour_labels() {
        let spec = select_tick_spec(DAY as f64, 500.0);
        assert_eq!(spec.seconds_per_pixel, 255.0);
        assert_eq!(spec.label_interval_seconds(), 12.0 * HOUR as f64);
    }

    #[test]
    fn short_ranges_need_both_density_and_interval() {
        // 0.12 s/px only fits the 0.14 row, which also covers 60 seconds.
        let spec = select_tick_spec(60.0, 500.0);
        assert_eq!(spec.seconds_per_pixel, 0.14);
        // 0.5 s/px fits the 0.5 row but three hours exceed its max interval.
        let spec = select_tick_spec(3.0 * HOUR as f64, 21_600.0);
        assert_eq!(spec.seconds_per_pixel, 1.2);
    }

    #[test]
    fn huge_ranges_fall_back_to_coarsest_row() {
        let spec = select_tick_spec(10.0 * 365.0 * DAY as f64, 100.0);
        assert_eq!(spec, &TICK_TABLE[TICK_TABLE.len() - 1]);
        let spec = select_tick_spec(100.0, 0.0);
        assert_eq!(spec, &TICK_TABLE[TICK_TABLE.len() - 1]);
    }

    #[test]
    fn aligned_times_start_on_interval_boundaries() {
        assert_eq!(aligned_times(61, 250, 60.0), vec![120, 180, 240]);
        assert!(aligned_times(10, 5, 60.0).is_empty());
        assert!(aligned_times(0, 5, 0.0).is_empty());
    }

    #[test]
    fn labels_respect_offset() {
        let utc = FixedOffset::east_opt(0).expect("utc");
        let plus_two = FixedOffset::east_opt(2 * 3600).expect("+02:00");
        assert_eq!(format_time_label(3_600, "%H:%M", utc), "01:00");
        assert_eq!(format_time_label(3_600, "%H:%M", plus_two), "03:00");
    }
}
