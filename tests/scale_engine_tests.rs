use chart_layout::core::{
    AreaMode, AxisOverrides, Series, YAxisOptions, compute_y_axis, nice_step, select_tick_spec,
    select_x_axis_ticks, stacked_maximum,
};
use proptest::prelude::*;

fn present(name: &str, values: &[f64]) -> Series {
    let samples: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    Series::from_samples(name, 0, 60, &samples)
}

fn is_nice(step: f64) -> bool {
    let magnitude = 10f64.powf(step.log10().floor());
    let mantissa = step / magnitude;
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .any(|nice| (mantissa - nice).abs() <= 1e-9 * nice)
}

#[test]
fn stacked_domain_uses_per_index_sums() {
    let low: Vec<f64> = (0..10).map(f64::from).collect();
    let high: Vec<f64> = (5..15).map(f64::from).collect();
    let a = present("a", &low);
    let b = present("b", &high);

    assert_eq!(stacked_maximum(&[&a, &b]), Some(23.0));

    let options = YAxisOptions {
        area_mode: AreaMode::Stacked,
        ..YAxisOptions::default()
    };
    let scale = compute_y_axis(&[&a, &b], options);
    assert_eq!(scale.y_min, 0.0);
    assert_eq!(scale.y_max, 23.0);
    assert!(scale.y_top >= 23.0);
}

#[test]
fn stacking_a_single_series_keeps_its_extents() {
    let a = present("a", &[4.0, 9.0]);
    let options = YAxisOptions {
        area_mode: AreaMode::Stacked,
        ..YAxisOptions::default()
    };
    let scale = compute_y_axis(&[&a], options);
    assert_eq!((scale.y_min, scale.y_max), (4.0, 9.0));
}

#[test]
fn flat_values_keep_extrema_and_pad_the_grid() {
    let zero = present("z", &[0.0, 0.0]);
    let scale = compute_y_axis(&[&zero], YAxisOptions::default());
    assert_eq!((scale.y_min, scale.y_max), (0.0, 0.0));
    assert_eq!(scale.y_bottom, 0.0);
    assert!((scale.y_top - 1.0).abs() <= 1e-9);

    let flat = present("f", &[50.0, 50.0]);
    let scale = compute_y_axis(&[&flat], YAxisOptions::default());
    assert_eq!((scale.y_min, scale.y_max), (50.0, 50.0));
    assert!(scale.y_bottom <= 50.0);
    assert!(scale.y_top >= 55.0 - 1e-9);
}

#[test]
fn no_present_values_default_to_zero() {
    let empty = Series::from_samples("e", 0, 60, &[None, None]);
    let scale = compute_y_axis(&[&empty], YAxisOptions::default());
    assert_eq!((scale.y_min, scale.y_max), (0.0, 0.0));
    assert!(scale.y_step > 0.0);
    assert!(scale.y_top > scale.y_bottom);
}

#[test]
fn draw_null_as_zero_leaves_positive_minimum_alone() {
    let gappy = Series::from_samples("g", 0, 60, &[Some(5.0), None, Some(10.0)]);
    let options = YAxisOptions {
        draw_null_as_zero: true,
        ..YAxisOptions::default()
    };
    let scale = compute_y_axis(&[&gappy], options);
    assert_eq!(scale.y_min, 5.0);
    assert_eq!(scale.y_max, 10.0);
}

#[test]
fn x_tick_selection_matches_reference_rows() {
    let one_hour = select_x_axis_ticks(3_600.0, 600.0);
    assert_eq!(one_hour.seconds_per_pixel, 10.0);
    assert_eq!(one_hour.label_interval_seconds(), 1_200.0);

    let one_week = select_x_axis_ticks(7.0 * 86_400.0, 600.0);
    assert_eq!(one_week.seconds_per_pixel, 1_200.0);
    assert_eq!(one_week.format, "%m/%d");
}

proptest! {
    #[test]
    fn auto_domain_contains_every_present_value(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..64)
    ) {
        let series = present("s", &values);
        let scale = compute_y_axis(&[&series], YAxisOptions::default());
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let tolerance = scale.y_step * 1e-6;

        prop_assert!(scale.y_step > 0.0);
        prop_assert!(scale.y_min <= lo && scale.y_max >= hi);
        prop_assert!(scale.y_bottom <= lo + tolerance);
        prop_assert!(scale.y_top >= hi - tolerance);
        prop_assert!(scale.y_top > scale.y_bottom);
    }

    #[test]
    fn auto_step_is_nice_and_keeps_grid_small(
        min in -1.0e5f64..1.0e5,
        span in 1.0e-3f64..1.0e6
    ) {
        let step = nice_step(min, min + span);
        prop_assert!(is_nice(step), "step {} is not 1/2/5 x 10^k", step);

        let series = present("s", &[min, min + span]);
        let scale = compute_y_axis(&[&series], YAxisOptions::default());
        let intervals = (scale.span() / scale.y_step).round();
        prop_assert!(intervals <= 8.0, "{} intervals", intervals);
    }

    #[test]
    fn explicit_bounds_win_over_data(
        values in prop::collection::vec(-1.0e3f64..1.0e3, 1..16),
        lo in -5.0e3f64..0.0,
        span in 1.0f64..1.0e4
    ) {
        let series = present("s", &values);
        let hi = lo + span;
        let options = YAxisOptions {
            overrides: AxisOverrides { min: Some(lo), max: Some(hi), step: None },
            ..YAxisOptions::default()
        };
        let scale = compute_y_axis(&[&series], options);
        prop_assert_eq!(scale.y_min, lo);
        prop_assert_eq!(scale.y_max, hi);
        prop_assert_eq!(scale.y_bottom, lo);
        prop_assert_eq!(scale.y_top, hi);
    }

    #[test]
    fn ticks_ascend_from_bottom_to_top(
        values in prop::collection::vec(-1.0e4f64..1.0e4, 1..32)
    ) {
        let series = present("s", &values);
        let scale = compute_y_axis(&[&series], YAxisOptions::default());
        let ticks = scale.ticks();
        prop_assert!(ticks.len() >= 2);
        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!((ticks[0] - scale.y_bottom).abs() <= scale.y_step * 1e-6);
        let last = ticks[ticks.len() - 1];
        prop_assert!((last - scale.y_top).abs() <= scale.y_step * 1e-6);
    }

    #[test]
    fn coarser_ranges_never_pick_finer_labels(
        range in 1.0f64..1.0e8,
        factor in 1.0f64..50.0,
        width in 100.0f64..4_000.0
    ) {
        let narrow = select_tick_spec(range, width);
        let wide = select_tick_spec(range * factor, width);
        prop_assert!(narrow.label_interval_seconds() <= wide.label_interval_seconds());
    }

    #[test]
    fn denser_pixels_never_pick_a_finer_row(
        range in 1.0f64..1.0e8,
        width in 10.0f64..4_000.0,
        shrink in 1.0f64..50.0
    ) {
        let roomy = select_tick_spec(range, width);
        let cramped = select_tick_spec(range, width / shrink);
        prop_assert!(
            roomy.seconds_per_pixel <= cramped.seconds_per_pixel,
            "{} px -> {} s/px, {} px -> {} s/px",
            width,
            roomy.seconds_per_pixel,
            width / shrink,
            cramped.seconds_per_pixel
        );
    }
}
