use chart_layout::core::{AxisSide, AxisStyle, ColorAssigner, DEFAULT_PALETTE, Series};
use chart_layout::render::Color;
use proptest::prelude::*;

fn build(explicit: &[bool]) -> Vec<Series> {
    explicit
        .iter()
        .enumerate()
        .map(|(index, has_color)| {
            let series = Series::from_samples(format!("s{index}"), 0, 10, &[Some(1.0)]);
            if *has_color {
                series.with_color(Color::rgb8(1, 2, 3))
            } else {
                series
            }
        })
        .collect()
}

#[test]
fn default_palette_starts_with_blue_green_red() {
    let mut series = build(&[false, false, false]);
    ColorAssigner::new(&DEFAULT_PALETTE).assign(&mut series);
    let colors: Vec<Color> = series
        .iter()
        .map(|item| item.style.expect("style assigned").color)
        .collect();
    assert_eq!(
        colors,
        vec![
            Color::parse("blue").expect("named"),
            Color::parse("green").expect("named"),
            Color::parse("red").expect("named"),
        ]
    );
}

#[test]
fn side_color_overrides_palette_but_not_explicit_color() {
    let left = AxisStyle {
        color: Some(Color::rgb8(10, 10, 10)),
        ..AxisStyle::default()
    };
    let mut series = vec![
        Series::from_samples("a", 0, 10, &[Some(1.0)]),
        Series::from_samples("b", 0, 10, &[Some(1.0)]).with_color(Color::WHITE),
        Series::from_samples("c", 0, 10, &[Some(1.0)]).on_axis(AxisSide::Secondary),
    ];
    ColorAssigner::new(&[])
        .with_side_styles(left, AxisStyle::default())
        .assign(&mut series);

    let colors: Vec<Color> = series
        .iter()
        .map(|item| item.style.expect("style assigned").color)
        .collect();
    assert_eq!(
        colors,
        vec![Color::rgb8(10, 10, 10), Color::WHITE, DEFAULT_PALETTE[0]]
    );
}

proptest! {
    #[test]
    fn assignment_is_deterministic_and_idempotent(
        explicit in prop::collection::vec(any::<bool>(), 0..40)
    ) {
        let mut first = build(&explicit);
        let mut second = build(&explicit);
        let assigner = ColorAssigner::new(&DEFAULT_PALETTE).with_line(2.0, true);
        assigner.assign(&mut first);
        assigner.assign(&mut second);
        prop_assert_eq!(&first, &second);

        let snapshot = first.clone();
        assigner.assign(&mut first);
        prop_assert_eq!(first, snapshot);
    }

    #[test]
    fn palette_cursor_skips_explicit_series(
        explicit in prop::collection::vec(any::<bool>(), 0..40)
    ) {
        let mut series = build(&explicit);
        ColorAssigner::new(&DEFAULT_PALETTE).assign(&mut series);

        let mut cursor = 0;
        for (item, has_color) in series.iter().zip(&explicit) {
            let style = item.style.expect("style assigned");
            if *has_color {
                prop_assert_eq!(style.color, Color::rgb8(1, 2, 3));
            } else {
                prop_assert_eq!(style.color, DEFAULT_PALETTE[cursor % DEFAULT_PALETTE.len()]);
                cursor += 1;
            }
        }
    }
}
