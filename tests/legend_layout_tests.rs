use chart_layout::core::{
    Area, AxisSide, HAlign, LegendMode, LegendOptions, Series, layout_legend,
};
use chart_layout::render::{FontSpec, HeuristicTextMeasurer, TextMeasurer};

fn named(name: &str) -> Series {
    Series::from_samples(name, 0, 60, &[Some(1.0), Some(2.0)])
}

fn options(font: &FontSpec, canvas_width: f64, unique: bool, dual_axis: bool) -> LegendOptions<'_> {
    LegendOptions {
        canvas_width,
        font,
        unique,
        dual_axis,
    }
}

#[test]
fn unique_legend_keeps_first_of_each_name() {
    let font = FontSpec::new("Sans", 10.0);
    let series = vec![named("cpu"), named("cpu"), named("mem")];
    let area = Area::new(10.0, 590.0, 10.0, 290.0);
    let layout = layout_legend(
        &series,
        options(&font, 600.0, true, false),
        area,
        &HeuristicTextMeasurer,
    )
    .expect("legend fits");

    let names: Vec<&str> = layout.entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["cpu", "mem"]);
    assert_eq!(layout.items.len(), 2);
    assert_eq!(layout.rows, 1);
}

#[test]
fn label_width_uses_widest_name_plus_swatch_and_padding() {
    let font = FontSpec::new("Sans", 10.0);
    let measurer = HeuristicTextMeasurer;
    let series = vec![named("a"), named("a.much.longer.name"), named("bb")];
    let layout = layout_legend(
        &series,
        options(&font, 600.0, false, false),
        Area::new(10.0, 590.0, 10.0, 290.0),
        &measurer,
    )
    .expect("legend fits");

    let widest = measurer.measure_text("a.much.longer.name", &font).width;
    let box_size = measurer.font_metrics(&font).height - 1.0;
    assert!((layout.label_width - (widest + 2.0 * (box_size + 5.0))).abs() <= 1e-9);
    assert_eq!(layout.columns, (600.0 / layout.label_width).floor() as usize);
}

#[test]
fn narrow_canvas_falls_back_to_single_flow_for_dual_axis() {
    let font = FontSpec::new("Sans", 10.0);
    let series = vec![
        named("a.rather.long.series.name"),
        named("another.long.series.name").on_axis(AxisSide::Secondary),
    ];
    let layout = layout_legend(
        &series,
        options(&font, 300.0, false, true),
        Area::new(10.0, 290.0, 10.0, 290.0),
        &HeuristicTextMeasurer,
    )
    .expect("legend fits");

    assert_eq!(layout.mode, LegendMode::SingleFlow);
    // Secondary entries are still right-aligned inside their cell.
    assert_eq!(layout.items[1].label.align, HAlign::Right);
}

#[test]
fn empty_series_reserve_nothing() {
    let font = FontSpec::new("Sans", 10.0);
    let area = Area::new(10.0, 590.0, 10.0, 290.0);
    let layout = layout_legend(
        &[],
        options(&font, 600.0, false, false),
        area,
        &HeuristicTextMeasurer,
    )
    .expect("empty legend");
    assert_eq!(layout.reserved_height, 0.0);
    assert_eq!(layout.area, area);
}
