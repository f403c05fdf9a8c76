use chart_layout::api::{DisplayFlags, RenderConfig};
use chart_layout::core::{AxisOverrides, AxisStyle, DEFAULT_PALETTE, LineMode, YAxisSide};
use chart_layout::render::Color;
use chart_layout::ChartError;

#[test]
fn defaults_follow_reference_renderer() {
    let config = RenderConfig::default();
    assert_eq!((config.width, config.height, config.margin), (600.0, 300.0, 10.0));
    assert_eq!(config.font.family, "Sans");
    assert_eq!(config.font.size, 10.0);
    assert_eq!(config.line_width, 1.2);
    assert_eq!(config.line_mode, LineMode::Slope);
    assert_eq!(config.y_axis_side, YAxisSide::Left);
    assert_eq!(config.palette, DEFAULT_PALETTE.to_vec());
    assert_eq!(config.hide_legend, None);
}

#[test]
fn config_json_roundtrip() {
    let config = RenderConfig::new(800.0, 400.0)
        .with_title("cpu\nper host")
        .with_hide_legend(true)
        .with_y_overrides(AxisOverrides {
            min: Some(0.0),
            max: None,
            step: Some(10.0),
        })
        .with_side_styles(
            AxisStyle::default(),
            AxisStyle {
                color: Some(Color::RED),
                line_width: 2.0,
                dashed: true,
            },
        );

    let json = config.to_json_pretty().expect("config should serialize");
    let restored = RenderConfig::from_json_str(&json).expect("config should deserialize");
    assert_eq!(restored, config);
}

#[test]
fn partial_json_fills_defaults() {
    let config = RenderConfig::from_json_str(r#"{ "width": 1024.0, "graph_only": true }"#)
        .expect("partial config parses");
    assert_eq!(config.width, 1024.0);
    assert_eq!(config.height, 300.0);
    assert!(config.graph_only);

    let err = RenderConfig::from_json_str("{ not json").expect_err("malformed json");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn display_flags_resolve_auto_legend_and_graph_only() {
    let config = RenderConfig::default();
    assert!(config.display_flags(10).legend);
    assert!(!config.display_flags(11).legend);
    assert!(config.clone().with_hide_legend(false).display_flags(50).legend);

    let graph_only = config.with_graph_only(true).with_hide_legend(false);
    assert_eq!(
        graph_only.display_flags(1),
        DisplayFlags {
            legend: false,
            grid: false,
            axes: false,
            y_axis: false,
        }
    );
}

#[test]
fn title_font_grows_with_log_of_size() {
    assert_eq!(RenderConfig::default().title_font().size, 12.0);
}

#[test]
fn out_of_range_offset_falls_back_to_utc() {
    let config = RenderConfig::default().with_utc_offset_seconds(48 * 3600);
    assert_eq!(config.fixed_offset().local_minus_utc(), 0);
    let config = RenderConfig::default().with_utc_offset_seconds(-5 * 3600);
    assert_eq!(config.fixed_offset().local_minus_utc(), -5 * 3600);
}
