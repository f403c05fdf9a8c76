use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::core::UnitSystem;

const SI_PREFIXES: [(&str, f64); 5] = [
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("K", 1e3),
];

const BINARY_PREFIXES: [(&str, f64); 5] = [
    ("Pi", 1_125_899_906_842_624.0),
    ("Ti", 1_099_511_627_776.0),
    ("Gi", 1_073_741_824.0),
    ("Mi", 1_048_576.0),
    ("Ki", 1_024.0),
];

const MAX_LABEL_DECIMALS: u32 = 6;

fn prefixes(system: UnitSystem) -> &'static [(&'static str, f64)] {
    match system {
        UnitSystem::Si => &SI_PREFIXES,
        UnitSystem::Binary => &BINARY_PREFIXES,
        UnitSystem::None => &[],
    }
}

/// Largest prefix reached by both the value and the axis step.
#[must_use]
pub fn unit_prefix(value: f64, step: f64, system: UnitSystem) -> (&'static str, f64) {
    prefixes(system)
        .iter()
        .find(|(_, size)| value.abs() >= *size && step >= *size)
        .map_or(("", 1.0), |(prefix, size)| (*prefix, *size))
}

/// Decimal places needed to print multiples of `step` exactly.
fn step_decimals(step: f64) -> u32 {
    Decimal::from_f64(step)
        .map(|step| step.round_dp(MAX_LABEL_DECIMALS).normalize().scale())
        .unwrap_or(2)
}

/// Formats one Y tick value, e.g. `"250 K"` or `"0.25"`.
#[must_use]
pub fn format_y_label(value: f64, step: f64, system: UnitSystem) -> String {
    let (prefix, size) = unit_prefix(value, step, system);
    let decimals = step_decimals(step / size) as usize;
    let mut scaled = value / size;
    if format!("{:.*}", decimals, scaled.abs())
        .chars()
        .all(|ch| ch == '0' || ch == '.')
    {
        scaled = 0.0;
    }
    let number = format!("{scaled:.decimals$}");
    if prefix.is_empty() {
        number
    } else {
        format!("{number} {prefix}")
    }
}
