//! Tooltip text for circles and overlap regions.

use lensplot_core::{diagram::IntersectionRegion, model::SetSpec};

/// Formats a count with thousands separators and at most three decimals.
///
/// # Examples
///
/// ```
/// # use lensplot::tooltip::format_count;
/// assert_eq!(format_count(12000.0), "12,000");
/// assert_eq!(format_count(1234.5), "1,234.5");
/// assert_eq!(format_count(-7.0), "-7");
/// ```
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = format!("{:.3}", value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    if value < 0.0 && (whole != "0" || !fraction.is_empty()) {
        grouped.push('-');
    }
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Tooltip for a set circle: its size, then its hinted relations.
pub fn set_tooltip(set: &SetSpec) -> String {
    let mut text = format!("{}: {}", set.name(), format_count(set.size()));
    let hints = set.hints();
    if !hints.related_to().is_empty() {
        text.push_str("\nRelated: ");
        text.push_str(&hints.related_to().join(", "));
    }
    if !hints.intersects_with().is_empty() {
        text.push_str("\nIntersects: ");
        text.push_str(&hints.intersects_with().join(", "));
    }
    text
}

/// Tooltip for a pairwise or triple region, e.g. `A ∩ B: 700 users`.
pub fn region_tooltip(region: &IntersectionRegion, unit: &str) -> String {
    let line = format!(
        "{}: {} {unit}",
        region.members(),
        format_count(region.approximate_size())
    );
    if region.members().len() >= 3 {
        format!("OVERLAPPING {}\n{line}", unit.to_uppercase())
    } else {
        line
    }
}
