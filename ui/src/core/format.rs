//! Formatting helpers for presenting metrics.

const MISSING: &str = "—";

pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return MISSING.into();
    }
    format!("{value:.decimals$}")
}

/// `value` is already a percentage (`12.5` renders as `12.50%`).
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.into();
    }
    format!("{value:.2}%")
}

/// Rounded count with thousands separators: `1234567.4` -> `1,234,567`.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.into();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Star rating out of five, or a no-data marker when nothing was rated.
pub fn format_stars(value: f64, rated: bool) -> String {
    if rated {
        format!("{} / 5", format_number(value, 2))
    } else {
        "No ratings".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1000.0), "1,000");
        assert_eq!(format_count(1_234_567.4), "1,234,567");
        assert_eq!(format_count(-2500.0), "-2,500");
    }

    #[test]
    fn non_finite_values_render_as_missing() {
        assert_eq!(format_percent(f64::NAN), "—");
        assert_eq!(format_number(f64::INFINITY, 2), "—");
    }

    #[test]
    fn stars_distinguish_zero_from_no_data() {
        assert_eq!(format_stars(0.0, true), "0.00 / 5");
        assert_eq!(format_stars(0.0, false), "No ratings");
    }
}
