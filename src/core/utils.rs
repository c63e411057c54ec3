/// Formatting helpers for user-facing alert and recommendation text.
pub struct DisplayUtils;

impl DisplayUtils {
    /// Group thousands with commas and keep at most three fraction digits,
    /// dropping trailing zeros (`150000.0` -> `150,000`, `1234.5` -> `1,234.5`).
    pub fn format_amount(value: f64) -> String {
        if !value.is_finite() {
            return "0".to_string();
        }

        let rendered = format!("{:.3}", value.abs());
        let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));
        let frac_part = frac_part.trim_end_matches('0');

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
            "-"
        } else {
            ""
        };

        if frac_part.is_empty() {
            format!("{sign}{grouped}")
        } else {
            format!("{sign}{grouped}.{frac_part}")
        }
    }

    /// ROAS style multiplier with two decimals (`2.5` -> `2.50x`)
    pub fn format_multiplier(value: f64) -> String {
        format!("{value:.2}x")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(DisplayUtils::format_amount(150_000.0), "150,000");
        assert_eq!(DisplayUtils::format_amount(1_234_567.891), "1,234,567.891");
        assert_eq!(DisplayUtils::format_amount(999.0), "999");
        assert_eq!(DisplayUtils::format_amount(1234.5), "1,234.5");
    }

    #[test]
    fn handles_small_and_negative_values() {
        assert_eq!(DisplayUtils::format_amount(0.0), "0");
        assert_eq!(DisplayUtils::format_amount(-1500.25), "-1,500.25");
        assert_eq!(DisplayUtils::format_amount(f64::NAN), "0");
    }

    #[test]
    fn multiplier_has_two_decimals() {
        assert_eq!(DisplayUtils::format_multiplier(1.2), "1.20x");
    }
}
