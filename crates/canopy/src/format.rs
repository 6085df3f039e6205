//! Number formatting driven by spreadsheet-style format strings.
//!
//! Patterns like `$#,##0.00`, `0.0%` or `#,##0` are reduced to four
//! properties: an optional currency prefix, thousands grouping, a precision
//! and a notation. Everything else in the pattern is ignored.

use std::fmt;

/// How digits are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Fixed number of decimals
    Fixed,
    /// Value × 100 with fixed decimals and a `%` suffix
    Percent,
    /// Significant digits, insignificant trailing zeros removed
    General,
}

/// A parsed number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// Currency symbol printed after the sign
    pub currency: Option<char>,
    /// Insert `,` between thousands
    pub grouping: bool,
    /// Decimals (fixed, percent) or significant digits (general)
    pub precision: usize,
    /// Digit style
    pub notation: Notation,
}

const MAX_FIXED_PRECISION: usize = 20;
const MAX_SIGNIFICANT: usize = 21;

impl NumberFormat {
    /// Parse a spreadsheet-style pattern.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let currency = pattern
            .chars()
            .next()
            .filter(|c| matches!(c, '$' | '£' | '€'));
        let precision = pattern.split('.').nth(1).map_or(0, |s| s.chars().count());
        let notation = match pattern.chars().last() {
            Some('%') => Notation::Percent,
            Some('0') => Notation::Fixed,
            _ => Notation::General,
        };
        Self {
            currency,
            grouping: pattern.contains(','),
            precision,
            notation,
        }
    }

    /// Format `value`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        let abs = value.abs();
        let body = if abs.is_infinite() {
            "Infinity".to_string()
        } else {
            match self.notation {
                Notation::Fixed => to_fixed(abs, self.precision.min(MAX_FIXED_PRECISION)),
                Notation::Percent => {
                    to_fixed(abs * 100.0, self.precision.min(MAX_FIXED_PRECISION))
                }
                Notation::General => {
                    trim_zeros(&to_precision(abs, self.precision.clamp(1, MAX_SIGNIFICANT)))
                }
            }
        };

        // A value that rounds to zero never carries a sign.
        let negative = value.is_sign_negative() && body.parse::<f64>().map_or(true, |v| v != 0.0);

        let split = body
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(body.len());
        let (int, rest) = body.split_at(split);

        let mut out = String::with_capacity(body.len() + 8);
        if negative {
            out.push('-');
        }
        if let Some(symbol) = self.currency {
            out.push(symbol);
        }
        if self.grouping {
            out.push_str(&group_thousands(int));
        } else {
            out.push_str(int);
        }
        out.push_str(rest);
        if self.notation == Notation::Percent {
            out.push('%');
        }
        out
    }
}

/// Formats measure values for the breadcrumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueFormatter {
    format: Option<NumberFormat>,
}

impl ValueFormatter {
    /// Formatter for an optional pattern; empty or absent means plain display.
    #[must_use]
    pub fn new(pattern: Option<&str>) -> Self {
        Self {
            format: pattern.filter(|p| !p.is_empty()).map(NumberFormat::parse),
        }
    }

    /// Plain number display.
    #[must_use]
    pub const fn plain() -> Self {
        Self { format: None }
    }

    /// The parsed pattern, if any.
    #[must_use]
    pub const fn number_format(&self) -> Option<&NumberFormat> {
        self.format.as_ref()
    }

    /// Format `value`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match &self.format {
            Some(f) => f.format(value),
            None => plain(value),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fixed => "fixed",
            Self::Percent => "percent",
            Self::General => "general",
        };
        f.write_str(name)
    }
}

/// Shortest round-trip display, exponent form outside `[1e-6, 1e21)`.
fn plain(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let abs = value.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{value}");
    }
    let sci = format!("{value:e}");
    match sci.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => sci,
    }
}

/// Fixed decimals; exact ties round away from zero.
fn to_fixed(x: f64, digits: usize) -> String {
    if x.abs() >= 1e21 {
        return plain(x);
    }
    let scale = 10f64.powi(digits as i32);
    let scaled = x * scale;
    if (scaled - scaled.trunc()).abs() == 0.5 {
        let up = scaled.trunc() + scaled.signum();
        return format!("{:.digits$}", up / scale);
    }
    format!("{x:.digits$}")
}

/// `significant` digits, exponent form when the exponent is below -6 or not
/// smaller than `significant`.
fn to_precision(x: f64, significant: usize) -> String {
    if x == 0.0 {
        return if significant > 1 {
            format!("0.{}", "0".repeat(significant - 1))
        } else {
            "0".to_string()
        };
    }
    let sci = format!("{:.*e}", significant - 1, x);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if exp < -6 || exp >= significant as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{}", exp.unsigned_abs())
    } else {
        to_fixed(x, (significant as i32 - 1 - exp) as usize)
    }
}

fn trim_zeros(s: &str) -> String {
    let (number, exponent) = s.find('e').map_or((s, ""), |i| s.split_at(i));
    if !number.contains('.') {
        return s.to_string();
    }
    let trimmed = number.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{exponent}")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fmt(pattern: &str, v: f64) -> String {
        ValueFormatter::new(Some(pattern)).format(v)
    }

    #[test]
    fn test_parse_currency_grouping_precision() {
        let f = NumberFormat::parse("$#,##0.00");
        assert_eq!(f.currency, Some('$'));
        assert!(f.grouping);
        assert_eq!(f.precision, 2);
        assert_eq!(f.notation, Notation::Fixed);
    }

    #[test]
    fn test_parse_percent_and_general() {
        assert_eq!(NumberFormat::parse("0.0%").notation, Notation::Percent);
        assert_eq!(NumberFormat::parse("#.##").notation, Notation::General);
        assert_eq!(NumberFormat::parse("#.##").precision, 2);
        assert_eq!(NumberFormat::parse("0").precision, 0);
    }

    #[test]
    fn test_currency_fixed() {
        assert_eq!(fmt("$#,##0.00", 1234.5), "$1,234.50");
        assert_eq!(fmt("€#,##0.00", 1000.0), "€1,000.00");
        assert_eq!(fmt("£0", 7.0), "£7");
    }

    #[test]
    fn test_grouping_integer() {
        assert_eq!(fmt("#,##0", 1_234_567.0), "1,234,567");
        assert_eq!(fmt("#,##0", 999.0), "999");
        assert_eq!(fmt("0", 1_234_567.0), "1234567");
    }

    #[test]
    fn test_percent() {
        assert_eq!(fmt("0.0%", 0.1234), "12.34%");
        assert_eq!(fmt("0%", 0.5), "50%");
        assert_eq!(fmt("0.00%", 0.5), "50.000%");
    }

    #[test]
    fn test_percent_precision_counts_the_sign() {
        // Everything after the first dot counts, '%' included.
        assert_eq!(NumberFormat::parse("0.0%").precision, 2);
        assert_eq!(NumberFormat::parse("0%").precision, 0);
    }

    #[test]
    fn test_general_significant_digits() {
        assert_eq!(fmt("#.##", 3.14159), "3.1");
        assert_eq!(fmt("#.##", 1234.0), "1.2e+3");
        assert_eq!(fmt("#.##", 0.000_123), "0.00012");
        assert_eq!(fmt("#.###", 2.5), "2.5");
        // No decimals still keeps one significant digit.
        assert_eq!(fmt("#", 7.0), "7");
        assert_eq!(fmt("#", 0.0), "0");
    }

    #[test]
    fn test_sign_precedes_currency() {
        assert_eq!(fmt("$0.00", -5.0), "-$5.00");
        assert_eq!(fmt("$#,##0", -1234.0), "-$1,234");
    }

    #[test]
    fn test_no_negative_zero() {
        assert_eq!(fmt("0.00", -0.001), "0.00");
        assert_eq!(fmt("0", -0.0), "0");
        assert_eq!(ValueFormatter::plain().format(-0.0), "0");
    }

    #[test]
    fn test_ties_round_up() {
        assert_eq!(fmt("0", 2.5), "3");
        assert_eq!(fmt("0.00", 0.125), "0.13");
        // 1.005 is stored slightly below the tie.
        assert_eq!(fmt("0.00", 1.005), "1.00");
    }

    #[test]
    fn test_plain_display() {
        let f = ValueFormatter::new(None);
        assert_eq!(f.format(12.0), "12");
        assert_eq!(f.format(12.5), "12.5");
        assert_eq!(f.format(1e21), "1e+21");
        assert_eq!(f.format(1.5e-7), "1.5e-7");
        assert_eq!(f.format(f64::NAN), "NaN");
        assert_eq!(ValueFormatter::new(Some("")), ValueFormatter::plain());
    }

    #[test]
    fn test_non_finite_with_pattern() {
        assert_eq!(fmt("$0.00", f64::INFINITY), "$Infinity");
        assert_eq!(fmt("0.00", f64::NEG_INFINITY), "-Infinity");
        assert_eq!(fmt("0.00", f64::NAN), "NaN");
    }

    proptest! {
        #[test]
        fn prop_grouped_digits_match_ungrouped(v in 0u64..10_000_000_000) {
            let grouped = fmt("#,##0", v as f64);
            prop_assert_eq!(grouped.replace(',', ""), v.to_string());
        }

        #[test]
        fn prop_fixed_has_requested_decimals(v in -1e9f64..1e9, p in 0usize..6) {
            let pattern = if p == 0 { "0".to_string() } else { format!("0.{}", "0".repeat(p)) };
            let out = fmt(&pattern, v);
            let decimals = out.split('.').nth(1).map_or(0, str::len);
            prop_assert_eq!(decimals, p);
        }
    }
}
