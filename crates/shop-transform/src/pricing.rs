//! Price adjustment for export.
//!
//! Raw price cells come from supplier files and carry currency symbols,
//! thousands separators and stray text. Only digits, `.` and `-` are kept,
//! then the longest leading decimal number is read. Anything without digits
//! degrades to an empty field.

use shop_model::{PricingParameters, PricingRule};

use crate::error::TransformError;

/// Extracts the numeric value of a raw price cell.
///
/// - `"$10.00"` → `10.0`
/// - `"1,234.50 EUR"` → `1234.5`
/// - `"12-3"` → `12.0` (reading stops at the first invalid character)
/// - `"n/a"` → `None`
pub fn parse_price(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    leading_number(&cleaned)
}

fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    s[..end].parse().ok()
}

/// Applies margin and conversion to a raw price.
///
/// Returns the adjusted value with exactly two decimals, or an empty string
/// when the input has no numeric value.
pub fn adjust_price(value: &str, pricing: &PricingParameters) -> String {
    let Some(base) = parse_price(value) else {
        return String::new();
    };
    let adjusted = base * (1.0 + pricing.margin_percent / 100.0) * pricing.conversion_rate;
    if !adjusted.is_finite() {
        return String::new();
    }
    format_cents(adjusted)
}

/// Two-decimal formatting, rounding halves away from zero.
fn format_cents(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded:.2}")
}

/// Builds pricing parameters from an admin pricing rule.
///
/// `currency = None` keeps the base currency (rate 1).
pub fn resolve_parameters(
    rule: &PricingRule,
    currency: Option<&str>,
) -> Result<PricingParameters, TransformError> {
    let Some(currency) = currency else {
        return Ok(rule.base_parameters());
    };
    let rate = rule
        .conversion_rate(currency)
        .ok_or_else(|| TransformError::UnknownCurrency {
            category: rule.category.clone(),
            currency: currency.to_string(),
        })?;
    Ok(PricingParameters::new(rule.margin_percent, rate))
}
