//! Display text for numbers
//!
//! [`format_number`] is the one routine that turns arithmetic and trig results
//! into display text. It prints the shortest digit string that parses back to
//! the same `f64`, laid out the way JavaScript's `Number#toString` does:
//! positional notation for decimal exponents from -6 through 20, exponent
//! notation (`1e+21`, `1.5e-7`) outside that range. [`parse_number`] reads any text
//! the evaluator can put on the display, including the non-finite spellings.

/// Largest decimal exponent (exclusive) printed without exponent notation
const MAX_POSITIONAL_EXPONENT: i32 = 21;

/// Smallest decimal exponent printed without exponent notation
const MIN_POSITIONAL_EXPONENT: i32 = -6;

/// Formats a result for the display
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // Covers -0 as well
    if value == 0.0 {
        return "0".to_string();
    }

    let (digits, exponent) = shortest_digits(value.abs());
    let body = layout(&digits, exponent);
    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Parses display text back into a number
///
/// Display text is built only from digit and decimal-point presses or from
/// [`format_number`], so it always parses. Anything else reads as NaN.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    match text {
        "NaN" => f64::NAN,
        "Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => {
            debug_assert!(text.parse::<f64>().is_ok(), "unparsable display {text:?}");
            text.parse().unwrap_or(f64::NAN)
        }
    }
}

/// Returns true for text the display can actually show
///
/// That is either a numeral typed with digit and decimal-point keys, or the
/// exact output of [`format_number`] for some value.
#[must_use]
pub fn is_display_text(text: &str) -> bool {
    is_typed_numeral(text)
        || matches!(text, "NaN" | "Infinity" | "-Infinity")
        || text
            .parse::<f64>()
            .is_ok_and(|value| value.is_finite() && format_number(value) == text)
}

fn is_typed_numeral(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || c == '.')
        && text.matches('.').count() <= 1
}

/// Splits a positive finite value into its shortest round-trip significant
/// digits and the decimal exponent of the first digit
fn shortest_digits(value: f64) -> (String, i32) {
    // `{:e}` already yields the shortest round-trip mantissa, e.g. "1.25e-7"
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    (digits, exponent.parse().unwrap_or_default())
}

fn layout(digits: &str, exponent: i32) -> String {
    let count = digits.len() as i32;
    // Number of digits before the decimal point
    let point = exponent + 1;

    if (MIN_POSITIONAL_EXPONENT..MAX_POSITIONAL_EXPONENT).contains(&exponent) {
        if point >= count {
            format!("{digits}{}", "0".repeat((point - count) as usize))
        } else if point > 0 {
            let (int_part, frac_part) = digits.split_at(point as usize);
            format!("{int_part}.{frac_part}")
        } else {
            format!("0.{}{digits}", "0".repeat((-point) as usize))
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let magnitude = exponent.unsigned_abs();
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{magnitude}")
        } else {
            format!("{lead}.{rest}e{sign}{magnitude}")
        }
    }
}
