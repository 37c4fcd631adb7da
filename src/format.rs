//! SI-prefix number formatting for tick labels.

const PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Format `value` with `precision` significant digits and an SI prefix,
/// e.g. `format_si(1_500.0, 2) == "1.5k"` and `format_si(1e6, 2) == "1.0M"`.
pub fn format_si(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let precision = precision.max(1);
    let body = format_si_abs(value.abs(), precision);
    let is_zero = body.chars().all(|ch| !ch.is_ascii_digit() || ch == '0');
    if value < 0.0 && !is_zero {
        format!("-{body}")
    } else {
        body
    }
}

/// Tick label formatting used by the chart: two significant digits.
pub fn format_tick(value: f64) -> String {
    format_si(value, 2)
}

fn format_si_abs(x: f64, precision: usize) -> String {
    let (digits, exponent) = decimal_parts(x, precision);
    let prefix_exponent = exponent.div_euclid(3).clamp(-8, 8);
    let split = exponent - prefix_exponent * 3 + 1;
    let len = digits.len() as i32;
    let number = if split == len {
        digits
    } else if split > len {
        format!("{digits}{}", "0".repeat((split - len) as usize))
    } else if split > 0 {
        let (head, tail) = digits.split_at(split as usize);
        format!("{head}.{tail}")
    } else {
        let extra = (precision as i32 + split - 1).max(0) as usize;
        let (small, _) = decimal_parts(x, extra.max(1));
        format!("0.{}{}", "0".repeat((1 - split) as usize), small)
    };
    let prefix = PREFIXES[(8 + prefix_exponent) as usize];
    format!("{number}{prefix}")
}

/// Significant digits (without the decimal point) and the base-10 exponent
/// of `x` rounded to `precision` significant digits.
fn decimal_parts(x: f64, precision: usize) -> (String, i32) {
    let formatted = format!("{:.*e}", precision.saturating_sub(1), x);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|ch| ch.is_ascii_digit()).collect();
    (digits, exponent.parse().unwrap_or(0))
}
