/// Thousands-grouped number keeping every fractional digit of the value.
///
/// `65000.0` -> `65,000`, `1234567.891` -> `1,234,567.891`,
/// `0.00001234` -> `0.00001234`. Never uses exponent notation.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let raw = value.to_string();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

pub fn format_usd(value: f64) -> String {
    format!("${}", format_number(value))
}

/// Two decimals and a trailing `%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// `positive` for zero and up, `negative` below zero.
pub fn direction<'a>(value: f64, positive: &'a str, negative: &'a str) -> &'a str {
    if value >= 0.0 {
        positive
    } else {
        negative
    }
}
