//! Number formatting for the display and the input buffer.

/// Canonical text for a computed result.
///
/// Uses the shortest representation that parses back to the same `f64`,
/// without exponent notation, so the result can be edited like typed input.
/// Trailing fractional zeros and a trailing `.` are stripped and `-0`
/// becomes `0`.
pub fn canonical(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let mut text = format!("{}", value);
    if text.contains('.') {
        let keep = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(keep);
    }
    text
}

/// Insert `,` between groups of three digits in the integer part.
///
/// Anything after the decimal point is passed through, as are a leading
/// sign and partial input such as `"12."`.
pub fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(pos) => unsigned.split_at(pos),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}
