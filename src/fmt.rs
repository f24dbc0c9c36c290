/// Format an amount in Colombian-peso style: `$ 1.234.500`, no decimals,
/// dot thousands separators. Fractions round to the nearest peso.
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let rounded = val.abs().round() as u64;
    let digits = rounded.to_string();

    let mut with_dots = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_dots.push('.');
        }
        with_dots.push(c);
    }
    let with_dots: String = with_dots.chars().rev().collect();

    if negative {
        format!("-$ {with_dots}")
    } else {
        format!("$ {with_dots}")
    }
}

/// The `HH:MM:SS` portion of a stored ISO-8601 timestamp. Timestamps are kept
/// as strings end to end, so this slices rather than parsing.
pub fn time_of(iso_date: &str) -> String {
    if iso_date.len() >= 19 {
        iso_date[11..19].to_string()
    } else {
        iso_date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(200000.0), "$ 200.000");
        assert_eq!(money(1234500.0), "$ 1.234.500");
        assert_eq!(money(-50000.0), "-$ 50.000");
        assert_eq!(money(0.0), "$ 0");
        assert_eq!(money(999.0), "$ 999");
    }

    #[test]
    fn test_money_rounds_fractions() {
        assert_eq!(money(4500.4), "$ 4.500");
        assert_eq!(money(4500.6), "$ 4.501");
    }

    #[test]
    fn test_time_of_slices_iso_timestamp() {
        assert_eq!(time_of("2024-01-06T14:30:05.000Z"), "14:30:05");
        assert_eq!(time_of("2024-01-06"), "2024-01-06");
    }
}
