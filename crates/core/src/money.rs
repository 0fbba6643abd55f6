//! Currency formatting
//!
//! Amounts shown to end users are prefixed with the configured
//! currency symbol and rendered with two decimal places, e.g.
//! `S$1200.00`.

/// Format an amount with a currency symbol prefix.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("S$", 1200.0), "S$1200.00");
        assert_eq!(format_currency("S$", 87.5), "S$87.50");
        assert_eq!(format_currency("$", 0.0), "$0.00");
    }
}
