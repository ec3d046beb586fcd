//! Currency display table
//!
//! Display-only: the engine never reads the currency. Unknown codes render as USD.

use serde::Serialize;

/// Display details for one currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub locale: &'static str,
}

/// Supported currencies; the first entry is the fallback
pub static CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo { code: "USD", symbol: "$", name: "US Dollar", locale: "en-US" },
    CurrencyInfo { code: "INR", symbol: "₹", name: "Indian Rupee", locale: "en-IN" },
    CurrencyInfo { code: "GBP", symbol: "£", name: "British Pound", locale: "en-GB" },
    CurrencyInfo { code: "EUR", symbol: "€", name: "Euro", locale: "de-DE" },
    CurrencyInfo { code: "JPY", symbol: "¥", name: "Japanese Yen", locale: "ja-JP" },
    CurrencyInfo { code: "AUD", symbol: "A$", name: "Australian Dollar", locale: "en-AU" },
    CurrencyInfo { code: "CAD", symbol: "C$", name: "Canadian Dollar", locale: "en-CA" },
];

/// Look up a currency by code (case-insensitive), falling back to USD
pub fn currency_info(code: &str) -> &'static CurrencyInfo {
    CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
        .unwrap_or(&CURRENCIES[0])
}

/// Group the digits of a whole number with commas
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render an amount in whole units, e.g. `$12,346` or `-€1,000`
pub fn format_currency(amount: f64, code: &str) -> String {
    let info = currency_info(code);
    if !amount.is_finite() {
        return format!("{}{}", info.symbol, amount);
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    format!("{}{}{}", sign, info.symbol, group_thousands(&digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(currency_info("GBP").symbol, "£");
        assert_eq!(currency_info("inr").name, "Indian Rupee");
        let fallback = currency_info("XYZ");
        assert_eq!(fallback.code, "USD");
        assert_eq!(fallback.locale, "en-US");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(12_345.6, "USD"), "$12,346");
        assert_eq!(format_currency(999.4, "EUR"), "€999");
        assert_eq!(format_currency(-1000.0, "EUR"), "-€1,000");
        assert_eq!(format_currency(1_234_567.0, "AUD"), "A$1,234,567");
        assert_eq!(format_currency(0.0, "???"), "$0");
        assert_eq!(format_currency(-0.2, "USD"), "$0");
    }
}
