//! Localized money display.
//!
//! Each currency renders with its conventional display locale: symbol
//! placement, grouping and decimal separators, and digit grouping (Indian
//! lakh/crore grouping for INR, groups of three elsewhere).

use crate::core::currency::CurrencyCode;

struct LocaleSpec {
    symbol: &'static str,
    /// Symbol before the amount ("$1,234.50") or after ("1.234,50 €").
    symbol_leads: bool,
    group_sep: char,
    decimal_sep: char,
    indian_grouping: bool,
}

// Display locales per code: en-US, en-IN, de-DE, en-GB.
fn locale_for(currency: CurrencyCode) -> LocaleSpec {
    match currency {
        CurrencyCode::Usd => LocaleSpec {
            symbol: "$",
            symbol_leads: true,
            group_sep: ',',
            decimal_sep: '.',
            indian_grouping: false,
        },
        CurrencyCode::Inr => LocaleSpec {
            symbol: "\u{20b9}",
            symbol_leads: true,
            group_sep: ',',
            decimal_sep: '.',
            indian_grouping: true,
        },
        CurrencyCode::Eur => LocaleSpec {
            symbol: "\u{20ac}",
            symbol_leads: false,
            group_sep: '.',
            decimal_sep: ',',
            indian_grouping: false,
        },
        CurrencyCode::Gbp => LocaleSpec {
            symbol: "\u{a3}",
            symbol_leads: true,
            group_sep: ',',
            decimal_sep: '.',
            indian_grouping: false,
        },
    }
}

/// Renders `amount` in `currency` using that currency's display locale.
///
/// Total: never fails. Amounts round half-up to two decimal places; a
/// non-finite amount renders as zero.
pub fn format_money(amount: f64, currency: CurrencyCode) -> String {
    let locale = locale_for(currency);

    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u128;
    let units = cents / 100;
    let frac = cents % 100;

    let grouped = group_digits(
        &units.to_string(),
        locale.group_sep,
        locale.indian_grouping,
    );

    let sign = if negative { "-" } else { "" };
    if locale.symbol_leads {
        format!(
            "{sign}{}{grouped}{}{frac:02}",
            locale.symbol, locale.decimal_sep
        )
    } else {
        // Trailing symbol is separated by a no-break space, as Intl does.
        format!(
            "{sign}{grouped}{}{frac:02}\u{a0}{}",
            locale.decimal_sep, locale.symbol
        )
    }
}

// Inserts `sep` into an all-digit string. Western grouping is threes from
// the right; Indian grouping keeps the last three and then groups by two.
fn group_digits(digits: &str, sep: char, indian: bool) -> String {
    let n = digits.len();
    if n <= 3 {
        return digits.to_string();
    }

    let head_len = n - 3;
    let head = &digits[..head_len];
    let chunk = if indian { 2 } else { 3 };

    let mut out = String::with_capacity(n + n / 2);
    let mut idx = head_len % chunk;
    if idx == 0 {
        idx = chunk;
    }
    out.push_str(&head[..idx]);
    while idx < head_len {
        out.push(sep);
        out.push_str(&head[idx..idx + chunk]);
        idx += chunk;
    }
    out.push(sep);
    out.push_str(&digits[head_len..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_us_conventions() {
        let formatted = format_money(1234.5, CurrencyCode::Usd);
        assert_eq!(formatted, "$1,234.50");
        assert!(formatted.contains('$'));
        assert!(formatted.contains("1,234.50"));
    }

    #[test]
    fn test_inr_uses_rupee_symbol_and_indian_grouping() {
        assert_eq!(format_money(1234.5, CurrencyCode::Inr), "\u{20b9}1,234.50");
        assert_eq!(
            format_money(1234567.0, CurrencyCode::Inr),
            "\u{20b9}12,34,567.00"
        );
        assert_eq!(
            format_money(123456.0, CurrencyCode::Inr),
            "\u{20b9}1,23,456.00"
        );
    }

    #[test]
    fn test_eur_german_conventions() {
        assert_eq!(
            format_money(1234.5, CurrencyCode::Eur),
            "1.234,50\u{a0}\u{20ac}"
        );
    }

    #[test]
    fn test_gbp() {
        assert_eq!(format_money(99.99, CurrencyCode::Gbp), "\u{a3}99.99");
    }

    #[test]
    fn test_rounding_and_sign() {
        assert_eq!(format_money(0.005, CurrencyCode::Usd), "$0.01");
        assert_eq!(format_money(-1234.5, CurrencyCode::Usd), "-$1,234.50");
        assert_eq!(format_money(0.0, CurrencyCode::Usd), "$0.00");
    }

    #[test]
    fn test_non_finite_amounts_render_as_zero() {
        assert_eq!(format_money(f64::NAN, CurrencyCode::Usd), "$0.00");
    }

    #[test]
    fn test_large_western_grouping() {
        assert_eq!(
            format_money(1234567.89, CurrencyCode::Usd),
            "$1,234,567.89"
        );
    }
}
