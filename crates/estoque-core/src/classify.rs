// ── Stock classification ──
//
// Pure functions that derive display state from an `Item`. Nothing here
// holds state or talks to the network.

use serde::Serialize;

use crate::config::CurrencyFormat;
use crate::model::Item;

/// Stock at or below this quantity is low.
pub const LOW_STOCK_THRESHOLD: u64 = 5;

/// Decoration the server may append to a name for critically low items.
pub const CRITICAL_MARKER: &str = "ESTOQUE CRÍTICO!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub is_low_stock: bool,
}

pub fn classify(item: &Item) -> Classification {
    Classification {
        is_low_stock: item.quantity <= LOW_STOCK_THRESHOLD,
    }
}

/// Name with every critical-stock marker removed, trimmed.
pub fn display_name(name: &str) -> String {
    let mut stripped = name.replace(CRITICAL_MARKER, "");
    // Removing one marker can splice two halves into a new one.
    while stripped.contains(CRITICAL_MARKER) {
        stripped = stripped.replace(CRITICAL_MARKER, "");
    }
    stripped.trim().to_owned()
}

/// Render an amount in cents as currency with exactly two decimals.
pub fn format_currency(cents: u64, currency: CurrencyFormat) -> String {
    let units = group_thousands(cents / 100, currency.group_separator());
    let fraction = cents % 100;
    match currency {
        CurrencyFormat::PtBr => format!("R$\u{a0}{units},{fraction:02}"),
        CurrencyFormat::EnUs => format!("${units}.{fraction:02}"),
    }
}

impl CurrencyFormat {
    fn group_separator(self) -> char {
        match self {
            Self::PtBr => '.',
            Self::EnUs => ',',
        }
    }

    pub fn format(self, cents: u64) -> String {
        format_currency(cents, self)
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_quantity(quantity: u64) -> Item {
        Item {
            id: 1,
            name: "Camisa".into(),
            size: None,
            description: None,
            price_cents: 0,
            quantity,
        }
    }

    #[test]
    fn low_stock_boundary() {
        assert!(classify(&item_with_quantity(0)).is_low_stock);
        assert!(classify(&item_with_quantity(5)).is_low_stock);
        assert!(!classify(&item_with_quantity(6)).is_low_stock);
    }

    #[test]
    fn display_name_strips_every_marker() {
        assert_eq!(display_name("Camisa ESTOQUE CRÍTICO!"), "Camisa");
        assert_eq!(
            display_name("ESTOQUE CRÍTICO! Calça ESTOQUE CRÍTICO!ESTOQUE CRÍTICO!"),
            "Calça"
        );
        assert_eq!(display_name("  Boné  "), "Boné");
        assert_eq!(display_name("ESTOQUE CRÍTICO!"), "");
    }

    #[test]
    fn display_name_never_leaves_a_spliced_marker() {
        let nested = "ESTOQUE ESTOQUE CRÍTICO!CRÍTICO! Meia";
        let name = display_name(nested);
        assert!(!name.contains(CRITICAL_MARKER));
        assert_eq!(name, "Meia");
    }

    #[test]
    fn currency_has_two_decimals_and_grouping() {
        assert_eq!(format_currency(5000, CurrencyFormat::PtBr), "R$\u{a0}50,00");
        assert_eq!(format_currency(123_456, CurrencyFormat::PtBr), "R$\u{a0}1.234,56");
        assert_eq!(format_currency(0, CurrencyFormat::PtBr), "R$\u{a0}0,00");
        assert_eq!(format_currency(100_000_005, CurrencyFormat::EnUs), "$1,000,000.05");
        assert_eq!(CurrencyFormat::EnUs.format(999), "$9.99");
    }
}
