use std::fmt;

use serde::Serialize;
use strum::Display;

use crate::classify;
use crate::config::CurrencyFormat;
use crate::convert;

/// One sanitized inventory record.
///
/// `name` is kept exactly as the server sent it, marker included; use
/// [`Item::display_name`] for anything shown to or edited by an operator.
/// Price is held in integer cents so it never drifts off two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub size: Option<String>,
    pub description: Option<String>,
    pub price_cents: u64,
    pub quantity: u64,
}

impl Item {
    pub fn display_name(&self) -> String {
        classify::display_name(&self.name)
    }

    pub fn is_low_stock(&self) -> bool {
        classify::classify(self).is_low_stock
    }

    /// Unit price as a decimal amount.
    pub fn unit_price(&self) -> f64 {
        convert::cents_to_amount(self.price_cents)
    }
}

/// Numeric fields subject to coercion on ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Price,
    Quantity,
}

/// A numeric field that arrived missing or unusable and was set to 0
/// (or arrived negative and was clamped to 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWarning {
    pub item_id: i64,
    pub field: NumericField,
    /// The raw JSON text, `None` when the field was absent.
    pub raw: Option<String>,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(
                f,
                "item {}: {} {raw} is not a usable amount, defaulted to 0",
                self.item_id, self.field
            ),
            None => write!(f, "item {}: {} missing, defaulted to 0", self.item_id, self.field),
        }
    }
}

/// Display-ready projection of an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub size: Option<String>,
    pub quantity: u64,
    pub low_stock: bool,
    pub price: String,
}

impl ItemView {
    pub fn new(item: &Item, currency: CurrencyFormat) -> Self {
        Self {
            id: item.id,
            name: item.display_name(),
            size: item.size.clone(),
            quantity: item.quantity,
            low_stock: item.is_low_stock(),
            price: classify::format_currency(item.price_cents, currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn view_strips_marker_and_formats_price() {
        let item = Item {
            id: 1,
            name: "Camisa ESTOQUE CRÍTICO!".into(),
            size: Some("M".into()),
            description: None,
            price_cents: 5000,
            quantity: 2,
        };
        let view = ItemView::new(&item, CurrencyFormat::EnUs);
        assert_eq!(
            view,
            ItemView {
                id: 1,
                name: "Camisa".into(),
                size: Some("M".into()),
                quantity: 2,
                low_stock: true,
                price: "$50.00".into(),
            }
        );
    }

    #[test]
    fn warning_display_names_field_and_item() {
        let missing = FieldWarning {
            item_id: 4,
            field: NumericField::Quantity,
            raw: None,
        };
        assert_eq!(missing.to_string(), "item 4: quantity missing, defaulted to 0");

        let garbage = FieldWarning {
            item_id: 4,
            field: NumericField::Price,
            raw: Some("\"abc\"".into()),
        };
        assert_eq!(
            garbage.to_string(),
            "item 4: price \"abc\" is not a usable amount, defaulted to 0"
        );
    }
}
