// ── API-to-domain conversions ──
//
// Bridges raw `estoque_api` records into `Item`s and builds write bodies
// from operator input. Numeric values follow one rule everywhere: a finite,
// non-negative number (or numeric text) is kept, anything else becomes 0.
// Quantities floor to whole units; prices round to cents.

use estoque_api::{ItemWrite, RawItem};
use serde_json::Value;

use crate::classify;
use crate::model::{FieldWarning, Item, NumericField};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse operator or wire text as a decimal amount.
///
/// Surrounding whitespace is ignored and `.` is the decimal separator.
/// Empty text, garbage and non-finite values (`inf`, `NaN`) yield `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numbers and numeric strings are accepted; null, booleans, arrays and
/// objects are not.
fn coerce_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

fn non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v >= 0.0)
}

/// Round a non-negative amount to integer cents.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn amount_to_cents(amount: f64) -> u64 {
    // `as` saturates, and callers only pass finite non-negative values.
    (amount * 100.0).round() as u64
}

/// Floor a non-negative amount to whole units.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn amount_to_quantity(amount: f64) -> u64 {
    amount.floor() as u64
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn cents_to_amount(cents: u64) -> f64 {
    cents as f64 / 100.0
}

/// Quantity typed by an operator: floored, non-numeric or negative is 0.
pub fn quantity_from_text(text: &str) -> u64 {
    non_negative(parse_amount(text)).map_or(0, amount_to_quantity)
}

/// Price typed by an operator, in cents: rounded to two decimals,
/// non-numeric or negative is 0.
pub fn price_cents_from_text(text: &str) -> u64 {
    non_negative(parse_amount(text)).map_or(0, amount_to_cents)
}

/// Plain decimal rendering used to seed edit buffers (`50.00`).
pub fn cents_to_text(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

// ── Item ───────────────────────────────────────────────────────────

/// The first spelling that holds a usable amount wins. When none does, the
/// warning carries the first raw value present.
fn coerce_field(
    item_id: i64,
    field: NumericField,
    candidates: [Option<&Value>; 2],
    warnings: &mut Vec<FieldWarning>,
) -> f64 {
    if let Some(v) = candidates
        .iter()
        .find_map(|value| non_negative(coerce_value(*value)))
    {
        return v;
    }
    warnings.push(FieldWarning {
        item_id,
        field,
        raw: candidates.iter().flatten().next().map(|value| value.to_string()),
    });
    0.0
}

/// Sanitize one wire record, collecting a warning for every numeric field
/// that had to be defaulted.
pub fn sanitize(raw: RawItem, warnings: &mut Vec<FieldWarning>) -> Item {
    let price = coerce_field(
        raw.id,
        NumericField::Price,
        raw.price_candidates(),
        warnings,
    );
    let quantity = coerce_field(
        raw.id,
        NumericField::Quantity,
        raw.quantity_candidates(),
        warnings,
    );

    Item {
        id: raw.id,
        name: raw.nome,
        size: raw.tamanho,
        description: raw.descricao,
        price_cents: amount_to_cents(price),
        quantity: amount_to_quantity(quantity),
    }
}

/// Build the write body for a create or update. The critical-stock marker
/// is stripped so it never reaches the server as part of the name.
pub fn item_write(name: &str, size: Option<String>, price_cents: u64, quantity: u64) -> ItemWrite {
    ItemWrite::new(
        classify::display_name(name),
        size,
        cents_to_amount(price_cents),
        quantity,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn raw(value: serde_json::Value) -> RawItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numeric_and_string_values_are_kept() {
        let mut warnings = Vec::new();
        let item = sanitize(
            raw(json!({"id": 1, "nome": "Camisa", "preco": "19.90", "quantidade_estoque": 12})),
            &mut warnings,
        );
        assert_eq!(item.price_cents, 1990);
        assert_eq!(item.quantity, 12);
        assert!(warnings.is_empty());
    }

    #[test]
    fn unusable_values_default_to_zero_with_warnings() {
        let cases = [
            json!(null),
            json!("abc"),
            json!(""),
            json!(true),
            json!([1]),
            json!({"valor": 3}),
            json!(-4),
            json!("-2.5"),
            json!("NaN"),
            json!("inf"),
        ];
        for value in cases {
            let mut warnings = Vec::new();
            let item = sanitize(
                raw(json!({"id": 9, "nome": "X", "preco": value, "qtd_estoque": value})),
                &mut warnings,
            );
            assert_eq!(item.price_cents, 0, "price from {value}");
            assert_eq!(item.quantity, 0, "quantity from {value}");
            assert_eq!(warnings.len(), 2, "warnings for {value}");
        }
    }

    #[test]
    fn missing_fields_are_reported_as_absent() {
        let mut warnings = Vec::new();
        let item = sanitize(raw(json!({"id": 2, "nome": "Boné"})), &mut warnings);
        assert_eq!((item.price_cents, item.quantity), (0, 0));
        assert_eq!(
            warnings,
            vec![
                FieldWarning {
                    item_id: 2,
                    field: NumericField::Price,
                    raw: None,
                },
                FieldWarning {
                    item_id: 2,
                    field: NumericField::Quantity,
                    raw: None,
                },
            ]
        );
    }

    #[test]
    fn unusable_spelling_does_not_hide_the_other() {
        let mut warnings = Vec::new();
        let item = sanitize(
            raw(json!({
                "id": 4, "nome": "Boné",
                "preco": "abc", "preco_unit": 12.5,
                "quantidade_estoque": null, "qtd_estoque": "6"
            })),
            &mut warnings,
        );
        assert_eq!(item.price_cents, 1250);
        assert_eq!(item.quantity, 6);
        assert!(warnings.is_empty());
    }

    #[test]
    fn warning_reports_the_first_spelling_present() {
        let mut warnings = Vec::new();
        sanitize(
            raw(json!({
                "id": 5, "nome": "Meia",
                "preco": null, "preco_unit": "caro", "qtd_estoque": 1
            })),
            &mut warnings,
        );
        assert_eq!(
            warnings,
            vec![FieldWarning {
                item_id: 5,
                field: NumericField::Price,
                raw: Some("\"caro\"".into()),
            }]
        );
    }

    #[test]
    fn fractional_stock_is_floored_on_ingestion() {
        let mut warnings = Vec::new();
        let item = sanitize(
            raw(json!({"id": 3, "nome": "Meia", "preco_unit": 9.5, "qtd_estoque": 7.8})),
            &mut warnings,
        );
        assert_eq!(item.quantity, 7);
        assert_eq!(item.price_cents, 950);
    }

    #[test]
    fn operator_text_coercion() {
        assert_eq!(quantity_from_text("3.9"), 3);
        assert_eq!(quantity_from_text(" 12 "), 12);
        assert_eq!(quantity_from_text("doze"), 0);
        assert_eq!(quantity_from_text("-1"), 0);
        assert_eq!(price_cents_from_text("9.999"), 1000);
        assert_eq!(price_cents_from_text("19.90"), 1990);
        assert_eq!(price_cents_from_text("1,50"), 0);
        assert_eq!(price_cents_from_text(""), 0);
    }

    #[test]
    fn cents_render_as_plain_decimal() {
        assert_eq!(cents_to_text(5000), "50.00");
        assert_eq!(cents_to_text(1005), "10.05");
        assert_eq!(cents_to_text(7), "0.07");
    }

    #[test]
    fn write_body_never_carries_the_marker() {
        let body = item_write("  Camisa ESTOQUE CRÍTICO! ", Some("M".into()), 1000, 3);
        assert_eq!(body.nome, "Camisa");
        assert!((body.preco - 10.0).abs() < f64::EPSILON);
        assert_eq!(body.qtd_estoque, 3);
    }
}
