//! Item command handlers: list, get, add, edit, delete.

use serde::Serialize;
use tabled::Tabled;

use estoque_core::{
    CurrencyFormat, DraftItem, EditField, Item, ItemView, LOW_STOCK_THRESHOLD,
    MutationCoordinator, RefreshOutcome,
};

use crate::cli::{AddArgs, EditArgs, ListArgs};
use crate::error::CliError;
use crate::output;

use super::{Presentation, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: String,
}

impl ItemRow {
    fn new(v: &ItemView, color: bool) -> Self {
        let (quantity, stock) = if v.low_stock {
            (
                output::alert(&v.quantity.to_string(), color),
                output::alert("LOW", color),
            )
        } else {
            (v.quantity.to_string(), "ok".into())
        };
        Self {
            id: v.id,
            name: v.name.clone(),
            size: v
                .size
                .clone()
                .unwrap_or_else(|| output::muted("-", color)),
            quantity,
            price: v.price.clone(),
            stock,
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

/// Single-item payload for structured output: the classified view plus
/// fields the list leaves out.
#[derive(Serialize)]
struct ItemDetail {
    #[serde(flatten)]
    view: ItemView,
    description: Option<String>,
    unit_price: f64,
}

impl ItemDetail {
    fn new(item: &Item, currency: CurrencyFormat) -> Self {
        Self {
            view: ItemView::new(item, currency),
            description: item.description.clone(),
            unit_price: item.unit_price(),
        }
    }
}

fn detail(d: &ItemDetail, color: bool) -> String {
    let v = &d.view;
    let stock = if v.low_stock {
        output::alert(
            &format!("{} (at or below {LOW_STOCK_THRESHOLD})", v.quantity),
            color,
        )
    } else {
        v.quantity.to_string()
    };
    [
        format!("ID:          {}", v.id),
        format!("Name:        {}", v.name),
        format!("Size:        {}", v.size.as_deref().unwrap_or("-")),
        format!("Description: {}", d.description.as_deref().unwrap_or("-")),
        format!("Price:       {}", v.price),
        format!("Stock:       {stock}"),
    ]
    .join("\n")
}

fn print_item(item: &Item, currency: CurrencyFormat, view: &Presentation) {
    let data = ItemDetail::new(item, currency);
    let out = output::render_single(
        &view.format,
        &data,
        |d| detail(d, view.color),
        |d| d.view.id.to_string(),
    );
    output::print_output(&out, view.quiet);
}

// ── Handlers ────────────────────────────────────────────────────────

/// Refetch the collection, surfacing a failed refresh as the command's
/// error.
async fn load(coordinator: &MutationCoordinator) -> Result<(), CliError> {
    let store = coordinator.store();
    match store.refresh().await {
        RefreshOutcome::Failed(err) => Err(CliError::refresh_failed(
            err,
            store.client().base_url().as_str(),
        )),
        RefreshOutcome::Applied { .. } | RefreshOutcome::Superseded => Ok(()),
    }
}

/// Look up `id` in the freshly loaded collection.
fn held_item(coordinator: &MutationCoordinator, id: i64) -> Result<Item, CliError> {
    coordinator
        .store()
        .item(id)
        .ok_or(CliError::NotFound { id })
}

pub async fn list(
    coordinator: &MutationCoordinator,
    args: &ListArgs,
    view: &Presentation,
) -> Result<(), CliError> {
    load(coordinator).await?;

    let mut views = coordinator.store().views();
    if args.low_stock {
        views.retain(|v| v.low_stock);
    }
    tracing::debug!(shown = views.len(), low_stock_only = args.low_stock, "listing items");

    let out = output::render_list(
        &view.format,
        &views,
        |v| ItemRow::new(v, view.color),
        |v| v.id.to_string(),
    );
    output::print_output(&out, view.quiet);
    Ok(())
}

pub async fn get(
    coordinator: &MutationCoordinator,
    id: i64,
    view: &Presentation,
) -> Result<(), CliError> {
    let store = coordinator.store();
    let item = store.fetch_item(id).await?;
    print_item(&item, store.currency(), view);
    Ok(())
}

pub async fn add(
    coordinator: &MutationCoordinator,
    args: AddArgs,
    view: &Presentation,
) -> Result<(), CliError> {
    let draft = DraftItem {
        name: args.name,
        size: args.size,
        description: args.description,
        quantity: args.quantity,
        price: args.price,
    };
    let created = coordinator.create_item(&draft).await?;
    print_item(&created, coordinator.store().currency(), view);
    Ok(())
}

pub async fn edit(
    coordinator: &MutationCoordinator,
    args: EditArgs,
    view: &Presentation,
) -> Result<(), CliError> {
    let changes: Vec<(EditField, String)> = [
        (EditField::Name, args.name),
        (EditField::Quantity, args.quantity),
        (EditField::Price, args.price),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, v)))
    .collect();

    if changes.is_empty() {
        return Err(CliError::Validation {
            field: "edit".into(),
            reason: "nothing to change; pass --name, --quantity or --price".into(),
        });
    }

    load(coordinator).await?;
    let item = held_item(coordinator, args.id)?;

    coordinator.begin_edit(&item);
    for (field, value) in changes {
        coordinator.update_field(field, value)?;
    }
    coordinator.submit_edit().await?;

    let store = coordinator.store();
    match store.item(args.id) {
        Some(updated) => print_item(&updated, store.currency(), view),
        None => tracing::warn!(id = args.id, "item missing from the refreshed collection"),
    }
    Ok(())
}

pub async fn delete(
    coordinator: &MutationCoordinator,
    id: i64,
    view: &Presentation,
) -> Result<(), CliError> {
    load(coordinator).await?;
    held_item(coordinator, id)?;

    coordinator.begin_delete(id);
    let label = coordinator.delete_label().unwrap_or_default();

    let confirmed = match util::confirm("delete", &format!("Delete {label} (#{id})?"), view.yes) {
        Ok(confirmed) => confirmed,
        Err(err) => {
            coordinator.cancel_delete();
            return Err(err);
        }
    };
    if !confirmed {
        coordinator.cancel_delete();
        if !view.quiet {
            eprintln!("Aborted; {label} was not deleted");
        }
        return Ok(());
    }

    coordinator.confirm_delete().await?;
    if !view.quiet {
        eprintln!("Deleted {label} (#{id})");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(low_stock: bool) -> ItemView {
        ItemView {
            id: 1,
            name: "Camisa".into(),
            size: None,
            quantity: 2,
            low_stock,
            price: "R$\u{a0}50,00".into(),
        }
    }

    #[test]
    fn low_stock_rows_are_flagged() {
        let row = ItemRow::new(&view(true), false);
        assert_eq!(row.stock, "LOW");
        assert_eq!(row.quantity, "2");
        assert_eq!(row.size, "-");

        let row = ItemRow::new(&view(false), false);
        assert_eq!(row.stock, "ok");
    }

    #[test]
    fn detail_mentions_threshold_for_low_stock() {
        let item = Item {
            id: 1,
            name: "Camisa ESTOQUE CRÍTICO!".into(),
            size: Some("M".into()),
            description: Some("Algodão".into()),
            price_cents: 5000,
            quantity: 2,
        };
        let text = detail(&ItemDetail::new(&item, CurrencyFormat::PtBr), false);
        assert!(text.contains("Name:        Camisa\n"));
        assert!(text.contains("Stock:       2 (at or below 5)"));
        assert!(text.contains("Description: Algodão"));
    }
}
