// ── Workflow state ──
//
// At most one mutation workflow is active at a time. Every workflow gets a
// fresh session number so a request that resolves after its workflow was
// replaced can tell it no longer owns the state.

use estoque_api::ItemWrite;
use strum::{Display, EnumString};

use crate::classify;
use crate::convert;
use crate::model::Item;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Editing(EditSession),
    ConfirmingDelete(PendingDelete),
}

impl WorkflowState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Session number of the active workflow.
    pub fn session(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Editing(edit) => Some(edit.session),
            Self::ConfirmingDelete(pending) => Some(pending.session),
        }
    }
}

/// Editable fields of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EditField {
    Name,
    Quantity,
    Price,
}

/// Raw text as typed by the operator. Nothing is validated until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub name: String,
    pub quantity: String,
    pub price: String,
}

impl EditBuffer {
    pub fn seeded(item: &Item) -> Self {
        Self {
            name: item.display_name(),
            quantity: item.quantity.to_string(),
            price: convert::cents_to_text(item.price_cents),
        }
    }

    pub fn set(&mut self, field: EditField, value: String) {
        match field {
            EditField::Name => self.name = value,
            EditField::Quantity => self.quantity = value,
            EditField::Price => self.price = value,
        }
    }

    /// Update body for `item`. Size and description are carried over
    /// unchanged.
    pub(crate) fn to_write(&self, item: &Item) -> ItemWrite {
        convert::item_write(
            self.name.trim(),
            item.size.clone(),
            convert::price_cents_from_text(&self.price),
            convert::quantity_from_text(&self.quantity),
        )
        .with_description(item.description.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub session: u64,
    /// The item as it was when editing began.
    pub item: Item,
    pub buffer: EditBuffer,
    /// Message from the last rejected submit.
    pub save_error: Option<String>,
    /// A submit is in flight.
    pub saving: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDelete {
    pub session: u64,
    pub item_id: i64,
    /// The delete request is in flight.
    pub deleting: bool,
}

/// Input for creating an item. Numeric fields are raw operator text and
/// get the same coercion as an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftItem {
    pub name: String,
    pub size: Option<String>,
    pub description: Option<String>,
    pub quantity: String,
    pub price: String,
}

impl DraftItem {
    pub(crate) fn to_write(&self) -> ItemWrite {
        convert::item_write(
            &self.name,
            non_blank(self.size.as_deref()),
            convert::price_cents_from_text(&self.price),
            convert::quantity_from_text(&self.quantity),
        )
        .with_description(non_blank(self.description.as_deref()))
    }

    /// Name as it would be sent.
    pub fn effective_name(&self) -> String {
        classify::display_name(&self.name)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
