// ── Domain model ──
//
// Sanitized inventory records and their derived, display-ready views.

mod item;

pub use item::{FieldWarning, Item, ItemView, NumericField};
