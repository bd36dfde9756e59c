// ── Runtime inventory configuration ──
//
// Describes *where* the inventory API lives and how values are presented.
// Never touches disk: the CLI builds an `InventoryConfig` from its profile
// layer and hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/produtos";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Locale used for currency rendering.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum CurrencyFormat {
    /// Brazilian real: `R$ 1.234,56`.
    #[default]
    #[strum(to_string = "pt-BR", serialize = "brl")]
    #[serde(rename = "pt-BR", alias = "pt-br", alias = "brl")]
    PtBr,
    /// US dollar: `$1,234.56`.
    #[strum(to_string = "en-US", serialize = "usd")]
    #[serde(rename = "en-US", alias = "en-us", alias = "usd")]
    EnUs,
}

/// Configuration for talking to one inventory API.
///
/// Built by the CLI, passed to [`InventoryStore::from_config`](crate::InventoryStore::from_config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Collection URL (e.g. `http://localhost:5000/api/produtos`).
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// Currency rendering for classified views.
    pub currency: CurrencyFormat,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            currency: CurrencyFormat::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn currency_format_parses_locale_tags() {
        assert_eq!("pt-BR".parse::<CurrencyFormat>().unwrap(), CurrencyFormat::PtBr);
        assert_eq!("pt-br".parse::<CurrencyFormat>().unwrap(), CurrencyFormat::PtBr);
        assert_eq!("usd".parse::<CurrencyFormat>().unwrap(), CurrencyFormat::EnUs);
        assert!("fr-FR".parse::<CurrencyFormat>().is_err());
        assert_eq!(CurrencyFormat::EnUs.to_string(), "en-US");
    }
}
