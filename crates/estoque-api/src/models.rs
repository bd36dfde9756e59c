// Wire types for the /api/produtos endpoints.
//
// Numeric fields arrive untrusted: depending on the backend revision the
// price is `preco` or `preco_unit` and the quantity is `quantidade_estoque`
// or `qtd_estoque`, and either may be a number, a numeric string, null, or
// garbage. They are kept as raw JSON here; coercion happens in core.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One item record exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub id: i64,
    pub nome: String,
    #[serde(default)]
    pub tamanho: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preco: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preco_unit: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantidade_estoque: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qtd_estoque: Option<Value>,
}

impl RawItem {
    /// Both price spellings, `preco` first.
    pub fn price_candidates(&self) -> [Option<&Value>; 2] {
        [self.preco.as_ref(), self.preco_unit.as_ref()]
    }

    /// Both stock quantity spellings, `quantidade_estoque` first.
    pub fn quantity_candidates(&self) -> [Option<&Value>; 2] {
        [self.quantidade_estoque.as_ref(), self.qtd_estoque.as_ref()]
    }
}

/// Request body for `POST /api/produtos` and `PUT /api/produtos/{id}`.
///
/// Price and quantity are written under both spellings so either backend
/// revision applies them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemWrite {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tamanho: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub preco: f64,
    pub preco_unit: f64,
    pub quantidade_estoque: u64,
    pub qtd_estoque: u64,
}

impl ItemWrite {
    pub fn new(nome: String, tamanho: Option<String>, price: f64, quantity: u64) -> Self {
        Self {
            nome,
            tamanho,
            descricao: None,
            preco: price,
            preco_unit: price,
            quantidade_estoque: quantity,
            qtd_estoque: quantity,
        }
    }

    /// Fields left out of an update keep their stored value, so `None`
    /// leaves the description alone.
    pub fn with_description(mut self, descricao: Option<String>) -> Self {
        self.descricao = descricao;
        self
    }
}

/// Error body shape of non-2xx responses (`{"error": ...}` or `{"message": ...}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// `error` wins over `message`; blank strings count as absent.
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|s| !s.trim().is_empty())
            .or(self.message.filter(|s| !s.trim().is_empty()))
    }
}
