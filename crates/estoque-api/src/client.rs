// Inventory API HTTP client
//
// Wraps `reqwest::Client` with collection/item URL construction and uniform
// status handling. Endpoint methods live in `products.rs` as inherent
// methods so this module stays focused on transport mechanics.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ErrorBody;
use crate::transport::TransportConfig;

/// Async client for the inventory REST API.
///
/// `base_url` is the collection URL (e.g. `http://localhost:5000/api/produtos`);
/// single-item endpoints append `/{id}` to it.
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl InventoryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a collection URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            timeout: transport.timeout,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages its settings).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            timeout: TransportConfig::default().timeout,
        })
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&path);
        Ok(url)
    }

    /// The collection URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    pub(crate) fn collection_url(&self) -> Url {
        self.base_url.clone()
    }

    /// `{base}/{id}`
    pub(crate) fn item_url(&self, id: i64) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}/{id}", self.base_url.path().trim_end_matches('/')));
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put_no_response<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<(), Error> {
        debug!("PUT {url}");
        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::handle_empty(resp).await
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await.map_err(|e| self.transport_error(e))?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message);

        Error::Http {
            status: status.as_u16(),
            message,
            body,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn item_url_appends_id() {
        let client =
            InventoryClient::from_reqwest("http://localhost:5000/api/produtos/", reqwest::Client::new())
                .unwrap();
        assert_eq!(
            client.collection_url().as_str(),
            "http://localhost:5000/api/produtos"
        );
        assert_eq!(
            client.item_url(42).as_str(),
            "http://localhost:5000/api/produtos/42"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = InventoryClient::from_reqwest("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
