//! Portal REST client
//!
//! Thin client over the hosted feature service REST API: token
//! authentication, item lookup, layer enumeration, layer definitions and
//! per-layer definition updates. The portal signals failures in a JSON
//! `error` body under HTTP 200, so every response is checked for one
//! before use. No retry or backoff policy is applied; calls are awaited
//! sequentially by a single operator-driven run.

use fieldsheets_core::error::{FieldSheetsError, Result};
use fieldsheets_core::types::{FieldDefinition, LayerDefinition};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// Portal item metadata, as much of it as the tool needs
#[derive(Debug, Clone, Deserialize)]
pub struct ItemInfo {
    /// Item id
    #[serde(default)]
    pub id: String,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Feature service URL, absent on non-service items
    #[serde(default)]
    pub url: Option<String>,
}

/// Layer id and name from the service definition
#[derive(Debug, Clone, Deserialize)]
pub struct LayerSummary {
    /// Layer id, unique within the service
    pub id: u32,
    /// Layer name
    pub name: String,
}

/// Authenticated client for one portal
pub struct PortalClient {
    http: reqwest::Client,
    portal_url: String,
    token: String,
}

impl PortalClient {
    /// Authenticate against a portal and return a client carrying the
    /// generated token.
    ///
    /// # Errors
    ///
    /// Returns a service error when the request fails or the portal
    /// rejects the credentials.
    pub async fn connect(portal_url: &str, username: &str, password: &str) -> Result<Self> {
        let portal_url = portal_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::new();

        let url = format!("{portal_url}/sharing/rest/generateToken");
        let params = [
            ("username", username),
            ("password", password),
            ("referer", portal_url.as_str()),
            ("expiration", "60"),
            ("f", "json"),
        ];
        let body: Value = http
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| FieldSheetsError::service(format!("generateToken: {e}")))?
            .json()
            .await
            .map_err(|e| FieldSheetsError::service(format!("generateToken: {e}")))?;
        check_portal_error(&body, "generateToken")?;

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                FieldSheetsError::service("generateToken response carried no token")
            })?
            .to_string();

        info!(portal = %portal_url, "authenticated");
        Ok(Self {
            http,
            portal_url,
            token,
        })
    }

    /// Fetch a portal item by id
    ///
    /// # Errors
    ///
    /// Returns a service error when the item does not exist or the
    /// response cannot be decoded.
    pub async fn item(&self, item_id: &str) -> Result<ItemInfo> {
        let url = format!("{}/sharing/rest/content/items/{item_id}", self.portal_url);
        let body = self.get_json(&url, &format!("item {item_id}")).await?;
        serde_json::from_value(body)
            .map_err(|e| FieldSheetsError::service(format!("item {item_id}: {e}")))
    }

    /// Enumerate the layers of a feature service
    ///
    /// # Errors
    ///
    /// Returns a service error when the service definition cannot be
    /// fetched or decoded.
    pub async fn layers(&self, service_url: &str) -> Result<Vec<LayerSummary>> {
        let body = self.get_json(service_url, "service definition").await?;
        let layers = body.get("layers").cloned().unwrap_or(Value::Array(Vec::new()));
        serde_json::from_value(layers)
            .map_err(|e| FieldSheetsError::service(format!("service layers: {e}")))
    }

    /// Fetch one layer's full definition (name, id, fields)
    ///
    /// # Errors
    ///
    /// Returns a service error when the layer cannot be fetched or
    /// decoded.
    pub async fn layer_definition(
        &self,
        service_url: &str,
        layer_id: u32,
    ) -> Result<LayerDefinition> {
        let url = format!("{service_url}/{layer_id}");
        let body = self.get_json(&url, &format!("layer {layer_id}")).await?;
        serde_json::from_value(body)
            .map_err(|e| FieldSheetsError::service(format!("layer {layer_id}: {e}")))
    }

    /// Submit a definition update carrying new field aliases and
    /// descriptions for one layer.
    ///
    /// # Errors
    ///
    /// Returns a service error when the portal rejects the update or does
    /// not acknowledge it.
    pub async fn update_definition(
        &self,
        service_url: &str,
        layer_id: u32,
        fields: &[FieldDefinition],
    ) -> Result<()> {
        let admin = admin_url(service_url)?;
        let url = format!("{admin}/{layer_id}/updateDefinition");

        let payload = serde_json::to_string(&serde_json::json!({ "fields": fields }))
            .map_err(|e| FieldSheetsError::serialization(format!("updateDefinition: {e}")))?;
        let params = [
            ("f", "json"),
            ("token", self.token.as_str()),
            ("updateDefinition", payload.as_str()),
        ];

        debug!(layer_id, fields = fields.len(), "submitting definition update");
        let context = format!("updateDefinition for layer {layer_id}");
        let body: Value = self
            .http
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| FieldSheetsError::service(format!("{context}: {e}")))?
            .json()
            .await
            .map_err(|e| FieldSheetsError::service(format!("{context}: {e}")))?;
        check_portal_error(&body, &context)?;

        if body.get("success").and_then(Value::as_bool) == Some(true) {
            Ok(())
        } else {
            Err(FieldSheetsError::service(format!(
                "{context} was not acknowledged: {body}"
            )))
        }
    }

    async fn get_json(&self, url: &str, context: &str) -> Result<Value> {
        debug!(%url, "GET");
        let body: Value = self
            .http
            .get(url)
            .query(&[("f", "json"), ("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| FieldSheetsError::service(format!("{context}: {e}")))?
            .json()
            .await
            .map_err(|e| FieldSheetsError::service(format!("{context}: {e}")))?;
        check_portal_error(&body, context)?;
        Ok(body)
    }
}

/// Derive the administrative endpoint for a hosted feature service URL
fn admin_url(service_url: &str) -> Result<String> {
    if service_url.contains("/rest/services/") {
        Ok(service_url.replacen("/rest/services/", "/rest/admin/services/", 1))
    } else {
        Err(FieldSheetsError::service(format!(
            "cannot derive admin endpoint from service URL '{service_url}'"
        )))
    }
}

/// Surface a portal-style error body (HTTP 200 with an `error` object)
fn check_portal_error(body: &Value, context: &str) -> Result<()> {
    if let Some(error) = body.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(FieldSheetsError::service(format!(
            "{context}: {message} (code {code})"
        )));
    }
    Ok(())
}
