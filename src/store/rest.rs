//! Hosted store REST client
//!
//! Speaks the backend's PostgREST-style dialect: equality filters as
//! `?column=eq.value` query pairs, `Prefer: return=representation` to
//! get the stored row back from an insert, and `Prefer: count=exact`
//! with the `Content-Range` header for count-only queries. Password
//! auth goes through `auth/v1/token` and `auth/v1/logout`.
//!
//! No request retries and no timeouts: an unresponsive backend leaves
//! the caller suspended, which is the documented behavior of every
//! mutation screen.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use crate::auth::Session;
use crate::config::StoreConfig;
use crate::error::{AppError, Result};
use crate::store::{AuthClient, Filter, Order, Row, TableStore};

/// REST client for the hosted backend; serves both the table and the
/// auth contract.
pub struct RestStore {
    http: reqwest::Client,
    base: Url,
    api_key: String,
    session: RwLock<Option<Session>>,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let base = Url::parse(&config.url)
            .map_err(|e| AppError::Config(format!("invalid store.url: {e}")))?;
        let http = reqwest::Client::builder()
            .user_agent("StreamPanel/0.1.0")
            .build()?;

        Ok(Self {
            http,
            base,
            api_key: config.api_key.clone(),
            session: RwLock::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| AppError::Config(format!("invalid store endpoint {path}: {e}")))
    }

    fn table_url(&self, table: &str, filter: &Filter) -> Result<Url> {
        let mut url = self.endpoint(&format!("rest/v1/{table}"))?;
        for (column, value) in filter.clauses() {
            url.query_pairs_mut()
                .append_pair(column, &format!("eq.{}", filter_text(value)));
        }
        Ok(url)
    }

    /// Bearer credential: the signed-in session's token when present,
    /// the public API key otherwise.
    async fn bearer(&self) -> String {
        match self.session.read().await.as_ref() {
            Some(session) => session.access_token.clone(),
            None => self.api_key.clone(),
        }
    }

    async fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer().await)
    }

    /// Turn a failed response into a `Store` error carrying the
    /// backend's message text verbatim.
    async fn store_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(ToOwned::to_owned))
            .unwrap_or(body);

        if message.is_empty() {
            AppError::Store(format!("store request failed with status {status}"))
        } else {
            AppError::Store(message)
        }
    }
}

/// PostgREST filter operand text: strings go in bare, everything else
/// as its JSON rendering.
fn filter_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl TableStore for RestStore {
    async fn select(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<Order>,
    ) -> Result<Vec<Row>> {
        let mut url = self.table_url(table, filter)?;
        url.query_pairs_mut().append_pair("select", "*");
        if let Some(order) = order {
            let direction = if order.ascending { "asc" } else { "desc" };
            url.query_pairs_mut()
                .append_pair("order", &format!("{}.{direction}", order.column));
        }

        let response = self.authed(self.http.get(url)).await.send().await?;
        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Row> {
        let url = self.table_url(table, &Filter::new())?;
        let response = self
            .authed(self.http.post(url))
            .await
            .header("Prefer", "return=representation")
            .json(&vec![row])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }

        let mut rows: Vec<Row> = response.json().await?;
        if rows.is_empty() {
            return Err(AppError::Store(format!(
                "insert into {table} returned no row"
            )));
        }
        Ok(rows.remove(0))
    }

    async fn update(&self, table: &str, patch: Row, filter: &Filter) -> Result<()> {
        let url = self.table_url(table, filter)?;
        let response = self
            .authed(self.http.patch(url))
            .await
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }
        Ok(())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<()> {
        let url = self.table_url(table, filter)?;
        let response = self.authed(self.http.delete(url)).await.send().await?;
        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }
        Ok(())
    }

    async fn count(&self, table: &str, filter: &Filter) -> Result<u64> {
        let mut url = self.table_url(table, filter)?;
        url.query_pairs_mut().append_pair("select", "id");

        let response = self
            .authed(self.http.get(url))
            .await
            .header("Prefer", "count=exact")
            .header("Range", "0-0")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }

        // Content-Range is "<from>-<to>/<total>" or "*/<total>"
        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit('/').next())
            .and_then(|v| v.parse::<u64>().ok());

        total.ok_or_else(|| AppError::Store(format!("count for {table} unavailable")))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    email: Option<String>,
}

#[async_trait]
impl AuthClient for RestStore {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("error_description")
                        .or_else(|| v.get("msg"))?
                        .as_str()
                        .map(ToOwned::to_owned)
                })
                .unwrap_or_else(|| format!("sign-in failed with status {status}"));
            return Err(AppError::Auth(message));
        }

        let token: TokenResponse = response.json().await?;
        let session = Session {
            identity_id: token.user.id,
            access_token: token.access_token,
            email: token.user.email,
        };
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        let url = self.endpoint("auth/v1/logout")?;
        let bearer = self.bearer().await;
        *self.session.write().await = None;

        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.session.read().await.clone())
    }
}
