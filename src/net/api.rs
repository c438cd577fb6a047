//! REST API surface of the scheduler server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side
//! (SSR): stubs, since these endpoints are only meaningful in the browser.
//!
//! Everything the console fetches or mutates goes through the
//! [`GuardedClient`](crate::net::guard::GuardedClient) so authentication
//! failures are intercepted uniformly. The two exceptions use a plain
//! request on purpose: `verify_session` (it is the interceptor's own
//! secondary probe and must not recurse) and `login` (issued from the
//! login page, where the guard is inactive).
//!
//! List endpoints answer with a named plural array; when the server
//! returns a single item it may arrive as a bare object instead, and the
//! decoding here tolerates both.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::net::guard::{ApiError, GuardedClient};

pub const VERIFY_ENDPOINT: &str = "/api/v1/auth/verify";
pub const LOGIN_ENDPOINT: &str = "/api/v1/auth/login";

/// Answer from the verify endpoint.
///
/// `Unknown` covers transport failures and unexpected statuses; it is
/// deliberately distinct from `Invalid` so a flaky network never logs a
/// user out on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    Valid,
    Invalid,
    Unknown,
}

impl VerifyOutcome {
    pub(crate) fn from_status(status: u16) -> Self {
        match status {
            200..=299 => VerifyOutcome::Valid,
            401 | 403 => VerifyOutcome::Invalid,
            _ => VerifyOutcome::Unknown,
        }
    }
}

/// One authoritative round trip confirming the session is still valid.
/// Never fails: every outcome maps onto [`VerifyOutcome`].
pub async fn verify_session() -> VerifyOutcome {
    #[cfg(feature = "hydrate")]
    {
        match gloo_net::http::Request::get(VERIFY_ENDPOINT).send().await {
            Ok(response) => VerifyOutcome::from_status(response.status()),
            Err(_) => VerifyOutcome::Unknown,
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        VerifyOutcome::Unknown
    }
}

/// Authenticate against the login endpoint. The server sets the session
/// cookie itself; on success the caller reloads into the console.
///
/// # Errors
///
/// Returns the server's error message, or a status/transport description.
pub async fn login(username: &str, password: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let response = gloo_net::http::Request::post(LOGIN_ENDPOINT)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.ok() {
            return Ok(());
        }

        let status = response.status();
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(ToOwned::to_owned))
            .unwrap_or_else(|| format!("login failed with status {status}"));
        Err(message)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (username, password);
        Err("not available on the server".to_owned())
    }
}

// =============================================================
// Typed payloads
// =============================================================

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Job {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub task_name: String,
    #[serde(default)]
    pub next_run_time: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Execution {
    #[serde(default)]
    pub execution_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub scheduled_time: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AuditLog {
    #[serde(default)]
    pub job_name: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub created_time: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct UserAccount {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub category_id: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Category {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Pull a typed list out of a response body that is either
/// `{"<key>": [...]}` or a single bare object. Items that do not decode
/// are dropped rather than failing the whole list.
pub(crate) fn items_from_body<T: DeserializeOwned>(body: serde_json::Value, key: &str) -> Vec<T> {
    let items = match body.get(key) {
        Some(serde_json::Value::Array(items)) => items.clone(),
        _ => vec![body],
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

/// Fetch a section list through the guarded client. On the server this is
/// a stub returning an empty list.
async fn fetch_list<T: DeserializeOwned>(
    client: &GuardedClient,
    url: &str,
    key: &str,
) -> Result<Vec<T>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = client.get_json::<serde_json::Value>(url).await?;
        Ok(items_from_body(body, key))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (client, url, key);
        Ok(Vec::new())
    }
}

// =============================================================
// Guarded CRUD calls
// =============================================================

pub async fn fetch_jobs(client: &GuardedClient) -> Result<Vec<Job>, ApiError> {
    fetch_list(client, "/api/v1/jobs", "jobs").await
}

pub async fn fetch_executions(client: &GuardedClient) -> Result<Vec<Execution>, ApiError> {
    fetch_list(client, "/api/v1/executions", "executions").await
}

pub async fn fetch_audit_logs(client: &GuardedClient) -> Result<Vec<AuditLog>, ApiError> {
    fetch_list(client, "/api/v1/logs", "logs").await
}

pub async fn fetch_users(client: &GuardedClient) -> Result<Vec<UserAccount>, ApiError> {
    fetch_list(client, "/api/v1/users", "users").await
}

pub async fn fetch_categories(client: &GuardedClient) -> Result<Vec<Category>, ApiError> {
    fetch_list(client, "/api/v1/categories", "categories").await
}

pub async fn create_category(
    client: &GuardedClient,
    name: &str,
    description: &str,
) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "name": name, "description": description });
        client.post_json("/api/v1/categories", &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (client, name, description);
        Err(ApiError::Unavailable)
    }
}

pub async fn modify_category(
    client: &GuardedClient,
    id: i64,
    name: &str,
    description: &str,
) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "name": name, "description": description });
        client.put_json(&format!("/api/v1/categories/{id}"), &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (client, id, name, description);
        Err(ApiError::Unavailable)
    }
}

pub async fn delete_category(client: &GuardedClient, id: i64) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        client.delete(&format!("/api/v1/categories/{id}")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (client, id);
        Err(ApiError::Unavailable)
    }
}

pub async fn create_user(
    client: &GuardedClient,
    username: &str,
    password: &str,
    is_admin: bool,
) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({
            "username": username,
            "password": password,
            "is_admin": is_admin,
        });
        client.post_json("/api/v1/users", &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (client, username, password, is_admin);
        Err(ApiError::Unavailable)
    }
}

pub async fn delete_user(client: &GuardedClient, id: i64) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        client.delete(&format!("/api/v1/users/{id}")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (client, id);
        Err(ApiError::Unavailable)
    }
}
