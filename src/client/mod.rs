//! Client layer: authenticated request path and the per-resource calls.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::domain::{
    ApiToken, NewShift, NewUser, ShiftFilter, UserFilter, UserUpdate, ValidationError, require_id,
    require_text,
};
use crate::transport;

const DEFAULT_ENDPOINT: &str = "https://api.wheniwork.com/2";

/// Header naming the acting user on behalf of an account-level token.
pub const USER_ID_HEADER: &str = "W-UserID";

/// Header set merged into every request; later sources win on key collision.
pub type Headers = BTreeMap<String, String>;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone)]
struct ApiRequest {
    verb: Verb,
    url: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: ApiRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: ApiRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let method = match request.verb {
                Verb::Get => reqwest::Method::GET,
                Verb::Post => reqwest::Method::POST,
                Verb::Put => reqwest::Method::PUT,
                Verb::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, request.url.as_str());
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`WiwClient`].
///
/// Every failure mode flows through this one type: local validation and the
/// missing-token case short-circuit before any network traffic, everything
/// else surfaces the remote exchange.
pub enum WiwError {
    /// No API token configured on the client; the call was not sent.
    #[error("token is not set")]
    MissingToken,

    /// A required argument was missing, empty, or zero; the call was not sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status; the response text is appended when the
    /// API sent a diagnostic body.
    #[error("unexpected HTTP status: {status}{}", .body.as_deref().map(|text| format!("\nError message: {text}")).unwrap_or_default())]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be decoded into the expected shape.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Position removal targeted an id the user does not hold.
    #[error("user {user_id} does not hold position {position_id}")]
    PositionNotFound { user_id: u64, position_id: u64 },

    /// An endpoint override is not a valid URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

fn wire_err(err: transport::TransportError) -> WiwError {
    WiwError::Parse(Box::new(err))
}

#[derive(Debug, Clone)]
/// Builder for [`WiwClient`].
///
/// Use this to start without a token, override the endpoint, preconfigure
/// headers, or tune the HTTP client (timeout, user-agent).
pub struct WiwClientBuilder {
    token: Option<ApiToken>,
    endpoint: String,
    headers: Headers,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Default for WiwClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WiwClientBuilder {
    /// Create a builder with the production endpoint and no token.
    pub fn new() -> Self {
        Self {
            token: None,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            headers: Headers::new(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the API token.
    pub fn token(mut self, token: ApiToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Override the base endpoint. Paths are appended to it verbatim, so a
    /// trailing slash here doubles up.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Add one instance-level header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the instance-level header set.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Act on behalf of a user by presetting the `W-UserID` header.
    pub fn user_id(self, user_id: u64) -> Self {
        self.header(USER_ID_HEADER, user_id.to_string())
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`WiwClient`].
    pub fn build(self) -> Result<WiwClient, WiwError> {
        Url::parse(&self.endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| WiwError::Transport(Box::new(err)))?;

        Ok(WiwClient {
            token: self.token,
            endpoint: self.endpoint,
            headers: self.headers,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// When I Work API client.
///
/// Wraps the scheduling service's HTTP API: every call goes out as
/// `endpoint + path` with the `W-Token` header attached, and comes back as
/// the decoded JSON body. Calls borrow `&self` and return their result
/// directly; nothing from a response is cached on the client, so one
/// instance can be shared across tasks.
pub struct WiwClient {
    token: Option<ApiToken>,
    endpoint: String,
    headers: Headers,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for WiwClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WiwClient")
            .field("token", &self.token)
            .field("endpoint", &self.endpoint)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl WiwClient {
    /// Create a client for the production endpoint.
    ///
    /// For endpoint overrides, preset headers, or a token-less client, use
    /// [`WiwClient::builder`].
    pub fn new(token: ApiToken) -> Self {
        Self {
            token: Some(token),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            headers: Headers::new(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder() -> WiwClientBuilder {
        WiwClientBuilder::new()
    }

    /// The configured token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(ApiToken::as_str)
    }

    /// Replace the API token.
    pub fn set_token(&mut self, token: ApiToken) {
        self.token = Some(token);
    }

    /// The base endpoint requests are issued against.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Replace the base endpoint.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> Result<(), WiwError> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint)?;
        self.endpoint = endpoint;
        Ok(())
    }

    /// Instance-level headers merged into every request.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Replace the instance-level header set.
    pub fn set_headers(&mut self, headers: Headers) {
        self.headers = headers;
    }

    /// Add or overwrite one instance-level header.
    pub fn insert_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// The acting user id, when the `W-UserID` header is set.
    pub fn user_id(&self) -> Option<&str> {
        self.headers.get(USER_ID_HEADER).map(String::as_str)
    }

    /// Act on behalf of a user via the `W-UserID` header.
    pub fn set_user_id(&mut self, user_id: u64) {
        self.headers
            .insert(USER_ID_HEADER.to_owned(), user_id.to_string());
    }

    async fn request(
        &self,
        verb: Verb,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
        extra_headers: &Headers,
    ) -> Result<Value, WiwError> {
        if path.is_empty() {
            return Err(ValidationError::Empty { field: "path" }.into());
        }
        let token = self.token.as_ref().ok_or(WiwError::MissingToken)?;

        let mut headers = Headers::new();
        headers.insert(ApiToken::HEADER.to_owned(), token.as_str().to_owned());
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        for (name, value) in extra_headers {
            headers.insert(name.clone(), value.clone());
        }

        let request = ApiRequest {
            verb,
            // Deliberate concatenation: the caller owns path correctness.
            url: format!("{}{}", self.endpoint, path),
            headers: headers.into_iter().collect(),
            query,
            body,
        };

        let response = self
            .http
            .send(request)
            .await
            .map_err(WiwError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(WiwError::HttpStatus {
                status: response.status,
                body,
            });
        }

        serde_json::from_str(&response.body).map_err(|err| WiwError::Parse(Box::new(err)))
    }

    /// GET `endpoint + path` with query parameters.
    pub async fn get(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        extra_headers: &Headers,
    ) -> Result<Value, WiwError> {
        self.request(Verb::Get, path, query, None, extra_headers)
            .await
    }

    /// POST a JSON body to `endpoint + path`.
    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        extra_headers: &Headers,
    ) -> Result<Value, WiwError> {
        self.request(Verb::Post, path, Vec::new(), body, extra_headers)
            .await
    }

    /// PUT a JSON body to `endpoint + path`.
    pub async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        extra_headers: &Headers,
    ) -> Result<Value, WiwError> {
        self.request(Verb::Put, path, Vec::new(), body, extra_headers)
            .await
    }

    /// DELETE `endpoint + path`.
    pub async fn delete(&self, path: &str, extra_headers: &Headers) -> Result<Value, WiwError> {
        self.request(Verb::Delete, path, Vec::new(), None, extra_headers)
            .await
    }

    /// List all positions.
    pub async fn get_positions(&self) -> Result<Vec<Value>, WiwError> {
        let body = self.get("/positions", Vec::new(), &Headers::new()).await?;
        transport::unwrap_list(body, "positions").map_err(wire_err)
    }

    /// Fetch one position.
    pub async fn get_position(&self, position_id: u64) -> Result<Value, WiwError> {
        let position_id = require_id("position_id", position_id)?;
        let body = self
            .get(&format!("/positions/{position_id}"), Vec::new(), &Headers::new())
            .await?;
        transport::unwrap_key(body, "position").map_err(wire_err)
    }

    /// Create a position.
    pub async fn create_position(&self, name: &str) -> Result<Value, WiwError> {
        let name = require_text("name", name)?;
        self.post(
            "/positions",
            Some(transport::encode_new_position(&name)),
            &Headers::new(),
        )
        .await
    }

    /// List all job sites.
    pub async fn get_jobsites(&self) -> Result<Vec<Value>, WiwError> {
        let body = self.get("/sites", Vec::new(), &Headers::new()).await?;
        transport::unwrap_list(body, "sites").map_err(wire_err)
    }

    /// Fetch one job site.
    pub async fn get_jobsite(&self, jobsite_id: u64) -> Result<Value, WiwError> {
        let jobsite_id = require_id("jobsite_id", jobsite_id)?;
        let body = self
            .get(&format!("/sites/{jobsite_id}"), Vec::new(), &Headers::new())
            .await?;
        transport::unwrap_key(body, "site").map_err(wire_err)
    }

    /// Create a job site under a schedule.
    pub async fn create_jobsite(&self, name: &str, schedule_id: u64) -> Result<Value, WiwError> {
        let name = require_text("name", name)?;
        let schedule_id = require_id("schedule_id", schedule_id)?;
        self.post(
            "/sites",
            Some(transport::encode_new_jobsite(&name, schedule_id)),
            &Headers::new(),
        )
        .await
    }

    /// List all schedules (remote "locations").
    pub async fn get_schedules(&self) -> Result<Vec<Value>, WiwError> {
        let body = self.get("/locations", Vec::new(), &Headers::new()).await?;
        transport::unwrap_list(body, "locations").map_err(wire_err)
    }

    /// Fetch one schedule.
    pub async fn get_schedule(&self, schedule_id: u64) -> Result<Value, WiwError> {
        let schedule_id = require_id("schedule_id", schedule_id)?;
        let body = self
            .get(&format!("/locations/{schedule_id}"), Vec::new(), &Headers::new())
            .await?;
        transport::unwrap_key(body, "location").map_err(wire_err)
    }

    /// Create a schedule.
    pub async fn create_schedule(&self, name: &str) -> Result<Value, WiwError> {
        let name = require_text("name", name)?;
        self.post(
            "/locations",
            Some(transport::encode_new_schedule(&name)),
            &Headers::new(),
        )
        .await
    }

    /// List users matching the filter.
    pub async fn get_users(&self, filter: &UserFilter) -> Result<Vec<Value>, WiwError> {
        let query = transport::encode_user_filter(filter);
        let body = self.get("/users", query, &Headers::new()).await?;
        transport::unwrap_list(body, "users").map_err(wire_err)
    }

    /// Fetch one user.
    pub async fn get_user(&self, user_id: u64) -> Result<Value, WiwError> {
        let user_id = require_id("user_id", user_id)?;
        let body = self
            .get(&format!("/users/{user_id}"), Vec::new(), &Headers::new())
            .await?;
        transport::unwrap_key(body, "user").map_err(wire_err)
    }

    /// Create a user account.
    pub async fn create_user(&self, user: &NewUser) -> Result<Value, WiwError> {
        let body = transport::encode_new_user(user).map_err(wire_err)?;
        self.post("/users", Some(body), &Headers::new()).await
    }

    /// Send onboarding invites to existing user accounts.
    pub async fn invite_users(&self, ids: &[u64]) -> Result<Value, WiwError> {
        if ids.is_empty() {
            return Err(ValidationError::Empty { field: "ids" }.into());
        }
        self.post(
            "/users/invite",
            Some(transport::encode_invite(ids)),
            &Headers::new(),
        )
        .await
    }

    /// Update a user account.
    pub async fn update_user(&self, user_id: u64, update: &UserUpdate) -> Result<Value, WiwError> {
        let user_id = require_id("user_id", user_id)?;
        let body = transport::encode_user_update(update).map_err(wire_err)?;
        self.put(&format!("/users/{user_id}"), Some(body), &Headers::new())
            .await
    }

    /// List shifts in a time window.
    pub async fn list_shifts(&self, filter: &ShiftFilter) -> Result<Value, WiwError> {
        let query = transport::encode_shift_filter(filter);
        self.get("/shifts", query, &Headers::new()).await
    }

    /// Fetch one shift; returns the full envelope.
    pub async fn get_shift(&self, shift_id: u64) -> Result<Value, WiwError> {
        let shift_id = require_id("shift_id", shift_id)?;
        self.get(&format!("/shifts/{shift_id}"), Vec::new(), &Headers::new())
            .await
    }

    /// Delete one shift.
    pub async fn delete_shift(&self, shift_id: u64) -> Result<Value, WiwError> {
        let shift_id = require_id("shift_id", shift_id)?;
        self.delete(&format!("/shifts/{shift_id}"), &Headers::new())
            .await
    }

    /// Create a shift.
    pub async fn create_shift(&self, shift: &NewShift) -> Result<Value, WiwError> {
        let body = transport::encode_new_shift(shift).map_err(wire_err)?;
        self.post("/shifts", Some(body), &Headers::new()).await
    }

    /// Publish shifts by id, making them visible to staff.
    pub async fn publish_shifts(&self, ids: &[u64]) -> Result<Value, WiwError> {
        self.post(
            "/shifts/publish",
            Some(transport::encode_shift_ids(ids)),
            &Headers::new(),
        )
        .await
    }

    /// Revert shifts to unpublished.
    pub async fn unpublish_shifts(&self, ids: &[u64]) -> Result<Value, WiwError> {
        self.post(
            "/shifts/unpublish",
            Some(transport::encode_shift_ids(ids)),
            &Headers::new(),
        )
        .await
    }

    /// Unassign shifts from their users, leaving them open.
    pub async fn unassign_shifts(&self, shift_ids: &[u64]) -> Result<Value, WiwError> {
        if shift_ids.is_empty() {
            return Err(ValidationError::Empty { field: "shift_ids" }.into());
        }
        self.post(
            "/shifts/unassign",
            Some(transport::encode_unassign(shift_ids)),
            &Headers::new(),
        )
        .await
    }

    /// Append a position to the user's position list and write it back.
    ///
    /// Read-modify-write against the remote service: a concurrent mutation of
    /// the same user between the fetch and the write is lost. Appending an id
    /// the user already holds duplicates it; the list is not deduplicated.
    pub async fn add_position_to_user(
        &self,
        user_id: u64,
        position_id: u64,
    ) -> Result<Value, WiwError> {
        let user_id = require_id("user_id", user_id)?;
        let user = self.get_user(user_id).await?;
        let mut positions = transport::position_ids(&user).map_err(wire_err)?;
        positions.push(position_id);
        self.put(
            &format!("/users/{user_id}"),
            Some(transport::encode_position_list(&positions)),
            &Headers::new(),
        )
        .await
    }

    /// Remove the first occurrence of a position from the user's list and
    /// write it back.
    ///
    /// Same read-modify-write window as [`WiwClient::add_position_to_user`].
    /// Fails with [`WiwError::PositionNotFound`] when the user does not hold
    /// the position; nothing is written in that case.
    pub async fn remove_position_from_user(
        &self,
        user_id: u64,
        position_id: u64,
    ) -> Result<Value, WiwError> {
        let user_id = require_id("user_id", user_id)?;
        let user = self.get_user(user_id).await?;
        let mut positions = transport::position_ids(&user).map_err(wire_err)?;
        let index = positions
            .iter()
            .position(|&id| id == position_id)
            .ok_or(WiwError::PositionNotFound {
                user_id,
                position_id,
            })?;
        positions.remove(index);
        self.put(
            &format!("/users/{user_id}"),
            Some(transport::encode_position_list(&positions)),
            &Headers::new(),
        )
        .await
    }
}
