use std::{convert::Infallible, future::Future, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequestParts, Path, State,
    },
    http::{header, request::Parts, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{de::Unexpected, Deserialize, Deserializer, Serialize};
use todo_core::hal::{self, TodoCollection, TodoResource, HAL_JSON};
use todo_core::{NewTodo, TodoId, TodoStore};
use tokio::net::TcpListener;
use tracing::{debug, info};

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{AppError, ServerError};

/// Shared handler state: one store for the whole process.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<TodoStore>,
    pub public_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self {
            store,
            public_url: None,
        }
    }

    pub fn with_public_url(mut self, public_url: Option<String>) -> Self {
        self.public_url = public_url.map(Arc::from);
        self
    }
}

/// Request body for creating a todo. `id` and `user` in the body are ignored;
/// the path decides the owner and the store picks the id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub target_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub done: bool,
}

impl CreateTodo {
    fn validate(self, user: String) -> Result<NewTodo, AppError> {
        let desc = self
            .desc
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::Validation("desc must not be empty".to_string()))?;
        Ok(NewTodo::new(user, desc)
            .target_date(self.target_date)
            .done(self.done))
    }
}

/// Accepts `true`/`false` as JSON booleans or strings; `null` means `false`.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Raw::Bool(b)) => Ok(b),
        Some(Raw::Text(s)) => match s.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::invalid_value(
                Unexpected::Str(other),
                &"a boolean",
            )),
        },
    }
}

/// Accepts an RFC 3339 string or a JSON integer of epoch milliseconds (how
/// Java clients serialize `Date`); `null` means no date.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Millis(millis)) => DateTime::from_timestamp_millis(millis)
            .map(Some)
            .ok_or_else(|| {
                serde::de::Error::invalid_value(
                    Unexpected::Signed(millis),
                    &"epoch milliseconds within the supported date range",
                )
            }),
        Some(Raw::Text(text)) => DateTime::parse_from_rfc3339(text.trim())
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| {
                serde::de::Error::invalid_value(
                    Unexpected::Str(&text),
                    &"an RFC 3339 date-time or epoch milliseconds",
                )
            }),
    }
}

/// External base URL for links: the configured public URL, else
/// `http://{Host}`, else `http://localhost`.
#[derive(Debug, Clone)]
pub struct BaseUrl(pub String);

impl FromRequestParts<AppState> for BaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(url) = &state.public_url {
            return Ok(BaseUrl(url.to_string()));
        }
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|h| !h.is_empty())
            .unwrap_or("localhost");
        Ok(BaseUrl(format!("http://{host}")))
    }
}

/// JSON body served as `application/hal+json`.
pub struct Hal<T>(pub T);

impl<T: Serialize> IntoResponse for Hal<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.0).into_response();
        if response.status().is_success() {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(HAL_JSON));
        }
        response
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/users/{user}/todos", get(list_todos).post(create_todo))
        .route("/users/{user}/todos/", get(list_todos).post(create_todo))
        .route("/users/{user}/todos/{id}", get(get_todo))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(no_route)
        .layer(axum::middleware::from_fn(telemetry::request_tracing))
        .with_state(state)
}

pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn no_route(method: Method, uri: Uri) -> AppError {
    AppError::NoRoute {
        method,
        path: uri.path().to_string(),
    }
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed {
        method,
        path: uri.path().to_string(),
    }
}

async fn list_todos(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    path: Result<Path<String>, PathRejection>,
) -> Result<Hal<TodoCollection>, AppError> {
    let Path(user) = path?;
    let todos = state.store.list_by_user(&user);
    debug!(user = %user, count = todos.len(), "listed todos");
    Ok(Hal(hal::present_collection(todos, &user, &base)))
}

async fn get_todo(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    path: Result<Path<(String, TodoId)>, PathRejection>,
) -> Result<Hal<TodoResource>, AppError> {
    let Path((user, id)) = path?;
    let todo = state.store.get(id).inspect_err(|err| {
        debug!(user = %user, error = %err, "todo lookup failed");
    })?;
    Ok(Hal(hal::present_item(todo, &user, &base)))
}

async fn create_todo(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(user) = path?;
    let Json(input) = body?;
    let created = state.store.add(input.validate(user)?);
    info!(user = %created.user, id = created.id, "created todo");

    let location = hal::item_href(&base, &created.user, created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}
