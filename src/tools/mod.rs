//! Named-tool dispatch over the student store.
//!
//! Each tool takes named JSON arguments, runs one store operation under the
//! shared lock, and returns either a success payload or a typed failure.
//! The lock covers the whole load-modify-save round trip, so concurrent
//! invocations cannot lose each other's writes.

use crate::core::{NewStudent, StoreError, StudentPatch};
use crate::store::students::StudentStore;
use crate::store::validate;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TOOL_NAMES: [&str; 6] = [
    "create_student",
    "get_student",
    "list_students",
    "update_student",
    "delete_student",
    "student_stats",
];

/// Shared ownership of the store plus boundary configuration. Cloning is
/// cheap; all clones funnel through the same mutex.
#[derive(Clone)]
pub struct ToolContext {
    store: Arc<Mutex<StudentStore>>,
    strict_validation: bool,
}

impl ToolContext {
    pub fn new(store: StudentStore, strict_validation: bool) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            strict_validation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub enum ToolError {
    Input(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
    UnknownTool(String),
}

impl From<StoreError> for ToolError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => Self::Conflict(err.to_string()),
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Persist(_) => Self::Internal(err.to_string()),
            // student_stats answers the empty case itself; reaching this
            // arm from any other operation is a bug worth surfacing.
            StoreError::EmptyCollection => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            ToolError::Input(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, "input_error"),
            ToolError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "not_found"),
            ToolError::Conflict(msg) => (StatusCode::CONFLICT, msg, "conflict"),
            ToolError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, "internal_error"),
            ToolError::UnknownTool(name) => (
                StatusCode::NOT_FOUND,
                format!("unknown tool '{name}'"),
                "unknown_tool",
            ),
        };
        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ToolResult = std::result::Result<Value, ToolError>;

/// Invokes a tool by name with named JSON arguments.
pub async fn dispatch(ctx: &ToolContext, name: &str, args: Value) -> ToolResult {
    match name {
        "create_student" => create_student(ctx, args).await,
        "get_student" => get_student(ctx, args).await,
        "list_students" => list_students(ctx, args).await,
        "update_student" => update_student(ctx, args).await,
        "delete_student" => delete_student(ctx, args).await,
        "student_stats" => student_stats(ctx).await,
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

fn decode<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|err| ToolError::Input(err.to_string()))
}

#[derive(Debug, Deserialize)]
struct IdArgs {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ListArgs {
    // Omitted means "all careers"; an explicit empty string is a filter.
    career: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    id: u64,
    #[serde(flatten)]
    patch: StudentPatch,
}

async fn create_student(ctx: &ToolContext, args: Value) -> ToolResult {
    let new: NewStudent = decode(args)?;
    if ctx.strict_validation {
        let problems = validate::validate(&new.name, &new.email, new.age);
        if !problems.is_empty() {
            return Err(ToolError::Input(problems.join("; ")));
        }
    }
    let store = ctx.store.lock().await;
    let student = store.create(new)?;
    tracing::info!(id = student.id, "student created");
    Ok(json!(student))
}

async fn get_student(ctx: &ToolContext, args: Value) -> ToolResult {
    let IdArgs { id } = decode(args)?;
    let store = ctx.store.lock().await;
    Ok(json!(store.get(id)?))
}

async fn list_students(ctx: &ToolContext, args: Value) -> ToolResult {
    let ListArgs { career } = decode(args)?;
    let store = ctx.store.lock().await;
    Ok(json!(store.list(career.as_deref())))
}

async fn update_student(ctx: &ToolContext, args: Value) -> ToolResult {
    let UpdateArgs { id, patch } = decode(args)?;
    let store = ctx.store.lock().await;
    let outcome = store.update(id, patch)?;
    tracing::info!(id, changed = ?outcome.changed, "student updated");
    Ok(json!(outcome))
}

async fn delete_student(ctx: &ToolContext, args: Value) -> ToolResult {
    let IdArgs { id } = decode(args)?;
    let store = ctx.store.lock().await;
    let removed = store.delete(id)?;
    tracing::info!(id, "student deleted");
    Ok(json!({ "deleted": removed }))
}

async fn student_stats(ctx: &ToolContext) -> ToolResult {
    let store = ctx.store.lock().await;
    match store.stats() {
        Ok(stats) => Ok(json!(stats)),
        // An empty register is a benign answer at this boundary, not a
        // failure.
        Err(StoreError::EmptyCollection) => Ok(json!({
            "total": 0,
            "message": "no students registered yet",
        })),
        Err(err) => Err(err.into()),
    }
}
