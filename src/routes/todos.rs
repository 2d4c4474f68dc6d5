use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::{
    db::dao::TodoChanges,
    db::entities::todo,
    error::AppError,
    extract::{ApiJson, TodoId},
    response::{ApiResponse, ApiResult, MessageBody},
    services::{ServiceContext, todo_service::TodoService},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: &'static str,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn list_todos(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TodoResponse>> {
    let todos = todo_service_from_state(state.as_ref()).list().await?;
    ApiResponse::ok(todos.into_iter().map(TodoResponse::from).collect())
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateTodoRequest>,
) -> ApiResult<CreatedResponse> {
    let CreateTodoRequest {
        title,
        description,
        completed,
    } = body;
    let todo = todo_service_from_state(state.as_ref())
        .create(title, description, completed)
        .await?;
    ApiResponse::with_status(
        StatusCode::CREATED,
        CreatedResponse {
            id: todo.id,
            message: "Todo created successfully",
        },
    )
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> ApiResult<TodoResponse> {
    let todo = todo_service_from_state(state.as_ref()).get(id).await?;
    ApiResponse::ok(todo.into())
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    body: Result<ApiJson<UpdateTodoRequest>, AppError>,
) -> ApiResult<MessageBody> {
    let changes = body.map(|ApiJson(body)| TodoChanges::from(body));
    todo_service_from_state(state.as_ref())
        .update(id, changes)
        .await?;
    ApiResponse::ok(MessageBody::new("Todo updated successfully"))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> ApiResult<MessageBody> {
    todo_service_from_state(state.as_ref()).delete(id).await?;
    ApiResponse::ok(MessageBody::new("Todo deleted successfully"))
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at,
        }
    }
}

impl From<UpdateTodoRequest> for TodoChanges {
    fn from(body: UpdateTodoRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            completed: body.completed,
        }
    }
}

fn todo_service_from_state(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
