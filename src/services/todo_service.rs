use tracing::debug;

use crate::{
    db::dao::{DaoLayerError, NewTodo, TodoChanges, TodoDao},
    db::entities::todo,
    error::AppError,
};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TODO_NOT_FOUND: &str = "Todo not found";

#[derive(Clone, Copy)]
enum TodoOp {
    Create,
    Find,
    List,
    Update,
    Delete,
}

impl TodoOp {
    fn failure(self) -> &'static str {
        match self {
            TodoOp::Create => "Create failed",
            TodoOp::Find | TodoOp::List => "Find failed",
            TodoOp::Update => "Update failed",
            TodoOp::Delete => "Delete failed",
        }
    }
}

#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    pub async fn create(
        &self,
        title: Option<String>,
        description: Option<String>,
        completed: Option<bool>,
    ) -> Result<todo::Model, AppError> {
        let title = require_title(title)?;
        let new = NewTodo {
            title,
            description: description.unwrap_or_default(),
            completed: completed.unwrap_or(false),
        };

        let model = self
            .todo_dao
            .create(new)
            .await
            .map_err(|err| map_error(TodoOp::Create, err))?;
        debug!(id = model.id, "todo created");
        Ok(model)
    }

    pub async fn list(&self) -> Result<Vec<todo::Model>, AppError> {
        self.todo_dao
            .list()
            .await
            .map_err(|err| map_error(TodoOp::List, err))
    }

    pub async fn get(&self, id: i64) -> Result<todo::Model, AppError> {
        self.todo_dao
            .find_by_id(id)
            .await
            .map_err(|err| map_error(TodoOp::Find, err))
    }

    /// Existence is checked before the payload, including its decoding, so a
    /// missing id always reports 404.
    pub async fn update(
        &self,
        id: i64,
        changes: Result<TodoChanges, AppError>,
    ) -> Result<todo::Model, AppError> {
        let existing = self.get(id).await?;
        let changes = changes?;

        let changes = TodoChanges {
            title: changes.title.map(|title| require_title(Some(title))).transpose()?,
            ..changes
        };

        let model = self
            .todo_dao
            .apply_changes(existing, changes)
            .await
            .map_err(|err| map_error(TodoOp::Update, err))?;
        debug!(id, "todo updated");
        Ok(model)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.todo_dao
            .delete(id)
            .await
            .map_err(|err| map_error(TodoOp::Delete, err))?;
        debug!(id, "todo deleted");
        Ok(())
    }
}

fn require_title(title: Option<String>) -> Result<String, AppError> {
    match title {
        Some(title) if !title.trim().is_empty() => Ok(title),
        _ => Err(AppError::bad_request(TITLE_REQUIRED)),
    }
}

fn map_error(op: TodoOp, err: DaoLayerError) -> AppError {
    match err {
        DaoLayerError::NotFound { entity, id } => {
            debug!(entity, id, "lookup missed");
            AppError::not_found(TODO_NOT_FOUND)
        }
        DaoLayerError::Db(db_err) => {
            let message = format!("{}. Please check the logs for more details", op.failure());
            AppError::internal_with_source(message, db_err)
        }
    }
}
