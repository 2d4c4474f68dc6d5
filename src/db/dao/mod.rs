mod context;
pub mod error;
pub mod todo_dao;

use sea_orm::DatabaseConnection;

pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use todo_dao::{NewTodo, TodoChanges, TodoDao};

pub trait DaoBase: Clone + Send + Sync + Sized {
    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;
}
