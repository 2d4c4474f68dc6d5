use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::prelude::Todo;
use crate::db::entities::todo;

const ENTITY: &str = "Todo";

/// Fields for a new row; defaults are applied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl TodoDao {
    pub async fn create(&self, new: NewTodo) -> DaoResult<todo::Model> {
        let model = todo::ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            completed: Set(new.completed),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        model.insert(self.db()).await.map_err(DaoLayerError::Db)
    }

    /// All rows in insertion order.
    pub async fn list(&self) -> DaoResult<Vec<todo::Model>> {
        Todo::find()
            .order_by_asc(todo::Column::Id)
            .all(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn find_by_id(&self, id: i64) -> DaoResult<todo::Model> {
        Todo::find_by_id(id)
            .one(self.db())
            .await
            .map_err(DaoLayerError::Db)?
            .ok_or(DaoLayerError::not_found(ENTITY, id))
    }

    /// Writes `changes` over an already loaded row.
    pub async fn apply_changes(
        &self,
        existing: todo::Model,
        changes: TodoChanges,
    ) -> DaoResult<todo::Model> {
        if changes.is_empty() {
            return Ok(existing);
        }

        let id = existing.id;
        let mut active = existing.into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(completed) = changes.completed {
            active.completed = Set(completed);
        }

        active.update(self.db()).await.map_err(|err| match err {
            // Row vanished between the read and the write.
            DbErr::RecordNotUpdated => DaoLayerError::not_found(ENTITY, id),
            other => DaoLayerError::Db(other),
        })
    }

    pub async fn delete(&self, id: i64) -> DaoResult<i64> {
        let result = Todo::delete_by_id(id)
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::not_found(ENTITY, id));
        }

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use super::{TodoChanges, TodoDao};
    use crate::db::dao::{DaoBase, DaoLayerError};
    use crate::db::entities::todo;

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn todo_model(id: i64, title: &str) -> todo::Model {
        todo::Model {
            id,
            title: title.to_string(),
            description: String::new(),
            completed: false,
            created_at: ts(),
        }
    }

    #[tokio::test]
    async fn find_by_id_returns_not_found_when_missing() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao.find_by_id(7).await.expect_err("lookup should fail");
        assert!(matches!(err, DaoLayerError::NotFound { id: 7, .. }));
        assert_eq!(err.to_string(), "Todo not found");
    }

    #[tokio::test]
    async fn find_by_id_returns_row_when_present() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([[todo_model(3, "write tests")]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let found = dao.find_by_id(3).await.expect("lookup should succeed");
        assert_eq!(found.title, "write tests");
    }

    #[tokio::test]
    async fn list_returns_rows_from_storage() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([[todo_model(1, "first"), todo_model(2, "second")]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let rows = dao.list().await.expect("list should succeed");
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn list_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("disk I/O error".to_string())])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao.list().await.expect_err("list should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }

    #[tokio::test]
    async fn delete_reports_not_found_when_no_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao.delete(42).await.expect_err("delete should fail");
        assert!(matches!(err, DaoLayerError::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn delete_returns_id_when_row_removed() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let dao = TodoDao::new(&db);

        assert_eq!(dao.delete(5).await.expect("delete should succeed"), 5);
    }

    #[tokio::test]
    async fn empty_changes_skip_the_write() {
        // No results queued: any statement would error.
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let dao = TodoDao::new(&db);
        let existing = todo_model(9, "unchanged");

        let updated = dao
            .apply_changes(existing.clone(), TodoChanges::default())
            .await
            .expect("no-op update should succeed");
        assert_eq!(updated, existing);
    }
}
