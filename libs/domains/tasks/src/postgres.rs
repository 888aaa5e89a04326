use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};

use crate::{
    domain::{Task, TaskCategory},
    entity::{category, task},
    error::{NotFound, TodoError, TodoResult},
    repository::{CategoryRepository, TaskRepository},
};

pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn save(&self, category: TaskCategory) -> TodoResult<TaskCategory> {
        let active_model = category::ActiveModel::from(&category);
        let result = if category.is_saved() {
            active_model.update(&self.db).await
        } else {
            active_model.insert(&self.db).await
        };

        let model = result.map_err(|err| {
            if matches!(err, DbErr::RecordNotUpdated) {
                return NotFound::Category(category.id()).into();
            }
            match err.sql_err() {
                // unique index on name backs up the service-level check
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    TodoError::DuplicateName(category.name().to_owned())
                }
                _ => err.into(),
            }
        })?;

        tracing::debug!(category_id = model.id, "Saved task category");
        Ok(TaskCategory::try_from(model)?)
    }

    async fn find_by_id(&self, id: i64) -> TodoResult<Option<TaskCategory>> {
        let model = category::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(TaskCategory::try_from).transpose()?)
    }

    async fn find_by_name(&self, name: &str) -> TodoResult<Option<TaskCategory>> {
        let model = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(TaskCategory::try_from).transpose()?)
    }

    async fn find_all(&self) -> TodoResult<Vec<TaskCategory>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|model| TaskCategory::try_from(model).map_err(TodoError::from))
            .collect()
    }

    async fn delete_by_id(&self, id: i64) -> TodoResult<bool> {
        let result = category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => TodoError::CategoryInUse(id),
                _ => err.into(),
            })?;

        Ok(result.rows_affected > 0)
    }

    async fn exists_by_id(&self, id: i64) -> TodoResult<bool> {
        let count = category::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn exists_by_name(&self, name: &str) -> TodoResult<bool> {
        let count = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn save(&self, task: Task) -> TodoResult<Task> {
        let active_model = task::ActiveModel::from(&task);
        let result = if task.is_saved() {
            active_model.update(&self.db).await
        } else {
            active_model.insert(&self.db).await
        };

        let model = result.map_err(|err| {
            if matches!(err, DbErr::RecordNotUpdated) {
                return NotFound::Task(task.id()).into();
            }
            match err.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    TodoError::CategoryNotFound(task.category().name().to_owned())
                }
                _ => err.into(),
            }
        })?;

        tracing::debug!(task_id = model.id, "Saved task");

        // reload so the returned task carries the stored category
        self.find_by_id(model.id)
            .await?
            .ok_or_else(|| TodoError::Database(format!("task {} missing after save", model.id)))
    }

    async fn find_by_id(&self, id: i64) -> TodoResult<Option<Task>> {
        let row = task::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await?;

        row.map(Task::try_from).transpose()
    }

    async fn find_all(&self) -> TodoResult<Vec<Task>> {
        let rows = task::Entity::find()
            .find_also_related(category::Entity)
            .order_by_asc(task::Column::Id)
            .all(&self.db)
            .await?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn delete_by_id(&self, id: i64) -> TodoResult<bool> {
        let result = task::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn exists_by_id(&self, id: i64) -> TodoResult<bool> {
        let count = task::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }
}
