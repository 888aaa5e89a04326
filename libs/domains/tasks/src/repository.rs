use async_trait::async_trait;

use crate::domain::{Task, TaskCategory};
use crate::error::TodoResult;

/// Repository trait for TaskCategory persistence
///
/// `save` inserts when the category carries no id and overwrites the stored
/// row otherwise. Implementations enforce name uniqueness and refuse to
/// delete a category that tasks still point at (`CategoryInUse`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert or update, returning the stored category with its id
    async fn save(&self, category: TaskCategory) -> TodoResult<TaskCategory>;

    async fn find_by_id(&self, id: i64) -> TodoResult<Option<TaskCategory>>;

    /// Exact, case-sensitive name match
    async fn find_by_name(&self, name: &str) -> TodoResult<Option<TaskCategory>>;

    /// All categories in id order
    async fn find_all(&self) -> TodoResult<Vec<TaskCategory>>;

    /// Returns false when nothing was deleted
    async fn delete_by_id(&self, id: i64) -> TodoResult<bool>;

    async fn exists_by_id(&self, id: i64) -> TodoResult<bool>;

    async fn exists_by_name(&self, name: &str) -> TodoResult<bool>;
}

/// Repository trait for Task persistence
///
/// Tasks are always returned with their stored category attached. Saving a
/// task whose category id is unknown to storage fails with `CategoryNotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert or update, returning the stored task with its id
    async fn save(&self, task: Task) -> TodoResult<Task>;

    async fn find_by_id(&self, id: i64) -> TodoResult<Option<Task>>;

    /// All tasks in id order
    async fn find_all(&self) -> TodoResult<Vec<Task>>;

    /// Returns false when nothing was deleted
    async fn delete_by_id(&self, id: i64) -> TodoResult<bool>;

    async fn exists_by_id(&self, id: i64) -> TodoResult<bool>;
}
