use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{Task, TaskCategory},
    error::{NotFound, TodoError, TodoResult},
    repository::{CategoryRepository, TaskRepository},
};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i64, TaskCategory>,
    tasks: BTreeMap<i64, Task>,
    last_category_id: i64,
    last_task_id: i64,
}

/// Process-local storage shared by the in-memory repositories.
///
/// Category and task repositories built from the same store see each other's
/// rows, which is what lets a category delete notice referencing tasks.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_repository(&self) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository {
            store: self.clone(),
        }
    }

    pub fn task_repository(&self) -> InMemoryTaskRepository {
        InMemoryTaskRepository {
            store: self.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryCategoryRepository {
    store: InMemoryStore,
}

impl InMemoryCategoryRepository {
    /// Repository over a store of its own.
    pub fn new() -> Self {
        InMemoryStore::new().category_repository()
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn save(&self, category: TaskCategory) -> TodoResult<TaskCategory> {
        let mut guard = self.store.tables.write().await;
        let tables = &mut *guard;

        let name_taken = tables
            .categories
            .values()
            .any(|c| c.id() != category.id() && c.name() == category.name());
        if name_taken {
            return Err(TodoError::DuplicateName(category.name().to_owned()));
        }

        let category = if category.is_saved() {
            if !tables.categories.contains_key(&category.id()) {
                return Err(NotFound::Category(category.id()).into());
            }
            category
        } else {
            tables.last_category_id += 1;
            category.with_id(tables.last_category_id)
        };

        // tasks embed their category, keep those copies in step with the row
        for task in tables
            .tasks
            .values_mut()
            .filter(|t| t.category().id() == category.id())
        {
            task.set_category(category.clone());
        }

        tables.categories.insert(category.id(), category.clone());
        tracing::debug!(category_id = category.id(), "Saved task category");
        Ok(category)
    }

    async fn find_by_id(&self, id: i64) -> TodoResult<Option<TaskCategory>> {
        let tables = self.store.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> TodoResult<Option<TaskCategory>> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .categories
            .values()
            .find(|c| c.name() == name)
            .cloned())
    }

    async fn find_all(&self) -> TodoResult<Vec<TaskCategory>> {
        let tables = self.store.tables.read().await;
        Ok(tables.categories.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> TodoResult<bool> {
        let mut tables = self.store.tables.write().await;

        if tables.tasks.values().any(|t| t.category().id() == id) {
            return Err(TodoError::CategoryInUse(id));
        }

        let deleted = tables.categories.remove(&id).is_some();
        if deleted {
            tracing::debug!(category_id = id, "Deleted task category");
        }
        Ok(deleted)
    }

    async fn exists_by_id(&self, id: i64) -> TodoResult<bool> {
        let tables = self.store.tables.read().await;
        Ok(tables.categories.contains_key(&id))
    }

    async fn exists_by_name(&self, name: &str) -> TodoResult<bool> {
        let tables = self.store.tables.read().await;
        Ok(tables.categories.values().any(|c| c.name() == name))
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    store: InMemoryStore,
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: Task) -> TodoResult<Task> {
        let mut guard = self.store.tables.write().await;
        let tables = &mut *guard;

        let category = tables
            .categories
            .get(&task.category().id())
            .cloned()
            .ok_or_else(|| TodoError::CategoryNotFound(task.category().name().to_owned()))?;

        let mut task = if task.is_saved() {
            if !tables.tasks.contains_key(&task.id()) {
                return Err(NotFound::Task(task.id()).into());
            }
            task
        } else {
            tables.last_task_id += 1;
            task.with_id(tables.last_task_id)
        };
        task.set_category(category);

        tables.tasks.insert(task.id(), task.clone());
        tracing::debug!(task_id = task.id(), "Saved task");
        Ok(task)
    }

    async fn find_by_id(&self, id: i64) -> TodoResult<Option<Task>> {
        let tables = self.store.tables.read().await;
        Ok(tables.tasks.get(&id).cloned())
    }

    async fn find_all(&self) -> TodoResult<Vec<Task>> {
        let tables = self.store.tables.read().await;
        Ok(tables.tasks.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> TodoResult<bool> {
        let mut tables = self.store.tables.write().await;
        Ok(tables.tasks.remove(&id).is_some())
    }

    async fn exists_by_id(&self, id: i64) -> TodoResult<bool> {
        let tables = self.store.tables.read().await;
        Ok(tables.tasks.contains_key(&id))
    }
}
