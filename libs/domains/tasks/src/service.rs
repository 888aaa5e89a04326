use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::{Task, TaskCategory};
use crate::error::{NotFound, TodoError, TodoResult};
use crate::repository::{CategoryRepository, TaskRepository};

/// Service layer for TaskCategory business logic
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a category, refusing names that are already taken
    #[instrument(skip(self, category), fields(category_name = %category.name()))]
    pub async fn create_category(&self, category: TaskCategory) -> TodoResult<TaskCategory> {
        if self.repository.exists_by_name(category.name()).await? {
            return Err(TodoError::DuplicateName(category.name().to_owned()));
        }

        let created = self.repository.save(category.detached()).await?;
        info!(category_id = created.id(), "Created task category");
        Ok(created)
    }

    #[instrument(skip(self), fields(category_id = id))]
    pub async fn get_category_by_id(&self, id: i64) -> TodoResult<TaskCategory> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(NotFound::Category(id).into())
    }

    /// Exact, case-sensitive lookup
    #[instrument(skip(self), fields(category_name = %name))]
    pub async fn get_category_by_name(&self, name: &str) -> TodoResult<TaskCategory> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| NotFound::CategoryNamed(name.to_owned()).into())
    }

    pub async fn list_categories(&self) -> TodoResult<Vec<TaskCategory>> {
        self.repository.find_all().await
    }

    /// Overwrite name and description of an existing category
    ///
    /// The name is not checked against other categories here; storage
    /// rejects a clash with `DuplicateName`.
    #[instrument(skip(self, updates), fields(category_id = id))]
    pub async fn update_category(
        &self,
        id: i64,
        updates: TaskCategory,
    ) -> TodoResult<TaskCategory> {
        let mut category = self.get_category_by_id(id).await?;
        category.set_name(updates.name())?;
        category.set_description(updates.description().map(str::to_owned));

        self.repository.save(category).await
    }

    #[instrument(skip(self), fields(category_id = id))]
    pub async fn delete_category(&self, id: i64) -> TodoResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(NotFound::Category(id).into());
        }

        if !self.repository.delete_by_id(id).await? {
            return Err(NotFound::Category(id).into());
        }

        info!("Deleted task category");
        Ok(())
    }
}

/// Service layer for Task business logic
///
/// Depends on [`CategoryService`] to resolve the category a new task is
/// filed under.
pub struct TaskService<T: TaskRepository, C: CategoryRepository> {
    repository: Arc<T>,
    categories: CategoryService<C>,
}

impl<T: TaskRepository, C: CategoryRepository> Clone for TaskService<T, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            categories: self.categories.clone(),
        }
    }
}

impl<T: TaskRepository, C: CategoryRepository> TaskService<T, C> {
    pub fn new(repository: T, categories: CategoryService<C>) -> Self {
        Self {
            repository: Arc::new(repository),
            categories,
        }
    }

    /// Create a task under the stored category carrying the same name
    ///
    /// Only the name of the supplied category is looked at. Its id and
    /// description are replaced by the stored ones.
    #[instrument(skip(self, task), fields(task_name = %task.name(), category_name = %task.category().name()))]
    pub async fn create_task(&self, task: Task) -> TodoResult<Task> {
        let category_name = task.category().name().to_owned();
        let category = match self.categories.get_category_by_name(&category_name).await {
            Ok(category) => category,
            Err(TodoError::NotFound(_)) => return Err(TodoError::CategoryNotFound(category_name)),
            Err(err) => return Err(err),
        };

        let mut task = task.detached();
        task.set_category(category);

        let created = self.repository.save(task).await?;
        info!(task_id = created.id(), "Created task");
        Ok(created)
    }

    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task_by_id(&self, id: i64) -> TodoResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(NotFound::Task(id).into())
    }

    pub async fn list_tasks(&self) -> TodoResult<Vec<Task>> {
        self.repository.find_all().await
    }

    /// Overwrite every field of an existing task
    ///
    /// The category is taken as given, without a lookup by name. Storage
    /// reports `CategoryNotFound` if its id is unknown.
    #[instrument(skip(self, updates), fields(task_id = id))]
    pub async fn update_task(&self, id: i64, updates: Task) -> TodoResult<Task> {
        let mut task = self.get_task_by_id(id).await?;
        task.set_name(updates.name())?;
        task.set_description(updates.description().map(str::to_owned));
        task.set_deadline(updates.deadline());
        task.set_category(updates.category().clone());

        self.repository.save(task).await
    }

    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i64) -> TodoResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(NotFound::Task(id).into());
        }

        if !self.repository.delete_by_id(id).await? {
            return Err(NotFound::Task(id).into());
        }

        info!("Deleted task");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidArgument;
    use crate::repository::{MockCategoryRepository, MockTaskRepository};
    use chrono::{DateTime, TimeZone, Utc};
    use mockall::predicate::eq;

    fn deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, 1, 8, 0, 0).unwrap()
    }

    fn stored_category(id: i64, name: &str) -> TaskCategory {
        TaskCategory::new(name, Some("stored".into()))
            .unwrap()
            .with_id(id)
    }

    #[tokio::test]
    async fn create_category_rejects_taken_name_without_saving() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_exists_by_name().times(1).returning(|_| Ok(true));
        repo.expect_save().never();

        let service = CategoryService::new(repo);
        let result = service
            .create_category(TaskCategory::new("Work", None).unwrap())
            .await;

        assert!(matches!(result, Err(TodoError::DuplicateName(name)) if name == "Work"));
    }

    #[tokio::test]
    async fn create_category_saves_free_name() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_exists_by_name().times(1).returning(|_| Ok(false));
        repo.expect_save()
            .times(1)
            .returning(|category| Ok(category.with_id(73)));

        let service = CategoryService::new(repo);
        let created = service
            .create_category(TaskCategory::new("Work", None).unwrap())
            .await
            .unwrap();

        assert_eq!(created.id(), 73);
        assert_eq!(created.name(), "Work");
    }

    #[tokio::test]
    async fn get_category_by_id_maps_absence_to_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(None));

        let service = CategoryService::new(repo);
        let result = service.get_category_by_id(5).await;

        assert!(matches!(
            result,
            Err(TodoError::NotFound(NotFound::Category(5)))
        ));
    }

    #[tokio::test]
    async fn update_category_overwrites_name_and_description() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id()
            .with(eq(73))
            .returning(|id| Ok(Some(stored_category(id, "Work"))));
        repo.expect_save()
            .times(1)
            .returning(|category| Ok(category));

        let service = CategoryService::new(repo);
        let updated = service
            .update_category(73, TaskCategory::new("Job", None).unwrap())
            .await
            .unwrap();

        assert_eq!(updated.id(), 73);
        assert_eq!(updated.name(), "Job");
        assert_eq!(updated.description(), None);
    }

    #[tokio::test]
    async fn delete_category_checks_existence_first() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_exists_by_id()
            .with(eq(9))
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_delete_by_id().never();

        let service = CategoryService::new(repo);
        let result = service.delete_category(9).await;

        assert!(matches!(
            result,
            Err(TodoError::NotFound(NotFound::Category(9)))
        ));
    }

    #[tokio::test]
    async fn delete_category_propagates_in_use() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_exists_by_id().returning(|_| Ok(true));
        repo.expect_delete_by_id()
            .with(eq(4))
            .returning(|id| Err(TodoError::CategoryInUse(id)));

        let service = CategoryService::new(repo);
        let result = service.delete_category(4).await;

        assert!(matches!(result, Err(TodoError::CategoryInUse(4))));
    }

    #[tokio::test]
    async fn create_task_resolves_category_by_name() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_name()
            .times(1)
            .returning(|name| Ok(Some(stored_category(73, name))));

        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_save()
            .times(1)
            .withf(|task| task.category().id() == 73 && !task.is_saved())
            .returning(|task| Ok(task.with_id(1)));

        let service = TaskService::new(tasks, CategoryService::new(categories));
        let supplied = TaskCategory::new("Work", Some("ignored".into())).unwrap();
        let task = Task::new("Report", None, deadline(), supplied).unwrap();

        let created = service.create_task(task).await.unwrap();

        assert_eq!(created.id(), 1);
        assert_eq!(created.category().id(), 73);
        assert_eq!(created.category().description(), Some("stored"));
    }

    #[tokio::test]
    async fn create_task_with_unknown_category_is_category_not_found() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_name().returning(|_| Ok(None));

        let mut tasks = MockTaskRepository::new();
        tasks.expect_save().never();

        let service = TaskService::new(tasks, CategoryService::new(categories));
        let category = TaskCategory::new("Nowhere", None).unwrap();
        let task = Task::new("Report", None, deadline(), category).unwrap();

        let result = service.create_task(task).await;

        assert!(matches!(result, Err(TodoError::CategoryNotFound(name)) if name == "Nowhere"));
    }

    #[tokio::test]
    async fn update_task_takes_category_verbatim() {
        let categories = MockCategoryRepository::new();

        let mut tasks = MockTaskRepository::new();
        tasks.expect_find_by_id().with(eq(3)).returning(|id| {
            let task = Task::new("Old", None, deadline(), stored_category(1, "Work"))
                .unwrap()
                .with_id(id);
            Ok(Some(task))
        });
        tasks
            .expect_save()
            .times(1)
            .returning(|task| Ok(task));

        let service = TaskService::new(tasks, CategoryService::new(categories));
        let new_deadline = Utc.with_ymd_and_hms(2031, 1, 1, 0, 0, 0).unwrap();
        let updates = Task::new(
            "New",
            Some("details".into()),
            new_deadline,
            stored_category(2, "Home"),
        )
        .unwrap();

        let updated = service.update_task(3, updates).await.unwrap();

        assert_eq!(updated.id(), 3);
        assert_eq!(updated.name(), "New");
        assert_eq!(updated.description(), Some("details"));
        assert_eq!(updated.deadline(), new_deadline);
        assert_eq!(updated.category(), &stored_category(2, "Home"));
    }

    #[tokio::test]
    async fn delete_task_on_missing_id_is_not_found() {
        let mut tasks = MockTaskRepository::new();
        tasks.expect_exists_by_id().with(eq(8)).returning(|_| Ok(false));
        tasks.expect_delete_by_id().never();

        let service = TaskService::new(tasks, CategoryService::new(MockCategoryRepository::new()));
        let result = service.delete_task(8).await;

        assert!(matches!(result, Err(TodoError::NotFound(NotFound::Task(8)))));
    }

    #[test]
    fn invalid_arguments_convert_into_todo_errors() {
        let err: TodoError = InvalidArgument::MissingDeadline.into();
        assert!(matches!(
            err,
            TodoError::InvalidArgument(InvalidArgument::MissingDeadline)
        ));
    }
}
