//! Conversions between the domain entities and their outer representations
//!
//! - wire models (`models`) ↔ domain entities (`domain`)
//! - sea-orm rows (`entity`) ↔ domain entities
//!
//! Everything entering the domain goes through `from_parts`, so a missing or
//! blank field is reported as the matching `InvalidArgument` kind.

use sea_orm::ActiveValue::{NotSet, Set};

use crate::domain::{Task, TaskCategory};
use crate::entity::{category, task};
use crate::error::{InvalidArgument, TodoError};
use crate::models::{CategoryRequest, CategoryResponse, TaskCategoryRef, TaskRequest, TaskResponse};

// ============================================================================
// Wire → domain
// ============================================================================

impl TryFrom<CategoryRequest> for TaskCategory {
    type Error = InvalidArgument;

    fn try_from(request: CategoryRequest) -> Result<Self, Self::Error> {
        TaskCategory::from_parts(request.name, request.description)
    }
}

impl TryFrom<TaskCategoryRef> for TaskCategory {
    type Error = InvalidArgument;

    fn try_from(reference: TaskCategoryRef) -> Result<Self, Self::Error> {
        let category = TaskCategory::from_parts(reference.name, reference.description)?;
        Ok(match reference.id {
            Some(id) => category.with_id(id),
            None => category,
        })
    }
}

impl TryFrom<TaskRequest> for Task {
    type Error = InvalidArgument;

    fn try_from(request: TaskRequest) -> Result<Self, Self::Error> {
        // name and deadline are checked before the category is looked at
        let name = request.name;
        if name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(InvalidArgument::BlankTaskName);
        }
        let deadline = request.deadline.ok_or(InvalidArgument::MissingDeadline)?;
        let category = request
            .category
            .map(TaskCategory::try_from)
            .transpose()?;

        Task::from_parts(name, request.description, Some(deadline), category)
    }
}

// ============================================================================
// Domain → wire
// ============================================================================

impl From<TaskCategory> for CategoryResponse {
    fn from(category: TaskCategory) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_owned(),
            description: category.description().map(str::to_owned),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().to_owned(),
            description: task.description().map(str::to_owned),
            deadline: task.deadline(),
            category: task.category().clone().into(),
        }
    }
}

// ============================================================================
// Rows ↔ domain
// ============================================================================

impl TryFrom<category::Model> for TaskCategory {
    type Error = InvalidArgument;

    fn try_from(model: category::Model) -> Result<Self, Self::Error> {
        Ok(TaskCategory::new(model.name, model.description)?.with_id(model.id))
    }
}

impl TryFrom<(task::Model, Option<category::Model>)> for Task {
    type Error = TodoError;

    fn try_from(row: (task::Model, Option<category::Model>)) -> Result<Self, Self::Error> {
        let (model, category) = row;
        let category = category.ok_or_else(|| {
            TodoError::Database(format!(
                "task {} references missing category {}",
                model.id, model.category_id
            ))
        })?;

        let task = Task::new(
            model.name,
            model.description,
            model.deadline.into(),
            TaskCategory::try_from(category)?,
        )?;
        Ok(task.with_id(model.id))
    }
}

impl From<&TaskCategory> for category::ActiveModel {
    fn from(category: &TaskCategory) -> Self {
        Self {
            id: if category.is_saved() {
                Set(category.id())
            } else {
                NotSet
            },
            name: Set(category.name().to_owned()),
            description: Set(category.description().map(str::to_owned)),
        }
    }
}

impl From<&Task> for task::ActiveModel {
    fn from(task: &Task) -> Self {
        Self {
            id: if task.is_saved() { Set(task.id()) } else { NotSet },
            name: Set(task.name().to_owned()),
            description: Set(task.description().map(str::to_owned)),
            deadline: Set(task.deadline().into()),
            category_id: Set(task.category().id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn category_ref(name: &str) -> TaskCategoryRef {
        TaskCategoryRef {
            id: None,
            name: Some(name.to_owned()),
            description: None,
        }
    }

    #[test]
    fn task_request_reports_first_missing_field() {
        let deadline = Utc.with_ymd_and_hms(2030, 2, 2, 0, 0, 0).unwrap();

        let empty = TaskRequest::default();
        assert_eq!(Task::try_from(empty), Err(InvalidArgument::BlankTaskName));

        let no_deadline = TaskRequest {
            name: Some("Report".into()),
            ..Default::default()
        };
        assert_eq!(
            Task::try_from(no_deadline),
            Err(InvalidArgument::MissingDeadline)
        );

        let no_category = TaskRequest {
            name: Some("Report".into()),
            deadline: Some(deadline),
            ..Default::default()
        };
        assert_eq!(
            Task::try_from(no_category),
            Err(InvalidArgument::MissingCategory)
        );

        let blank_category = TaskRequest {
            name: Some("Report".into()),
            deadline: Some(deadline),
            category: Some(category_ref("  ")),
            ..Default::default()
        };
        assert_eq!(
            Task::try_from(blank_category),
            Err(InvalidArgument::BlankCategoryName)
        );
    }

    #[test]
    fn blank_name_wins_over_missing_deadline() {
        let request = TaskRequest {
            name: Some(" ".into()),
            category: Some(category_ref("Work")),
            ..Default::default()
        };

        assert_eq!(Task::try_from(request), Err(InvalidArgument::BlankTaskName));
    }

    #[test]
    fn category_ref_keeps_supplied_id() {
        let reference = TaskCategoryRef {
            id: Some(12),
            ..category_ref("Work")
        };

        let category = TaskCategory::try_from(reference).unwrap();
        assert_eq!(category.id(), 12);
    }

    #[test]
    fn task_response_embeds_category() {
        let deadline = Utc.with_ymd_and_hms(2030, 2, 2, 0, 0, 0).unwrap();
        let category = TaskCategory::new("Work", None).unwrap().with_id(2);
        let task = Task::new("Report", Some("Q3".into()), deadline, category)
            .unwrap()
            .with_id(5);

        let response = TaskResponse::from(task);

        assert_eq!(response.id, 5);
        assert_eq!(response.description.as_deref(), Some("Q3"));
        assert_eq!(
            response.category,
            CategoryResponse {
                id: 2,
                name: "Work".into(),
                description: None,
            }
        );
    }
}
