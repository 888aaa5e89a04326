use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating or updating a task category
///
/// Fields are optional on the wire so that a missing name surfaces as the
/// domain's invalid-argument error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    /// Unique category name, must not be blank
    #[validate(length(max = 255))]
    #[schema(example = "Work")]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Task category as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for creating or updating a task
///
/// On create only `category.name` is used to find the stored category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskRequest {
    #[validate(length(max = 255))]
    #[schema(example = "Write quarterly report")]
    pub name: Option<String>,
    pub description: Option<String>,
    /// Stored with microsecond precision, finer digits are dropped.
    pub deadline: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub category: Option<TaskCategoryRef>,
}

/// Category reference inside a task request
///
/// `id` is only consulted by updates, which keep the category as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskCategoryRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Task as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deadline: DateTime<Utc>,
    pub category: CategoryResponse,
}
