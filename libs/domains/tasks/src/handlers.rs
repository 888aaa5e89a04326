use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::domain::{Task, TaskCategory};
use crate::error::TodoResult;
use crate::models::{CategoryRequest, CategoryResponse, TaskCategoryRef, TaskRequest, TaskResponse};
use crate::repository::{CategoryRepository, TaskRepository};
use crate::service::{CategoryService, TaskService};

const CATEGORIES_TAG: &str = "categories";
const TASKS_TAG: &str = "tasks";

/// OpenAPI documentation for the task and category endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
        list_tasks,
        create_task,
        get_task,
        update_task,
        delete_task,
    ),
    components(
        schemas(CategoryRequest, CategoryResponse, TaskRequest, TaskCategoryRef, TaskResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = CATEGORIES_TAG, description = "Task category management"),
        (name = TASKS_TAG, description = "Task management")
    )
)]
pub struct ApiDoc;

/// Services shared by every handler
pub struct TodoState<T: TaskRepository, C: CategoryRepository> {
    pub tasks: TaskService<T, C>,
    pub categories: CategoryService<C>,
}

impl<T: TaskRepository, C: CategoryRepository> TodoState<T, C> {
    /// Both services share the one category repository.
    pub fn new(task_repository: T, category_repository: C) -> Self {
        let categories = CategoryService::new(category_repository);
        let tasks = TaskService::new(task_repository, categories.clone());
        Self { tasks, categories }
    }
}

type SharedState<T, C> = State<Arc<TodoState<T, C>>>;

/// Router with the `/tasks` and `/tasks/categories` endpoints
pub fn router<T, C>(state: TodoState<T, C>) -> Router
where
    T: TaskRepository + 'static,
    C: CategoryRepository + 'static,
{
    Router::new()
        .route(
            "/tasks/categories",
            get(list_categories::<T, C>).post(create_category::<T, C>),
        )
        .route(
            "/tasks/categories/{id}",
            get(get_category::<T, C>)
                .put(update_category::<T, C>)
                .delete(delete_category::<T, C>),
        )
        .route("/tasks", get(list_tasks::<T, C>).post(create_task::<T, C>))
        .route(
            "/tasks/{id}",
            get(get_task::<T, C>)
                .put(update_task::<T, C>)
                .delete(delete_task::<T, C>),
        )
        .with_state(Arc::new(state))
}

#[utoipa::path(
    get,
    path = "/tasks/categories",
    tag = CATEGORIES_TAG,
    responses(
        (status = 200, description = "All task categories", body = Vec<CategoryResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<T: TaskRepository, C: CategoryRepository>(
    State(state): SharedState<T, C>,
) -> TodoResult<Json<Vec<CategoryResponse>>> {
    let categories = state.categories.list_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Create a task category with a unique name
#[utoipa::path(
    post,
    path = "/tasks/categories",
    tag = CATEGORIES_TAG,
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Task category created", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<T: TaskRepository, C: CategoryRepository>(
    State(state): SharedState<T, C>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CategoryRequest>,
) -> TodoResult<impl IntoResponse> {
    let category = state
        .categories
        .create_category(TaskCategory::try_from(input)?)
        .await?;

    AuditEvent::new(
        "category.create",
        format!("category:{}", category.id()),
        AuditOutcome::Success,
    )
    .with_client(&headers)
    .with_details(json!({ "name": category.name() }))
    .log();

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

#[utoipa::path(
    get,
    path = "/tasks/categories/{id}",
    tag = CATEGORIES_TAG,
    params(
        ("id" = i64, Path, description = "Task category ID")
    ),
    responses(
        (status = 200, description = "Task category found", body = CategoryResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<T: TaskRepository, C: CategoryRepository>(
    State(state): SharedState<T, C>,
    IdPath(id): IdPath,
) -> TodoResult<Json<CategoryResponse>> {
    let category = state.categories.get_category_by_id(id).await?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    put,
    path = "/tasks/categories/{id}",
    tag = CATEGORIES_TAG,
    params(
        ("id" = i64, Path, description = "Task category ID")
    ),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Task category updated", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<T: TaskRepository, C: CategoryRepository>(
    State(state): SharedState<T, C>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CategoryRequest>,
) -> TodoResult<Json<CategoryResponse>> {
    let category = state
        .categories
        .update_category(id, TaskCategory::try_from(input)?)
        .await?;
    Ok(Json(category.into()))
}

/// Delete a task category that no task refers to
#[utoipa::path(
    delete,
    path = "/tasks/categories/{id}",
    tag = CATEGORIES_TAG,
    params(
        ("id" = i64, Path, description = "Task category ID")
    ),
    responses(
        (status = 204, description = "Task category deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<T: TaskRepository, C: CategoryRepository>(
    State(state): SharedState<T, C>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> TodoResult<impl IntoResponse> {
    let resource = format!("category:{}", id);

    // Audit refusals as well
    if let Err(err) = state.categories.delete_category(id).await {
        AuditEvent::new("category.delete", resource, AuditOutcome::Failure)
            .with_client(&headers)
            .with_details(json!({ "reason": err.to_string() }))
            .log();
        return Err(err);
    }

    AuditEvent::new("category.delete", resource, AuditOutcome::Success)
        .with_client(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/tasks",
    tag = TASKS_TAG,
    responses(
        (status = 200, description = "All tasks", body = Vec<TaskResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks<T: TaskRepository, C: CategoryRepository>(
    State(state): SharedState<T, C>,
) -> TodoResult<Json<Vec<TaskResponse>>> {
    let tasks = state.tasks.list_tasks().await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// Create a task in an existing category
///
/// Only `category.name` is used to find the category.
#[utoipa::path(
    post,
    path = "/tasks",
    tag = TASKS_TAG,
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_task<T: TaskRepository, C: CategoryRepository>(
    State(state): SharedState<T, C>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<TaskRequest>,
) -> TodoResult<impl IntoResponse> {
    let task = state.tasks.create_task(Task::try_from(input)?).await?;

    AuditEvent::new(
        "task.create",
        format!("task:{}", task.id()),
        AuditOutcome::Success,
    )
    .with_client(&headers)
    .with_details(json!({
        "name": task.name(),
        "category_id": task.category().id(),
        "deadline": task.deadline(),
    }))
    .log();

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = TASKS_TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_task<T: TaskRepository, C: CategoryRepository>(
    State(state): SharedState<T, C>,
    IdPath(id): IdPath,
) -> TodoResult<Json<TaskResponse>> {
    let task = state.tasks.get_task_by_id(id).await?;
    Ok(Json(task.into()))
}

/// Overwrite every field of a task
///
/// The category must carry the id of a stored category.
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = TASKS_TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_task<T: TaskRepository, C: CategoryRepository>(
    State(state): SharedState<T, C>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<TaskRequest>,
) -> TodoResult<Json<TaskResponse>> {
    let task = state.tasks.update_task(id, Task::try_from(input)?).await?;
    Ok(Json(task.into()))
}

#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = TASKS_TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_task<T: TaskRepository, C: CategoryRepository>(
    State(state): SharedState<T, C>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> TodoResult<impl IntoResponse> {
    state.tasks.delete_task(id).await?;

    AuditEvent::new("task.delete", format!("task:{}", id), AuditOutcome::Success)
        .with_client(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}
