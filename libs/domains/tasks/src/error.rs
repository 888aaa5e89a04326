use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Entity invariant that a constructor or setter refused to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("The name of a task category cannot be null or blank.")]
    BlankCategoryName,

    #[error("The name of a task cannot be null or blank.")]
    BlankTaskName,

    #[error("The deadline of a task cannot be null.")]
    MissingDeadline,

    #[error("The category of a task cannot be null.")]
    MissingCategory,
}

/// Lookup that came back empty, with the key that was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("The task cannot be found.")]
    Task(i64),

    #[error("The task category cannot be found.")]
    Category(i64),

    #[error("The task category cannot be found.")]
    CategoryNamed(String),
}

#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("A task category with the same name already exists.")]
    DuplicateName(String),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// The category a task points at does not exist.
    #[error("The task category cannot be found.")]
    CategoryNotFound(String),

    #[error("The task category is still referenced by tasks.")]
    CategoryInUse(i64),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TodoResult<T> = Result<T, TodoError>;

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        let message = err.to_string();
        match err {
            TodoError::InvalidArgument(_) | TodoError::DuplicateName(_) => {
                AppError::BadRequest(message)
            }
            TodoError::NotFound(_) | TodoError::CategoryNotFound(_) => AppError::NotFound(message),
            TodoError::CategoryInUse(_) => AppError::Conflict(message),
            TodoError::Database(_) => AppError::InternalServerError(message),
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for TodoError {
    fn from(err: sea_orm::DbErr) -> Self {
        TodoError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn invalid_argument_messages_are_fixed() {
        assert_eq!(
            InvalidArgument::BlankCategoryName.to_string(),
            "The name of a task category cannot be null or blank."
        );
        assert_eq!(
            InvalidArgument::BlankTaskName.to_string(),
            "The name of a task cannot be null or blank."
        );
        assert_eq!(
            InvalidArgument::MissingDeadline.to_string(),
            "The deadline of a task cannot be null."
        );
        assert_eq!(
            InvalidArgument::MissingCategory.to_string(),
            "The category of a task cannot be null."
        );
    }

    #[test]
    fn not_found_variants_share_their_message() {
        assert_eq!(NotFound::Task(7).to_string(), "The task cannot be found.");
        assert_eq!(
            NotFound::CategoryNamed("home".into()).to_string(),
            NotFound::Category(3).to_string()
        );
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (
                TodoError::from(InvalidArgument::BlankTaskName),
                StatusCode::BAD_REQUEST,
            ),
            (
                TodoError::DuplicateName("work".into()),
                StatusCode::BAD_REQUEST,
            ),
            (TodoError::from(NotFound::Task(1)), StatusCode::NOT_FOUND),
            (
                TodoError::CategoryNotFound("missing".into()),
                StatusCode::NOT_FOUND,
            ),
            (TodoError::CategoryInUse(2), StatusCode::CONFLICT),
            (
                TodoError::Database("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
