//! Task tracking domain
//!
//! Tasks with a name, an optional description and a deadline, each filed
//! under exactly one [`TaskCategory`]. Category names are unique.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← axum routes, wire models
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← CategoryService, TaskService
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← traits, in-memory and PostgreSQL implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Domain    │  ← TaskCategory, Task, invariants
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{PgCategoryRepository, PgTaskRepository, TodoState, router};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let state = TodoState::new(PgTaskRepository::new(db.clone()), PgCategoryRepository::new(db));
//! let routes = router(state);
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod domain;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use domain::{Task, TaskCategory};
pub use error::{InvalidArgument, NotFound, TodoError, TodoResult};
pub use handlers::{ApiDoc, TodoState, router};
pub use memory::{InMemoryCategoryRepository, InMemoryStore, InMemoryTaskRepository};
pub use models::{CategoryRequest, CategoryResponse, TaskCategoryRef, TaskRequest, TaskResponse};
pub use postgres::{PgCategoryRepository, PgTaskRepository};
pub use repository::{CategoryRepository, TaskRepository};
pub use service::{CategoryService, TaskService};
