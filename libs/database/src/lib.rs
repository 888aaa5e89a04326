//! PostgreSQL plumbing shared by the binaries and the test fixtures.
//!
//! - [`postgres::PostgresConfig`]: pool settings, loadable from the environment
//! - [`postgres::connect_from_config_with_retry`]: connect with exponential backoff
//! - [`postgres::run_migrations`]: apply any `MigratorTrait` implementation
//! - [`postgres::check_health`]: `SELECT 1` readiness probe
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{PostgresConfig, connect_from_config_with_retry, run_migrations};
//! use database::RetryConfig;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = connect_from_config_with_retry(config, Some(RetryConfig::new().with_max_retries(5))).await?;
//! run_migrations::<migration::Migrator>(&db, "todo_api").await?;
//! ```

pub mod error;
pub mod postgres;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{RetryConfig, retry, retry_with_backoff};
