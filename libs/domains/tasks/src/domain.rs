//! Domain entities.
//!
//! Both entities keep their fields private so that every mutation goes
//! through a validating setter. An id of [`UNSAVED_ID`] marks an entity that
//! storage has not assigned an identity to yet.

use chrono::{DateTime, SubsecRound, Utc};

use crate::error::InvalidArgument;

/// Id carried by entities that have never been saved.
pub const UNSAVED_ID: i64 = 0;

/// Whitespace is Unicode `White_Space`, so a name of only U+00A0 is blank too.
fn non_blank(value: Option<String>, kind: InvalidArgument) -> Result<String, InvalidArgument> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(kind),
    }
}

/// A named grouping that tasks belong to. Names are unique across storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCategory {
    id: i64,
    name: String,
    description: Option<String>,
}

impl TaskCategory {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, InvalidArgument> {
        Self::from_parts(Some(name.into()), description)
    }

    /// Builds a category from possibly absent parts, as they arrive from the wire.
    pub fn from_parts(
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Self, InvalidArgument> {
        Ok(Self {
            id: UNSAVED_ID,
            name: non_blank(name, InvalidArgument::BlankCategoryName)?,
            description,
        })
    }

    /// Attaches a storage-assigned id. Meant for repository implementations.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Drops the id so the next save inserts a new row.
    pub fn detached(self) -> Self {
        self.with_id(UNSAVED_ID)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn is_saved(&self) -> bool {
        self.id != UNSAVED_ID
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), InvalidArgument> {
        self.name = non_blank(Some(name.into()), InvalidArgument::BlankCategoryName)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }
}

/// Deadlines are kept at microsecond precision, the resolution of `timestamptz`.
fn to_micros(deadline: DateTime<Utc>) -> DateTime<Utc> {
    deadline.trunc_subsecs(6)
}

/// A unit of work with a deadline, filed under exactly one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: i64,
    name: String,
    description: Option<String>,
    deadline: DateTime<Utc>,
    category: TaskCategory,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        deadline: DateTime<Utc>,
        category: TaskCategory,
    ) -> Result<Self, InvalidArgument> {
        Self::from_parts(Some(name.into()), description, Some(deadline), Some(category))
    }

    /// Builds a task from possibly absent parts.
    ///
    /// Checks run in a fixed order (name, deadline, category) and the first
    /// failure is reported.
    pub fn from_parts(
        name: Option<String>,
        description: Option<String>,
        deadline: Option<DateTime<Utc>>,
        category: Option<TaskCategory>,
    ) -> Result<Self, InvalidArgument> {
        let name = non_blank(name, InvalidArgument::BlankTaskName)?;
        let deadline = deadline.map(to_micros).ok_or(InvalidArgument::MissingDeadline)?;
        let category = category.ok_or(InvalidArgument::MissingCategory)?;

        Ok(Self {
            id: UNSAVED_ID,
            name,
            description,
            deadline,
            category,
        })
    }

    /// Attaches a storage-assigned id. Meant for repository implementations.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Drops the id so the next save inserts a new row.
    pub fn detached(self) -> Self {
        self.with_id(UNSAVED_ID)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn is_saved(&self) -> bool {
        self.id != UNSAVED_ID
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn category(&self) -> &TaskCategory {
        &self.category
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), InvalidArgument> {
        self.name = non_blank(Some(name.into()), InvalidArgument::BlankTaskName)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_deadline(&mut self, deadline: DateTime<Utc>) {
        self.deadline = to_micros(deadline);
    }

    pub fn set_category(&mut self, category: TaskCategory) {
        self.category = category;
    }
}
