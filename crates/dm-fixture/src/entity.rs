//! Fixture entities and the standard fixture graph
//!
//! Each entity kind serializes itself into an ordered list of
//! `(column, value)` pairs; the seeder turns those into INSERT statements.

use crate::catalog::FixtureKind;
use crate::ids::{iteration_id, task_id, METEOR_USER_ID};
use chrono::NaiveDate;
use dm_db::SqlValue;

pub use dm_db::DateRange;
use uuid::Uuid;

/// One row: column names paired with the values to insert
pub type Row = Vec<(&'static str, SqlValue)>;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Active,
    Completed,
}

impl TaskStatus {
    /// Postgres enum type the status column is declared with
    pub const SQL_TYPE: &'static str = "task_status";

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub point: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Iteration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub date_range: Option<DateRange>,
}

/// Link row placing a task inside an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationTask {
    pub iteration_id: Uuid,
    pub task_id: Uuid,
}

/// Any seeded row
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureEntity {
    User(User),
    Task(Task),
    Iteration(Iteration),
    IterationTask(IterationTask),
}

impl FixtureEntity {
    pub fn kind(&self) -> FixtureKind {
        match self {
            FixtureEntity::User(_) => FixtureKind::User,
            FixtureEntity::Task(_) => FixtureKind::Task,
            FixtureEntity::Iteration(_) => FixtureKind::Iteration,
            FixtureEntity::IterationTask(_) => FixtureKind::IterationTask,
        }
    }

    /// Serialize into `(column, value)` pairs in table column order.
    pub fn to_row(&self) -> Row {
        match self {
            FixtureEntity::User(user) => vec![
                ("id", user.id.into()),
                ("username", user.username.as_str().into()),
            ],
            FixtureEntity::Task(task) => vec![
                ("id", task.id.into()),
                ("user_id", task.user_id.into()),
                ("title", task.title.as_str().into()),
                (
                    "status",
                    SqlValue::enum_label(TaskStatus::SQL_TYPE, task.status.as_str()),
                ),
                ("point", SqlValue::nullable(task.point)),
            ],
            FixtureEntity::Iteration(iteration) => vec![
                ("id", iteration.id.into()),
                ("user_id", iteration.user_id.into()),
                ("name", iteration.name.as_str().into()),
                ("date_range", SqlValue::nullable(iteration.date_range)),
            ],
            FixtureEntity::IterationTask(link) => vec![
                ("iteration_id", link.iteration_id.into()),
                ("task_id", link.task_id.into()),
            ],
        }
    }
}

/// The full set of entities inserted by one seeding run
#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    pub entities: Vec<FixtureEntity>,
}

impl FixtureSet {
    /// The standard development fixture graph.
    ///
    /// `meteor` owns four tasks and two iterations; the first iteration holds
    /// tasks 1 to 3. A second user, `test`, gets a random id because nothing
    /// refers to it.
    pub fn standard() -> Self {
        let meteor = User {
            id: METEOR_USER_ID,
            username: "meteor".to_string(),
        };
        let other = User {
            id: Uuid::new_v4(),
            username: "test".to_string(),
        };

        let iterations = vec![
            Iteration {
                id: iteration_id(1),
                user_id: meteor.id,
                name: "Iteration #1".to_string(),
                date_range: date_range((2023, 10, 1), (2024, 10, 3)),
            },
            Iteration {
                id: iteration_id(2),
                user_id: meteor.id,
                name: "Iteration #2".to_string(),
                date_range: date_range((2024, 10, 4), (2025, 10, 3)),
            },
        ];

        let tasks = [
            (TaskStatus::Active, Some(1)),
            (TaskStatus::Completed, None),
            (TaskStatus::Active, Some(3)),
            (TaskStatus::Completed, Some(4)),
        ]
        .into_iter()
        .zip(1u32..)
        .map(|((status, point), n)| Task {
            id: task_id(n),
            user_id: meteor.id,
            title: format!("Task #{n}"),
            status,
            point,
        })
        .collect::<Vec<_>>();

        let links = tasks[..3].iter().map(|task| IterationTask {
            iteration_id: iterations[0].id,
            task_id: task.id,
        });

        let mut entities = vec![FixtureEntity::User(meteor), FixtureEntity::User(other)];
        entities.extend(tasks.iter().cloned().map(FixtureEntity::Task));
        entities.extend(iterations.iter().cloned().map(FixtureEntity::Iteration));
        entities.extend(links.map(FixtureEntity::IterationTask));

        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn date_range(start: (i32, u32, u32), end: (i32, u32, u32)) -> Option<DateRange> {
    Some(DateRange {
        start: NaiveDate::from_ymd_opt(start.0, start.1, start.2)?,
        end: NaiveDate::from_ymd_opt(end.0, end.1, end.2)?,
    })
}

#[cfg(test)]
#[path = "entity_test.rs"]
mod tests;
