//! Wire types for the Revoo backend.
//!
//! This module contains the data structures exchanged with the API:
//!
//! - `Habit`, `Category`, `HabitInput`: habits (`/habitos`)
//! - `WeeklyGoal`, `NewWeeklyGoal`: weekly goals (`/metas-semanais`)
//! - `NewProgressRecord`: progress entries (`/registros-progresso`)
//! - `ListResponse`: bare-array or paginated list bodies
//!
//! Each request body has a matching form type that validates raw user
//! input before anything is sent.

pub mod goal;
pub mod habit;
pub mod list;
pub mod progress;
pub mod validation;

pub use goal::{NewWeeklyGoal, WeeklyGoal, WeeklyGoalForm};
pub use habit::{Category, Habit, HabitForm, HabitInput};
pub use list::ListResponse;
pub use progress::{NewProgressRecord, ProgressForm};
pub use validation::ValidationError;
