//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds habits, tasks and goals
//! - Tracker data types and the drafts produced by entry forms
//! - Navigation types
//! - State error handling

mod error;
mod model;
mod navigation;

pub use error::StateError;
pub use model::{Cover, Goal, Habit, HabitDraft, RepeatDay, Task, TaskDraft};
pub use navigation::Screen;

// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
