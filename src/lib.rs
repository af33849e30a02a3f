//! A terminal habit, goal and task tracker built around a modal
//! orchestration core: any part of the program can ask the user a question
//! and await the answer, while a single host draws whichever dialog is active.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod forms;
pub mod logger;
pub mod modal;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
