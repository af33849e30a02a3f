//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Actions: user requests answered through modals on a worker thread
//! - Terminal events: user input and terminal interactions

pub mod actions;
pub mod terminal;
