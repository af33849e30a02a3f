//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Screen layout (tabs, lists, log and footer)
//! - Theme management
//! - The modal host that presents dialog requests

type Frame<'a> = ratatui::Frame<'a>;

mod render;
pub mod theme;
pub mod widgets;

pub use render::{render, ModalHost};
pub use theme::Theme;
