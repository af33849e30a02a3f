//! Reusable UI widget components.
//!
//! Styling helpers shared by screens and forms, plus popup geometry.

pub mod popup;
pub mod styling;
