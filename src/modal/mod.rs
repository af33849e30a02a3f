//! Modal orchestration core.
//!
//! Lets any part of the application ask the user a blocking question (a
//! yes/no confirmation or a structured form) and receive the answer as a
//! future, with at most one interaction visible at a time:
//! - `descriptor`: what is being asked, plus presentation hints
//! - `store`: the single-slot state and its settle operations
//! - `request`: the cloneable `Orchestrator` handle returning futures
//! - `bridge`: reaching the orchestrator from code without a handle
//! - `form`: the capability a pluggable form implements
//!
//! The interaction itself is drawn by `ui::ModalHost`.

pub mod bridge;
pub mod descriptor;
mod error;
pub mod form;
pub mod request;
pub mod store;

pub use bridge::{confirmation_from_anywhere, form_from_anywhere, Bridge};
pub use descriptor::{ConfirmDescriptor, FormDescriptor, Placement, RequestKind, SizeHint, Variant};
pub use error::ModalError;
pub use form::{ErasedForm, FormHandle, FormRenderer, OnSubmit, Payload};
pub use request::{ConfirmFuture, FormFuture, Orchestrator};
pub use store::{Answer, ModalStore, ReplacePolicy, Settle, Settlement};
