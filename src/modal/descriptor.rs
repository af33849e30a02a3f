//! Request descriptors.
//!
//! A descriptor is the data describing an interaction the caller wants: the
//! text and buttons of a confirmation, or a form renderer plus the labels
//! around it, together with presentation hints for the modal host.

use super::form::{ErasedForm, FormRenderer};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CONFIRM_LABEL: &str = "Confirm";
pub const DEFAULT_CANCEL_LABEL: &str = "Cancel";
pub const DEFAULT_SUBMIT_LABEL: &str = "Submit";

/// Where the modal host anchors the interaction.
///
/// `Default` defers to the host's configured default placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    #[default]
    Default,
    Top,
    Bottom,
    Left,
    Right,
    FullScreen,
    SidePanel,
    Popover,
}

/// How much of the screen the interaction may take.
///
/// `Default` defers to the host's configured default size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeHint {
    #[default]
    Default,
    Small,
    Medium,
    Large,
    Full,
}

/// Visual weight of the confirm action.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

/// Describes a yes/no confirmation.
///
/// Labels are normalized on every write so they are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDescriptor {
    title: String,
    body: String,
    confirm_label: String,
    cancel_label: String,
    variant: Variant,
    placement: Placement,
    size: SizeHint,
}

impl ConfirmDescriptor {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        ConfirmDescriptor {
            title: title.into(),
            body: body.into(),
            confirm_label: DEFAULT_CONFIRM_LABEL.to_string(),
            cancel_label: DEFAULT_CANCEL_LABEL.to_string(),
            variant: Variant::Default,
            placement: Placement::Default,
            size: SizeHint::Default,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label_or(label.into(), DEFAULT_CONFIRM_LABEL);
        self
    }

    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label_or(label.into(), DEFAULT_CANCEL_LABEL);
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn destructive(self) -> Self {
        self.variant(Variant::Destructive)
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn size(mut self, size: SizeHint) -> Self {
        self.size = size;
        self
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn get_body(&self) -> &str {
        &self.body
    }

    pub fn get_confirm_label(&self) -> &str {
        &self.confirm_label
    }

    pub fn get_cancel_label(&self) -> &str {
        &self.cancel_label
    }

    pub fn get_variant(&self) -> Variant {
        self.variant
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == Variant::Destructive
    }

    pub fn get_placement(&self) -> Placement {
        self.placement
    }

    pub fn get_size(&self) -> SizeHint {
        self.size
    }

    /// Irreversible deletion of a single item.
    ///
    pub fn delete_item() -> Self {
        ConfirmDescriptor::new(
            "Delete Item",
            "Are you sure you want to delete this item? This action cannot be undone.",
        )
        .confirm_label("Delete")
        .destructive()
    }

    /// Keep or discard pending edits.
    ///
    pub fn save_changes() -> Self {
        ConfirmDescriptor::new("Save Changes", "Do you want to save the changes you made?")
            .confirm_label("Save")
            .cancel_label("Discard")
    }

    /// Leave the application.
    ///
    pub fn log_out() -> Self {
        ConfirmDescriptor::new("Log Out", "Are you sure you want to log out of your account?")
            .confirm_label("Log Out")
    }

    /// Restore all tracker data to the bundled samples.
    ///
    pub fn reset_data() -> Self {
        ConfirmDescriptor::new(
            "Reset Data",
            "This will reset all your data to default values. This action cannot be undone.",
        )
        .confirm_label("Reset")
        .destructive()
    }
}

fn label_or(label: String, fallback: &str) -> String {
    if label.trim().is_empty() {
        fallback.to_string()
    } else {
        label
    }
}

/// Describes a data-entry form producing a `T`.
///
pub struct FormDescriptor<T> {
    title: String,
    renderer: Box<dyn FormRenderer<T>>,
    submit_label: String,
    cancel_label: String,
    placement: Placement,
    size: SizeHint,
}

impl<T: Send + 'static> FormDescriptor<T> {
    pub fn new(title: impl Into<String>, renderer: impl FormRenderer<T> + 'static) -> Self {
        FormDescriptor {
            title: title.into(),
            renderer: Box::new(renderer),
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
            cancel_label: DEFAULT_CANCEL_LABEL.to_string(),
            placement: Placement::Default,
            size: SizeHint::Default,
        }
    }

    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label_or(label.into(), DEFAULT_SUBMIT_LABEL);
        self
    }

    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label_or(label.into(), DEFAULT_CANCEL_LABEL);
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn size(mut self, size: SizeHint) -> Self {
        self.size = size;
        self
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    /// Hide the result type so the single-slot store can hold any form.
    ///
    pub fn erase(self) -> ErasedForm {
        ErasedForm::new(
            self.title,
            self.submit_label,
            self.cancel_label,
            self.placement,
            self.size,
            self.renderer,
        )
    }
}

impl<T> fmt::Debug for FormDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDescriptor")
            .field("title", &self.title)
            .field("submit_label", &self.submit_label)
            .field("cancel_label", &self.cancel_label)
            .field("placement", &self.placement)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// What the store currently holds: a confirmation or a type-erased form.
///
#[derive(Debug, Clone)]
pub enum RequestKind {
    Confirm(ConfirmDescriptor),
    Form(ErasedForm),
}

impl RequestKind {
    pub fn title(&self) -> &str {
        match self {
            RequestKind::Confirm(descriptor) => descriptor.get_title(),
            RequestKind::Form(form) => form.title(),
        }
    }

    pub fn placement(&self) -> Placement {
        match self {
            RequestKind::Confirm(descriptor) => descriptor.get_placement(),
            RequestKind::Form(form) => form.placement(),
        }
    }

    pub fn size(&self) -> SizeHint {
        match self {
            RequestKind::Confirm(descriptor) => descriptor.get_size(),
            RequestKind::Form(form) => form.size(),
        }
    }

    pub fn is_form(&self) -> bool {
        matches!(self, RequestKind::Form(_))
    }
}
