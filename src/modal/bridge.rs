//! Imperative bridge to the orchestrator.
//!
//! A [`Bridge`] is built once at application start and passed to whoever
//! needs to ask the user something. The modal host registers its
//! orchestrator handle on every mount; until then every request reports
//! [`ModalError::NotInitialized`].
//!
//! For code with no handle at all, [`install`] publishes one bridge
//! process-wide and [`confirmation_from_anywhere`] / [`form_from_anywhere`]
//! forward to it.

use super::descriptor::{ConfirmDescriptor, FormDescriptor};
use super::error::ModalError;
use super::request::{ConfirmFuture, FormFuture, Orchestrator};
use log::*;
use std::sync::{Arc, OnceLock, RwLock};

static GLOBAL_BRIDGE: OnceLock<Bridge> = OnceLock::new();

/// Forwards requests to whichever orchestrator handle was last registered.
///
#[derive(Clone, Default)]
pub struct Bridge {
    handlers: Arc<RwLock<Option<Orchestrator>>>,
}

impl Bridge {
    pub fn new() -> Self {
        Bridge::default()
    }

    /// Register the request handlers of a freshly mounted modal host,
    /// replacing any earlier registration.
    ///
    pub fn register_handlers(&self, handlers: Orchestrator) {
        let mut slot = self
            .handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.is_some() {
            debug!("Replacing registered modal handlers");
        } else {
            info!("Modal handlers registered");
        }
        *slot = Some(handlers);
    }

    pub fn is_initialized(&self) -> bool {
        self.handlers
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or_else(|poisoned| poisoned.into_inner().is_some())
    }

    fn handlers(&self) -> Result<Orchestrator, ModalError> {
        let slot = self
            .handlers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.clone().ok_or(ModalError::NotInitialized)
    }

    pub fn confirmation(&self, descriptor: ConfirmDescriptor) -> Result<ConfirmFuture, ModalError> {
        Ok(self.handlers()?.request_confirmation(descriptor))
    }

    pub fn form<T: Send + 'static>(
        &self,
        descriptor: FormDescriptor<T>,
    ) -> Result<FormFuture<T>, ModalError> {
        Ok(self.handlers()?.request_form(descriptor))
    }
}

/// Publish `bridge` process-wide. Returns `false` if a bridge was already
/// installed, in which case the earlier one stays in effect.
///
pub fn install(bridge: Bridge) -> bool {
    let installed = GLOBAL_BRIDGE.set(bridge).is_ok();
    if !installed {
        warn!("Global modal bridge already installed; keeping the existing one");
    }
    installed
}

/// The process-wide bridge, if one was installed.
///
pub fn global() -> Option<&'static Bridge> {
    GLOBAL_BRIDGE.get()
}

fn global_or_uninitialized() -> Result<&'static Bridge, ModalError> {
    global().ok_or(ModalError::NotInitialized)
}

pub fn confirmation_from_anywhere(
    descriptor: ConfirmDescriptor,
) -> Result<ConfirmFuture, ModalError> {
    global_or_uninitialized()?.confirmation(descriptor)
}

pub fn form_from_anywhere<T: Send + 'static>(
    descriptor: FormDescriptor<T>,
) -> Result<FormFuture<T>, ModalError> {
    global_or_uninitialized()?.form(descriptor)
}
