//! Orchestrator state store.
//!
//! The store is the single source of truth for "is something open, and what".
//! It holds at most one active request together with the continuations that
//! settle the caller's future. Opening a request while another is active
//! replaces it; there is no queue.

use super::descriptor::RequestKind;
use super::error::ModalError;
use super::form::Payload;
use log::*;
use serde::{Deserialize, Serialize};

/// Successful outcome delivered to a resolve continuation.
///
pub enum Answer {
    /// A confirmation was answered: `true` for confirm, `false` for cancel.
    Confirmed(bool),
    /// A form submitted its (type-erased) result.
    Submitted(Payload),
}

pub type Resolve = Box<dyn FnOnce(Answer) + Send>;
pub type Reject = Box<dyn FnOnce(ModalError) + Send>;

/// The pair of continuations stored alongside the active request.
///
/// Exactly one of them is invoked, at most once. The store never invokes them
/// itself: every terminal operation clears the slot first and hands back a
/// [`Settlement`] for the caller to run once the store is released.
pub struct Settle {
    resolve: Resolve,
    reject: Reject,
}

impl Settle {
    pub fn new<R, E>(resolve: R, reject: E) -> Self
    where
        R: FnOnce(Answer) + Send + 'static,
        E: FnOnce(ModalError) + Send + 'static,
    {
        Settle {
            resolve: Box::new(resolve),
            reject: Box::new(reject),
        }
    }

    fn resolve(self, answer: Answer) {
        (self.resolve)(answer)
    }

    fn reject(self, error: ModalError) {
        (self.reject)(error)
    }
}

enum Outcome {
    Resolve(Answer),
    Reject(ModalError),
}

/// A cleared request's continuation together with the outcome to deliver.
///
#[must_use = "a settlement does nothing until it is run"]
pub struct Settlement {
    settle: Settle,
    outcome: Outcome,
}

impl Settlement {
    /// Invoke the continuation. Call this after releasing any lock around the
    /// store so the continuation is free to open a new request.
    ///
    pub fn run(self) {
        match self.outcome {
            Outcome::Resolve(answer) => self.settle.resolve(answer),
            Outcome::Reject(error) => self.settle.reject(error),
        }
    }
}

/// What happens to a pending request when a newer one replaces it.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplacePolicy {
    /// Reject the replaced request with `ModalError::Superseded`.
    #[default]
    Supersede,
    /// Drop the replaced continuations uninvoked; its future never settles.
    Abandon,
}

struct Active {
    request: RequestKind,
    settle: Settle,
}

/// Single-slot holder of the active modal request.
///
#[derive(Default)]
pub struct ModalStore {
    is_open: bool,
    active: Option<Active>,
    policy: ReplacePolicy,
    opened: u64,
}

impl ModalStore {
    pub fn new(policy: ReplacePolicy) -> Self {
        ModalStore {
            policy,
            ..ModalStore::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn active(&self) -> Option<&RequestKind> {
        self.active.as_ref().map(|active| &active.request)
    }

    pub fn policy(&self) -> ReplacePolicy {
        self.policy
    }

    /// Number of requests opened over the store's lifetime. Also serves as
    /// the identity of the active request.
    ///
    pub fn opened_count(&self) -> u64 {
        self.opened
    }

    /// Make `request` the active interaction. A request that is still
    /// pending is replaced according to the store's `ReplacePolicy`; under
    /// `Supersede` its rejection is returned.
    ///
    pub fn open(&mut self, request: RequestKind, settle: Settle) -> Option<Settlement> {
        let replaced = self.active.take().and_then(|previous| match self.policy {
            ReplacePolicy::Supersede => {
                warn!(
                    "Modal '{}' superseded by '{}'",
                    previous.request.title(),
                    request.title()
                );
                Some(Settlement {
                    settle: previous.settle,
                    outcome: Outcome::Reject(ModalError::Superseded),
                })
            }
            ReplacePolicy::Abandon => {
                warn!(
                    "Modal '{}' abandoned in favour of '{}'",
                    previous.request.title(),
                    request.title()
                );
                None
            }
        });
        debug!(
            "Opening {} modal '{}'...",
            if request.is_form() { "form" } else { "confirm" },
            request.title()
        );
        self.active = Some(Active { request, settle });
        self.is_open = true;
        self.opened += 1;
        replaced
    }

    /// Clear the slot without settling anything.
    ///
    pub fn close(&mut self) {
        if self.active.take().is_some() {
            debug!("Closing modal...");
        }
        self.is_open = false;
    }

    /// Answer the active confirmation with yes. `None` if nothing was
    /// settled.
    ///
    pub fn confirm(&mut self) -> Option<Settlement> {
        match self.active() {
            Some(RequestKind::Confirm(_)) => {}
            Some(RequestKind::Form(form)) => {
                warn!("Ignoring confirm on form modal '{}'", form.title());
                return None;
            }
            None => return None,
        }
        debug!("Modal confirmed");
        self.take_settle(Outcome::Resolve(Answer::Confirmed(true)))
    }

    /// Decline the active confirmation or dismiss the active form.
    ///
    pub fn cancel(&mut self) -> Option<Settlement> {
        let outcome = match self.active()? {
            RequestKind::Form(_) => {
                debug!("Form modal dismissed");
                Outcome::Reject(ModalError::Cancelled)
            }
            RequestKind::Confirm(_) => {
                debug!("Modal declined");
                Outcome::Resolve(Answer::Confirmed(false))
            }
        };
        self.take_settle(outcome)
    }

    /// Deliver a form result. Refused unless a form is active.
    ///
    pub fn submit_form(&mut self, payload: Payload) -> Option<Settlement> {
        match self.active() {
            Some(RequestKind::Form(_)) => {}
            Some(RequestKind::Confirm(descriptor)) => {
                warn!(
                    "Ignoring form submission on confirm modal '{}'",
                    descriptor.get_title()
                );
                return None;
            }
            None => return None,
        }
        debug!("Form modal submitted");
        self.take_settle(Outcome::Resolve(Answer::Submitted(payload)))
    }

    /// Typed convenience for [`ModalStore::submit_form`].
    ///
    pub fn submit<T: Send + 'static>(&mut self, value: T) -> Option<Settlement> {
        self.submit_form(Box::new(value))
    }

    fn take_settle(&mut self, outcome: Outcome) -> Option<Settlement> {
        let active = self.active.take();
        self.close();
        active.map(|active| Settlement {
            settle: active.settle,
            outcome,
        })
    }

    #[cfg(test)]
    fn invariant_holds(&self) -> bool {
        self.is_open == self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::descriptor::{ConfirmDescriptor, FormDescriptor};
    use crate::modal::form::tests::EchoForm;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, PartialEq)]
    enum Seen {
        Confirmed(bool),
        Submitted(String),
        Rejected(ModalError),
    }

    fn recorder() -> (Arc<Mutex<Vec<Seen>>>, Settle) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let on_resolve = Arc::clone(&seen);
        let on_reject = Arc::clone(&seen);
        let settle = Settle::new(
            move |answer| {
                let seen = match answer {
                    Answer::Confirmed(value) => Seen::Confirmed(value),
                    Answer::Submitted(payload) => {
                        Seen::Submitted(*payload.downcast::<String>().unwrap())
                    }
                };
                on_resolve.lock().unwrap().push(seen);
            },
            move |error| on_reject.lock().unwrap().push(Seen::Rejected(error)),
        );
        (seen, settle)
    }

    /// Run a settlement if there is one; true when something was settled.
    fn settled(settlement: Option<Settlement>) -> bool {
        settlement.map(Settlement::run).is_some()
    }

    fn confirm_request() -> RequestKind {
        RequestKind::Confirm(ConfirmDescriptor::new("Delete Habit", "Really?"))
    }

    fn form_request() -> RequestKind {
        RequestKind::Form(FormDescriptor::new("New Habit", EchoForm::new()).erase())
    }

    #[test]
    fn new_store_is_closed() {
        let store = ModalStore::default();
        assert!(!store.is_open());
        assert!(store.active().is_none());
        assert_eq!(store.policy(), ReplacePolicy::Supersede);
        assert!(store.invariant_holds());
    }

    #[test]
    fn open_sets_active() {
        let mut store = ModalStore::default();
        let (seen, settle) = recorder();
        assert!(!settled(store.open(confirm_request(), settle)));
        assert!(store.is_open());
        assert_eq!(store.active().unwrap().title(), "Delete Habit");
        assert_eq!(store.opened_count(), 1);
        assert!(seen.lock().unwrap().is_empty());
        assert!(store.invariant_holds());
    }

    #[test]
    fn confirm_resolves_true_once() {
        let mut store = ModalStore::default();
        let (seen, settle) = recorder();
        assert!(!settled(store.open(confirm_request(), settle)));

        assert!(settled(store.confirm()));
        assert!(!store.is_open());
        assert!(store.invariant_holds());
        assert!(!settled(store.confirm()));
        assert!(store.invariant_holds());
        assert!(!settled(store.cancel()));
        assert!(store.invariant_holds());
        assert_eq!(*seen.lock().unwrap(), vec![Seen::Confirmed(true)]);
    }

    #[test]
    fn cancel_on_confirm_resolves_false() {
        let mut store = ModalStore::default();
        let (seen, settle) = recorder();
        assert!(!settled(store.open(confirm_request(), settle)));

        assert!(settled(store.cancel()));
        assert!(store.invariant_holds());
        assert!(!settled(store.confirm()));
        assert!(store.invariant_holds());
        assert_eq!(*seen.lock().unwrap(), vec![Seen::Confirmed(false)]);
    }

    #[test]
    fn submit_form_resolves_payload() {
        let mut store = ModalStore::default();
        let (seen, settle) = recorder();
        assert!(!settled(store.open(form_request(), settle)));

        assert!(settled(store.submit("Run 5k".to_string())));
        assert!(store.invariant_holds());
        assert!(!settled(store.cancel()));
        assert!(store.invariant_holds());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Seen::Submitted("Run 5k".to_string())]
        );
    }

    #[test]
    fn cancel_on_form_rejects() {
        let mut store = ModalStore::default();
        let (seen, settle) = recorder();
        assert!(!settled(store.open(form_request(), settle)));
        assert!(store.invariant_holds());

        assert!(settled(store.cancel()));
        assert!(!store.is_open());
        assert!(store.invariant_holds());
        assert!(!settled(store.submit("late".to_string())));
        assert!(store.invariant_holds());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Seen::Rejected(ModalError::Cancelled)]
        );
    }

    #[test]
    fn submit_refused_on_confirm() {
        let mut store = ModalStore::default();
        let (seen, settle) = recorder();
        assert!(!settled(store.open(confirm_request(), settle)));
        assert!(store.invariant_holds());

        assert!(!settled(store.submit("nope".to_string())));
        assert!(store.is_open());
        assert!(store.invariant_holds());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn confirm_refused_on_form() {
        let mut store = ModalStore::default();
        let (seen, settle) = recorder();
        assert!(!settled(store.open(form_request(), settle)));
        assert!(store.invariant_holds());

        assert!(!settled(store.confirm()));
        assert!(store.is_open());
        assert!(store.invariant_holds());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn close_is_idempotent_and_settles_nothing() {
        let mut store = ModalStore::default();
        let (seen, settle) = recorder();
        assert!(!settled(store.open(confirm_request(), settle)));

        store.close();
        assert!(!store.is_open());
        assert!(store.active().is_none());
        assert!(store.invariant_holds());
        store.close();
        assert!(!store.is_open());
        assert!(store.active().is_none());
        assert!(store.invariant_holds());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn replace_supersedes_previous() {
        let mut store = ModalStore::new(ReplacePolicy::Supersede);
        let (first, settle_a) = recorder();
        let (second, settle_b) = recorder();
        assert!(!settled(store.open(confirm_request(), settle_a)));
        assert!(store.invariant_holds());
        let replaced = store.open(form_request(), settle_b);
        assert!(store.invariant_holds());
        assert!(first.lock().unwrap().is_empty());
        assert!(settled(replaced));

        assert!(store.is_open());
        assert_eq!(store.active().unwrap().title(), "New Habit");
        assert_eq!(
            *first.lock().unwrap(),
            vec![Seen::Rejected(ModalError::Superseded)]
        );

        assert!(settled(store.submit("B".to_string())));
        assert!(store.invariant_holds());
        assert_eq!(first.lock().unwrap().len(), 1);
        assert_eq!(*second.lock().unwrap(), vec![Seen::Submitted("B".to_string())]);
    }

    #[test]
    fn replace_abandons_previous() {
        let mut store = ModalStore::new(ReplacePolicy::Abandon);
        let (first, settle_a) = recorder();
        let (second, settle_b) = recorder();
        assert!(!settled(store.open(confirm_request(), settle_a)));
        assert!(store.invariant_holds());
        assert!(!settled(store.open(confirm_request(), settle_b)));
        assert!(store.is_open());
        assert!(store.invariant_holds());

        assert!(settled(store.confirm()));
        assert!(store.invariant_holds());
        assert!(first.lock().unwrap().is_empty());
        assert_eq!(*second.lock().unwrap(), vec![Seen::Confirmed(true)]);
        assert_eq!(store.opened_count(), 2);
    }

    #[test]
    fn continuation_may_open_follow_up_once_released() {
        let store = Arc::new(Mutex::new(ModalStore::default()));
        let reopen = Arc::clone(&store);
        let settle = Settle::new(
            move |_| {
                let (_, follow_up) = recorder();
                let replaced = reopen.lock().unwrap().open(form_request(), follow_up);
                assert!(replaced.is_none());
            },
            |_| {},
        );
        assert!(!settled(store.lock().unwrap().open(confirm_request(), settle)));

        let settlement = store.lock().unwrap().confirm();
        assert!(!store.lock().unwrap().is_open());
        assert!(settled(settlement));

        let store = store.lock().unwrap();
        assert!(store.invariant_holds());
        assert_eq!(store.active().unwrap().title(), "New Habit");
    }

    #[test]
    fn terminal_operations_on_closed_store_are_noops() {
        let mut store = ModalStore::default();
        assert!(!settled(store.confirm()));
        assert!(!settled(store.cancel()));
        assert!(!settled(store.submit(1u8)));
        store.close();
        assert!(store.invariant_holds());
    }
}
