//! Request/future API over the state store.
//!
//! [`Orchestrator`] is the cloneable handle that callers use to ask for an
//! interaction. Each request returns immediately with a future; the caller
//! suspends only if it awaits it. The future is settled when the modal host
//! reports the user's action back into the store.

use super::descriptor::{ConfirmDescriptor, FormDescriptor, RequestKind};
use super::error::ModalError;
use super::form::Payload;
use super::store::{Answer, ModalStore, ReplacePolicy, Settle, Settlement};
use log::*;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Shared handle to the modal store.
///
#[derive(Clone, Default)]
pub struct Orchestrator {
    store: Arc<Mutex<ModalStore>>,
}

impl Orchestrator {
    pub fn new(policy: ReplacePolicy) -> Self {
        Orchestrator {
            store: Arc::new(Mutex::new(ModalStore::new(policy))),
        }
    }

    /// Lock the store. A poisoned lock is recovered: store operations never
    /// leave it half-updated.
    ///
    /// Settlements returned by store operations must be run after the guard
    /// is dropped, otherwise a continuation that opens a new request
    /// deadlocks on this lock.
    ///
    pub fn lock(&self) -> MutexGuard<'_, ModalStore> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_open()
    }

    /// Ask a yes/no question. Resolves `Ok(true)` on confirm and `Ok(false)`
    /// on cancel.
    ///
    pub fn request_confirmation(&self, descriptor: ConfirmDescriptor) -> ConfirmFuture {
        let (tx, rx) = oneshot::channel();
        let completer = Completer::new(tx);
        let on_reject = completer.clone();
        let settle = Settle::new(
            move |answer| match answer {
                Answer::Confirmed(confirmed) => completer.complete(Ok(confirmed)),
                Answer::Submitted(_) => completer.complete(Err(ModalError::PayloadMismatch)),
            },
            move |error| on_reject.complete(Err(error)),
        );
        debug!("Requesting confirmation '{}'", descriptor.get_title());
        let replaced = self.lock().open(RequestKind::Confirm(descriptor), settle);
        run(replaced);
        ConfirmFuture {
            pending: Pending::new(rx),
        }
    }

    /// Show a form. Resolves with the submitted value, or
    /// `Err(ModalError::Cancelled)` if the user dismisses it.
    ///
    pub fn request_form<T: Send + 'static>(&self, descriptor: FormDescriptor<T>) -> FormFuture<T> {
        let (tx, rx) = oneshot::channel();
        let completer = Completer::new(tx);
        let on_reject = completer.clone();
        let settle = Settle::new(
            move |answer| match answer {
                Answer::Submitted(payload) => match payload.downcast::<T>() {
                    Ok(value) => completer.complete(Ok(*value)),
                    Err(_) => completer.complete(Err(ModalError::PayloadMismatch)),
                },
                Answer::Confirmed(_) => completer.complete(Err(ModalError::PayloadMismatch)),
            },
            move |error| on_reject.complete(Err(error)),
        );
        debug!("Requesting form '{}'", descriptor.get_title());
        let replaced = self.lock().open(RequestKind::Form(descriptor.erase()), settle);
        run(replaced);
        FormFuture {
            pending: Pending::new(rx),
        }
    }

    pub fn confirm(&self) -> bool {
        let settlement = self.lock().confirm();
        run(settlement)
    }

    pub fn cancel(&self) -> bool {
        let settlement = self.lock().cancel();
        run(settlement)
    }

    pub fn submit<T: Send + 'static>(&self, value: T) -> bool {
        let settlement = self.lock().submit(value);
        run(settlement)
    }

    /// Cancel request number `opened`, if it is still the active one.
    ///
    pub fn cancel_if_current(&self, opened: u64) -> bool {
        let settlement = {
            let mut store = self.lock();
            if store.opened_count() != opened {
                debug!("Ignoring cancel for replaced modal #{}", opened);
                return false;
            }
            store.cancel()
        };
        run(settlement)
    }

    /// Deliver a form result to request number `opened`. A result produced
    /// after that request was replaced is dropped.
    ///
    pub fn submit_if_current(&self, opened: u64, payload: Payload) -> bool {
        let settlement = {
            let mut store = self.lock();
            if store.opened_count() != opened {
                debug!("Ignoring submission for replaced modal #{}", opened);
                return false;
            }
            store.submit_form(payload)
        };
        run(settlement)
    }

    pub fn close(&self) {
        self.lock().close()
    }
}

fn run(settlement: Option<Settlement>) -> bool {
    settlement.map(Settlement::run).is_some()
}

/// Sender shared by a request's resolve and reject continuations; the first
/// completion wins.
///
struct Completer<T> {
    tx: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Completer<T> {
    fn new(tx: oneshot::Sender<T>) -> Self {
        Completer {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    fn complete(&self, value: T) {
        let sender = self
            .tx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(sender) = sender {
            // The caller may have dropped its future; nothing to deliver then.
            let _ = sender.send(value);
        }
    }
}

impl<T> Clone for Completer<T> {
    fn clone(&self) -> Self {
        Completer {
            tx: Arc::clone(&self.tx),
        }
    }
}

/// Receiving half of a request. Once the sending side is gone without an
/// answer the receiver is dropped, and the request stays pending from then on.
///
#[derive(Debug)]
struct Pending<T> {
    rx: Option<oneshot::Receiver<T>>,
}

impl<T> Pending<T> {
    fn new(rx: oneshot::Receiver<T>) -> Self {
        Pending { rx: Some(rx) }
    }

    fn poll_settled(&mut self, cx: &mut Context<'_>) -> Poll<T> {
        let rx = match self.rx.as_mut() {
            Some(rx) => rx,
            None => return Poll::Pending,
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(Ok(value)) => {
                self.rx = None;
                Poll::Ready(value)
            }
            Poll::Ready(Err(_)) => {
                debug!("Request dropped without an answer; it will never settle.");
                self.rx = None;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn try_settled(&mut self) -> Option<T> {
        let rx = self.rx.as_mut()?;
        match rx.try_recv() {
            Ok(value) => {
                self.rx = None;
                Some(value)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.rx = None;
                None
            }
        }
    }
}

/// Pending answer to a confirmation request.
///
/// Dropped continuations (an abandoned or closed request) leave this future
/// pending forever.
#[must_use = "a confirmation future does nothing unless awaited or polled"]
#[derive(Debug)]
pub struct ConfirmFuture {
    pending: Pending<Result<bool, ModalError>>,
}

impl ConfirmFuture {
    /// Non-blocking check for a settled answer.
    ///
    pub fn try_settled(&mut self) -> Option<Result<bool, ModalError>> {
        self.pending.try_settled()
    }
}

impl Future for ConfirmFuture {
    type Output = Result<bool, ModalError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.pending.poll_settled(cx)
    }
}

/// Pending result of a form request.
///
#[must_use = "a form future does nothing unless awaited or polled"]
#[derive(Debug)]
pub struct FormFuture<T> {
    pending: Pending<Result<T, ModalError>>,
}

impl<T> FormFuture<T> {
    pub fn try_settled(&mut self) -> Option<Result<T, ModalError>> {
        self.pending.try_settled()
    }
}

impl<T> Future for FormFuture<T> {
    type Output = Result<T, ModalError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.pending.poll_settled(cx)
    }
}
