//! Lookup session controller.
//!
//! A session owns one [`SessionState`] and drives it through
//! `Idle -> Pending -> Resolved | Failed`. Only one lookup may be in flight
//! at a time: a second submission while `Pending` is rejected with
//! [`SubmitError::AlreadyPending`] and leaves the state untouched.
//!
//! Every submission is stamped with a generation number and a cancellation
//! token. A response is applied only if its generation is still current, so
//! a lookup abandoned through [`SessionController::cancel`] can never
//! overwrite the state of a newer one.

use crate::backend::LookupBackend;
use crate::error::{LookupError, SubmitError};
use crate::normalizer::Normalizer;
use crate::notify::{NoticeLevel, Notifier};
use leakcheck_core::{Identifier, LeakResult, QueryKind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Lifecycle state of a lookup session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No lookup submitted yet, or the last one was cancelled
    #[default]
    Idle,
    /// A lookup is in flight
    Pending,
    /// The last lookup completed
    Resolved(LeakResult),
    /// The last lookup failed; the session accepts a new submission
    Failed(LookupError),
}

impl SessionState {
    /// Whether a lookup is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The resolved result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&LeakResult> {
        match self {
            Self::Resolved(result) => Some(result),
            _ => None,
        }
    }
}

struct Inner {
    generation: u64,
    in_flight: Option<CancellationToken>,
}

struct Shared {
    backend: Arc<dyn LookupBackend>,
    notifier: Arc<dyn Notifier>,
    normalizer: Normalizer,
    inner: Mutex<Inner>,
    state: watch::Sender<SessionState>,
}

/// Owns a lookup session and its state transitions.
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
}

impl SessionController {
    /// Create an idle session using `backend` and reporting to `notifier`.
    #[must_use]
    pub fn new(backend: Arc<dyn LookupBackend>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            shared: Arc::new(Shared {
                backend,
                normalizer: Normalizer::new(notifier.clone()),
                notifier,
                inner: Mutex::new(Inner {
                    generation: 0,
                    in_flight: None,
                }),
                state,
            }),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    /// Watch state changes, e.g. to re-render on every transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.shared.state.subscribe()
    }

    /// Validate raw input, then run a lookup to completion.
    ///
    /// Invalid input is reported through the notifier and leaves the state
    /// unchanged.
    pub async fn submit_raw(
        &self,
        raw: &str,
        kind: QueryKind,
    ) -> Result<Result<LeakResult, LookupError>, SubmitError> {
        let identifier = self.shared.normalizer.validate(raw, kind)?;
        self.submit(identifier).await
    }

    /// Run a lookup for `identifier` to completion.
    ///
    /// The outer error means the submission was refused; the inner result is
    /// the lookup outcome, already reflected in [`state`](Self::state).
    pub async fn submit(
        &self,
        identifier: Identifier,
    ) -> Result<Result<LeakResult, LookupError>, SubmitError> {
        Ok(self.begin(identifier)?.resolve().await)
    }

    /// Move to `Pending` and return the lookup to drive.
    ///
    /// The transition happens before this returns, before any backend work.
    ///
    /// # Errors
    /// Returns [`SubmitError::AlreadyPending`] if a lookup is in flight.
    pub fn begin(&self, identifier: Identifier) -> Result<PendingLookup, SubmitError> {
        let mut inner = self.lock_inner();
        if inner.in_flight.is_some() {
            tracing::debug!("Rejecting {}: lookup already pending", identifier.kind());
            return Err(SubmitError::AlreadyPending);
        }

        inner.generation += 1;
        let token = CancellationToken::new();
        inner.in_flight = Some(token.clone());
        self.shared.state.send_replace(SessionState::Pending);

        tracing::debug!(
            "Lookup {} started for {} via {}",
            inner.generation,
            identifier.kind(),
            self.shared.backend.backend_id()
        );

        Ok(PendingLookup {
            controller: self.clone(),
            identifier,
            generation: inner.generation,
            token,
            settled: false,
        })
    }

    /// Cancel the in-flight lookup, returning the session to `Idle`.
    ///
    /// Returns `false` if nothing was pending.
    pub fn cancel(&self) -> bool {
        self.abandon(None)
    }

    /// Cancel the in-flight lookup if it belongs to `generation` (any
    /// generation when `None`).
    fn abandon(&self, generation: Option<u64>) -> bool {
        let mut inner = self.lock_inner();
        if generation.is_some_and(|g| g != inner.generation) {
            return false;
        }
        let Some(token) = inner.in_flight.take() else {
            return false;
        };

        token.cancel();
        inner.generation += 1;
        self.shared.state.send_replace(SessionState::Idle);
        tracing::debug!("Lookup cancelled");
        true
    }

    fn finish(&self, generation: u64, outcome: &Result<LeakResult, LookupError>) {
        let mut inner = self.lock_inner();
        if inner.generation != generation {
            tracing::debug!(
                "Discarding stale response for lookup {} (current {})",
                generation,
                inner.generation
            );
            return;
        }

        inner.in_flight = None;
        let next = match outcome {
            Ok(result) => {
                tracing::info!(
                    "Lookup {} resolved: {} ({} matches)",
                    generation,
                    result.severity(),
                    result.match_count()
                );
                SessionState::Resolved(result.clone())
            }
            Err(e) => {
                tracing::warn!("Lookup {} failed: {}", generation, e);
                SessionState::Failed(e.clone())
            }
        };
        self.shared.state.send_replace(next);
        drop(inner);

        // Notifiers may call back into the controller.
        if let Err(e) = outcome {
            self.shared
                .notifier
                .notify(&e.user_message(), NoticeLevel::Error);
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// A submitted lookup that has not resolved yet.
///
/// Dropping it before [`resolve`](Self::resolve) completes, for example when
/// the `resolve` or [`SessionController::submit`] future is abandoned by a
/// timeout, cancels the lookup and returns the session to `Idle`.
#[must_use = "a pending lookup does nothing until resolved"]
pub struct PendingLookup {
    controller: SessionController,
    identifier: Identifier,
    generation: u64,
    token: CancellationToken,
    settled: bool,
}

impl PendingLookup {
    /// The identifier being looked up.
    #[must_use]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Call the backend and apply the outcome to the session.
    ///
    /// Resolves to [`LookupError::Cancelled`] without touching the session if
    /// the lookup was cancelled first.
    pub async fn resolve(mut self) -> Result<LeakResult, LookupError> {
        let backend = self.controller.shared.backend.clone();
        let outcome = tokio::select! {
            biased;
            () = self.token.cancelled() => Err(LookupError::Cancelled),
            outcome = backend.lookup(self.identifier.value(), self.identifier.kind()) => outcome,
        };

        self.settled = true;
        if !self.token.is_cancelled() {
            self.controller.finish(self.generation, &outcome);
        }
        outcome
    }
}

impl Drop for PendingLookup {
    fn drop(&mut self) {
        if !self.settled && self.controller.abandon(Some(self.generation)) {
            tracing::debug!("Lookup {} dropped before resolving", self.generation);
        }
    }
}
