//! Session invalidation after authentication failures.
//!
//! # Design
//! - One coordinator instance owns the `Idle`/`Handling` state; there are no globals.
//! - The state check and the transition happen in the same synchronous call, so
//!   a burst of concurrent 401s yields one notice and one scheduled redirect.
//! - Navigation, notices, and timers are injected capabilities so the state
//!   machine runs the same in the browser and in tests.

use crate::core::config::ClientConfig;
use crate::core::storage::CredentialStore;
use crate::core::transport::UnauthorizedHandler;
use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Access to the current location and the ability to move away from it.
pub trait Navigator {
    /// Current in-app path, including any query string.
    fn current_path(&self) -> String;
    /// Replace the current location with `path`.
    fn redirect_to(&self, path: &str);
}

/// Transient user-visible message sink.
pub trait Notifier {
    /// Show `message` once.
    fn show(&self, message: &str);
}

/// Deferred execution of a task after a delay. Scheduled tasks cannot be cancelled.
pub trait Scheduler {
    /// Run `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Coordinator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidationState {
    /// No cycle in progress.
    Idle,
    /// A notice was shown and the redirect is pending.
    Handling,
}

/// What a single 401 notification did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidationOutcome {
    /// A new cycle started: credentials cleared, notice shown, redirect scheduled.
    Started,
    /// A cycle was already running; nothing happened.
    AlreadyHandling,
    /// The user is on the login view; credentials cleared, no notice or redirect.
    OnLoginView,
}

/// Single-flight, debounced reaction to authentication failures.
pub struct InvalidationCoordinator {
    this: Weak<Self>,
    state: Cell<InvalidationState>,
    cycles: Cell<u64>,
    config: Rc<ClientConfig>,
    credentials: CredentialStore,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    scheduler: Rc<dyn Scheduler>,
}

impl InvalidationCoordinator {
    /// Create a coordinator in the `Idle` state.
    #[must_use]
    pub fn new(
        config: Rc<ClientConfig>,
        credentials: CredentialStore,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            state: Cell::new(InvalidationState::Idle),
            cycles: Cell::new(0),
            config,
            credentials,
            navigator,
            notifier,
            scheduler,
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> InvalidationState {
        self.state.get()
    }

    /// Number of cycles started so far.
    #[must_use]
    pub fn cycles_started(&self) -> u64 {
        self.cycles.get()
    }

    /// React to one authentication failure.
    pub fn handle_unauthorized(&self) -> InvalidationOutcome {
        if self.state.get() == InvalidationState::Handling {
            return InvalidationOutcome::AlreadyHandling;
        }
        let current = self.navigator.current_path();
        if self.config.is_login_path(&current) {
            self.credentials.clear();
            return InvalidationOutcome::OnLoginView;
        }

        self.state.set(InvalidationState::Handling);
        self.cycles.set(self.cycles.get() + 1);
        tracing::warn!(path = %current, "session invalidated, redirecting to login");

        self.credentials.clear();
        self.notifier.show(&self.config.session_expired_message);

        let this = self.this.clone();
        self.scheduler.schedule(
            self.config.invalidation_window,
            Box::new(move || {
                if let Some(coordinator) = this.upgrade() {
                    coordinator.finish_cycle();
                }
            }),
        );
        InvalidationOutcome::Started
    }

    fn finish_cycle(&self) {
        let current = self.navigator.current_path();
        if self.config.is_login_path(&current) {
            tracing::debug!("already on login view, skipping redirect");
        } else {
            self.navigator
                .redirect_to(&self.config.login_redirect(&current));
        }
        self.state.set(InvalidationState::Idle);
        tracing::info!("session invalidation cycle complete");
    }
}

impl UnauthorizedHandler for InvalidationCoordinator {
    fn notify_unauthorized(&self) {
        let _ = self.handle_unauthorized();
    }
}
