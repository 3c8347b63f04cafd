//! scope
//!
//! Exactly-once cleanup guard.
//!
//! # Architecture
//!
//! A [`Scope`] holds an optional cleanup action. Create one right after
//! acquiring something that must be undone; the action then runs exactly once
//! on whichever exit path is taken first (explicit [`Scope::dispose`], normal
//! return, early return via `?`, or unwinding), because `Drop` disposes.
//!
//! # States
//!
//! - `Armed` - the action (if any) has not run and will run on dispose
//! - `Disposed` - the action has run, or was cancelled or transferred away
//!
//! The transition to `Disposed` is one-way. [`Scope::transfer`] moves the
//! obligation into a new armed guard and disarms the original, so a function
//! can hand cleanup responsibility to its caller.
//!
//! # Invariants
//!
//! - The action is taken out of the guard before it is invoked, so it cannot
//!   run twice even if it panics
//! - `dispose`, `cancel`, and `transfer` each take `&mut self`; concurrent use
//!   from several threads requires external synchronization
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use seqscope::scope::Scope;
//!
//! let released = Cell::new(0);
//! {
//!     let _guard = Scope::new(|| released.set(released.get() + 1));
//!     // ... work that may return early ...
//! }
//! assert_eq!(released.get(), 1);
//! ```

use std::fmt;

/// Lifecycle state of a [`Scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// Cleanup is still pending.
    Armed,
    /// Cleanup ran, was cancelled, or was transferred.
    Disposed,
}

/// Runs a cleanup action exactly once.
///
/// The guard is `Send` whenever its action is, so it can be moved to
/// another thread or held across an `.await` in a spawned task. The action
/// is dropped without running if the guard is cancelled.
#[must_use = "a scope runs its action when dropped; binding it to `_` drops it immediately"]
pub struct Scope<F: FnOnce()> {
    action: Option<F>,
    state: ScopeState,
}

/// A guard over a boxed action, for storing guards with different actions
/// side by side.
pub type BoxedScope<'a> = Scope<Box<dyn FnOnce() + 'a>>;

/// A boxed guard that can cross threads.
pub type SendScope<'a> = Scope<Box<dyn FnOnce() + Send + 'a>>;

impl<F: FnOnce()> Scope<F> {
    /// Create an armed guard that runs `action` when disposed.
    pub fn new(action: F) -> Self {
        Self {
            action: Some(action),
            state: ScopeState::Armed,
        }
    }

    /// Create a guard from an optional action. `None` yields an empty guard.
    pub fn from_option(action: Option<F>) -> Self {
        Self {
            action,
            state: ScopeState::Armed,
        }
    }

    /// Current state.
    pub fn state(&self) -> ScopeState {
        self.state
    }

    /// True if disposal would still run the action.
    pub fn is_armed(&self) -> bool {
        self.state == ScopeState::Armed && self.action.is_some()
    }

    /// Disarm the guard without running the action.
    pub fn cancel(&mut self) {
        if self.action.take().is_some() {
            tracing::trace!("scope cancelled");
        }
        self.state = ScopeState::Disposed;
    }

    /// Move the pending action into a new armed guard and disarm this one.
    ///
    /// Transferring a guard that was already disposed yields an empty guard.
    pub fn transfer(&mut self) -> Scope<F> {
        let action = self.action.take();
        self.state = ScopeState::Disposed;
        if action.is_some() {
            tracing::trace!("scope transferred");
        }
        Scope::from_option(action)
    }

    /// Run the action if it has not run yet. Later calls do nothing.
    pub fn dispose(&mut self) {
        self.state = ScopeState::Disposed;
        if let Some(action) = self.action.take() {
            tracing::trace!("scope disposed");
            action();
        }
    }
}

impl Scope<fn()> {
    /// Create a guard whose disposal does nothing.
    pub const fn empty() -> Self {
        Self {
            action: None,
            state: ScopeState::Armed,
        }
    }

    /// Create a guard that drops `value` when disposed.
    pub fn dropping<T>(value: T) -> Scope<impl FnOnce()> {
        Scope::new(move || drop(value))
    }
}

impl<'a> BoxedScope<'a> {
    /// Create an armed guard over a boxed action.
    pub fn boxed(action: impl FnOnce() + 'a) -> Self {
        Scope::new(Box::new(action))
    }
}

impl<F: FnOnce()> Default for Scope<F> {
    fn default() -> Self {
        Self::from_option(None)
    }
}

impl<F: FnOnce()> fmt::Debug for Scope<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("state", &self.state)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

impl<F: FnOnce()> Drop for Scope<F> {
    fn drop(&mut self) {
        self.dispose();
    }
}
