//! # Roombook Runtime
//!
//! Runtime implementation for the Roombook client architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling for the reservation client's feature stores (session,
//! rooms, history, auth).
//!
//! ## Core Components
//!
//! - **Store**: owns state, runs the reducer, executes effects
//! - **Effect Executor**: executes effect descriptions and feeds produced
//!   actions back into the reducer
//! - **`EffectHandle`**: lets callers wait for the effects of one action
//!
//! The client's scheduling model is cooperative: every network call is a
//! suspension point described by an effect, the reducer never blocks, and
//! the store's `send` path is the single writer for its state. The store
//! executes each effect exactly once — there is no retry machinery. A failed
//! mutation surfaces as an event action and the user re-triggers it.
//!
//! ## Example
//!
//! ```ignore
//! use roombook_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action and wait for its effects
//! let mut handle = store.send(Action::Load).await?;
//! handle.wait().await;
//!
//! // Read state
//! let count = store.state(|s| s.reservations.len()).await;
//! ```

use roombook_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, broadcast, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// Returned when `send()` is called after shutdown initiated. An
        /// effect that finishes after shutdown receives this from its
        /// feedback `send` and discards its action.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        ///
        /// The action broadcast channel was closed, typically because the
        /// store is shutting down.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;
pub use store::Store;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects spawned by
/// one action. The handle counts the effects started for that action; the
/// count reaches zero when every spawned task has finished (including the
/// feedback `send` of any action it produced).
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Load).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // The Loaded / LoadFailed event has been reduced by now.
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new effect handle together with its tracking side
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Wait for all effects to complete
    ///
    /// Returns when the effect counter reaches zero. If every tracking side
    /// has been dropped the counter can no longer rise, so the wait ends.
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Ensures the counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store module - the runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectTracking, Ordering, Reducer, RwLock, StoreError, broadcast, watch,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the reducer runs under the write lock, so
    ///    there is exactly one writer path)
    /// 2. Reducer (feature logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with the action feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(
    ///     SessionState::new(),
    ///     SessionReducer::new(),
    ///     SessionEnvironment::new(api),
    /// );
    ///
    /// store.send(SessionAction::Resolve).await?;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        /// Action broadcast channel for observing actions produced by effects.
        ///
        /// All actions produced by effects are broadcast to observers. This
        /// is what lets a navigation guard recompute its decision on every
        /// session change instead of caching a stale one.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The action broadcast capacity defaults to 16; use
        /// [`Store::with_broadcast_capacity`] if observers frequently lag.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (action_broadcast, _) = broadcast::channel(16);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// Create a new store with custom action broadcast capacity
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// This is the primary way to interact with the store:
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Executes returned effects in spawned tasks
        /// 4. Effects may produce more actions (feedback loop)
        ///
        /// `send()` returns after *starting* effect execution, not after
        /// completion; await the returned [`EffectHandle`] to observe the
        /// reduced outcome of a network call.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is
        /// shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                effects
            };

            for effect in effects {
                self.execute_effect(effect, tracking.clone());
            }

            Ok(handle)
        }

        /// Send an action and wait for a matching result action
        ///
        /// Designed for request-response shaped interactions: subscribe to
        /// the action broadcast *before* sending (no race), send the initial
        /// action, then wait for the first action produced by effects that
        /// matches the predicate.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: no matching action within `timeout`
        /// - [`StoreError::ChannelClosed`]: broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: store is shutting down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut receiver = self.action_broadcast.subscribe();
            self.send(action).await?;

            let deadline = tokio::time::Instant::now() + timeout;
            loop {
                let remaining = deadline
                    .checked_duration_since(tokio::time::Instant::now())
                    .ok_or(StoreError::Timeout)?;

                match tokio::time::timeout(remaining, receiver.recv()).await {
                    Err(_) => return Err(StoreError::Timeout),
                    Ok(Ok(candidate)) => {
                        if predicate(&candidate) {
                            return Ok(candidate);
                        }
                    },
                    // A lagged observer skips old actions and keeps waiting;
                    // the timeout catches anything that was dropped.
                    Ok(Err(broadcast::error::RecvError::Lagged(_))) => {},
                    Ok(Err(broadcast::error::RecvError::Closed)) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released
        /// promptly:
        ///
        /// ```ignore
        /// let count = store.state(|s| s.reservations.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Subscribe to all actions produced by this store's effects
        ///
        /// Returns a receiver that gets a clone of every action produced by
        /// effects (not the initial actions sent via `send`). The navigation
        /// guard layer uses this to re-run its decision whenever the session
        /// resolves or changes.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Sets the shutdown flag (rejecting new actions), then waits for
        /// pending effects to complete. Effects still in flight when the
        /// timeout expires keep running detached; their eventual feedback
        /// `send` is rejected and the produced action is discarded.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
        /// before all pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(100);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(
                        pending_effects = pending,
                        "Shutdown timeout: {} effects still running",
                        pending
                    );
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Execute an effect with tracking
        ///
        /// # Effect Types
        ///
        /// - `None`: no-op
        /// - `Future`: executes async computation, feeds back the action if `Some`
        /// - `Delay`: waits for the duration, then feeds back the action
        /// - `Parallel`: executes effects concurrently
        /// - `Sequential`: executes effects in order, waiting for each
        ///
        /// # Error Handling Strategy
        ///
        /// Reducer panics propagate (reducers must be pure functions that do
        /// not panic). Effect tasks are fire-and-forget: the
        /// [`DecrementGuard`] keeps the counters correct even on panic, and a
        /// feedback `send` rejected by shutdown simply drops the action.
        #[allow(clippy::needless_pass_by_value)] // tracking is cloned into tasks
        fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let tracking_clone = tracking.clone();
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking_clone);
                        let _pending_guard = pending_guard;

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, feeding back");

                            // Broadcast to observers (guard layer, tests)
                            let _ = store.action_broadcast.send(action.clone());

                            // Feed the action back into the reducer. If the
                            // store shut down meanwhile the action is
                            // discarded, never applied to unmounted state.
                            let _ = store.send(action).await;
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    });
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!("Executing Effect::Delay (duration: {:?})", duration);
                    metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let tracking_clone = tracking.clone();
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking_clone);
                        let _pending_guard = pending_guard;

                        tokio::time::sleep(duration).await;

                        let _ = store.action_broadcast.send((*action).clone());
                        let _ = store.send(*action).await;
                    });
                },
                Effect::Parallel(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);

                    for inner in effects {
                        self.execute_effect(inner, tracking.clone());
                    }
                },
                Effect::Sequential(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "sequential")
                        .increment(1);

                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let tracking_clone = tracking.clone();
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking_clone);
                        let _pending_guard = pending_guard;

                        for inner in effects {
                            let (sub_tx, mut sub_rx) = watch::channel(());
                            let sub_tracking = EffectTracking {
                                counter: Arc::new(AtomicUsize::new(0)),
                                notifier: sub_tx,
                            };

                            store.execute_effect(inner, sub_tracking.clone());

                            // Wait for this effect to finish before the next
                            while sub_tracking.counter.load(Ordering::SeqCst) > 0 {
                                if sub_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}
