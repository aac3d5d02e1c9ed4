//! Navigation-aware theme stack
//!
//! This module tracks which service theme is active while the user moves
//! between differently themed route groups. Entering a service pushes the
//! previously active one onto a history stack; going back pops it.
//!
//! All mutations run as a single read-compute-write step over the current
//! state, so navigation events fired in quick succession (swipe back, then
//! forward) never drop intermediate stack entries.
//!
//! After every switch the controller is briefly "transitioning" so dependent
//! animations can coordinate. The flag is cleared by a settle timer on the
//! Tokio runtime; a newer transition cancels the pending settle of an older one.

use crate::appearance::BaseThemeName;
use crate::service::ServiceId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default time the controller stays in the transitioning phase (100ms)
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Snapshot of the theme stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStackState {
    /// Current global (base) theme
    pub global_theme: BaseThemeName,
    /// Active service, `None` meaning the base theme without override
    pub active_service: Option<ServiceId>,
    /// Previously active services, most recent last
    pub theme_stack: Vec<ServiceId>,
    /// Service that was active before the last switch
    pub previous_service: Option<ServiceId>,
    /// Whether a switch is still settling
    pub is_transitioning: bool,
}

impl ThemeStackState {
    /// Current phase of the controller
    pub fn phase(&self) -> StackPhase {
        if self.is_transitioning {
            StackPhase::Transitioning(self.active_service)
        } else {
            StackPhase::Idle(self.active_service)
        }
    }

    /// Switch to `next`, returning whether anything changed
    fn switch_to(&mut self, next: Option<ServiceId>) -> bool {
        if self.active_service == next {
            return false;
        }
        self.previous_service = self.active_service;
        self.active_service = next;
        true
    }
}

/// Phase of the theme stack controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackPhase {
    /// Settled on the given service
    Idle(Option<ServiceId>),
    /// Switched to the given service, settle timer pending
    ///
    /// The switch time is not recorded; the settle timer owns the deadline.
    Transitioning(Option<ServiceId>),
}

/// Hooks the host navigator calls on screen focus and blur
pub trait NavigationLifecycle {
    /// A screen belonging to `service` gained focus
    fn on_navigation_focus(&self, service: ServiceId);

    /// The focused screen lost focus
    fn on_navigation_blur(&self);
}

struct Slot {
    state: ThemeStackState,
    /// Bumped on every transition; a settle callback only applies to its own generation
    generation: u64,
    settle_task: Option<JoinHandle<()>>,
}

struct Inner {
    slot: Mutex<Slot>,
    settle_delay: Duration,
    changes: watch::Sender<ThemeStackState>,
}

/// Owner of the theme stack state
///
/// Cheap to clone; clones share the same state. Independent controllers can be
/// created freely (e.g. one per test).
///
/// # Example
///
/// ```
/// use app_state::service::ServiceId;
/// use app_state::theme_stack::ThemeStackController;
///
/// let controller = ThemeStackController::new();
/// controller.push_service_theme(ServiceId::Education);
/// controller.push_service_theme(ServiceId::Booking);
/// assert_eq!(controller.theme_stack(), vec![ServiceId::Education]);
///
/// assert_eq!(controller.pop_service_theme(), Some(ServiceId::Education));
/// assert_eq!(controller.active_service(), Some(ServiceId::Education));
/// ```
pub struct ThemeStackController {
    inner: Arc<Inner>,
}

impl Default for ThemeStackController {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ThemeStackController {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for ThemeStackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStackController")
            .field("state", &self.state())
            .field("settle_delay", &self.inner.settle_delay)
            .finish()
    }
}

impl ThemeStackController {
    /// Create a controller on the professional theme with the default settle delay
    pub fn new() -> Self {
        Self::with_settings(BaseThemeName::default(), DEFAULT_SETTLE_DELAY)
    }

    /// Create a controller with an explicit global theme and settle delay
    pub fn with_settings(global_theme: BaseThemeName, settle_delay: Duration) -> Self {
        let state = ThemeStackState {
            global_theme,
            ..ThemeStackState::default()
        };
        let (changes, _) = watch::channel(state.clone());

        Self {
            inner: Arc::new(Inner {
                slot: Mutex::new(Slot {
                    state,
                    generation: 0,
                    settle_task: None,
                }),
                settle_delay,
                changes,
            }),
        }
    }

    // ========== Reads ==========

    /// Snapshot of the full state
    pub fn state(&self) -> ThemeStackState {
        self.inner.slot.lock().state.clone()
    }

    /// Active service, if any
    pub fn active_service(&self) -> Option<ServiceId> {
        self.inner.slot.lock().state.active_service
    }

    /// History stack, most recent last
    pub fn theme_stack(&self) -> Vec<ServiceId> {
        self.inner.slot.lock().state.theme_stack.clone()
    }

    /// Service active before the last switch
    pub fn previous_service(&self) -> Option<ServiceId> {
        self.inner.slot.lock().state.previous_service
    }

    /// Whether a switch is still settling
    pub fn is_transitioning(&self) -> bool {
        self.inner.slot.lock().state.is_transitioning
    }

    /// Current global theme
    pub fn global_theme(&self) -> BaseThemeName {
        self.inner.slot.lock().state.global_theme
    }

    /// Current phase
    pub fn phase(&self) -> StackPhase {
        self.inner.slot.lock().state.phase()
    }

    /// Configured settle delay
    pub fn settle_delay(&self) -> Duration {
        self.inner.settle_delay
    }

    /// Subscribe to state changes
    ///
    /// Receivers are notified once per actual change; no-op operations do not
    /// wake them.
    pub fn subscribe(&self) -> watch::Receiver<ThemeStackState> {
        self.inner.changes.subscribe()
    }

    // ========== Mutations ==========

    /// Make `service` the active service
    ///
    /// No-op when it is already active. Does not touch the history stack.
    pub fn set_active_service(&self, service: ServiceId) {
        self.apply("set_active_service", |state| {
            state.switch_to(Some(service));
        });
    }

    /// Enter `service`, remembering the current service on the stack
    ///
    /// Nothing is pushed when no service is active, since there is nothing to
    /// return to.
    pub fn push_service_theme(&self, service: ServiceId) {
        self.apply("push_service_theme", |state| {
            if state.active_service == Some(service) {
                return;
            }
            if let Some(current) = state.active_service {
                state.theme_stack.push(current);
            }
            state.switch_to(Some(service));
        });
    }

    /// Return to the most recently stacked service
    ///
    /// Returns the popped service. On an empty stack this returns `None` and
    /// falls back to the base theme.
    pub fn pop_service_theme(&self) -> Option<ServiceId> {
        self.apply("pop_service_theme", |state| {
            let popped = state.theme_stack.pop();
            state.switch_to(popped);
            popped
        })
    }

    /// Switch to the base theme without treating it as a back navigation
    pub fn reset_to_global_theme(&self) {
        self.apply("reset_to_global_theme", |state| {
            state.switch_to(None);
        });
    }

    /// Clear all history and return to the base theme immediately
    ///
    /// Used when navigating back to the root of the app. Any pending settle
    /// timer is cancelled.
    pub fn reset_theme_stack(&self) {
        let mut slot = self.inner.slot.lock();
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(task) = slot.settle_task.take() {
            task.abort();
        }

        slot.state.theme_stack.clear();
        slot.state.previous_service = None;
        slot.state.active_service = None;
        slot.state.is_transitioning = false;

        tracing::debug!("theme stack reset");
        self.publish(&slot.state);
    }

    /// Change the global base theme
    pub fn set_global_theme(&self, theme: BaseThemeName) {
        let mut slot = self.inner.slot.lock();
        if slot.state.global_theme == theme {
            return;
        }
        tracing::debug!(from = %slot.state.global_theme, to = %theme, "global theme changed");
        slot.state.global_theme = theme;
        self.publish(&slot.state);
    }

    /// Apply `op` to the current state as one atomic step
    ///
    /// When the active service changed, enters the transitioning phase and
    /// (re)arms the settle timer.
    fn apply<R>(&self, name: &'static str, op: impl FnOnce(&mut ThemeStackState) -> R) -> R {
        let mut slot = self.inner.slot.lock();
        let before = slot.state.active_service;
        let result = op(&mut slot.state);

        if slot.state.active_service != before {
            tracing::debug!(
                op = name,
                from = ?before,
                to = ?slot.state.active_service,
                depth = slot.state.theme_stack.len(),
                "service theme switched"
            );
            slot.state.is_transitioning = true;
            self.arm_settle(&mut slot);
        } else {
            tracing::trace!(op = name, active = ?before, "service theme unchanged");
        }

        self.publish(&slot.state);
        result
    }

    fn arm_settle(&self, slot: &mut Slot) {
        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;

        if let Some(task) = slot.settle_task.take() {
            task.abort();
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.inner);
                let delay = self.inner.settle_delay;
                slot.settle_task = Some(handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    inner.settle(generation);
                }));
            }
            Err(_) => {
                // Without a runtime there is nothing to drive the timer; settle now.
                slot.state.is_transitioning = false;
            }
        }
    }

    fn publish(&self, state: &ThemeStackState) {
        self.inner.changes.send_if_modified(|current| {
            if current == state {
                false
            } else {
                *current = state.clone();
                true
            }
        });
    }
}

impl Inner {
    fn settle(&self, generation: u64) {
        let mut slot = self.slot.lock();
        if slot.generation != generation || !slot.state.is_transitioning {
            return;
        }
        slot.state.is_transitioning = false;
        slot.settle_task = None;
        tracing::trace!(active = ?slot.state.active_service, "theme transition settled");

        let state = slot.state.clone();
        self.changes.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }
}

impl NavigationLifecycle for ThemeStackController {
    fn on_navigation_focus(&self, service: ServiceId) {
        self.push_service_theme(service);
    }

    fn on_navigation_blur(&self) {
        // Unwinding is left to the next screen's focus event so adjacent screens
        // of the same service do not flicker through another theme.
        tracing::trace!("navigation blur ignored");
    }
}
