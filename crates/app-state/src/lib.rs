//! Application state for the service marketplace
//!
//! This crate owns the state that drives theming across the app: the known
//! service identifiers, the global appearance preference, and the
//! navigation-aware theme stack.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod appearance;
pub mod service;
pub mod theme_stack;

pub use appearance::{BaseThemeName, InvalidThemeName};
pub use service::ServiceId;
pub use theme_stack::{
    NavigationLifecycle, StackPhase, ThemeStackController, ThemeStackState, DEFAULT_SETTLE_DELAY,
};
