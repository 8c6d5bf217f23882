//! # Habitrack Core Library
//!
//! This library provides the core logic for Habitrack, a small habit tracker.
//! The CLI binary is a thin terminal surface over the same library: it reads
//! user actions, hands them to the view controllers here and prints the views
//! they render.
//!
//! ## Architecture
//!
//! - **Habit Store**: ordered in-memory collection with copy-on-write
//!   snapshots. Nothing is persisted; the collection lives as long as the
//!   process.
//! - **Day Window**: the trailing N-day sequence shown as a completion strip.
//! - **Validation**: title rules applied before any create or edit.
//! - **Views**: list and detail controllers plus the router between them.
//! - **Storage**: TOML-based configuration (strip width, seed habits).
//!
//! ## Key Components
//!
//! - [`HabitStore`]: the collection and its operations
//! - [`AppState`]: owns the store and the strip settings
//! - [`Router`]: active view and its controller
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod habit;
pub mod storage;
pub mod view;

pub use error::{ConfigError, CoreError, HabitError, NotFoundError, ValidationError};
pub use events::HabitEvent;
pub use habit::{
    last_n_days, last_n_days_from_today, validate_title, DayBoundary, DayKey, Habit, HabitId,
    HabitStore, Snapshot, TitleValidator,
};
pub use storage::Config;
pub use view::{
    AppState, DetailController, DetailView, ListController, ListView, Navigation, Route, Router,
    View,
};
