//! List and detail view controllers.
//!
//! Controllers turn user intents into [`HabitStore`] calls and hold the
//! presentational state of their forms and dialogs. They never touch habits
//! directly: the collection is owned by [`AppState`] and changed only through
//! the store's operations.
//!
//! Every intent answers with a [`Navigation`]. A habit id that has gone stale
//! (deleted in the meantime) sends the user back to the list instead of
//! failing; a rejected title stays on screen as a field error.

mod detail;
mod list;

pub use detail::{DetailController, DetailView};
pub use list::{HabitCard, ListController, ListView};

use serde::Serialize;
use std::fmt;

use crate::error::{HabitError, Result, ValidationError};
use crate::habit::{
    last_n_days, today, DayBoundary, DayKey, Habit, HabitId, HabitStore, TitleValidator,
    DEFAULT_STRIP_DAYS,
};
use crate::storage::Config;

/// Application state: the habit collection plus how the strip is drawn.
#[derive(Debug, Clone)]
pub struct AppState {
    store: HabitStore,
    strip_days: usize,
    boundary: DayBoundary,
    pinned_today: Option<DayKey>,
}

impl AppState {
    pub fn new(store: HabitStore) -> Self {
        Self {
            store,
            strip_days: DEFAULT_STRIP_DAYS,
            boundary: DayBoundary::default(),
            pinned_today: None,
        }
    }

    /// Seeded store and strip settings taken from `config`.
    ///
    /// # Errors
    /// Fails when the configured seed titles do not validate.
    pub fn from_config(config: &Config) -> Result<Self, ValidationError> {
        let validator = TitleValidator::new(config.validation.max_title_len);
        let store = HabitStore::from_titles(&config.seed.titles, validator)?;
        Ok(Self::new(store).with_strip(config.strip.days, config.strip.day_boundary))
    }

    /// Load configuration from the data directory and seed from it.
    ///
    /// # Errors
    /// Fails when the configuration cannot be loaded or its seed is invalid.
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::from_config(&config).map_err(HabitError::from)?)
    }

    pub fn with_strip(mut self, days: usize, boundary: DayBoundary) -> Self {
        self.strip_days = days;
        self.boundary = boundary;
        self
    }

    /// Change the strip width, keeping the day boundary.
    pub fn with_strip_days(mut self, days: usize) -> Self {
        self.strip_days = days;
        self
    }

    /// Fix "today" instead of reading the clock.
    pub fn pin_today(mut self, day: DayKey) -> Self {
        self.pinned_today = Some(day);
        self
    }

    pub fn store(&self) -> &HabitStore {
        &self.store
    }

    /// Mutation entry point handed to controllers.
    pub fn store_mut(&mut self) -> &mut HabitStore {
        &mut self.store
    }

    pub fn strip_days(&self) -> usize {
        self.strip_days
    }

    pub fn today(&self) -> DayKey {
        self.pinned_today.unwrap_or_else(|| today(self.boundary))
    }

    /// The completion strip's days, oldest first.
    pub fn window(&self) -> Vec<DayKey> {
        last_n_days(self.strip_days, self.today())
    }
}

/// The two logical views and their paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "id", rename_all = "snake_case")]
pub enum Route {
    /// `/`
    List,
    /// `/habits/{id}`
    Detail(HabitId),
}

impl Route {
    /// Parse a path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Some(Route::List);
        }
        let id = path.strip_prefix("/habits/")?.trim_end_matches('/');
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Route::Detail(HabitId::from(id)))
    }

    pub fn detail(habit: &Habit) -> Self {
        Route::Detail(habit.id().clone())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => f.write_str("/"),
            Route::Detail(id) => write!(f, "/habits/{id}"),
        }
    }
}

/// Where to go after an intent has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    ToList,
    ToDetail(HabitId),
}

/// One cell of a completion strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripCell {
    pub day: DayKey,
    pub completed: bool,
}

pub(crate) fn strip_cells(habit: &Habit, window: &[DayKey]) -> Vec<StripCell> {
    window
        .iter()
        .map(|&day| StripCell {
            day,
            completed: habit.is_completed(day),
        })
        .collect()
}

/// A title form (create form or edit dialog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleForm {
    pub open: bool,
    /// Value the field starts with when opened.
    pub initial: String,
    /// Field-level error message from the last rejected submit.
    pub error: Option<String>,
}

impl TitleForm {
    pub(crate) fn new(open: bool, initial: impl Into<String>, error: Option<&ValidationError>) -> Self {
        Self {
            open,
            initial: initial.into(),
            error: error.map(ToString::to_string),
        }
    }
}

/// Rendered screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum View {
    List(ListView),
    Detail(DetailView),
}

/// Owns the controller of the active view and switches between them.
#[derive(Debug, Default)]
pub struct Router {
    list: ListController,
    detail: Option<DetailController>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> Route {
        match &self.detail {
            Some(detail) => Route::Detail(detail.habit_id().clone()),
            None => Route::List,
        }
    }

    /// Open `route` with a fresh controller.
    pub fn go(&mut self, route: Route) {
        match route {
            Route::List => {
                self.list = ListController::default();
                self.detail = None;
            }
            Route::Detail(id) => {
                tracing::debug!(id = %id, "open detail view");
                self.detail = Some(DetailController::new(id));
            }
        }
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::Stay => {}
            Navigation::ToList => self.go(Route::List),
            Navigation::ToDetail(id) => self.go(Route::Detail(id)),
        }
    }

    pub fn list(&mut self) -> &mut ListController {
        &mut self.list
    }

    /// Detail controller, when the detail view is active.
    pub fn detail(&mut self) -> Option<&mut DetailController> {
        self.detail.as_mut()
    }

    pub fn render(&self, state: &AppState) -> View {
        match &self.detail {
            Some(detail) => View::Detail(detail.view(state)),
            None => View::List(self.list.view(state)),
        }
    }
}
