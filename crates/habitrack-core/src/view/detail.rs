use serde::Serialize;

use super::{strip_cells, AppState, Navigation, StripCell, TitleForm};
use crate::error::{HabitError, ValidationError};
use crate::habit::{DayKey, HabitId};

/// Detail screen for one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetailView {
    Found {
        id: HabitId,
        title: String,
        /// Toggleable days, oldest first.
        strip: Vec<StripCell>,
        edit_dialog: TitleForm,
    },
    /// The id does not (or no longer) name a habit.
    NotFound { id: HabitId },
}

/// Controller for a single habit's detail view.
#[derive(Debug)]
pub struct DetailController {
    habit_id: HabitId,
    edit_open: bool,
    edit_error: Option<ValidationError>,
}

impl DetailController {
    pub fn new(habit_id: HabitId) -> Self {
        Self {
            habit_id,
            edit_open: false,
            edit_error: None,
        }
    }

    pub fn habit_id(&self) -> &HabitId {
        &self.habit_id
    }

    pub fn is_edit_open(&self) -> bool {
        self.edit_open
    }

    /// Flip completion of `day` for this habit. Only days on the rendered
    /// strip can be toggled; any other day is ignored.
    pub fn toggle_day(&mut self, state: &mut AppState, day: DayKey) -> Navigation {
        if state.store().contains(self.habit_id.as_str()) && !state.window().contains(&day) {
            tracing::warn!(id = %self.habit_id, %day, "toggle outside the strip ignored");
            return Navigation::Stay;
        }
        match state.store_mut().toggle_day(self.habit_id.as_str(), day) {
            Ok(_) => Navigation::Stay,
            Err(err) => {
                tracing::warn!(%err, "toggle on missing habit");
                Navigation::ToList
            }
        }
    }

    pub fn open_edit(&mut self, state: &AppState) -> Navigation {
        if !state.store().contains(self.habit_id.as_str()) {
            return Navigation::ToList;
        }
        self.edit_open = true;
        self.edit_error = None;
        Navigation::Stay
    }

    pub fn cancel_edit(&mut self) {
        self.edit_open = false;
        self.edit_error = None;
    }

    /// Save the edit dialog. Without an open dialog this does nothing.
    pub fn submit_edit(&mut self, state: &mut AppState, raw_title: &str) -> Navigation {
        if !self.edit_open {
            return Navigation::Stay;
        }
        match state.store_mut().edit(self.habit_id.as_str(), raw_title) {
            Ok(_) => {
                self.cancel_edit();
                Navigation::Stay
            }
            Err(HabitError::Validation(err)) => {
                self.edit_error = Some(err);
                Navigation::Stay
            }
            Err(HabitError::NotFound(err)) => {
                tracing::warn!(%err, "edit on missing habit");
                self.cancel_edit();
                Navigation::ToList
            }
        }
    }

    /// Delete this habit. Always leaves the detail view.
    pub fn delete(&mut self, state: &mut AppState) -> Navigation {
        if let Err(err) = state.store_mut().delete(self.habit_id.as_str()) {
            tracing::warn!(%err, "delete on missing habit");
        }
        Navigation::ToList
    }

    pub fn back(&self) -> Navigation {
        Navigation::ToList
    }

    pub fn view(&self, state: &AppState) -> DetailView {
        let Some(habit) = state.store().get(self.habit_id.as_str()) else {
            return DetailView::NotFound {
                id: self.habit_id.clone(),
            };
        };
        DetailView::Found {
            id: habit.id().clone(),
            title: habit.title().to_string(),
            strip: strip_cells(habit, &state.window()),
            edit_dialog: TitleForm::new(self.edit_open, habit.title(), self.edit_error.as_ref()),
        }
    }
}
