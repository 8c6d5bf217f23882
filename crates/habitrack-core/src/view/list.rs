use serde::Serialize;

use super::{strip_cells, AppState, Navigation, Route, StripCell, TitleForm};
use crate::error::{HabitError, ValidationError};
use crate::habit::{DayKey, HabitId};

/// A habit as shown on the list: title, read-only strip, link to details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitCard {
    pub id: HabitId,
    pub title: String,
    pub strip: Vec<StripCell>,
    pub detail_route: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub window: Vec<DayKey>,
    pub cards: Vec<HabitCard>,
    pub create_form: TitleForm,
    /// Edit dialog, present while a habit is being edited.
    pub edit_dialog: Option<(HabitId, TitleForm)>,
}

/// Controller for the habit list.
#[derive(Debug, Default)]
pub struct ListController {
    create_open: bool,
    create_error: Option<ValidationError>,
    editing: Option<HabitId>,
    edit_error: Option<ValidationError>,
}

impl ListController {
    pub fn is_create_open(&self) -> bool {
        self.create_open
    }

    pub fn editing(&self) -> Option<&HabitId> {
        self.editing.as_ref()
    }

    pub fn toggle_create_form(&mut self) {
        self.create_open = !self.create_open;
        self.create_error = None;
    }

    /// Create a habit from the form. A rejected title keeps the form open
    /// with its error; success closes and resets the form.
    pub fn submit_create(&mut self, state: &mut AppState, raw_title: &str) -> Navigation {
        match state.store_mut().create(raw_title) {
            Ok(habit) => {
                tracing::info!(id = %habit.id(), "habit created from list");
                self.create_open = false;
                self.create_error = None;
            }
            Err(HabitError::Validation(err)) => {
                self.create_open = true;
                self.create_error = Some(err);
            }
            // create never looks an id up
            Err(HabitError::NotFound(_)) => {}
        }
        Navigation::Stay
    }

    /// Open the edit dialog for `id`.
    pub fn open_edit(&mut self, state: &AppState, id: &str) -> Navigation {
        if !state.store().contains(id) {
            tracing::warn!(id, "edit requested for missing habit");
            return self.lost(id);
        }
        self.editing = Some(HabitId::from(id));
        self.edit_error = None;
        Navigation::Stay
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.edit_error = None;
    }

    /// Save the edit dialog. Without an open dialog this does nothing.
    pub fn submit_edit(&mut self, state: &mut AppState, raw_title: &str) -> Navigation {
        let Some(id) = self.editing.clone() else {
            return Navigation::Stay;
        };
        match state.store_mut().edit(id.as_str(), raw_title) {
            Ok(_) => {
                self.cancel_edit();
                Navigation::Stay
            }
            Err(HabitError::Validation(err)) => {
                self.edit_error = Some(err);
                Navigation::Stay
            }
            Err(HabitError::NotFound(_)) => self.lost(id.as_str()),
        }
    }

    pub fn delete(&mut self, state: &mut AppState, id: &str) -> Navigation {
        match state.store_mut().delete(id) {
            Ok(()) => {
                if self.editing.as_ref().is_some_and(|editing| editing == id) {
                    self.cancel_edit();
                }
                Navigation::Stay
            }
            Err(err) => {
                tracing::warn!(%err, "delete requested for missing habit");
                self.lost(id)
            }
        }
    }

    /// Follow a card's details link.
    pub fn open_detail(&self, id: &str) -> Navigation {
        Navigation::ToDetail(HabitId::from(id))
    }

    fn lost(&mut self, id: &str) -> Navigation {
        if self.editing.as_ref().is_some_and(|editing| editing == id) {
            self.cancel_edit();
        }
        Navigation::ToList
    }

    pub fn view(&self, state: &AppState) -> ListView {
        let window = state.window();
        let cards = state
            .store()
            .iter()
            .map(|habit| HabitCard {
                id: habit.id().clone(),
                title: habit.title().to_string(),
                strip: strip_cells(habit, &window),
                detail_route: Route::detail(habit).to_string(),
            })
            .collect();

        let edit_dialog = self.editing.as_ref().and_then(|id| {
            let habit = state.store().get(id.as_str())?;
            Some((
                id.clone(),
                TitleForm::new(true, habit.title(), self.edit_error.as_ref()),
            ))
        });

        ListView {
            window,
            cards,
            create_form: TitleForm::new(self.create_open, "", self.create_error.as_ref()),
            edit_dialog,
        }
    }
}
