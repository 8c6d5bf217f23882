//! In-memory habit collection and its mutation rules.
//!
//! The collection lives behind an `Arc`. Readers take a [`Snapshot`] (a cheap
//! handle to the current collection); the next mutation copies the collection
//! if a snapshot is still held, so every snapshot stays exactly as it was
//! when it was taken.

use chrono::Utc;
use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use super::{DayKey, Habit, HabitId, TitleValidator};
use crate::error::{HabitError, NotFoundError, ValidationError};
use crate::events::HabitEvent;

/// Immutable view of the collection at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Arc<Vec<Habit>>);

impl Snapshot {
    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.0.iter().find(|h| h.id() == id)
    }
}

impl Deref for Snapshot {
    type Target = [Habit];

    fn deref(&self) -> &[Habit] {
        &self.0
    }
}

/// Decimal id counter. Never hands out the same id twice in one process,
/// even after the habit holding it has been deleted. `None` once `u64::MAX`
/// has been issued.
#[derive(Debug, Clone)]
struct IdSequence {
    next: Option<u64>,
}

impl IdSequence {
    fn after(habits: &[Habit]) -> Result<Self, ValidationError> {
        let max = habits
            .iter()
            .filter_map(|h| h.id().as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let next = max.checked_add(1).ok_or_else(|| ValidationError::IdSpaceExhausted {
            after: max.to_string(),
        })?;
        Ok(Self { next: Some(next) })
    }

    fn issue(&mut self, habits: &[Habit]) -> Option<HabitId> {
        while let Some(n) = self.next {
            self.next = n.checked_add(1);
            let candidate = HabitId::new(n.to_string());
            if !habits.iter().any(|h| h.id() == &candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Ordered habit collection; insertion order is display order.
#[derive(Debug, Clone)]
pub struct HabitStore {
    habits: Arc<Vec<Habit>>,
    ids: IdSequence,
    validator: TitleValidator,
    events: Vec<HabitEvent>,
}

impl HabitStore {
    /// An empty store with default title rules.
    pub fn new() -> Self {
        Self {
            habits: Arc::new(Vec::new()),
            ids: IdSequence { next: Some(1) },
            validator: TitleValidator::default(),
            events: Vec::new(),
        }
    }

    /// A store holding `habits` in the given order. Titles are stored
    /// trimmed, as [`HabitStore::create`] would store them.
    ///
    /// # Errors
    /// Rejects duplicate ids, titles that would not pass validation and a
    /// numeric id of `u64::MAX`, after which no id could be issued.
    pub fn with_seed(habits: impl IntoIterator<Item = Habit>) -> Result<Self, ValidationError> {
        Self::with_seed_and_validator(habits, TitleValidator::default())
    }

    /// Like [`HabitStore::with_seed`] with custom title rules.
    pub fn with_seed_and_validator(
        habits: impl IntoIterator<Item = Habit>,
        validator: TitleValidator,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        let habits = habits
            .into_iter()
            .map(|habit| {
                if !seen.insert(habit.id().clone()) {
                    return Err(ValidationError::DuplicateId {
                        id: habit.id().to_string(),
                    });
                }
                let title = validator.validate(habit.title())?;
                Ok(habit.with_title(title))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        let ids = IdSequence::after(&habits)?;
        Ok(Self {
            habits: Arc::new(habits),
            ids,
            validator,
            events: Vec::new(),
        })
    }

    /// Seed from plain titles, numbering ids from 1.
    pub fn from_titles<S: AsRef<str>>(
        titles: &[S],
        validator: TitleValidator,
    ) -> Result<Self, ValidationError> {
        let habits = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let title = validator.validate(title.as_ref())?;
                Ok(Habit::new((i + 1).to_string(), title))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        Self::with_seed_and_validator(habits, validator)
    }

    pub fn validator(&self) -> TitleValidator {
        self.validator
    }

    /// Current collection. Later mutations do not show through it.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(Arc::clone(&self.habits))
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Habit> {
        self.habits.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.habits.iter().position(|h| h.id() == id)
    }

    fn require(&self, id: &str) -> Result<usize, NotFoundError> {
        self.position(id)
            .ok_or_else(|| NotFoundError { id: id.to_string() })
    }

    /// Append a new habit with no completed days.
    ///
    /// # Errors
    /// [`HabitError::Validation`] when the title is rejected; the collection
    /// is left unchanged.
    pub fn create(&mut self, title: &str) -> Result<Habit, HabitError> {
        let title = self.validator.validate(title)?;
        let id = self
            .ids
            .issue(&self.habits)
            .ok_or_else(|| ValidationError::IdSpaceExhausted {
                after: u64::MAX.to_string(),
            })?;
        let habit = Habit::new(id, title);

        Arc::make_mut(&mut self.habits).push(habit.clone());
        tracing::debug!(id = %habit.id(), title = %habit.title(), "habit created");
        self.events.push(HabitEvent::HabitCreated {
            id: habit.id().clone(),
            title: habit.title().to_string(),
            at: Utc::now(),
        });
        Ok(habit)
    }

    /// Replace the title of habit `id`, keeping its days and position.
    ///
    /// # Errors
    /// [`HabitError::NotFound`] for an unknown id, otherwise
    /// [`HabitError::Validation`] for a rejected title.
    pub fn edit(&mut self, id: &str, title: &str) -> Result<Habit, HabitError> {
        let index = self.require(id)?;
        let title = self.validator.validate(title)?;

        let previous = &self.habits[index];
        let from = previous.title().to_string();
        let habit = previous.with_title(title);

        Arc::make_mut(&mut self.habits)[index] = habit.clone();
        tracing::debug!(id = %habit.id(), from = %from, to = %habit.title(), "habit renamed");
        self.events.push(HabitEvent::HabitRenamed {
            id: habit.id().clone(),
            from,
            to: habit.title().to_string(),
            at: Utc::now(),
        });
        Ok(habit)
    }

    /// Flip the completion flag of `day` on habit `id`.
    ///
    /// A day with no entry counts as not completed, so the first toggle
    /// marks it done. Toggling twice restores the flag.
    pub fn toggle_day(&mut self, id: &str, day: DayKey) -> Result<Habit, NotFoundError> {
        let index = self.require(id)?;
        let habit = self.habits[index].with_day_toggled(day);
        let completed = habit.is_completed(day);

        Arc::make_mut(&mut self.habits)[index] = habit.clone();
        tracing::debug!(id = %habit.id(), day = %day, completed, "day toggled");
        self.events.push(HabitEvent::DayToggled {
            id: habit.id().clone(),
            day,
            completed,
            at: Utc::now(),
        });
        Ok(habit)
    }

    /// Remove habit `id`.
    pub fn delete(&mut self, id: &str) -> Result<(), NotFoundError> {
        let index = self.require(id)?;
        let removed = Arc::make_mut(&mut self.habits).remove(index);

        tracing::debug!(id = %removed.id(), "habit deleted");
        self.events.push(HabitEvent::HabitDeleted {
            id: removed.id().clone(),
            title: removed.title().to_string(),
            at: Utc::now(),
        });
        Ok(())
    }

    /// Take the events recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<HabitEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for HabitStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a HabitStore {
    type Item = &'a Habit;
    type IntoIter = std::slice::Iter<'a, Habit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    fn seeded() -> HabitStore {
        HabitStore::with_seed([Habit::new("1", "Morning exercise"), Habit::new("2", "Read a book")])
            .unwrap()
    }

    #[test]
    fn create_appends_with_next_id() {
        let mut store = seeded();
        let habit = store.create("  Meditate ").unwrap();

        assert_eq!(habit.id(), "3");
        assert_eq!(habit.title(), "Meditate");
        assert!(habit.completed_days().is_empty());
        assert_eq!(store.len(), 3);
        assert_eq!(store.iter().last(), Some(&habit));
    }

    #[test]
    fn create_rejects_blank_title_without_mutation() {
        let mut store = seeded();
        let before = store.snapshot();

        let err = store.create("   ").unwrap_err();
        assert!(matches!(err, HabitError::Validation(ValidationError::EmptyTitle { .. })));
        assert_eq!(store.snapshot(), before);
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = seeded();
        store.delete("2").unwrap();
        let habit = store.create("Walk").unwrap();
        assert_eq!(habit.id(), "3");
    }

    #[test]
    fn ids_skip_non_numeric_seed_ids() {
        let mut store =
            HabitStore::with_seed([Habit::new("abc", "Read"), Habit::new("7", "Run")]).unwrap();
        assert_eq!(store.create("Walk").unwrap().id(), "8");
    }

    #[test]
    fn edit_keeps_days_and_position() {
        let mut store = seeded();
        store.toggle_day("1", day("2024-03-10")).unwrap();

        let edited = store.edit("1", "Stretch").unwrap();
        assert_eq!(edited.title(), "Stretch");
        assert!(edited.is_completed(day("2024-03-10")));
        assert_eq!(store.iter().next(), Some(&edited));
    }

    #[test]
    fn edit_checks_existence_before_title() {
        let mut store = seeded();
        let err = store.edit("99", "").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn edit_rejects_blank_title() {
        let mut store = seeded();
        let err = store.edit("1", " ").unwrap_err();
        assert!(matches!(err, HabitError::Validation(_)));
        assert_eq!(store.get("1").unwrap().title(), "Morning exercise");
    }

    #[test]
    fn toggle_unknown_habit_is_not_found() {
        let mut store = seeded();
        assert_eq!(
            store.toggle_day("9", day("2024-03-10")),
            Err(NotFoundError { id: "9".into() })
        );
    }

    #[test]
    fn delete_unknown_leaves_collection_unchanged() {
        let mut store = seeded();
        let before = store.snapshot();
        assert!(store.delete("42").is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn snapshots_do_not_observe_later_mutations() {
        let mut store = seeded();
        let before = store.snapshot();

        store.toggle_day("1", day("2024-03-10")).unwrap();
        store.edit("2", "Read two books").unwrap();
        store.create("Walk").unwrap();

        assert_eq!(before.len(), 2);
        assert!(!before.get("1").unwrap().is_completed(day("2024-03-10")));
        assert_eq!(before.get("2").unwrap().title(), "Read a book");

        let after = store.snapshot();
        assert_eq!(after.len(), 3);
        assert!(after.get("1").unwrap().is_completed(day("2024-03-10")));
    }

    #[test]
    fn seed_rejects_duplicates_and_blank_titles() {
        let dup = HabitStore::with_seed([Habit::new("1", "A"), Habit::new("1", "B")]);
        assert_eq!(dup.unwrap_err(), ValidationError::DuplicateId { id: "1".into() });

        let blank = HabitStore::with_seed([Habit::new("1", " ")]);
        assert!(matches!(blank, Err(ValidationError::EmptyTitle { .. })));
    }

    #[test]
    fn seed_id_at_the_numeric_limit_is_rejected() {
        let err = HabitStore::with_seed([Habit::new(u64::MAX.to_string(), "Read")]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IdSpaceExhausted {
                after: u64::MAX.to_string()
            }
        );
    }

    #[test]
    fn create_stops_issuing_ids_at_the_numeric_limit() {
        let mut store =
            HabitStore::with_seed([Habit::new((u64::MAX - 1).to_string(), "Read")]).unwrap();
        assert_eq!(store.create("Run").unwrap().id(), u64::MAX.to_string().as_str());

        let before = store.snapshot();
        let err = store.create("Walk").unwrap_err();
        assert!(matches!(
            err,
            HabitError::Validation(ValidationError::IdSpaceExhausted { .. })
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn seed_titles_are_trimmed() {
        let store = HabitStore::with_seed([Habit::new("1", "  Read ")]).unwrap();
        assert_eq!(store.get("1").unwrap().title(), "Read");
    }

    #[test]
    fn from_titles_numbers_from_one() {
        let store = HabitStore::from_titles(&["Run", " Swim "], TitleValidator::default()).unwrap();
        let ids: Vec<_> = store.iter().map(|h| h.id().to_string()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(store.get("2").unwrap().title(), "Swim");
    }

    #[test]
    fn events_follow_mutations_in_order() {
        let mut store = seeded();
        store.create("Walk").unwrap();
        store.toggle_day("3", day("2024-03-10")).unwrap();
        store.edit("3", "Long walk").unwrap();
        store.delete("3").unwrap();

        let kinds: Vec<_> = store
            .drain_events()
            .into_iter()
            .map(|e| match e {
                HabitEvent::HabitCreated { .. } => "created",
                HabitEvent::DayToggled { completed: true, .. } => "toggled-on",
                HabitEvent::DayToggled { .. } => "toggled-off",
                HabitEvent::HabitRenamed { .. } => "renamed",
                HabitEvent::HabitDeleted { .. } => "deleted",
            })
            .collect();
        assert_eq!(kinds, ["created", "toggled-on", "renamed", "deleted"]);
        assert!(store.drain_events().is_empty());
    }
}
