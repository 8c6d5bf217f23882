use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::habit::{DayKey, HabitId};

/// Every successful store mutation produces an Event.
/// The shell drains them after each action to report and log what changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HabitEvent {
    HabitCreated {
        id: HabitId,
        title: String,
        at: DateTime<Utc>,
    },
    HabitRenamed {
        id: HabitId,
        from: String,
        to: String,
        at: DateTime<Utc>,
    },
    DayToggled {
        id: HabitId,
        day: DayKey,
        completed: bool,
        at: DateTime<Utc>,
    },
    HabitDeleted {
        id: HabitId,
        title: String,
        at: DateTime<Utc>,
    },
}

impl HabitEvent {
    /// Id of the habit the event is about.
    pub fn habit_id(&self) -> &HabitId {
        match self {
            HabitEvent::HabitCreated { id, .. }
            | HabitEvent::HabitRenamed { id, .. }
            | HabitEvent::DayToggled { id, .. }
            | HabitEvent::HabitDeleted { id, .. } => id,
        }
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        match self {
            HabitEvent::HabitCreated { id, title, .. } => format!("created habit {id}: {title}"),
            HabitEvent::HabitRenamed { id, to, .. } => format!("renamed habit {id} to {to}"),
            HabitEvent::DayToggled {
                id, day, completed, ..
            } => {
                let state = if *completed { "done" } else { "not done" };
                format!("habit {id}: {day} marked {state}")
            }
            HabitEvent::HabitDeleted { id, title, .. } => format!("deleted habit {id}: {title}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = HabitEvent::DayToggled {
            id: HabitId::from("1"),
            day: DayKey::parse("2024-03-10").unwrap(),
            completed: true,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "DayToggled");
        assert_eq!(json["day"], "2024-03-10");
        assert_eq!(event.summary(), "habit 1: 2024-03-10 marked done");
        assert_eq!(event.habit_id(), "1");
    }
}
