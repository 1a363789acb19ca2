use super::models::{CalendarEvent, EventType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which event types are shown. Display only, never touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFilter {
    active: BTreeSet<EventType>,
}

impl Default for TypeFilter {
    fn default() -> Self {
        Self {
            active: EventType::ALL.into_iter().collect(),
        }
    }
}

impl TypeFilter {
    /// Flip `event_type` in or out of the active set, returning its new state
    pub fn toggle(&mut self, event_type: EventType) -> bool {
        if self.active.remove(&event_type) {
            false
        } else {
            self.active.insert(event_type);
            true
        }
    }

    pub fn is_active(&self, event_type: EventType) -> bool {
        self.active.contains(&event_type)
    }

    pub fn matches(&self, event: &CalendarEvent) -> bool {
        self.is_active(event.event_type)
    }

    pub fn active_types(&self) -> impl Iterator<Item = EventType> + '_ {
        self.active.iter().copied()
    }

    pub fn show_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_active_by_default() {
        let filter = TypeFilter::default();
        assert!(EventType::ALL.iter().all(|t| filter.is_active(*t)));
    }

    #[test]
    fn toggle_flips_state() {
        let mut filter = TypeFilter::default();
        assert!(!filter.toggle(EventType::Gaming));
        assert!(!filter.is_active(EventType::Gaming));
        assert_eq!(filter.active_types().count(), 4);

        assert!(filter.toggle(EventType::Gaming));
        assert!(filter.is_active(EventType::Gaming));

        filter.toggle(EventType::Work);
        filter.show_all();
        assert_eq!(filter, TypeFilter::default());
    }
}
